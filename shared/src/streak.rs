//! Consecutive-day logging streak

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Streak state persisted per session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StreakState {
    pub current_streak: u32,
    /// Local date of the most recent log, `None` before the first one
    pub last_log_date: Option<NaiveDate>,
}

impl StreakState {
    /// Apply a successful log made on `today`
    ///
    /// Same day: unchanged. Day after the last log: extends the streak.
    /// Anything else starts a new streak of one.
    pub fn record_log(&mut self, today: NaiveDate) {
        match self.last_log_date {
            Some(last) if last == today => {}
            Some(last) if last.succ_opt() == Some(today) => {
                self.current_streak = self.current_streak.saturating_add(1);
                self.last_log_date = Some(today);
            }
            _ => {
                self.current_streak = 1;
                self.last_log_date = Some(today);
            }
        }
    }

    /// Zero the streak when the last log is older than yesterday
    ///
    /// `last_log_date` is kept. Returns whether the state changed.
    pub fn refresh(&mut self, today: NaiveDate) -> bool {
        let Some(last) = self.last_log_date else {
            return false;
        };
        let is_current = last == today || last.succ_opt() == Some(today);
        if is_current || self.current_streak == 0 {
            return false;
        }
        self.current_streak = 0;
        true
    }
}
