//! Streak service - the view-activation reset check

use crate::error::ApiResult;
use crate::repositories::{SessionRepository, SessionWrite};
use crate::store::{KeyValueStore, SessionKey};
use nutrition_tracker_shared::{Clock, StreakState};
use tracing::info;
use uuid::Uuid;

/// Streak service for reading the streak
pub struct StreakService;

impl StreakService {
    /// Load the streak, zeroing and persisting it when it has lapsed
    pub async fn current(
        store: &dyn KeyValueStore,
        clock: &dyn Clock,
        session_id: Uuid,
    ) -> ApiResult<StreakState> {
        let mut streak = SessionRepository::get_streak(store, session_id).await?;

        if streak.refresh(clock.today()) {
            SessionWrite::new(session_id)
                .put(SessionKey::StreakData, &streak)?
                .commit(store)
                .await?;
            info!(session_id = %session_id, last_log_date = ?streak.last_log_date, "Streak lapsed");
        }

        Ok(streak)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::NaiveDate;
    use nutrition_tracker_shared::FixedClock;

    async fn seed(store: &MemoryStore, session: Uuid, streak: StreakState) {
        SessionWrite::new(session)
            .put(SessionKey::StreakData, &streak)
            .unwrap()
            .commit(store)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_lapsed_streak_is_zeroed_and_saved() {
        let store = MemoryStore::new();
        let session = Uuid::new_v4();
        seed(
            &store,
            session,
            StreakState {
                current_streak: 5,
                last_log_date: NaiveDate::from_ymd_opt(2024, 3, 7),
            },
        )
        .await;
        let clock = FixedClock::at("2024-03-10T09:00:00+00:00").unwrap();

        let streak = StreakService::current(&store, &clock, session).await.unwrap();
        assert_eq!(streak.current_streak, 0);
        assert_eq!(streak.last_log_date, NaiveDate::from_ymd_opt(2024, 3, 7));

        let stored = SessionRepository::get_streak(&store, session).await.unwrap();
        assert_eq!(stored, streak);
    }

    #[tokio::test]
    async fn test_yesterday_streak_survives() {
        let store = MemoryStore::new();
        let session = Uuid::new_v4();
        let yesterday = StreakState {
            current_streak: 3,
            last_log_date: NaiveDate::from_ymd_opt(2024, 3, 9),
        };
        seed(&store, session, yesterday).await;
        let clock = FixedClock::at("2024-03-10T23:00:00+00:00").unwrap();

        let streak = StreakService::current(&store, &clock, session).await.unwrap();
        assert_eq!(streak, yesterday);
    }
}
