//! Per-day aggregation of food log entries

use crate::goals::MacroGoals;
use crate::models::{FoodLogEntry, MealCategory, NutrientTotals};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Totals and meal grouping for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub totals: NutrientTotals,
    /// Only meals that have at least one entry are present
    pub by_category: BTreeMap<MealCategory, Vec<FoodLogEntry>>,
}

impl DailySummary {
    pub fn entry_count(&self) -> usize {
        self.by_category.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_category.is_empty()
    }
}

/// Sum nutrients across entries
pub fn sum_nutrients<'a, I>(entries: I) -> NutrientTotals
where
    I: IntoIterator<Item = &'a FoodLogEntry>,
{
    entries
        .into_iter()
        .fold(NutrientTotals::default(), |acc, entry| acc + entry.nutrients())
}

/// Select the entries logged on `day` and aggregate them
///
/// An entry belongs to `day` when its timestamp's calendar date, read in the
/// timestamp's own offset, equals `day`. Entry order inside each meal follows
/// the order of `logs`.
pub fn aggregate_day(logs: &[FoodLogEntry], day: NaiveDate) -> DailySummary {
    let mut totals = NutrientTotals::default();
    let mut by_category: BTreeMap<MealCategory, Vec<FoodLogEntry>> = BTreeMap::new();

    for entry in logs.iter().filter(|entry| entry.log_date() == day) {
        totals += entry.nutrients();
        by_category
            .entry(entry.meal_category)
            .or_default()
            .push(entry.clone());
    }

    DailySummary {
        date: day,
        totals,
        by_category,
    }
}

/// Day totals measured against the profile's goals
///
/// Percentages are unrounded and may exceed 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyProgress {
    pub remaining_calories: f64,
    pub calories_percent: f64,
    pub protein_percent: f64,
    pub carbs_percent: f64,
    pub fat_percent: f64,
}

impl DailyProgress {
    pub fn from_totals(totals: &NutrientTotals, goals: &MacroGoals) -> Self {
        Self {
            remaining_calories: goals.calorie_goal - totals.calories,
            calories_percent: percent_of(totals.calories, goals.calorie_goal),
            protein_percent: percent_of(totals.protein, goals.protein_goal),
            carbs_percent: percent_of(totals.carbs, goals.carb_goal),
            fat_percent: percent_of(totals.fat, goals.fat_goal),
        }
    }
}

fn percent_of(value: f64, goal: f64) -> f64 {
    if goal > 0.0 {
        value / goal * 100.0
    } else {
        0.0
    }
}
