//! Nutrition Tracker WASM Module
//!
//! WebAssembly bindings that let the browser preview goals and daily
//! totals with the same arithmetic the server uses.

use nutrition_tracker_shared::{
    aggregate_day, goals, FoodLogEntry, MealCategory, Profile, ProfileRequest,
};
use wasm_bindgen::prelude::*;

/// Compute a profile with goals from a profile request JSON
///
/// Returns the profile JSON, or throws the validation message.
#[wasm_bindgen]
pub fn compute_goals(request_json: &str) -> Result<String, JsValue> {
    profile_json(request_json).map_err(|e| JsValue::from_str(&e))
}

/// Sum a day's entries and group them by meal
///
/// `entries_json` is an array of log entries, `date` is `YYYY-MM-DD`.
#[wasm_bindgen]
pub fn summarize_day(entries_json: &str, date: &str) -> Result<String, JsValue> {
    day_summary_json(entries_json, date).map_err(|e| JsValue::from_str(&e))
}

/// Meal category for a local hour of day
#[wasm_bindgen]
pub fn meal_category_for_hour(hour: u32) -> String {
    MealCategory::from_hour(hour).to_string()
}

/// Mifflin-St Jeor basal metabolic rate
#[wasm_bindgen]
pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age_years: u32, is_male: bool) -> f64 {
    let gender = if is_male {
        goals::Gender::Male
    } else {
        goals::Gender::Female
    };
    goals::calculate_bmr_mifflin(weight_kg, height_cm, age_years, gender)
}

fn profile_json(request_json: &str) -> Result<String, String> {
    let request: ProfileRequest = serde_json::from_str(request_json).map_err(|e| e.to_string())?;
    let inputs = request.into_inputs().map_err(|e| e.to_string())?;
    let profile = Profile::new(inputs).map_err(|e| e.to_string())?;
    serde_json::to_string(&profile).map_err(|e| e.to_string())
}

fn day_summary_json(entries_json: &str, date: &str) -> Result<String, String> {
    let entries: Vec<FoodLogEntry> =
        serde_json::from_str(entries_json).map_err(|e| e.to_string())?;
    let day = date.parse().map_err(|_| format!("Invalid date: {}", date))?;
    serde_json::to_string(&aggregate_day(&entries, day)).map_err(|e| e.to_string())
}
