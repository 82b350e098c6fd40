//! Input validation functions
//!
//! Validators return a plain message; [`check`] attaches the user-facing field
//! label and lifts the failure into [`CoreError::InvalidInput`].

use crate::errors::{CoreError, CoreResult};

/// Validate age in years
pub fn validate_age(age_years: i64) -> Result<(), String> {
    if age_years <= 0 {
        return Err("Age must be greater than 0".to_string());
    }
    if u32::try_from(age_years).is_err() {
        return Err("Age is out of range".to_string());
    }
    Ok(())
}

/// Validate height value (in cm)
pub fn validate_height_cm(height_cm: f64) -> Result<(), String> {
    if height_cm.is_nan() || height_cm.is_infinite() {
        return Err("Height must be a valid number".to_string());
    }
    if height_cm <= 0.0 {
        return Err("Height must be greater than 0 cm".to_string());
    }
    Ok(())
}

/// Validate weight value (in kg)
pub fn validate_weight_kg(weight_kg: f64) -> Result<(), String> {
    if weight_kg.is_nan() || weight_kg.is_infinite() {
        return Err("Weight must be a valid number".to_string());
    }
    if weight_kg <= 0.0 {
        return Err("Weight must be greater than 0 kg".to_string());
    }
    Ok(())
}

/// Validate that a value is a finite number
pub fn validate_finite(value: f64) -> Result<(), String> {
    if value.is_nan() || value.is_infinite() {
        return Err("must be a valid number".to_string());
    }
    Ok(())
}

/// Validate a nutrient amount (kcal or grams) of a logged portion
pub fn validate_nutrient(value: f64) -> Result<(), String> {
    if value.is_nan() || value.is_infinite() {
        return Err("must be a valid number".to_string());
    }
    if value < 0.0 {
        return Err("cannot be negative".to_string());
    }
    Ok(())
}

/// Validate a number of servings
pub fn validate_servings(servings: f64) -> Result<(), String> {
    if servings.is_nan() || servings.is_infinite() {
        return Err("Servings must be a valid number".to_string());
    }
    if servings <= 0.0 {
        return Err("Servings must be positive".to_string());
    }
    Ok(())
}

/// Validate a free-text input that must carry some content
pub fn validate_non_blank(value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err("cannot be empty".to_string());
    }
    Ok(())
}

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "age" => "Age",
        "gender" => "Gender",
        "height" | "height_cm" => "Height",
        "current_weight" | "current_weight_kg" => "Current Weight",
        "goal_weight" | "goal_weight_kg" => "Goal Weight",
        "activity_level" => "Activity Level",
        "goal" => "Primary Goal",
        "dietary_preference" => "Dietary Preference",
        "servings" => "Servings",
        "log_method" | "method" => "Log Method",
        "ingredients" => "Ingredients",
        "image_base64" => "Image",
        "text" => "Description",
        "filter" => "Recipe Filter",
        _ => field_name,
    }
}

/// Run a validator and label its failure with the field it concerns
pub fn check(field: &str, result: Result<(), String>) -> CoreResult<()> {
    result.map_err(|msg| labelled(field, &msg))
}

/// Parse a textual enum value, failing with a labelled `InvalidInput`
pub fn parse_choice<T>(field: &str, value: &str) -> CoreResult<T>
where
    T: std::str::FromStr<Err = String>,
{
    value.parse::<T>().map_err(|msg| labelled(field, &msg))
}

fn labelled(field: &str, message: &str) -> CoreError {
    CoreError::InvalidInput(format!("{}: {}", get_field_display_label(field), message))
}
