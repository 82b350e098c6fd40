//! Data models for food logging and the recipe catalog

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};
use uuid::Uuid;

// ============================================================================
// Enumerations
// ============================================================================

/// Meal a log entry is filed under, decided once from the hour it was created
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MealCategory {
    Breakfast,
    Lunch,
    Dinner,
    Snacks,
}

impl MealCategory {
    pub const ALL: [MealCategory; 4] = [
        MealCategory::Breakfast,
        MealCategory::Lunch,
        MealCategory::Dinner,
        MealCategory::Snacks,
    ];

    /// Classify a local hour of day (0-23) into a meal
    ///
    /// `h < 11` Breakfast, `11..16` Lunch, `16..21` Dinner, `21..` Snacks
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            0..=10 => MealCategory::Breakfast,
            11..=15 => MealCategory::Lunch,
            16..=20 => MealCategory::Dinner,
            _ => MealCategory::Snacks,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MealCategory::Breakfast => "Breakfast",
            MealCategory::Lunch => "Lunch",
            MealCategory::Dinner => "Dinner",
            MealCategory::Snacks => "Snacks",
        }
    }
}

impl fmt::Display for MealCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MealCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "breakfast" => Ok(MealCategory::Breakfast),
            "lunch" => Ok(MealCategory::Lunch),
            "dinner" => Ok(MealCategory::Dinner),
            "snack" | "snacks" => Ok(MealCategory::Snacks),
            _ => Err(format!("Unknown meal category: {}", s)),
        }
    }
}

/// How a food entry was captured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogMethod {
    Photo,
    Voice,
    Manual,
    Recipe,
}

impl LogMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogMethod::Photo => "photo",
            LogMethod::Voice => "voice",
            LogMethod::Manual => "manual",
            LogMethod::Recipe => "recipe",
        }
    }
}

impl std::str::FromStr for LogMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "photo" => Ok(LogMethod::Photo),
            "voice" => Ok(LogMethod::Voice),
            "manual" => Ok(LogMethod::Manual),
            "recipe" => Ok(LogMethod::Recipe),
            _ => Err(format!("Unknown log method: {}", s)),
        }
    }
}

/// Dietary preference of a user, doubling as a recipe tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DietaryPreference {
    #[default]
    All,
    Vegetarian,
    Vegan,
    LowCarb,
    HighProtein,
}

impl std::str::FromStr for DietaryPreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "all" => Ok(DietaryPreference::All),
            "vegetarian" => Ok(DietaryPreference::Vegetarian),
            "vegan" => Ok(DietaryPreference::Vegan),
            "low-carb" => Ok(DietaryPreference::LowCarb),
            "high-protein" => Ok(DietaryPreference::HighProtein),
            _ => Err(format!("Unknown dietary preference: {}", s)),
        }
    }
}

/// Recipe difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

// ============================================================================
// Nutrients
// ============================================================================

/// Calories (kcal) and macros (grams) for a portion or a sum of portions
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NutrientTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl NutrientTotals {
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            calories: self.calories * factor,
            protein: self.protein * factor,
            carbs: self.carbs * factor,
            fat: self.fat * factor,
        }
    }
}

impl Add for NutrientTotals {
    type Output = NutrientTotals;

    fn add(self, rhs: Self) -> Self::Output {
        NutrientTotals {
            calories: self.calories + rhs.calories,
            protein: self.protein + rhs.protein,
            carbs: self.carbs + rhs.carbs,
            fat: self.fat + rhs.fat,
        }
    }
}

impl AddAssign for NutrientTotals {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// A food guess returned by the identification service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentifiedFood {
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl IdentifiedFood {
    pub fn nutrients(&self) -> NutrientTotals {
        NutrientTotals {
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
        }
    }
}

// ============================================================================
// Food Log
// ============================================================================

/// One immutable entry in a user's food log
///
/// Nutrient fields describe the logged portion, not a per-100g reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodLogEntry {
    pub id: Uuid,
    /// Creation instant, kept in the offset it was recorded in
    pub timestamp: DateTime<FixedOffset>,
    pub meal_category: MealCategory,
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub log_method: LogMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe_id: Option<String>,
}

impl FoodLogEntry {
    /// Calendar date of the entry in its own offset
    pub fn log_date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    pub fn nutrients(&self) -> NutrientTotals {
        NutrientTotals {
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
        }
    }
}

// ============================================================================
// Recipes
// ============================================================================

/// Catalog recipe with per-serving nutrition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub prep_time_minutes: u32,
    pub cook_time_minutes: u32,
    pub servings: u32,
    pub difficulty: Difficulty,
    pub calories_per_serving: f64,
    pub protein_grams: f64,
    pub carbs_grams: f64,
    pub fat_grams: f64,
    pub dietary_tags: Vec<DietaryPreference>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub meal_types: Vec<MealCategory>,
}

impl Recipe {
    pub fn total_time_minutes(&self) -> u32 {
        self.prep_time_minutes.saturating_add(self.cook_time_minutes)
    }

    pub fn nutrients_per_serving(&self) -> NutrientTotals {
        NutrientTotals {
            calories: self.calories_per_serving,
            protein: self.protein_grams,
            carbs: self.carbs_grams,
            fat: self.fat_grams,
        }
    }
}

/// A generated recipe before the caller assigns its id and image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDraft {
    pub name: String,
    pub description: String,
    pub prep_time_minutes: u32,
    pub cook_time_minutes: u32,
    pub servings: u32,
    pub difficulty: Difficulty,
    pub calories_per_serving: f64,
    pub protein_grams: f64,
    pub carbs_grams: f64,
    pub fat_grams: f64,
    pub dietary_tags: Vec<DietaryPreference>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub meal_types: Vec<MealCategory>,
}

impl RecipeDraft {
    pub fn into_recipe(self, id: String, image_url: String) -> Recipe {
        Recipe {
            id,
            name: self.name,
            description: self.description,
            image_url,
            prep_time_minutes: self.prep_time_minutes,
            cook_time_minutes: self.cook_time_minutes,
            servings: self.servings,
            difficulty: self.difficulty,
            calories_per_serving: self.calories_per_serving,
            protein_grams: self.protein_grams,
            carbs_grams: self.carbs_grams,
            fat_grams: self.fat_grams,
            dietary_tags: self.dietary_tags,
            ingredients: self.ingredients,
            instructions: self.instructions,
            meal_types: self.meal_types,
        }
    }
}
