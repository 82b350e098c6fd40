//! API request and response types

use crate::aggregation::{DailyProgress, DailySummary};
use crate::errors::CoreResult;
use crate::goals::{ActivityLevel, BodyInputs, Gender, WeightGoal};
use crate::models::{DietaryPreference, FoodLogEntry, IdentifiedFood, LogMethod, Recipe};
use crate::streak::StreakState;
use crate::validation::{check, parse_choice, validate_age};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

// ============================================================================
// Profile
// ============================================================================

/// Onboarding or profile update request
///
/// Enum-valued fields arrive as text and are parsed strictly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRequest {
    pub age: i64,
    pub gender: String,
    pub height_cm: f64,
    pub current_weight_kg: f64,
    pub goal_weight_kg: f64,
    pub activity_level: String,
    pub goal: String,
    #[serde(default)]
    pub dietary_preference: Option<String>,
}

impl ProfileRequest {
    /// Parse the textual fields into typed goal-engine inputs
    pub fn into_inputs(self) -> CoreResult<BodyInputs> {
        check("age", validate_age(self.age))?;
        let gender: Gender = parse_choice("gender", &self.gender)?;
        let activity_level: ActivityLevel = parse_choice("activity_level", &self.activity_level)?;
        let goal: WeightGoal = parse_choice("goal", &self.goal)?;
        let dietary_preference: DietaryPreference = match self.dietary_preference.as_deref() {
            Some(value) => parse_choice("dietary_preference", value)?,
            None => DietaryPreference::default(),
        };

        let inputs = BodyInputs {
            // validate_age keeps the value within u32
            age_years: self.age as u32,
            gender,
            height_cm: self.height_cm,
            current_weight_kg: self.current_weight_kg,
            goal_weight_kg: self.goal_weight_kg,
            activity_level,
            goal,
            dietary_preference,
        };
        inputs.validate()?;
        Ok(inputs)
    }
}

// ============================================================================
// Food Logging
// ============================================================================

/// Log a batch of identified foods
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogFoodsRequest {
    pub foods: Vec<IdentifiedFood>,
    pub method: String,
    #[serde(default)]
    pub photo: Option<String>,
}

impl LogFoodsRequest {
    pub fn log_method(&self) -> CoreResult<LogMethod> {
        parse_choice("method", &self.method)
    }
}

/// Log servings of a catalog or generated recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecipeRequest {
    pub recipe_id: String,
    pub servings: f64,
}

/// Entries created by a log request and the resulting streak
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogCreatedResponse {
    pub entries: Vec<FoodLogEntry>,
    pub streak: StreakState,
}

/// Query parameters for the daily summary
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailyNutritionQuery {
    /// Defaults to today
    pub date: Option<NaiveDate>,
}

/// One day's log grouped by meal, with progress when a profile exists
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyNutritionResponse {
    #[serde(flatten)]
    pub summary: DailySummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<DailyProgress>,
}

/// Home screen payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub calorie_goal: f64,
    pub today: DailySummary,
    pub progress: DailyProgress,
    pub streak: StreakState,
    pub suggestions: Vec<Recipe>,
}

// ============================================================================
// Recipes
// ============================================================================

/// Query parameters for browsing recipes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeListQuery {
    pub filter: Option<String>,
}

/// Generated recipes (newest first) and the filtered catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeListResponse {
    pub generated: Vec<Recipe>,
    pub recipes: Vec<Recipe>,
}

/// A single recipe with the caller's favorite flag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeDetailResponse {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub is_favorite: bool,
}

/// Generate a recipe from free-text ingredients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRecipeRequest {
    pub ingredients: String,
}

/// Result of toggling a favorite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteToggleResponse {
    pub recipe_id: String,
    pub is_favorite: bool,
    pub favorites: Vec<String>,
}

/// Favorite recipe ids in the order they were added
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoritesResponse {
    pub favorites: Vec<String>,
}

// ============================================================================
// Food Identification
// ============================================================================

/// Identify foods in a base64-encoded JPEG
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentifyFoodRequest {
    pub image_base64: String,
}

/// Extract foods from a spoken or typed description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractFoodRequest {
    pub text: String,
}

/// Foods proposed by the identification service, not yet logged
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentifiedFoodsResponse {
    pub foods: Vec<IdentifiedFood>,
}
