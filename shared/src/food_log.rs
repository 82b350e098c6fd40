//! Creation of food log entries
//!
//! Both constructors validate everything before building any entry, so a
//! failure never yields a partial batch.

use crate::clock::Clock;
use crate::errors::{CoreError, CoreResult};
use crate::models::{FoodLogEntry, IdentifiedFood, LogMethod, MealCategory, Recipe};
use crate::validation::{check, validate_non_blank, validate_nutrient, validate_servings};
use chrono::Timelike;
use uuid::Uuid;

/// Build one entry per identified food, in input order
pub fn log_identified_foods(
    foods: &[IdentifiedFood],
    method: LogMethod,
    photo: Option<String>,
    clock: &dyn Clock,
) -> CoreResult<Vec<FoodLogEntry>> {
    if foods.is_empty() {
        return Err(CoreError::EmptyInput("no foods were provided".to_string()));
    }
    for food in foods {
        validate_food(food)?;
    }

    let now = clock.now();
    let meal_category = MealCategory::from_hour(now.hour());

    Ok(foods
        .iter()
        .map(|food| FoodLogEntry {
            id: Uuid::new_v4(),
            timestamp: now,
            meal_category,
            name: food.name.trim().to_string(),
            calories: food.calories,
            protein: food.protein,
            carbs: food.carbs,
            fat: food.fat,
            log_method: method,
            photo: photo.clone(),
            recipe_id: None,
        })
        .collect())
}

/// Build the entry for eating `servings` portions of a recipe
pub fn log_recipe_servings(
    recipe: &Recipe,
    servings: f64,
    clock: &dyn Clock,
) -> CoreResult<FoodLogEntry> {
    check("servings", validate_servings(servings))?;

    let now = clock.now();
    let nutrients = recipe.nutrients_per_serving().scaled(servings);

    Ok(FoodLogEntry {
        id: Uuid::new_v4(),
        timestamp: now,
        meal_category: MealCategory::from_hour(now.hour()),
        name: servings_label(&recipe.name, servings),
        calories: nutrients.calories,
        protein: nutrients.protein,
        carbs: nutrients.carbs,
        fat: nutrients.fat,
        log_method: LogMethod::Recipe,
        photo: Some(recipe.image_url.clone()),
        recipe_id: Some(recipe.id.clone()),
    })
}

/// `"Name (1 serving)"`, `"Name (1.5 servings)"`
fn servings_label(name: &str, servings: f64) -> String {
    let noun = if servings > 1.0 { "servings" } else { "serving" };
    format!("{name} ({servings} {noun})")
}

fn validate_food(food: &IdentifiedFood) -> CoreResult<()> {
    check("name", validate_non_blank(&food.name))?;
    check("calories", validate_nutrient(food.calories))?;
    check("protein", validate_nutrient(food.protein))?;
    check("carbs", validate_nutrient(food.carbs))?;
    check("fat", validate_nutrient(food.fat))?;
    Ok(())
}
