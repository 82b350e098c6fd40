//! AI service - input checks in front of the model provider

use crate::ai::FoodAi;
use nutrition_tracker_shared::validation::{check, validate_non_blank};
use nutrition_tracker_shared::{CoreResult, IdentifiedFood, RecipeDraft};
use tracing::info;

/// AI service for food identification and recipe generation
pub struct AiService;

impl AiService {
    /// Identify foods in a photo; accepts raw base64 or a `data:` URL
    pub async fn identify_food(ai: &dyn FoodAi, image: &str) -> CoreResult<Vec<IdentifiedFood>> {
        let image_base64 = strip_data_url(image);
        check("image_base64", validate_non_blank(image_base64))?;

        let foods = ai.identify_image(image_base64).await?;
        info!(provider = ai.provider_name(), count = foods.len(), "Foods identified in image");
        Ok(foods)
    }

    /// Extract foods from a spoken or typed description
    pub async fn extract_food(ai: &dyn FoodAi, text: &str) -> CoreResult<Vec<IdentifiedFood>> {
        check("text", validate_non_blank(text))?;

        let foods = ai.extract_from_text(text.trim()).await?;
        info!(provider = ai.provider_name(), count = foods.len(), "Foods extracted from text");
        Ok(foods)
    }

    pub async fn generate_recipe(ai: &dyn FoodAi, ingredients: &str) -> CoreResult<RecipeDraft> {
        check("ingredients", validate_non_blank(ingredients))?;
        ai.generate_recipe(ingredients.trim()).await
    }
}

/// `data:image/jpeg;base64,AAAA` → `AAAA`
fn strip_data_url(image: &str) -> &str {
    let trimmed = image.trim();
    match trimmed.split_once(";base64,") {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => trimmed,
    }
}
