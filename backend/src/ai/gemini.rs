//! Google Gemini client
//!
//! Calls `models/{model}:generateContent` with a JSON response schema so the
//! model answers in exactly the shape we deserialize. Any transport, status or
//! parse failure becomes [`CoreError::ExternalService`]; there is no retry.

use super::FoodAi;
use async_trait::async_trait;
use nutrition_tracker_shared::{
    CoreError, CoreResult, DietaryPreference, Difficulty, IdentifiedFood, MealCategory,
    RecipeDraft,
};
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use tracing::{debug, error, instrument};

const IDENTIFY_PROMPT: &str =
    "You are a nutrition expert. Identify foods in the image and return a JSON array.";
const IMAGE_MIME_TYPE: &str = "image/jpeg";
const JSON_MIME_TYPE: &str = "application/json";

// ============================================================================
// API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData<'a>,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<'a> {
    mime_type: &'static str,
    data: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Recipe as the model returns it; counts arrive as JSON numbers
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedRecipe {
    name: String,
    description: String,
    prep_time_minutes: f64,
    cook_time_minutes: f64,
    servings: f64,
    difficulty: String,
    calories_per_serving: f64,
    protein_grams: f64,
    carbs_grams: f64,
    fat_grams: f64,
    #[serde(default)]
    dietary_tags: Vec<String>,
    #[serde(default)]
    ingredients: Vec<String>,
    #[serde(default)]
    instructions: Vec<String>,
    #[serde(default)]
    meal_types: Vec<String>,
}

impl GeneratedRecipe {
    /// Normalize model output; unknown tags and meal types are dropped
    fn into_draft(self) -> RecipeDraft {
        RecipeDraft {
            name: self.name,
            description: self.description,
            prep_time_minutes: whole_count(self.prep_time_minutes),
            cook_time_minutes: whole_count(self.cook_time_minutes),
            servings: whole_count(self.servings).max(1),
            difficulty: parse_difficulty(&self.difficulty),
            calories_per_serving: self.calories_per_serving,
            protein_grams: self.protein_grams,
            carbs_grams: self.carbs_grams,
            fat_grams: self.fat_grams,
            dietary_tags: self
                .dietary_tags
                .iter()
                .filter_map(|tag| tag.parse::<DietaryPreference>().ok())
                .filter(|tag| *tag != DietaryPreference::All)
                .collect(),
            ingredients: self.ingredients,
            instructions: self.instructions,
            meal_types: self
                .meal_types
                .iter()
                .filter_map(|meal| meal.parse::<MealCategory>().ok())
                .collect(),
        }
    }
}

fn whole_count(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.round().min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

fn parse_difficulty(value: &str) -> Difficulty {
    match value.trim().to_lowercase().as_str() {
        "easy" => Difficulty::Easy,
        "hard" => Difficulty::Hard,
        _ => Difficulty::Medium,
    }
}

// ============================================================================
// Response Schemas
// ============================================================================

fn food_list_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "name": { "type": "STRING" },
                "calories": { "type": "NUMBER" },
                "protein": { "type": "NUMBER" },
                "carbs": { "type": "NUMBER" },
                "fat": { "type": "NUMBER" }
            },
            "required": ["name", "calories", "protein", "carbs", "fat"]
        }
    })
}

fn recipe_schema() -> Value {
    let string_list = json!({ "type": "ARRAY", "items": { "type": "STRING" } });
    json!({
        "type": "OBJECT",
        "properties": {
            "name": { "type": "STRING" },
            "description": { "type": "STRING" },
            "prepTimeMinutes": { "type": "NUMBER" },
            "cookTimeMinutes": { "type": "NUMBER" },
            "servings": { "type": "NUMBER" },
            "difficulty": { "type": "STRING" },
            "caloriesPerServing": { "type": "NUMBER" },
            "proteinGrams": { "type": "NUMBER" },
            "carbsGrams": { "type": "NUMBER" },
            "fatGrams": { "type": "NUMBER" },
            "dietaryTags": string_list,
            "ingredients": string_list,
            "instructions": string_list,
            "mealTypes": string_list
        },
        "required": [
            "name", "description", "prepTimeMinutes", "cookTimeMinutes", "servings",
            "difficulty", "caloriesPerServing", "proteinGrams", "carbsGrams", "fatGrams",
            "dietaryTags", "ingredients", "instructions", "mealTypes"
        ]
    })
}

// ============================================================================
// Client
// ============================================================================

/// Gemini-backed [`FoodAi`]
pub struct GeminiClient {
    api_key: Secret<String>,
    client: Client,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: &str, base_url: &str, model: &str) -> Self {
        Self {
            api_key: Secret::new(api_key.to_string()),
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }

    fn build_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Send one generateContent call and decode the JSON text it returns
    async fn generate<T>(&self, operation: &'static str, parts: Vec<Part<'_>>, schema: Value) -> CoreResult<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let request = GenerateRequest {
            contents: vec![Content { parts }],
            generation_config: GenerationConfig {
                response_mime_type: JSON_MIME_TYPE,
                response_schema: schema,
            },
        };

        let result = self.send(&request).await.and_then(|text| {
            serde_json::from_str::<T>(text.trim()).map_err(|e| {
                error!(operation, error = %e, "Model returned unexpected JSON");
                CoreError::external(format!("Could not understand the AI response: {e}"))
            })
        });

        let outcome = if result.is_ok() { "success" } else { "failure" };
        metrics::counter!("ai_requests_total", "operation" => operation, "outcome" => outcome)
            .increment(1);
        result
    }

    async fn send(&self, request: &GenerateRequest<'_>) -> CoreResult<String> {
        debug!("Sending request to Gemini API");

        let response = self
            .client
            .post(self.build_url())
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(request)
            .send()
            .await
            .map_err(|e| CoreError::external(format!("AI request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CoreError::external(format!("Failed to read AI response: {e}")))?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            let message = serde_json::from_str::<GenerateResponse>(&body)
                .ok()
                .and_then(|r| r.error)
                .map_or(body, |e| e.message);
            return Err(CoreError::external(format!(
                "AI service error ({}): {}",
                status.as_u16(),
                message
            )));
        }

        let parsed: GenerateResponse = serde_json::from_str(&body)
            .map_err(|e| CoreError::external(format!("Failed to parse AI response: {e}")))?;

        if let Some(err) = parsed.error {
            return Err(CoreError::external(format!("AI service error: {}", err.message)));
        }

        parsed
            .candidates
            .into_iter()
            .flatten()
            .filter_map(|candidate| candidate.content)
            .flat_map(|content| content.parts)
            .find_map(|part| part.text)
            .ok_or_else(|| CoreError::external("AI response contained no content"))
    }
}

#[async_trait]
impl FoodAi for GeminiClient {
    #[instrument(skip(self, image_base64), fields(model = %self.model, bytes = image_base64.len()))]
    async fn identify_image(&self, image_base64: &str) -> CoreResult<Vec<IdentifiedFood>> {
        let parts = vec![
            Part::Text {
                text: IDENTIFY_PROMPT.to_string(),
            },
            Part::InlineData {
                inline_data: InlineData {
                    mime_type: IMAGE_MIME_TYPE,
                    data: image_base64,
                },
            },
        ];
        self.generate("identify_image", parts, food_list_schema()).await
    }

    #[instrument(skip(self, text), fields(model = %self.model))]
    async fn extract_from_text(&self, text: &str) -> CoreResult<Vec<IdentifiedFood>> {
        let prompt = format!(
            "You are a nutrition expert. Extract food items mentioned in this text and return ONLY a JSON array: \"{text}\""
        );
        self.generate("extract_from_text", vec![Part::Text { text: prompt }], food_list_schema())
            .await
    }

    #[instrument(skip(self, ingredients), fields(model = %self.model))]
    async fn generate_recipe(&self, ingredients: &str) -> CoreResult<RecipeDraft> {
        let prompt = format!(
            "Create a healthy recipe using these ingredients: \"{ingredients}\". Return a JSON object."
        );
        let recipe: GeneratedRecipe = self
            .generate("generate_recipe", vec![Part::Text { text: prompt }], recipe_schema())
            .await?;
        Ok(recipe.into_draft())
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }
}

impl fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}
