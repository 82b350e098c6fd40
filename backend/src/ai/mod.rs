//! Food identification and recipe generation
//!
//! [`FoodAi`] is the seam between request handling and the model provider.
//! Production uses [`GeminiClient`]; a disabled configuration installs
//! [`DisabledAi`], which fails every call with an external-service error.

pub mod gemini;

pub use gemini::GeminiClient;

use crate::config::AiConfig;
use async_trait::async_trait;
use nutrition_tracker_shared::{CoreError, CoreResult, IdentifiedFood, RecipeDraft};
use std::sync::Arc;
use tracing::{info, warn};

/// Model-backed food understanding
#[async_trait]
pub trait FoodAi: Send + Sync {
    /// Identify foods and their nutrients in a base64-encoded JPEG
    async fn identify_image(&self, image_base64: &str) -> CoreResult<Vec<IdentifiedFood>>;

    /// Extract foods from a spoken or typed description
    async fn extract_from_text(&self, text: &str) -> CoreResult<Vec<IdentifiedFood>>;

    /// Create a recipe from a free-text ingredient list
    async fn generate_recipe(&self, ingredients: &str) -> CoreResult<RecipeDraft>;

    fn provider_name(&self) -> &'static str;
}

/// Stand-in used when no provider is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledAi;

impl DisabledAi {
    fn unavailable<T>() -> CoreResult<T> {
        Err(CoreError::external("AI features are disabled on this server"))
    }
}

#[async_trait]
impl FoodAi for DisabledAi {
    async fn identify_image(&self, _image_base64: &str) -> CoreResult<Vec<IdentifiedFood>> {
        Self::unavailable()
    }

    async fn extract_from_text(&self, _text: &str) -> CoreResult<Vec<IdentifiedFood>> {
        Self::unavailable()
    }

    async fn generate_recipe(&self, _ingredients: &str) -> CoreResult<RecipeDraft> {
        Self::unavailable()
    }

    fn provider_name(&self) -> &'static str {
        "disabled"
    }
}

/// Build the provider described by the configuration
///
/// An enabled configuration without an API key falls back to [`DisabledAi`].
pub fn from_config(config: &AiConfig) -> Arc<dyn FoodAi> {
    if !config.enabled {
        info!("AI features disabled by configuration");
        return Arc::new(DisabledAi);
    }
    match config.api_key.as_deref().filter(|key| !key.trim().is_empty()) {
        Some(key) => {
            info!(model = %config.model, "AI features enabled");
            Arc::new(GeminiClient::new(key, &config.base_url, &config.model))
        }
        None => {
            warn!("AI enabled but NT__AI__API_KEY is not set. AI features will be disabled.");
            Arc::new(DisabledAi)
        }
    }
}
