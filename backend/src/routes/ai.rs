//! Food identification routes
//!
//! These only propose foods; logging them is a separate, explicit request.

use crate::error::ApiError;
use crate::services::AiService;
use crate::session::Session;
use crate::state::AppState;
use axum::{extract::State, routing::post, Json, Router};
use nutrition_tracker_shared::{ExtractFoodRequest, IdentifiedFoodsResponse, IdentifyFoodRequest};

/// Create AI routes
pub fn ai_routes() -> Router<AppState> {
    Router::new()
        .route("/identify-food", post(identify_food))
        .route("/extract-food", post(extract_food))
}

/// POST /api/v1/ai/identify-food - Identify foods in a photo
async fn identify_food(
    State(state): State<AppState>,
    _session: Session,
    Json(req): Json<IdentifyFoodRequest>,
) -> Result<Json<IdentifiedFoodsResponse>, ApiError> {
    let foods = AiService::identify_food(state.ai(), &req.image_base64).await?;
    Ok(Json(IdentifiedFoodsResponse { foods }))
}

/// POST /api/v1/ai/extract-food - Extract foods from a description
async fn extract_food(
    State(state): State<AppState>,
    _session: Session,
    Json(req): Json<ExtractFoodRequest>,
) -> Result<Json<IdentifiedFoodsResponse>, ApiError> {
    let foods = AiService::extract_food(state.ai(), &req.text).await?;
    Ok(Json(IdentifiedFoodsResponse { foods }))
}
