//! Profile API routes

use crate::error::ApiError;
use crate::services::ProfileService;
use crate::session::Session;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use nutrition_tracker_shared::{Profile, ProfileRequest};

/// Create profile routes
pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/", get(get_profile).post(onboard).put(update_profile))
}

/// GET /api/v1/profile - Get the session's profile and goals
async fn get_profile(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Profile>, ApiError> {
    let profile = ProfileService::get_profile(state.store(), session.id).await?;
    Ok(Json(profile))
}

/// POST /api/v1/profile - Onboard: store inputs and compute goals
async fn onboard(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<ProfileRequest>,
) -> Result<(StatusCode, Json<Profile>), ApiError> {
    let profile = ProfileService::onboard(state.store(), session.id, req).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// PUT /api/v1/profile - Replace inputs and recompute goals
async fn update_profile(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<ProfileRequest>,
) -> Result<Json<Profile>, ApiError> {
    let profile = ProfileService::update_profile(state.store(), session.id, req).await?;
    Ok(Json(profile))
}
