//! Food logging, daily summary, streak and dashboard routes

use crate::error::ApiError;
use crate::services::{NutritionService, StreakService};
use crate::session::Session;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use nutrition_tracker_shared::{
    DailyNutritionQuery, DailyNutritionResponse, DashboardResponse, FoodLogEntry,
    LogCreatedResponse, LogFoodsRequest, LogRecipeRequest, StreakState,
};

/// Create nutrition routes
pub fn nutrition_routes() -> Router<AppState> {
    Router::new()
        .route("/logs", get(list_logs))
        .route("/log/foods", post(log_foods))
        .route("/log/recipe", post(log_recipe))
        .route("/daily", get(daily_summary))
}

/// GET /api/v1/nutrition/logs - All entries in creation order
async fn list_logs(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Vec<FoodLogEntry>>, ApiError> {
    let logs = NutritionService::list_logs(state.store(), session.id).await?;
    Ok(Json(logs))
}

/// POST /api/v1/nutrition/log/foods - Log confirmed identified foods
async fn log_foods(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<LogFoodsRequest>,
) -> Result<(StatusCode, Json<LogCreatedResponse>), ApiError> {
    let method = req.log_method()?;
    let created = NutritionService::log_foods(
        state.store(),
        state.clock(),
        session.id,
        &req.foods,
        method,
        req.photo,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// POST /api/v1/nutrition/log/recipe - Log servings of a recipe
async fn log_recipe(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<LogRecipeRequest>,
) -> Result<(StatusCode, Json<LogCreatedResponse>), ApiError> {
    let created = NutritionService::log_recipe(
        state.store(),
        state.clock(),
        state.catalog(),
        session.id,
        &req.recipe_id,
        req.servings,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/v1/nutrition/daily?date=YYYY-MM-DD - One day grouped by meal
async fn daily_summary(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<DailyNutritionQuery>,
) -> Result<Json<DailyNutritionResponse>, ApiError> {
    let daily =
        NutritionService::daily_summary(state.store(), state.clock(), session.id, query.date).await?;
    Ok(Json(daily))
}

/// GET /api/v1/streak - Current streak after the reset check
pub async fn get_streak(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<StreakState>, ApiError> {
    let streak = StreakService::current(state.store(), state.clock(), session.id).await?;
    Ok(Json(streak))
}

/// GET /api/v1/dashboard - Today's summary, streak and suggestions
pub async fn dashboard(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<DashboardResponse>, ApiError> {
    let dashboard =
        NutritionService::dashboard(state.store(), state.clock(), state.catalog(), session.id).await?;
    Ok(Json(dashboard))
}
