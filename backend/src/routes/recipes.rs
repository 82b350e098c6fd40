//! Recipe catalog, favorites and generation routes

use crate::error::ApiError;
use crate::services::RecipeService;
use crate::session::Session;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use nutrition_tracker_shared::{
    FavoriteToggleResponse, FavoritesResponse, GenerateRecipeRequest, Recipe,
    RecipeDetailResponse, RecipeListQuery, RecipeListResponse,
};

/// Create recipe routes
pub fn recipe_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_recipes))
        .route("/generate", post(generate_recipe))
        .route("/favorites", get(list_favorites))
        .route("/:id", get(get_recipe))
        .route("/:id/favorite", post(toggle_favorite))
}

/// GET /api/v1/recipes?filter= - Generated recipes and the filtered catalog
async fn list_recipes(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<RecipeListQuery>,
) -> Result<Json<RecipeListResponse>, ApiError> {
    let listing = RecipeService::list_recipes(
        state.store(),
        state.catalog(),
        session.id,
        query.filter.as_deref(),
    )
    .await?;
    Ok(Json(listing))
}

/// GET /api/v1/recipes/:id - Recipe detail with favorite flag
async fn get_recipe(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Json<RecipeDetailResponse>, ApiError> {
    let detail = RecipeService::get_recipe(state.store(), state.catalog(), session.id, &id).await?;
    Ok(Json(detail))
}

/// POST /api/v1/recipes/generate - Generate a recipe from ingredients
async fn generate_recipe(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<GenerateRecipeRequest>,
) -> Result<(StatusCode, Json<Recipe>), ApiError> {
    let recipe = RecipeService::generate_recipe(
        state.store(),
        state.ai(),
        state.clock(),
        session.id,
        &req.ingredients,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(recipe)))
}

/// GET /api/v1/recipes/favorites - Favorite recipe ids
async fn list_favorites(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<FavoritesResponse>, ApiError> {
    let favorites = RecipeService::favorites(state.store(), session.id).await?;
    Ok(Json(FavoritesResponse { favorites }))
}

/// POST /api/v1/recipes/:id/favorite - Toggle favorite status
async fn toggle_favorite(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Json<FavoriteToggleResponse>, ApiError> {
    let toggled =
        RecipeService::toggle_favorite(state.store(), state.catalog(), session.id, &id).await?;
    Ok(Json(toggled))
}
