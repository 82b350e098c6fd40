//! Recipe service - browsing, favorites and generated recipes

use crate::ai::FoodAi;
use crate::error::{ApiError, ApiResult};
use crate::repositories::{SessionRepository, SessionWrite};
use crate::services::AiService;
use crate::store::{KeyValueStore, SessionKey};
use nutrition_tracker_shared::recipes::{finalize_generated, push_generated, toggle_favorite};
use nutrition_tracker_shared::validation::parse_choice;
use nutrition_tracker_shared::{
    Clock, DietaryPreference, FavoriteToggleResponse, Recipe, RecipeCatalog,
    RecipeDetailResponse, RecipeFilter, RecipeListResponse,
};
use tracing::info;
use uuid::Uuid;

/// Recipe service for catalog and per-session recipe state
pub struct RecipeService;

impl RecipeService {
    /// Look a recipe up in the catalog, then in the session's generated recipes
    pub async fn find_recipe(
        store: &dyn KeyValueStore,
        catalog: &RecipeCatalog,
        session_id: Uuid,
        recipe_id: &str,
    ) -> ApiResult<Recipe> {
        if let Some(recipe) = catalog.find(recipe_id) {
            return Ok(recipe.clone());
        }
        SessionRepository::get_generated_recipes(store, session_id)
            .await?
            .into_iter()
            .find(|recipe| recipe.id == recipe_id)
            .ok_or_else(|| ApiError::NotFound(format!("Recipe {} not found", recipe_id)))
    }

    /// Recipe with the session's favorite flag
    pub async fn get_recipe(
        store: &dyn KeyValueStore,
        catalog: &RecipeCatalog,
        session_id: Uuid,
        recipe_id: &str,
    ) -> ApiResult<RecipeDetailResponse> {
        let recipe = Self::find_recipe(store, catalog, session_id, recipe_id).await?;
        let favorites = SessionRepository::get_favorites(store, session_id).await?;
        let is_favorite = favorites.iter().any(|id| *id == recipe.id);
        Ok(RecipeDetailResponse { recipe, is_favorite })
    }

    /// Generated recipes plus the catalog filtered by preference and `filter`
    ///
    /// Without a profile the dietary preference is `all`.
    pub async fn list_recipes(
        store: &dyn KeyValueStore,
        catalog: &RecipeCatalog,
        session_id: Uuid,
        filter: Option<&str>,
    ) -> ApiResult<RecipeListResponse> {
        let filter: RecipeFilter = match filter {
            Some(value) => parse_choice("filter", value)?,
            None => RecipeFilter::All,
        };
        let preference = SessionRepository::get_profile(store, session_id)
            .await?
            .map(|profile| profile.dietary_preference())
            .unwrap_or(DietaryPreference::All);

        Ok(RecipeListResponse {
            generated: SessionRepository::get_generated_recipes(store, session_id).await?,
            recipes: catalog.browse(filter, preference).into_iter().cloned().collect(),
        })
    }

    /// Ask the model for a recipe and keep it at the front of the session's list
    pub async fn generate_recipe(
        store: &dyn KeyValueStore,
        ai: &dyn FoodAi,
        clock: &dyn Clock,
        session_id: Uuid,
        ingredients: &str,
    ) -> ApiResult<Recipe> {
        let draft = AiService::generate_recipe(ai, ingredients).await?;
        let mut generated = SessionRepository::get_generated_recipes(store, session_id).await?;
        let recipe = finalize_generated(draft, clock.now().timestamp_millis(), &generated);
        push_generated(&mut generated, recipe.clone());
        SessionWrite::new(session_id)
            .put(SessionKey::GeneratedRecipes, &generated)?
            .commit(store)
            .await?;

        info!(session_id = %session_id, recipe_id = %recipe.id, "Recipe generated");
        Ok(recipe)
    }

    pub async fn favorites(store: &dyn KeyValueStore, session_id: Uuid) -> ApiResult<Vec<String>> {
        Ok(SessionRepository::get_favorites(store, session_id).await?)
    }

    /// Flip the favorite status of an existing recipe
    pub async fn toggle_favorite(
        store: &dyn KeyValueStore,
        catalog: &RecipeCatalog,
        session_id: Uuid,
        recipe_id: &str,
    ) -> ApiResult<FavoriteToggleResponse> {
        let recipe = Self::find_recipe(store, catalog, session_id, recipe_id).await?;
        let mut favorites = SessionRepository::get_favorites(store, session_id).await?;
        let is_favorite = toggle_favorite(&mut favorites, &recipe.id);

        SessionWrite::new(session_id)
            .put(SessionKey::FavoriteRecipes, &favorites)?
            .commit(store)
            .await?;

        Ok(FavoriteToggleResponse {
            recipe_id: recipe.id,
            is_favorite,
            favorites,
        })
    }
}
