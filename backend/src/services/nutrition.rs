//! Nutrition service - food logging, daily summaries and the dashboard
//!
//! Log creation validates and builds every entry first, then writes the
//! extended log and the advanced streak in one atomic store call.

use crate::error::ApiResult;
use crate::repositories::{SessionRepository, SessionWrite};
use crate::services::{ProfileService, RecipeService, StreakService};
use crate::store::{KeyValueStore, SessionKey};
use chrono::NaiveDate;
use nutrition_tracker_shared::{
    aggregate_day, log_identified_foods, log_recipe_servings, Clock, DailyNutritionResponse,
    DailyProgress, DashboardResponse, FoodLogEntry, IdentifiedFood, LogCreatedResponse, LogMethod,
    RecipeCatalog,
};
use tracing::info;
use uuid::Uuid;

/// Nutrition service for food log operations
pub struct NutritionService;

impl NutritionService {
    /// Log one entry per identified food
    pub async fn log_foods(
        store: &dyn KeyValueStore,
        clock: &dyn Clock,
        session_id: Uuid,
        foods: &[IdentifiedFood],
        method: LogMethod,
        photo: Option<String>,
    ) -> ApiResult<LogCreatedResponse> {
        let entries = log_identified_foods(foods, method, photo, clock)?;
        Self::persist_entries(store, session_id, entries).await
    }

    /// Log servings of a catalog or generated recipe
    pub async fn log_recipe(
        store: &dyn KeyValueStore,
        clock: &dyn Clock,
        catalog: &RecipeCatalog,
        session_id: Uuid,
        recipe_id: &str,
        servings: f64,
    ) -> ApiResult<LogCreatedResponse> {
        let recipe = RecipeService::find_recipe(store, catalog, session_id, recipe_id).await?;
        let entry = log_recipe_servings(&recipe, servings, clock)?;
        Self::persist_entries(store, session_id, vec![entry]).await
    }

    /// Every entry in creation order
    pub async fn list_logs(store: &dyn KeyValueStore, session_id: Uuid) -> ApiResult<Vec<FoodLogEntry>> {
        Ok(SessionRepository::get_food_logs(store, session_id).await?)
    }

    /// Aggregate one day; progress is included once a profile exists
    pub async fn daily_summary(
        store: &dyn KeyValueStore,
        clock: &dyn Clock,
        session_id: Uuid,
        date: Option<NaiveDate>,
    ) -> ApiResult<DailyNutritionResponse> {
        let day = date.unwrap_or_else(|| clock.today());
        let logs = SessionRepository::get_food_logs(store, session_id).await?;
        let summary = aggregate_day(&logs, day);

        let progress = SessionRepository::get_profile(store, session_id)
            .await?
            .map(|profile| DailyProgress::from_totals(&summary.totals, profile.goals()));

        Ok(DailyNutritionResponse { summary, progress })
    }

    /// Today's summary, streak and suggestions
    ///
    /// Runs the streak reset check like any other view activation.
    pub async fn dashboard(
        store: &dyn KeyValueStore,
        clock: &dyn Clock,
        catalog: &RecipeCatalog,
        session_id: Uuid,
    ) -> ApiResult<DashboardResponse> {
        let profile = ProfileService::get_profile(store, session_id).await?;
        let streak = StreakService::current(store, clock, session_id).await?;
        let logs = SessionRepository::get_food_logs(store, session_id).await?;

        let today = aggregate_day(&logs, clock.today());
        let progress = DailyProgress::from_totals(&today.totals, profile.goals());
        let suggestions = catalog
            .suggest(progress.remaining_calories, profile.dietary_preference())
            .into_iter()
            .cloned()
            .collect();

        Ok(DashboardResponse {
            calorie_goal: profile.goals().calorie_goal,
            today,
            progress,
            streak,
            suggestions,
        })
    }

    /// Append entries and advance the streak in a single write
    async fn persist_entries(
        store: &dyn KeyValueStore,
        session_id: Uuid,
        entries: Vec<FoodLogEntry>,
    ) -> ApiResult<LogCreatedResponse> {
        let mut logs = SessionRepository::get_food_logs(store, session_id).await?;
        let mut streak = SessionRepository::get_streak(store, session_id).await?;

        if let Some(first) = entries.first() {
            streak.record_log(first.log_date());
        }
        logs.extend(entries.iter().cloned());

        SessionWrite::new(session_id)
            .put(SessionKey::FoodLogs, &logs)?
            .put(SessionKey::StreakData, &streak)?
            .commit(store)
            .await?;

        for entry in &entries {
            metrics::counter!("food_logs_created_total", "method" => entry.log_method.as_str())
                .increment(1);
        }
        info!(
            session_id = %session_id,
            count = entries.len(),
            streak = streak.current_streak,
            "Food logged"
        );

        Ok(LogCreatedResponse { entries, streak })
    }
}
