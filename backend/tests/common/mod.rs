//! Common test utilities for integration tests
//!
//! Each [`TestApp`] owns an in-memory store, a settable clock and a canned
//! AI provider, so the full router runs without Redis or network access.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::Duration;
use nutrition_tracker_backend::{
    ai::FoodAi, config::AppConfig, routes, state::AppState, store::MemoryStore,
};
use nutrition_tracker_shared::{
    CoreError, CoreResult, DietaryPreference, Difficulty, FixedClock, IdentifiedFood,
    MealCategory, RecipeCatalog, RecipeDraft,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

/// 08:30 UTC, a Breakfast hour
pub const START: &str = "2024-03-10T08:30:00+00:00";

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
    pub clock: Arc<FixedClock>,
    pub session: Uuid,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_ai(Arc::new(CannedAi))
    }

    pub fn with_ai(ai: Arc<dyn FoodAi>) -> Self {
        let clock = Arc::new(FixedClock::at(START).unwrap());
        let state = AppState::new(
            Arc::new(MemoryStore::new()),
            ai,
            clock.clone(),
            RecipeCatalog::builtin().unwrap(),
            AppConfig::default(),
        );
        let app = routes::create_router(state);

        Self {
            app,
            clock,
            session: Uuid::new_v4(),
        }
    }

    pub fn advance_days(&self, days: i64) {
        self.clock.advance(Duration::days(days));
    }

    pub fn advance_hours(&self, hours: i64) {
        self.clock.advance(Duration::hours(hours));
    }

    /// Make a GET request without a session header
    pub async fn get_anonymous(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// Make a GET request in this app's session
    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .header("X-Session-Id", self.session.to_string())
            .body(Body::empty())
            .unwrap();
        let (status, body) = self.send(request).await;
        (status, parse(&body))
    }

    /// Make a POST request with JSON body
    pub async fn post(&self, path: &str, body: &Value) -> (StatusCode, Value) {
        self.with_body("POST", path, body).await
    }

    /// Make a PUT request with JSON body
    pub async fn put(&self, path: &str, body: &Value) -> (StatusCode, Value) {
        self.with_body("PUT", path, body).await
    }

    /// Onboard with [`profile_body`], a 1835.78125 kcal goal
    pub async fn onboard(&self) -> Value {
        let (status, body) = self.post("/api/v1/profile", &profile_body()).await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body
    }

    async fn with_body(&self, method: &str, path: &str, body: &Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .header("X-Session-Id", self.session.to_string())
            .body(Body::from(body.to_string()))
            .unwrap();
        let (status, body) = self.send(request).await;
        (status, parse(&body))
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body_str = String::from_utf8(body.to_vec()).unwrap();

        (status, body_str)
    }
}

fn parse(body: &str) -> Value {
    if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
    }
}

/// 30-year-old male, 175 cm, 75 kg, lightly active, losing weight
pub fn profile_body() -> Value {
    json!({
        "age": 30,
        "gender": "male",
        "height_cm": 175.0,
        "current_weight_kg": 75.0,
        "goal_weight_kg": 70.0,
        "activity_level": "lightly_active",
        "goal": "lose_weight"
    })
}

/// Provider that answers every call with fixed data
pub struct CannedAi;

pub fn canned_foods() -> Vec<IdentifiedFood> {
    vec![
        IdentifiedFood {
            name: "Scrambled eggs".to_string(),
            calories: 200.0,
            protein: 14.0,
            carbs: 2.0,
            fat: 15.0,
        },
        IdentifiedFood {
            name: "Toast".to_string(),
            calories: 80.0,
            protein: 3.0,
            carbs: 15.0,
            fat: 1.0,
        },
    ]
}

#[async_trait]
impl FoodAi for CannedAi {
    async fn identify_image(&self, _image_base64: &str) -> CoreResult<Vec<IdentifiedFood>> {
        Ok(canned_foods())
    }

    async fn extract_from_text(&self, _text: &str) -> CoreResult<Vec<IdentifiedFood>> {
        Ok(canned_foods())
    }

    async fn generate_recipe(&self, _ingredients: &str) -> CoreResult<RecipeDraft> {
        Ok(RecipeDraft {
            name: "Tomato Egg Scramble".to_string(),
            description: "Soft eggs with blistered tomatoes.".to_string(),
            prep_time_minutes: 5,
            cook_time_minutes: 10,
            servings: 2,
            difficulty: Difficulty::Easy,
            calories_per_serving: 300.0,
            protein_grams: 18.0,
            carbs_grams: 8.0,
            fat_grams: 20.0,
            dietary_tags: vec![DietaryPreference::Vegetarian],
            ingredients: vec!["4 eggs".to_string(), "2 tomatoes".to_string()],
            instructions: vec!["Cook tomatoes.".to_string(), "Add eggs.".to_string()],
            meal_types: vec![MealCategory::Breakfast],
        })
    }

    fn provider_name(&self) -> &'static str {
        "canned"
    }
}

/// Provider whose every call fails upstream
pub struct FailingAi;

#[async_trait]
impl FoodAi for FailingAi {
    async fn identify_image(&self, _image_base64: &str) -> CoreResult<Vec<IdentifiedFood>> {
        Err(CoreError::external("upstream returned 503"))
    }

    async fn extract_from_text(&self, _text: &str) -> CoreResult<Vec<IdentifiedFood>> {
        Err(CoreError::external("upstream returned 503"))
    }

    async fn generate_recipe(&self, _ingredients: &str) -> CoreResult<RecipeDraft> {
        Err(CoreError::external("upstream returned 503"))
    }

    fn provider_name(&self) -> &'static str {
        "failing"
    }
}
