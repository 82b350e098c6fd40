//! Integration tests for food logging, daily summaries, streaks and the dashboard

mod common;

use axum::http::StatusCode;
use rstest::rstest;
use serde_json::{json, Value};

fn foods_body(method: &str) -> Value {
    json!({
        "foods": common::canned_foods(),
        "method": method,
        "photo": "aGVsbG8="
    })
}

async fn log_count(app: &common::TestApp) -> usize {
    let (status, logs) = app.get("/api/v1/nutrition/logs").await;
    assert_eq!(status, StatusCode::OK);
    logs.as_array().unwrap().len()
}

#[tokio::test]
async fn test_log_identified_foods() {
    let app = common::TestApp::new();

    let (status, created) = app
        .post("/api/v1/nutrition/log/foods", &foods_body("photo"))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    let entries = created["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["name"], "Scrambled eggs");
    assert_eq!(entries[1]["name"], "Toast");
    for entry in entries {
        assert_eq!(entry["meal_category"], "Breakfast");
        assert_eq!(entry["log_method"], "photo");
        assert_eq!(entry["photo"], "aGVsbG8=");
    }
    assert_ne!(entries[0]["id"], entries[1]["id"]);
    assert_eq!(created["streak"]["current_streak"], 1);
    assert_eq!(created["streak"]["last_log_date"], "2024-03-10");

    assert_eq!(log_count(&app).await, 2);
}

#[tokio::test]
async fn test_empty_foods_is_rejected_without_writes() {
    let app = common::TestApp::new();

    let body = json!({ "foods": [], "method": "voice" });
    let (status, response) = app.post("/api/v1/nutrition/log/foods", &body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"]["code"], "EMPTY_INPUT");
    assert_eq!(log_count(&app).await, 0);

    let (_, streak) = app.get("/api/v1/streak").await;
    assert_eq!(streak["current_streak"], 0);
}

#[tokio::test]
async fn test_one_invalid_food_rejects_the_batch() {
    let app = common::TestApp::new();

    let body = json!({
        "foods": [
            { "name": "Apple", "calories": 95.0, "protein": 0.5, "carbs": 25.0, "fat": 0.3 },
            { "name": "  ", "calories": 10.0, "protein": 0.0, "carbs": 0.0, "fat": 0.0 }
        ],
        "method": "manual"
    });
    let (status, response) = app.post("/api/v1/nutrition/log/foods", &body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(log_count(&app).await, 0);
}

#[tokio::test]
async fn test_unknown_log_method_rejected() {
    let app = common::TestApp::new();

    let (status, _) = app
        .post("/api/v1/nutrition/log/foods", &foods_body("telepathy"))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(log_count(&app).await, 0);
}

#[tokio::test]
async fn test_log_recipe_servings() {
    let app = common::TestApp::new();
    app.advance_hours(4); // 12:30, Lunch

    let body = json!({ "recipe_id": "recipe_001", "servings": 1.5 });
    let (status, created) = app.post("/api/v1/nutrition/log/recipe", &body).await;

    assert_eq!(status, StatusCode::CREATED);
    let entry = &created["entries"][0];
    assert_eq!(entry["name"], "Grilled Chicken Salad (1.5 servings)");
    assert_eq!(entry["calories"], 525.0);
    assert_eq!(entry["protein"], 52.5);
    assert_eq!(entry["carbs"], 30.0);
    assert_eq!(entry["fat"], 22.5);
    assert_eq!(entry["log_method"], "recipe");
    assert_eq!(entry["recipe_id"], "recipe_001");
    assert_eq!(entry["photo"], "https://picsum.photos/id/1060/400/300");
    assert_eq!(entry["meal_category"], "Lunch");
    assert_eq!(created["streak"]["current_streak"], 1);
}

#[tokio::test]
async fn test_log_single_serving_label() {
    let app = common::TestApp::new();

    let body = json!({ "recipe_id": "recipe_002", "servings": 1.0 });
    let (status, created) = app.post("/api/v1/nutrition/log/recipe", &body).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["entries"][0]["name"], "Overnight Oats (1 serving)");
}

#[rstest]
#[case::zero_servings("recipe_001", 0.0, StatusCode::BAD_REQUEST)]
#[case::negative_servings("recipe_001", -1.0, StatusCode::BAD_REQUEST)]
#[case::unknown_recipe("recipe_999", 1.0, StatusCode::NOT_FOUND)]
#[tokio::test]
async fn test_log_recipe_rejects_bad_requests(
    #[case] recipe_id: &str,
    #[case] servings: f64,
    #[case] expected: StatusCode,
) {
    let app = common::TestApp::new();

    let (status, _) = app
        .post(
            "/api/v1/nutrition/log/recipe",
            &json!({ "recipe_id": recipe_id, "servings": servings }),
        )
        .await;

    assert_eq!(status, expected);
    assert_eq!(log_count(&app).await, 0);
}

#[tokio::test]
async fn test_daily_summary_groups_by_meal() {
    let app = common::TestApp::new();
    app.post("/api/v1/nutrition/log/foods", &foods_body("photo"))
        .await;
    app.advance_hours(10); // 18:30, Dinner
    app.post(
        "/api/v1/nutrition/log/recipe",
        &json!({ "recipe_id": "recipe_003", "servings": 1.0 }),
    )
    .await;

    let (status, daily) = app.get("/api/v1/nutrition/daily").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(daily["date"], "2024-03-10");
    assert_eq!(daily["totals"]["calories"], 800.0);
    let groups = daily["by_category"].as_object().unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups["Breakfast"].as_array().unwrap().len(), 2);
    assert_eq!(groups["Dinner"].as_array().unwrap().len(), 1);
    assert!(!groups.contains_key("Lunch"));
    // No profile yet, so no goal progress
    assert!(daily.get("progress").is_none());
}

#[tokio::test]
async fn test_daily_summary_splits_at_midnight() {
    let app = common::TestApp::new();
    app.advance_hours(15); // 23:30
    app.post("/api/v1/nutrition/log/foods", &foods_body("manual"))
        .await;
    app.advance_hours(1); // 00:30 next day
    app.post("/api/v1/nutrition/log/foods", &foods_body("manual"))
        .await;

    let (_, first) = app.get("/api/v1/nutrition/daily?date=2024-03-10").await;
    let (_, second) = app.get("/api/v1/nutrition/daily?date=2024-03-11").await;
    let (_, empty) = app.get("/api/v1/nutrition/daily?date=2024-03-09").await;

    assert_eq!(first["totals"]["calories"], 280.0);
    assert_eq!(first["by_category"]["Snacks"].as_array().unwrap().len(), 2);
    assert_eq!(second["totals"]["calories"], 280.0);
    assert_eq!(second["by_category"]["Breakfast"].as_array().unwrap().len(), 2);
    assert_eq!(empty["totals"]["calories"], 0.0);
    assert!(empty["by_category"].as_object().unwrap().is_empty());
}

#[tokio::test]
async fn test_streak_transitions() {
    let app = common::TestApp::new();

    let (_, created) = app
        .post("/api/v1/nutrition/log/foods", &foods_body("photo"))
        .await;
    assert_eq!(created["streak"]["current_streak"], 1);

    // Second log the same day leaves the streak alone
    let (_, created) = app
        .post("/api/v1/nutrition/log/foods", &foods_body("photo"))
        .await;
    assert_eq!(created["streak"]["current_streak"], 1);

    app.advance_days(1);
    let (_, created) = app
        .post(
            "/api/v1/nutrition/log/recipe",
            &json!({ "recipe_id": "recipe_005", "servings": 1.0 }),
        )
        .await;
    assert_eq!(created["streak"]["current_streak"], 2);
    assert_eq!(created["streak"]["last_log_date"], "2024-03-11");

    // Yesterday's log keeps the streak alive
    app.advance_days(1);
    let (_, streak) = app.get("/api/v1/streak").await;
    assert_eq!(streak["current_streak"], 2);

    // A missed day resets it, keeping the last log date
    app.advance_days(1);
    let (status, streak) = app.get("/api/v1/streak").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(streak["current_streak"], 0);
    assert_eq!(streak["last_log_date"], "2024-03-11");

    let (_, created) = app
        .post("/api/v1/nutrition/log/foods", &foods_body("voice"))
        .await;
    assert_eq!(created["streak"]["current_streak"], 1);
    assert_eq!(created["streak"]["last_log_date"], "2024-03-13");
}

#[tokio::test]
async fn test_dashboard_requires_profile() {
    let app = common::TestApp::new();

    let (status, _) = app.get("/api/v1/dashboard").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_dashboard_progress_and_suggestions() {
    let app = common::TestApp::new();
    app.onboard().await;
    app.post("/api/v1/nutrition/log/foods", &foods_body("photo"))
        .await;

    let (status, dashboard) = app.get("/api/v1/dashboard").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(dashboard["calorie_goal"], 1835.78125);
    assert_eq!(dashboard["today"]["totals"]["calories"], 280.0);
    assert_eq!(dashboard["progress"]["remaining_calories"], 1555.78125);
    assert_eq!(dashboard["streak"]["current_streak"], 1);

    let ids: Vec<&str> = dashboard["suggestions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|recipe| recipe["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["recipe_001", "recipe_002", "recipe_003"]);

    let (_, daily) = app.get("/api/v1/nutrition/daily").await;
    assert_eq!(daily["progress"]["remaining_calories"], 1555.78125);
}
