// ABOUTME: HTTP integration tests for recommendations and the nutrition summary
// ABOUTME: Checks query parsing, default rule selection, and per-owner meal totals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};

fn titles(body: &Value) -> Vec<&str> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["title"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_default_recommendations() {
    let (_, app) = common::create_test_app().await.unwrap();

    let response = AxumTestRequest::get("/api/recommendations").send(app).await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json();
    assert_eq!(
        titles(&body),
        vec![
            "💧 Stay Hydrated",
            "🌈 Eat the Rainbow",
            "🔄 Maintenance Mode",
            "⚠️ Low Calorie Intake",
        ]
    );
    assert_eq!(body[0]["type"], "hydration");
    assert!(body[0].get("mealType").is_none());
}

#[tokio::test]
async fn test_meal_type_is_case_insensitive_and_capped() {
    let (_, app) = common::create_test_app().await.unwrap();

    let response = AxumTestRequest::get(
        "/api/recommendations?userGoals=weight_loss&currentCalories=2500&mealType=BREAKFAST",
    )
    .send(app)
    .await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json();
    let found = titles(&body);
    assert!(found.len() <= 5);
    assert_eq!(found[0], "🌅 Breakfast Boost");
    assert_eq!(body[0]["mealType"], "breakfast");

    let mut unique = found.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), found.len());
}

async fn recommendation_titles(app: axum::Router, query: &str) -> Vec<String> {
    let body: Value = AxumTestRequest::get(&format!("/api/recommendations?{query}"))
        .send(app)
        .await
        .assert_status(StatusCode::OK)
        .json();
    titles(&body).into_iter().map(str::to_owned).collect()
}

#[tokio::test]
async fn test_calories_use_leading_integer() {
    let (_, app) = common::create_test_app().await.unwrap();

    let with_unit =
        recommendation_titles(app.clone(), "userGoals=weight_loss&currentCalories=1500kcal").await;
    let plain =
        recommendation_titles(app.clone(), "userGoals=weight_loss&currentCalories=1500").await;
    assert_eq!(with_unit, plain);

    let fractional =
        recommendation_titles(app.clone(), "userGoals=weight_loss&currentCalories=2000.5").await;
    assert!(!fractional.iter().any(|t| t == "📊 Calorie Awareness"));

    let over = recommendation_titles(app, "userGoals=weight_loss&currentCalories=2001").await;
    assert!(over.iter().any(|t| t == "📊 Calorie Awareness"));
}

#[tokio::test]
async fn test_unparseable_calories_skip_calorie_rules() {
    let (_, app) = common::create_test_app().await.unwrap();

    for query in [
        "currentCalories=lots",
        "currentCalories=",
        "userGoals=weight_loss&currentCalories=abc",
    ] {
        let found = recommendation_titles(app.clone(), query).await;
        assert!(!found.is_empty(), "{query}");
        assert!(!found.iter().any(|t| t.contains("Calorie")), "{query}: {found:?}");
    }
}

#[tokio::test]
async fn test_nutrition_summary_per_owner() {
    let (resources, app) = common::create_test_app().await.unwrap();
    let apple = common::create_test_food(&resources.database, "Apple", 52.0, 0.3, 14.0, 0.2)
        .await
        .unwrap();
    let session = common::register_test_user(&resources, "grace").await.unwrap();

    for quantity in [1, 2] {
        let response = AxumTestRequest::post("/api/meals")
            .bearer(&session.token)
            .json(&json!({ "foods": [{ "food": apple.id.to_string(), "quantity": quantity }] }))
            .send(app.clone())
            .await;
        assert_eq!(response.status(), 201);
    }
    AxumTestRequest::post("/api/meals")
        .json(&json!({ "foods": [{ "food": apple.id.to_string(), "quantity": 5 }] }))
        .send(app.clone())
        .await
        .assert_status(StatusCode::CREATED);

    let summary: Value =
        AxumTestRequest::get(&format!("/api/nutrition/summary?userId={}", session.user.id))
            .send(app.clone())
            .await
            .json();
    assert_eq!(summary["mealCount"], 2);
    let calories = summary["totals"]["calories"].as_f64().unwrap();
    assert!((calories - 156.0).abs() < 1e-9);

    let response = AxumTestRequest::get("/api/nutrition/summary?date=yesterday")
        .send(app)
        .await;
    assert_eq!(response.status(), 400);
}
