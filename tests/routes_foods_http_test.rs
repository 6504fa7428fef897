// ABOUTME: HTTP integration tests for the food catalog routes
// ABOUTME: Covers create validation, lookups, partial updates, deletion, and id parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};

fn assert_close(actual: &Value, expected: f64) {
    let actual = actual.as_f64().expect("number");
    assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
}

#[tokio::test]
async fn test_catalog_starts_empty() {
    let (_, app) = common::create_test_app().await.unwrap();

    let response = AxumTestRequest::get("/api/foods").send(app).await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_create_food_accepts_numeric_strings() {
    let (_, app) = common::create_test_app().await.unwrap();

    let response = AxumTestRequest::post("/api/foods")
        .json(&json!({
            "name": "  Banana ",
            "calories": "89",
            "protein": 1.1,
            "carbs": 23,
            "fat": "0.3",
            "category": "Fruit",
            "servingSize": { "amount": 1, "unit": "medium" }
        }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 201);

    let food: Value = response.json();
    assert_eq!(food["name"], "Banana");
    assert_close(&food["calories"], 89.0);
    assert_close(&food["fat"], 0.3);
    assert_eq!(food["category"], "fruit");
    assert_eq!(food["servingSize"]["unit"], "medium");

    let list: Value = AxumTestRequest::get("/api/foods").send(app).await.json();
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["id"], food["id"]);
}

#[tokio::test]
async fn test_create_food_defaults_category() {
    let (_, app) = common::create_test_app().await.unwrap();

    let food: Value = AxumTestRequest::post("/api/foods")
        .json(&json!({ "name": "Tea", "calories": 1, "protein": 0, "carbs": 0.2, "fat": 0 }))
        .send(app)
        .await
        .json();
    assert_eq!(food["category"], "other");
    assert!(food.get("servingSize").is_none());
}

#[tokio::test]
async fn test_create_food_rejects_missing_and_negative_fields() {
    let (_, app) = common::create_test_app().await.unwrap();

    let response = AxumTestRequest::post("/api/foods")
        .json(&json!({ "name": "Mystery", "calories": -5, "protein": "lots" }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 400);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
    let fields: Vec<&str> = body["error"]["details"]["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    for field in ["calories", "protein", "carbs", "fat"] {
        assert!(fields.contains(&field), "{field} missing from {fields:?}");
    }

    let list: Value = AxumTestRequest::get("/api/foods").send(app).await.json();
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_get_update_delete_food() {
    let (resources, app) = common::create_test_app().await.unwrap();
    let food = common::create_test_food(&resources.database, "Oatmeal", 68.0, 2.4, 12.0, 1.4)
        .await
        .unwrap();
    let uri = format!("/api/foods/{}", food.id);

    let fetched: Value = AxumTestRequest::get(&uri).send(app.clone()).await.json();
    assert_eq!(fetched["name"], "Oatmeal");

    let response = AxumTestRequest::put(&uri)
        .json(&json!({ "calories": 70, "category": "grain" }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);
    let updated: Value = response.json();
    assert_close(&updated["calories"], 70.0);
    assert_close(&updated["protein"], 2.4);
    assert_eq!(updated["category"], "grain");
    assert_eq!(updated["name"], "Oatmeal");

    let response = AxumTestRequest::delete(&uri).send(app.clone()).await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["message"], "Food deleted successfully");

    let response = AxumTestRequest::get(&uri).send(app.clone()).await;
    assert_eq!(response.status(), 404);
    assert_eq!(response.error_code(), "RESOURCE_NOT_FOUND");

    let response = AxumTestRequest::delete(&uri).send(app).await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_update_rejects_bad_values() {
    let (resources, app) = common::create_test_app().await.unwrap();
    let food = common::create_test_food(&resources.database, "Milk", 42.0, 3.4, 5.0, 1.0)
        .await
        .unwrap();

    let response = AxumTestRequest::put(&format!("/api/foods/{}", food.id))
        .json(&json!({ "fat": -1 }))
        .send(app)
        .await;
    assert_eq!(response.status(), 400);

    let unchanged = resources.database.foods().get(food.id).await.unwrap().unwrap();
    assert!((unchanged.macros.fat - 1.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_malformed_food_id_is_invalid_input() {
    let (_, app) = common::create_test_app().await.unwrap();

    let response = AxumTestRequest::get("/api/foods/not-a-uuid").send(app).await;
    assert_eq!(response.status(), 400);
    assert_eq!(response.error_code(), "INVALID_INPUT");
}
