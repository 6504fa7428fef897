// ABOUTME: HTTP integration tests for meal logging routes
// ABOUTME: Verifies server-side totals, ownership resolution, dangling foods, and updates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use helpers::axum_test::AxumTestRequest;
use nutri_ai::models::FoodItem;
use nutri_ai::resources::ServerResources;
use serde_json::{json, Value};
use uuid::Uuid;

fn assert_close(actual: &Value, expected: f64) {
    let actual = actual.as_f64().expect("number");
    assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
}

async fn apple_and_chicken(resources: &ServerResources) -> (FoodItem, FoodItem) {
    let apple = common::create_test_food(&resources.database, "Apple", 52.0, 0.3, 14.0, 0.2)
        .await
        .unwrap();
    let chicken =
        common::create_test_food(&resources.database, "Chicken Breast", 165.0, 31.0, 0.0, 3.6)
            .await
            .unwrap();
    (apple, chicken)
}

#[tokio::test]
async fn test_create_meal_computes_totals_and_ignores_client_totals() {
    let (resources, app) = common::create_test_app().await.unwrap();
    let (apple, chicken) = apple_and_chicken(&resources).await;

    let response = AxumTestRequest::post("/api/meals")
        .json(&json!({
            "name": "lunch",
            "foods": [
                { "food": apple.id.to_string(), "quantity": 2 },
                { "food": chicken.id.to_string(), "quantity": 1 }
            ],
            "totalCalories": 9999
        }))
        .send(app)
        .await;
    assert_eq!(response.status(), 201);

    let meal: Value = response.json();
    assert_eq!(meal["name"], "lunch");
    assert_eq!(meal["user"], Value::Null);
    assert_close(&meal["totalCalories"], 269.0);
    assert_close(&meal["totalProtein"], 31.6);
    assert_close(&meal["totalCarbs"], 28.0);
    assert_close(&meal["totalFat"], 4.0);

    let foods = meal["foods"].as_array().unwrap();
    assert_eq!(foods.len(), 2);
    assert_eq!(foods[0]["foodId"], apple.id.to_string());
    assert_eq!(foods[0]["food"]["name"], "Apple");
    assert_close(&foods[0]["quantity"], 2.0);
    assert_eq!(foods[1]["food"]["name"], "Chicken Breast");
}

#[tokio::test]
async fn test_create_meal_defaults_name_and_accepts_dangling_food() {
    let (_, app) = common::create_test_app().await.unwrap();
    let dangling = Uuid::new_v4();

    let response = AxumTestRequest::post("/api/meals")
        .json(&json!({ "foods": [{ "foodId": dangling.to_string() }] }))
        .send(app)
        .await;
    assert_eq!(response.status(), 201);

    let meal: Value = response.json();
    assert_eq!(meal["name"], "breakfast");
    assert_eq!(meal["foods"][0]["foodId"], dangling.to_string());
    assert_eq!(meal["foods"][0]["food"], Value::Null);
    assert_close(&meal["foods"][0]["quantity"], 1.0);
    assert_close(&meal["totalCalories"], 0.0);
}

#[tokio::test]
async fn test_create_meal_rejects_bad_line_items() {
    let (resources, app) = common::create_test_app().await.unwrap();
    let (apple, _) = apple_and_chicken(&resources).await;

    let response = AxumTestRequest::post("/api/meals")
        .json(&json!({ "name": "dinner", "foods": [] }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["message"], "At least one food item is required");

    let response = AxumTestRequest::post("/api/meals")
        .json(&json!({ "foods": [{ "food": apple.id.to_string(), "quantity": 0 }] }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 400);
    assert_eq!(response.error_code(), "INVALID_INPUT");

    let list: Value = AxumTestRequest::get("/api/meals").send(app).await.json();
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_bearer_token_sets_owner_and_filters_listing() {
    let (resources, app) = common::create_test_app().await.unwrap();
    let (apple, _) = apple_and_chicken(&resources).await;
    let session = common::register_test_user(&resources, "frank").await.unwrap();
    let line = json!([{ "food": apple.id.to_string(), "quantity": 1 }]);

    let owned: Value = AxumTestRequest::post("/api/meals")
        .bearer(&session.token)
        .json(&json!({ "name": "snack", "foods": line, "user": "demo-user" }))
        .send(app.clone())
        .await
        .json();
    assert_eq!(owned["user"], session.user.id.to_string());

    let guest = AxumTestRequest::post("/api/meals")
        .json(&json!({ "name": "snack", "foods": line }))
        .send(app.clone())
        .await;
    assert_eq!(guest.status(), 201);

    let mine: Value = AxumTestRequest::get(&format!("/api/meals?userId={}", session.user.id))
        .send(app.clone())
        .await
        .json();
    assert_eq!(mine.as_array().unwrap().len(), 1);
    assert_eq!(mine[0]["id"], owned["id"]);

    let everything: Value = AxumTestRequest::get("/api/meals?userId=demo-user")
        .send(app.clone())
        .await
        .json();
    assert_eq!(everything.as_array().unwrap().len(), 2);

    let response = AxumTestRequest::get("/api/meals?userId=frank").send(app).await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_invalid_bearer_token_rejects_meal_creation() {
    let (resources, app) = common::create_test_app().await.unwrap();
    let (apple, _) = apple_and_chicken(&resources).await;

    let response = AxumTestRequest::post("/api/meals")
        .bearer("not-a-jwt")
        .json(&json!({ "foods": [{ "food": apple.id.to_string() }] }))
        .send(app)
        .await;
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_update_meal_recomputes_or_keeps_totals() {
    let (resources, app) = common::create_test_app().await.unwrap();
    let (apple, chicken) = apple_and_chicken(&resources).await;

    let created: Value = AxumTestRequest::post("/api/meals")
        .json(&json!({ "name": "lunch", "foods": [{ "food": apple.id.to_string(), "quantity": 1 }] }))
        .send(app.clone())
        .await
        .json();
    let uri = format!("/api/meals/{}", created["id"].as_str().unwrap());

    let renamed = AxumTestRequest::put(&uri)
        .json(&json!({ "name": "late lunch" }))
        .send(app.clone())
        .await;
    assert_eq!(renamed.status(), 200);
    let renamed: Value = renamed.json();
    assert_eq!(renamed["name"], "late lunch");
    assert_close(&renamed["totalCalories"], 52.0);
    assert_eq!(renamed["foods"].as_array().unwrap().len(), 1);

    let replaced: Value = AxumTestRequest::put(&uri)
        .json(&json!({
            "foods": [{ "food": chicken.id.to_string(), "quantity": 2 }],
            "totalCalories": 1
        }))
        .send(app.clone())
        .await
        .json();
    assert_eq!(replaced["name"], "late lunch");
    assert_close(&replaced["totalCalories"], 330.0);
    assert_close(&replaced["totalProtein"], 62.0);

    let response = AxumTestRequest::put(&uri)
        .json(&json!({ "foods": [] }))
        .send(app)
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_deleted_food_reads_back_as_missing() {
    let (resources, app) = common::create_test_app().await.unwrap();
    let (apple, _) = apple_and_chicken(&resources).await;

    let created: Value = AxumTestRequest::post("/api/meals")
        .json(&json!({ "foods": [{ "food": apple.id.to_string(), "quantity": 3 }] }))
        .send(app.clone())
        .await
        .json();
    assert_close(&created["totalCalories"], 156.0);

    let response = AxumTestRequest::delete(&format!("/api/foods/{}", apple.id))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);

    let meal: Value =
        AxumTestRequest::get(&format!("/api/meals/{}", created["id"].as_str().unwrap()))
            .send(app)
            .await
            .json();
    assert_eq!(meal["foods"][0]["food"], Value::Null);
    assert_eq!(meal["foods"][0]["foodId"], apple.id.to_string());
    assert_close(&meal["totalCalories"], 0.0);
}

#[tokio::test]
async fn test_delete_meal_then_not_found() {
    let (resources, app) = common::create_test_app().await.unwrap();
    let (apple, _) = apple_and_chicken(&resources).await;

    let created: Value = AxumTestRequest::post("/api/meals")
        .json(&json!({ "foods": [{ "food": apple.id.to_string() }] }))
        .send(app.clone())
        .await
        .json();
    let uri = format!("/api/meals/{}", created["id"].as_str().unwrap());

    let response = AxumTestRequest::delete(&uri).send(app.clone()).await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["message"], "Meal deleted successfully");

    let response = AxumTestRequest::get(&uri).send(app.clone()).await;
    assert_eq!(response.status(), 404);
    let body: Value = response.json();
    assert_eq!(body["error"]["message"], "Meal not found");

    let response = AxumTestRequest::get("/api/meals/12345").send(app).await;
    assert_eq!(response.status(), 400);
}
