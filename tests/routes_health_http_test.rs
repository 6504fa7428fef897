// ABOUTME: HTTP integration tests for the banner, health check, and unmatched routes
// ABOUTME: Exercises the fully layered router including request id propagation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use helpers::axum_test::AxumTestRequest;

#[tokio::test]
async fn test_root_banner() {
    let (_, app) = common::create_test_app().await.unwrap();

    let response = AxumTestRequest::get("/").send(app).await;
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Nutri-AI API is running!");
    let timestamp = body["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[tokio::test]
async fn test_health_reports_connected_database() {
    let (_, app) = common::create_test_app().await.unwrap();

    let response = AxumTestRequest::get("/health").send(app).await;
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "OK");
    assert_eq!(body["database"], "connected");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_health_reports_closed_database_as_degraded() {
    let (resources, app) = common::create_test_app().await.unwrap();
    resources.database.pool().close().await;

    let response = AxumTestRequest::get("/health").send(app).await;
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "DEGRADED");
    assert_eq!(body["database"], "disconnected");
}

#[tokio::test]
async fn test_unknown_route_names_method_and_path() {
    let (_, app) = common::create_test_app().await.unwrap();

    let response = AxumTestRequest::post("/api/nothing-here").send(app).await;
    assert_eq!(response.status(), 404);

    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "ROUTE_NOT_FOUND");
    assert_eq!(body["error"]["message"], "Route POST /api/nothing-here not found");
}

#[tokio::test]
async fn test_unsupported_method_on_known_path_is_not_found() {
    let (_, app) = common::create_test_app().await.unwrap();
    let meal_path = format!("/api/meals/{}", uuid::Uuid::new_v4());
    let meal_message = format!("Route POST {meal_path} not found");

    for (request, expected) in [
        (
            AxumTestRequest::delete("/api/foods"),
            "Route DELETE /api/foods not found",
        ),
        (
            AxumTestRequest::post("/api/recommendations"),
            "Route POST /api/recommendations not found",
        ),
        (AxumTestRequest::post(&meal_path), meal_message.as_str()),
    ] {
        let response = request.send(app.clone()).await;
        assert_eq!(response.status(), 404, "{expected}");
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"]["code"], "ROUTE_NOT_FOUND");
        assert_eq!(body["error"]["message"], expected);
    }
}

#[tokio::test]
async fn test_request_id_generated_and_propagated() {
    let (_, app) = common::create_test_app().await.unwrap();

    let response = AxumTestRequest::get("/health").send(app.clone()).await;
    let generated = response.header("x-request-id").expect("request id header");
    assert!(generated.starts_with("req_"));

    let response = AxumTestRequest::get("/health")
        .header("x-request-id", "client-chosen-id")
        .send(app)
        .await;
    assert_eq!(
        response.header("x-request-id").as_deref(),
        Some("client-chosen-id")
    );
}
