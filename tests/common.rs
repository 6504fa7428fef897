// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory database, server resources, catalog, and account helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `nutri_ai`

use std::collections::HashMap;
use std::sync::{Arc, Once};

use anyhow::Result;
use axum::Router;
use nutri_ai::{
    accounts::{AccountSession, RegisterRequest},
    config::ServerConfig,
    database::{Database, NewFood},
    models::{FoodCategory, FoodItem, MacroTotals, ServingSize},
    resources::ServerResources,
    server::build_router,
};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Test configuration: in-memory database, fixed secret, cheapest bcrypt cost
pub fn test_config() -> ServerConfig {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("ENVIRONMENT", "testing"),
        ("DATABASE_URL", "sqlite::memory:"),
        ("JWT_SECRET", "nutri-ai-test-secret"),
        ("BCRYPT_COST", "4"),
    ]);
    ServerConfig::from_lookup(|key| vars.get(key).map(|v| (*v).to_owned()))
        .expect("test configuration is valid")
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Database::new(&test_config().database_url).await
}

/// Resources over a fresh in-memory database
pub async fn create_test_resources() -> Result<Arc<ServerResources>> {
    let database = create_test_database().await?;
    Ok(Arc::new(ServerResources::new(database, test_config())))
}

/// Fully layered router plus the resources behind it
pub async fn create_test_app() -> Result<(Arc<ServerResources>, Router)> {
    let resources = create_test_resources().await?;
    let router = build_router(Arc::clone(&resources));
    Ok((resources, router))
}

/// Insert a catalog food with a 100 g serving
pub async fn create_test_food(
    database: &Database,
    name: &str,
    calories: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
) -> Result<FoodItem> {
    let food = NewFood {
        name: name.to_owned(),
        macros: MacroTotals::new(calories, protein, carbs, fat),
        category: FoodCategory::Other,
        serving_size: Some(ServingSize {
            amount: 100.0,
            unit: "g".to_owned(),
        }),
    };
    Ok(database.foods().create(&food).await?)
}

/// Register an account named `username` with a derived email and password `secret123`
pub async fn register_test_user(
    resources: &ServerResources,
    username: &str,
) -> Result<AccountSession> {
    let request = RegisterRequest {
        username: Some(username.to_owned()),
        email: Some(format!("{username}@example.com")),
        password: Some("secret123".to_owned()),
        ..RegisterRequest::default()
    };
    Ok(resources.accounts().register(&request).await?)
}
