// ABOUTME: Root banner and health check route handlers for service monitoring
// ABOUTME: Reports database connectivity alongside an overall status
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Health check routes for service monitoring

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use nutri_core::constants::service::ROOT_BANNER;
use serde_json::{json, Value};

use crate::resources::ServerResources;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create the root banner and health check routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/", get(Self::handle_root))
            .route("/health", get(Self::handle_health))
            .with_state(resources)
    }

    async fn handle_root() -> Json<Value> {
        Json(json!({
            "message": ROOT_BANNER,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }

    /// Always 200; a failed probe only degrades the reported status
    async fn handle_health(State(resources): State<Arc<ServerResources>>) -> Json<Value> {
        let connected = resources.database.ping().await;
        Json(json!({
            "status": if connected { "OK" } else { "DEGRADED" },
            "database": if connected { "connected" } else { "disconnected" },
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }
}
