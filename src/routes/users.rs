// ABOUTME: User registration, login, and profile route handlers
// ABOUTME: Thin wrappers around AccountManager that shape the credential responses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use nutri_core::errors::AppError;
use serde_json::json;

use super::AppJson;
use crate::accounts::{LoginRequest, RegisterRequest};
use crate::resources::ServerResources;

/// Account routes implementation
pub struct UserRoutes;

impl UserRoutes {
    /// Create all account routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/users/register", post(Self::handle_register))
            .route("/api/users/login", post(Self::handle_login))
            .route("/api/users/profile", get(Self::handle_profile))
            .with_state(resources)
    }

    /// Handle POST /api/users/register
    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        AppJson(request): AppJson<RegisterRequest>,
    ) -> Result<Response, AppError> {
        let session = resources.accounts().register(&request).await?;
        Ok((
            StatusCode::CREATED,
            Json(json!({
                "message": "User created successfully",
                "token": session.token,
                "user": session.user,
            })),
        )
            .into_response())
    }

    /// Handle POST /api/users/login
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        AppJson(request): AppJson<LoginRequest>,
    ) -> Result<Response, AppError> {
        let session = resources.accounts().authenticate(&request).await?;
        Ok((
            StatusCode::OK,
            Json(json!({
                "message": "Login successful",
                "token": session.token,
                "user": session.user,
            })),
        )
            .into_response())
    }

    /// Handle GET /api/users/profile
    async fn handle_profile(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let claims = resources.auth_manager.authenticate(&headers)?;
        let user = resources.accounts().profile(&claims).await?;
        Ok((StatusCode::OK, Json(user)).into_response())
    }
}
