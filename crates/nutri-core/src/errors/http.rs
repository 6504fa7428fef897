// ABOUTME: Axum IntoResponse integration for AppError
// ABOUTME: Renders ErrorResponse JSON bodies and logs server-side failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use tracing::{error, warn};

use super::{AppError, ErrorResponse};

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(
                code = ?self.code,
                message = %self.message,
                source = ?self.source,
                "Request failed with server error"
            );
        } else if status == StatusCode::UNAUTHORIZED {
            warn!(code = ?self.code, "Request rejected: {}", self.message);
        }

        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::invalid_input(format!("Invalid request body: {}", rejection.body_text()))
    }
}
