// ABOUTME: Unified error handling with error codes, HTTP status mapping, and response bodies
// ABOUTME: AppError is the single error type crossing the request boundary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Every failure that reaches a request boundary is an [`AppError`]. The
//! [`ErrorCode`] decides the HTTP status, and [`ErrorResponse`] is the JSON
//! body clients receive.

#[cfg(feature = "http-response")]
mod http;

#[cfg(feature = "database-errors")]
mod database;

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

/// Message returned in place of any 5xx error message when internal details are hidden
pub const GENERIC_INTERNAL_MESSAGE: &str = "Something went wrong!";

static EXPOSE_INTERNAL_DETAILS: AtomicBool = AtomicBool::new(false);

/// Controls whether 5xx responses carry the original error message
///
/// Enabled in development mode only. Server errors are always logged in full.
pub fn set_expose_internal_details(expose: bool) {
    EXPOSE_INTERNAL_DETAILS.store(expose, Ordering::Relaxed);
}

/// Whether 5xx responses currently carry the original error message
#[must_use]
pub fn expose_internal_details() -> bool {
    EXPOSE_INTERNAL_DETAILS.load(Ordering::Relaxed)
}

/// Standard error codes used throughout the application
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Authentication
    /// No credential was presented
    AuthRequired,
    /// Credential or login was rejected
    AuthInvalid,
    /// Credential has expired
    AuthExpired,
    /// Credential could not be decoded
    AuthMalformed,

    // Validation
    /// Input failed validation
    InvalidInput,
    /// A required field is missing
    MissingRequiredField,
    /// A numeric field is outside its allowed range
    ValueOutOfRange,
    /// Username or email already registered
    DuplicateIdentity,

    // Resources
    /// Identifier does not match a stored record
    ResourceNotFound,
    /// No route matches the request
    RouteNotFound,

    // Internal
    /// Unexpected failure
    InternalError,
    /// Storage failure
    DatabaseError,
    /// Invalid or missing configuration
    ConfigError,
}

impl ErrorCode {
    /// HTTP status code for this error
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::InvalidInput
            | Self::MissingRequiredField
            | Self::ValueOutOfRange
            | Self::DuplicateIdentity => 400,

            Self::AuthRequired | Self::AuthInvalid | Self::AuthExpired | Self::AuthMalformed => 401,

            Self::ResourceNotFound | Self::RouteNotFound => 404,

            Self::InternalError | Self::DatabaseError | Self::ConfigError => 500,
        }
    }

    /// User-friendly description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::AuthRequired => "Authentication is required to access this resource",
            Self::AuthInvalid => "The provided authentication credentials are invalid",
            Self::AuthExpired => "The authentication token has expired",
            Self::AuthMalformed => "The authentication token is malformed or corrupted",
            Self::InvalidInput => "The provided input is invalid",
            Self::MissingRequiredField => "A required field is missing",
            Self::ValueOutOfRange => "A value is outside the allowed range",
            Self::DuplicateIdentity => "The identity is already registered",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::RouteNotFound => "No route matches the request",
            Self::InternalError => "An internal server error occurred",
            Self::DatabaseError => "Database operation failed",
            Self::ConfigError => "Configuration error",
        }
    }

    /// Whether this code maps to a server-side failure
    #[must_use]
    pub const fn is_server_error(self) -> bool {
        self.http_status() >= 500
    }
}

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Request field name as it appears on the wire
    pub field: String,
    /// Human-readable reason
    pub message: String,
}

impl FieldError {
    /// Create a field error
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Unified error type for the application
#[derive(Debug, thiserror::Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Structured details (field errors, colliding field, ...)
    pub details: Option<serde_json::Value>,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
            source: None,
        }
    }

    /// Attach structured details
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    /// Authentication required
    #[must_use]
    pub fn auth_required() -> Self {
        Self::new(ErrorCode::AuthRequired, "No token provided")
    }

    /// Invalid authentication
    pub fn auth_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AuthInvalid, message)
    }

    /// Authentication expired
    #[must_use]
    pub fn auth_expired() -> Self {
        Self::new(ErrorCode::AuthExpired, "Token has expired")
    }

    /// Malformed credential
    pub fn auth_malformed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AuthMalformed, message)
    }

    /// Resource not found
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// No route for the given method and path
    pub fn route_not_found(method: impl fmt::Display, path: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::RouteNotFound,
            format!("Route {method} {path} not found"),
        )
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Required field missing
    pub fn missing_field(field: &str) -> Self {
        Self::new(
            ErrorCode::MissingRequiredField,
            format!("{field} is required"),
        )
        .with_details(serde_json::json!({ "fields": [FieldError::new(field, "is required")] }))
    }

    /// Field value outside its allowed range
    pub fn out_of_range(field: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(ErrorCode::ValueOutOfRange, message.clone())
            .with_details(serde_json::json!({ "fields": [FieldError::new(field, message)] }))
    }

    /// Several field-level validation failures reported together
    ///
    /// The message joins the individual messages; `details.fields` lists them.
    #[must_use]
    pub fn validation(errors: Vec<FieldError>) -> Self {
        let message = if errors.is_empty() {
            "Validation failed".to_owned()
        } else {
            errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        Self::new(ErrorCode::InvalidInput, message)
            .with_details(serde_json::json!({ "fields": errors }))
    }

    /// Username or email collision, naming the colliding field
    pub fn duplicate_identity(field: &str, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DuplicateIdentity, message)
            .with_details(serde_json::json!({ "field": field }))
    }

    /// Internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Database error
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// HTTP error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error payload
    pub error: ErrorResponseDetails,
}

/// Inner payload of [`ErrorResponse`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponseDetails {
    /// Machine-readable code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Structured details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&AppError> for ErrorResponse {
    fn from(error: &AppError) -> Self {
        let hide = error.code.is_server_error() && !expose_internal_details();
        Self {
            error: ErrorResponseDetails {
                code: error.code,
                message: if hide {
                    GENERIC_INTERNAL_MESSAGE.to_owned()
                } else {
                    error.message.clone()
                },
                details: if hide { None } else { error.details.clone() },
            },
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::internal(format!("JSON serialization failed: {error}")).with_source(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_http_status() {
        assert_eq!(ErrorCode::AuthRequired.http_status(), 401);
        assert_eq!(ErrorCode::AuthExpired.http_status(), 401);
        assert_eq!(ErrorCode::DuplicateIdentity.http_status(), 400);
        assert_eq!(ErrorCode::ResourceNotFound.http_status(), 404);
        assert_eq!(ErrorCode::RouteNotFound.http_status(), 404);
        assert_eq!(ErrorCode::DatabaseError.http_status(), 500);
    }

    #[test]
    fn test_error_code_serializes_screaming_snake() {
        let json = serde_json::to_string(&ErrorCode::DuplicateIdentity).unwrap();
        assert_eq!(json, "\"DUPLICATE_IDENTITY\"");
    }

    #[test]
    fn test_route_not_found_message() {
        let error = AppError::route_not_found("GET", "/api/nope");
        assert_eq!(error.message, "Route GET /api/nope not found");
        assert_eq!(error.http_status(), 404);
    }

    #[test]
    fn test_validation_collects_fields() {
        let error = AppError::validation(vec![
            FieldError::new("username", "Username must be at least 3 characters long"),
            FieldError::new("password", "Password must be at least 6 characters long"),
        ]);
        assert_eq!(error.code, ErrorCode::InvalidInput);
        assert!(error.message.contains("Username"));
        assert!(error.message.contains("Password"));
        let fields = &error.details.unwrap()["fields"];
        assert_eq!(fields.as_array().unwrap().len(), 2);
        assert_eq!(fields[1]["field"], "password");
    }

    #[test]
    fn test_duplicate_identity_names_field() {
        let error = AppError::duplicate_identity("email", "User already exists with this email");
        assert_eq!(error.details.unwrap()["field"], "email");
    }

    #[test]
    fn test_server_error_message_hidden_by_default() {
        let error = AppError::database("UNIQUE constraint failed: users.email");
        let response = ErrorResponse::from(&error);
        assert_eq!(response.error.message, GENERIC_INTERNAL_MESSAGE);

        let client_error = AppError::invalid_input("bad");
        assert_eq!(ErrorResponse::from(&client_error).error.message, "bad");
    }
}
