// ABOUTME: Cross-origin policy for the JSON API
// ABOUTME: Turns the configured origin list into a tower-http CORS layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use http::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    HeaderValue, Method,
};
use tower_http::cors::{AllowOrigin, CorsLayer};

use super::tracing::request_id_header;
use crate::config::CorsConfig;

const ALLOWED_METHODS: [Method; 5] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::OPTIONS,
];

/// Resolve the origin policy; `*`, an empty list, or a list with no valid
/// header values all allow any origin
fn allow_origin(config: &CorsConfig) -> AllowOrigin {
    if config.allowed_origins.iter().any(|origin| origin == "*") {
        return AllowOrigin::any();
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();
    if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    }
}

/// CORS layer for `CORS_ALLOWED_ORIGINS`
///
/// Bearer credentials travel in `Authorization`, and the request id is
/// exposed so browser clients can quote it.
#[must_use]
pub fn setup_cors(config: &CorsConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allow_origin(config))
        .allow_methods(ALLOWED_METHODS)
        .allow_headers([CONTENT_TYPE, AUTHORIZATION, ACCEPT, request_id_header()])
        .expose_headers([request_id_header()])
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, routing::get, Router};
    use http::{header, Request};
    use tower::ServiceExt;

    use super::*;

    async fn preflight_origin(origins: &[&str], origin: &str) -> Option<String> {
        let config = CorsConfig {
            allowed_origins: origins.iter().map(|o| (*o).to_owned()).collect(),
        };
        let app = Router::new()
            .route("/api/foods", get(|| async { "ok" }))
            .layer(setup_cors(&config));
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/foods")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
    }

    #[tokio::test]
    async fn test_wildcard_and_empty_allow_any() {
        assert_eq!(
            preflight_origin(&["*"], "https://x.example").await.as_deref(),
            Some("*")
        );
        assert_eq!(
            preflight_origin(&[], "https://x.example").await.as_deref(),
            Some("*")
        );
    }

    #[tokio::test]
    async fn test_explicit_origins_are_matched() {
        let origins = ["https://a.example", "https://b.example"];
        assert_eq!(
            preflight_origin(&origins, "https://b.example").await.as_deref(),
            Some("https://b.example")
        );
        assert_eq!(preflight_origin(&origins, "https://evil.example").await, None);
    }
}
