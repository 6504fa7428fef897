// ABOUTME: In-process HTTP driver for Nutri-AI integration tests
// ABOUTME: Sends one request through the router with oneshot and buffers the reply
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use axum::{
    body::{to_bytes, Body, Bytes},
    http::{header, request::Builder, HeaderMap, Method, Request, Response, StatusCode},
    Router,
};
use nutri_ai::errors::{ErrorResponse, ErrorResponseDetails};
use serde::{de::DeserializeOwned, Serialize};
use tower::ServiceExt;

const JSON_CONTENT_TYPE: &str = "application/json";

/// A request under construction; nothing is sent until [`AxumTestRequest::send`]
pub struct AxumTestRequest {
    builder: Builder,
    body: Body,
}

impl AxumTestRequest {
    fn with_method(method: Method, uri: &str) -> Self {
        Self {
            builder: Request::builder().method(method).uri(uri),
            body: Body::empty(),
        }
    }

    pub fn get(uri: &str) -> Self {
        Self::with_method(Method::GET, uri)
    }

    pub fn post(uri: &str) -> Self {
        Self::with_method(Method::POST, uri)
    }

    #[allow(dead_code)]
    pub fn put(uri: &str) -> Self {
        Self::with_method(Method::PUT, uri)
    }

    #[allow(dead_code)]
    pub fn delete(uri: &str) -> Self {
        Self::with_method(Method::DELETE, uri)
    }

    #[allow(dead_code)]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.builder = self.builder.header(name, value);
        self
    }

    /// Attach a bearer credential
    #[allow(dead_code)]
    pub fn bearer(self, token: &str) -> Self {
        let value = format!("Bearer {token}");
        self.header(header::AUTHORIZATION.as_str(), &value)
    }

    /// Serialize `payload` as the JSON body
    pub fn json<T: Serialize>(self, payload: &T) -> Self {
        let encoded = serde_json::to_vec(payload).expect("request payload serializes");
        self.raw_json(encoded)
    }

    /// Send `body` verbatim with a JSON content type, used for malformed input
    pub fn raw_json(mut self, body: impl Into<Bytes>) -> Self {
        self.builder = self.builder.header(header::CONTENT_TYPE, JSON_CONTENT_TYPE);
        self.body = Body::from(body.into());
        self
    }

    /// Run the request through `app` and buffer the whole response
    pub async fn send(self, app: Router) -> AxumTestResponse {
        let request = self.builder.body(self.body).expect("valid test request");
        let response = app.oneshot(request).await.expect("router is infallible");
        AxumTestResponse::read(response).await
    }
}

/// Buffered response with typed accessors
pub struct AxumTestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl AxumTestResponse {
    async fn read(response: Response<Body>) -> Self {
        let (parts, body) = response.into_parts();
        let body = to_bytes(body, usize::MAX)
            .await
            .expect("response body is readable");
        Self {
            status: parts.status,
            headers: parts.headers,
            body,
        }
    }

    pub const fn status(&self) -> u16 {
        self.status.as_u16()
    }

    #[allow(dead_code)]
    pub fn header(&self, name: &str) -> Option<String> {
        let value = self.headers.get(name)?;
        value.to_str().ok().map(str::to_owned)
    }

    pub fn json<T: DeserializeOwned>(self) -> T {
        serde_json::from_slice(&self.body).unwrap_or_else(|e| {
            panic!(
                "body is not the expected JSON ({e}): {}",
                String::from_utf8_lossy(&self.body)
            )
        })
    }

    #[allow(dead_code)]
    pub fn text(self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decode the standard error envelope
    #[allow(dead_code)]
    pub fn error(self) -> ErrorResponseDetails {
        self.json::<ErrorResponse>().error
    }

    /// Wire form of the error code, e.g. `INVALID_INPUT`
    #[allow(dead_code)]
    pub fn error_code(self) -> String {
        let code = self.error().code;
        serde_json::to_value(code)
            .ok()
            .and_then(|v| v.as_str().map(str::to_owned))
            .expect("error codes serialize as strings")
    }

    #[allow(dead_code)]
    pub fn assert_status(self, expected: StatusCode) -> Self {
        assert_eq!(
            self.status,
            expected,
            "unexpected status, body: {}",
            String::from_utf8_lossy(&self.body)
        );
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::{get, post};
    use axum::Json;
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_json_body_round_trips_through_router() {
        let app = Router::new().route(
            "/echo",
            post(|Json(body): Json<Value>| async move { Json(json!({ "echo": body })) }),
        );
        let body: Value = AxumTestRequest::post("/echo")
            .json(&json!({ "food": "apple" }))
            .send(app)
            .await
            .assert_status(StatusCode::OK)
            .json();
        assert_eq!(body["echo"]["food"], "apple");
    }

    #[tokio::test]
    async fn test_bearer_sets_authorization() {
        let app = Router::new().route(
            "/whoami",
            get(|headers: HeaderMap| async move {
                headers
                    .get(header::AUTHORIZATION)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_owned()
            }),
        );
        let response = AxumTestRequest::get("/whoami").bearer("t0ken").send(app).await;
        assert_eq!(response.text(), "Bearer t0ken");
    }
}
