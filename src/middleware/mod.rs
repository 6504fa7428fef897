// ABOUTME: HTTP middleware for CORS and request tracing
// ABOUTME: Tower layers applied around every route of the API router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// CORS configuration
pub mod cors;
/// Request id generation and request spans
pub mod tracing;

pub use cors::setup_cors;
pub use self::tracing::{create_trace_layer, request_id_header, MakeRequestUuid};
