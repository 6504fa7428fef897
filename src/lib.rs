// ABOUTME: Main library entry point for the Nutri-AI nutrition tracking API
// ABOUTME: Wires configuration, persistence, accounts, HTTP routes, and the terminal client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// deny(unsafe_code): zero-tolerance unsafe policy
#![deny(unsafe_code)]

//! # Nutri-AI
//!
//! A nutrition tracking backend: a food catalog, meal logging with
//! server-derived macro totals, rule-based recommendations, and user accounts
//! with bearer credentials.
//!
//! ## Architecture
//!
//! - **`nutri-core`**: data model, error codes, constants
//! - **`nutri-intelligence`**: meal aggregation, totals, recommendation rules
//! - **Database**: `SQLite` persistence through `sqlx`
//! - **Routes**: axum handlers grouped per resource
//! - **Client**: typed HTTP client and dashboard loader for the terminal UI
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use nutri_ai::config::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Nutri-AI configured with port: HTTP={}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Registration, login, and profile operations
pub mod accounts;

/// Bearer credential issuing and validation, password hashing
pub mod auth;

/// HTTP client and dashboard loader used by the terminal UI
pub mod client;

/// Environment-driven configuration
pub mod config;

/// `SQLite` persistence
pub mod database;

/// Structured logging setup
pub mod logging;

/// Tower layers for CORS and request tracing
pub mod middleware;

/// Shared handler resources
pub mod resources;

/// HTTP route handlers
pub mod routes;

/// Router assembly and serving
pub mod server;

pub use nutri_core::errors;
pub use nutri_core::models;
