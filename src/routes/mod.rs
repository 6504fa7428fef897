// ABOUTME: Route module organization for the Nutri-AI HTTP endpoints
// ABOUTME: Groups routes by domain and provides the shared JSON body extractor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for the Nutri-AI API
//!
//! Each domain module owns its route definitions and thin handlers that
//! delegate to the database managers and the intelligence crate.

/// Food catalog routes
pub mod foods;
/// Root banner and health check routes
pub mod health;
/// Meal logging routes
pub mod meals;
/// Nutrition summary routes
pub mod nutrition;
/// Recommendation routes
pub mod recommendations;
/// Registration, login, and profile routes
pub mod users;

pub use foods::FoodRoutes;
pub use health::HealthRoutes;
pub use meals::MealRoutes;
pub use nutrition::NutritionRoutes;
pub use recommendations::RecommendationRoutes;
pub use users::UserRoutes;

use axum::extract::FromRequest;
use nutri_core::errors::{AppError, AppResult};
use uuid::Uuid;

/// JSON body extractor whose rejections render as `INVALID_INPUT` errors
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Parse a path identifier
///
/// # Errors
///
/// Returns `INVALID_INPUT` when the segment is not a UUID
pub fn parse_id(raw: &str, resource: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::invalid_input(format!("Invalid {resource} id")))
}
