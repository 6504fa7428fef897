// ABOUTME: Core types and constants for the Nutri-AI nutrition tracking service
// ABOUTME: Foundation crate with error handling, data models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Nutri Core
//!
//! Foundation crate providing shared types and constants for the Nutri-AI
//! service. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Application-wide constants organized by domain
//! - **models**: Foods, meals, users, and recommendation entries

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants and default values organized by domain
pub mod constants;

/// Core data models (`FoodItem`, `Meal`, `User`, `RecommendationEntry`)
pub mod models;
