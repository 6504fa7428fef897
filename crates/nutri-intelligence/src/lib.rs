// ABOUTME: Nutrition intelligence crate: meal aggregation, totals, and recommendations
// ABOUTME: Pure in-memory computations invoked after data has been fetched
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Nutri Intelligence
//!
//! Everything in this crate is deterministic and free of I/O:
//!
//! - **aggregator**: sums a meal's resolved line items into macro totals
//! - **totalizer**: sums stored meal totals into a period total
//! - **recommendations**: decision table from goal, calories, and meal type to advice

/// Meal aggregation over resolved line items
pub mod aggregator;

/// Period totals over stored meal totals
pub mod totalizer;

/// Rule-based recommendation selector
pub mod recommendations;

pub use aggregator::{aggregate, MealAggregation};
pub use recommendations::select;
pub use totalizer::{total, total_meals};
