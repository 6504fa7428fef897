// ABOUTME: Core data models for foods, meals, users, and recommendations
// ABOUTME: Re-exports the domain types shared by every crate in the workspace
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Macro nutrient totals
mod nutrients;
/// Catalog food items and categories
mod food;
/// Meals, line items, and ownership
mod meal;
/// User accounts and goals
mod user;
/// Recommendation entries and meal types
mod recommendation;

pub use food::{FoodCategory, FoodItem, ServingSize};
pub use meal::{Meal, MealLineItem, MealOwner, ResolvedFood, ResolvedLineItem};
pub use nutrients::MacroTotals;
pub use recommendation::{MealType, Priority, RecommendationEntry, RecommendationKind};
pub use user::{Goal, PublicUser, User, UserAttributes};
