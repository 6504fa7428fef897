// ABOUTME: Recommendation entry models produced by the rule-based selector
// ABOUTME: MealType, RecommendationKind, Priority, and RecommendationEntry definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Meal slot of the day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    /// Morning meal
    Breakfast,
    /// Midday meal
    Lunch,
    /// Evening meal
    Dinner,
    /// Between meals
    Snack,
}

impl MealType {
    /// All meal types in day order
    pub const ALL: [Self; 4] = [Self::Breakfast, Self::Lunch, Self::Dinner, Self::Snack];

    /// Convert to string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Snack => "snack",
        }
    }

    /// Case-insensitive parse, `None` for unknown or empty input
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|meal_type| meal_type.as_str().eq_ignore_ascii_case(s))
    }
}

/// Category tag of a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    /// When to eat
    MealTiming,
    /// What to eat
    FoodSuggestion,
    /// General nutrition advice
    NutritionTip,
    /// Plate composition
    MealBalance,
    /// Energy management
    EnergyTip,
    /// Snack timing
    SnackTiming,
    /// Portion sizes
    PortionTip,
    /// Water intake
    Hydration,
    /// Food variety
    Variety,
    /// Goal-specific strategy
    GoalTip,
    /// Goal-relative calorie alert
    CalorieAlert,
    /// Absolute calorie band warning
    CalorieWarning,
}

/// Display priority of a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Show first
    High,
    /// Normal
    Medium,
    /// Nice to know
    Low,
}

/// A canned piece of advice
///
/// Generated on demand and never persisted. Titles are unique within one response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationEntry {
    /// Category tag
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    /// Short title, also the deduplication key
    pub title: Cow<'static, str>,
    /// Advice text
    pub message: Cow<'static, str>,
    /// Display priority
    pub priority: Priority,
    /// Meal type the entry belongs to, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal_type: Option<MealType>,
}

impl RecommendationEntry {
    /// Entry from static text, usable in `const` tables
    #[must_use]
    pub const fn fixed(
        kind: RecommendationKind,
        title: &'static str,
        message: &'static str,
        priority: Priority,
        meal_type: Option<MealType>,
    ) -> Self {
        Self {
            kind,
            title: Cow::Borrowed(title),
            message: Cow::Borrowed(message),
            priority,
            meal_type,
        }
    }
}
