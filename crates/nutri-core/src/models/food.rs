// ABOUTME: Food catalog models with per-serving macro values and categories
// ABOUTME: FoodItem, FoodCategory, and ServingSize definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::MacroTotals;

/// Catalog category of a food
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FoodCategory {
    /// Fruits
    Fruit,
    /// Vegetables
    Vegetable,
    /// Meat, fish, eggs, and other protein sources
    Protein,
    /// Grains and cereals
    Grain,
    /// Milk products
    Dairy,
    /// Anything else
    #[default]
    Other,
}

impl FoodCategory {
    /// All categories in catalog order
    pub const ALL: [Self; 6] = [
        Self::Fruit,
        Self::Vegetable,
        Self::Protein,
        Self::Grain,
        Self::Dairy,
        Self::Other,
    ];

    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fruit => "fruit",
            Self::Vegetable => "vegetable",
            Self::Protein => "protein",
            Self::Grain => "grain",
            Self::Dairy => "dairy",
            Self::Other => "other",
        }
    }

    /// Strict parse for request input, `None` for unknown categories
    #[must_use]
    pub fn try_parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s))
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        // Default to Other for unrecognized values
        Self::try_parse(s).unwrap_or_default()
    }
}

/// Serving size descriptor, e.g. `100 g` or `1 medium`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServingSize {
    /// Numeric amount
    pub amount: f64,
    /// Unit label
    pub unit: String,
}

/// A catalog entry with fixed per-serving macro values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    /// Unique identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Per-serving macros
    #[serde(flatten)]
    pub macros: MacroTotals,
    /// Catalog category
    pub category: FoodCategory,
    /// Optional serving size descriptor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serving_size: Option<ServingSize>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}
