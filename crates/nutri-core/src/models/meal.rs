// ABOUTME: Meal models with line items, explicit food resolution state, and ownership
// ABOUTME: Meal, MealLineItem, ResolvedFood, ResolvedLineItem, and MealOwner definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use super::{FoodItem, MacroTotals};
use crate::constants::identity::DEMO_USER;

/// Reference to a catalog food with a quantity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MealLineItem {
    /// Referenced food
    pub food_id: Uuid,
    /// Number of servings, at least 1
    pub quantity: f64,
}

/// Outcome of looking up a line item's food in the catalog
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedFood {
    /// The referenced food exists
    Found(FoodItem),
    /// The reference dangles
    Missing,
}

impl ResolvedFood {
    /// The food, if it resolved
    #[must_use]
    pub const fn as_food(&self) -> Option<&FoodItem> {
        match self {
            Self::Found(food) => Some(food),
            Self::Missing => None,
        }
    }

    /// Whether the reference dangles
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl Serialize for ResolvedFood {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_food().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ResolvedFood {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Option::<FoodItem>::deserialize(deserializer)?.map_or(Self::Missing, Self::Found))
    }
}

/// A line item joined with its catalog lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedLineItem {
    /// Referenced food
    pub food_id: Uuid,
    /// Number of servings
    pub quantity: f64,
    /// Lookup result, `null` on the wire when missing
    #[serde(default = "missing_food")]
    pub food: ResolvedFood,
}

const fn missing_food() -> ResolvedFood {
    ResolvedFood::Missing
}

impl ResolvedLineItem {
    /// Unresolved line item for the given reference
    #[must_use]
    pub const fn missing(item: MealLineItem) -> Self {
        Self {
            food_id: item.food_id,
            quantity: item.quantity,
            food: ResolvedFood::Missing,
        }
    }

    /// Resolved line item with its catalog entry
    #[must_use]
    pub const fn found(item: MealLineItem, food: FoodItem) -> Self {
        Self {
            food_id: item.food_id,
            quantity: item.quantity,
            food: ResolvedFood::Found(food),
        }
    }
}

/// Who a meal belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MealOwner {
    /// Anonymous meal, shared guest identity
    #[default]
    Guest,
    /// Registered user
    User(Uuid),
}

impl MealOwner {
    /// Parse a wire owner identifier
    ///
    /// Empty and `demo-user` are the guest; a UUID is a user; anything else is `None`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() || s == DEMO_USER {
            return Some(Self::Guest);
        }
        Uuid::parse_str(s).ok().map(Self::User)
    }

    /// Owning user id, `None` for the guest
    #[must_use]
    pub const fn user_id(self) -> Option<Uuid> {
        match self {
            Self::Guest => None,
            Self::User(id) => Some(id),
        }
    }
}

impl From<Option<Uuid>> for MealOwner {
    fn from(user_id: Option<Uuid>) -> Self {
        user_id.map_or(Self::Guest, Self::User)
    }
}

impl Serialize for MealOwner {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.user_id().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for MealOwner {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Option::<Uuid>::deserialize(deserializer)?.into())
    }
}

/// A logged meal with server-derived totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "MealWire", from = "MealWire")]
pub struct Meal {
    /// Unique identifier
    pub id: Uuid,
    /// Free-text name, usually the meal type
    pub name: String,
    /// Ordered line items
    pub foods: Vec<ResolvedLineItem>,
    /// Owner
    pub user: MealOwner,
    /// Sum of line item macros times quantity
    pub totals: MacroTotals,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// Wire shape of a meal with the totals spelled out as `total*` fields
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MealWire {
    id: Uuid,
    name: String,
    #[serde(default)]
    foods: Vec<ResolvedLineItem>,
    #[serde(default)]
    user: MealOwner,
    #[serde(default)]
    total_calories: f64,
    #[serde(default)]
    total_protein: f64,
    #[serde(default)]
    total_carbs: f64,
    #[serde(default)]
    total_fat: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<Meal> for MealWire {
    fn from(meal: Meal) -> Self {
        Self {
            id: meal.id,
            name: meal.name,
            foods: meal.foods,
            user: meal.user,
            total_calories: meal.totals.calories,
            total_protein: meal.totals.protein,
            total_carbs: meal.totals.carbs,
            total_fat: meal.totals.fat,
            created_at: meal.created_at,
            updated_at: meal.updated_at,
        }
    }
}

impl From<MealWire> for Meal {
    fn from(wire: MealWire) -> Self {
        Self {
            id: wire.id,
            name: wire.name,
            foods: wire.foods,
            user: wire.user,
            totals: MacroTotals::new(
                wire.total_calories,
                wire.total_protein,
                wire.total_carbs,
                wire.total_fat,
            ),
            created_at: wire.created_at,
            updated_at: wire.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_parse() {
        assert_eq!(MealOwner::parse("demo-user"), Some(MealOwner::Guest));
        assert_eq!(MealOwner::parse(""), Some(MealOwner::Guest));
        let id = Uuid::new_v4();
        assert_eq!(MealOwner::parse(&id.to_string()), Some(MealOwner::User(id)));
        assert_eq!(MealOwner::parse("someone"), None);
    }

    #[test]
    fn test_meal_wire_shape() {
        let now = Utc::now();
        let meal = Meal {
            id: Uuid::new_v4(),
            name: "Breakfast".to_owned(),
            foods: vec![ResolvedLineItem::missing(MealLineItem {
                food_id: Uuid::new_v4(),
                quantity: 2.0,
            })],
            user: MealOwner::Guest,
            totals: MacroTotals::new(300.0, 10.0, 40.0, 5.0),
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(&meal).unwrap();
        assert_eq!(json["totalCalories"], 300.0);
        assert!(json["user"].is_null());
        assert!(json["foods"][0]["food"].is_null());
        assert_eq!(json["foods"][0]["quantity"], 2.0);
    }

    #[test]
    fn test_meal_without_totals_deserializes_as_zero() {
        let id = Uuid::new_v4();
        let json = serde_json::json!({
            "id": id,
            "name": "Snack",
            "createdAt": "2025-01-01T10:00:00Z",
            "updatedAt": "2025-01-01T10:00:00Z",
            "totalCalories": 150
        });
        let meal: Meal = serde_json::from_value(json).unwrap();
        assert!((meal.totals.calories - 150.0).abs() < f64::EPSILON);
        assert!(meal.totals.fat.abs() < f64::EPSILON);
        assert_eq!(meal.user, MealOwner::Guest);
    }
}
