// ABOUTME: Meal aggregator combining resolved line items into macro totals
// ABOUTME: Dangling food references contribute zero and are logged, never fatal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use nutri_core::models::{MacroTotals, ResolvedFood, ResolvedLineItem};
use tracing::warn;
use uuid::Uuid;

/// Result of aggregating a meal's line items
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MealAggregation {
    /// Sum of food macros times quantity over resolved items
    pub totals: MacroTotals,
    /// Food ids that failed to resolve, in line item order
    pub unresolved: Vec<Uuid>,
}

impl MealAggregation {
    /// Whether every line item resolved
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Sum each macro of the referenced foods times the line item quantity
///
/// A `Missing` food contributes zero to all four totals and its id is
/// reported in [`MealAggregation::unresolved`].
#[must_use]
pub fn aggregate(items: &[ResolvedLineItem]) -> MealAggregation {
    let mut aggregation = MealAggregation::default();

    for item in items {
        match &item.food {
            ResolvedFood::Found(food) => {
                aggregation.totals += food.macros.scaled(item.quantity);
            }
            ResolvedFood::Missing => {
                warn!(
                    food_id = %item.food_id,
                    quantity = item.quantity,
                    "Meal line item references a missing food, counting it as zero"
                );
                aggregation.unresolved.push(item.food_id);
            }
        }
    }

    aggregation
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use nutri_core::models::{FoodCategory, FoodItem, MealLineItem};

    fn food(calories: f64, protein: f64, carbs: f64, fat: f64) -> FoodItem {
        let now = Utc::now();
        FoodItem {
            id: Uuid::new_v4(),
            name: "Test food".to_owned(),
            macros: MacroTotals::new(calories, protein, carbs, fat),
            category: FoodCategory::Other,
            serving_size: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn found(food: FoodItem, quantity: f64) -> ResolvedLineItem {
        ResolvedLineItem::found(
            MealLineItem {
                food_id: food.id,
                quantity,
            },
            food,
        )
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_totals_are_sum_of_macro_times_quantity() {
        let items = vec![
            found(food(52.0, 0.3, 14.0, 0.2), 2.0),
            found(food(165.0, 31.0, 0.0, 3.6), 1.5),
        ];

        let aggregation = aggregate(&items);

        assert_close(aggregation.totals.calories, 52.0 * 2.0 + 165.0 * 1.5);
        assert_close(aggregation.totals.protein, 0.3 * 2.0 + 31.0 * 1.5);
        assert_close(aggregation.totals.carbs, 14.0 * 2.0);
        assert_close(aggregation.totals.fat, 0.2 * 2.0 + 3.6 * 1.5);
        assert!(aggregation.is_complete());
    }

    #[test]
    fn test_missing_food_contributes_zero() {
        let dangling = Uuid::new_v4();
        let items = vec![
            found(food(100.0, 10.0, 10.0, 1.0), 1.0),
            ResolvedLineItem::missing(MealLineItem {
                food_id: dangling,
                quantity: 3.0,
            }),
        ];

        let aggregation = aggregate(&items);

        assert_eq!(aggregation.totals, MacroTotals::new(100.0, 10.0, 10.0, 1.0));
        assert_eq!(aggregation.unresolved, vec![dangling]);
    }

    #[test]
    fn test_empty_meal_is_zero() {
        let aggregation = aggregate(&[]);
        assert_eq!(aggregation.totals, MacroTotals::ZERO);
        assert!(aggregation.is_complete());
    }
}
