// ABOUTME: Nutrition totalizer summing stored meal totals into one aggregate
// ABOUTME: Uses each meal's totals as stored, without re-deriving from line items
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use nutri_core::models::{MacroTotals, Meal};

/// Sum a collection of meal totals
///
/// Totals that arrived with missing fields were already defaulted to zero
/// at deserialization.
pub fn total<'a, I>(totals: I) -> MacroTotals
where
    I: IntoIterator<Item = &'a MacroTotals>,
{
    totals.into_iter().sum()
}

/// Sum the stored totals of the given meals
pub fn total_meals<'a, I>(meals: I) -> MacroTotals
where
    I: IntoIterator<Item = &'a Meal>,
{
    total(meals.into_iter().map(|meal| &meal.totals))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use nutri_core::models::MealOwner;
    use uuid::Uuid;

    fn meal(totals: MacroTotals) -> Meal {
        let now = Utc::now();
        Meal {
            id: Uuid::new_v4(),
            name: "Lunch".to_owned(),
            foods: Vec::new(),
            user: MealOwner::Guest,
            totals,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_total_sums_stored_fields() {
        let meals = vec![
            meal(MacroTotals::new(500.0, 30.0, 60.0, 15.0)),
            meal(MacroTotals::new(250.0, 5.0, 40.0, 8.0)),
        ];
        assert_eq!(
            total_meals(&meals),
            MacroTotals::new(750.0, 35.0, 100.0, 23.0)
        );
    }

    #[test]
    fn test_no_meals_is_zero() {
        assert_eq!(total_meals(&Vec::<Meal>::new()), MacroTotals::ZERO);
    }

    #[test]
    fn test_payload_with_missing_totals_counts_zero() {
        let payload = serde_json::json!([
            {
                "id": Uuid::new_v4(),
                "name": "Breakfast",
                "totalCalories": 400,
                "createdAt": "2025-03-01T08:00:00Z",
                "updatedAt": "2025-03-01T08:00:00Z"
            },
            {
                "id": Uuid::new_v4(),
                "name": "Dinner",
                "totalCalories": 600,
                "totalProtein": 40,
                "createdAt": "2025-03-01T19:00:00Z",
                "updatedAt": "2025-03-01T19:00:00Z"
            }
        ]);
        let meals: Vec<Meal> = serde_json::from_value(payload).unwrap();

        let totals = total_meals(&meals);

        assert!((totals.calories - 1000.0).abs() < f64::EPSILON);
        assert!((totals.protein - 40.0).abs() < f64::EPSILON);
        assert!(totals.carbs.abs() < f64::EPSILON);
    }
}
