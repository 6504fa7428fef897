// ABOUTME: Route handler exposing the rule-based recommendation selector
// ABOUTME: Parses goal, calorie, and meal type query parameters with lenient defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use axum::{
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use nutri_core::models::{Goal, MealType};
use serde::Deserialize;
use tracing::debug;

/// Query parameters for GET /api/recommendations
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationQuery {
    /// Goal name; unrecognized values use the maintenance rules
    pub user_goals: Option<String>,
    /// Calories consumed so far
    pub current_calories: Option<String>,
    /// Meal type; unknown values contribute no meal entries
    pub meal_type: Option<String>,
    /// Accepted for compatibility, not used by the selector
    pub recent_meals: Option<String>,
}

impl RecommendationQuery {
    /// Resolve into selector inputs; never fails
    ///
    /// An absent `currentCalories` is 0. A present value that does not start
    /// with an integer becomes NaN, which matches no calorie rule.
    #[must_use]
    pub fn selector_inputs(&self) -> (Goal, f64, Option<MealType>) {
        let goal = Goal::parse_lossy(self.user_goals.as_deref().unwrap_or_default());
        let calories = self
            .current_calories
            .as_deref()
            .map_or(0.0, |raw| leading_integer(raw).unwrap_or(f64::NAN));
        let meal_type = self.meal_type.as_deref().and_then(MealType::parse);
        (goal, calories, meal_type)
    }
}

/// Integer prefix of `raw`: leading whitespace, an optional sign, then decimal
/// digits or `0x` hex digits. Fractions and trailing text are dropped.
fn leading_integer(raw: &str) -> Option<f64> {
    let trimmed = raw.trim_start();
    let (negative, unsigned) = trimmed.strip_prefix('-').map_or_else(
        || (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        |rest| (true, rest),
    );
    let (radix, digits) = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
        .map_or((10, unsigned), |hex| (16, hex));

    let mut value: Option<f64> = None;
    for digit in digits.chars().map_while(|c| c.to_digit(radix)) {
        value = Some(value.unwrap_or(0.0).mul_add(f64::from(radix), f64::from(digit)));
    }
    value.map(|v| if negative { -v } else { v })
}

/// Recommendation routes implementation
pub struct RecommendationRoutes;

impl RecommendationRoutes {
    /// Create the recommendation route
    pub fn routes() -> Router {
        Router::new().route("/api/recommendations", get(Self::handle_recommendations))
    }

    /// Handle GET /api/recommendations
    async fn handle_recommendations(Query(query): Query<RecommendationQuery>) -> Response {
        let (goal, calories, meal_type) = query.selector_inputs();
        let entries = nutri_intelligence::select(goal, calories, meal_type);
        debug!(
            goal = goal.as_str(),
            calories,
            meal_type = meal_type.map_or("general", |m| m.as_str()),
            count = entries.len(),
            "Recommendations selected"
        );
        (StatusCode::OK, Json(entries)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calories_for(raw: &str) -> f64 {
        RecommendationQuery {
            current_calories: Some(raw.to_owned()),
            ..RecommendationQuery::default()
        }
        .selector_inputs()
        .1
    }

    #[test]
    fn test_defaults() {
        let (goal, calories, meal_type) = RecommendationQuery::default().selector_inputs();
        assert_eq!(goal, Goal::Maintenance);
        assert!(calories.abs() < f64::EPSILON);
        assert_eq!(meal_type, None);
    }

    #[test]
    fn test_parsing() {
        let query = RecommendationQuery {
            user_goals: Some("weight_loss".to_owned()),
            current_calories: Some(" 2500 ".to_owned()),
            meal_type: Some("Lunch".to_owned()),
            recent_meals: Some("ignored".to_owned()),
        };
        let (goal, calories, meal_type) = query.selector_inputs();
        assert_eq!(goal, Goal::WeightLoss);
        assert!((calories - 2500.0).abs() < f64::EPSILON);
        assert_eq!(meal_type, Some(MealType::Lunch));
    }

    #[test]
    fn test_calories_take_integer_prefix() {
        assert!((calories_for("1500kcal") - 1500.0).abs() < f64::EPSILON);
        assert!((calories_for("2000.9") - 2000.0).abs() < f64::EPSILON);
        assert!((calories_for("  -40") + 40.0).abs() < f64::EPSILON);
        assert!((calories_for("+7x") - 7.0).abs() < f64::EPSILON);
        assert!((calories_for("0x10") - 16.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_calories_without_digits_are_nan() {
        for raw in ["lots", "", "   ", "-", "0x", ".5"] {
            assert!(calories_for(raw).is_nan(), "{raw:?}");
        }
    }
}
