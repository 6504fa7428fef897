// ABOUTME: Nutrition summary route summing a user's logged meals
// ABOUTME: Optional UTC day window, otherwise every meal of the owner is counted
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use nutri_core::errors::{AppError, AppResult};
use nutri_core::models::{MacroTotals, MealOwner};
use serde::{Deserialize, Serialize};

use crate::database::MealFilter;
use crate::resources::ServerResources;

/// Query parameters for GET /api/nutrition/summary
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryQuery {
    /// Owner filter; absent or `demo-user` covers every meal
    pub user_id: Option<String>,
    /// UTC day as `YYYY-MM-DD`
    pub date: Option<String>,
}

/// Summed totals over the selected meals
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionSummary {
    /// Sum of meal totals
    pub totals: MacroTotals,
    /// Number of meals summed
    pub meal_count: usize,
}

impl SummaryQuery {
    fn filter(&self) -> AppResult<MealFilter> {
        let owner = MealOwner::parse(self.user_id.as_deref().unwrap_or_default())
            .ok_or_else(|| AppError::invalid_input("userId must be a user id or demo-user"))?;

        match self.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            None => Ok(MealFilter {
                user_id: owner.user_id(),
                ..MealFilter::default()
            }),
            Some(raw) => {
                let day = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map_err(|_| AppError::invalid_input("date must be formatted as YYYY-MM-DD"))?;
                let start: DateTime<Utc> = day.and_time(chrono::NaiveTime::MIN).and_utc();
                Ok(MealFilter::day(owner.user_id(), start))
            }
        }
    }
}

/// Nutrition summary routes implementation
pub struct NutritionRoutes;

impl NutritionRoutes {
    /// Create the nutrition summary route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/nutrition/summary", get(Self::handle_summary))
            .with_state(resources)
    }

    /// Handle GET /api/nutrition/summary
    async fn handle_summary(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<SummaryQuery>,
    ) -> Result<Response, AppError> {
        let filter = query.filter()?;
        let meals = resources.database.meals().list(&filter).await?;
        let summary = NutritionSummary {
            totals: nutri_intelligence::total_meals(&meals),
            meal_count: meals.len(),
        };
        Ok((StatusCode::OK, Json(summary)).into_response())
    }
}
