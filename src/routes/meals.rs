// ABOUTME: Route handlers for meal logging with server-derived nutrition totals
// ABOUTME: Validates line items, resolves meal ownership, and delegates storage to MealsManager
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Meal logging routes
//!
//! Totals are never read from request bodies. They are computed from the
//! resolved line items whenever the items are written and again on every read.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use nutri_core::constants::limits::{DEFAULT_QUANTITY, MIN_QUANTITY};
use nutri_core::errors::{AppError, AppResult};
use nutri_core::models::{MealLineItem, MealOwner};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use super::{parse_id, AppJson};
use crate::database::{MealFilter, MealUpdate, NewMeal};
use crate::resources::ServerResources;

const DEFAULT_MEAL_NAME: &str = "breakfast";
const FOODS_REQUIRED_MESSAGE: &str = "At least one food item is required";
const INVALID_ITEM_MESSAGE: &str =
    "Each food item must have a valid food ID and quantity (at least 1)";

/// Create/update body for a meal; any `total*` fields are ignored
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MealBody {
    /// Meal name
    pub name: Option<String>,
    /// Line items: `{ food, quantity }`
    pub foods: Option<Value>,
    /// Owner id or `demo-user`, used when no credential is sent
    pub user: Option<String>,
}

/// Query parameters for GET /api/meals
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealsQuery {
    /// Owner filter; absent or `demo-user` lists every meal
    pub user_id: Option<String>,
}

/// Parse and validate the `foods` array of a meal body
///
/// # Errors
///
/// Returns `INVALID_INPUT` when the array is missing or empty, or when any
/// item lacks a food id or has a quantity below 1
pub fn parse_line_items(foods: Option<&Value>) -> AppResult<Vec<MealLineItem>> {
    let items = foods
        .and_then(Value::as_array)
        .filter(|items| !items.is_empty())
        .ok_or_else(|| AppError::invalid_input(FOODS_REQUIRED_MESSAGE))?;

    items
        .iter()
        .map(|item| parse_line_item(item).ok_or_else(|| AppError::invalid_input(INVALID_ITEM_MESSAGE)))
        .collect()
}

/// One line item; `food` may be an id or a resolved food object
fn parse_line_item(item: &Value) -> Option<MealLineItem> {
    let reference = item.get("food").or_else(|| item.get("foodId"))?;
    let raw_id = match reference {
        Value::String(id) => id.as_str(),
        Value::Object(food) => food.get("id")?.as_str()?,
        _ => return None,
    };
    let food_id = Uuid::parse_str(raw_id.trim()).ok()?;

    let quantity = match item.get("quantity") {
        None | Some(Value::Null) => DEFAULT_QUANTITY,
        Some(Value::Number(n)) => n.as_f64()?,
        Some(Value::String(s)) => s.trim().parse().ok()?,
        Some(_) => return None,
    };
    (quantity.is_finite() && quantity >= MIN_QUANTITY).then_some(MealLineItem { food_id, quantity })
}

/// Meal routes implementation
pub struct MealRoutes;

impl MealRoutes {
    /// Create all meal routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/meals",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route(
                "/api/meals/:id",
                get(Self::handle_get)
                    .put(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    /// Owner of a new meal: the credential's user, else the body's `user`
    fn resolve_owner(
        resources: &ServerResources,
        headers: &HeaderMap,
        body_user: Option<&str>,
    ) -> AppResult<MealOwner> {
        if let Some(claims) = resources.auth_manager.authenticate_optional(headers)? {
            return Ok(MealOwner::User(claims.user_id()?));
        }
        MealOwner::parse(body_user.unwrap_or_default())
            .ok_or_else(|| AppError::invalid_input("user must be a user id or demo-user"))
    }

    /// Handle GET /api/meals
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<MealsQuery>,
    ) -> Result<Response, AppError> {
        let owner = MealOwner::parse(query.user_id.as_deref().unwrap_or_default())
            .ok_or_else(|| AppError::invalid_input("userId must be a user id or demo-user"))?;
        let filter = MealFilter {
            user_id: owner.user_id(),
            ..MealFilter::default()
        };

        let meals = resources.database.meals().list(&filter).await?;
        Ok((StatusCode::OK, Json(meals)).into_response())
    }

    /// Handle POST /api/meals
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        AppJson(body): AppJson<MealBody>,
    ) -> Result<Response, AppError> {
        let items = parse_line_items(body.foods.as_ref())?;
        let owner = Self::resolve_owner(&resources, &headers, body.user.as_deref())?;
        let name = body
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_MEAL_NAME)
            .to_owned();

        let meal = resources
            .database
            .meals()
            .create(&NewMeal { name, owner, items })
            .await?;
        info!(meal_id = %meal.id, calories = meal.totals.calories, "Meal created");
        Ok((StatusCode::CREATED, Json(meal)).into_response())
    }

    /// Handle GET /api/meals/:id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let id = parse_id(&id, "meal")?;
        let meal = resources
            .database
            .meals()
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("Meal"))?;
        Ok((StatusCode::OK, Json(meal)).into_response())
    }

    /// Handle PUT /api/meals/:id
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
        AppJson(body): AppJson<MealBody>,
    ) -> Result<Response, AppError> {
        let id = parse_id(&id, "meal")?;
        let items = match body.foods.as_ref() {
            Some(foods) => Some(parse_line_items(Some(foods))?),
            None => None,
        };
        let update = MealUpdate {
            name: body.name.map(|n| n.trim().to_owned()).filter(|n| !n.is_empty()),
            items,
        };

        let meal = resources
            .database
            .meals()
            .update(id, &update)
            .await?
            .ok_or_else(|| AppError::not_found("Meal"))?;
        Ok((StatusCode::OK, Json(meal)).into_response())
    }

    /// Handle DELETE /api/meals/:id
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let id = parse_id(&id, "meal")?;
        if !resources.database.meals().delete(id).await? {
            return Err(AppError::not_found("Meal"));
        }
        info!(meal_id = %id, "Meal deleted");
        Ok((
            StatusCode::OK,
            Json(json!({ "message": "Meal deleted successfully" })),
        )
            .into_response())
    }
}
