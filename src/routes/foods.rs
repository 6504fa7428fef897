// ABOUTME: Route handlers for the food catalog REST API
// ABOUTME: Validates catalog entries field by field and delegates storage to FoodsManager
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Food catalog routes

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use nutri_core::errors::{AppError, FieldError};
use nutri_core::models::{FoodCategory, MacroTotals, ServingSize};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use super::{parse_id, AppJson};
use crate::database::{FoodUpdate, NewFood};
use crate::resources::ServerResources;

/// Serving size as sent by clients
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServingSizeBody {
    /// Amount, number or numeric string
    pub amount: Option<Value>,
    /// Unit label
    pub unit: Option<String>,
}

/// Create/update body for a catalog entry
///
/// Macros accept numbers or numeric strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodBody {
    /// Display name
    pub name: Option<String>,
    /// Calories per serving
    pub calories: Option<Value>,
    /// Protein grams per serving
    pub protein: Option<Value>,
    /// Carbohydrate grams per serving
    pub carbs: Option<Value>,
    /// Fat grams per serving
    pub fat: Option<Value>,
    /// Category name
    pub category: Option<String>,
    /// Serving size
    pub serving_size: Option<ServingSizeBody>,
}

/// Parsed but not yet required fields of a [`FoodBody`]
struct FoodFields {
    name: Option<String>,
    macros: [Option<f64>; 4],
    category: Option<FoodCategory>,
    serving_size: Option<ServingSize>,
}

const MACRO_FIELDS: [&str; 4] = ["calories", "protein", "carbs", "fat"];

impl FoodBody {
    fn macro_values(&self) -> [Option<&Value>; 4] {
        [
            self.calories.as_ref(),
            self.protein.as_ref(),
            self.carbs.as_ref(),
            self.fat.as_ref(),
        ]
    }

    /// Validate every present field, recording one error per bad field
    fn parse_fields(&self, errors: &mut Vec<FieldError>) -> FoodFields {
        let name = self.name.as_deref().map(str::trim).map(str::to_owned);
        if name.as_deref().is_some_and(str::is_empty) {
            errors.push(FieldError::new("name", "name must not be empty"));
        }

        let values = self.macro_values();
        let mut macros = [None; 4];
        for (slot, (field, value)) in macros.iter_mut().zip(MACRO_FIELDS.iter().zip(values)) {
            if let Some(value) = value {
                match non_negative_number(value) {
                    Some(n) => *slot = Some(n),
                    None => errors.push(FieldError::new(
                        *field,
                        format!("{field} must be a non-negative number"),
                    )),
                }
            }
        }

        let category = self.category.as_deref().and_then(|raw| {
            let parsed = FoodCategory::try_parse(raw);
            if parsed.is_none() {
                errors.push(FieldError::new(
                    "category",
                    "category must be one of: fruit, vegetable, protein, grain, dairy, other",
                ));
            }
            parsed
        });

        let serving_size = self.serving_size.as_ref().and_then(|body| {
            let amount = body.amount.as_ref().and_then(non_negative_number);
            if amount.is_none() {
                errors.push(FieldError::new(
                    "servingSize.amount",
                    "servingSize.amount must be a non-negative number",
                ));
            }
            amount.map(|amount| ServingSize {
                amount,
                unit: body.unit.as_deref().unwrap_or_default().trim().to_owned(),
            })
        });

        FoodFields {
            name,
            macros,
            category,
            serving_size,
        }
    }

    /// Validate as a full new entry; name and all four macros are required
    fn into_new_food(self) -> Result<NewFood, AppError> {
        let mut errors = Vec::new();
        let fields = self.parse_fields(&mut errors);

        if self.name.is_none() {
            errors.push(FieldError::new("name", "name is required"));
        }
        for (field, value) in MACRO_FIELDS.iter().zip(self.macro_values()) {
            if value.is_none() {
                errors.push(FieldError::new(*field, format!("{field} is required")));
            }
        }
        if !errors.is_empty() {
            return Err(AppError::validation(errors));
        }

        let [calories, protein, carbs, fat] = fields.macros.map(Option::unwrap_or_default);
        Ok(NewFood {
            name: fields.name.unwrap_or_default(),
            macros: MacroTotals::new(calories, protein, carbs, fat),
            category: fields.category.unwrap_or_default(),
            serving_size: fields.serving_size,
        })
    }

    /// Validate as a partial update; absent fields are left unchanged
    fn into_update(self) -> Result<FoodUpdate, AppError> {
        let mut errors = Vec::new();
        let fields = self.parse_fields(&mut errors);
        if !errors.is_empty() {
            return Err(AppError::validation(errors));
        }

        let [calories, protein, carbs, fat] = fields.macros;
        Ok(FoodUpdate {
            name: fields.name,
            calories,
            protein,
            carbs,
            fat,
            category: fields.category,
            serving_size: fields.serving_size,
        })
    }
}

/// Accept a finite, non-negative number or numeric string
fn non_negative_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    (n.is_finite() && n >= 0.0).then_some(n)
}

/// Food catalog routes implementation
pub struct FoodRoutes;

impl FoodRoutes {
    /// Create all food catalog routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/foods",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route(
                "/api/foods/:id",
                get(Self::handle_get)
                    .put(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    /// Handle GET /api/foods
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let foods = resources.database.foods().list().await?;
        Ok((StatusCode::OK, Json(foods)).into_response())
    }

    /// Handle POST /api/foods
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        AppJson(body): AppJson<FoodBody>,
    ) -> Result<Response, AppError> {
        let new_food = body.into_new_food()?;
        let food = resources.database.foods().create(&new_food).await?;
        info!(food_id = %food.id, name = %food.name, "Food created");
        Ok((StatusCode::CREATED, Json(food)).into_response())
    }

    /// Handle GET /api/foods/:id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let id = parse_id(&id, "food")?;
        let food = resources
            .database
            .foods()
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("Food"))?;
        Ok((StatusCode::OK, Json(food)).into_response())
    }

    /// Handle PUT /api/foods/:id
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
        AppJson(body): AppJson<FoodBody>,
    ) -> Result<Response, AppError> {
        let id = parse_id(&id, "food")?;
        let update = body.into_update()?;
        let food = resources
            .database
            .foods()
            .update(id, &update)
            .await?
            .ok_or_else(|| AppError::not_found("Food"))?;
        Ok((StatusCode::OK, Json(food)).into_response())
    }

    /// Handle DELETE /api/foods/:id
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let id = parse_id(&id, "food")?;
        if !resources.database.foods().delete(id).await? {
            return Err(AppError::not_found("Food"));
        }
        info!(food_id = %id, "Food deleted");
        Ok((
            StatusCode::OK,
            Json(json!({ "message": "Food deleted successfully" })),
        )
            .into_response())
    }
}
