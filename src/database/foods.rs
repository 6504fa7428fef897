// ABOUTME: Database operations for the food catalog
// ABOUTME: CRUD for catalog entries plus batched lookups used to resolve meal line items
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;

use chrono::Utc;
use nutri_core::errors::{AppError, AppResult};
use nutri_core::models::{FoodCategory, FoodItem, MacroTotals, ServingSize};
use sqlx::{sqlite::SqliteRow, QueryBuilder, Row, Sqlite, SqlitePool};
use uuid::Uuid;

use super::{parse_timestamp, parse_uuid};

const FOOD_COLUMNS: &str = "id, name, calories, protein, carbs, fat, category, \
                            serving_amount, serving_unit, created_at, updated_at";

/// Validated input for a new catalog entry
#[derive(Debug, Clone, PartialEq)]
pub struct NewFood {
    /// Display name, trimmed and non-empty
    pub name: String,
    /// Per-serving macros, non-negative
    pub macros: MacroTotals,
    /// Catalog category
    pub category: FoodCategory,
    /// Optional serving size
    pub serving_size: Option<ServingSize>,
}

/// Partial update of a catalog entry; `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoodUpdate {
    /// New name
    pub name: Option<String>,
    /// New calories
    pub calories: Option<f64>,
    /// New protein
    pub protein: Option<f64>,
    /// New carbs
    pub carbs: Option<f64>,
    /// New fat
    pub fat: Option<f64>,
    /// New category
    pub category: Option<FoodCategory>,
    /// New serving size
    pub serving_size: Option<ServingSize>,
}

impl FoodUpdate {
    /// Merge this update over an existing entry
    #[must_use]
    pub fn apply_to(&self, food: &FoodItem) -> NewFood {
        NewFood {
            name: self.name.clone().unwrap_or_else(|| food.name.clone()),
            macros: MacroTotals {
                calories: self.calories.unwrap_or(food.macros.calories),
                protein: self.protein.unwrap_or(food.macros.protein),
                carbs: self.carbs.unwrap_or(food.macros.carbs),
                fat: self.fat.unwrap_or(food.macros.fat),
            },
            category: self.category.unwrap_or(food.category),
            serving_size: self
                .serving_size
                .clone()
                .or_else(|| food.serving_size.clone()),
        }
    }
}

/// Food catalog database operations manager
pub struct FoodsManager {
    pool: SqlitePool,
}

impl FoodsManager {
    /// Create a new foods manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List the whole catalog in insertion order
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn list(&self) -> AppResult<Vec<FoodItem>> {
        let rows = sqlx::query(&format!(
            "SELECT {FOOD_COLUMNS} FROM foods ORDER BY created_at ASC, rowid ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list foods: {e}")))?;

        rows.iter().map(row_to_food).collect()
    }

    /// Get a food by ID
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn get(&self, id: Uuid) -> AppResult<Option<FoodItem>> {
        let row = sqlx::query(&format!("SELECT {FOOD_COLUMNS} FROM foods WHERE id = $1"))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get food: {e}")))?;

        row.map(|r| row_to_food(&r)).transpose()
    }

    /// Look up many foods in one query; ids with no entry are absent from the map
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn get_many(&self, ids: &[Uuid]) -> AppResult<HashMap<Uuid, FoodItem>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {FOOD_COLUMNS} FROM foods WHERE id IN ("));
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id.to_string());
        }
        separated.push_unseparated(")");

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to resolve foods: {e}")))?;

        rows.iter()
            .map(|row| row_to_food(row).map(|food| (food.id, food)))
            .collect()
    }

    /// Insert a catalog entry
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn create(&self, food: &NewFood) -> AppResult<FoodItem> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            r"
            INSERT INTO foods (
                id, name, calories, protein, carbs, fat, category,
                serving_amount, serving_unit, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
            ",
        )
        .bind(id.to_string())
        .bind(&food.name)
        .bind(food.macros.calories)
        .bind(food.macros.protein)
        .bind(food.macros.carbs)
        .bind(food.macros.fat)
        .bind(food.category.as_str())
        .bind(food.serving_size.as_ref().map(|s| s.amount))
        .bind(food.serving_size.as_ref().map(|s| s.unit.clone()))
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create food: {e}")))?;

        Ok(FoodItem {
            id,
            name: food.name.clone(),
            macros: food.macros,
            category: food.category,
            serving_size: food.serving_size.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a partial update, returning `None` if the food does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn update(&self, id: Uuid, update: &FoodUpdate) -> AppResult<Option<FoodItem>> {
        let Some(existing) = self.get(id).await? else {
            return Ok(None);
        };
        let merged = update.apply_to(&existing);
        let now = Utc::now();

        sqlx::query(
            r"
            UPDATE foods SET
                name = $2, calories = $3, protein = $4, carbs = $5, fat = $6,
                category = $7, serving_amount = $8, serving_unit = $9, updated_at = $10
            WHERE id = $1
            ",
        )
        .bind(id.to_string())
        .bind(&merged.name)
        .bind(merged.macros.calories)
        .bind(merged.macros.protein)
        .bind(merged.macros.carbs)
        .bind(merged.macros.fat)
        .bind(merged.category.as_str())
        .bind(merged.serving_size.as_ref().map(|s| s.amount))
        .bind(merged.serving_size.as_ref().map(|s| s.unit.clone()))
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update food: {e}")))?;

        Ok(Some(FoodItem {
            id,
            name: merged.name,
            macros: merged.macros,
            category: merged.category,
            serving_size: merged.serving_size,
            created_at: existing.created_at,
            updated_at: now,
        }))
    }

    /// Delete a food; meals referencing it keep a dangling line item
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM foods WHERE id = $1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete food: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Number of catalog entries
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn count(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM foods")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count foods: {e}")))
    }

    /// Remove every catalog entry, returning how many were deleted
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn delete_all(&self) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM foods")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to clear foods: {e}")))?;

        Ok(result.rows_affected())
    }
}

/// Convert a database row to a `FoodItem`
fn row_to_food(row: &SqliteRow) -> AppResult<FoodItem> {
    let id: String = row.get("id");
    let category: String = row.get("category");
    let serving_amount: Option<f64> = row.get("serving_amount");
    let serving_unit: Option<String> = row.get("serving_unit");
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");

    Ok(FoodItem {
        id: parse_uuid(&id)?,
        name: row.get("name"),
        macros: MacroTotals::new(
            row.get("calories"),
            row.get("protein"),
            row.get("carbs"),
            row.get("fat"),
        ),
        category: FoodCategory::parse(&category),
        serving_size: serving_amount.map(|amount| ServingSize {
            amount,
            unit: serving_unit.unwrap_or_default(),
        }),
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}
