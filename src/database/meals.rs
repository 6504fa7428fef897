// ABOUTME: Database operations for logged meals and their ordered line items
// ABOUTME: Resolves food references on read, persists derived totals, and reports stale ones
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use nutri_core::errors::{AppError, AppResult};
use nutri_core::models::{FoodItem, MacroTotals, Meal, MealLineItem, MealOwner, ResolvedLineItem};
use nutri_intelligence::aggregate;
use sqlx::{sqlite::SqliteRow, QueryBuilder, Row, Sqlite, SqlitePool, Transaction};
use tracing::{debug, info};
use uuid::Uuid;

use super::{parse_timestamp, parse_uuid, FoodsManager};

/// Input for a new meal; totals are never part of it
#[derive(Debug, Clone, PartialEq)]
pub struct NewMeal {
    /// Meal name
    pub name: String,
    /// Owner
    pub owner: MealOwner,
    /// Ordered line items, at least one
    pub items: Vec<MealLineItem>,
}

/// Partial meal update; `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MealUpdate {
    /// New name
    pub name: Option<String>,
    /// Replacement line items, triggers a totals recompute
    pub items: Option<Vec<MealLineItem>>,
}

/// Listing filter for meals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MealFilter {
    /// Only meals owned by this user; `None` lists every meal
    pub user_id: Option<Uuid>,
    /// Inclusive lower bound on creation time
    pub created_from: Option<DateTime<Utc>>,
    /// Exclusive upper bound on creation time
    pub created_before: Option<DateTime<Utc>>,
}

impl MealFilter {
    /// Filter for one UTC day starting at `start`
    #[must_use]
    pub fn day(user_id: Option<Uuid>, start: DateTime<Utc>) -> Self {
        Self {
            user_id,
            created_from: Some(start),
            created_before: Some(start + chrono::Duration::days(1)),
        }
    }
}

/// Stored and recomputed totals further apart than this count as drift
const TOTALS_TOLERANCE: f64 = 1e-6;

const MEAL_COLUMNS: &str = "id, name, user_id, total_calories, total_protein, total_carbs, \
                            total_fat, created_at, updated_at";

/// Meal header row before its items are attached
struct MealRow {
    id: Uuid,
    name: String,
    owner: MealOwner,
    stored_totals: MacroTotals,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Meal log database operations manager
pub struct MealsManager {
    pool: SqlitePool,
}

impl MealsManager {
    /// Create a new meals manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn foods(&self) -> FoodsManager {
        FoodsManager::new(self.pool.clone())
    }

    /// Resolve line items against the catalog in one query
    async fn resolve(&self, items: &[MealLineItem]) -> AppResult<Vec<ResolvedLineItem>> {
        let ids: Vec<Uuid> = items.iter().map(|item| item.food_id).collect();
        let catalog = self.foods().get_many(&ids).await?;
        Ok(resolve_with(items, &catalog))
    }

    /// Log a new meal, computing and persisting its totals
    ///
    /// Dangling food references are accepted and contribute zero.
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn create(&self, meal: &NewMeal) -> AppResult<Meal> {
        // Resolve before opening the transaction: an in-memory pool has a single connection
        let foods = self.resolve(&meal.items).await?;
        let totals = aggregate(&foods).totals;

        let id = Uuid::new_v4();
        let now = Utc::now();

        let mut tx = self.begin().await?;
        sqlx::query(
            r"
            INSERT INTO meals (
                id, name, user_id, total_calories, total_protein, total_carbs, total_fat,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            ",
        )
        .bind(id.to_string())
        .bind(&meal.name)
        .bind(meal.owner.user_id().map(|u| u.to_string()))
        .bind(totals.calories)
        .bind(totals.protein)
        .bind(totals.carbs)
        .bind(totals.fat)
        .bind(now.to_rfc3339())
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to create meal: {e}")))?;

        insert_items(&mut tx, id, &meal.items).await?;
        commit(tx).await?;

        debug!(meal_id = %id, items = meal.items.len(), "Meal logged");

        Ok(Meal {
            id,
            name: meal.name.clone(),
            foods,
            user: meal.owner,
            totals,
            created_at: now,
            updated_at: now,
        })
    }

    /// Get a meal with its line items resolved
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn get(&self, id: Uuid) -> AppResult<Option<Meal>> {
        let row = sqlx::query(&format!("SELECT {MEAL_COLUMNS} FROM meals WHERE id = $1"))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get meal: {e}")))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut meals = self.attach_items(vec![row_to_meal(&row)?]).await?;
        Ok(meals.pop())
    }

    /// List meals in logging order, each with resolved line items
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn list(&self, filter: &MealFilter) -> AppResult<Vec<Meal>> {
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {MEAL_COLUMNS} FROM meals WHERE 1 = 1"));
        if let Some(user_id) = filter.user_id {
            builder.push(" AND user_id = ").push_bind(user_id.to_string());
        }
        if let Some(from) = filter.created_from {
            builder.push(" AND created_at >= ").push_bind(from.to_rfc3339());
        }
        if let Some(before) = filter.created_before {
            builder.push(" AND created_at < ").push_bind(before.to_rfc3339());
        }
        builder.push(" ORDER BY created_at ASC, rowid ASC");

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list meals: {e}")))?;

        let headers = rows.iter().map(row_to_meal).collect::<AppResult<Vec<_>>>()?;
        self.attach_items(headers).await
    }

    /// Apply a partial update, returning `None` if the meal does not exist
    ///
    /// Replacing the line items recomputes and persists the totals.
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn update(&self, id: Uuid, update: &MealUpdate) -> AppResult<Option<Meal>> {
        let Some(existing) = self.get(id).await? else {
            return Ok(None);
        };
        self.write_update(existing, update).await
    }

    /// Persist `update` over a previously read meal; `None` if the row is gone
    async fn write_update(&self, existing: Meal, update: &MealUpdate) -> AppResult<Option<Meal>> {
        let id = existing.id;
        let now = Utc::now();
        let name = update.name.clone().unwrap_or_else(|| existing.name.clone());
        let (foods, totals) = match &update.items {
            Some(items) => {
                let foods = self.resolve(items).await?;
                let totals = aggregate(&foods).totals;
                (foods, totals)
            }
            None => (existing.foods, existing.totals),
        };

        let mut tx = self.begin().await?;
        let updated = sqlx::query(
            r"
            UPDATE meals SET
                name = $2, total_calories = $3, total_protein = $4, total_carbs = $5,
                total_fat = $6, updated_at = $7
            WHERE id = $1
            ",
        )
        .bind(id.to_string())
        .bind(&name)
        .bind(totals.calories)
        .bind(totals.protein)
        .bind(totals.carbs)
        .bind(totals.fat)
        .bind(now.to_rfc3339())
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to update meal: {e}")))?;

        // Deleted since the lookup above; dropping the transaction rolls back
        if updated.rows_affected() == 0 {
            return Ok(None);
        }

        if let Some(items) = &update.items {
            sqlx::query("DELETE FROM meal_items WHERE meal_id = $1")
                .bind(id.to_string())
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::database(format!("Failed to replace meal items: {e}")))?;
            insert_items(&mut tx, id, items).await?;
        }
        commit(tx).await?;

        Ok(Some(Meal {
            id,
            name,
            foods,
            user: existing.user,
            totals,
            created_at: existing.created_at,
            updated_at: now,
        }))
    }

    /// Delete a meal and its line items
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM meals WHERE id = $1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete meal: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    async fn begin(&self) -> AppResult<Transaction<'static, Sqlite>> {
        self.pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))
    }

    /// Load items for a batch of meals, resolve them, and recompute totals
    ///
    /// Stored totals that no longer match (a referenced food was edited or
    /// deleted since the last write) are logged; the recomputed ones win.
    async fn attach_items(&self, headers: Vec<MealRow>) -> AppResult<Vec<Meal>> {
        if headers.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT meal_id, food_id, quantity FROM meal_items WHERE meal_id IN (",
        );
        let mut separated = builder.separated(", ");
        for header in &headers {
            separated.push_bind(header.id.to_string());
        }
        separated.push_unseparated(") ORDER BY meal_id, position ASC");

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to load meal items: {e}")))?;

        let mut items_by_meal: HashMap<Uuid, Vec<MealLineItem>> = HashMap::new();
        for row in &rows {
            let meal_id: String = row.get("meal_id");
            let food_id: String = row.get("food_id");
            items_by_meal
                .entry(parse_uuid(&meal_id)?)
                .or_default()
                .push(MealLineItem {
                    food_id: parse_uuid(&food_id)?,
                    quantity: row.get("quantity"),
                });
        }

        let mut food_ids: Vec<Uuid> = items_by_meal
            .values()
            .flatten()
            .map(|item| item.food_id)
            .collect();
        food_ids.sort_unstable();
        food_ids.dedup();
        let catalog = self.foods().get_many(&food_ids).await?;

        Ok(headers
            .into_iter()
            .map(|header| {
                let items = items_by_meal.remove(&header.id).unwrap_or_default();
                let foods = resolve_with(&items, &catalog);
                let totals: MacroTotals = aggregate(&foods).totals;
                if totals_drifted(&header.stored_totals, &totals) {
                    info!(
                        meal_id = %header.id,
                        stored_calories = header.stored_totals.calories,
                        calories = totals.calories,
                        "Stored meal totals are stale"
                    );
                }
                Meal {
                    id: header.id,
                    name: header.name,
                    foods,
                    user: header.owner,
                    totals,
                    created_at: header.created_at,
                    updated_at: header.updated_at,
                }
            })
            .collect())
    }
}

/// Whether any macro differs by more than [`TOTALS_TOLERANCE`]
fn totals_drifted(stored: &MacroTotals, recomputed: &MacroTotals) -> bool {
    stored
        .fields()
        .zip(recomputed.fields())
        .any(|((_, a), (_, b))| (a - b).abs() > TOTALS_TOLERANCE)
}

fn resolve_with(items: &[MealLineItem], catalog: &HashMap<Uuid, FoodItem>) -> Vec<ResolvedLineItem> {
    items
        .iter()
        .map(|item| {
            catalog.get(&item.food_id).map_or_else(
                || ResolvedLineItem::missing(*item),
                |food| ResolvedLineItem::found(*item, food.clone()),
            )
        })
        .collect()
}

async fn insert_items(
    tx: &mut Transaction<'static, Sqlite>,
    meal_id: Uuid,
    items: &[MealLineItem],
) -> AppResult<()> {
    for (position, item) in items.iter().enumerate() {
        sqlx::query(
            "INSERT INTO meal_items (meal_id, position, food_id, quantity) VALUES ($1, $2, $3, $4)",
        )
        .bind(meal_id.to_string())
        .bind(position as i64)
        .bind(item.food_id.to_string())
        .bind(item.quantity)
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert meal item: {e}")))?;
    }
    Ok(())
}

async fn commit(tx: Transaction<'static, Sqlite>) -> AppResult<()> {
    tx.commit()
        .await
        .map_err(|e| AppError::database(format!("Failed to commit transaction: {e}")))
}

/// Convert a meal header row; line items are attached separately
fn row_to_meal(row: &SqliteRow) -> AppResult<MealRow> {
    let id: String = row.get("id");
    let user_id: Option<String> = row.get("user_id");
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");

    Ok(MealRow {
        id: parse_uuid(&id)?,
        name: row.get("name"),
        owner: user_id.as_deref().map(parse_uuid).transpose()?.into(),
        stored_totals: MacroTotals::new(
            row.get("total_calories"),
            row.get("total_protein"),
            row.get("total_carbs"),
            row.get("total_fat"),
        ),
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}
