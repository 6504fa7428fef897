// ABOUTME: SQLite persistence for foods, users, meals, and meal line items
// ABOUTME: Owns the connection pool, runs idempotent migrations, and hands out managers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Database Management
//!
//! Every table is created with `CREATE TABLE IF NOT EXISTS` at connect time.
//! Identifiers are stored as UUID text and timestamps as RFC 3339 text.

mod foods;
mod meals;
mod users;

pub use foods::{FoodUpdate, FoodsManager, NewFood};
pub use meals::{MealFilter, MealUpdate, MealsManager, NewMeal};
pub use users::{NewUser, UsersManager};

use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use nutri_core::errors::{AppError, AppResult};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::DatabaseUrl;

/// Database handle shared by all request handlers
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect, creating the database file if needed, and run migrations
    ///
    /// In-memory databases use one long-lived connection so every query sees
    /// the same data.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or a migration fails
    pub async fn new(url: &DatabaseUrl) -> Result<Self> {
        let connection_string = url.to_connection_string();
        let options = SqliteConnectOptions::from_str(&connection_string)
            .with_context(|| format!("Invalid database URL: {connection_string}"))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = match url {
            DatabaseUrl::Memory => {
                SqlitePoolOptions::new()
                    .max_connections(1)
                    .min_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None)
                    .connect_with(options)
                    .await
            }
            DatabaseUrl::SQLite { path } => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create database directory {}", parent.display())
                    })?;
                }
                SqlitePoolOptions::new().connect_with(options).await
            }
        }
        .with_context(|| format!("Failed to connect to {connection_string}"))?;

        let db = Self { pool };
        db.migrate().await?;
        info!(database = %url, "Database connected");

        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Food catalog operations
    #[must_use]
    pub fn foods(&self) -> FoodsManager {
        FoodsManager::new(self.pool.clone())
    }

    /// Meal log operations
    #[must_use]
    pub fn meals(&self) -> MealsManager {
        MealsManager::new(self.pool.clone())
    }

    /// User account operations
    #[must_use]
    pub fn users(&self) -> UsersManager {
        UsersManager::new(self.pool.clone())
    }

    /// Connectivity probe used by the health endpoint
    pub async fn ping(&self) -> bool {
        match sqlx::query("SELECT 1").execute(&self.pool).await {
            Ok(_) => true,
            Err(e) => {
                debug!("Database ping failed: {e}");
                false
            }
        }
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if a schema statement fails
    pub async fn migrate(&self) -> Result<()> {
        self.migrate_foods().await?;
        self.migrate_users().await?;
        self.migrate_meals().await?;
        Ok(())
    }

    async fn migrate_foods(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS foods (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                calories REAL NOT NULL CHECK (calories >= 0),
                protein REAL NOT NULL CHECK (protein >= 0),
                carbs REAL NOT NULL CHECK (carbs >= 0),
                fat REAL NOT NULL CHECK (fat >= 0),
                category TEXT NOT NULL DEFAULT 'other',
                serving_amount REAL,
                serving_unit TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .context("Failed to create foods table")?;

        Ok(())
    }

    async fn migrate_users(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                username TEXT NOT NULL UNIQUE,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                age INTEGER,
                weight REAL,
                height REAL,
                dietary_preferences TEXT NOT NULL DEFAULT '[]',
                allergies TEXT NOT NULL DEFAULT '[]',
                goal TEXT NOT NULL DEFAULT 'maintenance',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .context("Failed to create users table")?;

        Ok(())
    }

    async fn migrate_meals(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS meals (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                user_id TEXT,
                total_calories REAL NOT NULL DEFAULT 0,
                total_protein REAL NOT NULL DEFAULT 0,
                total_carbs REAL NOT NULL DEFAULT 0,
                total_fat REAL NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .context("Failed to create meals table")?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_meals_user_created ON meals(user_id, created_at)")
            .execute(&self.pool)
            .await
            .context("Failed to create meals index")?;

        // food_id has no foreign key: dangling references are a visible state, not an error
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS meal_items (
                meal_id TEXT NOT NULL REFERENCES meals(id) ON DELETE CASCADE,
                position INTEGER NOT NULL,
                food_id TEXT NOT NULL,
                quantity REAL NOT NULL,
                PRIMARY KEY (meal_id, position)
            )
            ",
        )
        .execute(&self.pool)
        .await
        .context("Failed to create meal_items table")?;

        Ok(())
    }
}

/// Parse an RFC 3339 timestamp column
pub(crate) fn parse_timestamp(value: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::internal(format!("Invalid datetime: {e}")))
}

/// Parse a UUID text column
pub(crate) fn parse_uuid(value: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value).map_err(|e| AppError::internal(format!("Invalid UUID in database: {e}")))
}
