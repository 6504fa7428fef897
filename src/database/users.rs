// ABOUTME: User account database operations
// ABOUTME: Inserts accounts with unique username and email and looks them up for authentication
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::Utc;
use nutri_core::errors::{AppError, AppResult};
use nutri_core::models::{Goal, User, UserAttributes};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

use super::{parse_timestamp, parse_uuid};

const USER_COLUMNS: &str = "id, username, email, password_hash, age, weight, height, \
                            dietary_preferences, allergies, goal, created_at, updated_at";

/// Validated account data with an already hashed password
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Trimmed username
    pub username: String,
    /// Trimmed, lowercased email
    pub email: String,
    /// bcrypt hash
    pub password_hash: String,
    /// Optional profile attributes
    pub attributes: UserAttributes,
}

/// User account database operations manager
pub struct UsersManager {
    pool: SqlitePool,
}

impl UsersManager {
    /// Create a new users manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new account
    ///
    /// # Errors
    ///
    /// Returns `DUPLICATE_IDENTITY` naming the field when the email or username
    /// is already taken, or a database error otherwise
    pub async fn create(&self, user: &NewUser) -> AppResult<User> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let preferences = serde_json::to_string(&user.attributes.dietary_preferences)?;
        let allergies = serde_json::to_string(&user.attributes.allergies)?;

        sqlx::query(
            r"
            INSERT INTO users (
                id, username, email, password_hash, age, weight, height,
                dietary_preferences, allergies, goal, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $11)
            ",
        )
        .bind(id.to_string())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.attributes.age.map(i64::from))
        .bind(user.attributes.weight)
        .bind(user.attributes.height)
        .bind(preferences)
        .bind(allergies)
        .bind(user.attributes.goal.as_str())
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(User {
            id,
            username: user.username.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            attributes: user.attributes.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Get a user by ID
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        self.get_by_column("id", &id.to_string()).await
    }

    /// Get a user by (already lowercased) email
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn get_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.get_by_column("email", email).await
    }

    /// Get a user by username
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn get_by_username(&self, username: &str) -> AppResult<Option<User>> {
        self.get_by_column("username", username).await
    }

    async fn get_by_column(&self, column: &'static str, value: &str) -> AppResult<Option<User>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE {column} = $1"))
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get user by {column}: {e}")))?;

        row.map(|r| row_to_user(&r)).transpose()
    }
}

/// Map a unique constraint violation to the field that collided
fn map_insert_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            let message = db_err.message();
            if message.contains("users.email") {
                return AppError::duplicate_identity("email", "User already exists with this email");
            }
            if message.contains("users.username") {
                return AppError::duplicate_identity("username", "Username already taken");
            }
        }
    }
    AppError::database(format!("Failed to create user: {e}"))
}

/// Convert a database row to a `User`
fn row_to_user(row: &SqliteRow) -> AppResult<User> {
    let id: String = row.get("id");
    let age: Option<i64> = row.get("age");
    let preferences: String = row.get("dietary_preferences");
    let allergies: String = row.get("allergies");
    let goal: String = row.get("goal");
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");

    Ok(User {
        id: parse_uuid(&id)?,
        username: row.get("username"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        attributes: UserAttributes {
            age: age.and_then(|a| u32::try_from(a).ok()),
            weight: row.get("weight"),
            height: row.get("height"),
            dietary_preferences: serde_json::from_str(&preferences)?,
            allergies: serde_json::from_str(&allergies)?,
            goal: Goal::parse_lossy(&goal),
        },
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}
