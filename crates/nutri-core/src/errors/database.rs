// ABOUTME: Conversion from sqlx errors into AppError
// ABOUTME: Row-not-found becomes a 404, everything else a database error
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::AppError;

impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => Self::not_found("Record"),
            other => Self::database(format!("Database operation failed: {other}")).with_source(other),
        }
    }
}
