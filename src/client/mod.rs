// ABOUTME: Typed HTTP client for the Nutri-AI REST API used by the terminal presentation layer
// ABOUTME: Wraps every endpoint, carries an optional bearer credential, and decodes error bodies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # API Client
//!
//! [`NutriClient`] talks to a running server; [`loader::DashboardLoader`]
//! builds the dashboard state on top of it.

pub mod loader;

use nutri_core::errors::{ErrorCode, ErrorResponse};
use nutri_core::models::{
    FoodCategory, FoodItem, Goal, Meal, MealOwner, MealType, PublicUser, RecommendationEntry,
    ServingSize,
};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::routes::nutrition::NutritionSummary;

/// Failure talking to the API
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced a response
    #[error("Request to {url} failed: {source}")]
    Transport {
        /// Target URL
        url: String,
        /// Underlying error
        #[source]
        source: reqwest::Error,
    },
    /// The server answered with an error status
    #[error("API error {status}: {message}")]
    Api {
        /// HTTP status
        status: u16,
        /// Error code from the body, when it had one
        code: Option<ErrorCode>,
        /// Error message
        message: String,
    },
    /// A success response had an unexpected body
    #[error("Invalid response body: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ClientError {
    /// HTTP status of an API error
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result alias for client calls
pub type ClientResult<T> = Result<T, ClientError>;

/// Body for creating a catalog entry
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFoodRequest {
    /// Display name
    pub name: String,
    /// Calories per serving
    pub calories: f64,
    /// Protein grams per serving
    pub protein: f64,
    /// Carbohydrate grams per serving
    pub carbs: f64,
    /// Fat grams per serving
    pub fat: f64,
    /// Category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<FoodCategory>,
    /// Serving size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serving_size: Option<ServingSize>,
}

/// One line item of a meal request
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LineItemRequest {
    /// Food id
    pub food: Uuid,
    /// Servings
    pub quantity: f64,
}

/// Body for logging a meal
#[derive(Debug, Clone, Serialize)]
pub struct CreateMealRequest {
    /// Meal name
    pub name: String,
    /// Line items
    pub foods: Vec<LineItemRequest>,
    /// Owner id; omitted for the guest
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Uuid>,
}

/// Body for registering an account
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    /// Username
    pub username: String,
    /// Email
    pub email: String,
    /// Password
    pub password: String,
    /// Age in years
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Weight in kilograms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Height in centimeters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Goal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals: Option<Goal>,
}

/// Credential response of register and login
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    /// Server message
    pub message: String,
    /// Bearer token
    pub token: String,
    /// Account
    pub user: PublicUser,
}

/// Client for the Nutri-AI API
#[derive(Debug, Clone)]
pub struct NutriClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl NutriClient {
    /// Client for the server at `base_url`, e.g. `http://localhost:5000`
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            token: None,
        }
    }

    /// Attach a bearer credential to every request
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Replace the bearer credential
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// Current bearer credential
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn request(&self, method: Method, path: &str) -> (String, RequestBuilder) {
        let url = format!("{}{path}", self.base_url);
        let mut builder = self.http.request(method, &url);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        (url, builder)
    }

    async fn send<T: DeserializeOwned>(&self, url: String, builder: RequestBuilder) -> ClientResult<T> {
        let response = builder
            .send()
            .await
            .map_err(|source| ClientError::Transport { url, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::api_error(status, response).await);
        }
        response.json::<T>().await.map_err(ClientError::Decode)
    }

    async fn api_error(status: StatusCode, response: reqwest::Response) -> ClientError {
        let text = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ErrorResponse>(&text) {
            Ok(body) => ClientError::Api {
                status: status.as_u16(),
                code: Some(body.error.code),
                message: body.error.message,
            },
            Err(_) => ClientError::Api {
                status: status.as_u16(),
                code: None,
                message: if text.is_empty() {
                    status.to_string()
                } else {
                    text
                },
            },
        }
    }

    /// GET /health
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails
    pub async fn health(&self) -> ClientResult<Value> {
        let (url, builder) = self.request(Method::GET, "/health");
        self.send(url, builder).await
    }

    /// GET /api/foods
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails
    pub async fn list_foods(&self) -> ClientResult<Vec<FoodItem>> {
        let (url, builder) = self.request(Method::GET, "/api/foods");
        self.send(url, builder).await
    }

    /// POST /api/foods
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or validation rejects the food
    pub async fn create_food(&self, food: &CreateFoodRequest) -> ClientResult<FoodItem> {
        let (url, builder) = self.request(Method::POST, "/api/foods");
        self.send(url, builder.json(food)).await
    }

    /// GET /api/meals
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails
    pub async fn list_meals(&self, owner: MealOwner) -> ClientResult<Vec<Meal>> {
        let (url, mut builder) = self.request(Method::GET, "/api/meals");
        if let Some(user_id) = owner.user_id() {
            builder = builder.query(&[("userId", user_id.to_string())]);
        }
        self.send(url, builder).await
    }

    /// POST /api/meals
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the meal is rejected
    pub async fn create_meal(&self, meal: &CreateMealRequest) -> ClientResult<Meal> {
        let (url, builder) = self.request(Method::POST, "/api/meals");
        self.send(url, builder.json(meal)).await
    }

    /// DELETE /api/meals/:id
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the meal does not exist
    pub async fn delete_meal(&self, id: Uuid) -> ClientResult<()> {
        let (url, builder) = self.request(Method::DELETE, &format!("/api/meals/{id}"));
        self.send::<Value>(url, builder).await.map(|_| ())
    }

    /// GET /api/recommendations
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails
    pub async fn recommendations(
        &self,
        goal: Goal,
        current_calories: f64,
        meal_type: Option<MealType>,
    ) -> ClientResult<Vec<RecommendationEntry>> {
        let (url, builder) = self.request(Method::GET, "/api/recommendations");
        let builder = builder.query(&[
            ("userGoals", goal.as_str().to_owned()),
            ("currentCalories", current_calories.round().to_string()),
            ("mealType", meal_type.map_or("", |m| m.as_str()).to_owned()),
        ]);
        self.send(url, builder).await
    }

    /// GET /api/nutrition/summary
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails
    pub async fn nutrition_summary(
        &self,
        owner: MealOwner,
        date: Option<chrono::NaiveDate>,
    ) -> ClientResult<NutritionSummary> {
        let (url, mut builder) = self.request(Method::GET, "/api/nutrition/summary");
        if let Some(user_id) = owner.user_id() {
            builder = builder.query(&[("userId", user_id.to_string())]);
        }
        if let Some(date) = date {
            builder = builder.query(&[("date", date.format("%Y-%m-%d").to_string())]);
        }
        self.send(url, builder).await
    }

    /// POST /api/users/register
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or registration is rejected
    pub async fn register(&self, payload: &RegisterPayload) -> ClientResult<AuthSession> {
        let (url, builder) = self.request(Method::POST, "/api/users/register");
        self.send(url, builder.json(payload)).await
    }

    /// POST /api/users/login
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the credentials are wrong
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<AuthSession> {
        let (url, builder) = self.request(Method::POST, "/api/users/login");
        let body = serde_json::json!({ "email": email, "password": password });
        self.send(url, builder.json(&body)).await
    }

    /// GET /api/users/profile
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the credential is rejected
    pub async fn profile(&self) -> ClientResult<PublicUser> {
        let (url, builder) = self.request(Method::GET, "/api/users/profile");
        self.send(url, builder).await
    }
}
