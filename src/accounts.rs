// ABOUTME: Account manager for registration, login, and profile lookup
// ABOUTME: Validates account fields, enforces unique identities, and issues credentials
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::LazyLock;

use nutri_core::constants::{auth::INVALID_CREDENTIALS_MESSAGE, limits};
use nutri_core::errors::{AppError, AppResult, FieldError};
use nutri_core::models::{Goal, PublicUser, User, UserAttributes};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::{AuthManager, Claims};
use crate::database::{NewUser, UsersManager};
use crate::logging::{AppLogger, AuthEvent};

static EMAIL_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,3})+$").ok());

/// Registration request body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Desired username
    pub username: Option<String>,
    /// Email address
    pub email: Option<String>,
    /// Plaintext password, hashed before storage
    pub password: Option<String>,
    /// Age in years
    pub age: Option<i64>,
    /// Weight in kilograms
    pub weight: Option<f64>,
    /// Height in centimeters
    pub height: Option<f64>,
    /// Dietary preference tags
    pub dietary_preferences: Option<Vec<String>>,
    /// Allergy tags
    pub allergies: Option<Vec<String>>,
    /// Nutrition goal
    pub goals: Option<String>,
}

/// Login request body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    /// Email address
    pub email: Option<String>,
    /// Plaintext password
    pub password: Option<String>,
}

/// Credential plus the public view of the account
#[derive(Debug, Clone, Serialize)]
pub struct AccountSession {
    /// Signed bearer token
    pub token: String,
    /// Account without its password hash
    pub user: PublicUser,
}

/// Registers and authenticates users
pub struct AccountManager<'a> {
    users: UsersManager,
    auth: &'a AuthManager,
}

impl<'a> AccountManager<'a> {
    /// Create an account manager over the user store
    #[must_use]
    pub const fn new(users: UsersManager, auth: &'a AuthManager) -> Self {
        Self { users, auth }
    }

    /// Register a new account and issue its first credential
    ///
    /// # Errors
    ///
    /// Returns a validation error listing every bad field, or
    /// `DUPLICATE_IDENTITY` naming the email or username that is taken
    pub async fn register(&self, request: &RegisterRequest) -> AppResult<AccountSession> {
        let candidate = validate_registration(request)?;

        if self.users.get_by_email(&candidate.email).await?.is_some() {
            return Err(AppError::duplicate_identity(
                "email",
                "User already exists with this email",
            ));
        }
        if self
            .users
            .get_by_username(&candidate.username)
            .await?
            .is_some()
        {
            return Err(AppError::duplicate_identity(
                "username",
                "Username already taken",
            ));
        }

        let password = request.password.as_deref().unwrap_or_default();
        let new_user = NewUser {
            password_hash: self.auth.hash_password(password).await?,
            ..candidate
        };
        let user = self.users.create(&new_user).await?;

        AppLogger::log_auth_event(AuthEvent::Registered(user.id));
        info!(user_id = %user.id, username = %user.username, "User registered");

        self.session_for(&user)
    }

    /// Verify email and password and issue a credential
    ///
    /// # Errors
    ///
    /// Returns 400 when either field is missing, and the same 401 for an
    /// unknown email and a wrong password
    pub async fn authenticate(&self, request: &LoginRequest) -> AppResult<AccountSession> {
        let (Some(email), Some(password)) = (
            request.email.as_deref().map(str::trim).filter(|e| !e.is_empty()),
            request.password.as_deref().filter(|p| !p.is_empty()),
        ) else {
            return Err(AppError::invalid_input("Email and password are required"));
        };
        let email = email.to_lowercase();

        let Some(user) = self.users.get_by_email(&email).await? else {
            AppLogger::log_auth_event(AuthEvent::LoginUnknownEmail);
            return Err(AppError::auth_invalid(INVALID_CREDENTIALS_MESSAGE));
        };

        if !self
            .auth
            .verify_password(password, &user.password_hash)
            .await?
        {
            AppLogger::log_auth_event(AuthEvent::LoginWrongPassword(user.id));
            return Err(AppError::auth_invalid(INVALID_CREDENTIALS_MESSAGE));
        }

        AppLogger::log_auth_event(AuthEvent::LoginSucceeded(user.id));
        self.session_for(&user)
    }

    /// Load the account a validated credential refers to
    ///
    /// # Errors
    ///
    /// Returns `AUTH_INVALID` when the account no longer exists
    pub async fn profile(&self, claims: &Claims) -> AppResult<PublicUser> {
        let user_id: Uuid = claims.user_id()?;
        let user = self
            .users
            .get_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::auth_invalid("User not found"))?;
        Ok(PublicUser::from(&user))
    }

    fn session_for(&self, user: &User) -> AppResult<AccountSession> {
        Ok(AccountSession {
            token: self.auth.generate_token(user)?,
            user: PublicUser::from(user),
        })
    }
}

/// Check a registration request, collecting every field error
///
/// The returned account has an empty password hash.
fn validate_registration(request: &RegisterRequest) -> AppResult<NewUser> {
    let mut errors = Vec::new();

    let username = request.username.as_deref().unwrap_or_default().trim();
    if username.chars().count() < limits::MIN_USERNAME_LENGTH {
        errors.push(FieldError::new(
            "username",
            "Username must be at least 3 characters long",
        ));
    }

    let email = request
        .email
        .as_deref()
        .unwrap_or_default()
        .trim()
        .to_lowercase();
    if !is_valid_email(&email) {
        errors.push(FieldError::new("email", "Please enter a valid email"));
    }

    let password = request.password.as_deref().unwrap_or_default();
    if password.chars().count() < limits::MIN_PASSWORD_LENGTH {
        errors.push(FieldError::new(
            "password",
            "Password must be at least 6 characters long",
        ));
    }

    let age = match request.age {
        Some(age) if age < i64::from(limits::MIN_AGE) => {
            errors.push(FieldError::new("age", "Age must be at least 1"));
            None
        }
        Some(age) if age > i64::from(limits::MAX_AGE) => {
            errors.push(FieldError::new("age", "Age must be less than 120"));
            None
        }
        Some(age) => u32::try_from(age).ok(),
        None => None,
    };

    if request
        .weight
        .is_some_and(|w| !w.is_finite() || w < limits::MIN_WEIGHT_KG)
    {
        errors.push(FieldError::new("weight", "Weight must be at least 1kg"));
    }
    if request
        .height
        .is_some_and(|h| !h.is_finite() || h < limits::MIN_HEIGHT_CM)
    {
        errors.push(FieldError::new("height", "Height must be at least 1cm"));
    }

    let goal = match request.goals.as_deref() {
        None | Some("") => Goal::default(),
        Some(raw) => Goal::try_parse(raw).unwrap_or_else(|| {
            errors.push(FieldError::new(
                "goals",
                "Goals must be one of: weight_loss, muscle_gain, maintenance, improve_health",
            ));
            Goal::default()
        }),
    };

    if !errors.is_empty() {
        return Err(AppError::validation(errors));
    }

    Ok(NewUser {
        username: username.to_owned(),
        email,
        password_hash: String::new(),
        attributes: UserAttributes {
            age,
            weight: request.weight,
            height: request.height,
            dietary_preferences: tag_set(request.dietary_preferences.as_deref()),
            allergies: tag_set(request.allergies.as_deref()),
            goal,
        },
    })
}

fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(email))
}

/// Trimmed, non-empty tags with duplicates removed, first occurrence kept
fn tag_set(tags: Option<&[String]>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for tag in tags.unwrap_or_default() {
        let tag = tag.trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_owned());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use nutri_core::errors::ErrorCode;

    fn request(username: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: Some(username.to_owned()),
            email: Some(email.to_owned()),
            password: Some(password.to_owned()),
            ..RegisterRequest::default()
        }
    }

    #[test]
    fn test_valid_registration_normalizes_identity() {
        let user = validate_registration(&request("  alice ", " Alice@Example.COM ", "secret1"))
            .unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.attributes.goal, Goal::Maintenance);
    }

    #[test]
    fn test_all_field_errors_reported_together() {
        let err = validate_registration(&request("ab", "not-an-email", "123")).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
        let fields = err.details.unwrap()["fields"].as_array().unwrap().len();
        assert_eq!(fields, 3);
    }

    #[test]
    fn test_attribute_ranges() {
        let mut req = request("alice", "alice@example.com", "secret1");
        req.age = Some(121);
        req.weight = Some(0.5);
        req.goals = Some("bulk".to_owned());
        let err = validate_registration(&req).unwrap_err();
        assert!(err.message.contains("Age must be less than 120"));
        assert!(err.message.contains("Weight must be at least 1kg"));
        assert!(err.message.contains("Goals must be one of"));

        req.age = Some(120);
        req.weight = Some(70.0);
        req.goals = Some("Muscle_Gain".to_owned());
        let user = validate_registration(&req).unwrap();
        assert_eq!(user.attributes.age, Some(120));
        assert_eq!(user.attributes.goal, Goal::MuscleGain);
    }

    #[test]
    fn test_tags_are_deduplicated() {
        let tags = vec![
            "vegan".to_owned(),
            " vegan ".to_owned(),
            String::new(),
            "gluten-free".to_owned(),
        ];
        assert_eq!(tag_set(Some(&tags)), vec!["vegan", "gluten-free"]);
    }

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("a.b-c@example.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@example.com"));
    }
}
