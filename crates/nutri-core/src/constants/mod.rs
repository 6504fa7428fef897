// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for limits, defaults, and recommendation thresholds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single
//! large namespace.

/// Service identity
pub mod service {
    /// Service name used in logs and banners
    pub const SERVICE_NAME: &str = "nutri-ai";
    /// Banner returned by the root endpoint
    pub const ROOT_BANNER: &str = "Nutri-AI API is running!";
}

/// Network ports
pub mod ports {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 5000;
}

/// Storage defaults
pub mod database {
    /// Default SQLite database location
    pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/nutri.db";
}

/// Identity-related constants
pub mod identity {
    /// Legacy placeholder user identifier treated as the guest owner
    pub const DEMO_USER: &str = "demo-user";
}

/// Account validation limits
pub mod limits {
    /// Minimum username length after trimming
    pub const MIN_USERNAME_LENGTH: usize = 3;
    /// Minimum password length
    pub const MIN_PASSWORD_LENGTH: usize = 6;
    /// Minimum age in years
    pub const MIN_AGE: u32 = 1;
    /// Maximum age in years
    pub const MAX_AGE: u32 = 120;
    /// Minimum body weight in kilograms
    pub const MIN_WEIGHT_KG: f64 = 1.0;
    /// Minimum height in centimeters
    pub const MIN_HEIGHT_CM: f64 = 1.0;
    /// Minimum quantity of a meal line item
    pub const MIN_QUANTITY: f64 = 1.0;
    /// Quantity assumed when a line item omits it
    pub const DEFAULT_QUANTITY: f64 = 1.0;
}

/// Credential defaults
pub mod auth {
    /// Default bcrypt cost factor
    pub const DEFAULT_BCRYPT_COST: u32 = 12;
    /// Default token lifetime in hours
    pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;
    /// Generic login failure message, identical for unknown email and wrong password
    pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";
    /// Length of generated development secrets in bytes
    pub const GENERATED_SECRET_BYTES: usize = 64;
}

/// Recommendation selector thresholds
pub mod recommendations {
    /// Maximum entries returned by one selection
    pub const MAX_RECOMMENDATIONS: usize = 5;
    /// Calories above which weight-loss users get a calorie alert
    pub const WEIGHT_LOSS_ALERT_CALORIES: f64 = 2000.0;
    /// Calories below which muscle-gain users get a calorie alert
    pub const MUSCLE_GAIN_ALERT_CALORIES: f64 = 2000.0;
    /// Calories below which the low-intake warning applies
    pub const LOW_INTAKE_CALORIES: f64 = 1200.0;
    /// Calories above which the high-intake warning applies
    pub const HIGH_INTAKE_CALORIES: f64 = 3000.0;
}

/// Environment variable names
pub mod env_config {
    /// HTTP port
    pub const PORT: &str = "PORT";
    /// HTTP port (alternative name)
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// Database URL
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// Deployment environment
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
    /// Token signing secret
    pub const JWT_SECRET: &str = "JWT_SECRET";
    /// Token lifetime in hours
    pub const JWT_EXPIRY_HOURS: &str = "JWT_EXPIRY_HOURS";
    /// bcrypt cost factor
    pub const BCRYPT_COST: &str = "BCRYPT_COST";
    /// Comma-separated CORS origins
    pub const CORS_ALLOWED_ORIGINS: &str = "CORS_ALLOWED_ORIGINS";
}
