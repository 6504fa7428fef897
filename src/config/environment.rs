// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, deployment modes, and runtime configuration parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use nutri_core::constants::{auth, database, env_config, ports};
use rand::distributions::Alphanumeric;
use rand::Rng;
use tracing::{info, warn};

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Local development: verbose errors, generated secrets allowed
    #[default]
    Development,
    /// Production: secrets required, internal errors hidden
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            // Default fallback for unrecognized values
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if this is a development environment
    #[must_use]
    pub const fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseUrl {
    /// `SQLite` database file
    SQLite {
        /// File path
        path: PathBuf,
    },
    /// In-memory `SQLite`, lost on shutdown
    Memory,
}

impl DatabaseUrl {
    /// Parse a `sqlite:` URL or a bare file path
    #[must_use]
    pub fn parse_url(s: &str) -> Self {
        let path_str = s.strip_prefix("sqlite://").or_else(|| s.strip_prefix("sqlite:")).unwrap_or(s);
        if path_str == ":memory:" {
            Self::Memory
        } else {
            Self::SQLite {
                path: PathBuf::from(path_str),
            }
        }
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::parse_url(database::DEFAULT_DATABASE_URL)
    }
}

impl fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Credential settings
#[derive(Clone)]
pub struct AuthConfig {
    /// HS256 signing secret
    pub jwt_secret: String,
    /// Whether the secret was generated at startup rather than configured
    pub jwt_secret_generated: bool,
    /// Token lifetime in hours
    pub jwt_expiry_hours: i64,
    /// bcrypt cost factor
    pub bcrypt_cost: u32,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_secret_generated", &self.jwt_secret_generated)
            .field("jwt_expiry_hours", &self.jwt_expiry_hours)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

/// CORS settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsConfig {
    /// Allowed origins; `*` allows any
    pub allowed_origins: Vec<String>,
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Database location
    pub database_url: DatabaseUrl,
    /// Credential settings
    pub auth: AuthConfig,
    /// CORS settings
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// Load configuration from the process environment, reading `.env` first if present
    ///
    /// # Errors
    ///
    /// Returns an error if a value is malformed or a production secret is missing
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        if let Err(e) = dotenvy::dotenv() {
            info!("No .env file loaded: {}", e);
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// # Errors
    ///
    /// Returns an error if a value is malformed or a production secret is missing
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup(env_config::ENVIRONMENT)
            .map(|v| Environment::from_str_or_default(&v))
            .unwrap_or_default();

        let http_port = match lookup(env_config::PORT).or_else(|| lookup(env_config::HTTP_PORT)) {
            Some(value) => parse_value(env_config::PORT, &value)?,
            None => ports::DEFAULT_HTTP_PORT,
        };

        let database_url = lookup(env_config::DATABASE_URL)
            .map_or_else(DatabaseUrl::default, |v| DatabaseUrl::parse_url(&v));

        let (jwt_secret, jwt_secret_generated) = match lookup(env_config::JWT_SECRET) {
            Some(secret) if !secret.trim().is_empty() => (secret, false),
            _ if environment.is_production() => {
                return Err(anyhow!(
                    "{} must be set in production",
                    env_config::JWT_SECRET
                ));
            }
            _ => (generate_jwt_secret(), true),
        };

        let jwt_expiry_hours: i64 = match lookup(env_config::JWT_EXPIRY_HOURS) {
            Some(value) => parse_value(env_config::JWT_EXPIRY_HOURS, &value)?,
            None => auth::DEFAULT_JWT_EXPIRY_HOURS,
        };
        if jwt_expiry_hours <= 0 {
            return Err(anyhow!(
                "{} must be positive, got {jwt_expiry_hours}",
                env_config::JWT_EXPIRY_HOURS
            ));
        }

        let bcrypt_cost: u32 = match lookup(env_config::BCRYPT_COST) {
            Some(value) => parse_value(env_config::BCRYPT_COST, &value)?,
            None => auth::DEFAULT_BCRYPT_COST,
        };
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(anyhow!(
                "{} must be between 4 and 31, got {bcrypt_cost}",
                env_config::BCRYPT_COST
            ));
        }

        let allowed_origins = parse_origins(
            &lookup(env_config::CORS_ALLOWED_ORIGINS).unwrap_or_else(|| "*".to_owned()),
        );

        let config = Self {
            http_port,
            environment,
            database_url,
            auth: AuthConfig {
                jwt_secret,
                jwt_secret_generated,
                jwt_expiry_hours,
                bcrypt_cost,
            },
            cors: CorsConfig { allowed_origins },
        };

        if config.auth.jwt_secret_generated {
            warn!(
                "{} not set, generated a random secret; tokens will not survive a restart",
                env_config::JWT_SECRET
            );
        }

        Ok(config)
    }

    /// Secret-free configuration summary for startup logs
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Nutri-AI Configuration:\n\
             - HTTP Port: {}\n\
             - Environment: {}\n\
             - Database: {}\n\
             - JWT Secret: {}\n\
             - JWT Expiry: {}h\n\
             - bcrypt Cost: {}\n\
             - CORS Origins: {}",
            self.http_port,
            self.environment,
            self.database_url,
            if self.auth.jwt_secret_generated {
                "generated"
            } else {
                "configured"
            },
            self.auth.jwt_expiry_hours,
            self.auth.bcrypt_cost,
            self.cors.allowed_origins.join(", "),
        )
    }
}

/// Generate a random alphanumeric signing secret
#[must_use]
pub fn generate_jwt_secret() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(auth::GENERATED_SECRET_BYTES)
        .map(char::from)
        .collect()
}

fn parse_value<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse()
        .with_context(|| format!("Invalid {key} value: {value}"))
}

/// Parse comma-separated CORS origins
fn parse_origins(origins_str: &str) -> Vec<String> {
    if origins_str.trim() == "*" {
        vec!["*".to_owned()]
    } else {
        origins_str
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ServerConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.http_port, 5000);
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(
            config.database_url,
            DatabaseUrl::SQLite {
                path: PathBuf::from("./data/nutri.db")
            }
        );
        assert_eq!(config.auth.jwt_expiry_hours, 24);
        assert_eq!(config.auth.bcrypt_cost, 12);
        assert!(config.auth.jwt_secret_generated);
        assert_eq!(config.auth.jwt_secret.len(), 64);
        assert_eq!(config.cors.allowed_origins, vec!["*"]);
    }

    #[test]
    fn test_port_aliases() {
        assert_eq!(config_from(&[("HTTP_PORT", "8080")]).unwrap().http_port, 8080);
        assert_eq!(
            config_from(&[("PORT", "9000"), ("HTTP_PORT", "8080")])
                .unwrap()
                .http_port,
            9000
        );
    }

    #[test]
    fn test_invalid_numbers_are_errors() {
        assert!(config_from(&[("PORT", "abc")]).is_err());
        assert!(config_from(&[("BCRYPT_COST", "2")]).is_err());
        assert!(config_from(&[("JWT_EXPIRY_HOURS", "0")]).is_err());
    }

    #[test]
    fn test_production_requires_secret() {
        assert!(config_from(&[("ENVIRONMENT", "production")]).is_err());
        let config =
            config_from(&[("ENVIRONMENT", "production"), ("JWT_SECRET", "s3cret")]).unwrap();
        assert!(!config.auth.jwt_secret_generated);
    }

    #[test]
    fn test_summary_hides_secret() {
        let config = config_from(&[("JWT_SECRET", "very-secret-value")]).unwrap();
        let summary = config.summary();
        assert!(!summary.contains("very-secret-value"));
        assert!(summary.contains("configured"));
        assert!(!format!("{config:?}").contains("very-secret-value"));
    }

    #[test]
    fn test_database_url_parsing() {
        assert!(DatabaseUrl::parse_url("sqlite::memory:").is_memory());
        assert_eq!(
            DatabaseUrl::parse_url("sqlite:./nutri.db").to_connection_string(),
            "sqlite:./nutri.db"
        );
    }

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins("http://a.test, http://b.test ,"),
            vec!["http://a.test", "http://b.test"]
        );
    }
}
