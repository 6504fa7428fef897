// ABOUTME: Structured logging setup for the server and the seed binary
// ABOUTME: Builds the tracing subscriber from environment and records account events
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Structured logging configuration
//!
//! Variables: `RUST_LOG`, `LOG_FORMAT` (`json`, `pretty`, `compact`),
//! `LOG_INCLUDE_LOCATION`, `LOG_INCLUDE_SPANS`, `SERVICE_NAME`, `ENVIRONMENT`.

use std::env;
use std::io;

use anyhow::Result;
use nutri_core::constants::service::SERVICE_NAME;
use tracing::{info, warn};
use tracing_subscriber::{
    filter::Directive,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};
use uuid::Uuid;

use crate::config::Environment;

/// Dependencies that are chatty at `debug`; capped whatever `RUST_LOG` says
const NOISY_TARGETS: [&str; 5] = [
    "hyper=warn",
    "reqwest=warn",
    "sqlx=warn",
    "sqlx::query=warn",
    "tower_http=info",
];

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per line
    Json,
    /// Multi-field human-readable lines
    #[default]
    Pretty,
    /// Single-line, no target
    Compact,
}

impl LogFormat {
    /// Parse `LOG_FORMAT`; unknown values are pretty
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "json" => Self::Json,
            "compact" => Self::Compact,
            _ => Self::Pretty,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Filter directives, `RUST_LOG` syntax
    pub filter: String,
    /// Output format
    pub format: LogFormat,
    /// Emit file and line
    pub include_location: bool,
    /// Emit span open and close events
    pub include_spans: bool,
    /// Reported service name
    pub service_name: String,
    /// Deployment environment
    pub environment: Environment,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_owned(),
            format: LogFormat::default(),
            include_location: false,
            include_spans: false,
            service_name: SERVICE_NAME.to_owned(),
            environment: Environment::default(),
        }
    }
}

impl LoggingConfig {
    /// Read settings from the process environment
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings from an arbitrary key lookup
    ///
    /// Production always includes source locations.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let environment = lookup("ENVIRONMENT")
            .map(|v| Environment::from_str_or_default(&v))
            .unwrap_or_default();

        Self {
            filter: lookup("RUST_LOG").unwrap_or(defaults.filter),
            format: lookup("LOG_FORMAT").map_or(defaults.format, |v| LogFormat::parse(&v)),
            include_location: environment.is_production()
                || lookup("LOG_INCLUDE_LOCATION").is_some(),
            include_spans: lookup("LOG_INCLUDE_SPANS").is_some(),
            service_name: lookup("SERVICE_NAME").unwrap_or(defaults.service_name),
            environment,
        }
    }

    /// Filter with noise caps appended after the configured directives
    fn env_filter(&self) -> EnvFilter {
        NOISY_TARGETS
            .iter()
            .filter_map(|directive| directive.parse::<Directive>().ok())
            .fold(EnvFilter::new(&self.filter), EnvFilter::add_directive)
    }

    fn output_layer(&self) -> Box<dyn Layer<Registry> + Send + Sync> {
        let span_events = if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };
        let base = fmt::layer()
            .with_writer(io::stdout)
            .with_file(self.include_location)
            .with_line_number(self.include_location)
            .with_span_events(span_events);

        match self.format {
            LogFormat::Json => base.json().with_current_span(true).boxed(),
            LogFormat::Pretty => base.with_target(true).boxed(),
            LogFormat::Compact => base.compact().with_target(false).boxed(),
        }
    }

    /// Install the global subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed
    pub fn init(&self) -> Result<()> {
        tracing_subscriber::registry()
            .with(self.output_layer().with_filter(self.env_filter()))
            .try_init()?;

        info!(
            service.name = %self.service_name,
            service.version = env!("CARGO_PKG_VERSION"),
            environment = %self.environment,
            log.filter = %self.filter,
            log.format = ?self.format,
            "Logging initialized"
        );
        Ok(())
    }
}

/// Install logging configured from the process environment
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init_from_env() -> Result<()> {
    LoggingConfig::from_env().init()
}

/// Account events worth an audit line; never carries secrets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    /// A new account was created
    Registered(Uuid),
    /// Credentials verified
    LoginSucceeded(Uuid),
    /// No account for the submitted email
    LoginUnknownEmail,
    /// Account found, password did not match
    LoginWrongPassword(Uuid),
}

impl AuthEvent {
    const fn name(self) -> &'static str {
        match self {
            Self::Registered(_) => "register",
            Self::LoginSucceeded(_) | Self::LoginUnknownEmail | Self::LoginWrongPassword(_) => {
                "login"
            }
        }
    }

    const fn user_id(self) -> Option<Uuid> {
        match self {
            Self::Registered(id) | Self::LoginSucceeded(id) | Self::LoginWrongPassword(id) => {
                Some(id)
            }
            Self::LoginUnknownEmail => None,
        }
    }

    const fn failure_reason(self) -> Option<&'static str> {
        match self {
            Self::LoginUnknownEmail => Some("unknown email"),
            Self::LoginWrongPassword(_) => Some("wrong password"),
            Self::Registered(_) | Self::LoginSucceeded(_) => None,
        }
    }
}

/// Application-specific logging utilities
pub struct AppLogger;

impl AppLogger {
    /// Audit an account event; failures log at `warn`
    pub fn log_auth_event(event: AuthEvent) {
        let user_id = event.user_id().map_or_else(|| "unknown".to_owned(), |id| id.to_string());
        match event.failure_reason() {
            None => info!(
                user.id = %user_id,
                auth.event = event.name(),
                auth.success = true,
                "Authentication event"
            ),
            Some(reason) => warn!(
                user.id = %user_id,
                auth.event = event.name(),
                auth.success = false,
                auth.reason = reason,
                "Authentication event"
            ),
        }
    }
}
