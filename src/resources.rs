// ABOUTME: Centralized resource container shared by every route handler
// ABOUTME: Holds the database handle, credential manager, and loaded configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use crate::accounts::AccountManager;
use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::database::Database;

/// Shared server resources, cloned cheaply into each router
#[derive(Clone)]
pub struct ServerResources {
    /// Persistence
    pub database: Arc<Database>,
    /// Credential issuing and password hashing
    pub auth_manager: Arc<AuthManager>,
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Build resources from a connected database and configuration
    #[must_use]
    pub fn new(database: Database, config: ServerConfig) -> Self {
        let auth_manager = AuthManager::from_config(&config.auth);
        Self {
            database: Arc::new(database),
            auth_manager: Arc::new(auth_manager),
            config: Arc::new(config),
        }
    }

    /// Account manager bound to these resources
    #[must_use]
    pub fn accounts(&self) -> AccountManager<'_> {
        AccountManager::new(self.database.users(), &self.auth_manager)
    }
}
