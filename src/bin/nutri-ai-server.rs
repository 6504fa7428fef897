// ABOUTME: Server binary for the Nutri-AI nutrition tracking API
// ABOUTME: Loads configuration, connects the database, and serves the REST API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Nutri-AI API Server Binary
//!
//! Starts the REST API with user authentication and `SQLite` persistence.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use nutri_ai::{
    config::ServerConfig, database::Database, logging, resources::ServerResources, server,
};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "nutri-ai-server")]
#[command(about = "Nutri-AI - nutrition tracking API with meal logging and recommendations")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(url) = args.database_url.as_deref() {
        config.database_url = nutri_ai::config::DatabaseUrl::parse_url(url);
    }

    nutri_core::errors::set_expose_internal_details(config.environment.is_development());

    info!("Starting Nutri-AI API");
    info!("{}", config.summary());

    let database = Database::new(&config.database_url).await?;
    let resources = Arc::new(ServerResources::new(database, config.clone()));

    display_available_endpoints(&config);

    if let Err(e) = server::run(resources).await {
        error!("Server error: {e:#}");
        return Err(e);
    }

    Ok(())
}

/// Log every route with its full URL
#[allow(clippy::cognitive_complexity)]
fn display_available_endpoints(config: &ServerConfig) {
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
    let port = config.http_port;

    info!("=== Available API Endpoints ===");
    info!("Health:");
    info!("   Banner:            GET    http://{host}:{port}/");
    info!("   Health Check:      GET    http://{host}:{port}/health");
    info!("Foods:");
    info!("   List / Create:     GET    POST http://{host}:{port}/api/foods");
    info!("   Get / Update / Delete: GET PUT DELETE http://{host}:{port}/api/foods/:id");
    info!("Meals:");
    info!("   List / Log:        GET    POST http://{host}:{port}/api/meals");
    info!("   Get / Update / Delete: GET PUT DELETE http://{host}:{port}/api/meals/:id");
    info!("Users:");
    info!("   Register:          POST   http://{host}:{port}/api/users/register");
    info!("   Login:             POST   http://{host}:{port}/api/users/login");
    info!("   Profile:           GET    http://{host}:{port}/api/users/profile");
    info!("Nutrition:");
    info!("   Recommendations:   GET    http://{host}:{port}/api/recommendations");
    info!("   Summary:           GET    http://{host}:{port}/api/nutrition/summary");
    info!("=== End of Endpoint List ===");
}
