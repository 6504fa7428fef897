// ABOUTME: HTTP server assembly for the Nutri-AI API
// ABOUTME: Merges domain routers, applies the middleware stack, and serves with graceful shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # HTTP Server
//!
//! Middleware order, outermost first: request id assignment, request span,
//! request id propagation, panic recovery, timeout, CORS.

use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    http::{Method, Uri},
    response::{IntoResponse, Response},
    Router,
};
use nutri_core::errors::AppError;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};
use tracing::{error, info};

use crate::middleware::{create_trace_layer, request_id_header, setup_cors, MakeRequestUuid};
use crate::resources::ServerResources;
use crate::routes::{
    FoodRoutes, HealthRoutes, MealRoutes, NutritionRoutes, RecommendationRoutes, UserRoutes,
};

/// Per-request processing limit
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the complete application router
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let cors = setup_cors(&resources.config.cors);

    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(&resources)))
        .merge(FoodRoutes::routes(Arc::clone(&resources)))
        .merge(MealRoutes::routes(Arc::clone(&resources)))
        .merge(UserRoutes::routes(Arc::clone(&resources)))
        .merge(NutritionRoutes::routes(Arc::clone(&resources)))
        .merge(RecommendationRoutes::routes())
        .method_not_allowed_fallback(handle_not_found)
        .fallback(handle_not_found)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id_header(), MakeRequestUuid))
                .layer(create_trace_layer())
                .layer(PropagateRequestIdLayer::new(request_id_header()))
                .layer(CatchPanicLayer::custom(handle_panic))
                .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
                .layer(cors),
        )
}

/// Unmatched paths and unsupported methods on known paths name the method and path
async fn handle_not_found(method: Method, uri: Uri) -> AppError {
    AppError::route_not_found(method, uri.path())
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    error!(panic = %detail, "Request handler panicked");
    AppError::internal(format!("Handler panicked: {detail}")).into_response()
}

/// Bind and serve until ctrl-c or SIGTERM
///
/// # Errors
///
/// Returns an error if the port cannot be bound or the server fails
pub async fn run(resources: Arc<ServerResources>) -> Result<()> {
    let port = resources.config.http_port;
    let app = build_router(resources);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("HTTP server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
