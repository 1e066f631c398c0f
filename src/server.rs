// ABOUTME: Shared server state and HTTP serving entry point
// ABOUTME: Assembles the axum router with middleware and runs the listener loop
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Studio Server Contributors

//! Server state and HTTP serving
//!
//! [`ServerResources`] bundles the shared dependencies (database, auth,
//! config, photo store) handed to every route module as axum state.

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::database::Database;
use crate::middleware::setup_cors;
use crate::routes::{
    AssessmentRoutes, AuthRoutes, ClientRoutes, DashboardRoutes, HealthRoutes, MeasurementRoutes,
    PhotoRoutes, SessionRoutes,
};
use crate::storage::{self, PhotoStore};
use anyhow::{Context, Result};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared dependencies for route handlers
pub struct ServerResources {
    /// Database connection pool
    pub database: Database,
    /// JWT authentication manager
    pub auth: AuthManager,
    /// Server configuration
    pub config: ServerConfig,
    /// Photo storage backend
    pub photos: PhotoStore,
}

impl ServerResources {
    /// Bundle server dependencies
    #[must_use]
    pub const fn new(
        database: Database,
        auth: AuthManager,
        config: ServerConfig,
        photos: PhotoStore,
    ) -> Self {
        Self {
            database,
            auth,
            config,
            photos,
        }
    }
}

/// Build the complete application router
#[must_use]
pub fn router(resources: Arc<ServerResources>) -> Router {
    let api = Router::new()
        .merge(AuthRoutes::routes(resources.clone()))
        .merge(ClientRoutes::routes(resources.clone()))
        .merge(SessionRoutes::routes(resources.clone()))
        .merge(MeasurementRoutes::routes(resources.clone()))
        .merge(AssessmentRoutes::routes(resources.clone()))
        .merge(PhotoRoutes::routes(resources.clone()))
        .merge(DashboardRoutes::routes(resources.clone()));

    Router::new()
        .merge(HealthRoutes::routes())
        .nest("/api/v1", api)
        .nest_service(
            storage::PUBLIC_PREFIX,
            ServeDir::new(resources.photos.root()),
        )
        .layer(TraceLayer::new_for_http())
        .layer(setup_cors(&resources.config))
}

/// Run the HTTP server until shutdown
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server loop fails
pub async fn serve(resources: Arc<ServerResources>) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], resources.config.http_port));
    let app = router(resources);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .await
        .context("HTTP server terminated unexpectedly")
}
