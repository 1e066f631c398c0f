// ABOUTME: Server binary wiring configuration, logging, database and HTTP serving
// ABOUTME: Production entry point for the studio training management API
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Studio Server Contributors

//! # Studio Server Binary
//!
//! Starts the studio management API: loads configuration from the
//! environment, initializes logging and the database, and serves HTTP.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use studio_server::{
    auth::AuthManager, config::environment::ServerConfig, database::Database, logging,
    server::ServerResources, storage::PhotoStore,
};
use tracing::info;

#[derive(Parser)]
#[command(name = "studio-server")]
#[command(about = "Training studio management API")]
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

    // Load configuration from environment
    let mut config = ServerConfig::from_env()?;

    // Apply command-line overrides
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url {
        config.database.url = database_url;
    }

    // Initialize production logging
    logging::init_from_env()?;

    info!("Starting studio server");
    info!("{}", config.summary());

    // Initialize database (runs migrations)
    let database = Database::new(&config.database.url).await?;
    info!("Database initialized: {}", config.database.url);

    // Initialize photo storage
    let photos = PhotoStore::new(config.photos.root.clone());
    photos.init().await?;

    let auth = AuthManager::new(config.auth.jwt_secret.clone(), config.auth.token_expiry_hours);

    let resources = Arc::new(ServerResources::new(database, auth, config, photos));

    studio_server::server::serve(resources).await
}
