// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides database, auth, and seeded-record helpers
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Studio Server Contributors
#![allow(dead_code)]

//! Shared test utilities for `studio_server`
//!
//! Common setup functions to reduce duplication across integration tests.
//! Test databases live in a per-test temp directory so pooled connections
//! all see the same file.

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::sync::{Arc, Once};
use studio_server::{
    analytics::dashboard::WeekStart,
    auth::{hash_password, AuthManager},
    config::environment::{
        generate_jwt_secret, AuthConfig, CorsConfig, DashboardConfig, DatabaseConfig, Environment,
        PhotoStorageConfig, ServerConfig,
    },
    database::Database,
    models::{Client, Session, SessionStatus, Trainer},
    server::ServerResources,
    storage::PhotoStore,
};
use tempfile::TempDir;
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Everything a test needs, with temp storage kept alive for the duration
pub struct TestContext {
    pub resources: Arc<ServerResources>,
    _tmp: TempDir,
}

impl TestContext {
    pub fn database(&self) -> &Database {
        &self.resources.database
    }

    pub fn auth(&self) -> &AuthManager {
        &self.resources.auth
    }
}

/// Standard test setup: fresh database and photo store in a temp directory
pub async fn create_test_context() -> Result<TestContext> {
    init_test_logging();

    let tmp = TempDir::new()?;
    let database_url = format!("sqlite:{}", tmp.path().join("test.db").display());
    let database = Database::new(&database_url).await?;

    let photo_root = tmp.path().join("uploads");
    let photos = PhotoStore::new(photo_root.clone());
    photos.init().await?;

    let jwt_secret = generate_jwt_secret();
    let config = ServerConfig {
        http_port: 0,
        environment: Environment::Testing,
        database: DatabaseConfig { url: database_url },
        auth: AuthConfig {
            jwt_secret: jwt_secret.clone(),
            token_expiry_hours: 24,
        },
        cors: CorsConfig {
            allowed_origins: "*".into(),
        },
        photos: PhotoStorageConfig { root: photo_root },
        dashboard: DashboardConfig {
            week_start: WeekStart::Sunday,
        },
    };

    let auth = AuthManager::new(jwt_secret, 24);
    let resources = Arc::new(ServerResources::new(database, auth, config, photos));

    Ok(TestContext {
        resources,
        _tmp: tmp,
    })
}

/// Create a trainer directly in the database and return it with a Bearer value
pub async fn seed_trainer(ctx: &TestContext) -> Result<(Trainer, String)> {
    let trainer = Trainer::new(
        format!("coach-{}@example.com", Uuid::new_v4()),
        hash_password("training-password")?,
        "Test".into(),
        "Coach".into(),
    );
    ctx.database().create_trainer(&trainer).await?;

    let token = ctx.auth().generate_token(&trainer)?;
    Ok((trainer, format!("Bearer {token}")))
}

/// Create a client for a trainer with the given package size
pub async fn seed_client(
    ctx: &TestContext,
    trainer_id: Uuid,
    total_package_size: i32,
) -> Result<Client> {
    let now = Utc::now();
    let client = Client {
        id: Uuid::new_v4(),
        trainer_id,
        first_name: "Alex".into(),
        last_name: "Member".into(),
        phone: String::new(),
        email: String::new(),
        total_package_size,
        package_start_date: None,
        notes: String::new(),
        created_at: now,
        updated_at: now,
    };
    ctx.database().create_client(&client).await?;
    Ok(client)
}

/// Create a session with the given schedule and status
pub async fn seed_session(
    ctx: &TestContext,
    client_id: Uuid,
    scheduled_at: DateTime<Utc>,
    status: SessionStatus,
) -> Result<Session> {
    let mut session = Session::new(client_id, scheduled_at, 60);
    session.status = status;
    ctx.database().create_session(&session).await?;
    Ok(session)
}
