// ABOUTME: SQLite database management: connection pool, schema migration, helpers
// ABOUTME: Per-domain query modules hang off the shared Database struct
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Studio Server Contributors

//! # Database Management
//!
//! This module provides database functionality for the studio server.
//! Records are stored in SQLite via `sqlx`; UUIDs are stored as TEXT and
//! timestamps as fixed-width RFC 3339 TEXT so that range filters compare
//! lexicographically.

mod assessments;
mod clients;
mod measurements;
mod photos;
mod sessions;
mod trainers;

pub use sessions::SessionFilter;

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{Pool, Sqlite, SqlitePool};
use std::str::FromStr;

/// Database manager for studio records
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or a
    /// migration fails.
    pub async fn new(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("Invalid database URL: {database_url}"))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePool::connect_with(options).await?;

        let db = Self { pool };

        // Run migrations
        db.migrate().await?;

        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub async fn migrate(&self) -> Result<()> {
        self.migrate_trainers().await?;
        self.migrate_clients().await?;
        self.migrate_sessions().await?;
        self.migrate_measurements().await?;
        self.migrate_assessments().await?;
        self.migrate_photos().await?;
        Ok(())
    }
}

/// Format a timestamp for storage
///
/// Fixed-width RFC 3339 with microsecond precision and a `Z` suffix, so
/// stored values order lexicographically.
#[must_use]
pub fn fmt_ts(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a stored timestamp
///
/// # Errors
///
/// Returns an error if the value is not valid RFC 3339
pub fn parse_ts(raw: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(raw)
        .with_context(|| format!("Invalid stored timestamp: {raw}"))?
        .with_timezone(&Utc))
}
