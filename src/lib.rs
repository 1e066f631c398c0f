// ABOUTME: Main library entry point for the studio training management API
// ABOUTME: Provides a REST API for clients, sessions, measurements, assessments and photos
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Studio Server Contributors

#![deny(unsafe_code)]

//! # Studio Server
//!
//! A REST API for running a personal-training studio: trainers manage their
//! client roster, schedule sessions against prepaid packages, record body
//! measurements, run fitness assessments, and track progress photos.
//!
//! ## Architecture
//!
//! The server follows a modular architecture:
//! - **Models**: Domain data structures (trainers, clients, sessions, ...)
//! - **Analytics**: Pure aggregation functions (package counters, assessment
//!   scoring, dashboard bucketing) recomputed from record lists on each call
//! - **Database**: SQLite persistence via `sqlx`
//! - **Routes**: Axum HTTP handlers, one module per resource
//! - **Auth**: JWT token issuing and validation for trainer accounts
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use studio_server::config::environment::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Studio server configured with port: HTTP={}", config.http_port);
//!     Ok(())
//! }
//! ```

// ── Public API ──────────────────────────────────────────────────────────
// These modules are used by the server binary (src/bin/) and integration
// tests (tests/). They must remain `pub` so external consumers can access them.

/// Pure aggregation logic: package counters, assessment scoring, dashboard views
pub mod analytics;

/// JWT authentication and password hashing
pub mod auth;

/// Configuration management
pub mod config;

/// Application constants and configuration values
pub mod constants;

/// SQLite persistence layer
pub mod database;

/// Unified error handling
pub mod errors;

/// Logging configuration and structured logging setup
pub mod logging;

/// HTTP middleware (CORS)
pub mod middleware;

/// Domain data models
pub mod models;

/// HTTP REST route handlers
pub mod routes;

/// Server state and HTTP serving
pub mod server;

/// Local-disk photo storage
pub mod storage;
