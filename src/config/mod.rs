// ABOUTME: Configuration module organization
// ABOUTME: Re-exports environment-based server configuration
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Studio Server Contributors

//! Configuration management
//!
//! All configuration is sourced from environment variables; there are no
//! config files.

/// Environment-based server configuration
pub mod environment;

pub use environment::ServerConfig;
