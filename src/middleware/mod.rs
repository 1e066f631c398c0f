// ABOUTME: HTTP middleware module organization
// ABOUTME: Currently provides CORS configuration for browser clients
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Studio Server Contributors

//! HTTP middleware

/// CORS configuration
pub mod cors;

pub use cors::setup_cors;
