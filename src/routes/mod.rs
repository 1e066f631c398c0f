// ABOUTME: Route module organization for studio server HTTP endpoints
// ABOUTME: Centralized route definitions organized by resource, plus shared auth helpers
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Studio Server Contributors

//! Route modules
//!
//! Each resource gets its own module containing route definitions, its
//! request/response types, and thin handler functions. Handlers
//! authenticate from the `Authorization` header, verify trainer ownership,
//! and delegate derived values to [`crate::analytics`].

/// Fitness assessment routes
pub mod assessments;
/// Trainer registration, login, and profile routes
pub mod auth;
/// Client roster routes
pub mod clients;
/// Dashboard and calendar routes
pub mod dashboard;
/// Health check routes
pub mod health;
/// Body measurement routes
pub mod measurements;
/// Progress photo routes
pub mod photos;
/// Training session routes
pub mod sessions;

pub use assessments::AssessmentRoutes;
pub use auth::AuthRoutes;
pub use clients::ClientRoutes;
pub use dashboard::DashboardRoutes;
pub use health::HealthRoutes;
pub use measurements::MeasurementRoutes;
pub use photos::PhotoRoutes;
pub use sessions::SessionRoutes;

use crate::auth::AuthResult;
use crate::errors::{AppError, AppResult};
use crate::server::ServerResources;
use http::HeaderMap;
use std::sync::Arc;
use uuid::Uuid;

/// Extract and authenticate the trainer from the authorization header
pub(crate) fn authenticate(
    headers: &HeaderMap,
    resources: &Arc<ServerResources>,
) -> AppResult<AuthResult> {
    let auth_header = headers
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(AppError::auth_required)?;

    resources.auth.authenticate_header(auth_header)
}

/// Parse a path UUID, labelling failures with the resource name
pub(crate) fn parse_uuid(raw: &str, what: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::invalid_input(format!("Invalid {what} ID")))
}
