// ABOUTME: Trainer authentication route handlers for registration and login
// ABOUTME: Provides REST endpoints for account creation, credential checks and profile lookup
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Studio Server Contributors

//! Authentication routes for trainer accounts
//!
//! Registration and login are public; everything else on the API requires
//! the JWT these endpoints issue.

use crate::auth::{hash_password, verify_password};
use crate::constants::limits;
use crate::errors::AppError;
use crate::models::Trainer;
use crate::routes::authenticate;
use crate::server::ServerResources;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Trainer registration request
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Trainer login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response after successful registration or login
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    /// Bearer token for subsequent requests
    pub token: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
    /// The authenticated trainer (password hash omitted)
    pub trainer: Trainer,
}

/// Authentication route handlers
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/auth/register", post(Self::handle_register))
            .route("/auth/login", post(Self::handle_login))
            .route("/auth/me", get(Self::handle_me))
            .with_state(resources)
    }

    /// Handle trainer registration
    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<RegisterRequest>,
    ) -> Result<Response, AppError> {
        let email = request.email.trim().to_lowercase();
        if !is_valid_email(&email) {
            return Err(AppError::invalid_field("email", "must be a valid email address"));
        }
        if request.password.len() < limits::MIN_PASSWORD_LENGTH {
            return Err(AppError::invalid_field(
                "password",
                format!("must be at least {} characters", limits::MIN_PASSWORD_LENGTH),
            ));
        }
        if request.first_name.trim().is_empty() {
            return Err(AppError::missing_field("first_name"));
        }
        if request.last_name.trim().is_empty() {
            return Err(AppError::missing_field("last_name"));
        }

        if resources
            .database
            .get_trainer_by_email(&email)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .is_some()
        {
            return Err(AppError::already_exists("An account with this email"));
        }

        let password_hash =
            hash_password(&request.password).map_err(|e| AppError::internal(e.to_string()))?;

        let trainer = Trainer::new(
            email,
            password_hash,
            request.first_name.trim().to_owned(),
            request.last_name.trim().to_owned(),
        );

        resources
            .database
            .create_trainer(&trainer)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        info!(trainer_id = %trainer.id, email = %trainer.email, "Trainer registered");

        let token = resources
            .auth
            .generate_token(&trainer)
            .map_err(|e| AppError::internal(e.to_string()))?;

        let response = AuthResponse {
            token,
            expires_in: resources.auth.token_expiry_seconds(),
            trainer,
        };

        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle trainer login
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<LoginRequest>,
    ) -> Result<Response, AppError> {
        let trainer = resources
            .database
            .get_trainer_by_email(&request.email.trim().to_lowercase())
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::auth_invalid("Invalid email or password"))?;

        if !verify_password(&request.password, &trainer.password_hash) {
            return Err(AppError::auth_invalid("Invalid email or password"));
        }

        info!(trainer_id = %trainer.id, "Trainer logged in");

        let token = resources
            .auth
            .generate_token(&trainer)
            .map_err(|e| AppError::internal(e.to_string()))?;

        let response = AuthResponse {
            token,
            expires_in: resources.auth.token_expiry_seconds(),
            trainer,
        };

        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Return the current authenticated trainer
    async fn handle_me(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;

        let trainer = resources
            .database
            .get_trainer_by_id(auth.trainer_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::not_found("Trainer"))?;

        Ok((StatusCode::OK, Json(trainer)).into_response())
    }
}

/// Minimal email shape check: local part, `@`, and a dotted domain
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("coach@example.com"));
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("missing-at.example.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("coach@nodot"));
        assert!(!is_valid_email("coach@.com"));
    }
}
