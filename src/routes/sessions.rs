// ABOUTME: Training session route handlers: booking, status changes, filtered listings
// ABOUTME: Sessions are always scoped to clients owned by the authenticated trainer
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Studio Server Contributors

//! Training session routes
//!
//! Session status is a plain tag: any status may move to any other. The
//! dedicated status endpoint exists so the booking list can flip a session
//! between states without resending the whole record.

use crate::constants::defaults;
use crate::database::SessionFilter;
use crate::errors::AppError;
use crate::models::{Session, SessionStatus};
use crate::routes::{authenticate, parse_uuid};
use crate::server::ServerResources;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

/// Request body for booking a session
#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    pub client_id: String,
    pub scheduled_at: DateTime<Utc>,
    #[serde(default)]
    pub duration_minutes: Option<i32>,
    #[serde(default)]
    pub notes: String,
}

/// Request body for updating a session; absent fields are left unchanged
#[derive(Debug, Deserialize)]
pub struct UpdateSessionRequest {
    pub scheduled_at: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i32>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

/// Request body for the status-only update endpoint
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Query parameters accepted by the session listing
#[derive(Debug, Default, Deserialize)]
pub struct SessionListQuery {
    pub client_id: Option<String>,
    pub status: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

/// Session route handlers
pub struct SessionRoutes;

impl SessionRoutes {
    /// Create all session routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/sessions", get(Self::handle_list))
            .route("/sessions", post(Self::handle_create))
            .route("/sessions/:id", get(Self::handle_get))
            .route("/sessions/:id", put(Self::handle_update))
            .route("/sessions/:id", delete(Self::handle_delete))
            .route("/sessions/:id/status", patch(Self::handle_update_status))
            .with_state(resources)
    }

    /// List sessions with optional client/status/date filters
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<SessionListQuery>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;

        let filter = SessionFilter {
            client_id: query
                .client_id
                .as_deref()
                .map(|raw| parse_uuid(raw, "client"))
                .transpose()?,
            status: query
                .status
                .as_deref()
                .map(SessionStatus::from_str)
                .transpose()?,
            from: query.from,
            to: query.to,
        };

        let sessions = resources
            .database
            .list_sessions(auth.trainer_id, &filter)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        Ok((StatusCode::OK, Json(sessions)).into_response())
    }

    /// Book a session for a client
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<CreateSessionRequest>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let client_id = parse_uuid(&request.client_id, "client")?;

        // Verify the client exists and belongs to this trainer
        resources
            .database
            .get_client(client_id, auth.trainer_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::not_found("Client"))?;

        let duration = match request.duration_minutes {
            Some(minutes) if minutes <= 0 => {
                return Err(AppError::invalid_field(
                    "duration_minutes",
                    "must be positive",
                ));
            }
            Some(minutes) => minutes,
            None => defaults::SESSION_DURATION_MINUTES,
        };

        let mut session = Session::new(client_id, request.scheduled_at, duration);
        session.notes = request.notes;

        resources
            .database
            .create_session(&session)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        info!(session_id = %session.id, client_id = %client_id, "Session booked");

        Ok((StatusCode::CREATED, Json(session)).into_response())
    }

    /// Fetch a session by ID
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let id = parse_uuid(&id, "session")?;

        let session = resources
            .database
            .get_session(id, auth.trainer_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::not_found("Session"))?;

        Ok((StatusCode::OK, Json(session)).into_response())
    }

    /// Update a session, applying only the provided fields
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        Json(request): Json<UpdateSessionRequest>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let id = parse_uuid(&id, "session")?;

        let mut session = resources
            .database
            .get_session(id, auth.trainer_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::not_found("Session"))?;

        if let Some(scheduled_at) = request.scheduled_at {
            session.scheduled_at = scheduled_at;
        }
        if let Some(duration_minutes) = request.duration_minutes {
            if duration_minutes <= 0 {
                return Err(AppError::invalid_field(
                    "duration_minutes",
                    "must be positive",
                ));
            }
            session.duration_minutes = duration_minutes;
        }
        if let Some(status) = request.status.as_deref() {
            session.status = SessionStatus::from_str(status)?;
        }
        if let Some(notes) = request.notes {
            session.notes = notes;
        }
        session.updated_at = Utc::now();

        resources
            .database
            .update_session(&session)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        Ok((StatusCode::OK, Json(session)).into_response())
    }

    /// Update only the status of a session
    async fn handle_update_status(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        Json(request): Json<UpdateStatusRequest>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let id = parse_uuid(&id, "session")?;

        let mut session = resources
            .database
            .get_session(id, auth.trainer_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::not_found("Session"))?;

        session.status = SessionStatus::from_str(&request.status)?;
        session.updated_at = Utc::now();

        resources
            .database
            .update_session(&session)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        info!(session_id = %id, status = %session.status, "Session status updated");

        Ok((StatusCode::OK, Json(session)).into_response())
    }

    /// Delete a session
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let id = parse_uuid(&id, "session")?;

        let deleted = resources
            .database
            .delete_session(id, auth.trainer_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        if !deleted {
            return Err(AppError::not_found("Session"));
        }

        Ok((
            StatusCode::OK,
            Json(serde_json::json!({ "message": "Session deleted successfully" })),
        )
            .into_response())
    }
}
