// ABOUTME: Dashboard and calendar route handlers for the trainer's schedule overview
// ABOUTME: Projects the trainer's session list through the dashboard aggregator
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Studio Server Contributors

//! Dashboard routes
//!
//! The dashboard is a pure projection: the trainer's sessions are fetched
//! and bucketed by [`crate::analytics::dashboard`] against the current
//! instant on every request.

use crate::analytics::dashboard::bucket_sessions;
use crate::analytics::package::SessionTotals;
use crate::constants::limits;
use crate::database::SessionFilter;
use crate::errors::AppError;
use crate::models::Session;
use crate::routes::authenticate;
use crate::server::ServerResources;
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Dashboard payload for the trainer's landing view
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    /// Sessions scheduled today, any status, ascending
    pub today_sessions: Vec<Session>,
    /// Size of the trainer's client roster
    pub total_clients: i64,
    /// All sessions ever booked for the trainer's clients
    pub total_sessions: i64,
    /// Per-status counts for the current calendar week
    pub weekly_stats: SessionTotals,
    /// Next scheduled sessions beyond today
    pub upcoming_sessions: Vec<Session>,
}

/// Query parameters for the calendar listing
#[derive(Debug, Default, Deserialize)]
pub struct CalendarQuery {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

/// Calendar payload: sessions in the requested range
#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    pub sessions: Vec<Session>,
}

/// Dashboard route handlers
pub struct DashboardRoutes;

impl DashboardRoutes {
    /// Create all dashboard routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/dashboard", get(Self::handle_dashboard))
            .route("/calendar", get(Self::handle_calendar))
            .with_state(resources)
    }

    /// Build the dashboard view for the authenticated trainer
    async fn handle_dashboard(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;

        let sessions = resources
            .database
            .list_sessions(auth.trainer_id, &SessionFilter::default())
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        let view = bucket_sessions(
            &sessions,
            Utc::now(),
            resources.config.dashboard.week_start,
        );

        let total_clients = resources
            .database
            .count_clients(auth.trainer_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        let total_sessions = resources
            .database
            .count_sessions(auth.trainer_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        let mut upcoming_sessions = view.upcoming;
        upcoming_sessions.truncate(limits::DASHBOARD_UPCOMING_LIMIT);

        let response = DashboardResponse {
            today_sessions: view.today,
            total_clients,
            total_sessions,
            weekly_stats: view.weekly_stats,
            upcoming_sessions,
        };

        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// List sessions in a date range for the calendar view
    async fn handle_calendar(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<CalendarQuery>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;

        let filter = SessionFilter {
            from: query.from,
            to: query.to,
            ..SessionFilter::default()
        };

        let sessions = resources
            .database
            .list_sessions(auth.trainer_id, &filter)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        Ok((StatusCode::OK, Json(CalendarResponse { sessions })).into_response())
    }
}
