// ABOUTME: Body measurement route handlers for timestamped progress snapshots
// ABOUTME: Nested under clients for listing/creation, top-level for item operations
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Studio Server Contributors

//! Body measurement routes
//!
//! Every measurement field is independently optional; partial snapshots are
//! valid and common (a quick weigh-in records only `weight_kg`).

use crate::errors::AppError;
use crate::models::Measurement;
use crate::routes::{authenticate, parse_uuid};
use crate::server::ServerResources;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

/// Request body for recording a measurement
#[derive(Debug, Default, Deserialize)]
pub struct CreateMeasurementRequest {
    pub weight_kg: Option<f64>,
    pub neck_cm: Option<f64>,
    pub shoulder_cm: Option<f64>,
    pub chest_cm: Option<f64>,
    pub waist_cm: Option<f64>,
    pub hip_cm: Option<f64>,
    pub right_arm_cm: Option<f64>,
    pub left_arm_cm: Option<f64>,
    pub right_leg_cm: Option<f64>,
    pub left_leg_cm: Option<f64>,
    #[serde(default)]
    pub notes: String,
    /// Defaults to the current time when omitted
    pub measured_at: Option<DateTime<Utc>>,
}

/// Request body for updating a measurement; absent fields are left unchanged
#[derive(Debug, Default, Deserialize)]
pub struct UpdateMeasurementRequest {
    pub weight_kg: Option<f64>,
    pub neck_cm: Option<f64>,
    pub shoulder_cm: Option<f64>,
    pub chest_cm: Option<f64>,
    pub waist_cm: Option<f64>,
    pub hip_cm: Option<f64>,
    pub right_arm_cm: Option<f64>,
    pub left_arm_cm: Option<f64>,
    pub right_leg_cm: Option<f64>,
    pub left_leg_cm: Option<f64>,
    pub notes: Option<String>,
    pub measured_at: Option<DateTime<Utc>>,
}

/// Measurement route handlers
pub struct MeasurementRoutes;

impl MeasurementRoutes {
    /// Create all measurement routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/clients/:id/measurements", get(Self::handle_list))
            .route("/clients/:id/measurements", post(Self::handle_create))
            .route("/measurements/:id", get(Self::handle_get))
            .route("/measurements/:id", put(Self::handle_update))
            .route("/measurements/:id", delete(Self::handle_delete))
            .with_state(resources)
    }

    /// Verify the client belongs to the trainer
    async fn verify_client(
        resources: &Arc<ServerResources>,
        client_id: Uuid,
        trainer_id: Uuid,
    ) -> Result<(), AppError> {
        resources
            .database
            .get_client(client_id, trainer_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::not_found("Client"))?;
        Ok(())
    }

    /// List a client's measurements, most recent first
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let client_id = parse_uuid(&id, "client")?;
        Self::verify_client(&resources, client_id, auth.trainer_id).await?;

        let measurements = resources
            .database
            .list_measurements(client_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        Ok((StatusCode::OK, Json(measurements)).into_response())
    }

    /// Record a measurement for a client
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        Json(request): Json<CreateMeasurementRequest>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let client_id = parse_uuid(&id, "client")?;
        Self::verify_client(&resources, client_id, auth.trainer_id).await?;

        let measurement = Measurement {
            id: Uuid::new_v4(),
            client_id,
            weight_kg: request.weight_kg,
            neck_cm: request.neck_cm,
            shoulder_cm: request.shoulder_cm,
            chest_cm: request.chest_cm,
            waist_cm: request.waist_cm,
            hip_cm: request.hip_cm,
            right_arm_cm: request.right_arm_cm,
            left_arm_cm: request.left_arm_cm,
            right_leg_cm: request.right_leg_cm,
            left_leg_cm: request.left_leg_cm,
            notes: request.notes,
            measured_at: request.measured_at.unwrap_or_else(Utc::now),
            created_at: Utc::now(),
        };

        resources
            .database
            .create_measurement(&measurement)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        Ok((StatusCode::CREATED, Json(measurement)).into_response())
    }

    /// Fetch a measurement by ID
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let id = parse_uuid(&id, "measurement")?;

        let measurement = resources
            .database
            .get_measurement(id, auth.trainer_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::not_found("Measurement"))?;

        Ok((StatusCode::OK, Json(measurement)).into_response())
    }

    /// Update a measurement, applying only the provided fields
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        Json(request): Json<UpdateMeasurementRequest>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let id = parse_uuid(&id, "measurement")?;

        let mut measurement = resources
            .database
            .get_measurement(id, auth.trainer_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::not_found("Measurement"))?;

        if request.weight_kg.is_some() {
            measurement.weight_kg = request.weight_kg;
        }
        if request.neck_cm.is_some() {
            measurement.neck_cm = request.neck_cm;
        }
        if request.shoulder_cm.is_some() {
            measurement.shoulder_cm = request.shoulder_cm;
        }
        if request.chest_cm.is_some() {
            measurement.chest_cm = request.chest_cm;
        }
        if request.waist_cm.is_some() {
            measurement.waist_cm = request.waist_cm;
        }
        if request.hip_cm.is_some() {
            measurement.hip_cm = request.hip_cm;
        }
        if request.right_arm_cm.is_some() {
            measurement.right_arm_cm = request.right_arm_cm;
        }
        if request.left_arm_cm.is_some() {
            measurement.left_arm_cm = request.left_arm_cm;
        }
        if request.right_leg_cm.is_some() {
            measurement.right_leg_cm = request.right_leg_cm;
        }
        if request.left_leg_cm.is_some() {
            measurement.left_leg_cm = request.left_leg_cm;
        }
        if let Some(notes) = request.notes {
            measurement.notes = notes;
        }
        if let Some(measured_at) = request.measured_at {
            measurement.measured_at = measured_at;
        }

        resources
            .database
            .update_measurement(&measurement)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        Ok((StatusCode::OK, Json(measurement)).into_response())
    }

    /// Delete a measurement
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let id = parse_uuid(&id, "measurement")?;

        let deleted = resources
            .database
            .delete_measurement(id, auth.trainer_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        if !deleted {
            return Err(AppError::not_found("Measurement"));
        }

        Ok((
            StatusCode::OK,
            Json(serde_json::json!({ "message": "Measurement deleted successfully" })),
        )
            .into_response())
    }
}
