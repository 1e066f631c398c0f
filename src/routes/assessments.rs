// ABOUTME: Fitness assessment route handlers: PARQ screening and movement ratings
// ABOUTME: One assessment per client; responses embed the derived posture score
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Studio Server Contributors

//! Fitness assessment routes
//!
//! Raw integer ratings are converted to [`crate::models::Rating`] at this
//! boundary; out-of-range values are rejected with a validation error
//! naming the offending field before anything is stored or scored.

use crate::analytics::assessment::{summarize_assessment, AssessmentSummary};
use crate::errors::AppError;
use crate::models::{Assessment, Rating};
use crate::routes::{authenticate, parse_uuid};
use crate::server::ServerResources;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

/// Request body for creating or replacing an assessment
///
/// Ratings arrive as raw integers and are validated field by field.
#[derive(Debug, Deserialize)]
pub struct AssessmentRequest {
    // PARQ screening (true = yes)
    #[serde(default)]
    pub parq_heart_problem: bool,
    #[serde(default)]
    pub parq_chest_pain: bool,
    #[serde(default)]
    pub parq_dizziness: bool,
    #[serde(default)]
    pub parq_chronic_condition: bool,
    #[serde(default)]
    pub parq_medication: bool,
    #[serde(default)]
    pub parq_bone_joint: bool,
    #[serde(default)]
    pub parq_supervision: bool,

    // Posture analysis
    pub posture_head_neck: i64,
    pub posture_shoulders: i64,
    pub posture_lphc: i64,
    pub posture_knee: i64,
    pub posture_foot: i64,

    // Push-up screen
    pub pushup_form: i64,
    pub pushup_scapular: i64,
    pub pushup_lordosis: i64,
    pub pushup_head_pos: i64,

    // Overhead squat screen
    pub squat_feet_out: i64,
    pub squat_knees_in: i64,
    pub squat_lower_back: i64,
    pub squat_arms_forward: i64,
    pub squat_lean_forward: i64,

    // Single-leg balance screen
    pub balance_correct: i64,
    pub balance_knee_in: i64,
    pub balance_hip_rise: i64,

    // Shoulder mobility screen
    pub shoulder_retraction: i64,
    pub shoulder_protraction: i64,
    pub shoulder_elevation: i64,
    pub shoulder_depression: i64,

    #[serde(default)]
    pub notes: String,
}

impl AssessmentRequest {
    /// Validate ratings and build the domain record
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first field outside {1, 2, 3}
    fn into_assessment(self, id: Uuid, client_id: Uuid) -> Result<Assessment, AppError> {
        let rating = Rating::try_from_field;
        let now = Utc::now();

        Ok(Assessment {
            id,
            client_id,
            parq_heart_problem: self.parq_heart_problem,
            parq_chest_pain: self.parq_chest_pain,
            parq_dizziness: self.parq_dizziness,
            parq_chronic_condition: self.parq_chronic_condition,
            parq_medication: self.parq_medication,
            parq_bone_joint: self.parq_bone_joint,
            parq_supervision: self.parq_supervision,
            posture_head_neck: rating(self.posture_head_neck, "posture_head_neck")?,
            posture_shoulders: rating(self.posture_shoulders, "posture_shoulders")?,
            posture_lphc: rating(self.posture_lphc, "posture_lphc")?,
            posture_knee: rating(self.posture_knee, "posture_knee")?,
            posture_foot: rating(self.posture_foot, "posture_foot")?,
            pushup_form: rating(self.pushup_form, "pushup_form")?,
            pushup_scapular: rating(self.pushup_scapular, "pushup_scapular")?,
            pushup_lordosis: rating(self.pushup_lordosis, "pushup_lordosis")?,
            pushup_head_pos: rating(self.pushup_head_pos, "pushup_head_pos")?,
            squat_feet_out: rating(self.squat_feet_out, "squat_feet_out")?,
            squat_knees_in: rating(self.squat_knees_in, "squat_knees_in")?,
            squat_lower_back: rating(self.squat_lower_back, "squat_lower_back")?,
            squat_arms_forward: rating(self.squat_arms_forward, "squat_arms_forward")?,
            squat_lean_forward: rating(self.squat_lean_forward, "squat_lean_forward")?,
            balance_correct: rating(self.balance_correct, "balance_correct")?,
            balance_knee_in: rating(self.balance_knee_in, "balance_knee_in")?,
            balance_hip_rise: rating(self.balance_hip_rise, "balance_hip_rise")?,
            shoulder_retraction: rating(self.shoulder_retraction, "shoulder_retraction")?,
            shoulder_protraction: rating(self.shoulder_protraction, "shoulder_protraction")?,
            shoulder_elevation: rating(self.shoulder_elevation, "shoulder_elevation")?,
            shoulder_depression: rating(self.shoulder_depression, "shoulder_depression")?,
            notes: self.notes,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Assessment read model: the stored record plus its derived summary
///
/// Only the posture category carries an aggregate; the other categories are
/// returned as recorded, ungraded.
#[derive(Debug, Serialize)]
pub struct AssessmentResponse {
    #[serde(flatten)]
    pub assessment: Assessment,
    #[serde(flatten)]
    pub summary: AssessmentSummary,
}

impl AssessmentResponse {
    fn new(assessment: Assessment) -> Self {
        let summary = summarize_assessment(&assessment);
        Self {
            assessment,
            summary,
        }
    }
}

/// Assessment route handlers
pub struct AssessmentRoutes;

impl AssessmentRoutes {
    /// Create all assessment routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/clients/:id/assessment", get(Self::handle_get))
            .route("/clients/:id/assessment", post(Self::handle_create))
            .route("/clients/:id/assessment", put(Self::handle_update))
            .route("/clients/:id/assessment", delete(Self::handle_delete))
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

    /// Fetch a client's assessment with its derived summary
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let client_id = parse_uuid(&id, "client")?;
        Self::verify_client(&resources, client_id, auth.trainer_id).await?;

        let assessment = resources
            .database
            .get_assessment_by_client(client_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::not_found("Assessment"))?;

        Ok((StatusCode::OK, Json(AssessmentResponse::new(assessment))).into_response())
    }

    /// Record a client's assessment; conflicts when one already exists
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        Json(request): Json<AssessmentRequest>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let client_id = parse_uuid(&id, "client")?;
        Self::verify_client(&resources, client_id, auth.trainer_id).await?;

        if resources
            .database
            .get_assessment_by_client(client_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .is_some()
        {
            return Err(AppError::already_exists("An assessment for this client"));
        }

        let assessment = request.into_assessment(Uuid::new_v4(), client_id)?;

        let summary = summarize_assessment(&assessment);
        if summary.requires_attention {
            warn!(
                client_id = %client_id,
                "PARQ screening flagged; medical clearance recommended before testing"
            );
        }

        resources
            .database
            .create_assessment(&assessment)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        Ok((StatusCode::CREATED, Json(AssessmentResponse::new(assessment))).into_response())
    }

    /// Replace a client's assessment
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        Json(request): Json<AssessmentRequest>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let client_id = parse_uuid(&id, "client")?;
        Self::verify_client(&resources, client_id, auth.trainer_id).await?;

        let existing = resources
            .database
            .get_assessment_by_client(client_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::not_found("Assessment"))?;

        let mut assessment = request.into_assessment(existing.id, client_id)?;
        assessment.created_at = existing.created_at;

        resources
            .database
            .update_assessment(&assessment)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        Ok((StatusCode::OK, Json(AssessmentResponse::new(assessment))).into_response())
    }

    /// Delete a client's assessment
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let client_id = parse_uuid(&id, "client")?;
        Self::verify_client(&resources, client_id, auth.trainer_id).await?;

        let deleted = resources
            .database
            .delete_assessment_by_client(client_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        if !deleted {
            return Err(AppError::not_found("Assessment"));
        }

        Ok((
            StatusCode::OK,
            Json(serde_json::json!({ "message": "Assessment deleted successfully" })),
        )
            .into_response())
    }
}
