// ABOUTME: Fitness assessment database operations, one assessment per client
// ABOUTME: Stores PARQ answers and the 21 categorical movement-screen ratings
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Studio Server Contributors

use super::{fmt_ts, parse_ts, Database};
use crate::models::{Assessment, Rating};
use anyhow::Result;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create the assessments table
    pub(super) async fn migrate_assessments(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS assessments (
                id TEXT PRIMARY KEY,
                client_id TEXT NOT NULL UNIQUE REFERENCES clients(id) ON DELETE CASCADE,
                parq_heart_problem INTEGER NOT NULL DEFAULT 0,
                parq_chest_pain INTEGER NOT NULL DEFAULT 0,
                parq_dizziness INTEGER NOT NULL DEFAULT 0,
                parq_chronic_condition INTEGER NOT NULL DEFAULT 0,
                parq_medication INTEGER NOT NULL DEFAULT 0,
                parq_bone_joint INTEGER NOT NULL DEFAULT 0,
                parq_supervision INTEGER NOT NULL DEFAULT 0,
                posture_head_neck INTEGER NOT NULL CHECK (posture_head_neck BETWEEN 1 AND 3),
                posture_shoulders INTEGER NOT NULL CHECK (posture_shoulders BETWEEN 1 AND 3),
                posture_lphc INTEGER NOT NULL CHECK (posture_lphc BETWEEN 1 AND 3),
                posture_knee INTEGER NOT NULL CHECK (posture_knee BETWEEN 1 AND 3),
                posture_foot INTEGER NOT NULL CHECK (posture_foot BETWEEN 1 AND 3),
                pushup_form INTEGER NOT NULL CHECK (pushup_form BETWEEN 1 AND 3),
                pushup_scapular INTEGER NOT NULL CHECK (pushup_scapular BETWEEN 1 AND 3),
                pushup_lordosis INTEGER NOT NULL CHECK (pushup_lordosis BETWEEN 1 AND 3),
                pushup_head_pos INTEGER NOT NULL CHECK (pushup_head_pos BETWEEN 1 AND 3),
                squat_feet_out INTEGER NOT NULL CHECK (squat_feet_out BETWEEN 1 AND 3),
                squat_knees_in INTEGER NOT NULL CHECK (squat_knees_in BETWEEN 1 AND 3),
                squat_lower_back INTEGER NOT NULL CHECK (squat_lower_back BETWEEN 1 AND 3),
                squat_arms_forward INTEGER NOT NULL CHECK (squat_arms_forward BETWEEN 1 AND 3),
                squat_lean_forward INTEGER NOT NULL CHECK (squat_lean_forward BETWEEN 1 AND 3),
                balance_correct INTEGER NOT NULL CHECK (balance_correct BETWEEN 1 AND 3),
                balance_knee_in INTEGER NOT NULL CHECK (balance_knee_in BETWEEN 1 AND 3),
                balance_hip_rise INTEGER NOT NULL CHECK (balance_hip_rise BETWEEN 1 AND 3),
                shoulder_retraction INTEGER NOT NULL CHECK (shoulder_retraction BETWEEN 1 AND 3),
                shoulder_protraction INTEGER NOT NULL CHECK (shoulder_protraction BETWEEN 1 AND 3),
                shoulder_elevation INTEGER NOT NULL CHECK (shoulder_elevation BETWEEN 1 AND 3),
                shoulder_depression INTEGER NOT NULL CHECK (shoulder_depression BETWEEN 1 AND 3),
                notes TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Create an assessment
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (including when the client
    /// already has an assessment)
    pub async fn create_assessment(&self, assessment: &Assessment) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO assessments (
                id, client_id,
                parq_heart_problem, parq_chest_pain, parq_dizziness, parq_chronic_condition,
                parq_medication, parq_bone_joint, parq_supervision,
                posture_head_neck, posture_shoulders, posture_lphc, posture_knee, posture_foot,
                pushup_form, pushup_scapular, pushup_lordosis, pushup_head_pos,
                squat_feet_out, squat_knees_in, squat_lower_back, squat_arms_forward, squat_lean_forward,
                balance_correct, balance_knee_in, balance_hip_rise,
                shoulder_retraction, shoulder_protraction, shoulder_elevation, shoulder_depression,
                notes, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(assessment.id.to_string())
        .bind(assessment.client_id.to_string())
        .bind(assessment.parq_heart_problem)
        .bind(assessment.parq_chest_pain)
        .bind(assessment.parq_dizziness)
        .bind(assessment.parq_chronic_condition)
        .bind(assessment.parq_medication)
        .bind(assessment.parq_bone_joint)
        .bind(assessment.parq_supervision)
        .bind(i64::from(assessment.posture_head_neck.as_u8()))
        .bind(i64::from(assessment.posture_shoulders.as_u8()))
        .bind(i64::from(assessment.posture_lphc.as_u8()))
        .bind(i64::from(assessment.posture_knee.as_u8()))
        .bind(i64::from(assessment.posture_foot.as_u8()))
        .bind(i64::from(assessment.pushup_form.as_u8()))
        .bind(i64::from(assessment.pushup_scapular.as_u8()))
        .bind(i64::from(assessment.pushup_lordosis.as_u8()))
        .bind(i64::from(assessment.pushup_head_pos.as_u8()))
        .bind(i64::from(assessment.squat_feet_out.as_u8()))
        .bind(i64::from(assessment.squat_knees_in.as_u8()))
        .bind(i64::from(assessment.squat_lower_back.as_u8()))
        .bind(i64::from(assessment.squat_arms_forward.as_u8()))
        .bind(i64::from(assessment.squat_lean_forward.as_u8()))
        .bind(i64::from(assessment.balance_correct.as_u8()))
        .bind(i64::from(assessment.balance_knee_in.as_u8()))
        .bind(i64::from(assessment.balance_hip_rise.as_u8()))
        .bind(i64::from(assessment.shoulder_retraction.as_u8()))
        .bind(i64::from(assessment.shoulder_protraction.as_u8()))
        .bind(i64::from(assessment.shoulder_elevation.as_u8()))
        .bind(i64::from(assessment.shoulder_depression.as_u8()))
        .bind(&assessment.notes)
        .bind(fmt_ts(assessment.created_at))
        .bind(fmt_ts(assessment.updated_at))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Fetch the assessment recorded for a client, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_assessment_by_client(&self, client_id: Uuid) -> Result<Option<Assessment>> {
        let row = sqlx::query("SELECT * FROM assessments WHERE client_id = ?")
            .bind(client_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(row_to_assessment(&row)?)),
            None => Ok(None),
        }
    }

    /// Update an assessment record
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_assessment(&self, assessment: &Assessment) -> Result<()> {
        sqlx::query(
            r"
            UPDATE assessments SET
                parq_heart_problem = ?, parq_chest_pain = ?, parq_dizziness = ?,
                parq_chronic_condition = ?, parq_medication = ?, parq_bone_joint = ?,
                parq_supervision = ?,
                posture_head_neck = ?, posture_shoulders = ?, posture_lphc = ?,
                posture_knee = ?, posture_foot = ?,
                pushup_form = ?, pushup_scapular = ?, pushup_lordosis = ?, pushup_head_pos = ?,
                squat_feet_out = ?, squat_knees_in = ?, squat_lower_back = ?,
                squat_arms_forward = ?, squat_lean_forward = ?,
                balance_correct = ?, balance_knee_in = ?, balance_hip_rise = ?,
                shoulder_retraction = ?, shoulder_protraction = ?, shoulder_elevation = ?,
                shoulder_depression = ?,
                notes = ?, updated_at = ?
            WHERE id = ?
            ",
        )
        .bind(assessment.parq_heart_problem)
        .bind(assessment.parq_chest_pain)
        .bind(assessment.parq_dizziness)
        .bind(assessment.parq_chronic_condition)
        .bind(assessment.parq_medication)
        .bind(assessment.parq_bone_joint)
        .bind(assessment.parq_supervision)
        .bind(i64::from(assessment.posture_head_neck.as_u8()))
        .bind(i64::from(assessment.posture_shoulders.as_u8()))
        .bind(i64::from(assessment.posture_lphc.as_u8()))
        .bind(i64::from(assessment.posture_knee.as_u8()))
        .bind(i64::from(assessment.posture_foot.as_u8()))
        .bind(i64::from(assessment.pushup_form.as_u8()))
        .bind(i64::from(assessment.pushup_scapular.as_u8()))
        .bind(i64::from(assessment.pushup_lordosis.as_u8()))
        .bind(i64::from(assessment.pushup_head_pos.as_u8()))
        .bind(i64::from(assessment.squat_feet_out.as_u8()))
        .bind(i64::from(assessment.squat_knees_in.as_u8()))
        .bind(i64::from(assessment.squat_lower_back.as_u8()))
        .bind(i64::from(assessment.squat_arms_forward.as_u8()))
        .bind(i64::from(assessment.squat_lean_forward.as_u8()))
        .bind(i64::from(assessment.balance_correct.as_u8()))
        .bind(i64::from(assessment.balance_knee_in.as_u8()))
        .bind(i64::from(assessment.balance_hip_rise.as_u8()))
        .bind(i64::from(assessment.shoulder_retraction.as_u8()))
        .bind(i64::from(assessment.shoulder_protraction.as_u8()))
        .bind(i64::from(assessment.shoulder_elevation.as_u8()))
        .bind(i64::from(assessment.shoulder_depression.as_u8()))
        .bind(&assessment.notes)
        .bind(fmt_ts(assessment.updated_at))
        .bind(assessment.id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Delete a client's assessment
    ///
    /// Returns `true` when a row was deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_assessment_by_client(&self, client_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM assessments WHERE client_id = ?")
            .bind(client_id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Read a rating column, attributing range failures to the column name
fn rating_column(row: &sqlx::sqlite::SqliteRow, column: &str) -> Result<Rating> {
    let value: i64 = row.try_get(column)?;
    Rating::try_from_field(value, column).map_err(|e| anyhow::anyhow!("{e}"))
}

/// Convert a database row to an Assessment model
fn row_to_assessment(row: &sqlx::sqlite::SqliteRow) -> Result<Assessment> {
    let id_str: String = row.try_get("id")?;
    let client_id_str: String = row.try_get("client_id")?;
    let created_at_str: String = row.try_get("created_at")?;
    let updated_at_str: String = row.try_get("updated_at")?;

    Ok(Assessment {
        id: Uuid::parse_str(&id_str)?,
        client_id: Uuid::parse_str(&client_id_str)?,
        parq_heart_problem: row.try_get("parq_heart_problem")?,
        parq_chest_pain: row.try_get("parq_chest_pain")?,
        parq_dizziness: row.try_get("parq_dizziness")?,
        parq_chronic_condition: row.try_get("parq_chronic_condition")?,
        parq_medication: row.try_get("parq_medication")?,
        parq_bone_joint: row.try_get("parq_bone_joint")?,
        parq_supervision: row.try_get("parq_supervision")?,
        posture_head_neck: rating_column(row, "posture_head_neck")?,
        posture_shoulders: rating_column(row, "posture_shoulders")?,
        posture_lphc: rating_column(row, "posture_lphc")?,
        posture_knee: rating_column(row, "posture_knee")?,
        posture_foot: rating_column(row, "posture_foot")?,
        pushup_form: rating_column(row, "pushup_form")?,
        pushup_scapular: rating_column(row, "pushup_scapular")?,
        pushup_lordosis: rating_column(row, "pushup_lordosis")?,
        pushup_head_pos: rating_column(row, "pushup_head_pos")?,
        squat_feet_out: rating_column(row, "squat_feet_out")?,
        squat_knees_in: rating_column(row, "squat_knees_in")?,
        squat_lower_back: rating_column(row, "squat_lower_back")?,
        squat_arms_forward: rating_column(row, "squat_arms_forward")?,
        squat_lean_forward: rating_column(row, "squat_lean_forward")?,
        balance_correct: rating_column(row, "balance_correct")?,
        balance_knee_in: rating_column(row, "balance_knee_in")?,
        balance_hip_rise: rating_column(row, "balance_hip_rise")?,
        shoulder_retraction: rating_column(row, "shoulder_retraction")?,
        shoulder_protraction: rating_column(row, "shoulder_protraction")?,
        shoulder_elevation: rating_column(row, "shoulder_elevation")?,
        shoulder_depression: rating_column(row, "shoulder_depression")?,
        notes: row.try_get("notes")?,
        created_at: parse_ts(&created_at_str)?,
        updated_at: parse_ts(&updated_at_str)?,
    })
}
