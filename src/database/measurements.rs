// ABOUTME: Body measurement database operations
// ABOUTME: Handles timestamped measurement snapshots with optional numeric fields
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Studio Server Contributors

use super::{fmt_ts, parse_ts, Database};
use crate::models::Measurement;
use anyhow::Result;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create the measurements table
    pub(super) async fn migrate_measurements(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS measurements (
                id TEXT PRIMARY KEY,
                client_id TEXT NOT NULL REFERENCES clients(id) ON DELETE CASCADE,
                weight_kg REAL,
                neck_cm REAL,
                shoulder_cm REAL,
                chest_cm REAL,
                waist_cm REAL,
                hip_cm REAL,
                right_arm_cm REAL,
                left_arm_cm REAL,
                right_leg_cm REAL,
                left_leg_cm REAL,
                notes TEXT NOT NULL DEFAULT '',
                measured_at TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_measurements_client_id ON measurements(client_id, measured_at)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Create a measurement
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_measurement(&self, measurement: &Measurement) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO measurements (
                id, client_id, weight_kg, neck_cm, shoulder_cm, chest_cm, waist_cm, hip_cm,
                right_arm_cm, left_arm_cm, right_leg_cm, left_leg_cm, notes, measured_at, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(measurement.id.to_string())
        .bind(measurement.client_id.to_string())
        .bind(measurement.weight_kg)
        .bind(measurement.neck_cm)
        .bind(measurement.shoulder_cm)
        .bind(measurement.chest_cm)
        .bind(measurement.waist_cm)
        .bind(measurement.hip_cm)
        .bind(measurement.right_arm_cm)
        .bind(measurement.left_arm_cm)
        .bind(measurement.right_leg_cm)
        .bind(measurement.left_leg_cm)
        .bind(&measurement.notes)
        .bind(fmt_ts(measurement.measured_at))
        .bind(fmt_ts(measurement.created_at))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// List a client's measurements, most recent first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_measurements(&self, client_id: Uuid) -> Result<Vec<Measurement>> {
        let rows = sqlx::query(
            "SELECT * FROM measurements WHERE client_id = ? ORDER BY measured_at DESC",
        )
        .bind(client_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_measurement).collect()
    }

    /// Fetch a measurement belonging to one of the trainer's clients
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_measurement(
        &self,
        id: Uuid,
        trainer_id: Uuid,
    ) -> Result<Option<Measurement>> {
        let row = sqlx::query(
            r"
            SELECT m.* FROM measurements m
            JOIN clients c ON c.id = m.client_id
            WHERE m.id = ? AND c.trainer_id = ?
            ",
        )
        .bind(id.to_string())
        .bind(trainer_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(row_to_measurement(&row)?)),
            None => Ok(None),
        }
    }

    /// Update a measurement record
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_measurement(&self, measurement: &Measurement) -> Result<()> {
        sqlx::query(
            r"
            UPDATE measurements SET
                weight_kg = ?, neck_cm = ?, shoulder_cm = ?, chest_cm = ?, waist_cm = ?,
                hip_cm = ?, right_arm_cm = ?, left_arm_cm = ?, right_leg_cm = ?, left_leg_cm = ?,
                notes = ?, measured_at = ?
            WHERE id = ?
            ",
        )
        .bind(measurement.weight_kg)
        .bind(measurement.neck_cm)
        .bind(measurement.shoulder_cm)
        .bind(measurement.chest_cm)
        .bind(measurement.waist_cm)
        .bind(measurement.hip_cm)
        .bind(measurement.right_arm_cm)
        .bind(measurement.left_arm_cm)
        .bind(measurement.right_leg_cm)
        .bind(measurement.left_leg_cm)
        .bind(&measurement.notes)
        .bind(fmt_ts(measurement.measured_at))
        .bind(measurement.id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Delete a measurement belonging to one of the trainer's clients
    ///
    /// Returns `true` when a row was deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_measurement(&self, id: Uuid, trainer_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r"
            DELETE FROM measurements
            WHERE id = ? AND client_id IN (SELECT id FROM clients WHERE trainer_id = ?)
            ",
        )
        .bind(id.to_string())
        .bind(trainer_id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Convert a database row to a Measurement model
fn row_to_measurement(row: &sqlx::sqlite::SqliteRow) -> Result<Measurement> {
    let id_str: String = row.try_get("id")?;
    let client_id_str: String = row.try_get("client_id")?;
    let measured_at_str: String = row.try_get("measured_at")?;
    let created_at_str: String = row.try_get("created_at")?;

    Ok(Measurement {
        id: Uuid::parse_str(&id_str)?,
        client_id: Uuid::parse_str(&client_id_str)?,
        weight_kg: row.try_get("weight_kg")?,
        neck_cm: row.try_get("neck_cm")?,
        shoulder_cm: row.try_get("shoulder_cm")?,
        chest_cm: row.try_get("chest_cm")?,
        waist_cm: row.try_get("waist_cm")?,
        hip_cm: row.try_get("hip_cm")?,
        right_arm_cm: row.try_get("right_arm_cm")?,
        left_arm_cm: row.try_get("left_arm_cm")?,
        right_leg_cm: row.try_get("right_leg_cm")?,
        left_leg_cm: row.try_get("left_leg_cm")?,
        notes: row.try_get("notes")?,
        measured_at: parse_ts(&measured_at_str)?,
        created_at: parse_ts(&created_at_str)?,
    })
}
