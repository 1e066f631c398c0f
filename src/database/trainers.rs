// ABOUTME: Trainer account database operations
// ABOUTME: Handles trainer registration lookups and profile storage
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Studio Server Contributors

use super::{fmt_ts, parse_ts, Database};
use crate::models::Trainer;
use anyhow::{anyhow, Result};
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create the trainers table
    pub(super) async fn migrate_trainers(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS trainers (
                id TEXT PRIMARY KEY,
                email TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_trainers_email ON trainers(email)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Create a trainer
    ///
    /// # Errors
    ///
    /// Returns an error if the email is already in use or the insert fails
    pub async fn create_trainer(&self, trainer: &Trainer) -> Result<()> {
        if self.get_trainer_by_email(&trainer.email).await?.is_some() {
            return Err(anyhow!("Email already in use by another trainer"));
        }

        sqlx::query(
            r"
            INSERT INTO trainers (id, email, password_hash, first_name, last_name, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(trainer.id.to_string())
        .bind(&trainer.email)
        .bind(&trainer.password_hash)
        .bind(&trainer.first_name)
        .bind(&trainer.last_name)
        .bind(fmt_ts(trainer.created_at))
        .bind(fmt_ts(trainer.updated_at))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Look up a trainer by email
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_trainer_by_email(&self, email: &str) -> Result<Option<Trainer>> {
        let row = sqlx::query("SELECT * FROM trainers WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(row_to_trainer(&row)?)),
            None => Ok(None),
        }
    }

    /// Look up a trainer by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_trainer_by_id(&self, id: Uuid) -> Result<Option<Trainer>> {
        let row = sqlx::query("SELECT * FROM trainers WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(row_to_trainer(&row)?)),
            None => Ok(None),
        }
    }
}

/// Convert a database row to a Trainer model
fn row_to_trainer(row: &sqlx::sqlite::SqliteRow) -> Result<Trainer> {
    let id_str: String = row.try_get("id")?;
    let created_at_str: String = row.try_get("created_at")?;
    let updated_at_str: String = row.try_get("updated_at")?;

    Ok(Trainer {
        id: Uuid::parse_str(&id_str)?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        created_at: parse_ts(&created_at_str)?,
        updated_at: parse_ts(&updated_at_str)?,
    })
}
