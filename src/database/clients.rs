// ABOUTME: Client roster database operations scoped to an owning trainer
// ABOUTME: Handles client CRUD with cascading deletes to dependent records
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Studio Server Contributors

use super::{fmt_ts, parse_ts, Database};
use crate::models::Client;
use anyhow::Result;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create the clients table
    pub(super) async fn migrate_clients(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS clients (
                id TEXT PRIMARY KEY,
                trainer_id TEXT NOT NULL REFERENCES trainers(id) ON DELETE CASCADE,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                phone TEXT NOT NULL DEFAULT '',
                email TEXT NOT NULL DEFAULT '',
                total_package_size INTEGER NOT NULL DEFAULT 0,
                package_start_date TEXT,
                notes TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_clients_trainer_id ON clients(trainer_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Create a client
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_client(&self, client: &Client) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO clients (
                id, trainer_id, first_name, last_name, phone, email,
                total_package_size, package_start_date, notes, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(client.id.to_string())
        .bind(client.trainer_id.to_string())
        .bind(&client.first_name)
        .bind(&client.last_name)
        .bind(&client.phone)
        .bind(&client.email)
        .bind(client.total_package_size)
        .bind(client.package_start_date.map(fmt_ts))
        .bind(&client.notes)
        .bind(fmt_ts(client.created_at))
        .bind(fmt_ts(client.updated_at))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Fetch a client owned by the given trainer
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_client(&self, id: Uuid, trainer_id: Uuid) -> Result<Option<Client>> {
        let row = sqlx::query("SELECT * FROM clients WHERE id = ? AND trainer_id = ?")
            .bind(id.to_string())
            .bind(trainer_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(row_to_client(&row)?)),
            None => Ok(None),
        }
    }

    /// List all clients for a trainer, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_clients(&self, trainer_id: Uuid) -> Result<Vec<Client>> {
        let rows =
            sqlx::query("SELECT * FROM clients WHERE trainer_id = ? ORDER BY created_at DESC")
                .bind(trainer_id.to_string())
                .fetch_all(&self.pool)
                .await?;

        rows.iter().map(row_to_client).collect()
    }

    /// Update a client record
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_client(&self, client: &Client) -> Result<()> {
        sqlx::query(
            r"
            UPDATE clients SET
                first_name = ?, last_name = ?, phone = ?, email = ?,
                total_package_size = ?, package_start_date = ?, notes = ?, updated_at = ?
            WHERE id = ? AND trainer_id = ?
            ",
        )
        .bind(&client.first_name)
        .bind(&client.last_name)
        .bind(&client.phone)
        .bind(&client.email)
        .bind(client.total_package_size)
        .bind(client.package_start_date.map(fmt_ts))
        .bind(&client.notes)
        .bind(fmt_ts(client.updated_at))
        .bind(client.id.to_string())
        .bind(client.trainer_id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Delete a client and, via foreign keys, its sessions, measurements,
    /// assessment and photo groups
    ///
    /// Returns `true` when a row was deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_client(&self, id: Uuid, trainer_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM clients WHERE id = ? AND trainer_id = ?")
            .bind(id.to_string())
            .bind(trainer_id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count clients for a trainer
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn count_clients(&self, trainer_id: Uuid) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM clients WHERE trainer_id = ?")
            .bind(trainer_id.to_string())
            .fetch_one(&self.pool)
            .await?;

        let count: i64 = row.try_get("count")?;
        Ok(count)
    }
}

/// Convert a database row to a Client model
fn row_to_client(row: &sqlx::sqlite::SqliteRow) -> Result<Client> {
    let id_str: String = row.try_get("id")?;
    let trainer_id_str: String = row.try_get("trainer_id")?;
    let package_start: Option<String> = row.try_get("package_start_date")?;
    let created_at_str: String = row.try_get("created_at")?;
    let updated_at_str: String = row.try_get("updated_at")?;

    Ok(Client {
        id: Uuid::parse_str(&id_str)?,
        trainer_id: Uuid::parse_str(&trainer_id_str)?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        phone: row.try_get("phone")?,
        email: row.try_get("email")?,
        total_package_size: row.try_get("total_package_size")?,
        package_start_date: package_start.as_deref().map(parse_ts).transpose()?,
        notes: row.try_get("notes")?,
        created_at: parse_ts(&created_at_str)?,
        updated_at: parse_ts(&updated_at_str)?,
    })
}
