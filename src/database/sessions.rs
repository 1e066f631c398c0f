// ABOUTME: Training session database operations with trainer scoping
// ABOUTME: Handles session CRUD and filtered listings for calendar and dashboard views
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Studio Server Contributors

use super::{fmt_ts, parse_ts, Database};
use crate::models::{Session, SessionStatus};
use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::Row;
use std::str::FromStr;
use uuid::Uuid;

/// Optional filters for session listings
///
/// `from`/`to` bound the scheduled timestamp inclusively, matching the
/// calendar range queries issued by the browser client.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionFilter {
    pub client_id: Option<Uuid>,
    pub status: Option<SessionStatus>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl Database {
    /// Create the sessions table
    pub(super) async fn migrate_sessions(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS sessions (
                id TEXT PRIMARY KEY,
                client_id TEXT NOT NULL REFERENCES clients(id) ON DELETE CASCADE,
                scheduled_at TEXT NOT NULL,
                duration_minutes INTEGER NOT NULL DEFAULT 60,
                status TEXT NOT NULL DEFAULT 'scheduled'
                    CHECK (status IN ('scheduled', 'completed', 'no_show', 'cancelled')),
                notes TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_sessions_client_id ON sessions(client_id)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_sessions_scheduled_at ON sessions(scheduled_at)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Create a session
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_session(&self, session: &Session) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO sessions (
                id, client_id, scheduled_at, duration_minutes, status, notes, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(session.id.to_string())
        .bind(session.client_id.to_string())
        .bind(fmt_ts(session.scheduled_at))
        .bind(session.duration_minutes)
        .bind(session.status.as_str())
        .bind(&session.notes)
        .bind(fmt_ts(session.created_at))
        .bind(fmt_ts(session.updated_at))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Fetch a session belonging to one of the trainer's clients
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_session(&self, id: Uuid, trainer_id: Uuid) -> Result<Option<Session>> {
        let row = sqlx::query(
            r"
            SELECT s.* FROM sessions s
            JOIN clients c ON c.id = s.client_id
            WHERE s.id = ? AND c.trainer_id = ?
            ",
        )
        .bind(id.to_string())
        .bind(trainer_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(row_to_session(&row)?)),
            None => Ok(None),
        }
    }

    /// List sessions for a trainer with optional filters, ordered by
    /// scheduled time ascending
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_sessions(
        &self,
        trainer_id: Uuid,
        filter: &SessionFilter,
    ) -> Result<Vec<Session>> {
        let mut sql = String::from(
            r"
            SELECT s.* FROM sessions s
            JOIN clients c ON c.id = s.client_id
            WHERE c.trainer_id = ?
            ",
        );
        if filter.client_id.is_some() {
            sql.push_str(" AND s.client_id = ?");
        }
        if filter.status.is_some() {
            sql.push_str(" AND s.status = ?");
        }
        if filter.from.is_some() {
            sql.push_str(" AND s.scheduled_at >= ?");
        }
        if filter.to.is_some() {
            sql.push_str(" AND s.scheduled_at <= ?");
        }
        sql.push_str(" ORDER BY s.scheduled_at ASC");

        let mut query = sqlx::query(&sql).bind(trainer_id.to_string());
        if let Some(client_id) = filter.client_id {
            query = query.bind(client_id.to_string());
        }
        if let Some(status) = filter.status {
            query = query.bind(status.as_str());
        }
        if let Some(from) = filter.from {
            query = query.bind(fmt_ts(from));
        }
        if let Some(to) = filter.to {
            query = query.bind(fmt_ts(to));
        }

        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(row_to_session).collect()
    }

    /// List all sessions for one client, ordered by scheduled time ascending
    ///
    /// Callers are expected to have verified client ownership already.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_sessions_for_client(&self, client_id: Uuid) -> Result<Vec<Session>> {
        let rows =
            sqlx::query("SELECT * FROM sessions WHERE client_id = ? ORDER BY scheduled_at ASC")
                .bind(client_id.to_string())
                .fetch_all(&self.pool)
                .await?;

        rows.iter().map(row_to_session).collect()
    }

    /// Update a session record
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_session(&self, session: &Session) -> Result<()> {
        sqlx::query(
            r"
            UPDATE sessions SET
                scheduled_at = ?, duration_minutes = ?, status = ?, notes = ?, updated_at = ?
            WHERE id = ?
            ",
        )
        .bind(fmt_ts(session.scheduled_at))
        .bind(session.duration_minutes)
        .bind(session.status.as_str())
        .bind(&session.notes)
        .bind(fmt_ts(session.updated_at))
        .bind(session.id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Delete a session belonging to one of the trainer's clients
    ///
    /// Returns `true` when a row was deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_session(&self, id: Uuid, trainer_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r"
            DELETE FROM sessions
            WHERE id = ? AND client_id IN (SELECT id FROM clients WHERE trainer_id = ?)
            ",
        )
        .bind(id.to_string())
        .bind(trainer_id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count sessions across all of a trainer's clients
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn count_sessions(&self, trainer_id: Uuid) -> Result<i64> {
        let row = sqlx::query(
            r"
            SELECT COUNT(*) as count FROM sessions s
            JOIN clients c ON c.id = s.client_id
            WHERE c.trainer_id = ?
            ",
        )
        .bind(trainer_id.to_string())
        .fetch_one(&self.pool)
        .await?;

        let count: i64 = row.try_get("count")?;
        Ok(count)
    }
}

/// Convert a database row to a Session model
fn row_to_session(row: &sqlx::sqlite::SqliteRow) -> Result<Session> {
    let id_str: String = row.try_get("id")?;
    let client_id_str: String = row.try_get("client_id")?;
    let scheduled_at_str: String = row.try_get("scheduled_at")?;
    let status_str: String = row.try_get("status")?;
    let created_at_str: String = row.try_get("created_at")?;
    let updated_at_str: String = row.try_get("updated_at")?;

    Ok(Session {
        id: Uuid::parse_str(&id_str)?,
        client_id: Uuid::parse_str(&client_id_str)?,
        scheduled_at: parse_ts(&scheduled_at_str)?,
        duration_minutes: row.try_get("duration_minutes")?,
        status: SessionStatus::from_str(&status_str)
            .map_err(|e| anyhow::anyhow!("Invalid stored session status: {e}"))?,
        notes: row.try_get("notes")?,
        created_at: parse_ts(&created_at_str)?,
        updated_at: parse_ts(&updated_at_str)?,
    })
}
