// ABOUTME: Progress photo database operations: groups and their member photos
// ABOUTME: Handles photo group creation, listing with photos, and deletion
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Studio Server Contributors

use super::{fmt_ts, parse_ts, Database};
use crate::models::{Photo, PhotoGroup};
use anyhow::Result;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create the photo group and photo tables
    pub(super) async fn migrate_photos(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS photo_groups (
                id TEXT PRIMARY KEY,
                client_id TEXT NOT NULL REFERENCES clients(id) ON DELETE CASCADE,
                notes TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS photos (
                id TEXT PRIMARY KEY,
                photo_group_id TEXT NOT NULL REFERENCES photo_groups(id) ON DELETE CASCADE,
                url TEXT NOT NULL,
                file_name TEXT NOT NULL DEFAULT '',
                file_size INTEGER NOT NULL DEFAULT 0,
                content_type TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_photo_groups_client_id ON photo_groups(client_id)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_photos_group_id ON photos(photo_group_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Create a photo group together with its photos
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails; the transaction rolls back
    pub async fn create_photo_group(&self, group: &PhotoGroup) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO photo_groups (id, client_id, notes, created_at) VALUES (?, ?, ?, ?)")
            .bind(group.id.to_string())
            .bind(group.client_id.to_string())
            .bind(&group.notes)
            .bind(fmt_ts(group.created_at))
            .execute(&mut *tx)
            .await?;

        for photo in &group.photos {
            sqlx::query(
                r"
                INSERT INTO photos (id, photo_group_id, url, file_name, file_size, content_type, created_at)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                ",
            )
            .bind(photo.id.to_string())
            .bind(photo.photo_group_id.to_string())
            .bind(&photo.url)
            .bind(&photo.file_name)
            .bind(photo.file_size)
            .bind(&photo.content_type)
            .bind(fmt_ts(photo.created_at))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// List a client's photo groups with their photos, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails
    pub async fn list_photo_groups(&self, client_id: Uuid) -> Result<Vec<PhotoGroup>> {
        let rows =
            sqlx::query("SELECT * FROM photo_groups WHERE client_id = ? ORDER BY created_at DESC")
                .bind(client_id.to_string())
                .fetch_all(&self.pool)
                .await?;

        let mut groups = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut group = row_to_photo_group(row)?;
            group.photos = self.list_photos(group.id).await?;
            groups.push(group);
        }
        Ok(groups)
    }

    /// Fetch a photo group belonging to one of the trainer's clients
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails
    pub async fn get_photo_group(
        &self,
        id: Uuid,
        trainer_id: Uuid,
    ) -> Result<Option<PhotoGroup>> {
        let row = sqlx::query(
            r"
            SELECT g.* FROM photo_groups g
            JOIN clients c ON c.id = g.client_id
            WHERE g.id = ? AND c.trainer_id = ?
            ",
        )
        .bind(id.to_string())
        .bind(trainer_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let mut group = row_to_photo_group(&row)?;
                group.photos = self.list_photos(group.id).await?;
                Ok(Some(group))
            }
            None => Ok(None),
        }
    }

    /// Delete a photo group; member photo rows cascade
    ///
    /// Returns `true` when a row was deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_photo_group(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM photo_groups WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List the photos in a group, upload order
    async fn list_photos(&self, photo_group_id: Uuid) -> Result<Vec<Photo>> {
        let rows =
            sqlx::query("SELECT * FROM photos WHERE photo_group_id = ? ORDER BY created_at ASC")
                .bind(photo_group_id.to_string())
                .fetch_all(&self.pool)
                .await?;

        rows.iter().map(row_to_photo).collect()
    }
}

/// Convert a database row to a PhotoGroup model (photos filled in separately)
fn row_to_photo_group(row: &sqlx::sqlite::SqliteRow) -> Result<PhotoGroup> {
    let id_str: String = row.try_get("id")?;
    let client_id_str: String = row.try_get("client_id")?;
    let created_at_str: String = row.try_get("created_at")?;

    Ok(PhotoGroup {
        id: Uuid::parse_str(&id_str)?,
        client_id: Uuid::parse_str(&client_id_str)?,
        notes: row.try_get("notes")?,
        created_at: parse_ts(&created_at_str)?,
        photos: Vec::new(),
    })
}

/// Convert a database row to a Photo model
fn row_to_photo(row: &sqlx::sqlite::SqliteRow) -> Result<Photo> {
    let id_str: String = row.try_get("id")?;
    let group_id_str: String = row.try_get("photo_group_id")?;
    let created_at_str: String = row.try_get("created_at")?;

    Ok(Photo {
        id: Uuid::parse_str(&id_str)?,
        photo_group_id: Uuid::parse_str(&group_id_str)?,
        url: row.try_get("url")?,
        file_name: row.try_get("file_name")?,
        file_size: row.try_get("file_size")?,
        content_type: row.try_get("content_type")?,
        created_at: parse_ts(&created_at_str)?,
    })
}
