// ABOUTME: Progress photo route handlers: multipart upload, listing, group deletion
// ABOUTME: Photo bytes go to the local photo store; metadata rows go to the database
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Studio Server Contributors

//! Progress photo routes
//!
//! Photos are uploaded in groups of up to five via `multipart/form-data`
//! (`photos` file fields plus an optional `notes` text field). Bytes land
//! in the photo store; the group and per-photo metadata land in the
//! database. Deleting a group removes both.

use crate::constants::limits;
use crate::errors::AppError;
use crate::models::{Photo, PhotoGroup};
use crate::routes::{authenticate, parse_uuid};
use crate::server::ServerResources;
use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// An uploaded file pulled out of the multipart stream
struct UploadedFile {
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
}

/// Photo route handlers
pub struct PhotoRoutes;

impl PhotoRoutes {
    /// Create all photo routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/clients/:id/photos", get(Self::handle_list))
            .route("/clients/:id/photos", post(Self::handle_upload))
            .route("/photo-groups/:id", delete(Self::handle_delete_group))
            .layer(DefaultBodyLimit::max(limits::UPLOAD_BODY_LIMIT_BYTES))
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

    /// List a client's photo groups, newest first
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let client_id = parse_uuid(&id, "client")?;
        Self::verify_client(&resources, client_id, auth.trainer_id).await?;

        let groups = resources
            .database
            .list_photo_groups(client_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        Ok((StatusCode::OK, Json(groups)).into_response())
    }

    /// Upload up to five photos as a new group
    async fn handle_upload(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        mut multipart: Multipart,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let client_id = parse_uuid(&id, "client")?;
        Self::verify_client(&resources, client_id, auth.trainer_id).await?;

        let mut notes = String::new();
        let mut files: Vec<UploadedFile> = Vec::new();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::invalid_input(format!("Failed to parse form: {e}")))?
        {
            let name = field.name().map(ToOwned::to_owned);
            match name.as_deref() {
                Some("notes") => {
                    notes = field
                        .text()
                        .await
                        .map_err(|e| AppError::invalid_input(format!("Invalid notes field: {e}")))?;
                }
                Some("photos") => {
                    if files.len() >= limits::MAX_PHOTOS_PER_GROUP {
                        return Err(AppError::invalid_input(format!(
                            "Maximum {} photos allowed per upload",
                            limits::MAX_PHOTOS_PER_GROUP
                        )));
                    }

                    let file_name = field.file_name().unwrap_or("photo").to_owned();
                    let content_type = field
                        .content_type()
                        .unwrap_or("application/octet-stream")
                        .to_owned();
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::invalid_input(format!("Failed to read photo: {e}")))?;

                    if bytes.len() > limits::MAX_PHOTO_BYTES {
                        return Err(AppError::invalid_field("photos", "photo exceeds size limit"));
                    }

                    files.push(UploadedFile {
                        file_name,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
                _ => {}
            }
        }

        if files.is_empty() {
            return Err(AppError::invalid_input("No photos provided"));
        }

        let group_id = Uuid::new_v4();
        let mut photos = Vec::with_capacity(files.len());
        for file in &files {
            let stored = resources
                .photos
                .save(&file.file_name, &file.content_type, &file.bytes)
                .await
                .map_err(|e| AppError::storage(e.to_string()))?;

            photos.push(Photo {
                id: Uuid::new_v4(),
                photo_group_id: group_id,
                url: stored.url,
                file_name: stored.file_name,
                file_size: stored.file_size,
                content_type: stored.content_type,
                created_at: Utc::now(),
            });
        }

        let group = PhotoGroup {
            id: group_id,
            client_id,
            notes,
            created_at: Utc::now(),
            photos,
        };

        if let Err(e) = resources.database.create_photo_group(&group).await {
            // Roll back the files we already wrote
            for photo in &group.photos {
                if let Err(cleanup_err) = resources.photos.delete(&photo.url).await {
                    warn!(url = %photo.url, error = %cleanup_err, "Failed to clean up photo");
                }
            }
            return Err(AppError::database(e.to_string()));
        }

        info!(
            group_id = %group.id,
            client_id = %client_id,
            photo_count = group.photos.len(),
            "Photo group uploaded"
        );

        Ok((StatusCode::CREATED, Json(group)).into_response())
    }

    /// Delete a photo group, its rows, and its stored files
    async fn handle_delete_group(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let id = parse_uuid(&id, "photo group")?;

        let group = resources
            .database
            .get_photo_group(id, auth.trainer_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::not_found("Photo group"))?;

        for photo in &group.photos {
            if let Err(e) = resources.photos.delete(&photo.url).await {
                warn!(url = %photo.url, error = %e, "Failed to delete stored photo");
            }
        }

        resources
            .database
            .delete_photo_group(id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        Ok((
            StatusCode::OK,
            Json(serde_json::json!({ "message": "Photo group deleted successfully" })),
        )
            .into_response())
    }
}
