// ABOUTME: Client roster route handlers scoped to the authenticated trainer
// ABOUTME: Provides client CRUD with derived package counters on every read
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Studio Server Contributors

//! Client roster routes
//!
//! Read responses embed the derived package counters
//! ([`crate::analytics::package`]); the counters are recomputed from the
//! session list on every request and never stored.

use crate::analytics::package::{summarize_package, PackageSummary};
use crate::errors::AppError;
use crate::models::Client;
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
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Request body for creating a client
#[derive(Debug, Deserialize)]
pub struct CreateClientRequest {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub total_package_size: i32,
    #[serde(default)]
    pub package_start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: String,
}

/// Request body for updating a client; absent fields are left unchanged
#[derive(Debug, Deserialize)]
pub struct UpdateClientRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub total_package_size: Option<i32>,
    pub package_start_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// Client read model: the stored record plus derived package counters
#[derive(Debug, Serialize)]
pub struct ClientResponse {
    #[serde(flatten)]
    pub client: Client,
    #[serde(flatten)]
    pub package: PackageSummary,
}

/// Client route handlers
pub struct ClientRoutes;

impl ClientRoutes {
    /// Create all client routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/clients", get(Self::handle_list))
            .route("/clients", post(Self::handle_create))
            .route("/clients/:id", get(Self::handle_get))
            .route("/clients/:id", put(Self::handle_update))
            .route("/clients/:id", delete(Self::handle_delete))
            .with_state(resources)
    }

    /// List all clients with derived package counters
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;

        let clients = resources
            .database
            .list_clients(auth.trainer_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        let mut responses = Vec::with_capacity(clients.len());
        for client in clients {
            responses.push(Self::with_package_summary(&resources, client).await?);
        }

        Ok((StatusCode::OK, Json(responses)).into_response())
    }

    /// Create a client
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<CreateClientRequest>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;

        if request.first_name.trim().is_empty() {
            return Err(AppError::missing_field("first_name"));
        }
        if request.last_name.trim().is_empty() {
            return Err(AppError::missing_field("last_name"));
        }
        if request.total_package_size < 0 {
            return Err(AppError::invalid_field(
                "total_package_size",
                "must not be negative",
            ));
        }

        let now = Utc::now();
        let client = Client {
            id: Uuid::new_v4(),
            trainer_id: auth.trainer_id,
            first_name: request.first_name.trim().to_owned(),
            last_name: request.last_name.trim().to_owned(),
            phone: request.phone,
            email: request.email,
            total_package_size: request.total_package_size,
            package_start_date: request.package_start_date,
            notes: request.notes,
            created_at: now,
            updated_at: now,
        };

        resources
            .database
            .create_client(&client)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        info!(client_id = %client.id, trainer_id = %auth.trainer_id, "Client created");

        Ok((StatusCode::CREATED, Json(client)).into_response())
    }

    /// Fetch a client with derived package counters
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let id = parse_uuid(&id, "client")?;

        let client = resources
            .database
            .get_client(id, auth.trainer_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::not_found("Client"))?;

        let response = Self::with_package_summary(&resources, client).await?;

        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Update a client, applying only the provided fields
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        Json(request): Json<UpdateClientRequest>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let id = parse_uuid(&id, "client")?;

        let mut client = resources
            .database
            .get_client(id, auth.trainer_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::not_found("Client"))?;

        if let Some(first_name) = request.first_name {
            client.first_name = first_name;
        }
        if let Some(last_name) = request.last_name {
            client.last_name = last_name;
        }
        if let Some(phone) = request.phone {
            client.phone = phone;
        }
        if let Some(email) = request.email {
            client.email = email;
        }
        if let Some(total_package_size) = request.total_package_size {
            if total_package_size < 0 {
                return Err(AppError::invalid_field(
                    "total_package_size",
                    "must not be negative",
                ));
            }
            client.total_package_size = total_package_size;
        }
        if let Some(package_start_date) = request.package_start_date {
            client.package_start_date = Some(package_start_date);
        }
        if let Some(notes) = request.notes {
            client.notes = notes;
        }
        client.updated_at = Utc::now();

        resources
            .database
            .update_client(&client)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        Ok((StatusCode::OK, Json(client)).into_response())
    }

    /// Delete a client and all dependent records
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let id = parse_uuid(&id, "client")?;

        let deleted = resources
            .database
            .delete_client(id, auth.trainer_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        if !deleted {
            return Err(AppError::not_found("Client"));
        }

        info!(client_id = %id, trainer_id = %auth.trainer_id, "Client deleted");

        Ok((
            StatusCode::OK,
            Json(serde_json::json!({ "message": "Client deleted successfully" })),
        )
            .into_response())
    }

    /// Attach recomputed package counters to a client record
    async fn with_package_summary(
        resources: &Arc<ServerResources>,
        client: Client,
    ) -> Result<ClientResponse, AppError> {
        let sessions = resources
            .database
            .list_sessions_for_client(client.id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        let package = summarize_package(client.total_package_size, &sessions);

        Ok(ClientResponse { client, package })
    }
}
