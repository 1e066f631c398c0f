// ABOUTME: Route tests for client CRUD and the derived package counters
// ABOUTME: Verifies counters are recomputed from sessions on every read
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Studio Server Contributors

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;
mod helpers;

use chrono::Utc;
use common::{create_test_context, seed_session, seed_trainer};
use helpers::axum_test::AxumTestRequest;
use serde_json::json;
use studio_server::models::SessionStatus;
use studio_server::server::router;

#[tokio::test]
async fn test_client_crud_flow() {
    let ctx = create_test_context().await.unwrap();
    let (_, bearer) = seed_trainer(&ctx).await.unwrap();
    let app = router(ctx.resources.clone());

    // Create
    let response = AxumTestRequest::post("/api/v1/clients")
        .header("authorization", &bearer)
        .json(&json!({
            "first_name": "Alex",
            "last_name": "Member",
            "phone": "555-0100",
            "total_package_size": 12
        }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 201);
    let created: serde_json::Value = response.json();
    let client_id = created["id"].as_str().unwrap().to_owned();

    // Read with derived counters
    let response = AxumTestRequest::get(&format!("/api/v1/clients/{client_id}"))
        .header("authorization", &bearer)
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["remaining_sessions"], 12);
    assert_eq!(body["completed_sessions"], 0);

    // Update a subset of fields
    let response = AxumTestRequest::put(&format!("/api/v1/clients/{client_id}"))
        .header("authorization", &bearer)
        .json(&json!({ "notes": "prefers mornings" }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["notes"], "prefers mornings");
    assert_eq!(body["first_name"], "Alex");

    // Delete
    let response = AxumTestRequest::delete(&format!("/api/v1/clients/{client_id}"))
        .header("authorization", &bearer)
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);

    let response = AxumTestRequest::get(&format!("/api/v1/clients/{client_id}"))
        .header("authorization", &bearer)
        .send(app)
        .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_package_counters_recomputed_from_sessions() {
    let ctx = create_test_context().await.unwrap();
    let (trainer, bearer) = seed_trainer(&ctx).await.unwrap();
    let client = common::seed_client(&ctx, trainer.id, 10).await.unwrap();

    // Package 10 with [completed, completed, no_show, scheduled]
    let now = Utc::now();
    for status in [
        SessionStatus::Completed,
        SessionStatus::Completed,
        SessionStatus::NoShow,
        SessionStatus::Scheduled,
    ] {
        seed_session(&ctx, client.id, now, status).await.unwrap();
    }

    let app = router(ctx.resources.clone());
    let response = AxumTestRequest::get(&format!("/api/v1/clients/{}", client.id))
        .header("authorization", &bearer)
        .send(app)
        .await;
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json();

    assert_eq!(body["completed_sessions"], 2);
    assert_eq!(body["no_show_sessions"], 1);
    assert_eq!(body["scheduled_sessions"], 1);
    assert_eq!(body["cancelled_sessions"], 0);
    // Only completed sessions consume package credit
    assert_eq!(body["remaining_sessions"], 8);
    assert!((body["progress_percent"].as_f64().unwrap() - 80.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_clients_are_scoped_per_trainer() {
    let ctx = create_test_context().await.unwrap();
    let (trainer, _) = seed_trainer(&ctx).await.unwrap();
    let (_, other_bearer) = seed_trainer(&ctx).await.unwrap();
    let client = common::seed_client(&ctx, trainer.id, 10).await.unwrap();

    let app = router(ctx.resources.clone());

    // Another trainer cannot see or delete the client
    let response = AxumTestRequest::get(&format!("/api/v1/clients/{}", client.id))
        .header("authorization", &other_bearer)
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 404);

    let response = AxumTestRequest::delete(&format!("/api/v1/clients/{}", client.id))
        .header("authorization", &other_bearer)
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 404);

    let response = AxumTestRequest::get("/api/v1/clients")
        .header("authorization", &other_bearer)
        .send(app)
        .await;
    assert_eq!(response.status(), 200);
    let body: Vec<serde_json::Value> = response.json();
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_create_client_rejects_negative_package() {
    let ctx = create_test_context().await.unwrap();
    let (_, bearer) = seed_trainer(&ctx).await.unwrap();
    let app = router(ctx.resources.clone());

    let response = AxumTestRequest::post("/api/v1/clients")
        .header("authorization", &bearer)
        .json(&json!({
            "first_name": "Alex",
            "last_name": "Member",
            "total_package_size": -1
        }))
        .send(app)
        .await;
    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["details"]["field"], "total_package_size");
}

#[tokio::test]
async fn test_invalid_client_id_is_bad_request() {
    let ctx = create_test_context().await.unwrap();
    let (_, bearer) = seed_trainer(&ctx).await.unwrap();
    let app = router(ctx.resources.clone());

    let response = AxumTestRequest::get("/api/v1/clients/not-a-uuid")
        .header("authorization", &bearer)
        .send(app)
        .await;
    assert_eq!(response.status(), 400);
}
