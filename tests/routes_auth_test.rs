// ABOUTME: Route tests for trainer registration, login and profile lookup
// ABOUTME: Exercises the auth endpoints through the assembled router
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Studio Server Contributors

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;
mod helpers;

use common::create_test_context;
use helpers::axum_test::AxumTestRequest;
use serde_json::json;
use studio_server::server::router;

#[tokio::test]
async fn test_register_login_me_flow() {
    let ctx = create_test_context().await.unwrap();
    let app = router(ctx.resources.clone());

    let response = AxumTestRequest::post("/api/v1/auth/register")
        .json(&json!({
            "email": "coach@example.com",
            "password": "training-password",
            "first_name": "Jamie",
            "last_name": "Coach"
        }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 201);
    let body: serde_json::Value = response.json();
    assert!(body["token"].as_str().is_some());
    assert_eq!(body["trainer"]["email"], "coach@example.com");
    assert!(body["trainer"].get("password_hash").is_none());

    let response = AxumTestRequest::post("/api/v1/auth/login")
        .json(&json!({
            "email": "coach@example.com",
            "password": "training-password"
        }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json();
    let token = body["token"].as_str().unwrap().to_owned();

    let response = AxumTestRequest::get("/api/v1/auth/me")
        .header("authorization", &format!("Bearer {token}"))
        .send(app)
        .await;
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["first_name"], "Jamie");
}

#[tokio::test]
async fn test_register_validation_errors() {
    let ctx = create_test_context().await.unwrap();
    let app = router(ctx.resources.clone());

    let response = AxumTestRequest::post("/api/v1/auth/register")
        .json(&json!({
            "email": "not-an-email",
            "password": "training-password",
            "first_name": "A",
            "last_name": "B"
        }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["details"]["field"], "email");

    let response = AxumTestRequest::post("/api/v1/auth/register")
        .json(&json!({
            "email": "coach@example.com",
            "password": "short",
            "first_name": "A",
            "last_name": "B"
        }))
        .send(app)
        .await;
    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["details"]["field"], "password");
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let ctx = create_test_context().await.unwrap();
    let app = router(ctx.resources.clone());

    let request = json!({
        "email": "coach@example.com",
        "password": "training-password",
        "first_name": "Jamie",
        "last_name": "Coach"
    });

    let response = AxumTestRequest::post("/api/v1/auth/register")
        .json(&request)
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 201);

    let response = AxumTestRequest::post("/api/v1/auth/register")
        .json(&request)
        .send(app)
        .await;
    assert_eq!(response.status(), 409);
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let ctx = create_test_context().await.unwrap();
    let app = router(ctx.resources.clone());

    AxumTestRequest::post("/api/v1/auth/register")
        .json(&json!({
            "email": "coach@example.com",
            "password": "training-password",
            "first_name": "Jamie",
            "last_name": "Coach"
        }))
        .send(app.clone())
        .await;

    let response = AxumTestRequest::post("/api/v1/auth/login")
        .json(&json!({
            "email": "coach@example.com",
            "password": "wrong-password"
        }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 401);

    let response = AxumTestRequest::post("/api/v1/auth/login")
        .json(&json!({
            "email": "nobody@example.com",
            "password": "training-password"
        }))
        .send(app)
        .await;
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let ctx = create_test_context().await.unwrap();
    let app = router(ctx.resources.clone());

    let response = AxumTestRequest::get("/api/v1/clients").send(app.clone()).await;
    assert_eq!(response.status(), 401);

    let response = AxumTestRequest::get("/api/v1/auth/me")
        .header("authorization", "Bearer not-a-token")
        .send(app)
        .await;
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_health_is_public() {
    let ctx = create_test_context().await.unwrap();
    let app = router(ctx.resources.clone());

    let response = AxumTestRequest::get("/health").send(app).await;
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
}
