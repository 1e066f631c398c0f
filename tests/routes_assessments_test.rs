// ABOUTME: Route tests for assessment creation, scoring summary, and validation
// ABOUTME: Verifies field-naming validation errors and the one-per-client rule
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Studio Server Contributors

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;
mod helpers;

use common::{create_test_context, seed_client, seed_trainer};
use helpers::axum_test::AxumTestRequest;
use serde_json::json;
use studio_server::server::router;

/// A complete assessment request body with the given posture ratings
fn assessment_body(posture: [i64; 5]) -> serde_json::Value {
    json!({
        "parq_heart_problem": false,
        "parq_chest_pain": false,
        "parq_dizziness": false,
        "parq_chronic_condition": false,
        "parq_medication": false,
        "parq_bone_joint": false,
        "parq_supervision": false,
        "posture_head_neck": posture[0],
        "posture_shoulders": posture[1],
        "posture_lphc": posture[2],
        "posture_knee": posture[3],
        "posture_foot": posture[4],
        "pushup_form": 2,
        "pushup_scapular": 2,
        "pushup_lordosis": 2,
        "pushup_head_pos": 2,
        "squat_feet_out": 2,
        "squat_knees_in": 2,
        "squat_lower_back": 2,
        "squat_arms_forward": 2,
        "squat_lean_forward": 2,
        "balance_correct": 2,
        "balance_knee_in": 2,
        "balance_hip_rise": 2,
        "shoulder_retraction": 2,
        "shoulder_protraction": 2,
        "shoulder_elevation": 2,
        "shoulder_depression": 2,
        "notes": "initial screen"
    })
}

#[tokio::test]
async fn test_create_assessment_returns_summary() {
    let ctx = create_test_context().await.unwrap();
    let (trainer, bearer) = seed_trainer(&ctx).await.unwrap();
    let client = seed_client(&ctx, trainer.id, 10).await.unwrap();
    let app = router(ctx.resources.clone());

    let response = AxumTestRequest::post(&format!("/api/v1/clients/{}/assessment", client.id))
        .header("authorization", &bearer)
        .json(&assessment_body([2, 2, 2, 2, 3]))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 201);
    let body: serde_json::Value = response.json();
    assert_eq!(body["posture_score"], 11);
    assert_eq!(body["posture_level"], "average");
    assert_eq!(body["requires_attention"], false);

    // Fetch returns the same summary
    let response = AxumTestRequest::get(&format!("/api/v1/clients/{}/assessment", client.id))
        .header("authorization", &bearer)
        .send(app)
        .await;
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["posture_score"], 11);
    assert_eq!(body["posture_shoulders"], 2);
}

#[tokio::test]
async fn test_posture_band_extremes() {
    let ctx = create_test_context().await.unwrap();
    let (trainer, bearer) = seed_trainer(&ctx).await.unwrap();
    let app = router(ctx.resources.clone());

    let poor_client = seed_client(&ctx, trainer.id, 10).await.unwrap();
    let response = AxumTestRequest::post(&format!("/api/v1/clients/{}/assessment", poor_client.id))
        .header("authorization", &bearer)
        .json(&assessment_body([1, 1, 1, 1, 1]))
        .send(app.clone())
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["posture_score"], 5);
    assert_eq!(body["posture_level"], "poor");

    let good_client = seed_client(&ctx, trainer.id, 10).await.unwrap();
    let response = AxumTestRequest::post(&format!("/api/v1/clients/{}/assessment", good_client.id))
        .header("authorization", &bearer)
        .json(&assessment_body([3, 3, 3, 3, 3]))
        .send(app)
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["posture_score"], 15);
    assert_eq!(body["posture_level"], "good");
}

#[tokio::test]
async fn test_parq_answer_flags_attention() {
    let ctx = create_test_context().await.unwrap();
    let (trainer, bearer) = seed_trainer(&ctx).await.unwrap();
    let client = seed_client(&ctx, trainer.id, 10).await.unwrap();
    let app = router(ctx.resources.clone());

    let mut body = assessment_body([2, 2, 2, 2, 2]);
    body["parq_chest_pain"] = json!(true);

    let response = AxumTestRequest::post(&format!("/api/v1/clients/{}/assessment", client.id))
        .header("authorization", &bearer)
        .json(&body)
        .send(app)
        .await;
    assert_eq!(response.status(), 201);
    let body: serde_json::Value = response.json();
    assert_eq!(body["requires_attention"], true);
}

#[tokio::test]
async fn test_out_of_range_rating_names_field() {
    let ctx = create_test_context().await.unwrap();
    let (trainer, bearer) = seed_trainer(&ctx).await.unwrap();
    let client = seed_client(&ctx, trainer.id, 10).await.unwrap();
    let app = router(ctx.resources.clone());

    let mut body = assessment_body([2, 2, 2, 2, 2]);
    body["squat_knees_in"] = json!(4);

    let response = AxumTestRequest::post(&format!("/api/v1/clients/{}/assessment", client.id))
        .header("authorization", &bearer)
        .json(&body)
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 400);
    let error: serde_json::Value = response.json();
    assert_eq!(error["error"]["details"]["field"], "squat_knees_in");

    // Nothing was stored
    let response = AxumTestRequest::get(&format!("/api/v1/clients/{}/assessment", client.id))
        .header("authorization", &bearer)
        .send(app)
        .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_second_assessment_conflicts_and_update_replaces() {
    let ctx = create_test_context().await.unwrap();
    let (trainer, bearer) = seed_trainer(&ctx).await.unwrap();
    let client = seed_client(&ctx, trainer.id, 10).await.unwrap();
    let app = router(ctx.resources.clone());

    let response = AxumTestRequest::post(&format!("/api/v1/clients/{}/assessment", client.id))
        .header("authorization", &bearer)
        .json(&assessment_body([2, 2, 2, 2, 2]))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 201);

    let response = AxumTestRequest::post(&format!("/api/v1/clients/{}/assessment", client.id))
        .header("authorization", &bearer)
        .json(&assessment_body([3, 3, 3, 3, 3]))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 409);

    let response = AxumTestRequest::put(&format!("/api/v1/clients/{}/assessment", client.id))
        .header("authorization", &bearer)
        .json(&assessment_body([3, 3, 3, 3, 3]))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["posture_level"], "good");

    let response = AxumTestRequest::delete(&format!("/api/v1/clients/{}/assessment", client.id))
        .header("authorization", &bearer)
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);

    let response = AxumTestRequest::get(&format!("/api/v1/clients/{}/assessment", client.id))
        .header("authorization", &bearer)
        .send(app)
        .await;
    assert_eq!(response.status(), 404);
}
