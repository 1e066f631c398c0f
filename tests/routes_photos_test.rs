// ABOUTME: Route tests for progress photo upload, listing and group deletion
// ABOUTME: Builds multipart bodies by hand and checks disk-backed storage
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Studio Server Contributors

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;
mod helpers;

use common::{create_test_context, seed_client, seed_trainer};
use helpers::axum_test::AxumTestRequest;
use studio_server::server::router;

const BOUNDARY: &str = "studio-test-boundary";

/// Build a multipart/form-data body with notes and the given photo files
fn multipart_body(notes: &str, photos: &[(&str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"notes\"\r\n\r\n{notes}\r\n")
            .as_bytes(),
    );
    for (file_name, bytes) in photos {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"photos\"; filename=\"{file_name}\"\r\nContent-Type: image/jpeg\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}

#[tokio::test]
async fn test_upload_list_and_delete_photo_group() {
    let ctx = create_test_context().await.unwrap();
    let (trainer, bearer) = seed_trainer(&ctx).await.unwrap();
    let client = seed_client(&ctx, trainer.id, 10).await.unwrap();
    let app = router(ctx.resources.clone());

    let body = multipart_body(
        "week 4 check-in",
        &[("front.jpg", b"front-bytes"), ("side.jpg", b"side-bytes")],
    );
    let response = AxumTestRequest::post(&format!("/api/v1/clients/{}/photos", client.id))
        .header("authorization", &bearer)
        .raw_body(&content_type(), body)
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 201);
    let group: serde_json::Value = response.json();
    assert_eq!(group["notes"], "week 4 check-in");
    let photos = group["photos"].as_array().unwrap();
    assert_eq!(photos.len(), 2);
    assert_eq!(photos[0]["file_name"], "front.jpg");
    assert_eq!(photos[0]["file_size"], 11);

    // Stored file exists on disk under the photo root
    let url = photos[0]["url"].as_str().unwrap();
    let stored_name = url.strip_prefix("/uploads/").unwrap();
    let on_disk = ctx.resources.photos.root().join(stored_name);
    assert!(on_disk.exists());

    // Listing returns the group
    let response = AxumTestRequest::get(&format!("/api/v1/clients/{}/photos", client.id))
        .header("authorization", &bearer)
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);
    let groups: Vec<serde_json::Value> = response.json();
    assert_eq!(groups.len(), 1);

    // Deleting the group removes rows and files
    let group_id = group["id"].as_str().unwrap();
    let response = AxumTestRequest::delete(&format!("/api/v1/photo-groups/{group_id}"))
        .header("authorization", &bearer)
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);
    assert!(!on_disk.exists());

    let response = AxumTestRequest::get(&format!("/api/v1/clients/{}/photos", client.id))
        .header("authorization", &bearer)
        .send(app)
        .await;
    let groups: Vec<serde_json::Value> = response.json();
    assert!(groups.is_empty());
}

#[tokio::test]
async fn test_upload_rejects_empty_and_oversized_groups() {
    let ctx = create_test_context().await.unwrap();
    let (trainer, bearer) = seed_trainer(&ctx).await.unwrap();
    let client = seed_client(&ctx, trainer.id, 10).await.unwrap();
    let app = router(ctx.resources.clone());

    // No photos at all
    let body = multipart_body("empty", &[]);
    let response = AxumTestRequest::post(&format!("/api/v1/clients/{}/photos", client.id))
        .header("authorization", &bearer)
        .raw_body(&content_type(), body)
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 400);

    // Six photos exceeds the per-group limit of five
    let photo: &[u8] = b"x";
    let six: Vec<(&str, &[u8])> = vec![
        ("1.jpg", photo),
        ("2.jpg", photo),
        ("3.jpg", photo),
        ("4.jpg", photo),
        ("5.jpg", photo),
        ("6.jpg", photo),
    ];
    let body = multipart_body("too many", &six);
    let response = AxumTestRequest::post(&format!("/api/v1/clients/{}/photos", client.id))
        .header("authorization", &bearer)
        .raw_body(&content_type(), body)
        .send(app)
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_photo_routes_scoped_to_trainer() {
    let ctx = create_test_context().await.unwrap();
    let (trainer, bearer) = seed_trainer(&ctx).await.unwrap();
    let (_, other_bearer) = seed_trainer(&ctx).await.unwrap();
    let client = seed_client(&ctx, trainer.id, 10).await.unwrap();
    let app = router(ctx.resources.clone());

    let body = multipart_body("mine", &[("front.jpg", b"bytes")]);
    let response = AxumTestRequest::post(&format!("/api/v1/clients/{}/photos", client.id))
        .header("authorization", &bearer)
        .raw_body(&content_type(), body)
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 201);
    let group: serde_json::Value = response.json();
    let group_id = group["id"].as_str().unwrap();

    // Another trainer cannot delete the group
    let response = AxumTestRequest::delete(&format!("/api/v1/photo-groups/{group_id}"))
        .header("authorization", &other_bearer)
        .send(app)
        .await;
    assert_eq!(response.status(), 404);
}
