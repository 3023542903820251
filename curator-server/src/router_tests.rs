#![allow(clippy::unwrap_used, reason = "test code")]

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use super::build_router;
use crate::test_helpers::{test_app_state, TEST_ADMIN_KEY};

fn app() -> Router {
    let (state, backend) = test_app_state();
    backend.seed(
        "videos",
        vec![json!({
            "id": "v1",
            "video_id": "aaaaaaaaaaa",
            "title": "Halving",
            "is_approved": true,
        })],
    );
    build_router(state)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health_is_public() {
    let (status, body) = send(app(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_public_listing_through_router() {
    let (status, body) = send(app(), get("/api/videos?sort=title&page=1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_count"], 1);
    assert_eq!(body["items"][0]["title"], "Halving");
}

#[tokio::test]
async fn test_static_segment_wins_over_param() {
    let (status, body) = send(app(), get("/api/videos/latest?limit=3")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_array());
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let (status, body) = send(app(), get("/api/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not found");
}

#[tokio::test]
async fn test_admin_requires_key() {
    let (status, _) = send(app(), get("/api/admin/dashboard")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let wrong = Request::builder()
        .uri("/api/admin/dashboard")
        .header(header::AUTHORIZATION, "Bearer not-the-key")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(app(), wrong).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_accepts_bearer_and_header_key() {
    let bearer = Request::builder()
        .uri("/api/admin/dashboard")
        .header(header::AUTHORIZATION, format!("Bearer {TEST_ADMIN_KEY}"))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app(), bearer).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["videos"], 1);

    let api_key = Request::builder()
        .uri("/api/admin/sync/status")
        .header("x-api-key", TEST_ADMIN_KEY)
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app(), api_key).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["last_sync_label"], "never");
}

#[tokio::test]
async fn test_contact_post_validates() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/contact")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "name": "A", "email": "not-an-email", "message": "long enough message" })
                .to_string(),
        ))
        .unwrap();
    let (status, body) = send(app(), request).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("email"));
}
