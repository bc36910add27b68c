//! Integration tests for `POST /api/login` and general HTTP behaviour.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get, post_json};
use serde_json::json;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Test: correct credentials return success
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_with_correct_credentials_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(dir.path());

    let response = post_json(
        app,
        "/api/login",
        json!({"username": "admin", "password": "admin123"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Login successful");
}

// ---------------------------------------------------------------------------
// Test: wrong credentials return 401
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_with_wrong_password_returns_401() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(dir.path());

    let response = post_json(
        app,
        "/api/login",
        json!({"username": "admin", "password": "nope"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid credentials");
}

// ---------------------------------------------------------------------------
// Test: missing fields count as empty credentials
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_with_missing_fields_returns_401() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(dir.path());

    let response = post_json(app, "/api/login", json!({})).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Test: a request without a JSON body still gets a JSON error
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_without_json_body_returns_json_400() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(dir.path());

    // No content-type header, empty body.
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/login")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].is_string());
}

// ---------------------------------------------------------------------------
// Test: unknown route returns 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_route_returns_404() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(dir.path());

    let response = get(app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: x-request-id header is present in response
// ---------------------------------------------------------------------------

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(dir.path());

    let response = post_json(
        app,
        "/api/login",
        json!({"username": "admin", "password": "admin123"}),
    )
    .await;

    let request_id = response.headers().get("x-request-id");
    assert!(
        request_id.is_some(),
        "Response must contain an x-request-id header"
    );

    // The value should be a valid UUID (36 chars with hyphens).
    let id_str = request_id.unwrap().to_str().unwrap();
    assert_eq!(id_str.len(), 36, "x-request-id should be a UUID string");
}

// ---------------------------------------------------------------------------
// Test: health endpoint reports a degraded database as degraded, not 500
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_degraded_when_database_is_down() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(dir.path());

    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["db_healthy"], false);
    assert!(body["version"].is_string());
}
