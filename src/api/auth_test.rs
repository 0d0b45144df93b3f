//! Integration tests for the auth endpoints.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::api::{AppState, routes};
use crate::db::{SqlTaskStore, UserStore};
use crate::service::{AuthService, TaskService};

fn test_app() -> axum::Router {
    let state = AppState::new(
        TaskService::<SqlTaskStore>::in_memory(),
        AuthService::new(Arc::new(UserStore::with_demo_user())),
    );
    routes::create_router(state, &[])
}

async fn post(app: &axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn demo_login_succeeds() {
    let app = test_app();

    let (status, body) = post(
        &app,
        "/api/auth/login",
        json!({"email": "demo@taskforge.local", "password": "demo123"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "user": {"id": "demo-1", "email": "demo@taskforge.local", "name": "Demo User"},
            "token": "token_demo-1"
        })
    );
}

#[tokio::test]
async fn register_then_login_round_trip() {
    let app = test_app();

    let (status, registered) = post(
        &app,
        "/api/auth/register",
        json!({"email": "ada@example.com", "password": "pw", "name": "Ada"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(registered["user"]["email"], "ada@example.com");
    assert!(registered["user"].get("password").is_none());

    let (status, logged_in) = post(
        &app,
        "/api/auth/login",
        json!({"email": "ada@example.com", "password": "pw"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(logged_in["token"], registered["token"]);
}

#[tokio::test]
async fn register_missing_field_is_bad_request() {
    let (status, body) = post(
        &test_app(),
        "/api/auth/register",
        json!({"email": "ada@example.com", "password": "pw"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Name, email and password are required");
}

#[tokio::test]
async fn register_duplicate_is_conflict() {
    let (status, body) = post(
        &test_app(),
        "/api/auth/register",
        json!({"email": "demo@taskforge.local", "password": "x", "name": "Again"}),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "User already exists");
}

#[tokio::test]
async fn login_failures_are_unauthorized() {
    let app = test_app();

    let (status, body) = post(
        &app,
        "/api/auth/login",
        json!({"email": "nobody@example.com", "password": "pw"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "User not found");

    let (status, body) = post(
        &app,
        "/api/auth/login",
        json!({"email": "demo@taskforge.local", "password": "wrong"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid password");
}

#[tokio::test]
async fn login_missing_password_is_bad_request() {
    let (status, body) = post(
        &test_app(),
        "/api/auth/login",
        json!({"email": "demo@taskforge.local"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email and password are required");
}

#[tokio::test]
async fn task_endpoints_ignore_tokens() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/tasks")
                .header("authorization", "Bearer not-a-real-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_without_json_body_is_bad_request() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .body(Body::from("email=demo"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert!(body["error"].is_string());
}
