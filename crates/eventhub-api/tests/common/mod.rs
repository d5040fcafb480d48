//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use eventhub_booking::domain::policy::BookingPolicy;
use eventhub_store::pg_booking_store::PgBookingStore;
use eventhub_test_support::{FixedClock, InMemoryStore};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use eventhub_api::extractors::USER_ID_HEADER;
use eventhub_api::routes;
use eventhub_api::state::AppState;

/// Build the full app router over an in-memory store with the default
/// policy. Uses the same route structure as `main.rs`.
pub fn build_test_app(store: InMemoryStore) -> Router {
    build_test_app_with_policy(store, BookingPolicy::default())
}

/// Build the full app router over an in-memory store with `policy`.
pub fn build_test_app_with_policy(store: InMemoryStore, policy: BookingPolicy) -> Router {
    routes::app(AppState::from_store(Arc::new(store), policy))
}

/// Build the full app router over a real `PgBookingStore`.
pub fn build_pg_app(pool: PgPool) -> Router {
    let store = PgBookingStore::new(pool, Arc::new(FixedClock::default()));
    routes::app(AppState::from_store(Arc::new(store), BookingPolicy::default()))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a request with a JSON body on behalf of `user_id` and return the
/// response.
pub async fn send_json(
    app: Router,
    method: &str,
    uri: &str,
    user_id: i32,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(USER_ID_HEADER, user_id.to_string())
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a GET request on behalf of `user_id` and return the response.
pub async fn get_json_as(app: Router, uri: &str, user_id: i32) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .header(USER_ID_HEADER, user_id.to_string())
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Send an anonymous GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}
