//! Routes for the Hotel Booking context.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use eventhub_booking::application::command_handlers;
use eventhub_booking::application::query_handlers::{self, BookingView};
use eventhub_booking::domain::commands;
use eventhub_core::error::DomainError;
use eventhub_core::id::{BookingId, RoomId, ensure_positive};

use crate::error::ApiError;
use crate::extractors::{AuthenticatedUser, CorrelationId};
use crate::state::AppState;

/// Request body for POST / and PUT /{booking_id}.
#[derive(Debug, Deserialize)]
pub struct BookingRequest {
    /// The room to book. `roomId` is accepted for older clients.
    #[serde(alias = "roomId")]
    pub room_id: RoomId,
}

/// Response body returned after a booking is created or changed.
#[derive(Debug, Serialize)]
pub struct BookingResponse {
    /// The booking that was written.
    pub booking_id: BookingId,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct BookingHealthResponse {
    /// Fixed liveness message.
    pub status: &'static str,
}

fn room_from(payload: Result<Json<BookingRequest>, JsonRejection>) -> Result<RoomId, ApiError> {
    let Json(request) = payload.map_err(|e| DomainError::Validation(e.body_text()))?;
    Ok(ensure_positive("room_id", request.room_id)?)
}

/// GET /health
async fn booking_health() -> Json<BookingHealthResponse> {
    Json(BookingHealthResponse {
        status: "Booking OK!",
    })
}

/// GET /
#[instrument(skip(state))]
async fn get_booking(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> Result<Json<BookingView>, ApiError> {
    let view = query_handlers::get_booking(user_id, &state.policy, &state.repositories()).await?;
    Ok(Json(view))
}

/// POST /
#[instrument(skip(state, payload), fields(correlation_id = %correlation_id))]
async fn post_booking(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    CorrelationId(correlation_id): CorrelationId,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> Result<Json<BookingResponse>, ApiError> {
    let command = commands::CreateBooking {
        correlation_id,
        user_id,
        room_id: room_from(payload)?,
    };

    info!(room_id = command.room_id, "handling create booking command");

    let result =
        command_handlers::handle_create_booking(&command, &state.policy, &state.repositories())
            .await?;

    Ok(Json(BookingResponse {
        booking_id: result.booking_id,
    }))
}

/// PUT /{booking_id}
#[instrument(skip(state, path, payload), fields(correlation_id = %correlation_id))]
async fn put_booking(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    CorrelationId(correlation_id): CorrelationId,
    path: Result<Path<BookingId>, PathRejection>,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> Result<Json<BookingResponse>, ApiError> {
    let Path(booking_id) = path.map_err(|e| DomainError::Validation(e.body_text()))?;
    let command = commands::ChangeBookingRoom {
        correlation_id,
        user_id,
        room_id: room_from(payload)?,
        booking_id: ensure_positive("booking_id", booking_id)?,
    };

    info!(
        room_id = command.room_id,
        booking_id = command.booking_id,
        "handling change booking room command"
    );

    let result = command_handlers::handle_change_booking_room(
        &command,
        &state.policy,
        &state.repositories(),
    )
    .await?;

    Ok(Json(BookingResponse {
        booking_id: result.booking_id,
    }))
}

/// Returns the router for the booking context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_booking).post(post_booking))
        .route("/{booking_id}", put(put_booking))
        .route("/health", get(booking_health))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use eventhub_booking::domain::policy::{BookingPolicy, MissingEnrollmentPolicy};
    use eventhub_test_support::{FailingStore, InMemoryStore, room};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::extractors::USER_ID_HEADER;

    const USER: i32 = 1;
    const ROOM: i32 = 2;

    fn app_with(store: InMemoryStore) -> Router {
        router().with_state(AppState::from_store(Arc::new(store), BookingPolicy::default()))
    }

    fn request(method: &str, uri: &str, user: Option<i32>, body: Option<Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(user) = user {
            builder = builder.header(USER_ID_HEADER, user.to_string());
        }
        match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    #[tokio::test]
    async fn test_booking_health_returns_fixed_status() {
        // Arrange
        let app = app_with(InMemoryStore::new());

        // Act
        let (status, json) = send(app, request("GET", "/health", None, None)).await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "Booking OK!");
    }

    #[tokio::test]
    async fn test_get_booking_returns_projected_view() {
        // Arrange
        let store = InMemoryStore::new()
            .with_room(room(ROOM, 3))
            .with_booking(7, USER, ROOM);
        let app = app_with(store);

        // Act
        let (status, json) = send(app, request("GET", "/", Some(USER), None)).await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["id"], 7);
        assert_eq!(json["room_id"], ROOM);
        assert_eq!(json["room"]["capacity"], 3);
        assert!(json.get("created_at").is_none());
        assert!(json.get("user_id").is_none());
    }

    #[tokio::test]
    async fn test_get_booking_returns_404_without_booking() {
        let app = app_with(InMemoryStore::new());

        let (status, json) = send(app, request("GET", "/", Some(USER), None)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "not_found");
    }

    #[tokio::test]
    async fn test_requests_without_caller_return_401() {
        let app = app_with(InMemoryStore::new());

        let (status, json) = send(app, request("GET", "/", None, None)).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["error"], "unauthorized");
    }

    #[tokio::test]
    async fn test_post_booking_returns_new_booking_id() {
        // Arrange
        let store = InMemoryStore::new()
            .with_eligible_user(USER)
            .with_room(room(ROOM, 3))
            .with_booking(1, 10, ROOM)
            .with_booking(2, 11, ROOM);
        let app = app_with(store);
        let body = serde_json::json!({ "room_id": ROOM });

        // Act
        let (status, json) = send(app, request("POST", "/", Some(USER), Some(body))).await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["booking_id"], 3);
    }

    #[tokio::test]
    async fn test_post_booking_accepts_camel_case_room_id() {
        // Arrange
        let store = InMemoryStore::new()
            .with_eligible_user(USER)
            .with_room(room(ROOM, 3));
        let app = app_with(store);
        let body = serde_json::json!({ "roomId": ROOM });

        // Act
        let (status, json) = send(app, request("POST", "/", Some(USER), Some(body))).await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["booking_id"], 1);
    }

    #[tokio::test]
    async fn test_post_booking_returns_403_when_room_is_full() {
        let store = InMemoryStore::new()
            .with_eligible_user(USER)
            .with_room(room(ROOM, 2))
            .with_booking(1, 10, ROOM)
            .with_booking(2, 11, ROOM);
        let app = app_with(store);
        let body = serde_json::json!({ "room_id": ROOM });

        let (status, json) = send(app, request("POST", "/", Some(USER), Some(body))).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json["error"], "forbidden");
    }

    #[tokio::test]
    async fn test_post_booking_missing_enrollment_follows_policy() {
        // Arrange
        let body = serde_json::json!({ "room_id": ROOM });
        let default_app = app_with(InMemoryStore::new().with_room(room(ROOM, 1)));
        let strict_app = router().with_state(AppState::from_store(
            Arc::new(InMemoryStore::new().with_room(room(ROOM, 1))),
            BookingPolicy {
                missing_enrollment: MissingEnrollmentPolicy::Forbidden,
                ..BookingPolicy::default()
            },
        ));

        // Act
        let (default_status, _) =
            send(default_app, request("POST", "/", Some(USER), Some(body.clone()))).await;
        let (strict_status, _) =
            send(strict_app, request("POST", "/", Some(USER), Some(body))).await;

        // Assert
        assert_eq!(default_status, StatusCode::NOT_FOUND);
        assert_eq!(strict_status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_post_booking_rejects_bad_bodies_with_400() {
        for body in [
            serde_json::json!({}),
            serde_json::json!({ "room_id": "two" }),
            serde_json::json!({ "room_id": 0 }),
            serde_json::json!({ "room_id": -5 }),
        ] {
            let app = app_with(InMemoryStore::new().with_eligible_user(USER));

            let (status, json) =
                send(app, request("POST", "/", Some(USER), Some(body.clone()))).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
            assert_eq!(json["error"], "validation_error");
        }
    }

    #[tokio::test]
    async fn test_put_booking_moves_owned_booking() {
        // Arrange
        let store = InMemoryStore::new()
            .with_eligible_user(USER)
            .with_room(room(1, 1))
            .with_room(room(ROOM, 1))
            .with_booking(5, USER, 1);
        let app = app_with(store);
        let body = serde_json::json!({ "room_id": ROOM });

        // Act
        let (status, json) = send(app, request("PUT", "/5", Some(USER), Some(body))).await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["booking_id"], 5);
    }

    #[tokio::test]
    async fn test_put_booking_owned_by_someone_else_returns_403() {
        let store = InMemoryStore::new()
            .with_eligible_user(USER)
            .with_room(room(ROOM, 3))
            .with_booking(5, 2, 1);
        let app = app_with(store);
        let body = serde_json::json!({ "room_id": ROOM });

        let (status, _) = send(app, request("PUT", "/5", Some(USER), Some(body))).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_put_booking_rejects_non_positive_booking_id() {
        for uri in ["/0", "/abc"] {
            let app = app_with(InMemoryStore::new());
            let body = serde_json::json!({ "room_id": ROOM });

            let (status, _) = send(app, request("PUT", uri, Some(USER), Some(body))).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "uri {uri}");
        }
    }

    #[tokio::test]
    async fn test_store_failure_returns_500() {
        let app = router().with_state(AppState::from_store(
            Arc::new(FailingStore),
            BookingPolicy::default(),
        ));
        let body = serde_json::json!({ "room_id": ROOM });

        let (status, json) = send(app, request("POST", "/", Some(USER), Some(body))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "infrastructure_error");
    }
}
