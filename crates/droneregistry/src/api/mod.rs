//! HTTP API for droneregistry.
//!
//! This module exposes the registry over HTTP: listing registrations and
//! creating new ones. It is the sole boundary translating storage errors
//! into HTTP responses; nothing below it knows about status codes.

pub mod server;

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use crate::registration::{NewRegistration, Registration};
use crate::storage::Storage;

/// Generic message returned for unexpected storage failures.
///
/// Details are logged server-side and never exposed to the client.
const SERVER_ERROR_MESSAGE: &str = "server error";

/// Confirmation message returned when a registration is created.
const REGISTERED_MESSAGE: &str = "drone registered";

/// Shared state for the API handlers.
///
/// The storage handle is injected here rather than reached through a global;
/// the mutex serializes access to the single database connection.
#[derive(Debug)]
pub struct ApiState {
    /// The storage handle, shared across handlers.
    pub storage: Mutex<Storage>,
}

impl ApiState {
    /// Create API state around an opened storage handle.
    #[must_use]
    pub fn new(storage: Storage) -> Self {
        Self {
            storage: Mutex::new(storage),
        }
    }
}

/// Error body returned for 400 and 500 responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

/// Confirmation body returned for successful creation.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable confirmation message.
    pub message: String,
}

/// Build the API router.
///
/// CORS is permissive: the registration form is served from a different
/// origin than the API.
pub fn router(state: Arc<ApiState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/drones", get(list_drones_handler))
        .route("/api/drones", post(register_drone_handler))
        .layer(cors)
        .with_state(state)
}

/// Build a 400 response with a specific message.
fn bad_request(message: String) -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: message }))
}

/// Build a generic 500 response.
fn server_error() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: SERVER_ERROR_MESSAGE.to_string(),
        }),
    )
}

/// `GET /api/drones` — list all registrations, newest first.
async fn list_drones_handler(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Registration>>, (StatusCode, Json<ErrorResponse>)> {
    let storage = state.storage.lock().await;
    match storage.list() {
        Ok(registrations) => Ok(Json(registrations)),
        Err(e) => {
            error!("Failed to list registrations: {}", e);
            Err(server_error())
        }
    }
}

/// `POST /api/drones` — create a registration.
///
/// Validation happens before any storage access. On success only a
/// confirmation is returned; clients re-list to observe generated fields.
async fn register_drone_handler(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<NewRegistration>,
) -> Result<(StatusCode, Json<MessageResponse>), (StatusCode, Json<ErrorResponse>)> {
    if let Err(e) = request.validate() {
        return Err(bad_request(e.to_string()));
    }

    let storage = state.storage.lock().await;
    match storage.insert(&request) {
        Ok(id) => {
            info!("Registered drone '{}' with id {}", request.serial, id);
            Ok((
                StatusCode::CREATED,
                Json(MessageResponse {
                    message: REGISTERED_MESSAGE.to_string(),
                }),
            ))
        }
        Err(e) if e.is_duplicate_serial() => Err(bad_request(e.to_string())),
        Err(e) => {
            error!("Failed to insert registration: {}", e);
            Err(server_error())
        }
    }
}
