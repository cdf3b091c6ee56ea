//! HTTP error mapping.
//!
//! Maps application errors to HTTP status codes and JSON bodies.
//!
//! # Strategy
//! - Access errors carry a generic message plus an `error_type` discriminator
//! - Sync errors follow the WCIF update contract: a `status` line, the
//!   human-readable `error`, and field-level `details` when available
//!
//! `NotFound` is rendered from the requested id only, so an absent
//! competition and a hidden one produce byte-identical responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

use super::{AccessError, SyncError};

/// Status line used for every failed WCIF events update
pub const SYNC_FAILURE_STATUS: &str = "Error while saving WCIF events";

/// Error returned from HTTP handlers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    Access(AccessError),
    Sync(SyncError),
    /// Malformed request that never reached the core (e.g. unparsable JSON)
    BadRequest(String),
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        ApiError::Access(err)
    }
}

impl From<SyncError> for ApiError {
    fn from(err: SyncError) -> Self {
        ApiError::Sync(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Access(err) => map_access_error(err),
            ApiError::Sync(err) => map_sync_error(err),
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": msg,
                    "error_type": "BadRequest"
                }),
            ),
        };
        (status, Json(body)).into_response()
    }
}

/// Maps an `AccessError` to a status code and JSON body.
pub fn map_access_error(error: &AccessError) -> (StatusCode, Value) {
    match error {
        AccessError::AuthenticationRequired => (
            StatusCode::UNAUTHORIZED,
            json!({
                "error": error.to_string(),
                "error_type": "AuthenticationRequired"
            }),
        ),

        AccessError::MissingScope(scope) => (
            StatusCode::FORBIDDEN,
            json!({
                "error": error.to_string(),
                "error_type": "MissingScope",
                "scope": scope
            }),
        ),

        AccessError::NotPermitted => (
            StatusCode::FORBIDDEN,
            json!({
                "error": error.to_string(),
                "error_type": "NotPermitted"
            }),
        ),

        AccessError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            json!({
                "error": error.to_string(),
                "error_type": "NotFound"
            }),
        ),

        AccessError::InvalidCsrfToken => (
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({
                "error": error.to_string(),
                "error_type": "InvalidCsrfToken"
            }),
        ),
    }
}

/// Maps a `SyncError` to a status code and JSON body.
pub fn map_sync_error(error: &SyncError) -> (StatusCode, Value) {
    match error {
        SyncError::SchemaInvalid(details) => (
            StatusCode::BAD_REQUEST,
            json!({
                "status": SYNC_FAILURE_STATUS,
                "error": error.to_string(),
                "error_type": "SchemaInvalid",
                "details": details
            }),
        ),

        SyncError::UnknownEventType(event_id) => (
            StatusCode::BAD_REQUEST,
            json!({
                "status": SYNC_FAILURE_STATUS,
                "error": error.to_string(),
                "error_type": "UnknownEventType",
                "event_id": event_id
            }),
        ),

        SyncError::PersistenceRejected(_) => (
            StatusCode::BAD_REQUEST,
            json!({
                "status": SYNC_FAILURE_STATUS,
                "error": error.to_string(),
                "error_type": "PersistenceRejected"
            }),
        ),

        SyncError::CompetitionVanished(_) => (
            StatusCode::NOT_FOUND,
            json!({
                "status": SYNC_FAILURE_STATUS,
                "error": error.to_string(),
                "error_type": "NotFound"
            }),
        ),
    }
}
