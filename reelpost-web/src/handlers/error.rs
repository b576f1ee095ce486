//! Error responses.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use reelpost_core::ValidationError;
use reelpost_search::MediaSearchError;
use serde_json::json;

/// Every failure the API reports, rendered as `{error, message}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Missing or invalid authorization")]
    Unauthorized,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("No such endpoint")]
    NotFound,

    #[error("{message}")]
    BadRequest { message: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Search(#[from] MediaSearchError),

    /// A terminal failure of an upstream service.
    #[error("{message}")]
    Upstream { error: &'static str, message: String },

    /// A handler failed unexpectedly; `message` says how.
    #[error("{message}")]
    Internal { message: String },
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, body) = match self {
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                json!({"error": "Unauthorized", "message": message}),
            ),
            ApiError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                json!({"error": "Method not allowed", "message": message}),
            ),
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                json!({"error": "Not found", "message": message}),
            ),
            ApiError::BadRequest { .. } => (
                StatusCode::BAD_REQUEST,
                json!({"error": "Bad request", "message": message}),
            ),
            ApiError::Validation(e) => (
                StatusCode::BAD_REQUEST,
                json!({"error": "Validation error", "message": message, "field": e.field()}),
            ),
            ApiError::Search(e) if e.is_user_error() => (
                StatusCode::BAD_REQUEST,
                json!({"error": "Bad request", "message": message}),
            ),
            ApiError::Search(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": "Search failed", "message": message}),
            ),
            ApiError::Upstream { error, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": error, "message": message}),
            ),
            ApiError::Internal { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": "Internal server error", "message": message}),
            ),
        };

        (status, Json(body)).into_response()
    }
}
