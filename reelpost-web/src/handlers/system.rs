//! Health, preflight and fallback handlers.

use std::any::Any;

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use tracing::error;

use super::auth::{has_bearer, has_webhook_secret};
use super::error::ApiError;
use crate::server::AppState;

pub async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

/// Bare `OPTIONS`; the CORS layer adds the allow headers.
pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// Wrong method on `/`. Authentication is checked first.
pub async fn post_method_fallback(State(state): State<AppState>, headers: HeaderMap) -> ApiError {
    if has_bearer(&headers, &state) {
        ApiError::MethodNotAllowed
    } else {
        ApiError::Unauthorized
    }
}

/// Wrong method on `/bot`. Authentication is checked first.
pub async fn webhook_method_fallback(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiError {
    if has_webhook_secret(&headers, &state) || has_bearer(&headers, &state) {
        ApiError::MethodNotAllowed
    } else {
        ApiError::Unauthorized
    }
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Turns a handler panic into a JSON 500 carrying the panic message.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(detail, "Handler panicked");
    ApiError::Internal {
        message: detail.to_string(),
    }
    .into_response()
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn body_of(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_panic_message_reaches_body() {
        let response = panic_response(Box::new("poster cache poisoned"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_of(response).await,
            json!({"error": "Internal server error", "message": "poster cache poisoned"})
        );

        let formatted = panic_response(Box::new(format!("index {} out of range", 3)));
        assert_eq!(body_of(formatted).await["message"], "index 3 out of range");
    }

    #[tokio::test]
    async fn test_opaque_panic_payload() {
        let response = panic_response(Box::new(42_u8));
        assert_eq!(body_of(response).await["message"], "unknown panic");
    }
}
