//! Post endpoint.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use reelpost_core::{DeliveryOutcome, PostRequest};
use serde_json::{Value, json};

use super::auth::Authorized;
use super::error::ApiError;
use crate::server::AppState;

/// `POST /` - publish one title to a channel.
///
/// # Errors
/// - `ApiError::BadRequest` - Body is not a JSON post request
/// - `ApiError::Validation` - A required field is missing or invalid
/// - `ApiError::Upstream` - Metadata or messaging service unreachable
pub async fn handle_post(
    _auth: Authorized,
    State(state): State<AppState>,
    payload: Result<Json<PostRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = payload?;
    outcome_response(state.post_service.publish(&request).await)
}

/// Maps a delivery outcome to the endpoint's response.
///
/// Terminal outcomes the caller can act on are `200 {result}`: the result
/// text, or the admin diagnostic object.
///
/// # Errors
/// - `ApiError::Validation` - For validation outcomes
/// - `ApiError::Upstream` - For network and admin-check failures
pub fn outcome_response(outcome: DeliveryOutcome) -> Result<Json<Value>, ApiError> {
    match outcome {
        DeliveryOutcome::AdminError(diagnostic) => Ok(Json(json!({"result": diagnostic}))),
        DeliveryOutcome::ValidationError(e) => Err(ApiError::Validation(e)),
        DeliveryOutcome::NetworkError { .. } => Err(ApiError::Upstream {
            error: "Network error",
            message: outcome.message(),
        }),
        DeliveryOutcome::AdminCheckFailed { .. } => Err(ApiError::Upstream {
            error: "Admin check failed",
            message: outcome.message(),
        }),
        other => Ok(Json(json!({"result": other.message()}))),
    }
}
