//! Telegram webhook endpoint.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use reelpost_core::telegram::Update;
use serde_json::{Value, json};
use tracing::warn;

use super::auth::WebhookAuthorized;
use crate::server::AppState;

/// `POST /bot` - always acknowledges once authenticated, so the platform
/// does not redeliver an update that failed to process.
pub async fn handle_webhook(
    _auth: WebhookAuthorized,
    State(state): State<AppState>,
    payload: Result<Json<Update>, JsonRejection>,
) -> Json<Value> {
    match payload {
        Ok(Json(update)) => {
            if let Err(e) = state.bot.handle_update(update).await {
                warn!(error = %e, "Bot update handling failed");
            }
        }
        Err(rejection) => warn!(reason = %rejection.body_text(), "Unreadable webhook update"),
    }

    Json(json!({"result": "ok"}))
}
