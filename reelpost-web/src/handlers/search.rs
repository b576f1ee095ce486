//! Search endpoint.

use axum::Json;
use axum::extract::{Query, State};
use reelpost_search::SearchOutcome;
use serde::Deserialize;
use serde_json::{Value, json};

use super::auth::Authorized;
use super::error::ApiError;
use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// `GET /search?q=` - ranked movie and series candidates.
///
/// # Errors
/// - `ApiError::Search` - Empty query or provider failure
pub async fn handle_search(
    _auth: Authorized,
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Value>, ApiError> {
    let body = match state.search_service.search(&params.q).await? {
        SearchOutcome::Found(candidates) => json!({"result": candidates}),
        SearchOutcome::NoResults => json!({"result": [], "message": "No results found"}),
    };
    Ok(Json(body))
}
