//! Request authentication extractors.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use super::error::ApiError;
use crate::server::AppState;

pub const WEBHOOK_SECRET_HEADER: &str = "x-telegram-bot-api-secret-token";

/// Compares secrets without short-circuiting on the first differing byte.
fn secrets_match(given: &str, expected: &str) -> bool {
    if expected.is_empty() || given.len() != expected.len() {
        return false;
    }
    given
        .bytes()
        .zip(expected.bytes())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

/// Whether the request carries `Authorization: Bearer <auth_token>`.
pub fn has_bearer(headers: &HeaderMap, state: &AppState) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .is_some_and(|token| secrets_match(token.trim(), &state.auth_token))
}

/// Whether the request carries the webhook secret header.
pub fn has_webhook_secret(headers: &HeaderMap, state: &AppState) -> bool {
    let Some(expected) = state.webhook_secret.as_deref() else {
        return false;
    };
    headers
        .get(WEBHOOK_SECRET_HEADER)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|secret| secrets_match(secret, expected))
}

/// Bearer-authenticated caller.
#[derive(Debug, Clone, Copy)]
pub struct Authorized;

impl FromRequestParts<AppState> for Authorized {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if has_bearer(&parts.headers, state) {
            Ok(Authorized)
        } else {
            Err(ApiError::Unauthorized)
        }
    }
}

/// Webhook caller: the platform's secret header or the bearer token.
#[derive(Debug, Clone, Copy)]
pub struct WebhookAuthorized;

impl FromRequestParts<AppState> for WebhookAuthorized {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if has_webhook_secret(&parts.headers, state) || has_bearer(&parts.headers, state) {
            Ok(WebhookAuthorized)
        } else {
            Err(ApiError::Unauthorized)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secrets_match() {
        assert!(secrets_match("abc", "abc"));
        assert!(!secrets_match("abd", "abc"));
        assert!(!secrets_match("ab", "abc"));
        assert!(!secrets_match("", ""));
    }
}
