//! JSON API and webhook server for Reelpost
//!
//! Wires the post, search and webhook handlers behind CORS, request tracing
//! and panic recovery.

use std::sync::Arc;

use axum::Router;
use axum::http::Method;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::routing::{get, post};
use reelpost_core::{PostService, ReelpostConfig, ReelpostError};
use reelpost_search::MediaSearchService;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::bot::BotResponder;
use crate::handlers::system::panic_response;
use crate::handlers::{
    handle_post, handle_search, handle_webhook, health, not_found, post_method_fallback,
    preflight, webhook_method_fallback,
};

/// Shared, immutable per-process state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub post_service: PostService,
    pub search_service: MediaSearchService,
    pub bot: BotResponder,
    pub auth_token: Arc<str>,
    pub webhook_secret: Option<Arc<str>>,
}

impl AppState {
    /// Assembles state from already built services.
    pub fn new(
        config: &ReelpostConfig,
        post_service: PostService,
        search_service: MediaSearchService,
    ) -> Self {
        Self {
            bot: BotResponder::new(post_service.clone(), search_service.clone()),
            post_service,
            search_service,
            auth_token: Arc::from(config.server.auth_token.as_str()),
            webhook_secret: config.server.webhook_secret.as_deref().map(Arc::from),
        }
    }

    /// Builds state backed by the real TMDB and Telegram APIs.
    ///
    /// # Errors
    /// - `ReelpostError::Configuration` - If the HTTP client cannot be built
    pub fn from_config(config: &ReelpostConfig) -> Result<Self, ReelpostError> {
        let post_service = PostService::from_config(config)?;
        let search_service = MediaSearchService::new(post_service.metadata());
        Ok(Self::new(config, post_service, search_service))
    }
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
}

/// Builds the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/",
            post(handle_post)
                .options(preflight)
                .fallback(post_method_fallback),
        )
        .route(
            "/bot",
            post(handle_webhook)
                .options(preflight)
                .fallback(webhook_method_fallback),
        )
        .route("/search", get(handle_search).options(preflight))
        .route("/health", get(health))
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}

/// Runs the server until interrupted.
///
/// # Errors
/// - `ReelpostError::Configuration` - Missing credentials
/// - `ReelpostError::Io` - The listener could not bind or serve
pub async fn run_server(config: ReelpostConfig) -> Result<(), ReelpostError> {
    config.validate()?;

    let state = AppState::from_config(&config)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.server.bind_addr).await?;
    info!(addr = %config.server.bind_addr, "Reelpost server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Reelpost server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Could not listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use reelpost_core::testing::{FakeChat, FakeMetadata, FakeProbe};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::handlers::auth::WEBHOOK_SECRET_HEADER;

    fn app() -> Router {
        let config = ReelpostConfig::for_testing();
        let metadata = Arc::new(FakeMetadata::new());
        let post_service = PostService::new(
            &config,
            metadata.clone(),
            Arc::new(FakeChat::new()),
            Arc::new(FakeProbe::default()),
        );
        build_router(AppState::new(
            &config,
            post_service,
            MediaSearchService::new(metadata),
        ))
    }

    async fn send(request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Value) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, headers, body)
    }

    fn request(method: Method, uri: &str) -> axum::http::request::Builder {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("origin", "https://client.example")
    }

    #[tokio::test]
    async fn test_health() {
        let (status, _, body) = send(
            request(Method::GET, "/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_post_requires_bearer_token() {
        let (status, headers, body) = send(
            request(Method::POST, "/")
                .header("content-type", "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Unauthorized");
        assert_eq!(headers["access-control-allow-origin"], "*");
    }

    #[tokio::test]
    async fn test_wrong_method_checks_auth_first() {
        let (status, _, _) = send(
            request(Method::GET, "/")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _, body) = send(
            request(Method::GET, "/")
                .header("authorization", "Bearer test-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["error"], "Method not allowed");
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let (status, headers, _) = send(
            request(Method::OPTIONS, "/")
                .header("access-control-request-method", "POST")
                .header("access-control-request-headers", "content-type,authorization")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert!(status.is_success());
        assert_eq!(headers["access-control-allow-origin"], "*");
        let methods = headers["access-control-allow-methods"].to_str().unwrap();
        assert!(methods.contains("POST") && methods.contains("OPTIONS"));
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let (status, _, body) = send(
            request(Method::POST, "/")
                .header("authorization", "Bearer test-token")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Bad request");
    }

    #[tokio::test]
    async fn test_validation_names_field() {
        let (status, _, body) = send(
            request(Method::POST, "/")
                .header("authorization", "Bearer test-token")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"mediaType":"movie","channelId":"@films"}"#))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["field"], "contentId");
        assert_eq!(body["message"], "Missing contentId");
    }

    #[tokio::test]
    async fn test_webhook_accepts_secret_header() {
        let update = r#"{"update_id": 5}"#;
        let (status, _, body) = send(
            request(Method::POST, "/bot")
                .header(WEBHOOK_SECRET_HEADER, "hook-secret")
                .header("content-type", "application/json")
                .body(Body::from(update))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"], "ok");

        let (status, _, _) = send(
            request(Method::POST, "/bot")
                .header(WEBHOOK_SECRET_HEADER, "wrong")
                .header("content-type", "application/json")
                .body(Body::from(update))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_search_without_results() {
        let (status, _, body) = send(
            request(Method::GET, "/search?q=nothing%20here")
                .header("authorization", "Bearer test-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"], serde_json::json!([]));
        assert_eq!(body["message"], "No results found");
    }

    #[tokio::test]
    async fn test_unknown_path() {
        let (status, _, body) = send(
            request(Method::GET, "/nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Not found");
    }
}
