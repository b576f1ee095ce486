//! Shared fixtures: an in-process router over fake providers.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use reelpost_core::metadata::{ContentDetails, ExternalIds, MediaType, Video};
use reelpost_core::testing::{FakeChat, FakeMetadata, FakeProbe};
use reelpost_core::{PostService, ReelpostConfig};
use reelpost_search::MediaSearchService;
use reelpost_web::{AppState, build_router};
use serde_json::Value;
use tower::ServiceExt;

pub const TOKEN: &str = "test-token";
pub const WEBHOOK_SECRET: &str = "hook-secret";
pub const CHANNEL: &str = "@reelpost_films";
pub const FIGHT_CLUB_ORIGINAL: &str =
    "https://image.tmdb.org/t/p/original/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg";

pub struct TestApp {
    pub router: Router,
    pub chat: Arc<FakeChat>,
    pub probe: FakeProbe,
}

impl TestApp {
    pub fn new(config: ReelpostConfig, metadata: FakeMetadata, chat: FakeChat, probe: FakeProbe) -> Self {
        let metadata = Arc::new(metadata);
        let chat = Arc::new(chat);
        let post_service = PostService::new(
            &config,
            metadata.clone(),
            chat.clone(),
            Arc::new(probe.clone()),
        );
        let state = AppState::new(&config, post_service, MediaSearchService::new(metadata));

        Self {
            router: build_router(state),
            chat,
            probe,
        }
    }

    pub async fn call(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("authorization", format!("Bearer {TOKEN}"))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn webhook(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/bot")
        .header("x-telegram-bot-api-secret-token", WEBHOOK_SECRET)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", format!("Bearer {TOKEN}"))
        .body(Body::empty())
        .unwrap()
}

pub fn fight_club() -> ContentDetails {
    ContentDetails {
        title: "Fight Club".to_string(),
        overview: Some(
            "A ticking-time-bomb insomniac and a slippery soap salesman channel primal male \
             aggression into a shocking new form of therapy. Their concept catches on, with \
             underground \"fight clubs\" forming in every town, until an eccentric gets in the \
             way and ignites an out-of-control spiral toward oblivion."
                .to_string(),
        ),
        vote_average: Some(8.438),
        genres: vec!["Drama".to_string(), "Thriller".to_string(), "Comedy".to_string()],
        original_language: Some("en".to_string()),
        release_date: Some("1999-10-15".to_string()),
        poster_path: Some("/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg".to_string()),
    }
}

/// Movie 550 with its IMDb id and a YouTube trailer.
pub fn fight_club_metadata() -> FakeMetadata {
    FakeMetadata::new()
        .with_details(MediaType::Movie, 550, fight_club())
        .with_external_ids(
            MediaType::Movie,
            550,
            ExternalIds {
                imdb_id: Some("tt0137523".to_string()),
            },
        )
        .with_videos(
            MediaType::Movie,
            550,
            vec![Video {
                key: "qtRKdVHc-cE".to_string(),
                site: "YouTube".to_string(),
                kind: "Trailer".to_string(),
            }],
        )
}
