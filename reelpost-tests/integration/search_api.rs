//! `GET /search` against a fake catalogue.

use reelpost_core::ReelpostConfig;
use reelpost_core::metadata::SearchHit;
use reelpost_core::testing::{FakeChat, FakeMetadata, FakeProbe};
use serde_json::json;

use crate::support::{TestApp, get};

fn hit(id: u64, media_type: &str, title: &str, date: &str, popularity: f64) -> SearchHit {
    SearchHit {
        id,
        media_type: media_type.to_string(),
        title: (media_type == "movie").then(|| title.to_string()),
        name: (media_type != "movie").then(|| title.to_string()),
        release_date: (media_type == "movie").then(|| date.to_string()),
        first_air_date: (media_type != "movie").then(|| date.to_string()),
        popularity: Some(popularity),
        vote_count: Some(100),
        ..SearchHit::default()
    }
}

fn catalogue() -> FakeMetadata {
    FakeMetadata::new().with_search_hits(vec![
        hit(550, "movie", "Fight Club", "1999-10-15", 60.0),
        hit(1234, "movie", "Fight Club", "2023-02-01", 80.0),
        hit(7, "person", "Brad Pitt", "", 99.0),
        hit(4040, "tv", "Fight Club Stories", "2010-05-05", 5.0),
    ])
}

fn app(metadata: FakeMetadata) -> TestApp {
    TestApp::new(
        ReelpostConfig::for_testing(),
        metadata,
        FakeChat::new(),
        FakeProbe::default(),
    )
}

#[tokio::test]
async fn test_search_ranks_movies_and_series_by_popularity() {
    let app = app(catalogue());

    let (status, body) = app.call(get("/search?q=Fight%20Club")).await;

    assert_eq!(status, 200);
    let ids: Vec<u64> = body["result"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![1234, 550, 4040]);
    assert_eq!(body["result"][2]["mediaType"], "tv");
    assert_eq!(body["result"][2]["title"], "Fight Club Stories");
}

#[tokio::test]
async fn test_search_year_narrows_candidates() {
    let app = app(catalogue());

    let (status, body) = app.call(get("/search?q=Fight%20Club%20(1999)")).await;

    assert_eq!(status, 200);
    assert_eq!(
        body["result"],
        json!([{
            "id": 550,
            "title": "Fight Club",
            "mediaType": "movie",
            "year": "1999",
            "popularity": 60.0,
            "voteCount": 100,
            "posterPath": null
        }])
    );
}

#[tokio::test]
async fn test_search_without_matches() {
    let app = app(FakeMetadata::new());

    let (status, body) = app.call(get("/search?q=zzzz")).await;

    assert_eq!(status, 200);
    assert_eq!(body, json!({"result": [], "message": "No results found"}));
}

#[tokio::test]
async fn test_search_rejects_blank_query() {
    let app = app(catalogue());

    let (status, body) = app.call(get("/search?q=%20%20")).await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "Bad request");
}

#[tokio::test]
async fn test_search_provider_outage_is_server_error() {
    let app = app(catalogue().failing_search());

    let (status, body) = app.call(get("/search?q=Fight%20Club")).await;

    assert_eq!(status, 500);
    assert_eq!(body["error"], "Search failed");
}
