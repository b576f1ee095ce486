//! `POST /bot`: search from a private chat, then publish by button.

use axum::body::Body;
use axum::http::Request;
use reelpost_core::ReelpostConfig;
use reelpost_core::metadata::SearchHit;
use reelpost_core::testing::{FakeChat, FakeProbe, SentKind};
use serde_json::{Value, json};

use crate::support::{CHANNEL, TestApp, fight_club_metadata, webhook};

const USER_CHAT: i64 = 31337;

fn text_update(text: &str) -> Value {
    json!({
        "update_id": 1,
        "message": {
            "message_id": 10,
            "chat": {"id": USER_CHAT, "type": "private"},
            "from": {"id": 5, "is_bot": false, "first_name": "Robin"},
            "text": text
        }
    })
}

fn button_update(data: &str) -> Value {
    json!({
        "update_id": 2,
        "callback_query": {
            "id": "cb-1",
            "from": {"id": 5, "is_bot": false, "first_name": "Robin"},
            "message": {"message_id": 11, "chat": {"id": USER_CHAT, "type": "private"}},
            "data": data
        }
    })
}

fn app() -> TestApp {
    let mut config = ReelpostConfig::for_testing();
    config.telegram.default_channel = Some(CHANNEL.to_string());

    let metadata = fight_club_metadata().with_search_hits(vec![SearchHit {
        id: 550,
        media_type: "movie".to_string(),
        title: Some("Fight Club".to_string()),
        release_date: Some("1999-10-15".to_string()),
        popularity: Some(61.4),
        vote_count: Some(29000),
        ..SearchHit::default()
    }]);

    TestApp::new(
        config,
        metadata,
        FakeChat::new().with_member_status(CHANNEL, "administrator"),
        FakeProbe::default(),
    )
}

#[tokio::test]
async fn test_title_message_offers_candidate_buttons() {
    let app = app();

    let (status, body) = app.call(webhook(&text_update("Fight Club 1999"))).await;

    assert_eq!(status, 200);
    assert_eq!(body, json!({"result": "ok"}));

    let sent = app.chat.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].chat_id, USER_CHAT.to_string());
    let button = &sent[0].keyboard.inline_keyboard[0][0];
    assert_eq!(button.text, "🎬 Fight Club (1999)");
    assert_eq!(button.callback_data.as_deref(), Some("pick:movie:550"));
}

#[tokio::test]
async fn test_pressing_candidate_posts_to_default_channel() {
    let app = app();

    let (status, _) = app.call(webhook(&button_update("pick:movie:550"))).await;
    assert_eq!(status, 200);

    let sent = app.chat.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].chat_id, CHANNEL);
    assert_eq!(sent[0].kind, SentKind::Text);
    assert!(sent[0].text.contains("🎬 <b>Fight Club</b> (1999)"));
    assert_eq!(sent[1].chat_id, USER_CHAT.to_string());
    assert_eq!(sent[1].text, "✅ Content posted to Telegram (text only)");

    let answers = app.chat.callback_answers();
    assert_eq!(answers.len(), 1);
    assert_eq!(answers[0].0, "cb-1");
}

#[tokio::test]
async fn test_forged_button_is_answered_as_expired() {
    let app = app();

    let (status, _) = app.call(webhook(&button_update("pick:person:287"))).await;

    assert_eq!(status, 200);
    assert!(app.chat.sent().is_empty());
    assert_eq!(
        app.chat.callback_answers()[0].1.as_deref(),
        Some("⌛ This button has expired, search again")
    );
}

#[tokio::test]
async fn test_unreadable_update_is_still_acknowledged() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri("/bot")
        .header("x-telegram-bot-api-secret-token", crate::support::WEBHOOK_SECRET)
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = app.call(request).await;

    assert_eq!(status, 200);
    assert_eq!(body, json!({"result": "ok"}));
    assert!(app.chat.sent().is_empty());
}

#[tokio::test]
async fn test_webhook_requires_secret() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri("/bot")
        .header("content-type", "application/json")
        .body(Body::from(text_update("/start").to_string()))
        .unwrap();

    let (status, body) = app.call(request).await;

    assert_eq!(status, 401);
    assert_eq!(body["error"], "Unauthorized");
    assert!(app.chat.sent().is_empty());
}
