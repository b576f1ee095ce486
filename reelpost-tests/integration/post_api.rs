//! `POST /` request handling beyond the happy path.

use reelpost_core::ReelpostConfig;
use reelpost_core::metadata::MediaType;
use reelpost_core::telegram::PlatformRejection;
use reelpost_core::testing::{FakeChat, FakeMetadata, FakeProbe};
use serde_json::json;

use crate::support::{CHANNEL, TestApp, fight_club, fight_club_metadata, post_json};

fn admin_chat() -> FakeChat {
    FakeChat::new().with_member_status(CHANNEL, "administrator")
}

fn app(metadata: FakeMetadata, chat: FakeChat) -> TestApp {
    TestApp::new(
        ReelpostConfig::for_testing(),
        metadata,
        chat,
        FakeProbe::default(),
    )
}

#[tokio::test]
async fn test_episode_post_with_note_and_banner() {
    let metadata = FakeMetadata::new().with_details(MediaType::Tv, 1399, fight_club());
    let app = app(metadata, admin_chat());

    let (status, body) = app
        .call(post_json(
            "/",
            &json!({
                "mediaType": "tv",
                "contentId": "1399",
                "channelId": CHANNEL,
                "season": 3,
                "episode": "1",
                "note": "Dual audio",
                "bannerHtml": "<strong>Join</strong> <script>x</script>",
                "customLink": "https://example.com/watch/1399"
            }),
        ))
        .await;

    assert_eq!(status, 200);
    assert_eq!(body["result"], "✅ Content posted to Telegram (text only)");

    let sent = app.chat.sent();
    let text = &sent[0].text;
    assert!(text.starts_with("🦠 <b>New Episode Added!</b> - 🔊 S03 E01 🔥"));
    assert!(text.contains("💬 <b>Note:</b> Dual audio"));
    assert!(text.ends_with("<b>Join</b> &lt;script&gt;x&lt;/script&gt;"));
    assert_eq!(sent[0].keyboard.inline_keyboard[0][0].text, "🔗 Watch Here");
}

#[tokio::test]
async fn test_invalid_custom_link_names_the_field() {
    let app = app(fight_club_metadata(), admin_chat());

    let (status, body) = app
        .call(post_json(
            "/",
            &json!({
                "mediaType": "movie",
                "contentId": 550,
                "channelId": CHANNEL,
                "customLink": "ftp://example.com"
            }),
        ))
        .await;

    assert_eq!(status, 400);
    assert_eq!(body["field"], "customLink");
    assert!(app.chat.sent().is_empty());
}

#[tokio::test]
async fn test_missing_channel_without_default() {
    let app = app(fight_club_metadata(), admin_chat());

    let (status, body) = app
        .call(post_json("/", &json!({"mediaType": "movie", "contentId": 550})))
        .await;

    assert_eq!(status, 400);
    assert_eq!(body["field"], "channelId");
}

#[tokio::test]
async fn test_unknown_title_is_reported_not_found() {
    let app = app(FakeMetadata::new(), admin_chat());

    let (status, body) = app
        .call(post_json(
            "/",
            &json!({"mediaType": "movie", "contentId": 999999, "channelId": CHANNEL}),
        ))
        .await;

    assert_eq!(status, 200);
    assert_eq!(body, json!({"result": "❌ Content not found on TMDB"}));
}

#[tokio::test]
async fn test_metadata_outage_is_server_error() {
    let app = app(fight_club_metadata().failing_details(), admin_chat());

    let (status, body) = app
        .call(post_json(
            "/",
            &json!({"mediaType": "movie", "contentId": 550, "channelId": CHANNEL}),
        ))
        .await;

    assert_eq!(status, 500);
    assert_eq!(body["error"], "Network error");
    assert!(app.chat.sent().is_empty());
}

#[tokio::test]
async fn test_rate_limited_text_post_reports_retry() {
    let chat = admin_chat().rejecting_text(PlatformRejection::RateLimited { retry_after: 5 });
    let app = app(fight_club_metadata(), chat);

    let (status, body) = app
        .call(post_json(
            "/",
            &json!({"mediaType": "movie", "contentId": 550, "channelId": CHANNEL}),
        ))
        .await;

    assert_eq!(status, 200);
    assert_eq!(body["result"], "⏳ Telegram rate limit hit, retry in 5s");
}
