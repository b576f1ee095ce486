//! Posting movie 550 from the browser client.

use reelpost_core::ReelpostConfig;
use reelpost_core::testing::{FakeChat, FakeProbe, SentKind};
use serde_json::json;

use crate::support::{
    CHANNEL, FIGHT_CLUB_ORIGINAL, TestApp, fight_club_metadata, post_json,
};

#[tokio::test]
async fn test_movie_550_posts_with_poster() {
    let app = TestApp::new(
        ReelpostConfig::for_testing(),
        fight_club_metadata(),
        FakeChat::new().with_member_status(CHANNEL, "administrator"),
        FakeProbe::reachable([FIGHT_CLUB_ORIGINAL]),
    );

    let (status, body) = app
        .call(post_json(
            "/",
            &json!({"mediaType": "movie", "contentId": 550, "channelId": CHANNEL}),
        ))
        .await;

    assert_eq!(status, 200);
    assert_eq!(body, json!({"result": "✅ Posted to Telegram with poster!"}));

    let sent = app.chat.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].chat_id, CHANNEL);
    assert_eq!(
        sent[0].kind,
        SentKind::Photo {
            url: FIGHT_CLUB_ORIGINAL.to_string()
        }
    );

    let caption = &sent[0].text;
    assert!(caption.starts_with("🎥 <b>New Movie Added!</b>"));
    assert!(caption.contains("🎬 <b>Fight Club</b> (1999)"));
    assert!(caption.contains("⭐ <b>Rating:</b> 8.4/10"));
    assert!(caption.contains("🎭 <b>Genres:</b> Drama, Thriller, Comedy"));
    assert!(caption.contains(
        "... <a href=\"https://www.themoviedb.org/movie/550\">Read more</a>"
    ));

    let buttons: Vec<_> = sent[0]
        .keyboard
        .inline_keyboard
        .iter()
        .map(|row| row.iter().map(|b| b.text.as_str()).collect::<Vec<_>>())
        .collect();
    assert_eq!(buttons, vec![vec!["📌 IMDb Page"], vec!["🎬 Watch Trailer"]]);
}

#[tokio::test]
async fn test_movie_550_with_bot_never_added_to_channel() {
    // The platform refuses every photo because the bot cannot see the channel.
    let app = TestApp::new(
        ReelpostConfig::for_testing(),
        fight_club_metadata(),
        FakeChat::new().rejecting_all_photos(),
        FakeProbe::reachable([FIGHT_CLUB_ORIGINAL]),
    );

    let (status, body) = app
        .call(post_json(
            "/",
            &json!({"media_type": "movie", "tmdb_id": "550", "channel_id": CHANNEL}),
        ))
        .await;

    assert_eq!(status, 200);
    let result = &body["result"];
    assert_eq!(result["type"], "bot_admin_error");
    let username = result["botUsername"].as_str().unwrap();
    assert!(!username.is_empty());
    assert!(result["message"].as_str().unwrap().contains(username));
    assert!(!result["steps"].as_array().unwrap().is_empty());

    assert!(app.chat.sent().is_empty());
    assert_eq!(app.chat.photo_attempts().len(), 1);
}

#[tokio::test]
async fn test_channel_falls_back_to_configured_default() {
    let mut config = ReelpostConfig::for_testing();
    config.telegram.default_channel = Some(CHANNEL.to_string());
    let app = TestApp::new(
        config,
        fight_club_metadata(),
        FakeChat::new().with_member_status(CHANNEL, "creator"),
        FakeProbe::reachable(Vec::<String>::new()),
    );

    let (status, body) = app
        .call(post_json("/", &json!({"mediaType": "movie", "contentId": 550})))
        .await;

    assert_eq!(status, 200);
    assert_eq!(body["result"], "✅ Content posted to Telegram (text only)");
    assert_eq!(app.chat.sent()[0].chat_id, CHANNEL);
}

#[tokio::test]
async fn test_concurrent_posts_each_reach_their_channel() {
    let channels = ["@reel_one", "@reel_two", "@reel_three"];
    let chat = channels
        .iter()
        .fold(FakeChat::new(), |chat, channel| {
            chat.with_member_status(channel, "administrator")
        });
    let app = TestApp::new(
        ReelpostConfig::for_testing(),
        fight_club_metadata(),
        chat,
        FakeProbe::reachable([FIGHT_CLUB_ORIGINAL]),
    );

    let responses = futures::future::join_all(channels.iter().map(|channel| {
        app.call(post_json(
            "/",
            &json!({"mediaType": "movie", "contentId": 550, "channelId": channel}),
        ))
    }))
    .await;

    for (status, body) in responses {
        assert_eq!(status, 200);
        assert_eq!(body["result"], "✅ Posted to Telegram with poster!");
    }

    let mut delivered: Vec<String> = app.chat.sent().into_iter().map(|m| m.chat_id).collect();
    delivered.sort();
    assert_eq!(delivered, vec!["@reel_one", "@reel_three", "@reel_two"]);
    assert_eq!(app.probe.probed().len(), channels.len());
}
