//! Telegram bot command responder.
//!
//! Text messages run a title search and answer with one button per
//! candidate. Pressing a button publishes that title through the same
//! `PostService` the HTTP endpoint uses.

pub mod callback;
pub mod commands;

use std::sync::Arc;

use reelpost_core::PostService;
use reelpost_core::post::PostRequest;
use reelpost_core::telegram::{
    CallbackQuery, ChatPlatform, InlineKeyboardButton, InlineKeyboardMarkup, Message,
    TelegramError, Update,
};
use reelpost_search::{MediaSearchError, MediaSearchService, SearchOutcome, candidate_label};
use tracing::{debug, info, warn};

pub use callback::{CallbackToken, MAX_CALLBACK_BYTES, TokenError};
pub use commands::{CannedReply, Command};

/// Handles inbound bot updates.
#[derive(Debug, Clone)]
pub struct BotResponder {
    chat: Arc<dyn ChatPlatform>,
    post_service: PostService,
    search_service: MediaSearchService,
}

impl BotResponder {
    pub fn new(post_service: PostService, search_service: MediaSearchService) -> Self {
        Self {
            chat: post_service.chat(),
            post_service,
            search_service,
        }
    }

    /// Dispatches one update.
    ///
    /// # Errors
    /// - `TelegramError` - A reply could not be sent
    pub async fn handle_update(&self, update: Update) -> Result<(), TelegramError> {
        if let Some(query) = update.callback_query {
            return self.handle_callback(query).await;
        }
        if let Some(message) = update.message {
            return self.handle_message(message).await;
        }
        debug!(update_id = update.update_id, "Ignoring update without message");
        Ok(())
    }

    async fn handle_message(&self, message: Message) -> Result<(), TelegramError> {
        let Some(text) = message.text.as_deref() else {
            return Ok(());
        };
        let chat_id = message.chat.id.to_string();

        match Command::parse(text) {
            Command::Start => self.reply_canned(&chat_id, commands::welcome()).await,
            Command::Help | Command::Unknown(_) => self.reply_canned(&chat_id, commands::help()).await,
            Command::Setup => self.reply_canned(&chat_id, commands::setup()).await,
            Command::Search(query) => self.reply_search(&chat_id, &query).await,
        }
    }

    async fn reply_canned(&self, chat_id: &str, reply: CannedReply) -> Result<(), TelegramError> {
        self.chat
            .send_message(chat_id, reply.text, &reply.keyboard)
            .await?;
        Ok(())
    }

    async fn reply_search(&self, chat_id: &str, query: &str) -> Result<(), TelegramError> {
        let none = InlineKeyboardMarkup::default();

        let (text, keyboard) = match self.search_service.search(query).await {
            Ok(SearchOutcome::Found(candidates)) => {
                let rows = candidates
                    .iter()
                    .map(|candidate| {
                        let token = CallbackToken::new(candidate.media_type, candidate.id);
                        vec![InlineKeyboardButton::callback(
                            candidate_label(candidate),
                            token.encode(),
                        )]
                    })
                    .collect();
                (
                    "🔍 <b>Pick a title to post:</b>".to_string(),
                    InlineKeyboardMarkup::new(rows),
                )
            }
            Ok(SearchOutcome::NoResults) => (commands::NO_RESULTS.to_string(), none),
            Err(MediaSearchError::EmptyQuery) => (commands::SEARCH_PROMPT.to_string(), none),
            Err(e) => {
                warn!(error = %e, "Bot search failed");
                (commands::SEARCH_FAILED.to_string(), none)
            }
        };

        self.chat.send_message(chat_id, &text, &keyboard).await?;
        Ok(())
    }

    async fn handle_callback(&self, query: CallbackQuery) -> Result<(), TelegramError> {
        let token = match query.data.as_deref().map(CallbackToken::decode) {
            Some(Ok(token)) => token,
            Some(Err(e)) => {
                debug!(error = %e, "Stale or malformed callback");
                return self.answer(&query.id, commands::EXPIRED_BUTTON).await;
            }
            None => return self.answer(&query.id, commands::EXPIRED_BUTTON).await,
        };

        let origin = query.message.as_ref().map(|m| m.chat.id.to_string());
        let Some(channel) = self
            .post_service
            .default_channel()
            .map(str::to_string)
            .or_else(|| origin.clone())
        else {
            return self.answer(&query.id, commands::NO_CHANNEL).await;
        };

        self.answer(&query.id, commands::POSTING).await?;

        info!(media_type = %token.media_type, id = token.id, %channel, "Posting from bot selection");
        let request = PostRequest {
            channel_id: Some(channel),
            ..PostRequest::new(token.media_type, token.id)
        };
        let outcome = self.post_service.publish(&request).await;

        if let Some(origin) = origin {
            self.chat
                .send_message(&origin, &outcome.message(), &InlineKeyboardMarkup::default())
                .await?;
        }
        Ok(())
    }

    async fn answer(&self, query_id: &str, text: &str) -> Result<(), TelegramError> {
        self.chat.answer_callback_query(query_id, Some(text)).await
    }
}

#[cfg(test)]
mod tests {
    use reelpost_core::ReelpostConfig;
    use reelpost_core::metadata::{ContentDetails, MediaType, SearchHit};
    use reelpost_core::telegram::{Chat, User};
    use reelpost_core::testing::{FakeChat, FakeMetadata, FakeProbe, SentKind};

    use super::*;

    const USER_CHAT: i64 = 777;

    fn responder(metadata: FakeMetadata, chat: Arc<FakeChat>, channel: Option<&str>) -> BotResponder {
        let mut config = ReelpostConfig::for_testing();
        config.telegram.default_channel = channel.map(str::to_string);
        let metadata = Arc::new(metadata);
        let post_service = PostService::new(
            &config,
            metadata.clone(),
            chat,
            Arc::new(FakeProbe::reachable(Vec::<String>::new())),
        );
        BotResponder::new(post_service, MediaSearchService::new(metadata))
    }

    fn user() -> User {
        User {
            id: 9,
            is_bot: false,
            first_name: "Sam".to_string(),
            username: None,
        }
    }

    fn user_message(text: &str) -> Message {
        Message {
            message_id: 1,
            chat: Chat {
                id: USER_CHAT,
                kind: Some("private".to_string()),
            },
            from: Some(user()),
            text: Some(text.to_string()),
        }
    }

    fn message(text: &str) -> Update {
        Update {
            update_id: 1,
            message: Some(user_message(text)),
            callback_query: None,
        }
    }

    fn press(data: &str) -> Update {
        Update {
            update_id: 2,
            message: None,
            callback_query: Some(CallbackQuery {
                id: "cb-1".to_string(),
                from: user(),
                message: Some(user_message("🔍 Pick a title to post:")),
                data: Some(data.to_string()),
            }),
        }
    }

    #[tokio::test]
    async fn test_start_sends_welcome() {
        let chat = Arc::new(FakeChat::new());
        let bot = responder(FakeMetadata::new(), chat.clone(), None);

        bot.handle_update(message("/start")).await.unwrap();

        let sent = chat.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].chat_id, USER_CHAT.to_string());
        assert!(sent[0].text.contains("Welcome"));
    }

    #[tokio::test]
    async fn test_free_text_lists_candidates() {
        let metadata = FakeMetadata::new().with_search_hits(vec![SearchHit {
            id: 550,
            media_type: "movie".to_string(),
            title: Some("Fight Club".to_string()),
            release_date: Some("1999-10-15".to_string()),
            popularity: Some(60.0),
            ..SearchHit::default()
        }]);
        let chat = Arc::new(FakeChat::new());
        let bot = responder(metadata, chat.clone(), None);

        bot.handle_update(message("Fight Club")).await.unwrap();

        let sent = chat.sent();
        let button = &sent[0].keyboard.inline_keyboard[0][0];
        assert_eq!(button.text, "🎬 Fight Club (1999)");
        assert_eq!(button.callback_data.as_deref(), Some("pick:movie:550"));
    }

    #[tokio::test]
    async fn test_empty_search_prompts() {
        let chat = Arc::new(FakeChat::new());
        let bot = responder(FakeMetadata::new(), chat.clone(), None);

        bot.handle_update(message("/search")).await.unwrap();

        assert_eq!(chat.sent()[0].text, commands::SEARCH_PROMPT);
    }

    #[tokio::test]
    async fn test_malformed_callback_never_posts() {
        let chat = Arc::new(FakeChat::new());
        let bot = responder(FakeMetadata::new(), chat.clone(), Some("@films"));

        bot.handle_update(press("pick:movie:abc")).await.unwrap();

        assert!(chat.sent().is_empty());
        assert_eq!(
            chat.callback_answers(),
            vec![("cb-1".to_string(), Some(commands::EXPIRED_BUTTON.to_string()))]
        );
    }

    #[tokio::test]
    async fn test_callback_posts_to_default_channel() {
        let metadata = FakeMetadata::new().with_details(
            MediaType::Movie,
            550,
            ContentDetails {
                title: "Fight Club".to_string(),
                ..ContentDetails::default()
            },
        );
        let chat = Arc::new(FakeChat::new().with_member_status("@films", "administrator"));
        let bot = responder(metadata, chat.clone(), Some("@films"));

        bot.handle_update(press("pick:movie:550")).await.unwrap();

        let sent = chat.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].chat_id, "@films");
        assert_eq!(sent[0].kind, SentKind::Text);
        assert_eq!(sent[1].chat_id, USER_CHAT.to_string());
        assert_eq!(sent[1].text, "✅ Content posted to Telegram (text only)");
        assert_eq!(chat.callback_answers().len(), 1);
    }
}
