//! Telegram Bot API client.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::types::{
    AnswerCallbackQuery, ApiResponse, ChatMember, GetChatMember, InlineKeyboardMarkup, Message,
    PARSE_MODE_HTML, SendMessage, SendPhoto, User,
};
use super::{ChatPlatform, PlatformRejection, TelegramError};
use crate::config::TelegramConfig;

/// Messaging platform backed by the Telegram Bot API.
#[derive(Clone)]
pub struct TelegramClient {
    client: reqwest::Client,
    config: TelegramConfig,
}

// The bot token is part of every method URL, keep it out of debug output.
impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClient")
            .field("api_base_url", &self.config.api_base_url)
            .finish_non_exhaustive()
    }
}

impl TelegramClient {
    /// Create a client sharing an already configured `reqwest::Client`.
    pub fn new(client: reqwest::Client, config: TelegramConfig) -> Self {
        Self { client, config }
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.config.api_base_url, self.config.bot_token, method
        )
    }

    async fn call<B, T>(&self, method: &str, body: &B) -> Result<T, TelegramError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned + Send,
    {
        debug!(method, "Telegram request");

        let response = self
            .client
            .post(self.method_url(method))
            .json(body)
            .send()
            .await?;

        // Failures still carry a JSON envelope with a 4xx status.
        let status = response.status().as_u16();
        let text = response.text().await?;
        let reply: ApiResponse<T> =
            serde_json::from_str(&text).map_err(|e| TelegramError::Parse {
                status,
                reason: e.to_string(),
            })?;

        match (reply.ok, reply.result) {
            (true, Some(result)) => Ok(result),
            (true, None) => Err(TelegramError::Parse {
                status,
                reason: "ok response without result".to_string(),
            }),
            (false, _) => Err(TelegramError::Rejected(PlatformRejection::classify(
                reply.error_code,
                reply
                    .description
                    .unwrap_or_else(|| "Unknown error".to_string()),
                reply.parameters.and_then(|p| p.retry_after),
            ))),
        }
    }
}

#[async_trait]
impl ChatPlatform for TelegramClient {
    async fn send_photo(
        &self,
        chat_id: &str,
        photo_url: &str,
        caption: &str,
        markup: &InlineKeyboardMarkup,
    ) -> Result<Message, TelegramError> {
        let body = SendPhoto {
            chat_id,
            photo: photo_url,
            caption,
            parse_mode: PARSE_MODE_HTML,
            reply_markup: markup,
        };
        self.call("sendPhoto", &body).await
    }

    async fn send_message(
        &self,
        chat_id: &str,
        text: &str,
        markup: &InlineKeyboardMarkup,
    ) -> Result<Message, TelegramError> {
        let body = SendMessage {
            chat_id,
            text,
            parse_mode: PARSE_MODE_HTML,
            reply_markup: markup,
        };
        self.call("sendMessage", &body).await
    }

    async fn get_me(&self) -> Result<User, TelegramError> {
        self.call("getMe", &serde_json::json!({})).await
    }

    async fn get_chat_member(&self, chat_id: &str, user_id: i64) -> Result<ChatMember, TelegramError> {
        self.call("getChatMember", &GetChatMember { chat_id, user_id })
            .await
    }

    async fn answer_callback_query(
        &self,
        callback_query_id: &str,
        text: Option<&str>,
    ) -> Result<(), TelegramError> {
        let _: bool = self
            .call(
                "answerCallbackQuery",
                &AnswerCallbackQuery {
                    callback_query_id,
                    text,
                },
            )
            .await?;
        Ok(())
    }
}
