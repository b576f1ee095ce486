//! Messaging platform access.

pub mod client;
pub mod error;
pub mod types;

use async_trait::async_trait;

pub use client::TelegramClient;
pub use error::{PlatformRejection, TelegramError};
pub use types::{
    CallbackQuery, Chat, ChatMember, InlineKeyboardButton, InlineKeyboardMarkup, Message, Update,
    User,
};

/// Outbound calls Reelpost makes against the messaging platform.
///
/// Every method fails with `TelegramError::Rejected` when the platform
/// answers `ok: false`, and `TelegramError::Http` when it cannot be reached.
#[async_trait]
pub trait ChatPlatform: Send + Sync + std::fmt::Debug {
    /// Post a photo by URL with an HTML caption.
    ///
    /// # Errors
    /// - `TelegramError` - Transport failure or platform rejection
    async fn send_photo(
        &self,
        chat_id: &str,
        photo_url: &str,
        caption: &str,
        markup: &InlineKeyboardMarkup,
    ) -> Result<Message, TelegramError>;

    /// Post an HTML text message.
    ///
    /// # Errors
    /// - `TelegramError` - Transport failure or platform rejection
    async fn send_message(
        &self,
        chat_id: &str,
        text: &str,
        markup: &InlineKeyboardMarkup,
    ) -> Result<Message, TelegramError>;

    /// Identity of the bot itself.
    ///
    /// # Errors
    /// - `TelegramError` - Transport failure or platform rejection
    async fn get_me(&self) -> Result<User, TelegramError>;

    /// Membership of `user_id` in `chat_id`.
    ///
    /// # Errors
    /// - `TelegramError` - Transport failure or platform rejection
    async fn get_chat_member(&self, chat_id: &str, user_id: i64) -> Result<ChatMember, TelegramError>;

    /// Stop the loading spinner on a pressed inline button.
    ///
    /// # Errors
    /// - `TelegramError` - Transport failure or platform rejection
    async fn answer_callback_query(
        &self,
        callback_query_id: &str,
        text: Option<&str>,
    ) -> Result<(), TelegramError>;
}
