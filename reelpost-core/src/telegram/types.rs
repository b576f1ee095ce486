//! Bot API payloads, limited to the fields Reelpost reads or writes.

use serde::{Deserialize, Serialize};

/// Parse mode for every outgoing message.
pub const PARSE_MODE_HTML: &str = "HTML";

/// One inline button carrying either a URL or an opaque callback token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,
}

impl InlineKeyboardButton {
    pub fn url(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: Some(url.into()),
            callback_data: None,
        }
    }

    pub fn callback(text: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: None,
            callback_data: Some(data.into()),
        }
    }
}

/// Rows of inline buttons attached under a message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

impl InlineKeyboardMarkup {
    pub fn new(rows: Vec<Vec<InlineKeyboardButton>>) -> Self {
        Self {
            inline_keyboard: rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.inline_keyboard.iter().all(Vec::is_empty)
    }

    /// Iterates every button in row order.
    pub fn buttons(&self) -> impl Iterator<Item = &InlineKeyboardButton> {
        self.inline_keyboard.iter().flatten()
    }
}

/// Envelope every Bot API method answers with.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(default = "Option::default")]
    pub result: Option<T>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub error_code: Option<u16>,
    #[serde(default)]
    pub parameters: Option<ResponseParameters>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseParameters {
    #[serde(default)]
    pub retry_after: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub username: Option<String>,
}

impl User {
    /// `@username`, falling back to the first name for accounts without one.
    pub fn handle(&self) -> String {
        match &self.username {
            Some(name) => format!("@{name}"),
            None => self.first_name.clone(),
        }
    }
}

/// Membership of a user in a chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMember {
    pub status: String,
    pub user: User,
}

impl ChatMember {
    pub fn is_admin(&self) -> bool {
        matches!(self.status.as_str(), "administrator" | "creator")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    #[serde(default)]
    pub from: Option<User>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub data: Option<String>,
}

/// Inbound webhook payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SendPhoto<'a> {
    pub chat_id: &'a str,
    pub photo: &'a str,
    pub caption: &'a str,
    pub parse_mode: &'static str,
    #[serde(skip_serializing_if = "no_buttons")]
    pub reply_markup: &'a InlineKeyboardMarkup,
}

#[derive(Debug, Serialize)]
pub(crate) struct SendMessage<'a> {
    pub chat_id: &'a str,
    pub text: &'a str,
    pub parse_mode: &'static str,
    #[serde(skip_serializing_if = "no_buttons")]
    pub reply_markup: &'a InlineKeyboardMarkup,
}

fn no_buttons(markup: &&InlineKeyboardMarkup) -> bool {
    markup.is_empty()
}

#[derive(Debug, Serialize)]
pub(crate) struct GetChatMember<'a> {
    pub chat_id: &'a str,
    pub user_id: i64,
}

#[derive(Debug, Serialize)]
pub(crate) struct AnswerCallbackQuery<'a> {
    pub callback_query_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_serializes_only_its_target() {
        let button = InlineKeyboardButton::url("🎬 Watch Trailer", "https://youtu.be/x");
        let json = serde_json::to_value(&button).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"text": "🎬 Watch Trailer", "url": "https://youtu.be/x"})
        );
    }

    #[test]
    fn test_error_envelope_parses_retry_after() {
        let reply: ApiResponse<Message> = serde_json::from_str(
            r#"{"ok":false,"error_code":429,"description":"Too Many Requests: retry after 7","parameters":{"retry_after":7}}"#,
        )
        .unwrap();

        assert!(!reply.ok);
        assert!(reply.result.is_none());
        assert_eq!(reply.error_code, Some(429));
        assert_eq!(reply.parameters.unwrap().retry_after, Some(7));
    }

    #[test]
    fn test_chat_member_admin_statuses() {
        let member = |status: &str| ChatMember {
            status: status.to_string(),
            user: User {
                id: 1,
                is_bot: true,
                first_name: "bot".into(),
                username: Some("reel_bot".into()),
            },
        };

        assert!(member("administrator").is_admin());
        assert!(member("creator").is_admin());
        assert!(!member("member").is_admin());
        assert!(!member("left").is_admin());
        assert_eq!(member("left").user.handle(), "@reel_bot");
    }

    #[test]
    fn test_update_with_callback_query() {
        let update: Update = serde_json::from_value(serde_json::json!({
            "update_id": 10,
            "callback_query": {
                "id": "cb1",
                "from": {"id": 7, "is_bot": false, "first_name": "Sam"},
                "message": {"message_id": 3, "chat": {"id": 7, "type": "private"}},
                "data": "pick:movie:550"
            }
        }))
        .unwrap();

        let query = update.callback_query.unwrap();
        assert_eq!(query.data.as_deref(), Some("pick:movie:550"));
        assert_eq!(query.message.unwrap().chat.id, 7);
    }
}
