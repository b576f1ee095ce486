//! Terminal results of a post request.

use serde::Serialize;

use crate::post::ValidationError;
use crate::telegram::{PlatformRejection, User};

pub const POSTED_WITH_PHOTO: &str = "✅ Posted to Telegram with poster!";
pub const POSTED_TEXT_ONLY: &str = "✅ Content posted to Telegram (text only)";
pub const NOT_FOUND: &str = "❌ Content not found on TMDB";

pub const BOT_ADMIN_ERROR: &str = "bot_admin_error";

/// Structured explanation returned when the bot cannot post to a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDiagnostic {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub message: String,
    pub bot_username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bot_link: Option<String>,
    pub steps: Vec<String>,
}

impl AdminDiagnostic {
    /// The bot is not in the channel at all.
    pub fn not_member(bot: &User, reason: &str) -> Self {
        Self::new(
            bot,
            format!("Bot {} is not a member of this channel ({reason})", bot.handle()),
        )
    }

    /// The bot is in the channel without admin rights.
    pub fn not_admin(bot: &User, status: &str) -> Self {
        Self::new(
            bot,
            format!(
                "Bot {} is not an admin in this channel (status: {status})",
                bot.handle()
            ),
        )
    }

    fn new(bot: &User, message: String) -> Self {
        let handle = bot.handle();
        Self {
            kind: BOT_ADMIN_ERROR,
            message,
            bot_link: bot.username.as_ref().map(|name| format!("https://t.me/{name}")),
            steps: vec![
                format!("Add {handle} to your channel"),
                "Open the channel info and go to Administrators".to_string(),
                format!("Promote {handle} to admin"),
                "Enable the \"Post Messages\" permission".to_string(),
                "Save and send the post again".to_string(),
            ],
            bot_username: handle,
        }
    }
}

/// How a post request ended.
#[derive(Debug, Clone, PartialEq)]
pub enum DeliveryOutcome {
    PostedWithPhoto { photo_url: String },
    PostedTextOnly,
    NotFound,
    /// The bot is missing from the channel or lacks admin rights.
    AdminError(AdminDiagnostic),
    /// Admin status could not be determined.
    AdminCheckFailed { reason: String },
    /// The platform refused the final text send.
    Rejected(PlatformRejection),
    ValidationError(ValidationError),
    NetworkError { reason: String },
}

impl DeliveryOutcome {
    pub fn is_posted(&self) -> bool {
        matches!(
            self,
            DeliveryOutcome::PostedWithPhoto { .. } | DeliveryOutcome::PostedTextOnly
        )
    }

    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            DeliveryOutcome::PostedWithPhoto { .. } => "posted_with_photo",
            DeliveryOutcome::PostedTextOnly => "posted_text_only",
            DeliveryOutcome::NotFound => "not_found",
            DeliveryOutcome::AdminError(_) => "admin_error",
            DeliveryOutcome::AdminCheckFailed { .. } => "admin_check_failed",
            DeliveryOutcome::Rejected(_) => "rejected",
            DeliveryOutcome::ValidationError(_) => "validation_error",
            DeliveryOutcome::NetworkError { .. } => "network_error",
        }
    }

    /// Text shown to whoever asked for the post.
    pub fn message(&self) -> String {
        match self {
            DeliveryOutcome::PostedWithPhoto { .. } => POSTED_WITH_PHOTO.to_string(),
            DeliveryOutcome::PostedTextOnly => POSTED_TEXT_ONLY.to_string(),
            DeliveryOutcome::NotFound => NOT_FOUND.to_string(),
            DeliveryOutcome::AdminError(diagnostic) => format!("❌ {}", diagnostic.message),
            DeliveryOutcome::AdminCheckFailed { reason } => {
                format!("❌ Could not verify bot admin status: {reason}")
            }
            DeliveryOutcome::Rejected(rejection) => rejection.user_message(),
            DeliveryOutcome::ValidationError(error) => format!("❌ {error}"),
            DeliveryOutcome::NetworkError { reason } => format!("❌ Network error: {reason}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bot() -> User {
        User {
            id: 42,
            is_bot: true,
            first_name: "Reelpost".to_string(),
            username: Some("reelpost_bot".to_string()),
        }
    }

    #[test]
    fn test_diagnostic_serializes_with_bot_handle() {
        let diagnostic = AdminDiagnostic::not_member(&bot(), "chat not found");
        let json = serde_json::to_value(&diagnostic).unwrap();

        assert_eq!(json["type"], "bot_admin_error");
        assert_eq!(json["botUsername"], "@reelpost_bot");
        assert_eq!(json["botLink"], "https://t.me/reelpost_bot");
        assert!(json["message"].as_str().unwrap().contains("@reelpost_bot"));
        assert_eq!(json["steps"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_outcome_messages() {
        assert_eq!(
            DeliveryOutcome::PostedWithPhoto {
                photo_url: "x".into()
            }
            .message(),
            POSTED_WITH_PHOTO
        );
        assert_eq!(DeliveryOutcome::NotFound.message(), NOT_FOUND);
        assert_eq!(
            DeliveryOutcome::NetworkError {
                reason: "timeout".into()
            }
            .message(),
            "❌ Network error: timeout"
        );
        assert_eq!(
            DeliveryOutcome::Rejected(PlatformRejection::RateLimited { retry_after: 5 }).message(),
            "⏳ Telegram rate limit hit, retry in 5s"
        );
        assert!(DeliveryOutcome::PostedTextOnly.is_posted());
        assert!(!DeliveryOutcome::NotFound.is_posted());
    }
}
