//! Error types for messaging platform access.

use thiserror::Error;

/// A failure the platform itself reported (`ok: false`), classified so
/// callers can show distinct text for rate limits and missing rights.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformRejection {
    #[error("rate limited, retry after {retry_after}s")]
    RateLimited { retry_after: u64 },

    #[error("forbidden: {description}")]
    Forbidden { description: String },

    #[error("error {error_code:?}: {description}")]
    Other {
        error_code: Option<u16>,
        description: String,
    },
}

impl PlatformRejection {
    /// Classifies an `ok: false` reply by code and description.
    pub fn classify(error_code: Option<u16>, description: String, retry_after: Option<u64>) -> Self {
        if error_code == Some(429) || retry_after.is_some() {
            return PlatformRejection::RateLimited {
                retry_after: retry_after.unwrap_or(1),
            };
        }

        let lowered = description.to_lowercase();
        let permission_text = lowered.contains("not enough rights")
            || lowered.contains("have no rights")
            || lowered.contains("chat_write_forbidden")
            || lowered.contains("need administrator rights");

        if error_code == Some(403) || permission_text {
            PlatformRejection::Forbidden { description }
        } else {
            PlatformRejection::Other {
                error_code,
                description,
            }
        }
    }

    /// Whether the refusal says the bot has no place in the chat: kicked,
    /// never added, or the chat itself unknown to it.
    pub fn denies_membership(&self) -> bool {
        match self {
            PlatformRejection::Forbidden { .. } => true,
            PlatformRejection::Other { description, .. } => {
                let lowered = description.to_lowercase();
                lowered.contains("not found")
                    || lowered.contains("not a member")
                    || lowered.contains("user_not_participant")
            }
            PlatformRejection::RateLimited { .. } => false,
        }
    }

    /// Text shown to whoever requested the post.
    pub fn user_message(&self) -> String {
        match self {
            PlatformRejection::RateLimited { retry_after } => {
                format!("⏳ Telegram rate limit hit, retry in {retry_after}s")
            }
            PlatformRejection::Forbidden { description } => {
                format!("🚫 Bot lacks permission to post: {description}")
            }
            PlatformRejection::Other { description, .. } => {
                format!("❌ Telegram error: {description}")
            }
        }
    }
}

/// Errors that can occur while calling the Bot API.
#[derive(Debug, Error)]
pub enum TelegramError {
    /// Transport failure: connect, timeout, or body read.
    /// The bot token is part of every method URL, so the URL is stripped.
    #[error("HTTP request failed: {0}")]
    Http(reqwest::Error),

    /// The platform answered and refused the call.
    #[error("Telegram rejected the request: {0}")]
    Rejected(PlatformRejection),

    /// The platform answered with something that is not a Bot API envelope.
    #[error("Malformed Telegram response (status {status}): {reason}")]
    Parse { status: u16, reason: String },
}

impl From<reqwest::Error> for TelegramError {
    fn from(error: reqwest::Error) -> Self {
        TelegramError::Http(error.without_url())
    }
}

impl TelegramError {
    pub fn rejection(&self) -> Option<&PlatformRejection> {
        match self {
            TelegramError::Rejected(rejection) => Some(rejection),
            _ => None,
        }
    }
}
