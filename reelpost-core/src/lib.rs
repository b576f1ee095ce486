//! Reelpost Core - Metadata lookup, post composition and channel delivery
//!
//! This crate provides the building blocks for reposting movie and TV titles
//! to a messaging channel: the TMDB and Telegram clients, HTML post
//! composition, the photo/text delivery fallback chain, and configuration.

pub mod compose;
pub mod config;
pub mod delivery;
pub mod metadata;
pub mod network;
pub mod post;
pub mod telegram;
pub mod tracing_setup;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export main types for convenient access
pub use config::ReelpostConfig;
pub use delivery::{DeliveryOutcome, PostService};
pub use metadata::{MediaType, MetadataProvider, TmdbError};
pub use post::{PostRequest, ValidationError};
pub use telegram::{ChatPlatform, TelegramError};

/// Core errors that can bubble up from any Reelpost subsystem.
#[derive(Debug, thiserror::Error)]
pub enum ReelpostError {
    #[error("Metadata error: {0}")]
    Tmdb(#[from] TmdbError),

    #[error("Telegram error: {0}")]
    Telegram(#[from] TelegramError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {reason}")]
    Configuration { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReelpostError {
    /// Returns a user-friendly error message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            ReelpostError::Tmdb(e) => match e {
                TmdbError::Api { status_code, .. } => {
                    format!("TMDB request failed with status {status_code}")
                }
                TmdbError::Http(_) => "Could not reach TMDB".to_string(),
                TmdbError::Parse { .. } => "Unexpected response from TMDB".to_string(),
            },
            ReelpostError::Telegram(e) => match e.rejection() {
                Some(rejection) => rejection.user_message(),
                None => "Could not reach Telegram".to_string(),
            },
            ReelpostError::Validation(e) => e.to_string(),
            ReelpostError::Configuration { reason } => format!("Configuration error: {reason}"),
            ReelpostError::Io(_) => "File system error occurred".to_string(),
        }
    }

    /// Checks if this error is due to user input validation.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            ReelpostError::Configuration { .. } | ReelpostError::Validation(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ReelpostError>;
