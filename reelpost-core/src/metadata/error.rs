//! Error types for metadata provider access.

use thiserror::Error;

/// Errors that can occur while talking to the metadata provider.
#[derive(Debug, Error)]
pub enum TmdbError {
    /// Transport failure: connect, timeout, or body read. The request URL,
    /// which carries the API key, is stripped.
    #[error("HTTP request failed: {0}")]
    Http(reqwest::Error),

    /// Provider answered with a non-success status.
    #[error("TMDB API error ({status_code}): {message}")]
    Api {
        /// HTTP status returned by the provider
        status_code: u16,
        /// Response body or provider status message
        message: String,
    },

    /// Response body did not match the expected shape.
    #[error("Failed to parse TMDB response: {reason}")]
    Parse {
        /// Deserializer error description
        reason: String,
    },
}

impl From<reqwest::Error> for TmdbError {
    fn from(error: reqwest::Error) -> Self {
        TmdbError::Http(error.without_url())
    }
}
