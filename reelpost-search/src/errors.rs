//! Error types for title search.

use thiserror::Error;

/// Errors that can occur during title search operations.
#[derive(Debug, Error)]
pub enum MediaSearchError {
    /// The query was empty once whitespace and the year were removed.
    #[error("Search query is empty")]
    EmptyQuery,

    /// Search operation failed with the specified query and reason.
    #[error("Search failed for query '{query}': {reason}")]
    SearchFailed {
        /// The search query that failed
        query: String,
        /// The reason for the failure
        reason: String,
    },
}

impl MediaSearchError {
    /// Checks if this error is due to the caller's input.
    pub fn is_user_error(&self) -> bool {
        matches!(self, MediaSearchError::EmptyQuery)
    }
}
