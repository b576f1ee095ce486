//! Reelpost Search - Title search and candidate ranking
//!
//! Parses a free-text title with an optional trailing year, queries the
//! metadata provider, and ranks movie and series candidates for selection.

#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![warn(clippy::too_many_lines)]

pub mod errors;
pub mod query;
pub mod ranking;
pub mod service;
pub mod types;

// Re-export main types
pub use errors::MediaSearchError;
pub use query::parse_query;
pub use ranking::{MAX_CANDIDATES, rank};
pub use service::{MediaSearchService, candidate_label};
pub use types::{ParsedQuery, SearchCandidate, SearchOutcome};

/// Convenience type alias for Results with MediaSearchError.
pub type Result<T> = std::result::Result<T, MediaSearchError>;
