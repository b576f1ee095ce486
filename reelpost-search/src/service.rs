//! Title search service.

use std::sync::Arc;

use reelpost_core::MediaType;
use reelpost_core::metadata::MetadataProvider;
use tracing::{debug, warn};

use crate::errors::MediaSearchError;
use crate::query::parse_query;
use crate::ranking::rank;
use crate::types::{SearchCandidate, SearchOutcome};

/// Longest title shown in a candidate label before it is cut.
const LABEL_TITLE_CHARS: usize = 50;

/// Title search over a metadata provider.
#[derive(Debug, Clone)]
pub struct MediaSearchService {
    provider: Arc<dyn MetadataProvider>,
}

impl MediaSearchService {
    /// Creates a search service over `provider`.
    pub fn new(provider: Arc<dyn MetadataProvider>) -> Self {
        Self { provider }
    }

    /// Searches movies and series for a free-text query with optional year.
    ///
    /// # Errors
    /// - `MediaSearchError::EmptyQuery` - Nothing left to search for
    /// - `MediaSearchError::SearchFailed` - Provider unreachable or errored
    pub async fn search(&self, query: &str) -> Result<SearchOutcome, MediaSearchError> {
        let parsed = parse_query(query);
        if parsed.title.is_empty() {
            return Err(MediaSearchError::EmptyQuery);
        }

        let hits = self
            .provider
            .search_multi(&parsed.title)
            .await
            .map_err(|e| {
                warn!(query = %parsed.title, error = %e, "Search request failed");
                MediaSearchError::SearchFailed {
                    query: parsed.title.clone(),
                    reason: e.to_string(),
                }
            })?;

        let total = hits.len();
        let candidates = rank(hits, parsed.year);
        debug!(
            query = %parsed.title,
            year = ?parsed.year,
            total,
            kept = candidates.len(),
            "Search ranked"
        );

        if candidates.is_empty() {
            Ok(SearchOutcome::NoResults)
        } else {
            Ok(SearchOutcome::Found(candidates))
        }
    }
}

/// One-line label for a candidate, e.g. `🎬 Fight Club (1999)`.
pub fn candidate_label(candidate: &SearchCandidate) -> String {
    let icon = match candidate.media_type {
        MediaType::Movie => "🎬",
        MediaType::Tv => "📺",
    };

    let title = if candidate.title.chars().count() > LABEL_TITLE_CHARS {
        let cut: String = candidate.title.chars().take(LABEL_TITLE_CHARS).collect();
        format!("{cut}...")
    } else {
        candidate.title.clone()
    };

    format!(
        "{icon} {title} ({})",
        candidate.year.as_deref().unwrap_or("N/A")
    )
}
