//! Data types for title search.

use reelpost_core::MediaType;
use reelpost_core::metadata::SearchHit;
use serde::{Deserialize, Serialize};

/// Free-text query split into a base title and an optional release year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    /// Title with the year suffix removed, trimmed
    pub title: String,
    /// Four-digit year, when the query ended with one
    pub year: Option<u16>,
}

/// One ranked search result, offered to the user for selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCandidate {
    /// Provider id of the title
    pub id: u64,
    /// Movie title or series name
    pub title: String,
    /// Movie or series
    pub media_type: MediaType,
    /// Release year, taken from the first four characters of the date
    pub year: Option<String>,
    /// Provider popularity score
    pub popularity: f64,
    /// Number of votes on the provider
    pub vote_count: u64,
    /// Poster file path on the provider's image CDN
    pub poster_path: Option<String>,
}

impl SearchCandidate {
    /// Converts a raw search hit, dropping anything that is not a movie or
    /// series.
    pub fn from_hit(hit: SearchHit) -> Option<Self> {
        let media_type = hit.media_type.parse::<MediaType>().ok()?;
        let title = hit.display_title().unwrap_or("Untitled").to_string();
        let year = hit
            .date()
            .and_then(|date| date.get(..4))
            .map(str::to_string);

        Some(Self {
            id: hit.id,
            title,
            media_type,
            year,
            popularity: hit.popularity.unwrap_or(0.0),
            vote_count: hit.vote_count.unwrap_or(0),
            poster_path: hit.poster_path,
        })
    }
}

/// Result of a search that reached the provider.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Ranked candidates, never empty and at most ten
    Found(Vec<SearchCandidate>),
    /// The provider had no movie or series for the query
    NoResults,
}

impl SearchOutcome {
    /// Candidates as a slice, empty for `NoResults`.
    pub fn candidates(&self) -> &[SearchCandidate] {
        match self {
            SearchOutcome::Found(candidates) => candidates,
            SearchOutcome::NoResults => &[],
        }
    }
}
