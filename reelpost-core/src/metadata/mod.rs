//! Movie/TV metadata provider access.

pub mod error;
pub mod models;
pub mod tmdb;

use async_trait::async_trait;

pub use error::TmdbError;
pub use models::{
    ContentDetails, ExternalIds, Image, ImageSet, Lookup, MediaType, SearchHit, Video,
    find_trailer,
};
pub use tmdb::TmdbClient;

/// Read-only metadata source.
///
/// Implementations provide search and per-title lookups through different
/// backends (the real provider API, fakes for testing).
#[async_trait]
pub trait MetadataProvider: Send + Sync + std::fmt::Debug {
    /// Free-text search across movies, series and people.
    ///
    /// # Errors
    /// - `TmdbError::Http` - Network connectivity issues
    /// - `TmdbError::Api` - Provider returned a non-success status
    async fn search_multi(&self, query: &str) -> Result<Vec<SearchHit>, TmdbError>;

    /// Full details of one title. An unknown id is `Lookup::NotFound`.
    ///
    /// # Errors
    /// - `TmdbError::Http` - Network connectivity issues
    /// - `TmdbError::Api` - Provider returned a non-success status other than 404
    async fn details(
        &self,
        media_type: MediaType,
        id: u64,
    ) -> Result<Lookup<ContentDetails>, TmdbError>;

    /// Cross-reference identifiers for one title.
    ///
    /// # Errors
    /// - `TmdbError::Http` / `TmdbError::Api` - Lookup failed
    async fn external_ids(&self, media_type: MediaType, id: u64) -> Result<ExternalIds, TmdbError>;

    /// Videos (trailers, teasers, clips) attached to one title.
    ///
    /// # Errors
    /// - `TmdbError::Http` / `TmdbError::Api` - Lookup failed
    async fn videos(&self, media_type: MediaType, id: u64) -> Result<Vec<Video>, TmdbError>;

    /// All poster and backdrop files for one title.
    ///
    /// # Errors
    /// - `TmdbError::Http` / `TmdbError::Api` - Lookup failed
    async fn images(&self, media_type: MediaType, id: u64) -> Result<ImageSet, TmdbError>;
}
