//! Poster source chain.

use std::fmt;

use crate::compose::TmdbLinks;
use crate::config::OmdbConfig;
use crate::metadata::MediaType;

/// Height requested from the OMDb poster API.
const OMDB_POSTER_HEIGHT: u32 = 1000;

/// One place a poster may come from, tried in list order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PosterSource {
    /// A fixed URL, pre-checked with a HEAD request.
    Direct { label: &'static str, url: String },
    /// Resolved at attempt time from the title's image list.
    ImageSearch { media_type: MediaType, id: u64 },
}

impl PosterSource {
    pub fn label(&self) -> &'static str {
        match self {
            PosterSource::Direct { label, .. } => label,
            PosterSource::ImageSearch { .. } => "tmdb-images",
        }
    }
}

impl fmt::Display for PosterSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // The query string may hold an API key.
            PosterSource::Direct { label, url } => {
                let shown = url.split_once('?').map_or(url.as_str(), |(base, _)| base);
                write!(f, "{label} ({shown})")
            }
            PosterSource::ImageSearch { media_type, id } => {
                write!(f, "tmdb-images ({media_type}/{id})")
            }
        }
    }
}

/// Builds the ordered source list for one title.
///
/// TMDB original and w500 come first when the title has a poster path, then
/// the OMDb poster when both an IMDb id and an OMDb key exist, then the TMDB
/// image list.
pub fn poster_sources(
    links: &TmdbLinks,
    omdb: &OmdbConfig,
    media_type: MediaType,
    id: u64,
    poster_path: Option<&str>,
    imdb_id: Option<&str>,
) -> Vec<PosterSource> {
    let mut sources = Vec::with_capacity(4);

    if let Some(path) = poster_path.filter(|p| !p.is_empty()) {
        sources.push(PosterSource::Direct {
            label: "tmdb-original",
            url: links.image("original", path),
        });
        sources.push(PosterSource::Direct {
            label: "tmdb-w500",
            url: links.image("w500", path),
        });
    }

    if let (Some(imdb_id), Some(key)) = (imdb_id, omdb.api_key.as_deref()) {
        sources.push(PosterSource::Direct {
            label: "omdb",
            url: format!(
                "{}/?i={}&apikey={}&h={OMDB_POSTER_HEIGHT}",
                omdb.image_base_url.trim_end_matches('/'),
                urlencoding::encode(imdb_id),
                urlencoding::encode(key)
            ),
        });
    }

    sources.push(PosterSource::ImageSearch { media_type, id });
    sources
}
