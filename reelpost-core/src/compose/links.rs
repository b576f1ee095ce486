//! Public URLs derived from provider identifiers.

use crate::config::TmdbConfig;
use crate::metadata::MediaType;

pub const IMDB_TITLE_URL: &str = "https://www.imdb.com/title";
pub const YOUTUBE_WATCH_URL: &str = "https://www.youtube.com/watch?v=";

/// Builds TMDB site and image URLs.
#[derive(Debug, Clone)]
pub struct TmdbLinks {
    site_url: String,
    image_base_url: String,
}

impl TmdbLinks {
    pub fn new(config: &TmdbConfig) -> Self {
        Self {
            site_url: config.site_url.trim_end_matches('/').to_string(),
            image_base_url: config.image_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Public page of a title, e.g. `https://www.themoviedb.org/movie/550`.
    pub fn page(&self, media_type: MediaType, id: u64) -> String {
        format!("{}/{}/{}", self.site_url, media_type.as_str(), id)
    }

    /// Image URL for `size` (`original`, `w500`, ...) and a provider file path.
    pub fn image(&self, size: &str, file_path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.image_base_url,
            size,
            file_path.trim_start_matches('/')
        )
    }
}

pub fn imdb_title(imdb_id: &str) -> String {
    format!("{IMDB_TITLE_URL}/{imdb_id}/")
}

pub fn youtube_watch(key: &str) -> String {
    format!("{YOUTUBE_WATCH_URL}{}", urlencoding::encode(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tmdb_links() {
        let links = TmdbLinks::new(&TmdbConfig::default());
        assert_eq!(
            links.page(MediaType::Tv, 1399),
            "https://www.themoviedb.org/tv/1399"
        );
        assert_eq!(
            links.image("w500", "/poster.jpg"),
            "https://image.tmdb.org/t/p/w500/poster.jpg"
        );
    }

    #[test]
    fn test_external_links() {
        assert_eq!(imdb_title("tt0137523"), "https://www.imdb.com/title/tt0137523/");
        assert_eq!(
            youtube_watch("BdJKm16Co6M"),
            "https://www.youtube.com/watch?v=BdJKm16Co6M"
        );
    }
}
