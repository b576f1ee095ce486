//! Metadata provider data model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Kind of title a post is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
}

impl MediaType {
    /// Path segment used by the provider API and website.
    pub fn as_str(self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }

    pub fn is_series(self) -> bool {
        matches!(self, MediaType::Tv)
    }

    /// Human readable type shown in posts.
    pub fn label(self) -> &'static str {
        match self {
            MediaType::Movie => "Movie",
            MediaType::Tv => "TV Series",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(MediaType::Movie),
            "tv" => Ok(MediaType::Tv),
            other => Err(format!("Unknown media type: {other}")),
        }
    }
}

/// Result of a lookup where the provider may legitimately report "no such id".
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

/// Raw entry from the multi search endpoint.
///
/// `media_type` is kept as a string because the endpoint also returns
/// people, which callers filter out.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: u64,
    #[serde(default)]
    pub media_type: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub release_date: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<u64>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

impl SearchHit {
    /// Release date for movies, first air date for series.
    pub fn date(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .or(self.first_air_date.as_deref())
    }

    pub fn display_title(&self) -> Option<&str> {
        self.title.as_deref().or(self.name.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SearchPage {
    #[serde(default)]
    pub results: Vec<SearchHit>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Genre {
    pub name: String,
}

/// Full details payload as the provider returns it for either media type.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawDetails {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub overview: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub original_language: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub release_date: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

/// Details of one title, normalized across movies and series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentDetails {
    pub title: String,
    pub overview: Option<String>,
    pub vote_average: Option<f64>,
    pub genres: Vec<String>,
    pub original_language: Option<String>,
    /// Release date for movies, first air date for series
    pub release_date: Option<String>,
    pub poster_path: Option<String>,
}

impl ContentDetails {
    pub(crate) fn from_raw(media_type: MediaType, raw: RawDetails) -> Self {
        let (title, date) = match media_type {
            MediaType::Movie => (raw.title.or(raw.name), raw.release_date),
            MediaType::Tv => (raw.name.or(raw.title), raw.first_air_date),
        };

        Self {
            title: title.unwrap_or_else(|| "Untitled".to_string()),
            overview: raw.overview,
            vote_average: raw.vote_average,
            genres: raw.genres.into_iter().map(|g| g.name).collect(),
            original_language: raw.original_language,
            release_date: date,
            poster_path: raw.poster_path.filter(|p| !p.is_empty()),
        }
    }

    /// First four characters of the release date, or `N/A`.
    pub fn year(&self) -> &str {
        self.release_date
            .as_deref()
            .and_then(|date| date.get(..4))
            .unwrap_or("N/A")
    }
}

/// Identifiers of the same title in other databases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalIds {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub imdb_id: Option<String>,
}

/// One entry of the videos list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub key: String,
    pub site: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Video {
    pub fn is_youtube_trailer(&self) -> bool {
        self.site == "YouTube" && self.kind == "Trailer"
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct VideoList {
    #[serde(default)]
    pub results: Vec<Video>,
}

/// Key of the first YouTube trailer in `videos`.
pub fn find_trailer(videos: &[Video]) -> Option<&str> {
    videos
        .iter()
        .find(|v| v.is_youtube_trailer())
        .map(|v| v.key.as_str())
}

/// One image file available for a title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub file_path: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

impl Image {
    fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// Images endpoint payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageSet {
    #[serde(default)]
    pub posters: Vec<Image>,
    #[serde(default)]
    pub backdrops: Vec<Image>,
}

impl ImageSet {
    /// Highest resolution poster, or the highest resolution backdrop when
    /// there are no posters.
    pub fn best(&self) -> Option<&Image> {
        let pool = if self.posters.is_empty() {
            &self.backdrops
        } else {
            &self.posters
        };
        pool.iter().max_by_key(|image| image.area())
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
