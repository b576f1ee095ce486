//! Header banner selection.

use std::fmt;

use crate::metadata::MediaType;

/// Top line of a post, chosen from media type, season and episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    NewEpisode { season: u32, episode: u32 },
    SeasonComplete { season: u32 },
    NewSeries,
    NewMovie,
}

impl Banner {
    /// Picks the banner for a post.
    ///
    /// Season and episode only apply to series. An episode without a season
    /// cannot be located and is announced as a new series.
    pub fn select(media_type: MediaType, season: Option<u32>, episode: Option<u32>) -> Self {
        match (media_type, season, episode) {
            (MediaType::Movie, _, _) => Banner::NewMovie,
            (MediaType::Tv, Some(season), Some(episode)) => Banner::NewEpisode { season, episode },
            (MediaType::Tv, Some(season), None) => Banner::SeasonComplete { season },
            (MediaType::Tv, None, _) => Banner::NewSeries,
        }
    }

    /// Season/episode tag such as `S03 E01`, when the banner has one.
    pub fn tag(&self) -> Option<String> {
        match self {
            Banner::NewEpisode { season, episode } => Some(format!("S{season:02} E{episode:02}")),
            Banner::SeasonComplete { season } => Some(format!("S{season:02}")),
            Banner::NewSeries | Banner::NewMovie => None,
        }
    }

    fn headline(&self) -> &'static str {
        match self {
            Banner::NewEpisode { .. } => "New Episode Added!",
            Banner::SeasonComplete { .. } => "Season Complete!",
            Banner::NewSeries => "New Series Added!",
            Banner::NewMovie => "New Movie Added!",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            Banner::NewEpisode { .. } | Banner::SeasonComplete { .. } => "🦠",
            Banner::NewSeries => "🌟",
            Banner::NewMovie => "🎥",
        }
    }
}

/// Renders the HTML header line.
impl fmt::Display for Banner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <b>{}</b>", self.icon(), self.headline())?;
        if let Some(tag) = self.tag() {
            write!(f, " - 🔊 {tag} 🔥")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_episode_banner() {
        let banner = Banner::select(MediaType::Tv, Some(3), Some(1));
        assert_eq!(banner, Banner::NewEpisode { season: 3, episode: 1 });
        assert_eq!(banner.tag().as_deref(), Some("S03 E01"));
        assert_eq!(
            banner.to_string(),
            "🦠 <b>New Episode Added!</b> - 🔊 S03 E01 🔥"
        );
    }

    #[test]
    fn test_season_complete_banner() {
        let banner = Banner::select(MediaType::Tv, Some(12), None);
        assert_eq!(banner.tag().as_deref(), Some("S12"));
        assert_eq!(banner.to_string(), "🦠 <b>Season Complete!</b> - 🔊 S12 🔥");
    }

    #[test]
    fn test_new_series_banner() {
        assert_eq!(Banner::select(MediaType::Tv, None, None), Banner::NewSeries);
        assert_eq!(Banner::select(MediaType::Tv, None, Some(4)), Banner::NewSeries);
        assert_eq!(
            Banner::NewSeries.to_string(),
            "🌟 <b>New Series Added!</b>"
        );
    }

    #[test]
    fn test_movies_ignore_season_numbers() {
        assert_eq!(Banner::select(MediaType::Movie, Some(1), Some(2)), Banner::NewMovie);
        assert_eq!(Banner::NewMovie.tag(), None);
    }
}
