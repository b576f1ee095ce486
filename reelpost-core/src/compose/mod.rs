//! Post composition.
//!
//! Turns fetched title details plus the request's extras into the HTML text
//! and inline keyboard of one channel post.

pub mod banner;
pub mod buttons;
pub mod language;
pub mod links;
pub mod markup;
pub mod plot;

use std::sync::LazyLock;

use regex::Regex;

pub use banner::Banner;
pub use buttons::{PostLinks, build_keyboard};
pub use language::language_label;
pub use links::TmdbLinks;
pub use markup::{escape_html, sanitize_banner};
pub use plot::render_plot;

use crate::config::{ComposeConfig, TmdbConfig};
use crate::metadata::{ContentDetails, MediaType};
use crate::telegram::InlineKeyboardMarkup;

/// Longest caption the platform accepts on a photo, in UTF-16 code units.
pub const CAPTION_LIMIT: usize = 1024;

pub const SEPARATOR: &str = "━━━━━━━━━━━━━━━";

const MAX_GENRES: usize = 3;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^<>]*>").expect("tag pattern is valid"));

static ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&[#A-Za-z0-9]+;").expect("entity pattern is valid"));

/// Everything a post is composed from.
#[derive(Debug, Clone)]
pub struct PostContext<'a> {
    pub media_type: MediaType,
    pub content_id: u64,
    pub details: &'a ContentDetails,
    pub season: Option<u32>,
    pub episode: Option<u32>,
    pub note: Option<&'a str>,
    pub banner_html: Option<&'a str>,
    pub custom_link: Option<&'a str>,
    pub imdb_id: Option<&'a str>,
    pub trailer_key: Option<&'a str>,
}

/// Text and keyboard ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedPost {
    pub text: String,
    pub keyboard: InlineKeyboardMarkup,
}

impl ComposedPost {
    /// Length of the text as the platform counts it: UTF-16 code units,
    /// after markup is parsed.
    pub fn visible_len(&self) -> usize {
        let stripped = TAG_RE.replace_all(&self.text, "");
        ENTITY_RE.replace_all(&stripped, "_").encode_utf16().count()
    }

    /// Whether the text can be used as a photo caption.
    pub fn fits_caption(&self) -> bool {
        self.visible_len() <= CAPTION_LIMIT
    }
}

/// Builds posts from details using the configured site links and plot budget.
#[derive(Debug, Clone)]
pub struct Composer {
    links: TmdbLinks,
    plot_budget: usize,
}

impl Composer {
    pub fn new(tmdb: &TmdbConfig, compose: &ComposeConfig) -> Self {
        Self {
            links: TmdbLinks::new(tmdb),
            plot_budget: compose.plot_budget,
        }
    }

    pub fn links(&self) -> &TmdbLinks {
        &self.links
    }

    /// Composes the post text and keyboard.
    pub fn compose(&self, ctx: &PostContext<'_>) -> ComposedPost {
        let details = ctx.details;
        let page = self.links.page(ctx.media_type, ctx.content_id);
        let banner = Banner::select(ctx.media_type, ctx.season, ctx.episode);

        let mut lines = vec![
            banner.to_string(),
            String::new(),
            format!(
                "🎬 <b>{}</b> ({})",
                escape_html(&details.title),
                details.year()
            ),
        ];
        if let Some(tag) = banner.tag() {
            lines.push(format!("🔊 <b>{tag}</b>"));
        }
        lines.push(format!("📺 <b>Type:</b> {}", ctx.media_type.label()));
        lines.push(format!(
            "🗣️ <b>Language:</b> {}",
            language_label(details.original_language.as_deref())
        ));
        lines.push(format!("⭐ <b>Rating:</b> {}", rating(details.vote_average)));
        lines.push(format!("🎭 <b>Genres:</b> {}", genres(&details.genres)));
        lines.push(String::new());
        lines.push(format!(
            "📖 <b>Plot:</b> {}",
            render_plot(details.overview.as_deref(), self.plot_budget, &page)
        ));

        let note = ctx.note.map(str::trim).filter(|n| !n.is_empty());
        let client_banner = ctx
            .banner_html
            .map(sanitize_banner)
            .filter(|b| !b.trim().is_empty());

        if note.is_some() || client_banner.is_some() {
            lines.push(String::new());
            lines.push(SEPARATOR.to_string());
            if let Some(note) = note {
                lines.push(format!("💬 <b>Note:</b> {}", escape_html(note)));
            }
            if let Some(client_banner) = client_banner {
                lines.push(client_banner);
            }
        }

        let keyboard = build_keyboard(&PostLinks {
            custom_link: ctx.custom_link,
            imdb_id: ctx.imdb_id,
            trailer_key: ctx.trailer_key,
            info_page: &page,
        });

        ComposedPost {
            text: lines.join("\n"),
            keyboard,
        }
    }
}

fn rating(vote_average: Option<f64>) -> String {
    match vote_average {
        Some(score) if score > 0.0 => format!("{score:.1}/10"),
        _ => "N/A".to_string(),
    }
}

fn genres(names: &[String]) -> String {
    if names.is_empty() {
        return "N/A".to_string();
    }
    names
        .iter()
        .take(MAX_GENRES)
        .map(|name| escape_html(name))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fight_club() -> ContentDetails {
        ContentDetails {
            title: "Fight Club".to_string(),
            overview: Some("An insomniac office worker & a soap maker.".to_string()),
            vote_average: Some(8.433),
            genres: vec![
                "Drama".to_string(),
                "Thriller".to_string(),
                "Comedy".to_string(),
                "Crime".to_string(),
            ],
            original_language: Some("en".to_string()),
            release_date: Some("1999-10-15".to_string()),
            poster_path: Some("/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg".to_string()),
        }
    }

    fn context(details: &ContentDetails) -> PostContext<'_> {
        PostContext {
            media_type: MediaType::Movie,
            content_id: 550,
            details,
            season: None,
            episode: None,
            note: None,
            banner_html: None,
            custom_link: None,
            imdb_id: Some("tt0137523"),
            trailer_key: None,
        }
    }

    fn composer() -> Composer {
        Composer::new(&TmdbConfig::default(), &ComposeConfig::default())
    }

    #[test]
    fn test_compose_movie_post() {
        let details = fight_club();
        let post = composer().compose(&context(&details));

        assert!(post.text.starts_with("🎥 <b>New Movie Added!</b>\n\n🎬 <b>Fight Club</b> (1999)"));
        assert!(post.text.contains("📺 <b>Type:</b> Movie"));
        assert!(post.text.contains("🗣️ <b>Language:</b> 🇺🇸 English"));
        assert!(post.text.contains("⭐ <b>Rating:</b> 8.4/10"));
        assert!(post.text.contains("🎭 <b>Genres:</b> Drama, Thriller, Comedy\n"));
        assert!(post.text.contains("office worker &amp; a soap maker."));
        assert!(!post.text.contains(SEPARATOR));
        assert_eq!(post.keyboard.buttons().count(), 1);
        assert!(post.fits_caption());
    }

    #[test]
    fn test_compose_episode_with_note_and_banner() {
        let details = ContentDetails {
            title: "Breaking Bad".to_string(),
            release_date: Some("2008-01-20".to_string()),
            ..ContentDetails::default()
        };
        let post = composer().compose(&PostContext {
            media_type: MediaType::Tv,
            content_id: 1396,
            season: Some(3),
            episode: Some(1),
            note: Some("Now <streaming>"),
            banner_html: Some("<strong>Join</strong> <script>"),
            imdb_id: None,
            ..context(&details)
        });

        assert!(post.text.starts_with("🦠 <b>New Episode Added!</b> - 🔊 S03 E01 🔥"));
        assert!(post.text.contains("🔊 <b>S03 E01</b>"));
        assert!(post.text.contains("📺 <b>Type:</b> TV Series"));
        assert!(post.text.contains("⭐ <b>Rating:</b> N/A"));
        assert!(post.text.contains("🎭 <b>Genres:</b> N/A"));
        assert!(post.text.contains("🗣️ <b>Language:</b> 🌐 Unknown"));
        assert!(post.text.contains("📖 <b>Plot:</b> No plot available"));
        assert!(post.text.ends_with(&format!(
            "{SEPARATOR}\n💬 <b>Note:</b> Now &lt;streaming&gt;\n<b>Join</b> &lt;script&gt;"
        )));
        assert_eq!(
            post.keyboard.inline_keyboard[0][0].url.as_deref(),
            Some("https://www.themoviedb.org/tv/1396")
        );
    }

    #[test]
    fn test_long_plot_links_to_title_page() {
        let details = ContentDetails {
            overview: Some("word ".repeat(100)),
            ..fight_club()
        };
        let post = composer().compose(&context(&details));
        assert!(post.text.contains(
            "... <a href=\"https://www.themoviedb.org/movie/550\">Read more</a>"
        ));
    }

    #[test]
    fn test_visible_len_ignores_markup() {
        let post = ComposedPost {
            text: "<b>ab</b> &amp; <a href=\"https://x.y\">c</a>".to_string(),
            keyboard: InlineKeyboardMarkup::default(),
        };
        assert_eq!(post.visible_len(), 6);

        let long = ComposedPost {
            text: "x".repeat(CAPTION_LIMIT + 1),
            keyboard: InlineKeyboardMarkup::default(),
        };
        assert!(!long.fits_caption());
    }

    #[test]
    fn test_visible_len_counts_utf16_units() {
        let post = ComposedPost {
            text: "🎬 <b>Fight Club</b>".to_string(),
            keyboard: InlineKeyboardMarkup::default(),
        };
        assert_eq!(post.visible_len(), 13);

        // 600 clapper boards are 600 chars but 1200 units.
        let emoji_heavy = ComposedPost {
            text: "🎬".repeat(600),
            keyboard: InlineKeyboardMarkup::default(),
        };
        assert_eq!(emoji_heavy.text.chars().count(), 600);
        assert!(!emoji_heavy.fits_caption());
    }
}
