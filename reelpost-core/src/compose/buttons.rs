//! Inline keyboard layout for posts.

use super::links::{imdb_title, youtube_watch};
use crate::telegram::{InlineKeyboardButton, InlineKeyboardMarkup};

pub const MAX_BUTTONS_PER_ROW: usize = 2;

/// Link targets available for one post.
#[derive(Debug, Clone, Default)]
pub struct PostLinks<'a> {
    pub custom_link: Option<&'a str>,
    pub imdb_id: Option<&'a str>,
    pub trailer_key: Option<&'a str>,
    /// TMDB page, used only when there is neither a custom nor an IMDb link.
    pub info_page: &'a str,
}

/// Lays out the post keyboard.
///
/// Watch and IMDb links share rows of at most [`MAX_BUTTONS_PER_ROW`]; the
/// trailer always sits on its own row below them.
pub fn build_keyboard(links: &PostLinks<'_>) -> InlineKeyboardMarkup {
    let mut link_buttons = Vec::new();

    if let Some(custom) = links.custom_link {
        link_buttons.push(InlineKeyboardButton::url("🔗 Watch Here", custom));
    }
    if let Some(imdb_id) = links.imdb_id {
        link_buttons.push(InlineKeyboardButton::url("📌 IMDb Page", imdb_title(imdb_id)));
    }
    if link_buttons.is_empty() {
        link_buttons.push(InlineKeyboardButton::url("ℹ️ TMDB Page", links.info_page));
    }

    let mut rows = pack_rows(link_buttons, MAX_BUTTONS_PER_ROW);
    if let Some(key) = links.trailer_key {
        rows.push(vec![InlineKeyboardButton::url(
            "🎬 Watch Trailer",
            youtube_watch(key),
        )]);
    }

    InlineKeyboardMarkup::new(rows)
}

/// Splits buttons into rows of at most `per_row`.
pub fn pack_rows(
    buttons: Vec<InlineKeyboardButton>,
    per_row: usize,
) -> Vec<Vec<InlineKeyboardButton>> {
    buttons
        .chunks(per_row.max(1))
        .map(<[InlineKeyboardButton]>::to_vec)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "https://www.themoviedb.org/movie/550";

    fn texts(markup: &InlineKeyboardMarkup) -> Vec<Vec<&str>> {
        markup
            .inline_keyboard
            .iter()
            .map(|row| row.iter().map(|b| b.text.as_str()).collect())
            .collect()
    }

    #[test]
    fn test_full_keyboard_layout() {
        let markup = build_keyboard(&PostLinks {
            custom_link: Some("https://example.com/watch"),
            imdb_id: Some("tt0137523"),
            trailer_key: Some("abc"),
            info_page: PAGE,
        });

        assert_eq!(
            texts(&markup),
            vec![vec!["🔗 Watch Here", "📌 IMDb Page"], vec!["🎬 Watch Trailer"]]
        );
        assert_eq!(
            markup.inline_keyboard[1][0].url.as_deref(),
            Some("https://www.youtube.com/watch?v=abc")
        );
    }

    #[test]
    fn test_tmdb_page_is_fallback_only() {
        let markup = build_keyboard(&PostLinks {
            info_page: PAGE,
            ..PostLinks::default()
        });
        assert_eq!(texts(&markup), vec![vec!["ℹ️ TMDB Page"]]);
        assert_eq!(markup.inline_keyboard[0][0].url.as_deref(), Some(PAGE));

        let markup = build_keyboard(&PostLinks {
            imdb_id: Some("tt0137523"),
            info_page: PAGE,
            ..PostLinks::default()
        });
        assert_eq!(texts(&markup), vec![vec!["📌 IMDb Page"]]);
    }

    #[test]
    fn test_pack_rows() {
        let buttons: Vec<_> = (0..5)
            .map(|i| InlineKeyboardButton::callback(i.to_string(), i.to_string()))
            .collect();
        let rows = pack_rows(buttons, 2);
        assert_eq!(rows.iter().map(Vec::len).collect::<Vec<_>>(), vec![2, 2, 1]);
    }
}
