//! Plot truncation.

use super::markup::{escape_attr, escape_html};

pub const NO_PLOT: &str = "No plot available";

/// Renders the plot for an HTML-mode message.
///
/// Overviews longer than `budget` characters are cut to exactly `budget`
/// characters and followed by a "Read more" link to `read_more_url`. The cut
/// happens on the raw text, before escaping, so an entity is never split.
pub fn render_plot(overview: Option<&str>, budget: usize, read_more_url: &str) -> String {
    let Some(text) = overview.map(str::trim).filter(|t| !t.is_empty()) else {
        return NO_PLOT.to_string();
    };

    if text.chars().count() <= budget {
        return escape_html(text);
    }

    let cut: String = text.chars().take(budget).collect();
    format!(
        "{}... <a href=\"{}\">Read more</a>",
        escape_html(&cut),
        escape_attr(read_more_url)
    )
}
