//! Free-text query parsing.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::ParsedQuery;

// Parenthesized year wins over a bare trailing year.
static QUERY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(.*?)(?:\s+\((\d{4})\)|\s+(\d{4}))?$").expect("query pattern is valid")
});

/// Splits `"Title (1999)"` or `"Title 1999"` into base title and year.
///
/// A query that is only a number, such as `"1917"`, is kept as the title.
pub fn parse_query(input: &str) -> ParsedQuery {
    let input = input.trim();

    let Some(caps) = QUERY_RE.captures(input) else {
        return ParsedQuery {
            title: input.to_string(),
            year: None,
        };
    };

    let title = caps.get(1).map_or(input, |m| m.as_str()).trim();
    let year = caps
        .get(2)
        .or_else(|| caps.get(3))
        .and_then(|m| m.as_str().parse::<u16>().ok());

    ParsedQuery {
        title: title.to_string(),
        year,
    }
}
