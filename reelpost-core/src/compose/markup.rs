//! HTML escaping and the client-banner allow-list translator.
//!
//! Posts are sent with Telegram's HTML parse mode, which accepts only a small
//! tag set and rejects the whole message on anything unbalanced or unknown.
//! Banner markup is therefore parsed against an explicit allow-list; every
//! tag outside it is escaped and shows up as literal text.

use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(/?)([A-Za-z][A-Za-z0-9-]*)([^<>]*)>").expect("tag pattern is valid")
});

static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:amp|lt|gt|quot|#[0-9]{1,7}|#[xX][0-9A-Fa-f]{1,6});")
        .expect("entity pattern is valid")
});

static HREF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bhref\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("href pattern is valid")
});

static CLASS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bclass\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("class pattern is valid")
});

const LINK_SCHEMES: [&str; 3] = ["http", "https", "tg"];

/// Escapes text for embedding in an HTML-mode message.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escapes a value for a double-quoted attribute.
pub fn escape_attr(value: &str) -> String {
    escape_html(value).replace('"', "&quot;")
}

/// Escapes text but keeps well-formed entities the author already wrote.
fn escape_text_keeping_entities(text: &str, out: &mut String) {
    let mut last = 0;
    for entity in ENTITY_RE.find_iter(text) {
        out.push_str(&escape_html(&text[last..entity.start()]));
        out.push_str(entity.as_str());
        last = entity.end();
    }
    out.push_str(&escape_html(&text[last..]));
}

fn decode_basic_entities(value: &str) -> String {
    value
        .replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// One tag of the allow-list, already normalized to the platform's name.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Allowed {
    Bold,
    Italic,
    Code,
    Pre,
    Spoiler,
    Link(String),
    LineBreak,
}

impl Allowed {
    fn open(&self) -> String {
        match self {
            Allowed::Bold => "<b>".to_string(),
            Allowed::Italic => "<i>".to_string(),
            Allowed::Code => "<code>".to_string(),
            Allowed::Pre => "<pre>".to_string(),
            Allowed::Spoiler => "<tg-spoiler>".to_string(),
            Allowed::Link(href) => format!("<a href=\"{}\">", escape_attr(href)),
            Allowed::LineBreak => "\n".to_string(),
        }
    }

    fn close(&self) -> &'static str {
        match self {
            Allowed::Bold => "</b>",
            Allowed::Italic => "</i>",
            Allowed::Code => "</code>",
            Allowed::Pre => "</pre>",
            Allowed::Spoiler => "</tg-spoiler>",
            Allowed::Link(_) => "</a>",
            Allowed::LineBreak => "",
        }
    }
}

fn attribute<'a>(re: &Regex, attrs: &'a str) -> Option<&'a str> {
    let caps = re.captures(attrs)?;
    caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str())
}

fn allowed_link(attrs: &str) -> Option<String> {
    let href = decode_basic_entities(attribute(&HREF_RE, attrs)?.trim());
    let parsed = url::Url::parse(&href).ok()?;
    LINK_SCHEMES
        .contains(&parsed.scheme())
        .then_some(href)
}

fn classify_open(name: &str, attrs: &str) -> Option<Allowed> {
    match name {
        "b" | "strong" => Some(Allowed::Bold),
        "i" | "em" => Some(Allowed::Italic),
        "code" => Some(Allowed::Code),
        "pre" => Some(Allowed::Pre),
        "tg-spoiler" | "spoiler" => Some(Allowed::Spoiler),
        "span" => attribute(&CLASS_RE, attrs)
            .filter(|class| class.split_whitespace().any(|c| c == "tg-spoiler"))
            .map(|_| Allowed::Spoiler),
        "a" => allowed_link(attrs).map(Allowed::Link),
        "br" => Some(Allowed::LineBreak),
        _ => None,
    }
}

/// Translates user-supplied banner markup into the platform's tag subset.
///
/// Allowed: `b`/`strong`, `i`/`em`, `code`, `pre`, `tg-spoiler`/`spoiler`/
/// `span class="tg-spoiler"`, `a href` with an http, https or tg URL, and
/// `br` (becomes a newline). Every other tag, a mismatched closing tag, or a
/// tag opened where the platform forbids nesting is escaped verbatim.
/// Tags still open at the end are closed.
pub fn sanitize_banner(input: &str) -> String {
    // (source tag name, normalized tag)
    let mut stack: Vec<(String, Allowed)> = Vec::new();
    let mut out = String::with_capacity(input.len());
    let mut last = 0;

    for caps in TAG_RE.captures_iter(input) {
        let Some(whole) = caps.get(0) else { continue };
        escape_text_keeping_entities(&input[last..whole.start()], &mut out);
        last = whole.end();

        let closing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
        let name = caps
            .get(2)
            .map(|m| m.as_str().to_ascii_lowercase())
            .unwrap_or_default();
        let attrs = caps.get(3).map_or("", |m| m.as_str());

        if closing {
            if name == "br" {
                continue;
            }
            match stack.last() {
                Some((source, tag)) if *source == name => {
                    out.push_str(tag.close());
                    stack.pop();
                }
                _ => out.push_str(&escape_html(whole.as_str())),
            }
            continue;
        }

        let Some(tag) = classify_open(&name, attrs) else {
            out.push_str(&escape_html(whole.as_str()));
            continue;
        };

        if tag == Allowed::LineBreak {
            out.push('\n');
            continue;
        }

        if !nesting_allowed(&stack, &tag) {
            out.push_str(&escape_html(whole.as_str()));
            continue;
        }

        out.push_str(&tag.open());
        stack.push((name, tag));
    }

    escape_text_keeping_entities(&input[last..], &mut out);

    while let Some((_, tag)) = stack.pop() {
        out.push_str(tag.close());
    }

    out
}

fn nesting_allowed(stack: &[(String, Allowed)], tag: &Allowed) -> bool {
    let Some((_, parent)) = stack.last() else {
        return true;
    };

    match parent {
        // Code spans cannot hold any other entity.
        Allowed::Code => false,
        // Preformatted blocks may only wrap a code span.
        Allowed::Pre => *tag == Allowed::Code,
        _ => {
            let inside_link = stack.iter().any(|(_, t)| matches!(t, Allowed::Link(_)));
            !(inside_link && matches!(tag, Allowed::Link(_)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("Tom & Jerry <3"), "Tom &amp; Jerry &lt;3");
        assert_eq!(escape_attr(r#"a"b"#), "a&quot;b");
    }

    #[test]
    fn test_sanitize_normalizes_allowed_tags() {
        assert_eq!(
            sanitize_banner("<strong>Join</strong> <em>now</em>"),
            "<b>Join</b> <i>now</i>"
        );
        assert_eq!(
            sanitize_banner(r#"<span class="tg-spoiler">twist</span>"#),
            "<tg-spoiler>twist</tg-spoiler>"
        );
        assert_eq!(
            sanitize_banner("<spoiler>x</spoiler>"),
            "<tg-spoiler>x</tg-spoiler>"
        );
        assert_eq!(sanitize_banner("line<br>next<br/>end"), "line\nnext\nend");
    }

    #[test]
    fn test_sanitize_keeps_safe_links_only() {
        assert_eq!(
            sanitize_banner(r#"<a href="https://t.me/reel?a=1&amp;b=2">chan</a>"#),
            r#"<a href="https://t.me/reel?a=1&amp;b=2">chan</a>"#
        );
        assert_eq!(
            sanitize_banner(r#"<a href="javascript:alert(1)">x</a>"#),
            r#"&lt;a href="javascript:alert(1)"&gt;x&lt;/a&gt;"#
        );
    }

    #[test]
    fn test_sanitize_escapes_unknown_tags() {
        assert_eq!(
            sanitize_banner("<script>x</script><u>y</u>"),
            "&lt;script&gt;x&lt;/script&gt;&lt;u&gt;y&lt;/u&gt;"
        );
    }

    #[test]
    fn test_sanitize_balances_tags() {
        assert_eq!(sanitize_banner("<b>open"), "<b>open</b>");
        assert_eq!(sanitize_banner("stray</i>"), "stray&lt;/i&gt;");
        assert_eq!(sanitize_banner("<b><i>x</b></i>"), "<b><i>x&lt;/b&gt;</i></b>");
    }

    #[test]
    fn test_sanitize_enforces_code_nesting() {
        assert_eq!(
            sanitize_banner("<code><b>x</b></code>"),
            "<code>&lt;b&gt;x&lt;/b&gt;</code>"
        );
        assert_eq!(
            sanitize_banner("<pre><code>let x;</code></pre>"),
            "<pre><code>let x;</code></pre>"
        );
    }

    #[test]
    fn test_sanitize_preserves_entities_and_escapes_bare_text() {
        assert_eq!(sanitize_banner("5 &lt; 6 & 7 > 2"), "5 &lt; 6 &amp; 7 &gt; 2");
        assert_eq!(sanitize_banner("&#128250; TV"), "&#128250; TV");
    }
}
