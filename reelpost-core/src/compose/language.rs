//! Original-language labels.

/// Known ISO 639-1 codes and their flag label.
const LANGUAGES: &[(&str, &str)] = &[
    ("en", "🇺🇸 English"),
    ("es", "🇪🇸 Spanish"),
    ("fr", "🇫🇷 French"),
    ("de", "🇩🇪 German"),
    ("it", "🇮🇹 Italian"),
    ("ja", "🇯🇵 Japanese"),
    ("ko", "🇰🇷 Korean"),
    ("zh", "🇨🇳 Chinese"),
    ("hi", "🇮🇳 Hindi"),
    ("ru", "🇷🇺 Russian"),
    ("te", "🇮🇳 Telugu"),
    ("ta", "🇮🇳 Tamil"),
    ("ml", "🇮🇳 Malayalam"),
    ("pt", "🇧🇷 Portuguese"),
    ("ar", "🇸🇦 Arabic"),
    ("tr", "🇹🇷 Turkish"),
];

/// Label for a two-letter language code.
///
/// Unknown codes fall back to `🌐 XX` with the code uppercased, a missing
/// code to `🌐 Unknown`.
pub fn language_label(code: Option<&str>) -> String {
    let Some(code) = code.map(str::trim).filter(|c| !c.is_empty()) else {
        return "🌐 Unknown".to_string();
    };

    let lowered = code.to_ascii_lowercase();
    LANGUAGES
        .iter()
        .find(|(known, _)| *known == lowered)
        .map_or_else(
            || format!("🌐 {}", code.to_ascii_uppercase()),
            |(_, label)| (*label).to_string(),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_languages() {
        assert_eq!(language_label(Some("en")), "🇺🇸 English");
        assert_eq!(language_label(Some("JA")), "🇯🇵 Japanese");
        assert_eq!(language_label(Some("ml")), "🇮🇳 Malayalam");
    }

    #[test]
    fn test_unknown_and_missing_languages() {
        assert_eq!(language_label(Some("sv")), "🌐 SV");
        assert_eq!(language_label(Some("")), "🌐 Unknown");
        assert_eq!(language_label(None), "🌐 Unknown");
    }
}
