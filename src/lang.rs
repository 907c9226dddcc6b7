//! Language catalog for recognition and normalization.
//!
//! Each supported language is a data entry: display name, engine locale, and
//! the interrogative lead words the normalizer uses to pick `?` over `.`.
//! Adding a language is an addition to [`LANGUAGES`], not a code change.

use crate::defaults;

/// One supported language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// ISO 639-1 code ("en", "ru", "kk").
    pub code: &'static str,
    /// Human-readable name shown to users.
    pub display_name: &'static str,
    /// Locale string handed to the recognition engine.
    pub engine_locale: &'static str,
    /// Lowercased words that open a question in this language.
    pub interrogatives: &'static [&'static str],
}

/// All languages this build knows about.
pub const LANGUAGES: &[Language] = &[
    Language {
        code: "en",
        display_name: "English",
        engine_locale: "en-US",
        interrogatives: &[
            "what", "where", "when", "why", "how", "who", "which", "whose", "whom", "is", "are",
            "was", "were", "do", "does", "did", "can", "could", "would", "should",
        ],
    },
    Language {
        code: "ru",
        display_name: "Russian",
        engine_locale: "ru-RU",
        interrogatives: &[
            "что",
            "кто",
            "где",
            "куда",
            "откуда",
            "когда",
            "почему",
            "зачем",
            "как",
            "какой",
            "какая",
            "какое",
            "какие",
            "чей",
            "сколько",
            "ли",
        ],
    },
    Language {
        code: "kk",
        display_name: "Kazakh",
        engine_locale: "kk-KZ",
        interrogatives: &[
            "не",
            "кім",
            "қайда",
            "қашан",
            "неге",
            "қалай",
            "қандай",
            "қай",
            "қанша",
            "неше",
            "нешінші",
            "кімнің",
        ],
    },
];

/// Look up a language by code.
pub fn lookup(code: &str) -> Option<&'static Language> {
    LANGUAGES.iter().find(|language| language.code == code)
}

/// True when the code is in the catalog.
pub fn is_supported(code: &str) -> bool {
    lookup(code).is_some()
}

/// Engine locale for a language code, defaulting to `en-US` for unknown codes.
pub fn engine_locale(code: &str) -> &'static str {
    lookup(code)
        .map(|language| language.engine_locale)
        .unwrap_or(defaults::FALLBACK_LOCALE)
}

/// Interrogative lead words for a language, falling back to English.
pub fn interrogatives(code: &str) -> &'static [&'static str] {
    lookup(code)
        .or_else(|| lookup(defaults::FALLBACK_LANGUAGE))
        .map(|language| language.interrogatives)
        .unwrap_or(&[])
}

/// Supported language codes, in catalog order.
pub fn supported_codes() -> impl Iterator<Item = &'static str> {
    LANGUAGES.iter().map(|language| language.code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_languages() {
        assert_eq!(lookup("en").map(|l| l.display_name), Some("English"));
        assert_eq!(lookup("ru").map(|l| l.display_name), Some("Russian"));
        assert_eq!(lookup("kk").map(|l| l.display_name), Some("Kazakh"));
    }

    #[test]
    fn test_lookup_unknown_language() {
        assert!(lookup("de").is_none());
        assert!(!is_supported("de"));
    }

    #[test]
    fn test_engine_locale_table() {
        assert_eq!(engine_locale("en"), "en-US");
        assert_eq!(engine_locale("ru"), "ru-RU");
        assert_eq!(engine_locale("kk"), "kk-KZ");
    }

    #[test]
    fn test_engine_locale_defaults_to_english() {
        assert_eq!(engine_locale("xx"), "en-US");
        assert_eq!(engine_locale(""), "en-US");
    }

    #[test]
    fn test_interrogatives_fall_back_to_english() {
        assert_eq!(interrogatives("xx"), interrogatives("en"));
        assert!(interrogatives("xx").contains(&"what"));
    }

    #[test]
    fn test_interrogatives_are_lowercase() {
        for language in LANGUAGES {
            for word in language.interrogatives {
                assert_eq!(
                    *word,
                    word.to_lowercase(),
                    "interrogative '{}' for {} must be lowercase",
                    word,
                    language.code
                );
            }
        }
    }

    #[test]
    fn test_supported_codes_match_defaults() {
        let codes: Vec<&str> = supported_codes().collect();
        assert_eq!(codes, crate::defaults::SUPPORTED_LANGUAGES);
    }
}
