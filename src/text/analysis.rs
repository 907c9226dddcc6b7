//! Pure text measurements used by the serializer and the caller's UI layer.

use crate::defaults;
use std::collections::HashSet;

/// Count of whitespace-delimited non-empty tokens.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Lowercased, punctuation-stripped tokens longer than two characters,
/// de-duplicated in first-seen order.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut keywords = Vec::new();

    for token in text.split_whitespace() {
        let cleaned: String = token
            .chars()
            .filter(|ch| ch.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect();

        if cleaned.chars().count() > 2 && seen.insert(cleaned.clone()) {
            keywords.push(cleaned);
        }
    }

    keywords
}

/// First `max_words` tokens joined with single spaces, with an ellipsis when
/// truncated. Text with `max_words` tokens or fewer is returned unchanged.
pub fn summarize(text: &str, max_words: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= max_words {
        return text.to_string();
    }
    format!("{}...", words[..max_words].join(" "))
}

/// Estimated reading time in whole minutes, at 200 words per minute.
pub fn estimate_reading_minutes(text: &str) -> usize {
    count_words(text).div_ceil(defaults::WORDS_PER_MINUTE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_words_ignores_extra_whitespace() {
        assert_eq!(count_words("  a  b   c "), 3);
    }

    #[test]
    fn test_count_words_empty() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("   "), 0);
    }

    #[test]
    fn test_extract_keywords_strips_punctuation_and_lowercases() {
        let keywords = extract_keywords("Hello, World! Hello again.");
        assert_eq!(keywords, vec!["hello", "world", "again"]);
    }

    #[test]
    fn test_extract_keywords_drops_short_tokens() {
        let keywords = extract_keywords("I am on my way home");
        assert_eq!(keywords, vec!["way", "home"]);
    }

    #[test]
    fn test_extract_keywords_deduplicates() {
        let keywords = extract_keywords("test test TEST");
        assert_eq!(keywords, vec!["test"]);
    }

    #[test]
    fn test_extract_keywords_cyrillic() {
        let keywords = extract_keywords("Привет, мир! Привет");
        assert_eq!(keywords, vec!["привет", "мир"]);
    }

    #[test]
    fn test_summarize_short_text_unchanged() {
        assert_eq!(summarize("one two three", 10), "one two three");
    }

    #[test]
    fn test_summarize_truncates_with_ellipsis() {
        let text = "one two three four five six seven eight nine ten eleven";
        let summary = summarize(text, 10);
        assert!(summary.ends_with("..."));
        assert_eq!(
            summary,
            "one two three four five six seven eight nine ten..."
        );
    }

    #[test]
    fn test_summarize_exact_word_count_unchanged() {
        let text = "a b c d e";
        assert_eq!(summarize(text, 5), text);
    }

    #[test]
    fn test_estimate_reading_minutes_rounds_up() {
        assert_eq!(estimate_reading_minutes(""), 0);
        assert_eq!(estimate_reading_minutes("word"), 1);

        let two_hundred = vec!["word"; 200].join(" ");
        assert_eq!(estimate_reading_minutes(&two_hundred), 1);

        let two_hundred_one = vec!["word"; 201].join(" ");
        assert_eq!(estimate_reading_minutes(&two_hundred_one), 2);
    }
}
