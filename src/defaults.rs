//! Default configuration constants for voicescribe.
//!
//! This module provides shared constants used across different configuration types
//! to ensure consistency and eliminate duplication.

/// Languages with recognition models and normalization word lists.
pub const SUPPORTED_LANGUAGES: &[&str] = &["en", "ru", "kk"];

/// Fallback language code used when a requested language is unknown.
pub const FALLBACK_LANGUAGE: &str = "en";

/// Engine locale used when a language code has no table entry.
pub const FALLBACK_LOCALE: &str = "en-US";

/// Default maximum recording duration in seconds.
///
/// A session that receives no result and no stop request within this window
/// is terminated with a `Timeout` error.
pub const MAX_RECORDING_SECS: u64 = 60;

/// Prefix for derived export file names, e.g. `VoiceScribe_2024-03-02_....txt`.
pub const EXPORT_FILE_PREFIX: &str = "VoiceScribe";

/// Version stamp written into batch JSON exports.
pub const EXPORT_FORMAT_VERSION: &str = "1.0";

/// Reading speed used by `estimate_reading_minutes`, in words per minute.
pub const WORDS_PER_MINUTE: usize = 200;

/// Default number of words kept in a transcript summary.
pub const SUMMARY_WORDS: usize = 10;

/// Words taken from the transcript when deriving a file-name slug.
pub const SLUG_WORDS: usize = 3;

/// Maximum length of a file-name slug in characters.
pub const SLUG_MAX_CHARS: usize = 20;

/// Advisory confidence attached to partial results.
///
/// The engine does not report real confidence; these values are display-only
/// and nothing branches on them.
pub const PARTIAL_CONFIDENCE: f32 = 0.6;

/// Advisory confidence attached to final results.
pub const FINAL_CONFIDENCE: f32 = 0.8;

/// Default cap for `TranscriptStore::recent`.
pub const RECENT_LIMIT: usize = 100;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_languages_include_fallback() {
        assert!(SUPPORTED_LANGUAGES.contains(&FALLBACK_LANGUAGE));
    }

    #[test]
    fn confidence_values_are_probabilities() {
        assert!((0.0..=1.0).contains(&PARTIAL_CONFIDENCE));
        assert!((0.0..=1.0).contains(&FINAL_CONFIDENCE));
        assert!(PARTIAL_CONFIDENCE < FINAL_CONFIDENCE);
    }
}
