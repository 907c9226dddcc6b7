//! Text post-processing for raw recognizer output.

pub mod analysis;
pub mod normalizer;

pub use analysis::{count_words, estimate_reading_minutes, extract_keywords, summarize};
pub use normalizer::normalize;
