//! Export file-name derivation.

use crate::defaults;
use crate::export::format::ExportFormat;
use crate::store::record::TranscriptRecord;
use crate::text::analysis::summarize;
use chrono::{NaiveDate, Utc};

/// Derived name for a single-record export:
/// `<prefix>_<YYYY-MM-DD of record>_<slug>.<ext>`.
pub fn single_file_name(record: &TranscriptRecord, format: ExportFormat, prefix: &str) -> String {
    format!(
        "{}_{}_{}.{}",
        prefix,
        record.timestamp.format("%Y-%m-%d"),
        slug(&record.text),
        format.extension()
    )
}

/// Derived name for a multi-record export: `<prefix>_Export_<date>.<ext>`.
pub fn batch_file_name(format: ExportFormat, prefix: &str, date: NaiveDate) -> String {
    format!("{}_Export_{}.{}", prefix, date, format.extension())
}

/// Resolve the final file name: an explicit name always wins over derivation.
pub fn resolve_file_name(
    explicit: Option<&str>,
    records: &[TranscriptRecord],
    format: ExportFormat,
    prefix: &str,
) -> String {
    if let Some(name) = explicit {
        return name.to_string();
    }
    match records {
        [single] => single_file_name(single, format, prefix),
        _ => batch_file_name(format, prefix, Utc::now().date_naive()),
    }
}

/// Slug from the first words of the transcript: non-alphanumerics become `_`,
/// truncated to [`defaults::SLUG_MAX_CHARS`] characters.
fn slug(text: &str) -> String {
    summarize(text, defaults::SLUG_WORDS)
        .chars()
        .map(|ch| if ch.is_alphanumeric() { ch } else { '_' })
        .take(defaults::SLUG_MAX_CHARS)
        .collect()
}
