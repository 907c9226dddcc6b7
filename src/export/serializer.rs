//! Renders transcript records into txt, json, or rtf payloads.
//!
//! These layouts are the crate's only bit-exact external contract; tests pin
//! them down. JSON is the round-trippable format: a bare single-record export
//! parses back to exactly `{text, timestamp}`.

use crate::defaults;
use crate::error::Result;
use crate::export::format::ExportFormat;
use crate::store::record::{TranscriptRecord, TranscriptSource};
use crate::text::analysis::{count_words, estimate_reading_minutes, extract_keywords, summarize};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A rendered export: content plus the extension it should be saved under.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportPayload {
    pub content: String,
    pub extension: &'static str,
}

/// Render one or many records into the requested format.
pub fn serialize(
    records: &[TranscriptRecord],
    format: ExportFormat,
    include_metadata: bool,
) -> Result<ExportPayload> {
    serialize_at(records, format, include_metadata, Utc::now())
}

/// [`serialize`] with an explicit export instant, for deterministic output.
pub fn serialize_at(
    records: &[TranscriptRecord],
    format: ExportFormat,
    include_metadata: bool,
    now: DateTime<Utc>,
) -> Result<ExportPayload> {
    let content = match format {
        ExportFormat::Txt => render_txt(records, include_metadata, now),
        ExportFormat::Json => render_json(records, include_metadata, now)?,
        ExportFormat::Rtf => render_rtf(records, include_metadata),
    };
    Ok(ExportPayload {
        content,
        extension: format.extension(),
    })
}

fn source_label(source: TranscriptSource) -> &'static str {
    match source {
        TranscriptSource::Voice => "voice",
        TranscriptSource::File => "file",
    }
}

// ── txt ──────────────────────────────────────────────────────────────────

const TXT_RULE: &str = "----------------------------------------";
const TXT_HEADER_RULE: &str = "========================================";

fn txt_metadata_block(record: &TranscriptRecord) -> String {
    let mut block = String::new();
    block.push_str(&format!("ID: {}\n", record.id));
    block.push_str(&format!("Language: {}\n", record.language));
    block.push_str(&format!(
        "Created: {}\n",
        record.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    block.push_str(&format!("Source: {}\n", source_label(record.source)));
    if let Some(file_name) = &record.file_name {
        block.push_str(&format!("File: {}\n", file_name));
    }
    if let Some(size) = record.file_size_bytes {
        block.push_str(&format!("Size: {} bytes\n", size));
    }
    if let Some(duration) = record.duration_seconds {
        block.push_str(&format!("Duration: {}s\n", duration));
    }
    block.push_str(&format!("Words: {}\n", count_words(&record.text)));
    block.push_str(TXT_RULE);
    block.push('\n');
    block
}

fn txt_record(record: &TranscriptRecord, include_metadata: bool) -> String {
    if include_metadata {
        format!("{}{}", txt_metadata_block(record), record.text)
    } else {
        record.text.clone()
    }
}

fn render_txt(records: &[TranscriptRecord], include_metadata: bool, now: DateTime<Utc>) -> String {
    if let [record] = records {
        return txt_record(record, include_metadata);
    }

    let mut out = String::new();
    out.push_str("VoiceScribe Export\n");
    out.push_str(&format!(
        "Date: {}\n",
        now.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out.push_str(&format!("Total transcriptions: {}\n", records.len()));
    out.push_str(TXT_HEADER_RULE);
    out.push('\n');

    for (index, record) in records.iter().enumerate() {
        out.push_str(&format!("\n--- Transcription {} ---\n", index + 1));
        out.push_str(&txt_record(record, include_metadata));
        out.push('\n');
    }
    out
}

// ── json ─────────────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonRecordFull<'a> {
    id: &'a str,
    text: &'a str,
    language: &'a str,
    timestamp: String,
    source: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_seconds: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    file_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    file_size_bytes: Option<u64>,
    word_count: usize,
    keywords: Vec<String>,
    summary: String,
    reading_time: usize,
}

#[derive(Serialize)]
struct JsonRecordBare<'a> {
    text: &'a str,
    timestamp: String,
}

#[derive(Serialize)]
struct JsonRecordBareBatch<'a> {
    text: &'a str,
    timestamp: String,
    language: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonExportInfo {
    date: String,
    total_count: usize,
    version: &'static str,
}

#[derive(Serialize)]
struct JsonBatch {
    export: JsonExportInfo,
    transcriptions: Vec<serde_json::Value>,
}

fn json_full(record: &TranscriptRecord) -> JsonRecordFull<'_> {
    JsonRecordFull {
        id: &record.id,
        text: &record.text,
        language: &record.language,
        timestamp: record.timestamp.to_rfc3339(),
        source: source_label(record.source),
        duration_seconds: record.duration_seconds,
        file_name: record.file_name.as_deref(),
        file_size_bytes: record.file_size_bytes,
        word_count: count_words(&record.text),
        keywords: extract_keywords(&record.text),
        summary: summarize(&record.text, defaults::SUMMARY_WORDS),
        reading_time: estimate_reading_minutes(&record.text),
    }
}

fn render_json(
    records: &[TranscriptRecord],
    include_metadata: bool,
    now: DateTime<Utc>,
) -> Result<String> {
    if let [record] = records {
        return Ok(if include_metadata {
            serde_json::to_string_pretty(&json_full(record))?
        } else {
            serde_json::to_string_pretty(&JsonRecordBare {
                text: &record.text,
                timestamp: record.timestamp.to_rfc3339(),
            })?
        });
    }

    let transcriptions = records
        .iter()
        .map(|record| {
            if include_metadata {
                serde_json::to_value(json_full(record))
            } else {
                serde_json::to_value(JsonRecordBareBatch {
                    text: &record.text,
                    timestamp: record.timestamp.to_rfc3339(),
                    language: &record.language,
                })
            }
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let batch = JsonBatch {
        export: JsonExportInfo {
            date: now.to_rfc3339(),
            total_count: records.len(),
            version: defaults::EXPORT_FORMAT_VERSION,
        },
        transcriptions,
    };
    Ok(serde_json::to_string_pretty(&batch)?)
}

// ── rtf ──────────────────────────────────────────────────────────────────

const RTF_PREAMBLE: &str = "{\\rtf1\\ansi\\deff0\n{\\fonttbl{\\f0\\fswiss Helvetica;}}\n\\f0\\fs24\n";

/// Escape body text for RTF in a single character pass, so backslashes
/// inserted for `{`/`}` are never themselves re-escaped.
fn rtf_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '{' => out.push_str("\\{"),
            '}' => out.push_str("\\}"),
            '\n' => out.push_str("\\par "),
            _ => out.push(ch),
        }
    }
    out
}

fn rtf_metadata_lines(record: &TranscriptRecord) -> String {
    let mut out = String::new();
    out.push_str(&format!("{{\\b ID:}} {}\\par\n", rtf_escape(&record.id)));
    out.push_str(&format!(
        "{{\\b Language:}} {}\\par\n",
        rtf_escape(&record.language)
    ));
    out.push_str(&format!(
        "{{\\b Created:}} {}\\par\n",
        record.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out.push_str(&format!(
        "{{\\b Source:}} {}\\par\n",
        source_label(record.source)
    ));
    if let Some(file_name) = &record.file_name {
        out.push_str(&format!("{{\\b File:}} {}\\par\n", rtf_escape(file_name)));
    }
    if let Some(duration) = record.duration_seconds {
        out.push_str(&format!("{{\\b Duration:}} {}s\\par\n", duration));
    }
    out.push_str("\\par\n");
    out
}

fn render_rtf(records: &[TranscriptRecord], include_metadata: bool) -> String {
    let mut out = String::from(RTF_PREAMBLE);

    for (index, record) in records.iter().enumerate() {
        if records.len() > 1 {
            out.push_str(&format!("{{\\b Transcription {}}}\\par\n", index + 1));
        }
        if include_metadata {
            out.push_str(&rtf_metadata_lines(record));
        }
        out.push_str(&rtf_escape(&record.text));
        out.push_str("\\par\n");
        if records.len() > 1 && index + 1 < records.len() {
            out.push_str("\\par\n");
        }
    }

    out.push('}');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record_at(text: &str) -> TranscriptRecord {
        let mut record = TranscriptRecord::from_voice(text, "en", Some(4)).unwrap();
        record.id = "rec-1".to_string();
        record.timestamp = Utc.with_ymd_and_hms(2024, 3, 2, 10, 30, 0).unwrap();
        record
    }

    fn export_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 1, 9, 0, 0).unwrap()
    }

    // ── txt ──────────────────────────────────────────────────────────────

    #[test]
    fn test_txt_without_metadata_is_raw_text() {
        let record = record_at("Hello world.");
        let payload = serialize_at(
            std::slice::from_ref(&record),
            ExportFormat::Txt,
            false,
            export_instant(),
        )
        .unwrap();
        assert_eq!(payload.content, "Hello world.");
        assert_eq!(payload.extension, "txt");
    }

    #[test]
    fn test_txt_with_metadata_has_block_and_rule() {
        let record = record_at("Hello world.");
        let payload = serialize_at(
            std::slice::from_ref(&record),
            ExportFormat::Txt,
            true,
            export_instant(),
        )
        .unwrap();

        assert!(payload.content.contains("ID: rec-1"));
        assert!(payload.content.contains("Language: en"));
        assert!(payload.content.contains("Created: 2024-03-02 10:30:00 UTC"));
        assert!(payload.content.contains("Source: voice"));
        assert!(payload.content.contains("Duration: 4s"));
        assert!(payload.content.contains("Words: 2"));
        assert!(payload.content.contains(TXT_RULE));
        assert!(payload.content.ends_with("Hello world."));
    }

    #[test]
    fn test_txt_batch_has_header_and_numbered_separators() {
        let records = vec![record_at("First one."), record_at("Second one.")];
        let payload =
            serialize_at(&records, ExportFormat::Txt, false, export_instant()).unwrap();

        assert!(payload.content.starts_with("VoiceScribe Export\n"));
        assert!(payload.content.contains("Date: 2024-04-01 09:00:00 UTC"));
        assert!(payload.content.contains("Total transcriptions: 2"));
        assert!(payload.content.contains(TXT_HEADER_RULE));
        assert!(payload.content.contains("--- Transcription 1 ---"));
        assert!(payload.content.contains("--- Transcription 2 ---"));
    }

    #[test]
    fn test_txt_file_record_metadata() {
        let mut record =
            TranscriptRecord::from_file("From a file.", "en", "memo.mp3", Some(2048), None)
                .unwrap();
        record.timestamp = Utc.with_ymd_and_hms(2024, 3, 2, 10, 30, 0).unwrap();

        let payload = serialize_at(
            std::slice::from_ref(&record),
            ExportFormat::Txt,
            true,
            export_instant(),
        )
        .unwrap();
        assert!(payload.content.contains("Source: file"));
        assert!(payload.content.contains("File: memo.mp3"));
        assert!(payload.content.contains("Size: 2048 bytes"));
    }

    // ── json ─────────────────────────────────────────────────────────────

    #[test]
    fn test_json_bare_round_trip_is_exactly_text_and_timestamp() {
        let record = record_at("Hello world.");
        let payload = serialize_at(
            std::slice::from_ref(&record),
            ExportFormat::Json,
            false,
            export_instant(),
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&payload.content).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 2, "bare export must have exactly two keys");
        assert_eq!(object["text"], "Hello world.");
        assert_eq!(object["timestamp"], record.timestamp.to_rfc3339());
    }

    #[test]
    fn test_json_with_metadata_has_derived_fields() {
        let record = record_at("Hello wonderful world. How are you today my friend?");
        let payload = serialize_at(
            std::slice::from_ref(&record),
            ExportFormat::Json,
            true,
            export_instant(),
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&payload.content).unwrap();
        assert_eq!(value["id"], "rec-1");
        assert_eq!(value["language"], "en");
        assert_eq!(value["source"], "voice");
        assert_eq!(value["wordCount"], 9);
        assert_eq!(value["readingTime"], 1);
        assert!(value["keywords"].as_array().unwrap().len() > 3);
        assert!(value["summary"].is_string());
        assert_eq!(value["durationSeconds"], 4);
        assert!(value.get("fileName").is_none());
    }

    #[test]
    fn test_json_batch_envelope() {
        let records = vec![record_at("First."), record_at("Second.")];
        let payload =
            serialize_at(&records, ExportFormat::Json, false, export_instant()).unwrap();

        let value: serde_json::Value = serde_json::from_str(&payload.content).unwrap();
        assert_eq!(value["export"]["totalCount"], 2);
        assert_eq!(value["export"]["version"], "1.0");
        assert_eq!(value["export"]["date"], export_instant().to_rfc3339());

        let entries = value["transcriptions"].as_array().unwrap();
        assert_eq!(entries.len(), 2);
        for entry in entries {
            let object = entry.as_object().unwrap();
            assert_eq!(
                object.len(),
                3,
                "batch bare entries carry text, timestamp, language"
            );
            assert!(object.contains_key("language"));
        }
    }

    #[test]
    fn test_json_batch_with_metadata_entries() {
        let records = vec![record_at("First."), record_at("Second.")];
        let payload = serialize_at(&records, ExportFormat::Json, true, export_instant()).unwrap();

        let value: serde_json::Value = serde_json::from_str(&payload.content).unwrap();
        let entries = value["transcriptions"].as_array().unwrap();
        assert!(entries[0].get("wordCount").is_some());
        assert!(entries[0].get("keywords").is_some());
    }

    // ── rtf ──────────────────────────────────────────────────────────────

    #[test]
    fn test_rtf_has_preamble_and_closing_brace() {
        let record = record_at("Hello world.");
        let payload = serialize_at(
            std::slice::from_ref(&record),
            ExportFormat::Rtf,
            false,
            export_instant(),
        )
        .unwrap();

        assert!(payload.content.starts_with("{\\rtf1\\ansi"));
        assert!(payload.content.contains("\\fonttbl"));
        assert!(payload.content.ends_with('}'));
        assert!(payload.content.contains("Hello world."));
    }

    #[test]
    fn test_rtf_metadata_is_bolded() {
        let record = record_at("Hello world.");
        let payload = serialize_at(
            std::slice::from_ref(&record),
            ExportFormat::Rtf,
            true,
            export_instant(),
        )
        .unwrap();

        assert!(payload.content.contains("{\\b ID:} rec-1\\par"));
        assert!(payload.content.contains("{\\b Language:} en\\par"));
    }

    #[test]
    fn test_rtf_escaping() {
        assert_eq!(rtf_escape("a\\b"), "a\\\\b");
        assert_eq!(rtf_escape("{x}"), "\\{x\\}");
        assert_eq!(rtf_escape("line\nbreak"), "line\\par break");
    }

    #[test]
    fn test_rtf_escape_does_not_double_escape() {
        // A backslash followed by a brace: each escaped once, independently.
        assert_eq!(rtf_escape("\\{"), "\\\\\\{");
    }

    #[test]
    fn test_rtf_body_newlines_become_paragraphs() {
        let mut record = record_at("Line one.");
        record.text = "Line one.\nLine two.".to_string();
        let payload = serialize_at(
            std::slice::from_ref(&record),
            ExportFormat::Rtf,
            false,
            export_instant(),
        )
        .unwrap();
        assert!(payload.content.contains("Line one.\\par Line two."));
    }

    #[test]
    fn test_rtf_batch_numbers_records() {
        let records = vec![record_at("First."), record_at("Second.")];
        let payload = serialize_at(&records, ExportFormat::Rtf, false, export_instant()).unwrap();
        assert!(payload.content.contains("{\\b Transcription 1}\\par"));
        assert!(payload.content.contains("{\\b Transcription 2}\\par"));
    }

    // ── payload ──────────────────────────────────────────────────────────

    #[test]
    fn test_extension_follows_format() {
        let record = record_at("Hello.");
        for format in ExportFormat::all() {
            let payload = serialize_at(
                std::slice::from_ref(&record),
                *format,
                false,
                export_instant(),
            )
            .unwrap();
            assert_eq!(payload.extension, format.extension());
        }
    }
}
