//! The persisted transcript record and its validation rules.

use crate::error::{Result, ScribeError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where a transcript came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptSource {
    /// Live microphone recognition session.
    Voice,
    /// Transcription of an uploaded audio file.
    File,
}

/// One saved transcript.
///
/// `id`, `timestamp`, `source` and the file fields are immutable after
/// creation; only `text` changes, through [`TranscriptPatch`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptRecord {
    pub id: String,
    pub text: String,
    pub language: String,
    pub timestamp: DateTime<Utc>,
    pub source: TranscriptSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size_bytes: Option<u64>,
}

impl TranscriptRecord {
    /// Create a record from a completed recognition session.
    ///
    /// Fails with `EmptyTranscript` when the text is empty or whitespace-only;
    /// empty results are discarded, never persisted.
    pub fn from_voice(
        text: impl Into<String>,
        language: impl Into<String>,
        duration_seconds: Option<u32>,
    ) -> Result<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ScribeError::EmptyTranscript);
        }
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            text,
            language: language.into(),
            timestamp: Utc::now(),
            source: TranscriptSource::Voice,
            duration_seconds,
            file_name: None,
            file_size_bytes: None,
        })
    }

    /// Create a record from a completed file transcription.
    pub fn from_file(
        text: impl Into<String>,
        language: impl Into<String>,
        file_name: impl Into<String>,
        file_size_bytes: Option<u64>,
        duration_seconds: Option<u32>,
    ) -> Result<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ScribeError::EmptyTranscript);
        }
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            text,
            language: language.into(),
            timestamp: Utc::now(),
            source: TranscriptSource::File,
            duration_seconds,
            file_name: Some(file_name.into()),
            file_size_bytes,
        })
    }
}

/// Fields a caller may change on a stored record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranscriptPatch {
    /// Replacement text. Stored verbatim; user edits are never re-normalized.
    pub text: Option<String>,
}

impl TranscriptPatch {
    /// Patch that replaces the transcript text.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

/// Validate a record against store invariants before it is persisted.
pub(crate) fn validate(record: &TranscriptRecord, languages: &[String]) -> Result<()> {
    if record.text.trim().is_empty() {
        return Err(ScribeError::EmptyTranscript);
    }
    if !languages.iter().any(|code| code == &record.language) {
        return Err(ScribeError::UnsupportedLanguage {
            code: record.language.clone(),
        });
    }
    if record.source == TranscriptSource::Voice
        && (record.file_name.is_some() || record.file_size_bytes.is_some())
    {
        return Err(ScribeError::InvalidRecord {
            message: "file metadata on a voice record".to_string(),
        });
    }
    Ok(())
}
