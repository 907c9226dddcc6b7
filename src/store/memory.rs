//! In-memory transcript store.

use crate::defaults;
use crate::error::{Result, ScribeError};
use crate::store::record::{self, TranscriptPatch, TranscriptRecord};
use crate::store::TranscriptStore;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Volatile store backed by a `Vec`, suitable for tests and ephemeral use.
pub struct MemoryStore {
    languages: Vec<String>,
    records: RwLock<Vec<TranscriptRecord>>,
}

impl MemoryStore {
    /// Store accepting the default supported languages.
    pub fn new() -> Self {
        Self::with_languages(
            defaults::SUPPORTED_LANGUAGES
                .iter()
                .map(|code| code.to_string())
                .collect(),
        )
    }

    /// Store accepting a custom language set.
    pub fn with_languages(languages: Vec<String>) -> Self {
        Self {
            languages,
            records: RwLock::new(Vec::new()),
        }
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// True when no records are stored.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TranscriptStore for MemoryStore {
    async fn list(&self) -> Result<Vec<TranscriptRecord>> {
        let mut records = self.records.read().await.clone();
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(records)
    }

    async fn save(&self, record: TranscriptRecord) -> Result<()> {
        record::validate(&record, &self.languages)?;

        let mut records = self.records.write().await;
        if records.iter().any(|existing| existing.id == record.id) {
            return Err(ScribeError::DuplicateId { id: record.id });
        }
        records.push(record);
        Ok(())
    }

    async fn update(&self, id: &str, patch: TranscriptPatch) -> Result<TranscriptRecord> {
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or_else(|| ScribeError::NotFound { id: id.to_string() })?;

        if let Some(text) = patch.text {
            if text.trim().is_empty() {
                return Err(ScribeError::EmptyTranscript);
            }
            record.text = text;
        }

        Ok(record.clone())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.records.write().await.retain(|record| record.id != id);
        Ok(())
    }

    async fn clear_all(&self) -> Result<()> {
        self.records.write().await.clear();
        Ok(())
    }
}
