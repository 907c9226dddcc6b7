//! JSON-file-backed transcript store.
//!
//! The whole history is one JSON array on disk. Writes go to a temp file
//! that is renamed over the target, so a failed write never leaves a
//! half-applied store behind. The in-memory view only commits after the
//! file is safely on disk.

use crate::defaults;
use crate::error::{Result, ScribeError};
use crate::store::record::{self, TranscriptPatch, TranscriptRecord};
use crate::store::TranscriptStore;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, warn};

pub struct JsonFileStore {
    path: PathBuf,
    languages: Vec<String>,
    records: RwLock<Vec<TranscriptRecord>>,
}

impl JsonFileStore {
    /// Open a store at `path`, loading any existing history.
    ///
    /// A missing file is an empty store; invalid JSON is an error rather than
    /// silent data loss.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Self::open_with_languages(
            path,
            defaults::SUPPORTED_LANGUAGES
                .iter()
                .map(|code| code.to_string())
                .collect(),
        )
        .await
    }

    /// Open a store accepting a custom language set.
    pub async fn open_with_languages(
        path: impl Into<PathBuf>,
        languages: Vec<String>,
    ) -> Result<Self> {
        let path = path.into();
        let records = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), count = records.len(), "opened transcript store");
        Ok(Self {
            path,
            languages,
            records: RwLock::new(records),
        })
    }

    /// Default store location: `<data dir>/voicescribe/transcripts.json`.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("voicescribe")
            .join("transcripts.json")
    }

    /// Path this store persists to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `records` to disk via temp file + rename.
    async fn persist(&self, records: &[TranscriptRecord]) -> Result<()> {
        let contents = serde_json::to_string_pretty(records)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| storage_error(&self.path, "create store directory", e))?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, contents)
            .await
            .map_err(|e| storage_error(&tmp_path, "write", e))?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| storage_error(&self.path, "replace", e))?;
        Ok(())
    }
}

fn storage_error(path: &Path, action: &str, e: std::io::Error) -> ScribeError {
    warn!(path = %path.display(), %action, error = %e, "transcript store write failed");
    ScribeError::Storage {
        message: format!("failed to {} {}: {}", action, path.display(), e),
    }
}

#[async_trait]
impl TranscriptStore for JsonFileStore {
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

        let mut next = records.clone();
        next.push(record);
        self.persist(&next).await?;
        *records = next;
        Ok(())
    }

    async fn update(&self, id: &str, patch: TranscriptPatch) -> Result<TranscriptRecord> {
        let mut records = self.records.write().await;
        let index = records
            .iter()
            .position(|record| record.id == id)
            .ok_or_else(|| ScribeError::NotFound { id: id.to_string() })?;

        let mut next = records.clone();
        if let Some(text) = patch.text {
            if text.trim().is_empty() {
                return Err(ScribeError::EmptyTranscript);
            }
            next[index].text = text;
        }

        self.persist(&next).await?;
        *records = next;
        Ok(records[index].clone())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut records = self.records.write().await;
        if !records.iter().any(|record| record.id == id) {
            return Ok(());
        }

        let next: Vec<TranscriptRecord> = records
            .iter()
            .filter(|record| record.id != id)
            .cloned()
            .collect();
        self.persist(&next).await?;
        *records = next;
        Ok(())
    }

    async fn clear_all(&self) -> Result<()> {
        let mut records = self.records.write().await;
        self.persist(&[]).await?;
        records.clear();
        Ok(())
    }
}
