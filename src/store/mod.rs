//! Transcript persistence.
//!
//! The session and export layers consume [`TranscriptStore`] purely as an
//! interface; [`MemoryStore`] and [`JsonFileStore`] are the bundled backends.

pub mod json_file;
pub mod memory;
pub mod record;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use record::{TranscriptPatch, TranscriptRecord, TranscriptSource};

use crate::error::Result;
use async_trait::async_trait;

/// Append/update/delete/list operations over transcript records.
///
/// `save` is all-or-nothing: a failed save leaves the store unchanged, so a
/// record is never half-visible as "saved".
#[async_trait]
pub trait TranscriptStore: Send + Sync {
    /// All records, most recent first.
    async fn list(&self) -> Result<Vec<TranscriptRecord>>;

    /// The most recent `limit` records. [`crate::defaults::RECENT_LIMIT`] is
    /// the conventional cap for history views.
    async fn recent(&self, limit: usize) -> Result<Vec<TranscriptRecord>> {
        let mut records = self.list().await?;
        records.truncate(limit);
        Ok(records)
    }

    /// Persist a new record. Fails on duplicate id, empty text, or a language
    /// outside the configured set.
    async fn save(&self, record: TranscriptRecord) -> Result<()>;

    /// Apply a patch to an existing record and return the updated record.
    /// Fails with `NotFound` when the id is absent.
    async fn update(&self, id: &str, patch: TranscriptPatch) -> Result<TranscriptRecord>;

    /// Remove a record. A missing id is a no-op.
    async fn delete(&self, id: &str) -> Result<()>;

    /// Remove every record.
    async fn clear_all(&self) -> Result<()>;
}
