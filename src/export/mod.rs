//! Transcript export: multi-format serialization and file-name derivation.

pub mod filename;
pub mod format;
pub mod serializer;

pub use filename::{batch_file_name, resolve_file_name, single_file_name};
pub use format::ExportFormat;
pub use serializer::{serialize, serialize_at, ExportPayload};
