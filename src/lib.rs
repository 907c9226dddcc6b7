//! voicescribe - offline speech-to-text capture and transcript management.
//!
//! Acoustic recognition runs in an external engine; this crate owns the
//! session lifecycle, text normalization, transcript storage and export.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod config;
pub mod defaults;
pub mod error;
pub mod export;
pub mod lang;
pub mod session;
pub mod store;
pub mod text;

// Core capability traits (engine → session → store)
pub use session::engine::{EngineEvent, EngineOptions, MockEngine, RecognitionEngine};
pub use session::observer::{CollectorObserver, ObservedEvent, SessionObserver, TranscriptUpdate};
pub use session::permission::{MicrophonePermission, StaticPermission};
pub use store::{JsonFileStore, MemoryStore, TranscriptStore};

// Session lifecycle
pub use session::machine::SessionState;
pub use session::{RecognitionSession, SessionConfig};

// Records and export
pub use export::{ExportFormat, ExportPayload};
pub use store::record::{TranscriptPatch, TranscriptRecord, TranscriptSource};

// Text post-processing
pub use text::normalizer::normalize;

// Error handling
pub use error::{ErrorKind, Result, ScribeError};

// Config
pub use config::Config;
