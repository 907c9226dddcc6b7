//! Error types for voicescribe.

use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScribeError {
    // Configuration errors
    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // Session errors
    #[error("Recording permission denied")]
    PermissionDenied,

    #[error("Recognition engine unavailable: {message}")]
    EngineUnavailable { message: String },

    #[error("Recognition engine failure: {message}")]
    Engine { message: String },

    // Transcript validation errors
    #[error("Transcript text is empty")]
    EmptyTranscript,

    #[error("Unsupported language: {code}")]
    UnsupportedLanguage { code: String },

    #[error("Invalid transcript record: {message}")]
    InvalidRecord { message: String },

    // Store errors
    #[error("Transcript not found: {id}")]
    NotFound { id: String },

    #[error("Duplicate transcript id: {id}")]
    DuplicateId { id: String },

    #[error("Storage failure: {message}")]
    Storage { message: String },

    // Export errors
    #[error("Unsupported export format: {format}")]
    UnsupportedFormat { format: String },

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, ScribeError>;

/// User-facing error taxonomy reported through `SessionObserver::on_error`.
///
/// Engine-native codes are mapped into these kinds via [`ErrorKind::from_engine_code`];
/// anything unmapped becomes `Unknown` rather than crashing the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    PermissionDenied,
    EngineUnavailable,
    Network,
    Audio,
    Server,
    NoSpeech,
    RecognizerBusy,
    Timeout,
    UnsupportedFormat,
    Storage,
    Unknown,
}

/// Engine error code → kind mapping, in the platform recognizer's numbering:
/// 1 network timeout, 2 network, 3 audio, 4 server, 5 client, 6 speech timeout,
/// 7 no match, 8 recognizer busy, 9 insufficient permissions.
const ENGINE_CODE_MAP: &[(i32, ErrorKind)] = &[
    (1, ErrorKind::Network),
    (2, ErrorKind::Network),
    (3, ErrorKind::Audio),
    (4, ErrorKind::Server),
    (5, ErrorKind::Unknown),
    (6, ErrorKind::NoSpeech),
    (7, ErrorKind::NoSpeech),
    (8, ErrorKind::RecognizerBusy),
    (9, ErrorKind::PermissionDenied),
];

impl ErrorKind {
    /// Map an engine-native error code to a user-facing kind.
    pub fn from_engine_code(code: i32) -> Self {
        ENGINE_CODE_MAP
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, kind)| *kind)
            .unwrap_or(ErrorKind::Unknown)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            ErrorKind::PermissionDenied => "Microphone permission denied",
            ErrorKind::EngineUnavailable => "Speech recognition is unavailable",
            ErrorKind::Network => "Network error",
            ErrorKind::Audio => "Audio capture error",
            ErrorKind::Server => "Recognition service error",
            ErrorKind::NoSpeech => "No speech detected",
            ErrorKind::RecognizerBusy => "Recognizer is busy",
            ErrorKind::Timeout => "Recording timed out",
            ErrorKind::UnsupportedFormat => "Unsupported export format",
            ErrorKind::Storage => "Storage error",
            ErrorKind::Unknown => "Unknown recognition error",
        };
        write!(f, "{}", message)
    }
}
