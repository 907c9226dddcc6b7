//! Export format selection.

use crate::error::ScribeError;
use std::fmt;
use std::str::FromStr;

/// Target format for transcript exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Txt,
    Json,
    Rtf,
}

impl ExportFormat {
    /// File extension for this format, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Json => "json",
            ExportFormat::Rtf => "rtf",
        }
    }

    /// All supported formats.
    pub fn all() -> &'static [ExportFormat] {
        &[ExportFormat::Txt, ExportFormat::Json, ExportFormat::Rtf]
    }
}

impl FromStr for ExportFormat {
    type Err = ScribeError;

    /// Parse a format name. Unrecognized input is a contract violation and
    /// fails; there is no silent default.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "txt" => Ok(ExportFormat::Txt),
            "json" => Ok(ExportFormat::Json),
            "rtf" => Ok(ExportFormat::Rtf),
            _ => Err(ScribeError::UnsupportedFormat {
                format: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}
