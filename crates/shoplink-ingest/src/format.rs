//! Input format selection.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{IngestError, Result};

/// Supported order source formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Header row followed by one order per line.
    Csv,
    /// A JSON list of order objects.
    Json,
}

impl InputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            InputFormat::Csv => "csv",
            InputFormat::Json => "json",
        }
    }

    /// Infer the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
            .ok_or_else(|| IngestError::UnknownExtension {
                path: path.to_path_buf(),
            })
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputFormat {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(InputFormat::Csv),
            "json" => Ok(InputFormat::Json),
            _ => Err(IngestError::UnsupportedFormat {
                value: s.to_string(),
            }),
        }
    }
}
