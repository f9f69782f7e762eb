//! Error types for order ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading order sources.
///
/// All of these are fatal for a run: they describe an unusable source or an
/// operator mistake, never a single malformed order.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Configuration Errors ===
    /// Format name is not one of the supported input formats.
    #[error("unsupported input format '{value}' (expected csv or json)")]
    UnsupportedFormat { value: String },

    /// Format could not be inferred from the file extension.
    #[error("cannot infer input format from {path}; pass the format explicitly")]
    UnknownExtension { path: PathBuf },

    // === File System Errors ===
    /// Input file not found.
    #[error("input file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File uses an encoding other than UTF-8.
    #[error("unsupported encoding {encoding} in {path} (only UTF-8 is supported)")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    // === Parsing Errors ===
    /// CSV framing or decoding failure.
    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// JSON syntax failure.
    #[error("failed to parse JSON {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// JSON document is valid but not a list of records.
    #[error("expected a JSON list of records in {path}, found {found}")]
    NotAList { path: PathBuf, found: &'static str },
}

impl IngestError {
    pub(crate) fn from_io(path: &std::path::Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
