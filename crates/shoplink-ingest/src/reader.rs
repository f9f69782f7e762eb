//! Format-dispatching order reader.

use std::fs::File;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

use shoplink_model::RawRecord;

use crate::csv_source::CsvRecords;
use crate::error::{IngestError, Result};
use crate::format::InputFormat;
use crate::json_source::JsonRecords;

/// Reads raw order records from a single file.
///
/// The format is fixed when the reader is built, so an unsupported format is
/// reported before any record is produced.
#[derive(Debug, Clone)]
pub struct Reader {
    path: PathBuf,
    format: InputFormat,
}

impl Reader {
    pub fn new(path: impl Into<PathBuf>, format: InputFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    /// Build a reader from a format name such as `"csv"` or `"json"`.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::UnsupportedFormat`] for any other name.
    pub fn with_format_name(path: impl Into<PathBuf>, format: &str) -> Result<Self> {
        Ok(Self::new(path, format.parse()?))
    }

    /// Build a reader whose format is inferred from the file extension.
    pub fn from_extension(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let format = InputFormat::from_path(&path)?;
        Ok(Self { path, format })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> InputFormat {
        self.format
    }

    /// Open the source and return a lazy record iterator.
    ///
    /// Each call reopens the file, so a reader can be read more than once.
    pub fn read(&self) -> Result<RawRecords> {
        let file = open_utf8(&self.path)?;
        tracing::info!(path = %self.path.display(), format = %self.format, "reading orders");
        match self.format {
            InputFormat::Csv => CsvRecords::open(&self.path, file).map(RawRecords::Csv),
            InputFormat::Json => JsonRecords::open(&self.path, file).map(RawRecords::Json),
        }
    }
}

/// Lazy sequence of raw records from either source format.
pub enum RawRecords {
    Csv(CsvRecords),
    Json(JsonRecords),
}

impl Iterator for RawRecords {
    type Item = Result<RawRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            RawRecords::Csv(rows) => rows.next(),
            RawRecords::Json(items) => items.next(),
        }
    }
}

/// Open a file, rejecting UTF-16 byte order marks.
fn open_utf8(path: &Path) -> Result<File> {
    let mut file = File::open(path).map_err(|e| IngestError::from_io(path, e))?;

    let mut buffer = [0u8; 2];
    let bytes_read = file
        .read(&mut buffer)
        .map_err(|e| IngestError::from_io(path, e))?;
    if bytes_read == 2 {
        let encoding = match buffer {
            [0xFF, 0xFE] => Some("UTF-16 LE"),
            [0xFE, 0xFF] => Some("UTF-16 BE"),
            _ => None,
        };
        if let Some(encoding) = encoding {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding,
            });
        }
    }
    file.rewind().map_err(|e| IngestError::from_io(path, e))?;
    Ok(file)
}
