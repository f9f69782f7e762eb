//! Header-driven CSV rows.

use std::fs::File;
use std::path::{Path, PathBuf};

use shoplink_model::{RawRecord, Scalar};

use crate::error::{IngestError, Result};

/// Lazy iterator over CSV rows as raw records.
pub struct CsvRecords {
    path: PathBuf,
    headers: Vec<String>,
    rows: csv::StringRecordsIntoIter<File>,
}

impl CsvRecords {
    pub(crate) fn open(path: &Path, file: File) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(file);
        let headers = reader
            .headers()
            .map_err(|source| IngestError::CsvParse {
                path: path.to_path_buf(),
                source,
            })?
            .iter()
            .map(|name| name.trim().to_string())
            .collect::<Vec<_>>();
        tracing::debug!(path = %path.display(), columns = headers.len(), "CSV header read");
        Ok(Self {
            path: path.to_path_buf(),
            headers,
            rows: reader.into_records(),
        })
    }

    fn to_raw(&self, row: &csv::StringRecord) -> RawRecord {
        if row.len() > self.headers.len() {
            tracing::debug!(
                path = %self.path.display(),
                extra = row.len() - self.headers.len(),
                "ignoring cells beyond the header width"
            );
        }
        // Short rows keep every header as a key; missing cells become null.
        RawRecord::from_pairs(
            self.headers
                .iter()
                .enumerate()
                .filter(|(_, name)| !name.is_empty())
                .map(|(idx, name)| {
                    let value = row.get(idx).map_or(Scalar::Null, Scalar::from);
                    (name.clone(), value)
                }),
        )
    }
}

impl Iterator for CsvRecords {
    type Item = Result<RawRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.rows.next()?;
        Some(
            row.map(|row| self.to_raw(&row))
                .map_err(|source| IngestError::CsvParse {
                    path: self.path.clone(),
                    source,
                }),
        )
    }
}
