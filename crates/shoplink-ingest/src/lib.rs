//! ShopLink order ingestion.
//!
//! This crate turns order export files into a lazy sequence of
//! [`RawRecord`](shoplink_model::RawRecord) values. Nothing here validates
//! order semantics; every row is handed on as an untyped mapping.
//!
//! # Features
//!
//! - **CSV**: header-driven, one mapping per row, every cell as text
//! - **JSON**: a top-level list of objects, values keep their JSON types
//! - **Format selection**: explicit [`InputFormat`] or inferred from the extension
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use shoplink_ingest::{InputFormat, Reader};
//!
//! let reader = Reader::new(Path::new("orders.csv"), InputFormat::Csv);
//! for record in reader.read()? {
//!     let record = record?;
//!     // ...
//! }
//! ```

mod csv_source;
mod error;
mod format;
mod json_source;
mod reader;

// === Error Types ===
pub use error::{IngestError, Result};

// === Format Selection ===
pub use format::InputFormat;

// === Reading ===
pub use reader::{RawRecords, Reader};
