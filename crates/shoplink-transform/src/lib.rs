//! Order cleaning: validation, normalization, reconstruction and deduplication.
//!
//! [`process`] is the entry point. It takes raw records from any source, checks
//! each one with a [`RecordValidator`], fills in a missing quantity, price or total,
//! and collapses records sharing the configured composite key. Rejections,
//! reconstructions and duplicates are reported to a [`Diagnostics`] sink.
//!
//! ```
//! use shoplink_model::{RawRecord, Scalar};
//! use shoplink_transform::{PipelineConfig, RecordingDiagnostics, process};
//!
//! let raw = RawRecord::from_pairs([
//!     ("order_id", Scalar::from("ORD1")),
//!     ("timestamp", Scalar::from("2024-01-05 10:30")),
//!     ("item", Scalar::from("Widget")),
//!     ("quantity", Scalar::from("3")),
//!     ("price", Scalar::from("2.50")),
//!     ("payment_status", Scalar::from("paid")),
//! ]);
//! let mut sink = RecordingDiagnostics::default();
//! let output = process([raw], &PipelineConfig::default(), &mut sink).unwrap();
//! assert_eq!(output.records[0].total(), 7.5);
//! ```

mod config;
mod dedupe;
mod diagnostics;
mod error;
pub mod normalization;
mod pipeline;
mod reconstruct;
mod validator;

pub use config::{DEFAULT_MIN_PRICE, DEFAULT_MIN_QUANTITY, DEFAULT_MIN_TOTAL, PipelineConfig};
pub use dedupe::{CompositeKey, Deduplicated, dedupe_by_key, dedupe_orders, renormalize};
pub use diagnostics::{
    DiagnosticEvent, Diagnostics, NoopDiagnostics, REDACTED_VALUE, RecordingDiagnostics,
    TracingDiagnostics,
};
pub use error::ConfigError;
pub use pipeline::{PipelineStats, ProcessOutput, process};
pub use reconstruct::{Derivation, NumericTrio, Reconstructed, TOTAL_TOLERANCE, reconstruct};
pub use validator::{RecordValidator, RejectReason, ValidatedOrder, validate_record};
