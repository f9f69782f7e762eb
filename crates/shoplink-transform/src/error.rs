//! Configuration errors for the order pipeline.

use thiserror::Error;

/// Invalid pipeline configuration.
///
/// These abort a run before any record is processed. Data problems in
/// individual records are never reported through this type; see
/// [`crate::RejectReason`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Minimum threshold is negative, NaN or infinite.
    #[error("invalid {name} threshold {value}: must be a finite, non-negative number")]
    InvalidThreshold { name: &'static str, value: f64 },

    /// No fields were given for the composite key.
    #[error("unique_fields must name at least one field")]
    EmptyUniqueFields,

    /// Composite key names a field that orders do not have.
    #[error("unique_fields contains unknown field '{name}'")]
    UnknownUniqueField { name: String },

    /// Composite key repeats a field.
    #[error("unique_fields lists '{name}' more than once")]
    DuplicateUniqueField { name: String },
}
