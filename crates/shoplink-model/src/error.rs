//! Error types for the order data model.

use thiserror::Error;

use crate::order::OrderField;

/// Errors raised when building model values from untrusted text.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ModelError {
    /// Field name is not one of the canonical order fields.
    #[error("unknown order field '{0}'")]
    UnknownField(String),

    /// Payment status outside the closed set.
    #[error("unknown payment status '{0}'")]
    UnknownPaymentStatus(String),

    /// Parts handed to [`crate::OrderRecord::from_parts`] break a record invariant.
    #[error("invalid {field}: {reason}")]
    InvalidRecord { field: OrderField, reason: String },
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
