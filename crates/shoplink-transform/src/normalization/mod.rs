//! Normalization functions for raw order values.
//!
//! This module provides the field cleaners used by the validator:
//! - **numeric**: integer/float coercion with currency and separator stripping
//! - **text**: text-only coercion, trimming and lower-casing
//! - **datetime**: timestamp layout detection and canonical formatting
//!
//! Every function here reports failure as `None`; malformed input never panics.

pub mod datetime;
pub mod numeric;
pub mod text;

// Re-export commonly used items
pub use datetime::{CANONICAL_LAYOUT, INPUT_LAYOUTS, normalize_timestamp, parse_timestamp};
pub use numeric::{clean_float, clean_int, round_2dp, strip_to_numeric};
pub use text::{normalize_label, normalize_string};
