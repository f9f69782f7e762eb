//! ShopLink order data model.
//!
//! This crate provides the types shared by every stage of the order pipeline:
//! - [`Scalar`]: a tagged raw value as it arrives from a CSV cell or JSON field
//! - [`RawRecord`]: an untyped, unvalidated field mapping
//! - [`OrderRecord`]: the canonical, fully validated order
//! - [`FieldAccess`]: one accessor used uniformly on raw and canonical records
//!
//! # Example
//!
//! ```
//! use shoplink_model::{FieldAccess, RawRecord, Scalar};
//!
//! let raw = RawRecord::from_pairs([("order_id", Scalar::from("ORD7"))]);
//! assert_eq!(raw.field("order_id"), Some(Scalar::from("ORD7")));
//! assert!(raw.field("item").is_none());
//! ```

mod error;
mod order;
mod record;
mod scalar;

pub use error::{ModelError, Result};
pub use order::{OrderField, OrderParts, OrderRecord, PaymentStatus};
pub use record::{FieldAccess, RawRecord};
pub use scalar::Scalar;
