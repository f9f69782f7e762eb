//! Per-record validation.
//!
//! A raw record passes through these gates in order; the first failing gate
//! rejects it:
//! 1. **Presence**: a mapping holding every required key and at least two of
//!    `quantity`, `price`, `total`
//! 2. **order_id**: `ORD` followed by digits
//! 3. **timestamp**: one of the accepted layouts
//! 4. **item**: non-empty text
//! 5. **Thresholds**: every numeric value that survived cleaning meets its minimum
//! 6. **Reconstruction**: at least two numeric values, the third derived
//! 7. **payment_status**: `paid`, `refunded` or `pending`

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use shoplink_model::{
    FieldAccess, ModelError, OrderField, OrderParts, OrderRecord, PaymentStatus, RawRecord, Scalar,
};

use crate::config::PipelineConfig;
use crate::normalization::{
    clean_float, clean_int, normalize_label, normalize_string, normalize_timestamp,
};
use crate::reconstruct::{Derivation, NumericTrio, reconstruct};

static ORDER_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ORD[0-9]+$").expect("valid order id pattern"));

/// Why a raw record did not become an [`OrderRecord`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RejectReason {
    #[error("record is not a field mapping (found {0})")]
    NotAMapping(String),

    #[error("missing required field(s): {}", join_fields(.0))]
    MissingFields(Vec<OrderField>),

    #[error("only {present} of quantity/price/total supplied, at least 2 required")]
    InsufficientNumericFields { present: usize },

    #[error("invalid order_id '{0}'")]
    InvalidOrderId(String),

    #[error("unrecognized timestamp '{0}'")]
    InvalidTimestamp(String),

    #[error("item is not non-empty text (found '{0}')")]
    InvalidItem(String),

    #[error("{field} {value} is below the minimum {minimum}")]
    BelowMinimum {
        field: OrderField,
        value: f64,
        minimum: f64,
    },

    #[error("only {present} of quantity/price/total are usable numbers, at least 2 required")]
    TooFewNumericValues { present: usize },

    #[error("cannot reconstruct: {divisor} is zero")]
    DivisionByZero { divisor: OrderField },

    #[error("derived quantity {value} is not a whole number")]
    UnderivableQuantity { value: f64 },

    #[error("invalid payment_status '{0}'")]
    InvalidPaymentStatus(String),

    #[error(transparent)]
    Invariant(#[from] ModelError),
}

impl RejectReason {
    /// Stable short name for logs and counters.
    pub fn kind(&self) -> &'static str {
        match self {
            RejectReason::NotAMapping(_) => "not_a_mapping",
            RejectReason::MissingFields(_) => "missing_fields",
            RejectReason::InsufficientNumericFields { .. } => "insufficient_numeric_fields",
            RejectReason::InvalidOrderId(_) => "invalid_order_id",
            RejectReason::InvalidTimestamp(_) => "invalid_timestamp",
            RejectReason::InvalidItem(_) => "invalid_item",
            RejectReason::BelowMinimum { .. } => "below_minimum",
            RejectReason::TooFewNumericValues { .. } => "too_few_numeric_values",
            RejectReason::DivisionByZero { .. } => "division_by_zero",
            RejectReason::UnderivableQuantity { .. } => "underivable_quantity",
            RejectReason::InvalidPaymentStatus(_) => "invalid_payment_status",
            RejectReason::Invariant(_) => "invariant",
        }
    }
}

fn join_fields(fields: &[OrderField]) -> String {
    fields
        .iter()
        .map(|field| field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A record that passed every gate.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedOrder {
    pub record: OrderRecord,
    pub derivation: Derivation,
}

/// Validates raw records against configured thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordValidator {
    min_quantity: f64,
    min_price: f64,
    min_total: f64,
}

impl Default for RecordValidator {
    fn default() -> Self {
        Self::new(&PipelineConfig::default())
    }
}

impl RecordValidator {
    /// Build a validator from a config; the config is assumed validated.
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            min_quantity: config.min_quantity,
            min_price: config.min_price,
            min_total: config.min_total,
        }
    }

    /// Run every gate on one raw record.
    pub fn validate(&self, raw: &RawRecord) -> Result<ValidatedOrder, RejectReason> {
        check_presence(raw)?;

        let order_id = value_of(raw, OrderField::OrderId);
        let order_id = normalize_string(&order_id)
            .map(str::trim)
            .filter(|id| ORDER_ID.is_match(id))
            .ok_or_else(|| RejectReason::InvalidOrderId(order_id.to_string()))?
            .to_string();

        let timestamp = value_of(raw, OrderField::Timestamp);
        let timestamp = normalize_string(&timestamp)
            .and_then(normalize_timestamp)
            .ok_or_else(|| RejectReason::InvalidTimestamp(timestamp.to_string()))?;

        let item = value_of(raw, OrderField::Item);
        let item =
            normalize_label(&item).ok_or_else(|| RejectReason::InvalidItem(item.to_string()))?;

        let trio = NumericTrio {
            quantity: raw.field(OrderField::Quantity.as_str()).as_ref().and_then(clean_int),
            price: raw.field(OrderField::Price.as_str()).as_ref().and_then(clean_float),
            total: raw.field(OrderField::Total.as_str()).as_ref().and_then(clean_float),
        };
        self.check_thresholds(&trio)?;
        let numbers = reconstruct(trio)?;

        let status = value_of(raw, OrderField::PaymentStatus);
        let payment_status = normalize_label(&status)
            .and_then(|label| label.parse::<PaymentStatus>().ok())
            .ok_or_else(|| RejectReason::InvalidPaymentStatus(status.to_string()))?;

        let record = OrderRecord::from_parts(OrderParts {
            order_id,
            timestamp,
            item,
            quantity: numbers.quantity,
            price: numbers.price,
            total: numbers.total,
            payment_status,
        })?;
        Ok(ValidatedOrder {
            record,
            derivation: numbers.derivation,
        })
    }

    fn check_thresholds(&self, trio: &NumericTrio) -> Result<(), RejectReason> {
        let checks = [
            (
                OrderField::Quantity,
                trio.quantity.map(|q| q as f64),
                self.min_quantity,
            ),
            (OrderField::Price, trio.price, self.min_price),
            (OrderField::Total, trio.total, self.min_total),
        ];
        for (field, value, minimum) in checks {
            if let Some(value) = value
                && value < minimum
            {
                return Err(RejectReason::BelowMinimum {
                    field,
                    value,
                    minimum,
                });
            }
        }
        Ok(())
    }
}

/// Validate with the default thresholds.
pub fn validate_record(raw: &RawRecord) -> Result<ValidatedOrder, RejectReason> {
    RecordValidator::default().validate(raw)
}

fn check_presence(raw: &RawRecord) -> Result<(), RejectReason> {
    if let RawRecord::Malformed(kind) = raw {
        return Err(RejectReason::NotAMapping(kind.clone()));
    }
    let missing: Vec<OrderField> = OrderField::REQUIRED
        .into_iter()
        .filter(|field| !raw.has_field(field.as_str()))
        .collect();
    if !missing.is_empty() {
        return Err(RejectReason::MissingFields(missing));
    }
    let present = OrderField::NUMERIC
        .into_iter()
        .filter(|field| raw.has_field(field.as_str()))
        .count();
    if present < 2 {
        return Err(RejectReason::InsufficientNumericFields { present });
    }
    Ok(())
}

/// Value of a field already known to be present.
fn value_of(raw: &RawRecord, field: OrderField) -> Scalar {
    raw.field(field.as_str()).unwrap_or(Scalar::Null)
}
