//! Canonical order records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::record::FieldAccess;
use crate::scalar::Scalar;

/// Canonical order fields, in output column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderField {
    OrderId,
    Timestamp,
    Item,
    Quantity,
    Price,
    Total,
    PaymentStatus,
}

impl OrderField {
    pub const ALL: [OrderField; 7] = [
        OrderField::OrderId,
        OrderField::Timestamp,
        OrderField::Item,
        OrderField::Quantity,
        OrderField::Price,
        OrderField::Total,
        OrderField::PaymentStatus,
    ];

    /// Fields that must be present as keys on every raw record.
    pub const REQUIRED: [OrderField; 4] = [
        OrderField::OrderId,
        OrderField::Timestamp,
        OrderField::Item,
        OrderField::PaymentStatus,
    ];

    /// Numeric trio; at least two must be supplied.
    pub const NUMERIC: [OrderField; 3] =
        [OrderField::Quantity, OrderField::Price, OrderField::Total];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderField::OrderId => "order_id",
            OrderField::Timestamp => "timestamp",
            OrderField::Item => "item",
            OrderField::Quantity => "quantity",
            OrderField::Price => "price",
            OrderField::Total => "total",
            OrderField::PaymentStatus => "payment_status",
        }
    }
}

impl fmt::Display for OrderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderField {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        OrderField::ALL
            .into_iter()
            .find(|field| field.as_str() == name)
            .ok_or_else(|| ModelError::UnknownField(name.to_string()))
    }
}

/// Settlement state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Refunded,
    Pending,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Refunded => "refunded",
            PaymentStatus::Pending => "pending",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = ModelError;

    /// Exact match against the lower-case names; callers normalize casing first.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "paid" => Ok(PaymentStatus::Paid),
            "refunded" => Ok(PaymentStatus::Refunded),
            "pending" => Ok(PaymentStatus::Pending),
            other => Err(ModelError::UnknownPaymentStatus(other.to_string())),
        }
    }
}

/// Unchecked field values for building an [`OrderRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderParts {
    pub order_id: String,
    pub timestamp: String,
    pub item: String,
    pub quantity: i64,
    pub price: f64,
    pub total: f64,
    pub payment_status: PaymentStatus,
}

/// A fully validated, normalized order.
///
/// Instances can only be created through [`OrderRecord::from_parts`] (or
/// deserialization, which goes through the same checks), so a value of this type
/// never exists in a partially valid state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OrderParts")]
pub struct OrderRecord {
    order_id: String,
    timestamp: String,
    item: String,
    quantity: i64,
    price: f64,
    total: f64,
    payment_status: PaymentStatus,
}

impl OrderRecord {
    /// Check the structural invariants and build the record.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidRecord`] naming the first offending field.
    pub fn from_parts(parts: OrderParts) -> Result<Self> {
        if !is_order_id(&parts.order_id) {
            return Err(invalid(OrderField::OrderId, "expected ORD followed by digits"));
        }
        if !is_canonical_timestamp(&parts.timestamp) {
            return Err(invalid(
                OrderField::Timestamp,
                "expected YYYY-MM-DDTHH:MM:00Z",
            ));
        }
        if parts.item.is_empty() {
            return Err(invalid(OrderField::Item, "must not be empty"));
        }
        if parts.item != parts.item.trim().to_lowercase() {
            return Err(invalid(OrderField::Item, "must be trimmed and lower-case"));
        }
        if parts.quantity < 0 {
            return Err(invalid(OrderField::Quantity, "must be non-negative"));
        }
        for (field, value) in [
            (OrderField::Price, parts.price),
            (OrderField::Total, parts.total),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(field, "must be a non-negative number"));
            }
        }
        Ok(Self {
            order_id: parts.order_id,
            timestamp: parts.timestamp,
            item: parts.item,
            quantity: parts.quantity,
            price: parts.price,
            total: parts.total,
            payment_status: parts.payment_status,
        })
    }

    pub fn into_parts(self) -> OrderParts {
        OrderParts {
            order_id: self.order_id,
            timestamp: self.timestamp,
            item: self.item,
            quantity: self.quantity,
            price: self.price,
            total: self.total,
            payment_status: self.payment_status,
        }
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn item(&self) -> &str {
        &self.item
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn payment_status(&self) -> PaymentStatus {
        self.payment_status
    }

    /// Typed value of a canonical field.
    pub fn value(&self, field: OrderField) -> Scalar {
        match field {
            OrderField::OrderId => Scalar::Text(self.order_id.clone()),
            OrderField::Timestamp => Scalar::Text(self.timestamp.clone()),
            OrderField::Item => Scalar::Text(self.item.clone()),
            OrderField::Quantity => Scalar::Int(self.quantity),
            OrderField::Price => Scalar::Float(self.price),
            OrderField::Total => Scalar::Float(self.total),
            OrderField::PaymentStatus => Scalar::Text(self.payment_status.as_str().to_string()),
        }
    }
}

impl TryFrom<OrderParts> for OrderRecord {
    type Error = ModelError;

    fn try_from(parts: OrderParts) -> Result<Self> {
        OrderRecord::from_parts(parts)
    }
}

impl FieldAccess for OrderRecord {
    fn field(&self, name: &str) -> Option<Scalar> {
        name.parse::<OrderField>()
            .ok()
            .map(|field| self.value(field))
    }
}

fn invalid(field: OrderField, reason: &str) -> ModelError {
    ModelError::InvalidRecord {
        field,
        reason: reason.to_string(),
    }
}

fn is_order_id(value: &str) -> bool {
    value
        .strip_prefix("ORD")
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

fn is_canonical_timestamp(value: &str) -> bool {
    // YYYY-MM-DDTHH:MM:00Z
    let bytes = value.as_bytes();
    if bytes.len() != 20 || !value.ends_with(":00Z") {
        return false;
    }
    bytes.iter().enumerate().take(16).all(|(idx, b)| match idx {
        4 | 7 => *b == b'-',
        10 => *b == b'T',
        13 => *b == b':',
        _ => b.is_ascii_digit(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts() -> OrderParts {
        OrderParts {
            order_id: "ORD1".to_string(),
            timestamp: "2024-01-05T10:30:00Z".to_string(),
            item: "widget".to_string(),
            quantity: 3,
            price: 2.5,
            total: 7.5,
            payment_status: PaymentStatus::Paid,
        }
    }

    #[test]
    fn test_from_parts_accepts_canonical_values() {
        let record = OrderRecord::from_parts(parts()).unwrap();
        assert_eq!(record.order_id(), "ORD1");
        assert_eq!(record.quantity(), 3);
        assert_eq!(record.field("total"), Some(Scalar::Float(7.5)));
        assert_eq!(record.field("payment_status"), Some(Scalar::from("paid")));
        assert_eq!(record.field("unknown"), None);
    }

    #[test]
    fn test_from_parts_rejects_bad_order_id() {
        for id in ["ORD", "ord1", "ORD1A", "XORD1"] {
            let err = OrderRecord::from_parts(OrderParts {
                order_id: id.to_string(),
                ..parts()
            })
            .unwrap_err();
            assert!(matches!(
                err,
                ModelError::InvalidRecord {
                    field: OrderField::OrderId,
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_from_parts_rejects_non_canonical_timestamp() {
        let err = OrderRecord::from_parts(OrderParts {
            timestamp: "2024-01-05T10:30:15Z".to_string(),
            ..parts()
        })
        .unwrap_err();
        assert!(matches!(
            err,
            ModelError::InvalidRecord {
                field: OrderField::Timestamp,
                ..
            }
        ));
    }

    #[test]
    fn test_from_parts_rejects_unnormalized_item_and_negative_price() {
        assert!(
            OrderRecord::from_parts(OrderParts {
                item: " Widget".to_string(),
                ..parts()
            })
            .is_err()
        );
        assert!(
            OrderRecord::from_parts(OrderParts {
                price: -1.0,
                ..parts()
            })
            .is_err()
        );
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in OrderField::ALL {
            assert_eq!(field.as_str().parse::<OrderField>().unwrap(), field);
        }
        assert_eq!(
            "sku".parse::<OrderField>(),
            Err(ModelError::UnknownField("sku".to_string()))
        );
    }

    #[test]
    fn test_payment_status_parse() {
        assert_eq!("refunded".parse::<PaymentStatus>(), Ok(PaymentStatus::Refunded));
        assert!("cancelled".parse::<PaymentStatus>().is_err());
        assert!("Paid".parse::<PaymentStatus>().is_err());
    }

    #[test]
    fn test_deserialize_goes_through_checks() {
        let json = r#"{"order_id":"ORD9","timestamp":"2024-02-01T08:00:00Z","item":"gadget","quantity":2,"price":1.25,"total":2.5,"payment_status":"pending"}"#;
        let record: OrderRecord = serde_json::from_str(json).expect("valid record");
        assert_eq!(record.payment_status(), PaymentStatus::Pending);

        let bad = json.replace("ORD9", "X9");
        assert!(serde_json::from_str::<OrderRecord>(&bad).is_err());
    }
}
