//! Pipeline configuration.

use serde::{Deserialize, Serialize};
use shoplink_model::OrderField;

use crate::error::ConfigError;

pub const DEFAULT_MIN_QUANTITY: f64 = 1.0;
pub const DEFAULT_MIN_PRICE: f64 = 0.10;
pub const DEFAULT_MIN_TOTAL: f64 = 0.10;

/// Options controlling validation thresholds and deduplication.
///
/// Deserializes from partial documents; omitted fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Smallest accepted quantity, checked whenever a quantity is supplied.
    pub min_quantity: f64,

    /// Smallest accepted unit price.
    pub min_price: f64,

    /// Smallest accepted order total.
    pub min_total: f64,

    /// Field names forming the deduplication key, in key order.
    pub unique_fields: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_quantity: DEFAULT_MIN_QUANTITY,
            min_price: DEFAULT_MIN_PRICE,
            min_total: DEFAULT_MIN_TOTAL,
            unique_fields: vec![
                OrderField::OrderId.as_str().to_string(),
                OrderField::Timestamp.as_str().to_string(),
            ],
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_min_quantity(mut self, value: f64) -> Self {
        self.min_quantity = value;
        self
    }

    #[must_use]
    pub fn with_min_price(mut self, value: f64) -> Self {
        self.min_price = value;
        self
    }

    #[must_use]
    pub fn with_min_total(mut self, value: f64) -> Self {
        self.min_total = value;
        self
    }

    #[must_use]
    pub fn with_unique_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.unique_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Check thresholds and key fields.
    ///
    /// # Errors
    ///
    /// Returns the first problem found; thresholds are checked before key fields.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("min_quantity", self.min_quantity),
            ("min_price", self.min_price),
            ("min_total", self.min_total),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidThreshold { name, value });
            }
        }
        self.key_fields().map(|_| ())
    }

    /// Resolve `unique_fields` to canonical fields.
    pub fn key_fields(&self) -> Result<Vec<OrderField>, ConfigError> {
        if self.unique_fields.is_empty() {
            return Err(ConfigError::EmptyUniqueFields);
        }
        let mut fields: Vec<OrderField> = Vec::with_capacity(self.unique_fields.len());
        for name in &self.unique_fields {
            let field = name
                .parse::<OrderField>()
                .map_err(|_| ConfigError::UnknownUniqueField { name: name.clone() })?;
            if fields.contains(&field) {
                return Err(ConfigError::DuplicateUniqueField { name: name.clone() });
            }
            fields.push(field);
        }
        Ok(fields)
    }
}
