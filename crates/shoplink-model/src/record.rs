//! Untyped input records and the shared field accessor.

use std::collections::BTreeMap;

use crate::scalar::Scalar;

/// Read access to named fields, shared by raw and canonical records.
///
/// `None` means the field is not present at all. A present field holding an
/// explicit null is returned as `Some(Scalar::Null)`.
pub trait FieldAccess {
    fn field(&self, name: &str) -> Option<Scalar>;

    /// Whether `name` exists as a key, regardless of its value.
    fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }
}

/// A record exactly as produced by an input source.
#[derive(Debug, Clone, PartialEq)]
pub enum RawRecord {
    /// A field-name to value mapping (CSV row or JSON object).
    Mapping(BTreeMap<String, Scalar>),
    /// An input element that is not a mapping, described by its kind.
    Malformed(String),
}

impl RawRecord {
    /// Build a mapping record from `(name, value)` pairs.
    pub fn from_pairs<K, I>(pairs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Scalar)>,
    {
        RawRecord::Mapping(
            pairs
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        )
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, RawRecord::Mapping(_))
    }

    /// Iterate over `(name, value)` pairs; empty for malformed records.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        let fields = match self {
            RawRecord::Mapping(fields) => Some(fields),
            RawRecord::Malformed(_) => None,
        };
        fields
            .into_iter()
            .flat_map(|fields| fields.iter().map(|(name, value)| (name.as_str(), value)))
    }
}

impl FieldAccess for RawRecord {
    fn field(&self, name: &str) -> Option<Scalar> {
        match self {
            RawRecord::Mapping(fields) => fields.get(name).cloned(),
            RawRecord::Malformed(_) => None,
        }
    }

    fn has_field(&self, name: &str) -> bool {
        match self {
            RawRecord::Mapping(fields) => fields.contains_key(name),
            RawRecord::Malformed(_) => false,
        }
    }
}
