//! JSON list-of-objects sources.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde_json::Value;
use shoplink_model::{RawRecord, Scalar};

use crate::error::{IngestError, Result};

/// Elements of a JSON list, converted to raw records one at a time.
pub struct JsonRecords {
    items: std::vec::IntoIter<Value>,
}

impl JsonRecords {
    pub(crate) fn open(path: &Path, file: File) -> Result<Self> {
        let document: Value = serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            IngestError::JsonParse {
                path: path.to_path_buf(),
                source,
            }
        })?;
        match document {
            Value::Array(items) => {
                tracing::debug!(path = %path.display(), items = items.len(), "JSON list loaded");
                Ok(Self {
                    items: items.into_iter(),
                })
            }
            other => Err(IngestError::NotAList {
                path: path.to_path_buf(),
                found: value_kind(&other),
            }),
        }
    }
}

impl Iterator for JsonRecords {
    type Item = Result<RawRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.items.next().map(|item| Ok(record_from_json(item)))
    }
}

/// Convert one list element; anything but an object is a malformed record.
pub(crate) fn record_from_json(value: Value) -> RawRecord {
    match value {
        Value::Object(fields) => RawRecord::from_pairs(
            fields
                .into_iter()
                .map(|(name, value)| (name, scalar_from_json(value))),
        ),
        other => RawRecord::Malformed(value_kind(&other).to_string()),
    }
}

fn scalar_from_json(value: Value) -> Scalar {
    match value {
        Value::Null => Scalar::Null,
        Value::Bool(flag) => Scalar::Bool(flag),
        Value::Number(number) => match number.as_i64() {
            Some(int) => Scalar::Int(int),
            None => number.as_f64().map_or(Scalar::Null, Scalar::Float),
        },
        Value::String(text) => Scalar::Text(text),
        composite @ (Value::Array(_) | Value::Object(_)) => {
            Scalar::Composite(composite.to_string())
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shoplink_model::FieldAccess;

    #[test]
    fn test_object_keeps_json_types() {
        let record = record_from_json(json!({
            "order_id": "ORD1",
            "quantity": 3,
            "price": 2.5,
            "gift": true,
            "note": null,
            "tags": ["a"]
        }));
        assert_eq!(record.field("order_id"), Some(Scalar::from("ORD1")));
        assert_eq!(record.field("quantity"), Some(Scalar::Int(3)));
        assert_eq!(record.field("price"), Some(Scalar::Float(2.5)));
        assert_eq!(record.field("gift"), Some(Scalar::Bool(true)));
        assert_eq!(record.field("note"), Some(Scalar::Null));
        assert_eq!(
            record.field("tags"),
            Some(Scalar::Composite("[\"a\"]".to_string()))
        );
    }

    #[test]
    fn test_non_object_is_malformed() {
        assert_eq!(
            record_from_json(json!([1, 2])),
            RawRecord::Malformed("array".to_string())
        );
        assert_eq!(
            record_from_json(json!("ORD1")),
            RawRecord::Malformed("string".to_string())
        );
    }
}
