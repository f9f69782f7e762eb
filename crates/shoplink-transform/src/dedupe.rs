//! Composite-key deduplication.
//!
//! Entries sharing a composite key collapse to the last one seen. The survivor
//! takes the slot of the key's first occurrence, so output order follows first
//! appearance while content follows the latest write.

use std::collections::HashMap;
use std::fmt;

use shoplink_model::{FieldAccess, OrderField, OrderRecord};

use crate::diagnostics::Diagnostics;
use crate::normalization::round_2dp;

/// Ordered tuple of stringified key values; `None` marks an absent field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompositeKey(Vec<Option<String>>);

impl CompositeKey {
    /// Build the key of `entry` from `fields`, in order.
    pub fn of<T: FieldAccess>(entry: &T, fields: &[OrderField]) -> Self {
        CompositeKey(
            fields
                .iter()
                .map(|field| entry.field(field.as_str()).map(|value| value.to_string()))
                .collect(),
        )
    }

    pub fn values(&self) -> &[Option<String>] {
        &self.0
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (pos, value) in self.0.iter().enumerate() {
            if pos > 0 {
                f.write_str(", ")?;
            }
            f.write_str(value.as_deref().unwrap_or("-"))?;
        }
        f.write_str(")")
    }
}

/// Survivors of a deduplication pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Deduplicated<T> {
    pub entries: Vec<T>,
    /// One per occurrence of an already-seen key.
    pub duplicate_count: usize,
}

/// Collapse entries by composite key, last write wins.
pub fn dedupe_by_key<T, I>(
    entries: I,
    fields: &[OrderField],
    sink: &mut dyn Diagnostics,
) -> Deduplicated<T>
where
    T: FieldAccess,
    I: IntoIterator<Item = T>,
{
    let mut slots: HashMap<CompositeKey, usize> = HashMap::new();
    let mut survivors: Vec<T> = Vec::new();
    let mut duplicate_count = 0usize;
    for entry in entries {
        let key = CompositeKey::of(&entry, fields);
        if let Some(&slot) = slots.get(&key) {
            sink.duplicate(&key);
            duplicate_count += 1;
            survivors[slot] = entry;
        } else {
            slots.insert(key, survivors.len());
            survivors.push(entry);
        }
    }
    Deduplicated {
        entries: survivors,
        duplicate_count,
    }
}

/// Deduplicate canonical orders and re-normalize the survivors.
pub fn dedupe_orders<I>(
    records: I,
    fields: &[OrderField],
    sink: &mut dyn Diagnostics,
) -> Deduplicated<OrderRecord>
where
    I: IntoIterator<Item = OrderRecord>,
{
    let deduped = dedupe_by_key(records, fields, sink);
    Deduplicated {
        entries: deduped.entries.into_iter().map(renormalize).collect(),
        duplicate_count: deduped.duplicate_count,
    }
}

/// Re-apply rounding and text normalization to a canonical record.
///
/// Validated records are already normalized, so this is a no-op for them; it
/// guards records that entered the batch by other means (e.g. deserialized).
pub fn renormalize(record: OrderRecord) -> OrderRecord {
    let original = record.clone();
    let mut parts = record.into_parts();
    parts.order_id = parts.order_id.trim().to_string();
    parts.timestamp = parts.timestamp.trim().to_string();
    parts.item = parts.item.trim().to_lowercase();
    parts.price = round_2dp(parts.price);
    parts.total = round_2dp(parts.total);
    match OrderRecord::from_parts(parts) {
        Ok(renormalized) => renormalized,
        Err(error) => {
            tracing::warn!(order_id = original.order_id(), %error, "re-normalization failed, keeping record as is");
            original
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::RecordingDiagnostics;
    use shoplink_model::{RawRecord, Scalar};

    fn raw(order_id: &str, timestamp: &str, item: &str) -> RawRecord {
        RawRecord::from_pairs([
            ("order_id", Scalar::from(order_id)),
            ("timestamp", Scalar::from(timestamp)),
            ("item", Scalar::from(item)),
        ])
    }

    const KEY: [OrderField; 2] = [OrderField::OrderId, OrderField::Timestamp];

    #[test]
    fn test_last_write_wins_in_first_slot() {
        let mut sink = RecordingDiagnostics::default();
        let result = dedupe_by_key(
            vec![
                raw("ORD1", "t1", "first"),
                raw("ORD2", "t1", "other"),
                raw("ORD1", "t1", "second"),
            ],
            &KEY,
            &mut sink,
        );
        assert_eq!(result.duplicate_count, 1);
        assert_eq!(result.entries.len(), 2);
        assert_eq!(result.entries[0].field("item"), Some(Scalar::from("second")));
        assert_eq!(result.entries[1].field("order_id"), Some(Scalar::from("ORD2")));
        assert_eq!(sink.duplicate_keys().len(), 1);
    }

    #[test]
    fn test_count_is_per_extra_occurrence() {
        let mut sink = RecordingDiagnostics::default();
        let result = dedupe_by_key(
            (0..4).map(|n| raw("ORD1", "t1", &format!("v{n}"))),
            &KEY,
            &mut sink,
        );
        assert_eq!(result.duplicate_count, 3);
        assert_eq!(result.entries.len(), 1);
        assert_eq!(result.entries[0].field("item"), Some(Scalar::from("v3")));
    }

    #[test]
    fn test_absent_key_fields_still_group() {
        let mut sink = RecordingDiagnostics::default();
        let a = RawRecord::from_pairs([("item", Scalar::from("a"))]);
        let b = RawRecord::from_pairs([("item", Scalar::from("b"))]);
        let result = dedupe_by_key(vec![a, b], &KEY, &mut sink);
        assert_eq!(result.duplicate_count, 1);
    }

    #[test]
    fn test_key_display() {
        let key = CompositeKey::of(&raw("ORD1", "t1", "x"), &[OrderField::OrderId, OrderField::Price]);
        assert_eq!(key.to_string(), "(ORD1, -)");
        assert_eq!(key.values(), &[Some("ORD1".to_string()), None]);
    }
}
