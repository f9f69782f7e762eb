//! Diagnostics sinks for per-record pipeline events.
//!
//! The pipeline never logs rejections through global state of its own; callers
//! pass a [`Diagnostics`] implementation into [`crate::process`]. Rejection
//! reasons are only surfaced here, never in the cleaned output.
//!
//! - [`TracingDiagnostics`]: emits `tracing` events at a configurable level
//! - [`RecordingDiagnostics`]: keeps events in memory
//! - [`NoopDiagnostics`]: discards everything

use shoplink_model::{OrderField, RawRecord};
use tracing::Level;

use crate::dedupe::CompositeKey;
use crate::validator::RejectReason;

/// Placeholder used when raw values must not be logged.
pub const REDACTED_VALUE: &str = "[REDACTED]";

/// Receiver for per-record events.
pub trait Diagnostics {
    /// A raw record at `index` (0-based input position) was rejected.
    fn rejected(&mut self, index: usize, record: &RawRecord, reason: &RejectReason);

    /// A numeric field of an accepted record was derived or recalculated.
    fn reconstructed(&mut self, _index: usize, _order_id: &str, _field: OrderField) {}

    /// An entry with an already-seen key replaced the stored one.
    fn duplicate(&mut self, _key: &CompositeKey) {}
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDiagnostics;

impl Diagnostics for NoopDiagnostics {
    fn rejected(&mut self, _index: usize, _record: &RawRecord, _reason: &RejectReason) {}
}

/// Emits events through `tracing`.
#[derive(Debug, Clone, Copy)]
pub struct TracingDiagnostics {
    /// Level for rejected records.
    pub rejection_level: Level,
    /// Level for reconstructed fields.
    pub reconstruction_level: Level,
    /// Level for duplicate keys.
    pub duplicate_level: Level,
    /// Whether raw field values may appear in rejection events.
    pub log_data: bool,
}

impl Default for TracingDiagnostics {
    fn default() -> Self {
        Self {
            rejection_level: Level::DEBUG,
            reconstruction_level: Level::DEBUG,
            duplicate_level: Level::INFO,
            log_data: false,
        }
    }
}

impl TracingDiagnostics {
    #[must_use]
    pub fn with_rejection_level(mut self, level: Level) -> Self {
        self.rejection_level = level;
        self
    }

    #[must_use]
    pub fn with_log_data(mut self, enable: bool) -> Self {
        self.log_data = enable;
        self
    }

    fn describe(&self, record: &RawRecord) -> String {
        if !self.log_data {
            return REDACTED_VALUE.to_string();
        }
        match record {
            RawRecord::Malformed(kind) => format!("<{kind}>"),
            RawRecord::Mapping(_) => record
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

// `tracing` needs the level at compile time, so dispatch on it here.
macro_rules! event_at {
    ($level:expr, $($rest:tt)+) => {{
        let level = $level;
        if level == Level::ERROR {
            tracing::event!(Level::ERROR, $($rest)+);
        } else if level == Level::WARN {
            tracing::event!(Level::WARN, $($rest)+);
        } else if level == Level::INFO {
            tracing::event!(Level::INFO, $($rest)+);
        } else if level == Level::DEBUG {
            tracing::event!(Level::DEBUG, $($rest)+);
        } else {
            tracing::event!(Level::TRACE, $($rest)+);
        }
    }};
}

impl Diagnostics for TracingDiagnostics {
    fn rejected(&mut self, index: usize, record: &RawRecord, reason: &RejectReason) {
        let values = self.describe(record);
        event_at!(
            self.rejection_level,
            index,
            reason = reason.kind(),
            record = %values,
            "rejected record: {reason}"
        );
    }

    fn reconstructed(&mut self, index: usize, order_id: &str, field: OrderField) {
        event_at!(
            self.reconstruction_level,
            index,
            order_id,
            field = field.as_str(),
            "reconstructed numeric field"
        );
    }

    fn duplicate(&mut self, key: &CompositeKey) {
        event_at!(
            self.duplicate_level,
            key = %key,
            "duplicate found, overwriting previous entry"
        );
    }
}

/// A recorded pipeline event.
#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosticEvent {
    Rejected { index: usize, reason: RejectReason },
    Reconstructed {
        index: usize,
        order_id: String,
        field: OrderField,
    },
    Duplicate { key: CompositeKey },
}

/// Keeps every event in arrival order.
#[derive(Debug, Clone, Default)]
pub struct RecordingDiagnostics {
    pub events: Vec<DiagnosticEvent>,
}

impl RecordingDiagnostics {
    /// Rejections as `(input index, reason)` pairs.
    pub fn rejections(&self) -> Vec<(usize, &RejectReason)> {
        self.events
            .iter()
            .filter_map(|event| match event {
                DiagnosticEvent::Rejected { index, reason } => Some((*index, reason)),
                _ => None,
            })
            .collect()
    }

    pub fn duplicate_keys(&self) -> Vec<&CompositeKey> {
        self.events
            .iter()
            .filter_map(|event| match event {
                DiagnosticEvent::Duplicate { key } => Some(key),
                _ => None,
            })
            .collect()
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn rejected(&mut self, index: usize, _record: &RawRecord, reason: &RejectReason) {
        self.events.push(DiagnosticEvent::Rejected {
            index,
            reason: reason.clone(),
        });
    }

    fn reconstructed(&mut self, index: usize, order_id: &str, field: OrderField) {
        self.events.push(DiagnosticEvent::Reconstructed {
            index,
            order_id: order_id.to_string(),
            field,
        });
    }

    fn duplicate(&mut self, key: &CompositeKey) {
        self.events
            .push(DiagnosticEvent::Duplicate { key: key.clone() });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shoplink_model::Scalar;

    #[test]
    fn test_describe_redacts_by_default() {
        let record = RawRecord::from_pairs([("order_id", Scalar::from("ORD1"))]);
        let sink = TracingDiagnostics::default();
        assert_eq!(sink.describe(&record), REDACTED_VALUE);

        let sink = sink.with_log_data(true);
        assert_eq!(sink.describe(&record), "order_id=ORD1");
        assert_eq!(
            sink.describe(&RawRecord::Malformed("array".to_string())),
            "<array>"
        );
    }

    #[test]
    fn test_tracing_sink_accepts_every_level() {
        let record = RawRecord::Malformed("number".to_string());
        let reason = RejectReason::NotAMapping("number".to_string());
        for level in [
            Level::ERROR,
            Level::WARN,
            Level::INFO,
            Level::DEBUG,
            Level::TRACE,
        ] {
            let mut sink = TracingDiagnostics::default().with_rejection_level(level);
            sink.rejected(0, &record, &reason);
        }
    }

    #[test]
    fn test_recording_sink() {
        let mut sink = RecordingDiagnostics::default();
        let reason = RejectReason::InvalidItem(String::new());
        sink.rejected(4, &RawRecord::Malformed("null".to_string()), &reason);
        sink.reconstructed(5, "ORD5", OrderField::Total);
        assert_eq!(sink.rejections(), vec![(4, &reason)]);
        assert_eq!(sink.events.len(), 2);
        assert!(sink.duplicate_keys().is_empty());
    }
}
