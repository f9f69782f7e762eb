//! Batch orchestration: validate every raw record, then deduplicate.

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, info_span};

use shoplink_model::{OrderField, OrderRecord, RawRecord};

use crate::config::PipelineConfig;
use crate::dedupe::dedupe_orders;
use crate::diagnostics::Diagnostics;
use crate::error::ConfigError;
use crate::reconstruct::Derivation;
use crate::validator::RecordValidator;

/// Counters for one batch.
///
/// `output_count == input_count - rejected_count - duplicate_count` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    pub input_count: usize,
    pub rejected_count: usize,
    /// Accepted records with a derived or recalculated numeric field.
    pub reconstructed_count: usize,
    pub duplicate_count: usize,
    pub output_count: usize,
}

/// Cleaned records in first-appearance order, plus batch counters.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessOutput {
    pub records: Vec<OrderRecord>,
    pub stats: PipelineStats,
}

/// Run a batch through validation, reconstruction and deduplication.
///
/// Invalid records are reported to `sink` and skipped; they never abort the batch.
///
/// # Errors
///
/// Returns [`ConfigError`] before reading any record when `config` is invalid.
pub fn process<I>(
    raw_records: I,
    config: &PipelineConfig,
    sink: &mut dyn Diagnostics,
) -> Result<ProcessOutput, ConfigError>
where
    I: IntoIterator<Item = RawRecord>,
{
    config.validate()?;
    let key_fields = config.key_fields()?;

    let span = info_span!("process", unique_fields = ?config.unique_fields);
    let _guard = span.enter();
    let start = Instant::now();

    let mut stats = PipelineStats::default();
    let accepted = info_span!("validate")
        .in_scope(|| validate_stage(raw_records, config, sink, &mut stats));

    let deduped = info_span!("dedupe").in_scope(|| {
        let start = Instant::now();
        let deduped = dedupe_orders(accepted, &key_fields, sink);
        debug!(
            duplicate_count = deduped.duplicate_count,
            survivor_count = deduped.entries.len(),
            duration_ms = start.elapsed().as_millis(),
            "dedupe complete"
        );
        deduped
    });

    stats.duplicate_count = deduped.duplicate_count;
    stats.output_count = deduped.entries.len();
    info!(
        input_count = stats.input_count,
        rejected_count = stats.rejected_count,
        reconstructed_count = stats.reconstructed_count,
        duplicate_count = stats.duplicate_count,
        output_count = stats.output_count,
        duration_ms = start.elapsed().as_millis(),
        "batch processed"
    );
    Ok(ProcessOutput {
        records: deduped.entries,
        stats,
    })
}

fn validate_stage<I>(
    raw_records: I,
    config: &PipelineConfig,
    sink: &mut dyn Diagnostics,
    stats: &mut PipelineStats,
) -> Vec<OrderRecord>
where
    I: IntoIterator<Item = RawRecord>,
{
    let start = Instant::now();
    let validator = RecordValidator::new(config);
    let mut accepted = Vec::new();
    for (index, raw) in raw_records.into_iter().enumerate() {
        stats.input_count += 1;
        match validator.validate(&raw) {
            Ok(validated) => {
                if let Some(field) = reconstructed_field(validated.derivation) {
                    stats.reconstructed_count += 1;
                    sink.reconstructed(index, validated.record.order_id(), field);
                }
                accepted.push(validated.record);
            }
            Err(reason) => {
                stats.rejected_count += 1;
                sink.rejected(index, &raw, &reason);
            }
        }
    }
    debug!(
        input_count = stats.input_count,
        accepted_count = accepted.len(),
        rejected_count = stats.rejected_count,
        duration_ms = start.elapsed().as_millis(),
        "validation complete"
    );
    accepted
}

fn reconstructed_field(derivation: Derivation) -> Option<OrderField> {
    match derivation {
        Derivation::Supplied => None,
        Derivation::Derived(field) => Some(field),
        Derivation::TotalRecalculated => Some(OrderField::Total),
    }
}
