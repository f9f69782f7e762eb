use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{debug, info, info_span};

use shoplink_ingest::{InputFormat, Reader};
use shoplink_model::{OrderField, RawRecord};
use shoplink_transform::{PipelineConfig, ProcessOutput, TracingDiagnostics, process};

use crate::cli::CleanArgs;
use crate::summary::apply_table_style;

/// Everything the summary needs about one `clean` run.
pub struct CleanResult {
    pub input: PathBuf,
    pub format: InputFormat,
    pub output: ProcessOutput,
    pub preview: usize,
}

pub fn run_fields() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Field", "Required", "Numeric"]);
    apply_table_style(&mut table);
    for field in OrderField::ALL {
        table.add_row(vec![
            field.as_str(),
            yes_no(OrderField::REQUIRED.contains(&field)),
            yes_no(OrderField::NUMERIC.contains(&field)),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "-" }
}

pub fn run_clean(args: &CleanArgs) -> Result<CleanResult> {
    let span = info_span!("clean", input = %args.input.display());
    let _guard = span.enter();

    let config = resolve_config(args)?;
    config.validate().context("invalid pipeline configuration")?;

    let reader = match &args.format {
        Some(name) => Reader::with_format_name(&args.input, name),
        None => Reader::from_extension(&args.input),
    }
    .context("select input format")?;

    let start = Instant::now();
    let raw_records = reader
        .read()
        .and_then(|records| records.collect::<Result<Vec<RawRecord>, _>>())
        .with_context(|| format!("read {}", args.input.display()))?;
    debug!(
        record_count = raw_records.len(),
        duration_ms = start.elapsed().as_millis(),
        "ingest complete"
    );

    let mut sink = TracingDiagnostics::default()
        .with_rejection_level(args.log_rejections_at.into())
        .with_log_data(args.log_data);
    let output = process(raw_records, &config, &mut sink).context("process orders")?;
    info!(
        output_count = output.stats.output_count,
        rejected_count = output.stats.rejected_count,
        "clean complete"
    );

    Ok(CleanResult {
        input: reader.path().to_path_buf(),
        format: reader.format(),
        output,
        preview: args.preview,
    })
}

/// Defaults, then the config file, then individual flags.
fn resolve_config(args: &CleanArgs) -> Result<PipelineConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(value) = args.min_quantity {
        config = config.with_min_quantity(value);
    }
    if let Some(value) = args.min_price {
        config = config.with_min_price(value);
    }
    if let Some(value) = args.min_total {
        config = config.with_min_total(value);
    }
    if let Some(fields) = &args.unique_fields {
        config = config.with_unique_fields(fields.iter().map(|name| name.trim()));
    }
    Ok(config)
}

fn load_config(path: &Path) -> Result<PipelineConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("parse config {}", path.display()))?;
    debug!(path = %path.display(), "loaded pipeline config");
    Ok(config)
}
