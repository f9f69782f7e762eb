//! CLI argument definitions for `shoplink`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "shoplink",
    version,
    about = "ShopLink order cleaner - validate, repair and deduplicate order exports",
    long_about = "Validate, normalize and deduplicate ShopLink order exports.\n\n\
                  Reads CSV or JSON order files, rejects malformed records, derives a\n\
                  missing quantity, price or total, and collapses repeated orders."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Clean an order export and print a summary.
    Clean(CleanArgs),

    /// List the order fields usable in --unique-fields.
    Fields,
}

#[derive(Parser)]
pub struct CleanArgs {
    /// Order export to read (.csv or .json).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Input format, csv or json (default: inferred from the file extension).
    #[arg(long = "format", value_name = "FORMAT")]
    pub format: Option<String>,

    /// JSON file with pipeline options; flags below override its values.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Smallest accepted quantity.
    #[arg(long = "min-quantity", value_name = "N")]
    pub min_quantity: Option<f64>,

    /// Smallest accepted unit price.
    #[arg(long = "min-price", value_name = "N")]
    pub min_price: Option<f64>,

    /// Smallest accepted order total.
    #[arg(long = "min-total", value_name = "N")]
    pub min_total: Option<f64>,

    /// Comma-separated fields forming the deduplication key.
    #[arg(long = "unique-fields", value_name = "FIELDS", value_delimiter = ',')]
    pub unique_fields: Option<Vec<String>>,

    /// Print the first N cleaned records.
    #[arg(long = "preview", value_name = "N", default_value_t = 0)]
    pub preview: usize,

    /// Level at which rejected records are logged.
    #[arg(long = "log-rejections-at", value_enum, default_value = "debug")]
    pub log_rejections_at: LogLevelArg,

    /// Include raw field values in rejection logs.
    ///
    /// Order exports can contain customer data; values are redacted unless
    /// this flag is given.
    #[arg(long = "log-data")]
    pub log_data: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for Level {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => Level::ERROR,
            LogLevelArg::Warn => Level::WARN,
            LogLevelArg::Info => Level::INFO,
            LogLevelArg::Debug => Level::DEBUG,
            LogLevelArg::Trace => Level::TRACE,
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_clean_flags() {
        let cli = Cli::try_parse_from([
            "shoplink",
            "clean",
            "orders.csv",
            "--unique-fields",
            "order_id,item",
            "--min-price",
            "0.5",
            "--preview",
            "3",
            "--log-rejections-at",
            "warn",
        ])
        .unwrap();
        let Command::Clean(args) = cli.command else {
            panic!("expected clean subcommand");
        };
        assert_eq!(args.input, PathBuf::from("orders.csv"));
        assert_eq!(
            args.unique_fields,
            Some(vec!["order_id".to_string(), "item".to_string()])
        );
        assert_eq!(args.min_price, Some(0.5));
        assert_eq!(args.min_quantity, None);
        assert_eq!(args.preview, 3);
        assert_eq!(Level::from(args.log_rejections_at), Level::WARN);
        assert!(!args.log_data);
        assert!(args.format.is_none());
    }
}
