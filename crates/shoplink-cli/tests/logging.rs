//! Integration tests for the logging module.

use std::fs;

use shoplink_cli::logging::{LogConfig, LogFormat, init_logging};
use tracing::level_filters::LevelFilter;

// Only one global subscriber can be installed per process, so this file holds
// a single test.
#[test]
fn test_json_logs_append_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shoplink.log");
    fs::write(&path, "existing line\n").unwrap();

    let config = LogConfig::default()
        .with_level_filter(LevelFilter::INFO)
        .with_env_filter(false)
        .with_ansi(false)
        .with_format(LogFormat::Json)
        .with_log_file(Some(path.clone()));
    init_logging(&config).unwrap();

    tracing::warn!(order_id = "ORD7", "duplicate found");
    tracing::trace!("filtered out");

    let contents = fs::read_to_string(&path).unwrap();
    let mut lines = contents.lines();
    assert_eq!(lines.next(), Some("existing line"));
    let event: serde_json::Value = serde_json::from_str(lines.next().unwrap()).unwrap();
    assert_eq!(event["level"], "WARN");
    assert_eq!(event["fields"]["message"], "duplicate found");
    assert_eq!(event["fields"]["order_id"], "ORD7");
    assert!(lines.next().is_none());
}
