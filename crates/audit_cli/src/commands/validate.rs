use anyhow::{Context, Result, bail};
use audit_core::AuditConfig;
use audit_loader::parse_config_file;
use audit_validator::{AuditPipeline, DiscardSink, FindingSink, TracingSink};
use std::path::Path;
use tracing::info;

use crate::output;

pub fn execute(
    data_path: &str,
    delimiter: char,
    config_path: Option<&str>,
    format: &str,
) -> Result<()> {
    if !delimiter.is_ascii() {
        bail!("Delimiter must be a single ASCII character, got '{delimiter}'");
    }

    let config = match config_path {
        Some(path) => parse_config_file(Path::new(path))
            .with_context(|| format!("Failed to load configuration file: {path}"))?,
        None => AuditConfig::default(),
    };


    // Findings stream to the log as each stage completes; JSON output stays clean.
    let mut sink: Box<dyn FindingSink> = match format {
        "json" => Box::new(DiscardSink),
        _ => Box::new(TracingSink),
    };

    let pipeline = AuditPipeline::new(config);
    info!(
        primary_key = %pipeline.config().primary_key,
        "Auditing data file: {}",
        data_path
    );
    let report = pipeline
        .run_file(Path::new(data_path), delimiter as u8, sink.as_mut())
        .with_context(|| format!("Failed to load data file: {data_path}"))?;

    output::print_audit_report(&report, format)
}
