use anyhow::{Context, Result};
use audit_loader::parse_config_file;
use std::path::Path;
use tracing::info;

use crate::output;

pub fn execute(config_path: &str, format: &str) -> Result<()> {
    info!("Checking configuration: {}", config_path);

    let config = parse_config_file(Path::new(config_path))
        .with_context(|| format!("Failed to load configuration file: {config_path}"))?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    output::print_success("Configuration is valid");

    println!("\nConfiguration Summary:");
    println!("  Primary key:      {}", config.primary_key);
    println!("  Expected columns: {}", config.expected_schema.len());
    for spec in &config.expected_schema {
        println!("    - {} ({})", spec.name, spec.expected);
    }

    if !config.allowed_values.is_empty() {
        println!("\nAllowed Values:");
        for constraint in &config.allowed_values {
            let scored = if constraint.scored { ", scored" } else { "" };
            println!(
                "  {}: {} values{}",
                constraint.column,
                constraint.values.len(),
                scored
            );
        }
    }

    match &config.numeric_bound {
        Some(bound) => println!(
            "\nRange:\n  {}: [{}, {}]",
            bound.column, bound.min, bound.max
        ),
        None => output::print_info("No numeric range configured"),
    }

    Ok(())
}
