use anyhow::{Context, Result, bail};
use audit_core::AuditConfig;
use audit_loader::{ConfigFormat, render_config};
use std::fs;
use tracing::info;

use crate::output;

pub fn execute(output_path: Option<&str>, format: &str) -> Result<()> {
    let format = match format {
        "yaml" | "yml" => ConfigFormat::Yaml,
        "toml" => ConfigFormat::Toml,
        other => bail!("Unsupported configuration format: {other} (expected yaml or toml)"),
    };

    info!("Rendering default configuration as {:?}", format);
    let rendered = render_config(&AuditConfig::default(), format)
        .context("Failed to render default configuration")?;

    match output_path {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("Failed to write configuration file: {path}"))?;
            output::print_success(&format!("Configuration written to {path}"));
        }
        None => print!("{rendered}"),
    }

    Ok(())
}
