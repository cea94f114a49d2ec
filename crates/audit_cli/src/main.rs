mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "dqa")]
#[command(version, about = "Sprint backlog data quality audit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (shows debug findings)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit a delimited data file
    Validate {
        /// Path to the data file (CSV)
        data: String,

        /// Field delimiter
        #[arg(short, long, default_value = ",")]
        delimiter: char,

        /// Rule configuration file (YAML or TOML); defaults to the sprint backlog rules
        #[arg(short, long)]
        config: Option<String>,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Check a rule configuration file without auditing data
    Check {
        /// Path to the configuration file (YAML or TOML)
        config: String,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Write the default sprint backlog configuration
    Init {
        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Configuration format: yaml, toml
        #[arg(short, long, default_value = "yaml")]
        format: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; RUST_LOG overrides the level
    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_ansi(std::io::stderr().is_terminal())
                .with_writer(std::io::stderr)
                .compact(),
        )
        .with(filter)
        .init();

    match cli.command {
        Commands::Validate {
            data,
            delimiter,
            config,
            format,
        } => commands::validate::execute(&data, delimiter, config.as_deref(), &format),

        Commands::Check { config, format } => commands::check::execute(&config, &format),

        Commands::Init { output, format } => commands::init::execute(output.as_deref(), &format),
    }
}
