//! pmviz - Main entry point

use anyhow::Context;
use clap::Parser;
use pmviz_common::logging::{init_logging, LogConfig, LogLevel};
use pmviz_convert::{pipeline, Cli, ConvertConfig};
use std::process;
use tracing::error;

fn main() {
    // Pick up PMVIZ_* and LOG_* from a local .env file, if any
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let log_config = LogConfig::builder()
        .level(if cli.verbose {
            LogLevel::Debug
        } else {
            LogLevel::Info
        })
        .log_file_prefix("pmviz")
        .build();

    // Environment variables take precedence
    let log_config = log_config.clone().merge_env().unwrap_or(log_config);

    // The converter still works without logging
    let _guard = init_logging(&log_config).ok().flatten();

    if let Err(e) = run(&cli) {
        error!(error = %format!("{:#}", e), "Conversion failed");
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.apply(ConvertConfig::from_env().context("Invalid PMVIZ_* environment")?);
    let summary = pipeline::run(&config)
        .with_context(|| format!("Converting tables under {}", config.base_path.display()))?;

    println!(
        "{} of {} proteins written to {}",
        summary.documents_written,
        summary.proteins,
        config.output_path().display()
    );
    Ok(())
}
