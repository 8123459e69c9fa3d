//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `subdomain_status` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use subdomain_status::cli::{Cli, Command, ExportArgs};
use subdomain_status::initialization::init_logger_with;
use subdomain_status::{export_csv, log_status_breakdown, log_summary, run_scan, Config};
use subdomain_status::{LogFormat, ResultStore};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Scan(args) => {
            let config = Config::from(args);
            init_logger_with(config.log_level.clone().into(), config.log_format.clone())
                .context("Failed to initialize logger")?;

            let db_path = config.db_path.clone();
            match run_scan(config).await {
                Ok(summary) => {
                    log_summary(&summary);
                    println!("Results saved in {}", db_path.display());
                    Ok(())
                }
                Err(e) => {
                    eprintln!("subdomain_status error: {:#}", e);
                    process::exit(1);
                }
            }
        }
        Command::Export(args) => {
            init_logger_with(args.log_level.clone().into(), LogFormat::Plain)
                .context("Failed to initialize logger")?;

            if let Err(e) = run_export(&args).await {
                eprintln!("subdomain_status error: {:#}", e);
                process::exit(1);
            }
            Ok(())
        }
    }
}

async fn run_export(args: &ExportArgs) -> Result<()> {
    let filter = args.status_filter();
    let count = export_csv(&args.db_path, args.output.as_deref(), filter.as_deref()).await?;

    match &args.output {
        Some(path) => log::info!("Exported {count} results to {}", path.display()),
        None => log::info!("Exported {count} results"),
    }

    let store = ResultStore::open(&args.db_path, 1)
        .await
        .context("Failed to open database for status breakdown")?;
    let counts = store
        .status_code_counts()
        .await
        .context("Failed to count status codes")?;
    log_status_breakdown(&counts);
    store.pool().close().await;
    Ok(())
}
