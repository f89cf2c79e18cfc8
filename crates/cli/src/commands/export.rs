//! CSV export CLI command.
//!
//! Writes the four raw record sets to CSV files.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use dca_perf_data::CsvStorage;

/// Arguments for the export command.
#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Config file path
    #[arg(short, long, default_value = "config/Config.toml")]
    pub config: String,

    /// Directory the CSV files are written into
    #[arg(short, long, default_value = "export")]
    pub output_dir: PathBuf,
}

/// Runs the export command.
///
/// # Errors
/// Returns an error if the database connection, a fetch, or a file
/// write fails.
pub async fn run_export(args: ExportArgs) -> Result<()> {
    let (_config, repositories) = super::connect(&args.config).await?;

    std::fs::create_dir_all(&args.output_dir).with_context(|| {
        format!("failed to create output directory: {}", args.output_dir.display())
    })?;

    let executors = repositories.executors.fetch_all().await?;
    CsvStorage::write_executors(&args.output_dir.join("executors.csv"), &executors)?;
    tracing::info!(rows = executors.len(), "exported executors.csv");

    let orders = repositories.orders.fetch_all().await?;
    CsvStorage::write_orders(&args.output_dir.join("orders.csv"), &orders)?;
    tracing::info!(rows = orders.len(), "exported orders.csv");

    let ticks = repositories.market_ticks.fetch_all().await?;
    CsvStorage::write_market_ticks(&args.output_dir.join("market_data.csv"), &ticks)?;
    tracing::info!(rows = ticks.len(), "exported market_data.csv");

    let fills = repositories.trade_fills.fetch_all().await?;
    CsvStorage::write_trade_fills(&args.output_dir.join("trade_fill.csv"), &fills)?;
    tracing::info!(rows = fills.len(), "exported trade_fill.csv");

    println!(
        "Exported {} executors, {} orders, {} ticks, {} fills to {}",
        executors.len(),
        orders.len(),
        ticks.len(),
        fills.len(),
        args.output_dir.display()
    );

    Ok(())
}
