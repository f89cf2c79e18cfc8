use clap::{Parser, Subcommand};

mod commands;

use commands::{CandlesArgs, ExportArgs, ReportArgs, StatusArgs};

#[derive(Parser)]
#[command(name = "dca-perf")]
#[command(about = "Performance analyzer for DCA trading executors", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the performance report for the selected executors
    Report(ReportArgs),
    /// Print one page of resampled candles with realized P&L overlays
    Candles(CandlesArgs),
    /// Export the raw record sets as CSV files
    Export(ExportArgs),
    /// Show record counts and date ranges per table
    Status(StatusArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match cli.command {
        Commands::Report(args) => commands::run_report(args).await?,
        Commands::Candles(args) => commands::run_candles(args).await?,
        Commands::Export(args) => commands::run_export(args).await?,
        Commands::Status(args) => commands::run_status(args).await?,
    }

    Ok(())
}
