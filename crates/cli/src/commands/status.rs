//! Data status CLI command.
//!
//! Shows record counts and date ranges for the four record sets, to
//! assess data availability before running a report.

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Args;

/// Arguments for the status command.
#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    /// Config file path
    #[arg(short, long, default_value = "config/Config.toml")]
    pub config: String,
}

struct TableStatus {
    table_name: &'static str,
    record_count: i64,
    range: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

impl TableStatus {
    fn format_date(dt: Option<DateTime<Utc>>) -> String {
        dt.map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }
}

/// Runs the status command.
///
/// # Errors
/// Returns an error if the database connection or a query fails.
pub async fn run_status(args: StatusArgs) -> Result<()> {
    let (_config, repositories) = super::connect(&args.config).await?;

    let statuses = vec![
        TableStatus {
            table_name: "executors",
            record_count: repositories.executors.count().await?,
            range: repositories.executors.time_range().await?,
        },
        TableStatus {
            table_name: "orders",
            record_count: repositories.orders.count().await?,
            range: repositories.orders.time_range().await?,
        },
        TableStatus {
            table_name: "market_data",
            record_count: repositories.market_ticks.count().await?,
            range: repositories.market_ticks.time_range().await?,
        },
        TableStatus {
            table_name: "trade_fill",
            record_count: repositories.trade_fills.count().await?,
            range: repositories.trade_fills.time_range().await?,
        },
    ];

    println!();
    println!("{}", "=".repeat(90));
    println!("DATA STATUS REPORT");
    println!("{}", "=".repeat(90));
    println!(
        "{:<20} {:>12} {:>24} {:>24}",
        "Table", "Records", "Earliest", "Latest"
    );
    println!("{}", "-".repeat(90));

    for status in &statuses {
        println!(
            "{:<20} {:>12} {:>24} {:>24}",
            status.table_name,
            status.record_count,
            TableStatus::format_date(status.range.map(|r| r.0)),
            TableStatus::format_date(status.range.map(|r| r.1))
        );
    }

    println!("{}", "=".repeat(90));
    println!();

    let pairs = repositories.market_ticks.distinct_pairs().await?;
    if !pairs.is_empty() {
        println!("Trading pairs with tick data: {}", pairs.join(", "));
        println!();
    }

    Ok(())
}
