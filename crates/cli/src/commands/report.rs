//! Performance report CLI command.
//!
//! Runs one full render cycle: fetch executors and orders, reconcile,
//! derive levels, filter, aggregate, print.

use anyhow::Result;
use clap::Args;

use dca_perf_analytics::{
    close_type_distribution, cumulative_series, derive_levels, exit_level_breakdown,
    level_id_distribution, overview, reconcile, summary, ExecutorQuery, ExitLevelRow,
    OverviewRow, PerformanceSummary,
};
use dca_perf_core::{format_duration, format_quote};

/// Arguments for the report command.
#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Config file path
    #[arg(short, long, default_value = "config/Config.toml")]
    pub config: String,

    /// Restrict to these source databases (repeatable)
    #[arg(long = "db-name")]
    pub db_names: Vec<String>,

    /// Restrict to these bot instances (repeatable)
    #[arg(long = "instance")]
    pub instances: Vec<String>,

    /// Restrict to these controllers (repeatable)
    #[arg(long = "controller")]
    pub controller_ids: Vec<String>,

    /// Restrict to these exchanges (repeatable)
    #[arg(long = "exchange")]
    pub exchanges: Vec<String>,

    /// Restrict to these trading pairs (repeatable)
    #[arg(long = "trading-pair")]
    pub trading_pairs: Vec<String>,
}

/// Runs the report command.
///
/// # Errors
/// Returns an error if the database connection or a fetch fails.
pub async fn run_report(args: ReportArgs) -> Result<()> {
    let (_config, repositories) = super::connect(&args.config).await?;

    let executors = repositories.executors.fetch_all().await?;
    let orders = repositories.orders.fetch_all().await?;

    let reconciliation = reconcile(&executors, &orders);
    let leveling = derive_levels(&executors, &reconciliation.rows);

    let query = ExecutorQuery {
        db_names: args.db_names,
        instances: args.instances,
        controller_ids: args.controller_ids,
        exchanges: args.exchanges,
        trading_pairs: args.trading_pairs,
        ..ExecutorQuery::default()
    };
    let filtered = query.apply(&leveling.executors);

    print_overview(&overview(&filtered));
    print_summary(&summary(&filtered));
    print_close_types(&filtered);
    let level_skips = print_level_distribution(&filtered);
    print_exit_levels(&exit_level_breakdown(&filtered));
    print_realized_pnl(&filtered);

    let skipped =
        reconciliation.skipped_executors + leveling.skipped_executors + level_skips;
    if skipped > 0 {
        println!("{skipped} malformed rows skipped");
        println!();
    }

    Ok(())
}

fn print_overview(rows: &[OverviewRow]) {
    println!();
    println!("{}", "=".repeat(110));
    println!("DCA PERFORMANCE OVERVIEW");
    println!("{}", "=".repeat(110));
    println!(
        "{:<14} {:<12} {:<10} {:<12} {:<12} {:>10} {:>14} {:>14} {:>14}",
        "Instance",
        "Controller",
        "Exchange",
        "Pair",
        "Database",
        "Executors",
        "Volume",
        "Net PnL",
        "Duration"
    );
    println!("{}", "-".repeat(110));

    for row in rows {
        let duration = row
            .duration_seconds()
            .map(format_duration)
            .unwrap_or_else(|| "-".to_string());

        println!(
            "{:<14} {:<12} {:<10} {:<12} {:<12} {:>10} {:>14} {:>14} {:>14}",
            row.instance,
            row.controller_id,
            row.exchange,
            row.trading_pair,
            row.db_name,
            row.total_executors,
            format_quote(row.filled_amount_quote),
            format_quote(row.net_pnl_quote),
            duration
        );
    }
    println!();
}

fn print_summary(summary: &PerformanceSummary) {
    println!("Performance Summary");
    println!("{}", "-".repeat(110));
    println!("Composed PnL:          {}", format_quote(summary.net_pnl_quote));
    println!("Profit per Executor:   {}", format_quote(summary.profit_per_executor));
    println!("Total Executors:       {}", summary.total_executors);
    println!("Total Volume:          {}", format_quote(summary.total_volume_quote));
    for stat in &summary.close_types {
        println!(
            "# {:<20} {:>6}   {}",
            stat.close_type.as_str(),
            stat.count,
            format_quote(stat.net_pnl_quote)
        );
    }
    println!(
        "Long:                  {:>6} ({:.2} %)   {}",
        summary.long.count,
        summary.long.share_pct,
        format_quote(summary.long.net_pnl_quote)
    );
    println!(
        "Short:                 {:>6} ({:.2} %)   {}",
        summary.short.count,
        summary.short.share_pct,
        format_quote(summary.short.net_pnl_quote)
    );
    println!();
}

fn print_close_types(filtered: &[dca_perf_analytics::LeveledExecutor]) {
    let stats = close_type_distribution(filtered);
    if stats.is_empty() {
        return;
    }

    println!("Close Types");
    println!("{}", "-".repeat(110));
    for stat in stats {
        println!(
            "{:<20} {:>6}   {}",
            stat.close_type.as_str(),
            stat.count,
            format_quote(stat.net_pnl_quote)
        );
    }
    println!();
}

fn print_level_distribution(filtered: &[dca_perf_analytics::LeveledExecutor]) -> usize {
    let distribution = level_id_distribution(filtered);
    if distribution.levels.is_empty() {
        return distribution.skipped_rows;
    }

    println!("Level ID Distribution");
    println!("{}", "-".repeat(110));
    for level in &distribution.levels {
        println!("{:<10} {:>6}", level.level_id.to_string(), level.count);
    }
    println!();

    distribution.skipped_rows
}

fn print_exit_levels(rows: &[ExitLevelRow]) {
    if rows.is_empty() {
        return;
    }

    println!("Close Types by Exit Level");
    println!("{}", "-".repeat(110));
    for row in rows {
        let counts: Vec<String> = row
            .close_type_counts
            .iter()
            .map(|(close_type, count)| format!("{}={}", close_type.as_str(), count))
            .collect();
        println!(
            "level {:<3} pnl {:>12}   {}",
            row.exit_level,
            format_quote(row.net_pnl_quote),
            counts.join("  ")
        );
    }
    println!();
}

fn print_realized_pnl(filtered: &[dca_perf_analytics::LeveledExecutor]) {
    let series = cumulative_series(filtered);
    let Some(last) = series.last() else {
        return;
    };

    println!("Realized PnL Over Time");
    println!("{}", "-".repeat(110));
    println!(
        "{} closed executors between {} and {}",
        series.len(),
        series[0].close_datetime.format("%Y-%m-%d %H:%M:%S"),
        last.close_datetime.format("%Y-%m-%d %H:%M:%S")
    );
    println!(
        "Final cumulative PnL: {}   Final cumulative volume: {}",
        format_quote(last.cum_net_pnl_quote),
        format_quote(last.cum_filled_amount_quote)
    );
    println!();
}
