//! Candle view CLI command.
//!
//! Resamples the tick data of one trading pair into fixed-interval OHLC
//! candles, pages the result, and overlays the realized cumulative P&L /
//! volume series windowed to the page time span.

use anyhow::Result;
use clap::Args;

use dca_perf_analytics::{
    cumulative_series, derive_levels, paginate, reconcile, resample, window_series,
    CandleInterval, CandlePage,
};
use dca_perf_core::format_quote;

/// Arguments for the candles command.
#[derive(Args, Debug, Clone)]
pub struct CandlesArgs {
    /// Config file path
    #[arg(short, long, default_value = "config/Config.toml")]
    pub config: String,

    /// Trading pair to resample (e.g., "BTC-USDT")
    #[arg(long)]
    pub trading_pair: String,

    /// Candle interval (1m, 3m, 5m, 15m, 30m, 1h, 6h, 1d); defaults to the configured interval
    #[arg(long)]
    pub interval: Option<String>,

    /// Candles per page; defaults to the configured page size
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Page index; out-of-range values clamp, default is the last page
    #[arg(long)]
    pub page: Option<usize>,
}

/// Runs the candles command.
///
/// # Errors
/// Returns an error if the database connection or a fetch fails, or if
/// the interval or page size is invalid.
pub async fn run_candles(args: CandlesArgs) -> Result<()> {
    let (config, repositories) = super::connect(&args.config).await?;

    let interval: CandleInterval = args
        .interval
        .as_deref()
        .unwrap_or(&config.market_data.default_interval)
        .parse()?;
    let page_size = args.page_size.unwrap_or(config.market_data.candles_per_page);

    let ticks = repositories
        .market_ticks
        .fetch_by_pair(&args.trading_pair)
        .await?;
    let candles = resample(&ticks, interval);

    // Default to the most recent page
    let page = paginate(candles, page_size, args.page.unwrap_or(usize::MAX))?;

    print_candles(&args.trading_pair, interval, &page);
    print_overlays(&repositories, &page).await?;

    Ok(())
}

fn print_candles(trading_pair: &str, interval: CandleInterval, page: &CandlePage) {
    println!();
    println!("{}", "=".repeat(100));
    println!(
        "CANDLES {} {}  (page {} of {})",
        trading_pair,
        interval.as_str(),
        page.page_index,
        page.total_pages
    );
    println!("{}", "=".repeat(100));
    println!(
        "{:<22} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}",
        "Bucket", "Open", "High", "Low", "Close", "Bid", "Ask"
    );
    println!("{}", "-".repeat(100));

    for candle in &page.candles {
        println!(
            "{:<22} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}",
            candle.bucket_start.format("%Y-%m-%d %H:%M:%S"),
            candle.open,
            candle.high,
            candle.low,
            candle.close,
            candle.best_bid,
            candle.best_ask
        );
    }
    println!("{}", "-".repeat(100));
}

async fn print_overlays(
    repositories: &dca_perf_data::Repositories,
    page: &CandlePage,
) -> Result<()> {
    let (Some(start), Some(end)) = (page.start_time, page.end_time) else {
        println!("No executor overlay: empty page");
        println!();
        return Ok(());
    };

    let executors = repositories.executors.fetch_all().await?;
    let orders = repositories.orders.fetch_all().await?;

    let reconciliation = reconcile(&executors, &orders);
    let leveling = derive_levels(&executors, &reconciliation.rows);

    let series = cumulative_series(&leveling.executors);
    let windowed = window_series(&series, start, end);

    match windowed.last() {
        Some(last) => {
            println!(
                "Executors on page: {}   Cum Realized PnL: {}   Cum Volume: {}",
                windowed.len(),
                format_quote(last.cum_net_pnl_quote),
                format_quote(last.cum_filled_amount_quote)
            );
        }
        None => println!("No executors closed within this page"),
    }
    println!();

    Ok(())
}
