//! CLI commands for the DCA performance analyzer.

pub mod candles;
pub mod export;
pub mod report;
pub mod status;

pub use candles::{run_candles, CandlesArgs};
pub use export::{run_export, ExportArgs};
pub use report::{run_report, ReportArgs};
pub use status::{run_status, StatusArgs};

use anyhow::Result;
use dca_perf_core::{AppConfig, ConfigLoader};
use dca_perf_data::{DatabaseClient, Repositories};

/// Loads configuration, connects, probes, and builds the repositories.
///
/// One connection per command invocation; a failed probe aborts the run
/// immediately.
pub(crate) async fn connect(config_path: &str) -> Result<(AppConfig, Repositories)> {
    let config = ConfigLoader::load_from(config_path)?;
    let client = DatabaseClient::connect(&config.database).await?;
    client.ping().await?;
    let repositories = Repositories::new(client.pool());
    Ok((config, repositories))
}
