//! Performance analytics for DCA executors.
//!
//! This crate is the reproducible core of the analyzer:
//! - Executor-order reconciliation with skip-and-continue parsing
//! - Exit-level derivation and level-id ordering
//! - Grouped aggregation (overview, close types, level histograms,
//!   exit-level breakdowns, cumulative series)
//! - Candle resampling with bounded pagination
//!
//! Everything is a pure function over already-fetched, immutable record
//! sets; one render cycle is one full re-run.

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod levels;
pub mod reconcile;
pub mod resample;

pub use aggregate::{
    close_type_distribution, cumulative_series, exit_level_breakdown, level_id_distribution,
    overview, summary, window_series, CloseTypeStat, CumulativePoint, ExitLevelRow,
    LevelIdCount, LevelIdDistribution, OverviewRow, PerformanceSummary, SideStat,
};
pub use error::{AnalyticsError, Result};
pub use filter::ExecutorQuery;
pub use levels::{derive_levels, ExecutorConfig, LevelId, LevelSide, LeveledExecutor, Leveling};
pub use reconcile::{reconcile, CustomInfo, ExecutorOrderRow, Reconciliation};
pub use resample::{paginate, resample, resample_for_pair, Candle, CandleInterval, CandlePage};
