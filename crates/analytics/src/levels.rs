//! Ladder level derivation and level-id ordering.
//!
//! `exit_level` counts the reconciled OPEN-position rows of an executor:
//! the ladder rungs it advanced through before closing. `total_levels`
//! is the length of the configured target-price list. Both default to
//! zero rather than erroring; an executor with no reconciled rows is a
//! level-zero executor, not a failure.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use dca_perf_data::models::{CloseType, ExecutorRecord, PositionSide};

use crate::error::{AnalyticsError, Result};
use crate::reconcile::ExecutorOrderRow;

/// Typed view of the executor config blob.
#[derive(Debug, Clone, Deserialize)]
pub struct ExecutorConfig {
    /// Ladder target prices
    pub prices: Vec<Decimal>,
}

impl ExecutorConfig {
    /// Parses the config JSON blob of one executor.
    ///
    /// # Errors
    /// Returns `MalformedConfig` if the blob is not valid JSON or does
    /// not carry a `prices` list.
    pub fn parse(executor_id: &str, blob: &str) -> Result<Self> {
        serde_json::from_str(blob)
            .map_err(|e| AnalyticsError::malformed_config(executor_id, e.to_string()))
    }
}

/// Side of a ladder rung.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LevelSide {
    Buy,
    Sell,
}

impl LevelSide {
    /// Returns the wire string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

/// Parsed ladder rung identifier of the form `{buy|sell}_{n}`.
///
/// The total order is the chart order: buy rungs first in descending
/// numeric order, then sell rungs in ascending numeric order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LevelId {
    pub side: LevelSide,
    pub number: u32,
}

impl LevelId {
    fn sort_key(self) -> (u8, i64) {
        match self.side {
            LevelSide::Buy => (0, -i64::from(self.number)),
            LevelSide::Sell => (1, i64::from(self.number)),
        }
    }
}

impl FromStr for LevelId {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self> {
        let (side, number) = s
            .split_once('_')
            .ok_or_else(|| AnalyticsError::malformed_level_id(s))?;

        let side = match side {
            "buy" => LevelSide::Buy,
            "sell" => LevelSide::Sell,
            _ => return Err(AnalyticsError::malformed_level_id(s)),
        };

        let number = number
            .parse()
            .map_err(|_| AnalyticsError::malformed_level_id(s))?;

        Ok(Self { side, number })
    }
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.side.as_str(), self.number)
    }
}

impl Ord for LevelId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for LevelId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Executor enriched with its derived ladder fields.
#[derive(Debug, Clone, Serialize)]
pub struct LeveledExecutor {
    /// The raw store record
    pub record: ExecutorRecord,
    /// Parsed close reason; None while the executor is still open
    pub close_type: Option<CloseType>,
    /// Decoded position side; None for unknown wire codes
    pub side: Option<PositionSide>,
    /// Ladder rungs advanced through before closing
    pub exit_level: u32,
    /// Configured ladder depth
    pub total_levels: u32,
}

/// Output of the level derivation pass.
#[derive(Debug, Clone, Default)]
pub struct Leveling {
    /// Enriched executors
    pub executors: Vec<LeveledExecutor>,
    /// Executors dropped because their config blob or close type failed to parse
    pub skipped_executors: usize,
}

/// Derives exit levels and configured ladder depth for every executor.
///
/// Walks the full executor collection: executors with no reconciled
/// rows get `exit_level` 0 and stay in the output. A malformed config
/// blob or an unrecognized close-type string skips that executor and
/// increments the skip counter.
#[must_use]
pub fn derive_levels(executors: &[ExecutorRecord], reconciled: &[ExecutorOrderRow]) -> Leveling {
    let mut open_counts: HashMap<&str, u32> = HashMap::new();
    for row in reconciled {
        if row.is_open_position() {
            *open_counts.entry(row.executor_id.as_str()).or_insert(0) += 1;
        }
    }

    let mut leveling = Leveling::default();

    for record in executors {
        let config = match ExecutorConfig::parse(&record.id, &record.config) {
            Ok(config) => config,
            Err(error) => {
                tracing::warn!(executor_id = %record.id, %error, "skipping executor");
                leveling.skipped_executors += 1;
                continue;
            }
        };

        let close_type = match record.close_type.as_deref() {
            None | Some("") => None,
            Some(value) => match CloseType::parse(value) {
                Some(close_type) => Some(close_type),
                None => {
                    let error = AnalyticsError::unknown_close_type(&record.id, value);
                    tracing::warn!(executor_id = %record.id, %error, "skipping executor");
                    leveling.skipped_executors += 1;
                    continue;
                }
            },
        };

        let exit_level = open_counts.get(record.id.as_str()).copied().unwrap_or(0);
        let total_levels = u32::try_from(config.prices.len()).unwrap_or(u32::MAX);

        leveling.executors.push(LeveledExecutor {
            close_type,
            side: record.position_side(),
            exit_level,
            total_levels,
            record: record.clone(),
        });
    }

    leveling
}
