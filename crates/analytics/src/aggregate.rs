//! Grouped performance aggregation.
//!
//! Every reduction here is an associative fold (sum, count, min, max)
//! over grouping keys; the cumulative series is the one prefix-sum.
//! Empty inputs degrade to zero-valued outputs, never to errors.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use dca_perf_data::models::CloseType;

use crate::levels::{LevelId, LeveledExecutor};

/// One row of the per-deployment overview table.
#[derive(Debug, Clone, Serialize)]
pub struct OverviewRow {
    pub instance: String,
    pub controller_id: String,
    pub exchange: String,
    pub trading_pair: String,
    pub db_name: String,
    pub total_executors: u64,
    pub net_pnl_quote: Decimal,
    /// Earliest open timestamp in the group
    pub start_datetime: DateTime<Utc>,
    /// Latest close timestamp in the group; None when every executor is open
    pub close_datetime: Option<DateTime<Utc>>,
    pub filled_amount_quote: Decimal,
}

impl OverviewRow {
    /// Seconds between the earliest open and the latest close.
    #[must_use]
    pub fn duration_seconds(&self) -> Option<i64> {
        self.close_datetime
            .map(|close| (close - self.start_datetime).num_seconds())
    }
}

/// Groups executors by deployment and reduces each group.
#[must_use]
pub fn overview(executors: &[LeveledExecutor]) -> Vec<OverviewRow> {
    let mut groups: BTreeMap<(String, String, String, String, String), OverviewRow> =
        BTreeMap::new();

    for executor in executors {
        let record = &executor.record;
        let key = (
            record.instance.clone(),
            record.controller_id.clone(),
            record.exchange.clone(),
            record.trading_pair.clone(),
            record.db_name.clone(),
        );

        let row = groups.entry(key).or_insert_with(|| OverviewRow {
            instance: record.instance.clone(),
            controller_id: record.controller_id.clone(),
            exchange: record.exchange.clone(),
            trading_pair: record.trading_pair.clone(),
            db_name: record.db_name.clone(),
            total_executors: 0,
            net_pnl_quote: Decimal::ZERO,
            start_datetime: record.datetime,
            close_datetime: None,
            filled_amount_quote: Decimal::ZERO,
        });

        row.total_executors += 1;
        row.net_pnl_quote += record.net_pnl_quote;
        row.filled_amount_quote += record.filled_amount_quote;
        if record.datetime < row.start_datetime {
            row.start_datetime = record.datetime;
        }
        if let Some(close) = record.close_datetime {
            row.close_datetime = Some(row.close_datetime.map_or(close, |current| current.max(close)));
        }
    }

    groups.into_values().collect()
}

/// Executor count and P&L for one close type.
#[derive(Debug, Clone, Serialize)]
pub struct CloseTypeStat {
    pub close_type: CloseType,
    pub count: u64,
    pub net_pnl_quote: Decimal,
}

/// Counts executors per close reason. Still-open executors (no close
/// type) are excluded.
#[must_use]
pub fn close_type_distribution(executors: &[LeveledExecutor]) -> Vec<CloseTypeStat> {
    let mut groups: BTreeMap<CloseType, (u64, Decimal)> = BTreeMap::new();

    for executor in executors {
        if let Some(close_type) = executor.close_type {
            let entry = groups.entry(close_type).or_insert((0, Decimal::ZERO));
            entry.0 += 1;
            entry.1 += executor.record.net_pnl_quote;
        }
    }

    groups
        .into_iter()
        .map(|(close_type, (count, net_pnl_quote))| CloseTypeStat {
            close_type,
            count,
            net_pnl_quote,
        })
        .collect()
}

/// Count and P&L share of one position side.
#[derive(Debug, Clone, Serialize)]
pub struct SideStat {
    pub count: u64,
    /// Share of all executors, in percent; 0 when there are none
    pub share_pct: Decimal,
    pub net_pnl_quote: Decimal,
}

/// The headline metric row of a render pass.
#[derive(Debug, Clone, Serialize)]
pub struct PerformanceSummary {
    pub net_pnl_quote: Decimal,
    pub total_executors: u64,
    /// Net P&L divided by executor count; 0 when the count is 0
    pub profit_per_executor: Decimal,
    pub total_volume_quote: Decimal,
    /// All five close types, zero-valued entries included
    pub close_types: Vec<CloseTypeStat>,
    pub long: SideStat,
    pub short: SideStat,
}

/// Computes the headline metrics over the filtered executor set.
#[must_use]
pub fn summary(executors: &[LeveledExecutor]) -> PerformanceSummary {
    use dca_perf_data::models::PositionSide;

    let total_executors = executors.len() as u64;
    let net_pnl_quote: Decimal = executors.iter().map(|e| e.record.net_pnl_quote).sum();
    let total_volume_quote: Decimal = executors.iter().map(|e| e.record.filled_amount_quote).sum();

    let profit_per_executor = if total_executors > 0 {
        net_pnl_quote / Decimal::from(total_executors)
    } else {
        Decimal::ZERO
    };

    let by_close_type = close_type_distribution(executors);
    let close_types = CloseType::ALL
        .iter()
        .map(|&close_type| {
            by_close_type
                .iter()
                .find(|stat| stat.close_type == close_type)
                .cloned()
                .unwrap_or(CloseTypeStat {
                    close_type,
                    count: 0,
                    net_pnl_quote: Decimal::ZERO,
                })
        })
        .collect();

    let side_stat = |side: PositionSide| {
        let mut count = 0u64;
        let mut pnl = Decimal::ZERO;
        for executor in executors {
            if executor.side == Some(side) {
                count += 1;
                pnl += executor.record.net_pnl_quote;
            }
        }
        let share_pct = if total_executors > 0 {
            Decimal::from(count * 100) / Decimal::from(total_executors)
        } else {
            Decimal::ZERO
        };
        SideStat {
            count,
            share_pct,
            net_pnl_quote: pnl,
        }
    };

    PerformanceSummary {
        net_pnl_quote,
        total_executors,
        profit_per_executor,
        total_volume_quote,
        close_types,
        long: side_stat(PositionSide::Long),
        short: side_stat(PositionSide::Short),
    }
}

/// Executor count for one ladder rung.
#[derive(Debug, Clone, Serialize)]
pub struct LevelIdCount {
    pub level_id: LevelId,
    pub count: u64,
}

/// Level-id histogram data.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LevelIdDistribution {
    /// Counts in chart order: buy rungs descending, then sell ascending
    pub levels: Vec<LevelIdCount>,
    /// Rows dropped because their level id failed to parse
    pub skipped_rows: usize,
}

/// Counts executors per ladder rung, sorted by the chart order.
#[must_use]
pub fn level_id_distribution(executors: &[LeveledExecutor]) -> LevelIdDistribution {
    let mut groups: BTreeMap<LevelId, u64> = BTreeMap::new();
    let mut skipped_rows = 0;

    for executor in executors {
        match executor.record.level_id.parse::<LevelId>() {
            Ok(level_id) => *groups.entry(level_id).or_insert(0) += 1,
            Err(error) => {
                tracing::warn!(executor_id = %executor.record.id, %error, "skipping row");
                skipped_rows += 1;
            }
        }
    }

    LevelIdDistribution {
        levels: groups
            .into_iter()
            .map(|(level_id, count)| LevelIdCount { level_id, count })
            .collect(),
        skipped_rows,
    }
}

/// Close-type counts and P&L for one exit level, aligned for dual-series
/// charting.
#[derive(Debug, Clone, Serialize)]
pub struct ExitLevelRow {
    pub exit_level: u32,
    /// Executor count per close reason; empty for exit level 0 by
    /// convention (a level-zero executor never closed at a ladder rung)
    pub close_type_counts: BTreeMap<CloseType, u64>,
    /// P&L sum over every executor at this exit level
    pub net_pnl_quote: Decimal,
}

/// Groups executors by exit level, aligning close-type counts and P&L
/// sums on the same axis.
#[must_use]
pub fn exit_level_breakdown(executors: &[LeveledExecutor]) -> Vec<ExitLevelRow> {
    let mut pnl: BTreeMap<u32, Decimal> = BTreeMap::new();
    let mut counts: BTreeMap<u32, BTreeMap<CloseType, u64>> = BTreeMap::new();

    for executor in executors {
        *pnl.entry(executor.exit_level).or_insert(Decimal::ZERO) +=
            executor.record.net_pnl_quote;

        if executor.exit_level == 0 {
            continue;
        }
        if let Some(close_type) = executor.close_type {
            *counts
                .entry(executor.exit_level)
                .or_default()
                .entry(close_type)
                .or_insert(0) += 1;
        }
    }

    pnl.into_iter()
        .map(|(exit_level, net_pnl_quote)| ExitLevelRow {
            exit_level,
            close_type_counts: counts.remove(&exit_level).unwrap_or_default(),
            net_pnl_quote,
        })
        .collect()
}

/// One point of the realized cumulative series.
#[derive(Debug, Clone, Serialize)]
pub struct CumulativePoint {
    /// Open timestamp of the executor
    pub datetime: DateTime<Utc>,
    /// Close timestamp of the executor
    pub close_datetime: DateTime<Utc>,
    pub net_pnl_quote: Decimal,
    pub filled_amount_quote: Decimal,
    /// Running P&L total up to and including this point
    pub cum_net_pnl_quote: Decimal,
    /// Running filled-amount total up to and including this point
    pub cum_filled_amount_quote: Decimal,
}

/// Builds the realized P&L / volume running totals.
///
/// Only closed executors enter the series; rows sort ascending by close
/// time before the prefix sums.
#[must_use]
pub fn cumulative_series(executors: &[LeveledExecutor]) -> Vec<CumulativePoint> {
    let mut closed: Vec<&LeveledExecutor> = executors
        .iter()
        .filter(|e| e.record.close_datetime.is_some())
        .collect();
    closed.sort_by_key(|e| e.record.close_datetime);

    let mut cum_pnl = Decimal::ZERO;
    let mut cum_filled = Decimal::ZERO;

    closed
        .into_iter()
        .filter_map(|executor| {
            let close_datetime = executor.record.close_datetime?;
            cum_pnl += executor.record.net_pnl_quote;
            cum_filled += executor.record.filled_amount_quote;
            Some(CumulativePoint {
                datetime: executor.record.datetime,
                close_datetime,
                net_pnl_quote: executor.record.net_pnl_quote,
                filled_amount_quote: executor.record.filled_amount_quote,
                cum_net_pnl_quote: cum_pnl,
                cum_filled_amount_quote: cum_filled,
            })
        })
        .collect()
}

/// Restricts a cumulative series to executors whose lifetime fits inside
/// a candle-page window. Running totals are not recomputed; the series
/// keeps its global reference frame, exactly as the overlay charts expect.
#[must_use]
pub fn window_series(
    series: &[CumulativePoint],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<CumulativePoint> {
    series
        .iter()
        .filter(|point| point.datetime >= start && point.close_datetime <= end)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use dca_perf_data::models::{ExecutorRecord, PositionSide};
    use rust_decimal_macros::dec;

    struct ExecutorFixture {
        id: &'static str,
        exchange: &'static str,
        side: i16,
        pnl: Decimal,
        filled: Decimal,
        close_type: Option<CloseType>,
        level_id: &'static str,
        exit_level: u32,
        close_hour: Option<u32>,
    }

    impl Default for ExecutorFixture {
        fn default() -> Self {
            Self {
                id: "exec",
                exchange: "binance",
                side: 1,
                pnl: dec!(1),
                filled: dec!(10),
                close_type: Some(CloseType::TakeProfit),
                level_id: "buy_1",
                exit_level: 0,
                close_hour: Some(6),
            }
        }
    }

    fn executor(fixture: ExecutorFixture) -> LeveledExecutor {
        LeveledExecutor {
            record: ExecutorRecord {
                id: fixture.id.to_string(),
                instance: "bot-1".to_string(),
                db_name: "bots_db".to_string(),
                controller_id: "dca_v1".to_string(),
                exchange: fixture.exchange.to_string(),
                trading_pair: "BTC-USDT".to_string(),
                side: fixture.side,
                datetime: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
                close_datetime: fixture
                    .close_hour
                    .map(|h| Utc.with_ymd_and_hms(2024, 3, 1, h, 0, 0).unwrap()),
                net_pnl_quote: fixture.pnl,
                filled_amount_quote: fixture.filled,
                close_type: fixture.close_type.map(|ct| ct.as_str().to_string()),
                level_id: fixture.level_id.to_string(),
                config: r#"{"prices": [100]}"#.to_string(),
                custom_info: r#"{"order_ids": []}"#.to_string(),
            },
            close_type: fixture.close_type,
            side: PositionSide::from_code(fixture.side),
            exit_level: fixture.exit_level,
            total_levels: 1,
        }
    }

    #[test]
    fn test_overview_groups_by_deployment() {
        let executors = vec![
            executor(ExecutorFixture {
                id: "a",
                pnl: dec!(2),
                ..ExecutorFixture::default()
            }),
            executor(ExecutorFixture {
                id: "b",
                pnl: dec!(3),
                ..ExecutorFixture::default()
            }),
            executor(ExecutorFixture {
                id: "c",
                exchange: "kucoin",
                pnl: dec!(5),
                ..ExecutorFixture::default()
            }),
        ];

        let rows = overview(&executors);

        assert_eq!(rows.len(), 2);
        let binance = rows.iter().find(|r| r.exchange == "binance").unwrap();
        assert_eq!(binance.total_executors, 2);
        assert_eq!(binance.net_pnl_quote, dec!(5));
        assert_eq!(binance.filled_amount_quote, dec!(20));

        // Associativity: per-group sums add up to the flat total
        let total: Decimal = rows.iter().map(|r| r.net_pnl_quote).sum();
        let flat: Decimal = executors.iter().map(|e| e.record.net_pnl_quote).sum();
        assert_eq!(total, flat);
    }

    #[test]
    fn test_overview_time_bounds() {
        let mut early = executor(ExecutorFixture {
            id: "early",
            ..ExecutorFixture::default()
        });
        early.record.datetime = Utc.with_ymd_and_hms(2024, 2, 28, 0, 0, 0).unwrap();
        let late = executor(ExecutorFixture {
            id: "late",
            close_hour: Some(23),
            ..ExecutorFixture::default()
        });

        let rows = overview(&[early, late]);

        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0].start_datetime,
            Utc.with_ymd_and_hms(2024, 2, 28, 0, 0, 0).unwrap()
        );
        assert_eq!(
            rows[0].close_datetime,
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 23, 0, 0).unwrap())
        );
        assert_eq!(rows[0].duration_seconds(), Some(2 * 86_400 + 23 * 3_600));
    }

    #[test]
    fn test_summary_empty_set_degrades_to_zero() {
        let result = summary(&[]);

        assert_eq!(result.total_executors, 0);
        assert_eq!(result.net_pnl_quote, Decimal::ZERO);
        assert_eq!(result.profit_per_executor, Decimal::ZERO);
        assert_eq!(result.total_volume_quote, Decimal::ZERO);
        assert_eq!(result.close_types.len(), 5);
        assert!(result.close_types.iter().all(|s| s.count == 0));
        assert_eq!(result.long.share_pct, Decimal::ZERO);
        assert_eq!(result.short.share_pct, Decimal::ZERO);
    }

    #[test]
    fn test_summary_metrics() {
        let executors = vec![
            executor(ExecutorFixture {
                id: "a",
                side: 1,
                pnl: dec!(4),
                close_type: Some(CloseType::TakeProfit),
                ..ExecutorFixture::default()
            }),
            executor(ExecutorFixture {
                id: "b",
                side: 2,
                pnl: dec!(-1),
                close_type: Some(CloseType::StopLoss),
                ..ExecutorFixture::default()
            }),
        ];

        let result = summary(&executors);

        assert_eq!(result.total_executors, 2);
        assert_eq!(result.net_pnl_quote, dec!(3));
        assert_eq!(result.profit_per_executor, dec!(1.5));
        assert_eq!(result.long.count, 1);
        assert_eq!(result.long.share_pct, dec!(50));
        assert_eq!(result.long.net_pnl_quote, dec!(4));
        assert_eq!(result.short.count, 1);
        assert_eq!(result.short.net_pnl_quote, dec!(-1));

        let take_profit = result
            .close_types
            .iter()
            .find(|s| s.close_type == CloseType::TakeProfit)
            .unwrap();
        assert_eq!(take_profit.count, 1);
        assert_eq!(take_profit.net_pnl_quote, dec!(4));
    }

    #[test]
    fn test_close_type_distribution_excludes_open_executors() {
        let executors = vec![
            executor(ExecutorFixture {
                id: "closed",
                ..ExecutorFixture::default()
            }),
            executor(ExecutorFixture {
                id: "open",
                close_type: None,
                close_hour: None,
                ..ExecutorFixture::default()
            }),
        ];

        let stats = close_type_distribution(&executors);

        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].count, 1);
    }

    #[test]
    fn test_level_id_distribution_sorted_and_skips_bad_ids() {
        let executors = vec![
            executor(ExecutorFixture {
                id: "a",
                level_id: "sell_2",
                ..ExecutorFixture::default()
            }),
            executor(ExecutorFixture {
                id: "b",
                level_id: "buy_1",
                ..ExecutorFixture::default()
            }),
            executor(ExecutorFixture {
                id: "c",
                level_id: "buy_3",
                ..ExecutorFixture::default()
            }),
            executor(ExecutorFixture {
                id: "d",
                level_id: "buy_1",
                ..ExecutorFixture::default()
            }),
            executor(ExecutorFixture {
                id: "e",
                level_id: "oops",
                ..ExecutorFixture::default()
            }),
        ];

        let distribution = level_id_distribution(&executors);

        assert_eq!(distribution.skipped_rows, 1);
        let order: Vec<String> = distribution
            .levels
            .iter()
            .map(|l| l.level_id.to_string())
            .collect();
        assert_eq!(order, vec!["buy_3", "buy_1", "sell_2"]);
        assert_eq!(distribution.levels[1].count, 2);
    }

    #[test]
    fn test_exit_level_breakdown_excludes_level_zero_counts() {
        let executors = vec![
            executor(ExecutorFixture {
                id: "a",
                exit_level: 0,
                pnl: dec!(1),
                ..ExecutorFixture::default()
            }),
            executor(ExecutorFixture {
                id: "b",
                exit_level: 2,
                pnl: dec!(2),
                close_type: Some(CloseType::StopLoss),
                ..ExecutorFixture::default()
            }),
            executor(ExecutorFixture {
                id: "c",
                exit_level: 2,
                pnl: dec!(3),
                close_type: Some(CloseType::TakeProfit),
                ..ExecutorFixture::default()
            }),
        ];

        let rows = exit_level_breakdown(&executors);

        assert_eq!(rows.len(), 2);

        let level_zero = &rows[0];
        assert_eq!(level_zero.exit_level, 0);
        assert!(level_zero.close_type_counts.is_empty());
        assert_eq!(level_zero.net_pnl_quote, dec!(1));

        let level_two = &rows[1];
        assert_eq!(level_two.exit_level, 2);
        assert_eq!(level_two.close_type_counts.len(), 2);
        assert_eq!(level_two.close_type_counts[&CloseType::StopLoss], 1);
        assert_eq!(level_two.net_pnl_quote, dec!(5));
    }

    #[test]
    fn test_cumulative_series_prefix_sums() {
        let executors = vec![
            executor(ExecutorFixture {
                id: "later",
                pnl: dec!(2),
                filled: dec!(20),
                close_hour: Some(12),
                ..ExecutorFixture::default()
            }),
            executor(ExecutorFixture {
                id: "earlier",
                pnl: dec!(1),
                filled: dec!(10),
                close_hour: Some(6),
                ..ExecutorFixture::default()
            }),
            executor(ExecutorFixture {
                id: "open",
                close_type: None,
                close_hour: None,
                ..ExecutorFixture::default()
            }),
        ];

        let series = cumulative_series(&executors);

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].cum_net_pnl_quote, dec!(1));
        assert_eq!(series[1].cum_net_pnl_quote, dec!(3));
        assert_eq!(series[1].cum_filled_amount_quote, dec!(30));
        assert!(series[0].close_datetime < series[1].close_datetime);
    }

    #[test]
    fn test_window_series_keeps_global_running_totals() {
        let executors = vec![
            executor(ExecutorFixture {
                id: "a",
                pnl: dec!(1),
                close_hour: Some(1),
                ..ExecutorFixture::default()
            }),
            executor(ExecutorFixture {
                id: "b",
                pnl: dec!(2),
                close_hour: Some(2),
                ..ExecutorFixture::default()
            }),
        ];

        let series = cumulative_series(&executors);
        let windowed = window_series(
            &series,
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 1, 23, 0, 0).unwrap(),
        );

        assert_eq!(windowed.len(), 2);
        // Totals carry the global frame, not a per-window restart
        assert_eq!(windowed[1].cum_net_pnl_quote, dec!(3));

        let narrow = window_series(
            &series,
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 1, 1, 30, 0).unwrap(),
        );
        assert_eq!(narrow.len(), 1);
        assert_eq!(narrow[0].cum_net_pnl_quote, dec!(1));
    }
}
