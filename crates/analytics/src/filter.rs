//! Immutable query configuration for a render pass.
//!
//! All filter state is carried explicitly in one struct and handed into
//! the pipeline each run; nothing ambient survives between passes. An
//! empty list imposes no constraint.

use chrono::{DateTime, Utc};

use crate::levels::LeveledExecutor;

/// Filter over enriched executors.
#[derive(Debug, Clone, Default)]
pub struct ExecutorQuery {
    pub db_names: Vec<String>,
    pub instances: Vec<String>,
    pub controller_ids: Vec<String>,
    pub exchanges: Vec<String>,
    pub trading_pairs: Vec<String>,
    /// Keep executors opened at or after this instant
    pub opened_after: Option<DateTime<Utc>>,
    /// Keep executors closed at or before this instant
    pub closed_before: Option<DateTime<Utc>>,
}

impl ExecutorQuery {
    /// True when the executor passes every configured constraint.
    #[must_use]
    pub fn matches(&self, executor: &LeveledExecutor) -> bool {
        let record = &executor.record;

        let in_list = |list: &[String], value: &str| list.is_empty() || list.iter().any(|v| v == value);

        if !in_list(&self.db_names, &record.db_name)
            || !in_list(&self.instances, &record.instance)
            || !in_list(&self.controller_ids, &record.controller_id)
            || !in_list(&self.exchanges, &record.exchange)
            || !in_list(&self.trading_pairs, &record.trading_pair)
        {
            return false;
        }

        if let Some(opened_after) = self.opened_after {
            if record.datetime < opened_after {
                return false;
            }
        }

        if let Some(closed_before) = self.closed_before {
            // An executor that never closed cannot satisfy a close bound
            match record.close_datetime {
                Some(closed) if closed <= closed_before => {}
                _ => return false,
            }
        }

        true
    }

    /// Applies the query to a slice of enriched executors.
    #[must_use]
    pub fn apply(&self, executors: &[LeveledExecutor]) -> Vec<LeveledExecutor> {
        executors
            .iter()
            .filter(|executor| self.matches(executor))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use dca_perf_data::models::ExecutorRecord;
    use rust_decimal_macros::dec;

    fn sample(id: &str, exchange: &str, pair: &str) -> LeveledExecutor {
        LeveledExecutor {
            record: ExecutorRecord {
                id: id.to_string(),
                instance: "bot-1".to_string(),
                db_name: "bots_db".to_string(),
                controller_id: "dca_v1".to_string(),
                exchange: exchange.to_string(),
                trading_pair: pair.to_string(),
                side: 1,
                datetime: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
                close_datetime: Some(Utc.with_ymd_and_hms(2024, 3, 1, 6, 0, 0).unwrap()),
                net_pnl_quote: dec!(1),
                filled_amount_quote: dec!(50),
                close_type: Some("TAKE_PROFIT".to_string()),
                level_id: "buy_1".to_string(),
                config: r#"{"prices": [100]}"#.to_string(),
                custom_info: r#"{"order_ids": []}"#.to_string(),
            },
            close_type: None,
            side: None,
            exit_level: 0,
            total_levels: 1,
        }
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let query = ExecutorQuery::default();
        let executors = vec![
            sample("a", "binance", "BTC-USDT"),
            sample("b", "kucoin", "ETH-USDT"),
        ];

        assert_eq!(query.apply(&executors).len(), 2);
    }

    #[test]
    fn test_list_constraints_intersect() {
        let query = ExecutorQuery {
            exchanges: vec!["binance".to_string()],
            trading_pairs: vec!["ETH-USDT".to_string()],
            ..ExecutorQuery::default()
        };
        let executors = vec![
            sample("a", "binance", "BTC-USDT"),
            sample("b", "binance", "ETH-USDT"),
            sample("c", "kucoin", "ETH-USDT"),
        ];

        let filtered = query.apply(&executors);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].record.id, "b");
    }

    #[test]
    fn test_time_bounds() {
        let mut late = sample("late", "binance", "BTC-USDT");
        late.record.datetime = Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap();
        late.record.close_datetime = Some(Utc.with_ymd_and_hms(2024, 3, 2, 6, 0, 0).unwrap());

        let executors = vec![sample("early", "binance", "BTC-USDT"), late];

        let query = ExecutorQuery {
            opened_after: Some(Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap()),
            ..ExecutorQuery::default()
        };
        let filtered = query.apply(&executors);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].record.id, "late");

        let query = ExecutorQuery {
            closed_before: Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()),
            ..ExecutorQuery::default()
        };
        let filtered = query.apply(&executors);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].record.id, "early");
    }

    #[test]
    fn test_open_executor_fails_close_bound() {
        let mut open = sample("open", "binance", "BTC-USDT");
        open.record.close_datetime = None;

        let query = ExecutorQuery {
            closed_before: Some(Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap()),
            ..ExecutorQuery::default()
        };

        assert!(query.apply(&[open]).is_empty());
    }
}
