//! Executor-order reconciliation.
//!
//! Expands each executor's custom-info order list into (executor, order)
//! pairs, inner-joins them against the order set and keeps only orders
//! that reached a terminal completed status. Orders listed in custom-info
//! but absent from the order set are not yet executed and drop silently;
//! they must not appear in performance stats.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use dca_perf_data::models::{ExecutorRecord, OrderRecord, POSITION_OPEN};

use crate::error::{AnalyticsError, Result};

/// Typed view of the executor custom-info blob.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomInfo {
    /// Order ids spawned by the executor, in placement order
    pub order_ids: Vec<String>,
}

impl CustomInfo {
    /// Parses the custom-info JSON blob of one executor.
    ///
    /// # Errors
    /// Returns `MalformedCustomInfo` if the blob is not valid JSON or
    /// does not carry an `order_ids` list.
    pub fn parse(executor_id: &str, blob: &str) -> Result<Self> {
        serde_json::from_str(blob)
            .map_err(|e| AnalyticsError::malformed_custom_info(executor_id, e.to_string()))
    }
}

/// One reconciled (executor, order) pair.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutorOrderRow {
    pub executor_id: String,
    pub order_id: String,
    pub last_status: String,
    pub last_update_timestamp: DateTime<Utc>,
    pub price: Decimal,
    pub amount: Decimal,
    pub position: String,
}

impl ExecutorOrderRow {
    /// True when the underlying order opened a ladder level.
    #[must_use]
    pub fn is_open_position(&self) -> bool {
        self.position == POSITION_OPEN
    }
}

/// Output of a reconciliation pass.
#[derive(Debug, Clone, Default)]
pub struct Reconciliation {
    /// Surviving (executor, order) rows
    pub rows: Vec<ExecutorOrderRow>,
    /// Executors dropped because their custom-info blob failed to parse
    pub skipped_executors: usize,
}

/// Reconciles executors against the orders they spawned.
///
/// An executor with zero or many listed orders yields zero or many rows.
/// A malformed custom-info blob skips that executor and increments the
/// skip counter; the remaining executors still reconcile.
#[must_use]
pub fn reconcile(executors: &[ExecutorRecord], orders: &[OrderRecord]) -> Reconciliation {
    let orders_by_id: HashMap<&str, &OrderRecord> = orders
        .iter()
        .map(|order| (order.client_order_id.as_str(), order))
        .collect();

    let mut result = Reconciliation::default();

    for executor in executors {
        let info = match CustomInfo::parse(&executor.id, &executor.custom_info) {
            Ok(info) => info,
            Err(error) => {
                tracing::warn!(executor_id = %executor.id, %error, "skipping executor");
                result.skipped_executors += 1;
                continue;
            }
        };

        for order_id in info.order_ids {
            let Some(order) = orders_by_id.get(order_id.as_str()) else {
                // Listed but never executed
                continue;
            };
            if !order.is_completed() {
                continue;
            }
            result.rows.push(ExecutorOrderRow {
                executor_id: executor.id.clone(),
                order_id,
                last_status: order.last_status.clone(),
                last_update_timestamp: order.last_update_timestamp,
                price: order.price,
                amount: order.amount,
                position: order.position.clone(),
            });
        }
    }

    result
}
