//! Order data model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Terminal status of a completed buy order.
pub const STATUS_BUY_COMPLETED: &str = "BuyOrderCompleted";
/// Terminal status of a completed sell order.
pub const STATUS_SELL_COMPLETED: &str = "SellOrderCompleted";
/// Position role marking an order that opened a ladder level.
pub const POSITION_OPEN: &str = "OPEN";

/// An order spawned by an executor.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrderRecord {
    /// Client-side order identifier, referenced from executor custom-info
    pub client_order_id: String,
    /// Most recent order status
    pub last_status: String,
    /// Timestamp of the most recent status update
    pub last_update_timestamp: DateTime<Utc>,
    /// Order price
    pub price: Decimal,
    /// Order amount in base currency
    pub amount: Decimal,
    /// Position role (OPEN when the order advanced the DCA ladder)
    pub position: String,
}

impl OrderRecord {
    /// True when the order reached a terminal completed status.
    ///
    /// In-flight and cancelled orders never enter performance stats.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.last_status == STATUS_BUY_COMPLETED || self.last_status == STATUS_SELL_COMPLETED
    }

    /// True when the order opened a position level.
    #[must_use]
    pub fn is_open_position(&self) -> bool {
        self.position == POSITION_OPEN
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn sample_order(status: &str, position: &str) -> OrderRecord {
        OrderRecord {
            client_order_id: "x-1".to_string(),
            last_status: status.to_string(),
            last_update_timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            price: dec!(101.5),
            amount: dec!(0.5),
            position: position.to_string(),
        }
    }

    #[test]
    fn test_completed_statuses() {
        assert!(sample_order(STATUS_BUY_COMPLETED, POSITION_OPEN).is_completed());
        assert!(sample_order(STATUS_SELL_COMPLETED, "CLOSE").is_completed());
    }

    #[test]
    fn test_non_terminal_statuses() {
        assert!(!sample_order("OrderCreated", POSITION_OPEN).is_completed());
        assert!(!sample_order("OrderCancelled", POSITION_OPEN).is_completed());
    }

    #[test]
    fn test_open_position_role() {
        assert!(sample_order(STATUS_BUY_COMPLETED, POSITION_OPEN).is_open_position());
        assert!(!sample_order(STATUS_BUY_COMPLETED, "CLOSE").is_open_position());
    }
}
