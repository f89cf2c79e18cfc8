//! Trade fill data model.
//!
//! Individual fills as reported by the trading system. Read for the
//! tables/CSV-export surface only; performance stats come from executors.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single trade fill.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TradeFillRecord {
    /// Fill timestamp
    pub timestamp: DateTime<Utc>,
    /// Strategy that placed the order
    pub strategy: String,
    /// Exchange name
    pub exchange: String,
    /// Trading pair
    pub trading_pair: String,
    /// BUY or SELL
    pub trade_type: String,
    /// Fill price
    pub price: Decimal,
    /// Fill amount in base currency
    pub amount: Decimal,
}
