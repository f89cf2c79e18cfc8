//! Market tick data model.
//!
//! Raw per-tick mid-price snapshots recorded by the trading system.
//! The analytics crate resamples these into fixed-interval OHLC candles.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single mid-price snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MarketTickRecord {
    /// Snapshot timestamp
    pub timestamp: DateTime<Utc>,
    /// Exchange name
    pub exchange: String,
    /// Trading pair (e.g., "BTC-USDT")
    pub trading_pair: String,
    /// Mid price between best bid and best ask
    pub mid_price: Decimal,
    /// Best bid at snapshot time
    pub best_bid: Decimal,
    /// Best ask at snapshot time
    pub best_ask: Decimal,
}

impl MarketTickRecord {
    /// Bid/ask spread at snapshot time.
    #[must_use]
    pub fn spread(&self) -> Decimal {
        self.best_ask - self.best_bid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn test_spread() {
        let tick = MarketTickRecord {
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
            exchange: "binance".to_string(),
            trading_pair: "BTC-USDT".to_string(),
            mid_price: dec!(50000.5),
            best_bid: dec!(50000),
            best_ask: dec!(50001),
        };
        assert_eq!(tick.spread(), dec!(1));
    }
}
