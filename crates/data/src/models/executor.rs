//! DCA executor data model.
//!
//! One record per strategy execution instance. The `config` and
//! `custom_info` columns hold JSON blobs written by the trading system;
//! their typed parses live in the analytics crate.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Reason an executor's position was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CloseType {
    TrailingStop,
    TakeProfit,
    StopLoss,
    EarlyStop,
    TimeLimit,
}

impl CloseType {
    /// All close types, in display order.
    pub const ALL: [CloseType; 5] = [
        CloseType::TrailingStop,
        CloseType::TakeProfit,
        CloseType::StopLoss,
        CloseType::EarlyStop,
        CloseType::TimeLimit,
    ];

    /// Parses the upper-snake wire value. Returns `None` for unknown strings.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "TRAILING_STOP" => Some(Self::TrailingStop),
            "TAKE_PROFIT" => Some(Self::TakeProfit),
            "STOP_LOSS" => Some(Self::StopLoss),
            "EARLY_STOP" => Some(Self::EarlyStop),
            "TIME_LIMIT" => Some(Self::TimeLimit),
            _ => None,
        }
    }

    /// Returns the wire string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TrailingStop => "TRAILING_STOP",
            Self::TakeProfit => "TAKE_PROFIT",
            Self::StopLoss => "STOP_LOSS",
            Self::EarlyStop => "EARLY_STOP",
            Self::TimeLimit => "TIME_LIMIT",
        }
    }
}

/// Direction of an executor's position.
///
/// The store encodes sides numerically: 1 = long, 2 = short.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PositionSide {
    Long,
    Short,
}

impl PositionSide {
    /// Decodes the numeric wire value. Returns `None` for unknown codes.
    #[must_use]
    pub const fn from_code(code: i16) -> Option<Self> {
        match code {
            1 => Some(Self::Long),
            2 => Some(Self::Short),
            _ => None,
        }
    }

    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Long => "long",
            Self::Short => "short",
        }
    }
}

/// A DCA executor record.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ExecutorRecord {
    /// Executor identifier
    pub id: String,
    /// Bot instance that ran the executor
    pub instance: String,
    /// Source database the record was loaded from
    pub db_name: String,
    /// Controller that spawned the executor
    pub controller_id: String,
    /// Exchange name (e.g., "binance")
    pub exchange: String,
    /// Trading pair (e.g., "BTC-USDT")
    pub trading_pair: String,
    /// Position side: 1 = long, 2 = short
    pub side: i16,
    /// Open timestamp
    pub datetime: DateTime<Utc>,
    /// Close timestamp; None while the executor is still open
    pub close_datetime: Option<DateTime<Utc>>,
    /// Net realized P&L in quote currency
    pub net_pnl_quote: Decimal,
    /// Filled amount in quote currency
    pub filled_amount_quote: Decimal,
    /// Close reason wire string; None/empty while open
    pub close_type: Option<String>,
    /// Ladder rung identifier, `{buy|sell}_{n}`
    pub level_id: String,
    /// JSON configuration blob holding the ladder price list
    pub config: String,
    /// JSON custom-info blob holding the spawned order ids
    pub custom_info: String,
}

impl ExecutorRecord {
    /// Decoded position side, if the wire code is recognized.
    #[must_use]
    pub fn position_side(&self) -> Option<PositionSide> {
        PositionSide::from_code(self.side)
    }

    /// True once the executor has a close timestamp.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.close_datetime.is_some()
    }
}
