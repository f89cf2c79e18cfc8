//! Data models for the DCA performance analyzer.
//!
//! All models use `rust_decimal::Decimal` for financial precision and
//! derive `sqlx::FromRow` for database compatibility.

pub mod executor;
pub mod market_tick;
pub mod order;
pub mod trade_fill;

pub use executor::{CloseType, ExecutorRecord, PositionSide};
pub use market_tick::MarketTickRecord;
pub use order::{OrderRecord, POSITION_OPEN, STATUS_BUY_COMPLETED, STATUS_SELL_COMPLETED};
pub use trade_fill::TradeFillRecord;
