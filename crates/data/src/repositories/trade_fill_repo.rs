//! Trade fill repository.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::TradeFillRecord;

/// Repository for trade fill records.
#[derive(Debug, Clone)]
pub struct TradeFillRepository {
    pool: PgPool,
}

impl TradeFillRepository {
    /// Creates a new repository instance.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetches all trade fills, oldest first.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn fetch_all(&self) -> Result<Vec<TradeFillRecord>> {
        let records = sqlx::query_as::<_, TradeFillRecord>(
            r#"
            SELECT timestamp, strategy, exchange, trading_pair, trade_type, price, amount
            FROM trade_fill
            ORDER BY timestamp ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Returns the total number of trade fill records.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM trade_fill")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Returns the earliest and latest fill timestamps, or `None` when empty.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn time_range(&self) -> Result<Option<(DateTime<Utc>, DateTime<Utc>)>> {
        let row: (Option<DateTime<Utc>>, Option<DateTime<Utc>>) =
            sqlx::query_as("SELECT MIN(timestamp), MAX(timestamp) FROM trade_fill")
                .fetch_one(&self.pool)
                .await?;

        Ok(match row {
            (Some(earliest), Some(latest)) => Some((earliest, latest)),
            _ => None,
        })
    }
}
