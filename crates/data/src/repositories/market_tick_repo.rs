//! Market tick repository.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::MarketTickRecord;

/// Repository for raw market tick data.
#[derive(Debug, Clone)]
pub struct MarketTickRepository {
    pool: PgPool,
}

impl MarketTickRepository {
    /// Creates a new repository instance.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetches all ticks, oldest first.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn fetch_all(&self) -> Result<Vec<MarketTickRecord>> {
        let records = sqlx::query_as::<_, MarketTickRecord>(
            r#"
            SELECT timestamp, exchange, trading_pair, mid_price, best_bid, best_ask
            FROM market_data
            ORDER BY timestamp ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Fetches all ticks for one trading pair, oldest first.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn fetch_by_pair(&self, trading_pair: &str) -> Result<Vec<MarketTickRecord>> {
        let records = sqlx::query_as::<_, MarketTickRecord>(
            r#"
            SELECT timestamp, exchange, trading_pair, mid_price, best_bid, best_ask
            FROM market_data
            WHERE trading_pair = $1
            ORDER BY timestamp ASC
            "#,
        )
        .bind(trading_pair)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Lists the distinct trading pairs present in the tick data.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn distinct_pairs(&self) -> Result<Vec<String>> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT DISTINCT trading_pair FROM market_data ORDER BY trading_pair")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(|(pair,)| pair).collect())
    }

    /// Returns the total number of tick records.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM market_data")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Returns the earliest and latest tick timestamps, or `None` when empty.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn time_range(&self) -> Result<Option<(DateTime<Utc>, DateTime<Utc>)>> {
        let row: (Option<DateTime<Utc>>, Option<DateTime<Utc>>) =
            sqlx::query_as("SELECT MIN(timestamp), MAX(timestamp) FROM market_data")
                .fetch_one(&self.pool)
                .await?;

        Ok(match row {
            (Some(earliest), Some(latest)) => Some((earliest, latest)),
            _ => None,
        })
    }
}
