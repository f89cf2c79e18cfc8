//! Order record repository.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::OrderRecord;

/// Repository for order records.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    /// Creates a new repository instance.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetches all order records, oldest update first.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn fetch_all(&self) -> Result<Vec<OrderRecord>> {
        let records = sqlx::query_as::<_, OrderRecord>(
            r#"
            SELECT client_order_id, last_status, last_update_timestamp,
                   price, amount, position
            FROM orders
            ORDER BY last_update_timestamp ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Returns the total number of order records.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Returns the earliest and latest update timestamps, or `None` when empty.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn time_range(&self) -> Result<Option<(DateTime<Utc>, DateTime<Utc>)>> {
        let row: (Option<DateTime<Utc>>, Option<DateTime<Utc>>) =
            sqlx::query_as("SELECT MIN(last_update_timestamp), MAX(last_update_timestamp) FROM orders")
                .fetch_one(&self.pool)
                .await?;

        Ok(match row {
            (Some(earliest), Some(latest)) => Some((earliest, latest)),
            _ => None,
        })
    }
}
