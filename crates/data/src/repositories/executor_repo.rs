//! Executor record repository.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::ExecutorRecord;

/// Repository for DCA executor records.
#[derive(Debug, Clone)]
pub struct ExecutorRepository {
    pool: PgPool,
}

impl ExecutorRepository {
    /// Creates a new repository instance.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetches all executor records, oldest first.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn fetch_all(&self) -> Result<Vec<ExecutorRecord>> {
        let records = sqlx::query_as::<_, ExecutorRecord>(
            r#"
            SELECT id, instance, db_name, controller_id, exchange, trading_pair, side,
                   datetime, close_datetime, net_pnl_quote, filled_amount_quote,
                   close_type, level_id, config, custom_info
            FROM executors
            ORDER BY datetime ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Returns the total number of executor records.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM executors")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Returns the earliest and latest open timestamps, or `None` when empty.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn time_range(&self) -> Result<Option<(DateTime<Utc>, DateTime<Utc>)>> {
        let row: (Option<DateTime<Utc>>, Option<DateTime<Utc>>) =
            sqlx::query_as("SELECT MIN(datetime), MAX(datetime) FROM executors")
                .fetch_one(&self.pool)
                .await?;

        Ok(match row {
            (Some(earliest), Some(latest)) => Some((earliest, latest)),
            _ => None,
        })
    }
}
