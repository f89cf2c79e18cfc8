//! Database client for the performance store.
//!
//! Connects from discrete parameters (host, port, database, user,
//! password) and exposes a fail-fast connectivity probe. Connection
//! failures are surfaced immediately; there are no retries.

use anyhow::{Context, Result};
use dca_perf_core::DatabaseConfig;
use sqlx::{postgres::PgPoolOptions, PgPool};

#[derive(Debug, Clone)]
pub struct DatabaseClient {
    pool: PgPool,
}

impl DatabaseClient {
    /// Connects to the PostgreSQL performance store.
    ///
    /// # Errors
    /// Returns an error if the store is unreachable or the credentials
    /// are rejected.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url())
            .await
            .with_context(|| {
                format!(
                    "failed to connect to {}:{}/{}",
                    config.host, config.port, config.database
                )
            })?;

        tracing::info!(
            host = %config.host,
            port = config.port,
            database = %config.database,
            "connected to performance store"
        );

        Ok(Self { pool })
    }

    /// Connectivity probe. Fails fast if the store is unreachable.
    ///
    /// # Errors
    /// Returns an error if the probe query cannot be executed.
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .context("connectivity probe failed")?;
        Ok(())
    }

    /// Returns a clone of the underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> PgPool {
        self.pool.clone()
    }
}
