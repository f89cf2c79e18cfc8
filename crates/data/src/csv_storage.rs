//! CSV export of the raw record sets.
//!
//! Header row, RFC 3339 timestamps, decimals as plain strings.

use anyhow::{Context, Result};
use csv::Writer;
use std::fs::File;
use std::path::Path;

use crate::models::{ExecutorRecord, MarketTickRecord, OrderRecord, TradeFillRecord};

pub struct CsvStorage;

impl CsvStorage {
    /// Writes executor records to a CSV file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or writing fails.
    pub fn write_executors(path: &Path, records: &[ExecutorRecord]) -> Result<()> {
        let mut writer = Self::create(path)?;

        writer.write_record([
            "id",
            "instance",
            "db_name",
            "controller_id",
            "exchange",
            "trading_pair",
            "side",
            "datetime",
            "close_datetime",
            "net_pnl_quote",
            "filled_amount_quote",
            "close_type",
            "level_id",
        ])?;

        for record in records {
            writer.write_record(&[
                record.id.clone(),
                record.instance.clone(),
                record.db_name.clone(),
                record.controller_id.clone(),
                record.exchange.clone(),
                record.trading_pair.clone(),
                record.side.to_string(),
                record.datetime.to_rfc3339(),
                record
                    .close_datetime
                    .map(|dt| dt.to_rfc3339())
                    .unwrap_or_default(),
                record.net_pnl_quote.to_string(),
                record.filled_amount_quote.to_string(),
                record.close_type.clone().unwrap_or_default(),
                record.level_id.clone(),
            ])?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Writes order records to a CSV file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or writing fails.
    pub fn write_orders(path: &Path, records: &[OrderRecord]) -> Result<()> {
        let mut writer = Self::create(path)?;

        writer.write_record([
            "client_order_id",
            "last_status",
            "last_update_timestamp",
            "price",
            "amount",
            "position",
        ])?;

        for record in records {
            writer.write_record(&[
                record.client_order_id.clone(),
                record.last_status.clone(),
                record.last_update_timestamp.to_rfc3339(),
                record.price.to_string(),
                record.amount.to_string(),
                record.position.clone(),
            ])?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Writes market tick records to a CSV file, sorted by timestamp.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or writing fails.
    pub fn write_market_ticks(path: &Path, records: &[MarketTickRecord]) -> Result<()> {
        let mut writer = Self::create(path)?;

        writer.write_record([
            "timestamp",
            "exchange",
            "trading_pair",
            "mid_price",
            "best_bid",
            "best_ask",
        ])?;

        let mut sorted = records.to_vec();
        sorted.sort_by_key(|r| r.timestamp);

        for record in sorted {
            writer.write_record(&[
                record.timestamp.to_rfc3339(),
                record.exchange.clone(),
                record.trading_pair.clone(),
                record.mid_price.to_string(),
                record.best_bid.to_string(),
                record.best_ask.to_string(),
            ])?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Writes trade fill records to a CSV file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or writing fails.
    pub fn write_trade_fills(path: &Path, records: &[TradeFillRecord]) -> Result<()> {
        let mut writer = Self::create(path)?;

        writer.write_record([
            "timestamp",
            "strategy",
            "exchange",
            "trading_pair",
            "trade_type",
            "price",
            "amount",
        ])?;

        for record in records {
            writer.write_record(&[
                record.timestamp.to_rfc3339(),
                record.strategy.clone(),
                record.exchange.clone(),
                record.trading_pair.clone(),
                record.trade_type.clone(),
                record.price.to_string(),
                record.amount.to_string(),
            ])?;
        }

        writer.flush()?;
        Ok(())
    }

    fn create(path: &Path) -> Result<Writer<File>> {
        let file = File::create(path)
            .with_context(|| format!("failed to create CSV file: {}", path.display()))?;
        Ok(Writer::from_writer(file))
    }
}
