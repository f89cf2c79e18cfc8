//! Data access for the DCA performance analyzer.
//!
//! This crate provides:
//! - A database client for the PostgreSQL performance store
//! - Data models for executors, orders, market ticks and trade fills
//! - Repositories for typed, read-only database access
//! - CSV export of the raw record sets

pub mod csv_storage;
pub mod database;
pub mod models;
pub mod repositories;

pub use csv_storage::CsvStorage;
pub use database::DatabaseClient;

// Re-export models
pub use models::{
    CloseType, ExecutorRecord, MarketTickRecord, OrderRecord, PositionSide, TradeFillRecord,
};

// Re-export repositories
pub use repositories::{
    ExecutorRepository, MarketTickRepository, OrderRepository, Repositories, TradeFillRepository,
};
