//! Database repositories for the DCA performance analyzer.
//!
//! Each repository provides typed read access to one record set; the
//! analyzer never writes to the store.

pub mod executor_repo;
pub mod market_tick_repo;
pub mod order_repo;
pub mod trade_fill_repo;

pub use executor_repo::ExecutorRepository;
pub use market_tick_repo::MarketTickRepository;
pub use order_repo::OrderRepository;
pub use trade_fill_repo::TradeFillRepository;

use sqlx::PgPool;

/// All repositories bundled over a single connection pool.
pub struct Repositories {
    pub executors: ExecutorRepository,
    pub orders: OrderRepository,
    pub market_ticks: MarketTickRepository,
    pub trade_fills: TradeFillRepository,
}

impl Repositories {
    /// Creates the repository set from a database pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            executors: ExecutorRepository::new(pool.clone()),
            orders: OrderRepository::new(pool.clone()),
            market_ticks: MarketTickRepository::new(pool.clone()),
            trade_fills: TradeFillRepository::new(pool),
        }
    }
}
