pub mod config;
pub mod config_loader;
pub mod formatting;

pub use config::{AppConfig, DatabaseConfig, MarketDataConfig};
pub use config_loader::ConfigLoader;
pub use formatting::{format_duration, format_quote};
