//! PostgreSQL persistence adapters.
//!
//! Provides Diesel-backed implementations for the kline analytics queries
//! and the subscriber table.

pub mod connection;
pub mod market;
pub mod model;
mod query;
pub mod schema;
pub mod subscriber;

pub use connection::{create_pool, ping, run_migrations, warm_up, DbPool};
pub use market::{MarketQuerySettings, PgMarketData};
pub use subscriber::PgSubscriberStore;
