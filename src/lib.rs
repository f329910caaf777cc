//! Klinewatch - price-move alerts from kline data, delivered over Telegram.
//!
//! The bot reads candles that another process stores in PostgreSQL,
//! measures how far each coin moved over 10 minutes, 1, 4, 12 and 24 hours,
//! and pushes tables and charts to everyone who has written to it.
//!
//! # Architecture
//!
//! - [`domain`] - Coin codes, windows, movement and consolidation rules
//! - [`port`] - Traits the application depends on
//! - [`adapter`] - PostgreSQL, Telegram, chart and CLI implementations
//! - [`app`] - Configuration, delivery fan-out and the background loops
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```
//! use klinewatch::domain::{CoinCode, SignalThresholds};
//!
//! let code = CoinCode::parse_query("eth?").unwrap();
//! assert_eq!(code.as_str(), "ETH");
//! assert!(SignalThresholds::default().select(Vec::new()).is_empty());
//! ```

pub mod adapter;
pub mod app;
pub mod domain;
pub mod error;
pub mod port;
