//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the kline database, the subscriber table,
//! chart rendering and chat delivery.

pub mod chart;
pub mod market;
pub mod messenger;
pub mod subscriber;

pub use chart::ChartRenderer;
pub use market::MarketData;
pub use messenger::Messenger;
pub use subscriber::SubscriberStore;
