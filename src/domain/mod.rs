//! Market-signal domain types, free of database and chat concerns.

mod chart;
mod coin;
mod consolidation;
mod indicator;
mod movement;
mod rate;
mod subscriber;
mod window;

pub use chart::{min_max, ChartInterval, PricePoint};
pub use coin::{CoinCode, CoinQueryError};
pub use consolidation::{ConsolidationBand, ConsolidationRow};
pub use indicator::{bollinger, sma};
pub use movement::{Movement, MovementRow, SignalThresholds};
pub use rate::ExchangeRate;
pub use subscriber::{Audience, NewSubscriber, Subscriber};
pub use window::{calc_percent, round_to, Window, WindowChanges, WindowValues};
