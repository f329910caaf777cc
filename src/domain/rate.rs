//! Current exchange-rate snapshot for a single coin.

use super::coin::CoinCode;
use super::window::{calc_percent, WindowChanges, WindowValues};

/// Lowest open and highest close of one coin per window.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeRate {
    pub coin_id: i64,
    pub code: CoinCode,
    pub rank: i32,
    pub min_open: WindowValues<f64>,
    pub max_close: WindowValues<f64>,
}

impl ExchangeRate {
    /// Percent change from the window's lowest open to its highest close.
    #[must_use]
    pub fn changes(&self) -> WindowChanges {
        WindowValues::from_fn(|w| calc_percent(self.min_open.get(w), self.max_close.get(w)))
    }
}
