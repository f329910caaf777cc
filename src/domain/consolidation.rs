//! Coins trading sideways: the daily consolidation report.

use serde::Deserialize;

use super::coin::CoinCode;
use super::window::calc_percent;

/// Average daily open/close over the look-back period plus the last close.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsolidationRow {
    pub coin_id: i64,
    pub code: CoinCode,
    pub rank: i32,
    pub avg_open: Option<f64>,
    pub avg_close: Option<f64>,
    pub price: Option<f64>,
}

impl ConsolidationRow {
    /// Percent from the average open to the current price.
    #[must_use]
    pub fn percent_open(&self) -> Option<f64> {
        calc_percent(self.avg_open, self.price)
    }

    /// Percent from the average close to the current price.
    #[must_use]
    pub fn percent_close(&self) -> Option<f64> {
        calc_percent(self.avg_close, self.price)
    }
}

/// Inclusive percent band a coin's price must stay within.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConsolidationBand {
    pub min_percent: f64,
    pub max_percent: f64,
}

impl Default for ConsolidationBand {
    fn default() -> Self {
        Self {
            min_percent: -3.0,
            max_percent: 5.0,
        }
    }
}

impl ConsolidationBand {
    fn holds(&self, percent: Option<f64>) -> bool {
        percent.is_some_and(|p| p >= self.min_percent && p <= self.max_percent)
    }

    /// Both the open- and close-based percents are inside the band.
    #[must_use]
    pub fn contains(&self, row: &ConsolidationRow) -> bool {
        self.holds(row.percent_open()) && self.holds(row.percent_close())
    }

    /// Keep only consolidating coins, preserving order.
    #[must_use]
    pub fn select(&self, rows: Vec<ConsolidationRow>) -> Vec<ConsolidationRow> {
        rows.into_iter().filter(|r| self.contains(r)).collect()
    }
}
