//! Kline analytics port.

use crate::domain::{
    ChartInterval, CoinCode, ConsolidationRow, ExchangeRate, MovementRow, PricePoint,
};
use crate::error::Result;

/// Read-only queries over the kline tables.
///
/// Windowed aggregation happens in the database; implementations return
/// raw per-window figures and leave thresholding to the caller.
pub trait MarketData: Send + Sync {
    /// Per-window percent changes for the tracked coins.
    fn movements(&self) -> Result<Vec<MovementRow>>;

    /// Min open / max close per window for one coin, if it is tracked.
    fn exchange_rate(&self, code: &CoinCode) -> Result<Option<ExchangeRate>>;

    /// Daily averages over the consolidation look-back and the last price.
    fn consolidation(&self) -> Result<Vec<ConsolidationRow>>;

    /// Close prices for a chart, oldest first.
    fn price_history(&self, code: &CoinCode, interval: ChartInterval) -> Result<Vec<PricePoint>>;
}
