//! Chart rendering port.

use crate::domain::{ChartInterval, CoinCode, PricePoint};
use crate::error::Result;

/// Renders a price history to PNG bytes.
pub trait ChartRenderer: Send + Sync {
    fn render(
        &self,
        code: &CoinCode,
        interval: ChartInterval,
        points: &[PricePoint],
    ) -> Result<Vec<u8>>;
}
