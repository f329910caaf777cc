use chrono::{Duration, Utc};
use parking_lot::Mutex;

use klinewatch::domain::{
    ChartInterval, CoinCode, ConsolidationRow, ExchangeRate, MovementRow, PricePoint,
    WindowValues,
};
use klinewatch::error::{Error, Result};
use klinewatch::port::outbound::MarketData;

/// In-memory market data with switchable failures.
#[derive(Default)]
pub struct FakeMarket {
    pub movements: Vec<MovementRow>,
    pub rates: Vec<ExchangeRate>,
    pub consolidation: Vec<ConsolidationRow>,
    pub history: Vec<PricePoint>,
    pub fail_movements: bool,
    pub fail_consolidation: bool,
    pub history_requests: Mutex<Vec<(CoinCode, ChartInterval)>>,
}

impl FakeMarket {
    pub fn with_history(mut self, points: usize) -> Self {
        let start = Utc::now() - Duration::hours(1);
        self.history = (0..points)
            .map(|i| PricePoint {
                open_time: start + Duration::minutes(i as i64),
                close: 100.0 + i as f64,
            })
            .collect();
        self
    }
}

impl MarketData for FakeMarket {
    fn movements(&self) -> Result<Vec<MovementRow>> {
        if self.fail_movements {
            return Err(Error::Database("movements unavailable".into()));
        }
        Ok(self.movements.clone())
    }

    fn exchange_rate(&self, code: &CoinCode) -> Result<Option<ExchangeRate>> {
        Ok(self.rates.iter().find(|r| &r.code == code).cloned())
    }

    fn consolidation(&self) -> Result<Vec<ConsolidationRow>> {
        if self.fail_consolidation {
            return Err(Error::Database("consolidation unavailable".into()));
        }
        Ok(self.consolidation.clone())
    }

    fn price_history(&self, code: &CoinCode, interval: ChartInterval) -> Result<Vec<PricePoint>> {
        self.history_requests.lock().push((code.clone(), interval));
        Ok(self.history.clone())
    }
}

/// Movement row with the given change in every window.
pub fn mover(id: i64, code: &str, change: f64) -> MovementRow {
    MovementRow {
        coin_id: id,
        code: CoinCode::new(code),
        rank: id as i32,
        changes: WindowValues::from_fn(|_| Some(change)),
    }
}

/// Rate with a one percent rise in every window.
pub fn rate(id: i64, code: &str) -> ExchangeRate {
    ExchangeRate {
        coin_id: id,
        code: CoinCode::new(code),
        rank: id as i32,
        min_open: WindowValues::from_fn(|_| Some(100.0)),
        max_close: WindowValues::from_fn(|_| Some(101.0)),
    }
}

/// Consolidation row with equal open and close averages.
pub fn consolidating(id: i64, code: &str, price: f64, avg: f64) -> ConsolidationRow {
    ConsolidationRow {
        coin_id: id,
        code: CoinCode::new(code),
        rank: id as i32,
        avg_open: Some(avg),
        avg_close: Some(avg),
        price: Some(price),
    }
}
