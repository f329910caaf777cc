//! Kline analytics backed by PostgreSQL.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer, Text};
use tracing::debug;

use super::connection::DbPool;
use super::model::{ConsolidationRecord, MovementRecord, RateRecord};
use super::query;
use super::schema::{coins, coins_pairs, klines};
use crate::domain::{
    ChartInterval, CoinCode, ConsolidationRow, ExchangeRate, MovementRow, PricePoint,
};
use crate::error::{Error, Result};
use crate::port::outbound::MarketData;

/// Query parameters shared by the analytics queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketQuerySettings {
    /// Quote currency of the tracked pairs, e.g. `BUSD`.
    pub quote: String,
    /// How many coins, by id, are considered for movement alerts.
    pub candidate_limit: i64,
    /// Days of daily averages behind the consolidation report.
    pub consolidation_days: i32,
}

impl Default for MarketQuerySettings {
    fn default() -> Self {
        Self {
            quote: "BUSD".into(),
            candidate_limit: 45,
            consolidation_days: 14,
        }
    }
}

/// PostgreSQL-backed [`MarketData`].
pub struct PgMarketData {
    pool: DbPool,
    settings: MarketQuerySettings,
}

impl PgMarketData {
    #[must_use]
    pub fn new(pool: DbPool, settings: MarketQuerySettings) -> Self {
        Self { pool, settings }
    }
}

impl MarketData for PgMarketData {
    fn movements(&self) -> Result<Vec<MovementRow>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let records: Vec<MovementRecord> = diesel::sql_query(query::MOVEMENTS)
            .bind::<Text, _>(self.settings.quote.as_str())
            .bind::<BigInt, _>(self.settings.candidate_limit)
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        debug!(coins = records.len(), "Loaded window movements");
        Ok(records.into_iter().map(MovementRow::from).collect())
    }

    fn exchange_rate(&self, code: &CoinCode) -> Result<Option<ExchangeRate>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let records: Vec<RateRecord> = diesel::sql_query(query::EXCHANGE_RATE)
            .bind::<Text, _>(self.settings.quote.as_str())
            .bind::<Text, _>(code.as_str())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(records.into_iter().next().map(ExchangeRate::from))
    }

    fn consolidation(&self) -> Result<Vec<ConsolidationRow>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let records: Vec<ConsolidationRecord> = diesel::sql_query(query::CONSOLIDATION)
            .bind::<Text, _>(self.settings.quote.as_str())
            .bind::<Integer, _>(self.settings.consolidation_days)
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        debug!(coins = records.len(), "Loaded consolidation averages");
        Ok(records.into_iter().map(ConsolidationRow::from).collect())
    }

    fn price_history(&self, code: &CoinCode, interval: ChartInterval) -> Result<Vec<PricePoint>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let since = Utc::now() - interval.lookback();

        let rows: Vec<(DateTime<Utc>, f64)> = klines::table
            .inner_join(coins_pairs::table.inner_join(coins::table))
            .filter(klines::open_time.ge(since))
            .filter(coins::code.eq(code.as_str()))
            .filter(coins_pairs::couple.eq(&self.settings.quote))
            .order(klines::id.asc())
            .select((klines::open_time, klines::close))
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(open_time, close)| PricePoint { open_time, close })
            .collect())
    }
}
