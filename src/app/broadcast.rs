//! Fan-out of alerts, reports and charts to subscribers.
//!
//! The database and chart ports are synchronous; calls into them run on the
//! blocking pool so the bot's event loop keeps moving.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::adapter::outbound::telegram::format::{
    code_block, consolidation_table, escape_markdown, movers_table, rate_table,
    MAX_MESSAGE_CHARS,
};
use crate::domain::{
    Audience, ChartInterval, CoinCode, ConsolidationBand, SignalThresholds, Subscriber,
};
use crate::error::{DeliveryError, Error, Result};
use crate::port::outbound::{ChartRenderer, MarketData, Messenger, SubscriberStore};

/// Reply when the movers query fails.
pub const MOVERS_ERROR_TEXT: &str = "Возникла ошибка №435/1";
/// Reply when the consolidation query fails.
pub const CONSOLIDATION_ERROR_TEXT: &str = "Возникла ошибка №435/2";

/// Reply to a coin rate query that could not be answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateError {
    /// The message is not a `CODE?` query.
    InvalidQuery,
    /// No data for the coin over the last day.
    NotFound,
}

impl RateError {
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::InvalidQuery => "no correct coin",
            Self::NotFound => "coin not found",
        }
    }
}

/// Ports and filters shared by every delivery.
pub struct Broadcaster {
    market: Arc<dyn MarketData>,
    subscribers: Arc<dyn SubscriberStore>,
    messenger: Arc<dyn Messenger>,
    charts: Arc<dyn ChartRenderer>,
    thresholds: SignalThresholds,
    band: ConsolidationBand,
    max_consolidation_chars: usize,
    notifying: AtomicBool,
}

/// Held while a notification pass runs; clears the flag on drop.
struct PassGuard<'a>(&'a AtomicBool);

impl<'a> PassGuard<'a> {
    fn claim(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for PassGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Broadcaster {
    #[must_use]
    pub fn new(
        market: Arc<dyn MarketData>,
        subscribers: Arc<dyn SubscriberStore>,
        messenger: Arc<dyn Messenger>,
        charts: Arc<dyn ChartRenderer>,
    ) -> Self {
        Self {
            market,
            subscribers,
            messenger,
            charts,
            thresholds: SignalThresholds::default(),
            band: ConsolidationBand::default(),
            max_consolidation_chars: MAX_MESSAGE_CHARS,
            notifying: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn with_thresholds(mut self, thresholds: SignalThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    #[must_use]
    pub fn with_band(mut self, band: ConsolidationBand, max_chars: usize) -> Self {
        self.band = band;
        self.max_consolidation_chars = max_chars;
        self
    }

    /// Subscriber store, for registering chats.
    #[must_use]
    pub fn subscribers(&self) -> Arc<dyn SubscriberStore> {
        Arc::clone(&self.subscribers)
    }

    /// Movers table as MarkdownV2, empty when nothing moved.
    pub async fn movers_text(&self) -> String {
        let market = Arc::clone(&self.market);
        match blocking(move || market.movements()).await {
            Ok(rows) => {
                let movers = self.thresholds.select(rows);
                debug!(movers = movers.len(), "Selected movers");
                let table = movers_table(&movers);
                if table.is_empty() {
                    table
                } else {
                    code_block(&table)
                }
            }
            Err(e) => {
                error!(error = %e, "Failed to load movements");
                escape_markdown(MOVERS_ERROR_TEXT)
            }
        }
    }

    /// Consolidation table as MarkdownV2, empty when no coin qualifies.
    pub async fn consolidation_text(&self) -> String {
        let market = Arc::clone(&self.market);
        match blocking(move || market.consolidation()).await {
            Ok(rows) => {
                let rows = self.band.select(rows);
                let table = consolidation_table(&rows, self.max_consolidation_chars);
                if table.is_empty() {
                    table
                } else {
                    code_block(&table)
                }
            }
            Err(e) => {
                error!(error = %e, "Failed to load consolidation averages");
                escape_markdown(CONSOLIDATION_ERROR_TEXT)
            }
        }
    }

    /// Rate table for a `CODE?` query, with the parsed code.
    pub async fn rate_text(
        &self,
        message: &str,
    ) -> std::result::Result<(CoinCode, String), RateError> {
        let code = CoinCode::parse_query(message).map_err(|_| RateError::InvalidQuery)?;

        let market = Arc::clone(&self.market);
        let lookup = code.clone();
        match blocking(move || market.exchange_rate(&lookup)).await {
            Ok(Some(rate)) => Ok((code, code_block(&rate_table(&rate)))),
            Ok(None) => Err(RateError::NotFound),
            Err(e) => {
                warn!(coin = %code, error = %e, "Failed to load exchange rate");
                Err(RateError::NotFound)
            }
        }
    }

    /// Push the movers table and a BTC chart to every subscriber.
    ///
    /// The chart is rendered once per pass. Returns without doing anything
    /// when a pass is already running.
    pub async fn send_notifications(&self) -> Result<()> {
        let Some(_guard) = PassGuard::claim(&self.notifying) else {
            debug!("Notification pass already running, skipping");
            return Ok(());
        };

        let text = self.movers_text().await;
        if text.is_empty() {
            debug!("No movers to report");
            return Ok(());
        }

        let subscribers = self.enabled(Audience::Everyone).await?;
        if subscribers.is_empty() {
            return Ok(());
        }
        info!(subscribers = subscribers.len(), "Sending notifications");

        let chart = self
            .render_chart(CoinCode::btc(), ChartInterval::default())
            .await;

        for subscriber in &subscribers {
            if let Err(e) = self.messenger.send_text(subscriber.telegram_id, &text).await {
                let blocked = e == DeliveryError::Blocked;
                self.handle_failure(subscriber, &e).await;
                if blocked {
                    continue;
                }
            }
            if let Some(png) = &chart {
                self.send_photo(subscriber, png.clone()).await;
            }
        }

        Ok(())
    }

    /// Push the consolidation report to every subscriber.
    ///
    /// A chat whose send fails gets the delivery error instead.
    pub async fn send_consolidation(&self) -> Result<()> {
        let text = self.consolidation_text().await;
        if text.is_empty() {
            debug!("No coins in consolidation");
            return Ok(());
        }

        let subscribers = self.enabled(Audience::Everyone).await?;
        info!(subscribers = subscribers.len(), "Sending consolidation report");

        for subscriber in &subscribers {
            match self.messenger.send_text(subscriber.telegram_id, &text).await {
                Ok(()) => {}
                Err(DeliveryError::Blocked) => self.disable(subscriber).await,
                Err(DeliveryError::Failed(reason)) => {
                    let telegram_id = subscriber.telegram_id;
                    error!(telegram_id, %reason, "Failed to send consolidation report");
                    let notice = escape_markdown(&reason);
                    if let Err(e) = self.messenger.send_text(telegram_id, &notice).await {
                        warn!(telegram_id, error = %e, "Failed to send error notice");
                    }
                }
            }
        }

        Ok(())
    }

    /// Render one chart and send it to the audience.
    ///
    /// Nothing is sent when there is no price history for the coin.
    pub async fn send_chart(
        &self,
        audience: Audience,
        code: CoinCode,
        interval: ChartInterval,
    ) -> Result<()> {
        let subscribers = self.enabled(audience).await?;
        if subscribers.is_empty() {
            return Ok(());
        }

        let Some(png) = self.render_chart(code, interval).await else {
            return Ok(());
        };

        for subscriber in &subscribers {
            self.send_photo(subscriber, png.clone()).await;
        }

        Ok(())
    }

    /// Load history and draw it; `None` when there is nothing to send.
    async fn render_chart(&self, code: CoinCode, interval: ChartInterval) -> Option<Vec<u8>> {
        let market = Arc::clone(&self.market);
        let charts = Arc::clone(&self.charts);
        let chart_code = code.clone();
        let png = blocking(move || {
            let points = market.price_history(&chart_code, interval)?;
            if points.is_empty() {
                return Ok(None);
            }
            charts.render(&chart_code, interval, &points).map(Some)
        })
        .await;

        match png {
            Ok(Some(png)) => Some(png),
            Ok(None) => {
                warn!(coin = %code, %interval, "No price history for chart");
                None
            }
            Err(e) => {
                warn!(coin = %code, %interval, error = %e, "Failed to build chart");
                None
            }
        }
    }

    async fn send_photo(&self, subscriber: &Subscriber, png: Vec<u8>) {
        if let Err(e) = self.messenger.send_photo(subscriber.telegram_id, png).await {
            self.handle_failure(subscriber, &e).await;
        }
    }

    async fn enabled(&self, audience: Audience) -> Result<Vec<Subscriber>> {
        let store = Arc::clone(&self.subscribers);
        blocking(move || store.enabled(audience)).await
    }

    async fn handle_failure(&self, subscriber: &Subscriber, err: &DeliveryError) {
        match err {
            DeliveryError::Blocked => self.disable(subscriber).await,
            DeliveryError::Failed(reason) => {
                error!(telegram_id = subscriber.telegram_id, %reason, "Delivery failed");
            }
        }
    }

    async fn disable(&self, subscriber: &Subscriber) {
        let store = Arc::clone(&self.subscribers);
        let id = subscriber.id;
        if let Err(e) = blocking(move || store.disable(id)).await {
            warn!(subscriber_id = id, error = %e, "Failed to disable subscriber");
        }
    }
}

/// Run a synchronous port call on the blocking pool.
pub(crate) async fn blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| Error::Task(e.to_string()))?
}
