//! Application layer - configuration, delivery and the background loops.

pub mod broadcast;
pub mod config;
pub mod schedule;

use std::sync::Arc;

use teloxide::Bot;
use tracing::{info, warn};

use crate::adapter::inbound::telegram::listen;
use crate::adapter::outbound::chart::PlottersChart;
use crate::adapter::outbound::postgres::{
    create_pool, run_migrations, warm_up, DbPool, PgMarketData, PgSubscriberStore,
};
use crate::adapter::outbound::telegram::TelegramMessenger;
use crate::error::Result;

pub use broadcast::{Broadcaster, RateError};
pub use config::{Config, LoggingConfig};
pub use schedule::Schedule;

/// Main application entry point.
pub struct App;

impl App {
    /// Connect, then run the chat listener and both timers until one stops.
    pub async fn run(config: Config) -> Result<()> {
        info!(quote = %config.signals.quote, "Starting klinewatch");

        let pool = Self::connect(&config)?;
        let bot = Bot::new(&config.telegram.bot_token);
        let broadcaster = Arc::new(Self::broadcaster(&config, pool, bot.clone()));
        let schedule = Schedule::new(config.schedule.clone());

        let listener = tokio::spawn(listen(bot, Arc::clone(&broadcaster)));
        let notifications = tokio::spawn(schedule::notification_loop(
            Arc::clone(&broadcaster),
            schedule.clone(),
        ));
        let consolidation = tokio::spawn(schedule::consolidation_loop(broadcaster, schedule));

        tokio::select! {
            res = listener => warn!(result = ?res, "Telegram listener stopped"),
            res = notifications => warn!(result = ?res, "Notification loop stopped"),
            res = consolidation => warn!(result = ?res, "Consolidation loop stopped"),
        }

        Ok(())
    }

    /// Open the pool, migrate when asked, and prepare the session.
    pub fn connect(config: &Config) -> Result<DbPool> {
        let pool = create_pool(
            &config.database.connection_string(),
            config.database.pool_size,
        )?;
        if config.database.run_migrations {
            run_migrations(&pool)?;
        }
        warm_up(&pool);
        info!(pool_size = config.database.pool_size, "Database pool ready");
        Ok(pool)
    }

    /// Wire the production adapters into a broadcaster.
    #[must_use]
    pub fn broadcaster(config: &Config, pool: DbPool, bot: Bot) -> Broadcaster {
        Broadcaster::new(
            Arc::new(PgMarketData::new(pool.clone(), config.market_query())),
            Arc::new(PgSubscriberStore::new(pool)),
            Arc::new(TelegramMessenger::new(bot)),
            Arc::new(PlottersChart::new(config.chart.clone())),
        )
        .with_thresholds(config.signals.thresholds.clone())
        .with_band(
            config.consolidation.band.clone(),
            config.consolidation.max_message_chars,
        )
    }
}
