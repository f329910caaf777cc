//! Configuration and connection checks.

use std::path::Path;

use teloxide::prelude::*;

use super::output;
use crate::adapter::outbound::postgres::{create_pool, ping};
use crate::app::Config;
use crate::error::{Error, Result};

/// Validate the config file and show the effective settings.
pub fn execute_config(config_path: &Path) -> Result<()> {
    output::section("Config Check");
    output::field("File", config_path.display());

    let config = Config::load(config_path)?;
    output::field("Bot token", config.telegram.masked_token());
    let database = match &config.database.url {
        Some(_) => "from DATABASE_URL".to_string(),
        None => format!("{}:{}", config.database.host, config.database.port),
    };
    output::field("Database", database);
    output::field("Quote", &config.signals.quote);
    output::field(
        "Notify at",
        format!("{:?}", config.schedule.notification_minutes),
    );
    output::success("Configuration is valid");
    Ok(())
}

/// Open a pool and round-trip `SELECT 1`.
pub async fn execute_database(config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)?;
    output::section("Database Check");

    let pb = output::spinner("Connecting to PostgreSQL...");
    let url = config.database.connection_string();
    let result = tokio::task::spawn_blocking(move || {
        let pool = create_pool(&url, 1)?;
        ping(&pool)
    })
    .await
    .map_err(|e| Error::Task(e.to_string()))?;

    match result {
        Ok(()) => {
            output::spinner_success(&pb, "Database reachable");
            Ok(())
        }
        Err(e) => {
            output::spinner_fail(&pb, "Database check failed");
            Err(e)
        }
    }
}

/// Call `getMe` with the configured token.
pub async fn execute_telegram(config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)?;
    output::section("Telegram Check");
    output::field("Bot token", config.telegram.masked_token());

    let pb = output::spinner("Calling getMe...");
    let bot = Bot::new(&config.telegram.bot_token);
    match bot.get_me().await {
        Ok(me) => {
            output::spinner_success(&pb, "Token accepted");
            output::field("Username", me.username());
            Ok(())
        }
        Err(e) => {
            output::spinner_fail(&pb, "Telegram check failed");
            Err(e.into())
        }
    }
}
