//! Print current signals to the terminal.
//!
//! Uses the same queries and filters as the bot, without Telegram.

use std::path::Path;

use crate::adapter::outbound::postgres::PgMarketData;
use crate::adapter::outbound::telegram::format::{consolidation_table, movers_table, rate_table};
use crate::app::{App, Config};
use crate::domain::CoinCode;
use crate::error::{Error, Result};
use crate::port::outbound::MarketData;

use super::output;

fn market(config: &Config) -> Result<PgMarketData> {
    let pool = App::connect(config)?;
    Ok(PgMarketData::new(pool, config.market_query()))
}

/// Movers that would be sent on the next notification pass.
pub fn execute_movers(config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)?;
    let rows = market(&config)?.movements()?;
    let movers = config.signals.thresholds.select(rows);

    output::section("Movers");
    if movers.is_empty() {
        output::success("No coin crossed its thresholds");
    } else {
        output::lines(&movers_table(&movers));
    }
    Ok(())
}

/// Rate table for one coin.
pub fn execute_rate(config_path: &Path, code: &str) -> Result<()> {
    let config = Config::load(config_path)?;
    let code = CoinCode::new(code);
    if code.as_str().is_empty() {
        return Err(Error::Parse("coin code must not be empty".into()));
    }

    output::section("Rate");
    match market(&config)?.exchange_rate(&code)? {
        Some(rate) => output::lines(&rate_table(&rate)),
        None => output::error("coin not found"),
    }
    Ok(())
}

/// Coins trading inside the consolidation band.
pub fn execute_consolidation(config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)?;
    let rows = config
        .consolidation
        .band
        .select(market(&config)?.consolidation()?);

    output::section("Consolidation");
    if rows.is_empty() {
        output::success("No coin in consolidation");
    } else {
        output::lines(&consolidation_table(
            &rows,
            config.consolidation.max_message_chars,
        ));
    }
    Ok(())
}
