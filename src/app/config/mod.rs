//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file with environment variable overrides
//! for secrets like `TELEGRAM_BOT_TOKEN` and `DATABASE_PASSWORD`.

use serde::Deserialize;
use std::path::Path;

use crate::adapter::outbound::chart::ChartStyle;
use crate::adapter::outbound::postgres::MarketQuerySettings;
use crate::error::{ConfigError, Result};

mod database;
mod logging;
mod schedule;
mod signals;
mod telegram;

pub use database::DatabaseConfig;
pub use logging::LoggingConfig;
pub use schedule::ScheduleConfig;
pub use signals::{ConsolidationConfig, SignalsConfig};
pub use telegram::TelegramAppConfig;

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "KLINEWATCH_CONFIG";
/// Config file used when neither the CLI nor the environment names one.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub telegram: TelegramAppConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub signals: SignalsConfig,
    #[serde(default)]
    pub consolidation: ConsolidationConfig,
    #[serde(default)]
    pub chart: ChartStyle,
}

impl Config {
    /// Read, override from the environment, and validate.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let mut config = Self::parse(&content)?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Parse TOML without touching the environment or validating.
    #[allow(clippy::result_large_err)]
    pub fn parse(content: &str) -> Result<Self> {
        let config = toml::from_str(content).map_err(ConfigError::Parse)?;
        Ok(config)
    }

    /// Secrets are read from the environment when present.
    fn apply_env(&mut self) {
        if let Some(token) = env_non_empty("TELEGRAM_BOT_TOKEN") {
            self.telegram.bot_token = token;
        }
        if let Some(password) = env_non_empty("DATABASE_PASSWORD") {
            self.database.password = password;
        }
        if let Some(url) = env_non_empty("DATABASE_URL") {
            self.database.url = Some(url);
        }
    }

    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if self.telegram.bot_token.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "telegram.bot_token",
            }
            .into());
        }
        if self.database.url.is_none() && self.database.dbname.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "database.dbname",
            }
            .into());
        }
        if self.database.pool_size == 0 {
            return Err(invalid("database.pool_size", "must be at least 1"));
        }

        let schedule = &self.schedule;
        if schedule.notification_minutes.iter().any(|m| *m > 59) {
            return Err(invalid(
                "schedule.notification_minutes",
                "minutes must be between 0 and 59",
            ));
        }
        for (field, hour) in [
            ("schedule.quiet_start_hour", schedule.quiet_start_hour),
            ("schedule.quiet_end_hour", schedule.quiet_end_hour),
            ("schedule.consolidation_hour", schedule.consolidation_hour),
        ] {
            if hour > 23 {
                return Err(invalid(field, "hour must be between 0 and 23"));
            }
        }
        if schedule.notification_tick_secs == 0 {
            return Err(invalid("schedule.notification_tick_secs", "must be positive"));
        }
        if schedule.consolidation_tick_secs == 0 {
            return Err(invalid("schedule.consolidation_tick_secs", "must be positive"));
        }
        if !(-12..=14).contains(&schedule.utc_offset_hours) {
            return Err(invalid(
                "schedule.utc_offset_hours",
                "offset must be between -12 and 14",
            ));
        }

        if self.signals.quote.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "signals.quote",
            }
            .into());
        }
        if self.signals.candidate_limit <= 0 {
            return Err(invalid("signals.candidate_limit", "must be positive"));
        }
        self.signals
            .thresholds
            .validate()
            .map_err(|reason| invalid("signals.thresholds", reason))?;

        if self.consolidation.lookback_days <= 0 {
            return Err(invalid("consolidation.lookback_days", "must be positive"));
        }
        if self.consolidation.band.min_percent > self.consolidation.band.max_percent {
            return Err(invalid(
                "consolidation.band",
                "min_percent must not exceed max_percent",
            ));
        }
        if self.consolidation.max_message_chars == 0 {
            return Err(invalid("consolidation.max_message_chars", "must be positive"));
        }

        if self.chart.width == 0 || self.chart.height == 0 {
            return Err(invalid("chart", "width and height must be positive"));
        }
        if self.chart.period < 2 {
            return Err(invalid("chart.period", "must be at least 2"));
        }

        Ok(())
    }

    /// Query parameters handed to the market data adapter.
    #[must_use]
    pub fn market_query(&self) -> MarketQuerySettings {
        MarketQuerySettings {
            quote: self.signals.quote.clone(),
            candidate_limit: self.signals.candidate_limit,
            consolidation_days: self.consolidation.lookback_days,
        }
    }

    /// Initialize logging based on configuration.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> crate::error::Error {
    ConfigError::InvalidValue {
        field,
        reason: reason.into(),
    }
    .into()
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Config {
        let mut config = Config::default();
        config.telegram.bot_token = "123:abc".into();
        config.database.dbname = "klines".into();
        config
    }

    #[test]
    fn defaults_validate_once_secrets_are_set() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.schedule.notification_minutes, vec![0, 30]);
        assert_eq!(config.signals.quote, "BUSD");
        assert_eq!(config.consolidation.lookback_days, 14);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn market_query_mirrors_sections() {
        let mut config = valid();
        config.signals.quote = "USDT".into();
        config.consolidation.lookback_days = 7;
        let query = config.market_query();
        assert_eq!(query.quote, "USDT");
        assert_eq!(query.candidate_limit, 45);
        assert_eq!(query.consolidation_days, 7);
    }

    #[test]
    fn inverted_band_is_rejected() {
        let mut config = valid();
        config.consolidation.band.min_percent = 6.0;
        assert!(config.validate().is_err());
    }
}
