//! Config file location.

use std::path::PathBuf;

use crate::app::config::{CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH};

/// `KLINEWATCH_CONFIG` when set, otherwise `config.toml` in the working
/// directory.
pub fn default_config() -> PathBuf {
    std::env::var_os(CONFIG_PATH_ENV)
        .filter(|v| !v.is_empty())
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
}
