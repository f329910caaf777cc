//! Command-line interface definitions.
//!
//! `klinewatch` with no subcommand runs the bot; the other subcommands
//! check the environment or print the current signals without touching
//! Telegram.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::paths;

/// Telegram bot for kline price-move alerts
#[derive(Parser, Debug)]
#[command(name = "klinewatch")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, default_value_os_t = paths::default_config())]
    pub config: PathBuf,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level subcommands for the klinewatch CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the bot: chat listener, notifications and the daily report
    Run,

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),

    /// Print the coins that currently qualify for an alert
    Movers,

    /// Print the rate table for one coin
    Rate {
        /// Coin code, e.g. `ETH`
        code: String,
    },

    /// Print the coins currently in consolidation
    Consolidation,
}

/// Subcommands for `klinewatch check`.
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate the configuration file
    Config,
    /// Connect to PostgreSQL and run a trivial query
    Database,
    /// Ask Telegram who the bot is
    Telegram,
}
