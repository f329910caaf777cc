//! CLI module graph and dispatch.

pub mod check;
pub mod command;
pub mod output;
pub mod paths;
pub mod report;
pub mod run;

use command::{CheckCommand, Cli, Commands};
use output::OutputConfig;

use crate::error::Result;

/// Run the parsed command line.
pub async fn execute(cli: Cli) -> Result<()> {
    output::configure(OutputConfig {
        json: cli.json,
        quiet: cli.quiet,
    });

    let config = cli.config.as_path();
    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run::execute(config).await,
        Commands::Check(CheckCommand::Config) => check::execute_config(config),
        Commands::Check(CheckCommand::Database) => check::execute_database(config).await,
        Commands::Check(CheckCommand::Telegram) => check::execute_telegram(config).await,
        Commands::Movers => report::execute_movers(config),
        Commands::Rate { code } => report::execute_rate(config, &code),
        Commands::Consolidation => report::execute_consolidation(config),
    }
}
