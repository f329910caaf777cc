//! Handler for the `run` command.

use std::path::Path;

use tokio::signal;
use tracing::info;

use crate::app::{App, Config};
use crate::error::Result;

/// Load the config, start logging and run the bot until Ctrl-C.
pub async fn execute(config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)?;
    config.init_logging();
    info!(config = %config_path.display(), "klinewatch starting");

    tokio::select! {
        result = App::run(config) => result?,
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    info!("klinewatch stopped");
    Ok(())
}
