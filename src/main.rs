use clap::Parser;
use klinewatch::adapter::inbound::cli::{self, command::Cli, output};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    if let Err(e) = cli::execute(cli).await {
        output::error(&e.to_string());
        tracing::error!(error = %e, "Fatal error");
        std::process::exit(1);
    }
}
