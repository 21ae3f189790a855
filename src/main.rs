//! Main entry point: upload terms and download exports through POEditor v2

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use tracing::error;

use poeditor_sync::cli::commands::{self, ApiVariant, Args};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();
    commands::init_logging();

    let args = Args::parse();

    // Failures are reported, never turned into an exit code
    if let Err(e) = commands::handle_sync(args, ApiVariant::V2).await {
        error!("{:#}", e);
    }

    Ok(())
}
