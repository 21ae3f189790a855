//! Download exports through the legacy POEditor API

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use tracing::error;

use poeditor_sync::cli::commands::{self, ApiVariant, Args};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    commands::init_logging();

    let args = Args::parse();

    if let Err(e) = commands::handle_sync(args, ApiVariant::Legacy).await {
        error!("{:#}", e);
    }

    Ok(())
}
