//! CLI argument definitions and the sync handler

use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::core::client::{PoEditorLegacy, PoEditorV2, TranslationService};
use crate::core::config::{Configuration, ServiceSettings, DEFAULT_CONFIG_PATH};
use crate::core::fetcher::HttpFetcher;
use crate::core::runner::{RunMode, RunReport, Runner};

/// Arguments shared by both utilities
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to config file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
}

/// Which POEditor API a binary talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiVariant {
    /// `api.poeditor.com/v2`: upload and download
    V2,
    /// `poeditor.com/api/`: download only
    Legacy,
}

impl ApiVariant {
    pub fn mode(self) -> RunMode {
        match self {
            ApiVariant::V2 => RunMode::Configured,
            ApiVariant::Legacy => RunMode::DownloadOnly,
        }
    }

    /// Build the matching service over a shared HTTP client
    pub fn service(self, client: reqwest::Client, settings: &ServiceSettings) -> Box<dyn TranslationService> {
        match self {
            ApiVariant::V2 => Box::new(PoEditorV2::new(client, settings)),
            ApiVariant::Legacy => Box::new(PoEditorLegacy::new(client, settings)),
        }
    }
}

/// Log filter used when `RUST_LOG` is unset; covers the library and both binaries
pub const DEFAULT_LOG_FILTER: &str = "poeditor_sync=info,poeditor_legacy=info";

/// Initialize logging to stdout, honouring `RUST_LOG`
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .init();
}

/// Handle one sync session
pub async fn handle_sync(args: Args, variant: ApiVariant) -> anyhow::Result<RunReport> {
    info!("Using config file: {}", args.config.display());

    let config = Configuration::load_or_default(&args.config);
    let settings = ServiceSettings::from_env();
    handle_sync_with(&config, &settings, variant).await
}

/// Run a session from an already loaded configuration
pub async fn handle_sync_with(
    config: &Configuration,
    settings: &ServiceSettings,
    variant: ApiVariant,
) -> anyhow::Result<RunReport> {
    let client = settings.build_client()?;
    let service = variant.service(client.clone(), settings);
    info!("Talking to {}", service.name());

    let runner = Runner::new(service, HttpFetcher::new(client), variant.mode());
    Ok(runner.run(config).await)
}
