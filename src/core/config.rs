//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error, warn};

use crate::core::errors::{PoeditorError, Result};

/// Default configuration file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// One language to export and where to write it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEntry {
    /// POEditor language code
    #[serde(rename = "Lang", alias = "lang")]
    pub language: String,
    /// Local destination
    #[serde(rename = "Path", alias = "path")]
    pub path: String,
}

impl FileEntry {
    pub fn new(language: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            path: path.into(),
        }
    }
}

/// Run configuration, read once per process
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    #[serde(rename = "Token", alias = "token")]
    pub token: String,
    #[serde(rename = "ID", alias = "id")]
    pub project_id: String,
    /// Export format, e.g. `po` or `mo`
    #[serde(rename = "Type", alias = "type")]
    pub file_type: String,
    #[serde(rename = "Upload", alias = "upload")]
    pub upload: bool,
    /// Terms file sent on upload
    #[serde(rename = "Path", alias = "path")]
    pub upload_path: String,
    #[serde(rename = "Download", alias = "download")]
    pub download: bool,
    #[serde(rename = "Files", alias = "files")]
    pub files: Vec<FileEntry>,
}

impl Configuration {
    /// Load from JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| PoeditorError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_json(&content).map_err(|source| PoeditorError::ConfigParse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Load from JSON file, logging any failure and falling back to the
    /// zero-valued configuration (which uploads and downloads nothing)
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(config) => {
                debug!(
                    "Loaded configuration: project {}, {} files",
                    config.project_id,
                    config.files.len()
                );
                config
            }
            Err(e) => {
                error!("{}", e);
                Self::default()
            }
        }
    }

    /// Parse a configuration document
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }
}

/// Connection settings for the POEditor services
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceSettings {
    /// Overrides the service's default endpoint root
    pub base_url: Option<String>,
    /// Request timeout; the HTTP client default applies when unset
    pub timeout: Option<Duration>,
}

impl ServiceSettings {
    /// Load settings from environment variables
    pub fn from_env() -> Self {
        let base_url = std::env::var("POEDITOR_API_URL")
            .ok()
            .filter(|url| !url.is_empty());

        let timeout = match std::env::var("POEDITOR_TIMEOUT_MS") {
            Ok(raw) => match raw.parse::<u64>() {
                Ok(ms) => Some(Duration::from_millis(ms)),
                Err(_) => {
                    warn!("Ignoring POEDITOR_TIMEOUT_MS={}: not a number of milliseconds", raw);
                    None
                }
            },
            Err(_) => None,
        };

        Self { base_url, timeout }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Build the shared HTTP client
    pub fn build_client(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }
}
