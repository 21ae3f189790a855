//! Download of exported translation files

use async_trait::async_trait;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::core::errors::{PoeditorError, Result};

/// Something that can copy a remote file to a local path
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Write the body at `remote_url` to `local_path`, returning the byte count
    async fn fetch(&self, local_path: &Path, remote_url: &str) -> Result<u64>;
}

/// Streams exports over HTTP(S)
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, local_path: &Path, remote_url: &str) -> Result<u64> {
        let file_error = |source: std::io::Error| PoeditorError::FileIo {
            path: local_path.display().to_string(),
            source,
        };

        let mut output = tokio::fs::File::create(local_path).await.map_err(file_error)?;

        let mut response = self
            .client
            .get(remote_url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| PoeditorError::Network {
                message: format!("Error while downloading {} - {}", remote_url, e),
            })?;

        let mut written = 0u64;
        while let Some(chunk) = response.chunk().await.map_err(|e| PoeditorError::Network {
            message: format!("Error while downloading {} - {}", remote_url, e),
        })? {
            output.write_all(&chunk).await.map_err(file_error)?;
            written += chunk.len() as u64;
        }
        output.flush().await.map_err(file_error)?;

        debug!("Wrote {} bytes to {}", written, local_path.display());
        Ok(written)
    }
}
