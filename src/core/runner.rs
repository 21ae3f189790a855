//! Upload/download session driver

use std::path::Path;
use tracing::{info, warn};

use crate::core::client::TranslationService;
use crate::core::config::{Configuration, FileEntry};
use crate::core::errors::{PoeditorError, Result};
use crate::core::fetcher::Fetch;
use crate::core::models::UploadResult;

/// Which parts of the configuration a run honours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Upload and download according to the `Upload`/`Download` flags
    Configured,
    /// Ignore the flags, never upload, always download
    DownloadOnly,
}

/// Outcome of one configured language
#[derive(Debug)]
pub struct FileOutcome {
    pub entry: FileEntry,
    /// Bytes written on success
    pub result: Result<u64>,
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Everything a run attempted, in order
#[derive(Debug, Default)]
pub struct RunReport {
    /// `None` when no upload was requested
    pub upload: Option<Result<UploadResult>>,
    pub files: Vec<FileOutcome>,
}

impl RunReport {
    pub fn downloaded(&self) -> usize {
        self.files.iter().filter(|f| f.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.files.len() - self.downloaded()
    }
}

/// Drives one session against a translation service
pub struct Runner<S, F> {
    service: S,
    fetcher: F,
    mode: RunMode,
}

impl<S: TranslationService, F: Fetch> Runner<S, F> {
    pub fn new(service: S, fetcher: F, mode: RunMode) -> Self {
        Self {
            service,
            fetcher,
            mode,
        }
    }

    /// Run the upload and the per-language downloads. Failures are logged
    /// and recorded; they never stop the remaining work.
    pub async fn run(&self, config: &Configuration) -> RunReport {
        let mut report = RunReport::default();

        if self.should_upload(config) {
            report.upload = Some(self.upload(config).await);
        }

        if self.should_download(config) {
            let file_type = self.export_type(config);
            for entry in &config.files {
                let result = self.download(config, entry, file_type).await;
                report.files.push(FileOutcome {
                    entry: entry.clone(),
                    result,
                });
            }

            info!(
                "Completed: {} downloaded, {} failed",
                report.downloaded(),
                report.failed()
            );
        }

        report
    }

    fn should_upload(&self, config: &Configuration) -> bool {
        match self.mode {
            RunMode::Configured => config.upload,
            RunMode::DownloadOnly => false,
        }
    }

    fn should_download(&self, config: &Configuration) -> bool {
        match self.mode {
            RunMode::Configured => config.download,
            RunMode::DownloadOnly => true,
        }
    }

    fn export_type<'a>(&'a self, config: &'a Configuration) -> &'a str {
        if config.file_type.is_empty() {
            self.service.default_export_type().unwrap_or_default()
        } else {
            &config.file_type
        }
    }

    async fn upload(&self, config: &Configuration) -> Result<UploadResult> {
        let result = self
            .service
            .upload(&config.token, &config.project_id, Path::new(&config.upload_path))
            .await;

        match &result {
            Ok(upload) => {
                info!("Upload response: {} - {}", upload.status, upload.message);
                if let Some(terms) = upload.terms {
                    info!(
                        "Terms parsed: {}, added: {}, deleted: {}",
                        terms.parsed, terms.added, terms.deleted
                    );
                }
            }
            Err(PoeditorError::Remote { status, message, .. }) => {
                warn!("Upload response: {} - {}", status, message)
            }
            Err(e) => warn!("Upload to {} failed: {}", self.service.name(), e),
        }

        result
    }

    async fn download(&self, config: &Configuration, entry: &FileEntry, file_type: &str) -> Result<u64> {
        let export = self
            .service
            .export(&config.token, &config.project_id, &entry.language, file_type)
            .await
            .map_err(|e| {
                warn!(
                    "Failed response from POEditor: {} - {}",
                    e.remote_message(),
                    entry.language
                );
                e
            })?;

        let written = self
            .fetcher
            .fetch(Path::new(&entry.path), &export.url)
            .await
            .map_err(|e| {
                warn!("Download of {} failed: {}", entry.language, e);
                e
            })?;

        info!("Download response: {} downloaded", entry.path);
        Ok(written)
    }
}
