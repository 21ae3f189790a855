//! POEditor API clients

use async_trait::async_trait;
use std::path::Path;
use tracing::debug;

use crate::core::config::ServiceSettings;
use crate::core::errors::{PoeditorError, Result};
use crate::core::models::{ExportResult, ResponseEnvelope, UploadResult};

/// Root of the current POEditor API
pub const V2_BASE_URL: &str = "https://api.poeditor.com/v2";

/// Single endpoint of the legacy POEditor API
pub const LEGACY_BASE_URL: &str = "https://poeditor.com/api/";

/// Export format the legacy API falls back to when none is configured
pub const LEGACY_DEFAULT_TYPE: &str = "mo";

/// Translation-management operations a run can drive
#[async_trait]
pub trait TranslationService: Send + Sync {
    /// Short name used in log lines
    fn name(&self) -> &str;

    /// Export type used when the configuration leaves it empty
    fn default_export_type(&self) -> Option<&str> {
        None
    }

    /// Upload a terms file to the project
    async fn upload(&self, token: &str, project_id: &str, file_path: &Path) -> Result<UploadResult>;

    /// Request an export of one language, returning the download URL
    async fn export(
        &self,
        token: &str,
        project_id: &str,
        language: &str,
        file_type: &str,
    ) -> Result<ExportResult>;
}

#[async_trait]
impl<T: TranslationService + ?Sized> TranslationService for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn default_export_type(&self) -> Option<&str> {
        (**self).default_export_type()
    }

    async fn upload(&self, token: &str, project_id: &str, file_path: &Path) -> Result<UploadResult> {
        (**self).upload(token, project_id, file_path).await
    }

    async fn export(
        &self,
        token: &str,
        project_id: &str,
        language: &str,
        file_type: &str,
    ) -> Result<ExportResult> {
        (**self).export(token, project_id, language, file_type).await
    }
}

/// Client for `https://api.poeditor.com/v2`
#[derive(Debug, Clone)]
pub struct PoEditorV2 {
    client: reqwest::Client,
    base_url: String,
}

impl PoEditorV2 {
    pub fn new(client: reqwest::Client, settings: &ServiceSettings) -> Self {
        let base_url = settings
            .base_url
            .clone()
            .unwrap_or_else(|| V2_BASE_URL.to_string());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create from settings, building a fresh HTTP client
    pub fn from_settings(settings: &ServiceSettings) -> Result<Self> {
        Ok(Self::new(settings.build_client()?, settings))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait]
impl TranslationService for PoEditorV2 {
    fn name(&self) -> &str {
        "POEditor v2"
    }

    async fn upload(&self, token: &str, project_id: &str, file_path: &Path) -> Result<UploadResult> {
        let content = tokio::fs::read(file_path)
            .await
            .map_err(|source| PoeditorError::FileIo {
                path: file_path.display().to_string(),
                source,
            })?;

        let file_name = file_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();

        debug!("Uploading {} ({} bytes)", file_path.display(), content.len());

        let part = reqwest::multipart::Part::bytes(content).file_name(file_name);
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("api_token", token.to_string())
            .text("id", project_id.to_string())
            .text("updating", "terms");

        let request = self.client.post(self.endpoint("projects/upload")).multipart(form);
        let envelope = send_envelope(request).await?;

        if !envelope.response.is_success() {
            return Err(remote_error(&envelope));
        }

        Ok(UploadResult {
            status: envelope.response.status.clone(),
            message: envelope.response.message.clone(),
            terms: envelope.term_counts(),
        })
    }

    async fn export(
        &self,
        token: &str,
        project_id: &str,
        language: &str,
        file_type: &str,
    ) -> Result<ExportResult> {
        debug!("Requesting {} export for language {}", file_type, language);

        let form = [
            ("api_token", token),
            ("id", project_id),
            ("type", file_type),
            ("language", language),
        ];

        let request = self.client.post(self.endpoint("projects/export")).form(&form);
        export_result(send_envelope(request).await?)
    }
}

/// Client for the legacy `https://poeditor.com/api/` endpoint, export only
#[derive(Debug, Clone)]
pub struct PoEditorLegacy {
    client: reqwest::Client,
    endpoint: String,
}

impl PoEditorLegacy {
    pub fn new(client: reqwest::Client, settings: &ServiceSettings) -> Self {
        let endpoint = settings
            .base_url
            .clone()
            .unwrap_or_else(|| LEGACY_BASE_URL.to_string());

        Self { client, endpoint }
    }

    /// Create from settings, building a fresh HTTP client
    pub fn from_settings(settings: &ServiceSettings) -> Result<Self> {
        Ok(Self::new(settings.build_client()?, settings))
    }
}

#[async_trait]
impl TranslationService for PoEditorLegacy {
    fn name(&self) -> &str {
        "POEditor legacy"
    }

    fn default_export_type(&self) -> Option<&str> {
        Some(LEGACY_DEFAULT_TYPE)
    }

    async fn upload(&self, _token: &str, _project_id: &str, _file_path: &Path) -> Result<UploadResult> {
        Err(PoeditorError::Unsupported {
            operation: "upload".to_string(),
        })
    }

    async fn export(
        &self,
        token: &str,
        project_id: &str,
        language: &str,
        file_type: &str,
    ) -> Result<ExportResult> {
        let file_type = if file_type.is_empty() {
            LEGACY_DEFAULT_TYPE
        } else {
            file_type
        };

        debug!("Requesting {} export for language {} (legacy)", file_type, language);

        let form = [
            ("api_token", token),
            ("action", "export"),
            ("id", project_id),
            ("type", file_type),
            ("language", language),
        ];

        let request = self.client.post(&self.endpoint).form(&form);
        export_result(send_envelope(request).await?)
    }
}

/// Send a request and decode POEditor's JSON envelope
async fn send_envelope(request: reqwest::RequestBuilder) -> Result<ResponseEnvelope> {
    let response = request.send().await.map_err(|e| PoeditorError::Network {
        message: e.to_string(),
    })?;

    debug!("POEditor answered HTTP {}", response.status());

    let body = response.text().await.map_err(|e| PoeditorError::Network {
        message: e.to_string(),
    })?;

    serde_json::from_str(&body).map_err(|e| PoeditorError::Decode {
        message: e.to_string(),
    })
}

fn export_result(envelope: ResponseEnvelope) -> Result<ExportResult> {
    if !envelope.response.is_success() {
        return Err(remote_error(&envelope));
    }

    let url = envelope
        .download_url()
        .ok_or_else(|| PoeditorError::Decode {
            message: "No download URL in export response".to_string(),
        })?
        .to_string();

    Ok(ExportResult { url })
}

fn remote_error(envelope: &ResponseEnvelope) -> PoeditorError {
    PoeditorError::Remote {
        code: envelope.response.code.clone(),
        status: envelope.response.status.clone(),
        message: envelope.response.message.clone(),
    }
}
