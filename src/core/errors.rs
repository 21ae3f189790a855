//! Custom error types for POEditor operations

use thiserror::Error;

/// Errors raised while loading configuration or talking to POEditor
#[derive(Error, Debug)]
pub enum PoeditorError {
    /// Configuration file missing or unreadable
    #[error("File error: {path} - {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid JSON for the expected shape
    #[error("Configuration error: {path} - {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Local file operation failed
    #[error("File error: {path} - {source}")]
    FileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Network error
    #[error("Network error: {message}")]
    Network {
        message: String,
    },

    /// Response body could not be decoded
    #[error("Invalid response: {message}")]
    Decode {
        message: String,
    },

    /// POEditor answered with a non-200 code
    #[error("POEditor error: {code} - {message}")]
    Remote {
        code: String,
        status: String,
        message: String,
    },

    /// Operation not offered by the selected API
    #[error("Operation not supported by this API: {operation}")]
    Unsupported {
        operation: String,
    },

    /// Reqwest error
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

impl PoeditorError {
    /// Message suitable for the per-file failure line
    pub fn remote_message(&self) -> String {
        match self {
            PoeditorError::Remote { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Result type for POEditor operations
pub type Result<T> = std::result::Result<T, PoeditorError>;
