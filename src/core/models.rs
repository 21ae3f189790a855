//! POEditor response envelope and operation results

use serde::{Deserialize, Deserializer, Serialize};

/// Response code POEditor uses for success
pub const SUCCESS_CODE: &str = "200";

/// `response` block present in every POEditor answer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseStatus {
    pub status: String,
    #[serde(deserialize_with = "code_as_string")]
    pub code: String,
    pub message: String,
}

impl ResponseStatus {
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }
}

/// Upload term counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TermCounts {
    pub parsed: u64,
    pub added: u64,
    pub deleted: u64,
}

/// `result` block; carries the export URL or the upload counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseResult {
    pub url: Option<String>,
    pub terms: Option<TermCounts>,
}

/// Full POEditor answer. `result` is the v2 shape, `item` the legacy one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseEnvelope {
    pub response: ResponseStatus,
    pub result: Option<ResponseResult>,
    pub item: Option<String>,
}

impl ResponseEnvelope {
    /// Download URL from either API shape
    pub fn download_url(&self) -> Option<&str> {
        self.result
            .as_ref()
            .and_then(|r| r.url.as_deref())
            .or(self.item.as_deref())
            .filter(|url| !url.is_empty())
    }

    pub fn term_counts(&self) -> Option<TermCounts> {
        self.result.as_ref().and_then(|r| r.terms)
    }
}

/// Outcome of a successful upload call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    pub status: String,
    pub message: String,
    pub terms: Option<TermCounts>,
}

/// Outcome of a successful export call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResult {
    pub url: String,
}

/// POEditor sends codes as strings, but tolerate bare numbers
fn code_as_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Text(String),
        Number(i64),
    }

    Ok(match Code::deserialize(deserializer)? {
        Code::Text(code) => code,
        Code::Number(code) => code.to_string(),
    })
}
