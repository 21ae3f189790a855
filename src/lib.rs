//! POEditor Sync - upload source terms and download translations
//!
//! This library talks to the POEditor translation-management service: it uploads
//! a terms file and downloads one export per configured language, through either
//! the current v2 API or the legacy one.

#![forbid(unsafe_code)]

pub mod cli;
pub mod core;

#[cfg(test)]
mod test_support;

// Re-export key types for convenience
pub use crate::core::{
    client::{PoEditorLegacy, PoEditorV2, TranslationService},
    config::{Configuration, FileEntry, ServiceSettings},
    errors::{PoeditorError, Result},
    fetcher::{Fetch, HttpFetcher},
    models::{ExportResult, ResponseEnvelope, UploadResult},
    runner::{RunMode, RunReport, Runner},
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
