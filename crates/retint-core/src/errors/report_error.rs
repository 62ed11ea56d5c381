//! Reporter errors.

use std::path::PathBuf;

use super::error_code::{self, RetintErrorCode};

/// Errors that can occur while rendering or writing a report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Unknown report format: {0}")]
    UnknownFormat(String),

    #[error("Report serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Cannot write report {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl RetintErrorCode for ReportError {
    fn error_code(&self) -> &'static str {
        error_code::REPORT_ERROR
    }
}
