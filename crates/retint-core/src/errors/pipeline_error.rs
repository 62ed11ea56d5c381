//! Pipeline errors.

use super::error_code::RetintErrorCode;
use super::{ConfigError, ReportError, RewriteError, RuleError, ScanError};

/// Errors that can occur during a codemod run.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),

    #[error("Rewrite error: {0}")]
    Rewrite(#[from] RewriteError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl RetintErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Scan(e) => e.error_code(),
            Self::Rule(e) => e.error_code(),
            Self::Rewrite(e) => e.error_code(),
            Self::Report(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}
