//! Rewriter errors.

use std::path::PathBuf;

use super::error_code::{self, RetintErrorCode};

/// Errors that can occur while writing a rewritten file or its backup.
#[derive(Debug, thiserror::Error)]
pub enum RewriteError {
    #[error("Cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot create backup {backup} for {path}: {source}")]
    Backup {
        path: PathBuf,
        backup: PathBuf,
        source: std::io::Error,
    },

    #[error("Backup {backup} does not match the original content of {path}")]
    BackupMismatch { path: PathBuf, backup: PathBuf },
}

impl RetintErrorCode for RewriteError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Write { .. } => error_code::WRITE_ERROR,
            Self::Backup { .. } | Self::BackupMismatch { .. } => error_code::BACKUP_ERROR,
        }
    }
}
