//! Scanner errors.

use std::path::PathBuf;

use super::error_code::{self, RetintErrorCode};

/// Errors that can occur while walking the tree or reading a file.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Scan root does not exist or is not a directory: {path}")]
    InvalidRoot { path: PathBuf },

    #[error("Cannot read directory {path}: {message}")]
    DirectoryRead { path: PathBuf, message: String },

    #[error("Cannot read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid scan pattern {pattern}: {message}")]
    InvalidPattern { pattern: String, message: String },
}

impl RetintErrorCode for ScanError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::FileRead { .. } => error_code::READ_ERROR,
            _ => error_code::SCAN_ERROR,
        }
    }
}

impl ScanError {
    /// The path the error refers to, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::InvalidRoot { path }
            | Self::DirectoryRead { path, .. }
            | Self::FileRead { path, .. } => Some(path),
            Self::InvalidPattern { .. } => None,
        }
    }
}
