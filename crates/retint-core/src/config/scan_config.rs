//! Scanner configuration.

use serde::{Deserialize, Serialize};

/// Extensions scanned when none are configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx", "css", "scss"];

/// Files above this size are skipped. Default: 5 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// Configuration for the file scanner.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScanConfig {
    /// File extensions to scan, without the leading dot.
    pub extensions: Vec<String>,
    /// Additional gitignore-style patterns to exclude (beyond defaults).
    pub extra_ignore: Vec<String>,
    /// Maximum file size in bytes.
    pub max_file_size: Option<u64>,
    /// Worker threads. 0 = rayon default.
    pub threads: Option<usize>,
}

impl ScanConfig {
    /// Returns the configured extensions, or [`DEFAULT_EXTENSIONS`].
    pub fn effective_extensions(&self) -> Vec<String> {
        if self.extensions.is_empty() {
            DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect()
        } else {
            self.extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_string())
                .collect()
        }
    }

    pub fn effective_max_file_size(&self) -> u64 {
        self.max_file_size.unwrap_or(DEFAULT_MAX_FILE_SIZE)
    }

    pub fn effective_threads(&self) -> usize {
        self.threads.unwrap_or(0)
    }
}
