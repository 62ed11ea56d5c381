//! Scanner types.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::scan_config::{DEFAULT_EXTENSIONS, DEFAULT_MAX_FILE_SIZE};
use crate::config::ScanConfig;
use crate::errors::ScanError;

/// Resolved options for one scan.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Root directory to scan.
    pub root: PathBuf,
    /// Extensions to include, without the leading dot.
    pub extensions: Vec<String>,
    /// Additional gitignore-style patterns to exclude.
    pub extra_ignores: Vec<String>,
    /// Files above this size in bytes are skipped.
    pub max_file_size: u64,
}

impl ScanOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            extra_ignores: Vec::new(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }

    pub fn from_config(root: impl Into<PathBuf>, config: &ScanConfig) -> Self {
        Self {
            root: root.into(),
            extensions: config.effective_extensions(),
            extra_ignores: config.extra_ignore.clone(),
            max_file_size: config.effective_max_file_size(),
        }
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_ignore(mut self, pattern: impl Into<String>) -> Self {
        self.extra_ignores.push(pattern.into());
        self
    }
}

/// A candidate source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    /// Absolute (or root-joined) path used for I/O.
    pub path: PathBuf,
    /// Path relative to the scan root, `/`-separated.
    pub relative: String,
    /// Size in bytes at scan time.
    pub size: u64,
}

impl SourceFile {
    /// Lowercased extension without the dot.
    pub fn extension(&self) -> Option<String> {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
    }

    /// Whether this is a stylesheet, where custom properties are defined.
    pub fn is_stylesheet(&self) -> bool {
        matches!(
            self.extension().as_deref(),
            Some("css" | "scss" | "sass" | "less")
        )
    }
}

/// Statistics about a scan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanStats {
    /// Candidate files found.
    pub files_found: usize,
    /// Files skipped for exceeding the size limit.
    pub files_skipped: usize,
    /// Directories pruned by ignore rules.
    pub dirs_skipped: usize,
    /// Total bytes across candidate files.
    pub total_bytes: u64,
    #[serde(with = "duration_millis")]
    pub duration: Duration,
}

/// Result of draining a scan.
#[derive(Debug)]
pub struct ScanResult {
    pub root: PathBuf,
    /// Candidate files, sorted by relative path.
    pub files: Vec<SourceFile>,
    pub stats: ScanStats,
    /// Non-fatal errors (unreadable directories or entries).
    pub errors: Vec<ScanError>,
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (duration.as_millis() as u64).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
