//! Source tree scanner: ignore-aware walk, extension filter, size limit.

pub mod ignores;
pub mod types;
pub mod walker;

pub use ignores::{IgnorePatterns, DEFAULT_IGNORE_DIRS, DEFAULT_IGNORE_FILES, IGNORE_FILE};
pub use types::{ScanOptions, ScanResult, ScanStats, SourceFile};
pub use walker::Scanner;
