//! Backups of files before they are rewritten.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use xxhash_rust::xxh3::xxh3_64;

use crate::errors::RewriteError;

/// How backup files are named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupNaming {
    /// `<file><suffix>`, e.g. `Button.tsx.backup`. Overwritten on each run.
    Suffix(String),
    /// `<file>.<UTC timestamp>.bak`; every run keeps its own copy.
    Timestamped,
}

impl BackupNaming {
    pub fn backup_path(&self, path: &Path) -> PathBuf {
        let mut name = path.as_os_str().to_os_string();
        match self {
            Self::Suffix(suffix) => name.push(suffix),
            Self::Timestamped => {
                name.push(format!(".{}.bak", Utc::now().format("%Y-%m-%dT%H-%M-%S%.3fZ")));
            }
        }
        PathBuf::from(name)
    }

    /// Gitignore-style pattern matching the backups this naming produces.
    pub fn ignore_pattern(&self) -> String {
        match self {
            Self::Suffix(suffix) => format!("*{suffix}"),
            Self::Timestamped => "*.bak".to_string(),
        }
    }
}

/// Write `original` next to `path` and verify the copy by content hash.
pub fn write_backup(
    path: &Path,
    original: &[u8],
    naming: &BackupNaming,
) -> Result<PathBuf, RewriteError> {
    let backup = naming.backup_path(path);

    fs::write(&backup, original).map_err(|source| RewriteError::Backup {
        path: path.to_path_buf(),
        backup: backup.clone(),
        source,
    })?;

    let written = fs::read(&backup).map_err(|source| RewriteError::Backup {
        path: path.to_path_buf(),
        backup: backup.clone(),
        source,
    })?;
    if xxh3_64(&written) != xxh3_64(original) || written.len() != original.len() {
        return Err(RewriteError::BackupMismatch {
            path: path.to_path_buf(),
            backup,
        });
    }

    tracing::debug!(path = %path.display(), backup = %backup.display(), "backup written");
    Ok(backup)
}
