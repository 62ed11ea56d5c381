//! Ignore patterns for source trees.
//!
//! Dependency, build and cache directories are never scanned, and neither
//! are backup artifacts, so a second run cannot rewrite its own backups.

use std::path::Path;

use ignore::gitignore::{Gitignore, GitignoreBuilder};

use crate::errors::ScanError;

/// Project-local ignore file, gitignore syntax.
pub const IGNORE_FILE: &str = ".retintignore";

/// Directories always ignored.
pub const DEFAULT_IGNORE_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    ".next",
    "dist",
    "build",
    "out",
    "coverage",
    ".turbo",
    ".vercel",
    ".cache",
];

/// Backup artifacts written by this tool and by the legacy scripts.
pub const DEFAULT_IGNORE_FILES: &[&str] = &["*.bak", "*.backup", "*.theme-backup"];

/// Compiled ignore matcher for one scan root.
pub struct IgnorePatterns {
    gitignore: Gitignore,
}

impl IgnorePatterns {
    /// Default directories, then `extra_patterns`, then `.retintignore` and
    /// `.gitignore` from `root` when present, then the backup patterns.
    ///
    /// Later patterns win, so a project may re-include a default directory
    /// with `!dist` but can never re-include a backup artifact.
    /// An invalid extra pattern is an error; unreadable ignore files are
    /// logged and skipped.
    pub fn new(root: &Path, extra_patterns: &[String]) -> Result<Self, ScanError> {
        let mut builder = GitignoreBuilder::new(root);

        for pattern in DEFAULT_IGNORE_DIRS {
            add_line(&mut builder, pattern)?;
        }
        for pattern in extra_patterns {
            add_line(&mut builder, pattern)?;
        }

        for file in [IGNORE_FILE, ".gitignore"] {
            let path = root.join(file);
            if path.is_file() {
                if let Some(err) = builder.add(&path) {
                    tracing::warn!(path = %path.display(), error = %err, "skipping unreadable ignore file");
                }
            }
        }

        for pattern in DEFAULT_IGNORE_FILES {
            add_line(&mut builder, pattern)?;
        }

        let gitignore = builder.build().map_err(|e| ScanError::InvalidPattern {
            pattern: "<ignore set>".to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { gitignore })
    }

    /// Whether `relative` (relative to the scan root) or any of its parents
    /// is ignored.
    pub fn is_ignored(&self, relative: &Path, is_dir: bool) -> bool {
        self.gitignore
            .matched_path_or_any_parents(relative, is_dir)
            .is_ignore()
    }
}

fn add_line(builder: &mut GitignoreBuilder, pattern: &str) -> Result<(), ScanError> {
    builder
        .add_line(None, pattern)
        .map(|_| ())
        .map_err(|e| ScanError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })
}
