//! Lazy source tree walker.
//!
//! Directories are pruned by the ignore rules before they are entered,
//! candidates are filtered by extension, and unreadable entries surface as
//! errors in the stream instead of aborting it.

use std::path::Path;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Instant;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use walkdir::{DirEntry, WalkDir};

use super::ignores::IgnorePatterns;
use super::types::{ScanOptions, ScanResult, ScanStats, SourceFile};
use crate::errors::ScanError;

/// File system scanner for one root.
pub struct Scanner {
    options: ScanOptions,
    ignores: IgnorePatterns,
    include_globs: GlobSet,
    dirs_skipped: AtomicUsize,
    files_skipped: AtomicUsize,
    total_bytes: AtomicU64,
}

impl Scanner {
    /// Fails if the root is not a directory or a pattern does not compile.
    pub fn new(options: ScanOptions) -> Result<Self, ScanError> {
        if !options.root.is_dir() {
            return Err(ScanError::InvalidRoot {
                path: options.root.clone(),
            });
        }

        let ignores = IgnorePatterns::new(&options.root, &options.extra_ignores)?;

        let mut builder = GlobSetBuilder::new();
        for ext in &options.extensions {
            let pattern = format!("**/*.{}", ext.trim_start_matches('.'));
            let glob = GlobBuilder::new(&pattern)
                .case_insensitive(true)
                .build()
                .map_err(|e| ScanError::InvalidPattern {
                    pattern: pattern.clone(),
                    message: e.to_string(),
                })?;
            builder.add(glob);
        }
        let include_globs = builder.build().map_err(|e| ScanError::InvalidPattern {
            pattern: options.extensions.join(","),
            message: e.to_string(),
        })?;

        Ok(Self {
            options,
            ignores,
            include_globs,
            dirs_skipped: AtomicUsize::new(0),
            files_skipped: AtomicUsize::new(0),
            total_bytes: AtomicU64::new(0),
        })
    }

    pub fn root(&self) -> &Path {
        &self.options.root
    }

    /// Walk the tree lazily, in file-name order.
    pub fn walk(&self) -> impl Iterator<Item = Result<SourceFile, ScanError>> + '_ {
        WalkDir::new(&self.options.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| self.keep(entry))
            .filter_map(move |entry| match entry {
                Ok(entry) => self.visit(&entry),
                Err(err) => {
                    let path = err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| self.options.root.clone());
                    tracing::warn!(path = %path.display(), error = %err, "skipping unreadable entry");
                    Some(Err(ScanError::DirectoryRead {
                        path,
                        message: err.to_string(),
                    }))
                }
            })
    }

    /// Drain [`walk`](Self::walk) into a sorted file list plus stats.
    pub fn collect(&self) -> ScanResult {
        let start = Instant::now();
        let mut files = Vec::new();
        let mut errors = Vec::new();

        for item in self.walk() {
            match item {
                Ok(file) => files.push(file),
                Err(err) => errors.push(err),
            }
        }
        files.sort_by(|a, b| a.relative.cmp(&b.relative));

        let stats = ScanStats {
            files_found: files.len(),
            files_skipped: self.files_skipped.load(Ordering::Relaxed),
            dirs_skipped: self.dirs_skipped.load(Ordering::Relaxed),
            total_bytes: self.total_bytes.load(Ordering::Relaxed),
            duration: start.elapsed(),
        };
        tracing::debug!(
            files = stats.files_found,
            dirs_skipped = stats.dirs_skipped,
            files_skipped = stats.files_skipped,
            "scan complete"
        );

        ScanResult {
            root: self.options.root.clone(),
            files,
            stats,
            errors,
        }
    }

    fn keep(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 {
            return true;
        }
        let relative = entry
            .path()
            .strip_prefix(&self.options.root)
            .unwrap_or(entry.path());
        let is_dir = entry.file_type().is_dir();
        if self.ignores.is_ignored(relative, is_dir) {
            if is_dir {
                self.dirs_skipped.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(path = %relative.display(), "ignored directory");
            }
            return false;
        }
        true
    }

    fn visit(&self, entry: &DirEntry) -> Option<Result<SourceFile, ScanError>> {
        if !entry.file_type().is_file() {
            return None;
        }
        let relative = entry
            .path()
            .strip_prefix(&self.options.root)
            .unwrap_or(entry.path());
        if !self.include_globs.is_match(relative) {
            return None;
        }

        let size = match entry.metadata() {
            Ok(meta) => meta.len(),
            Err(err) => {
                return Some(Err(ScanError::FileRead {
                    path: entry.path().to_path_buf(),
                    source: std::io::Error::other(err.to_string()),
                }))
            }
        };
        if size > self.options.max_file_size {
            self.files_skipped.fetch_add(1, Ordering::Relaxed);
            tracing::warn!(
                path = %relative.display(),
                size,
                limit = self.options.max_file_size,
                "skipping oversized file"
            );
            return None;
        }
        self.total_bytes.fetch_add(size, Ordering::Relaxed);

        Some(Ok(SourceFile {
            path: entry.path().to_path_buf(),
            relative: relative_string(relative),
            size,
        }))
    }
}

/// `/`-separated relative path, stable across platforms.
fn relative_string(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_invalid_root() {
        let err = Scanner::new(ScanOptions::new("/definitely/not/here")).err().unwrap();
        assert!(matches!(err, ScanError::InvalidRoot { .. }));
    }

    #[test]
    fn test_filters_extensions_and_ignores() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "src/App.tsx", "x");
        write(dir.path(), "src/styles.css", "x");
        write(dir.path(), "src/README.md", "x");
        write(dir.path(), "node_modules/lib/index.js", "x");
        write(dir.path(), "src/App.tsx.backup", "x");

        let scanner = Scanner::new(ScanOptions::new(dir.path())).unwrap();
        let result = scanner.collect();
        let names: Vec<_> = result.files.iter().map(|f| f.relative.as_str()).collect();

        assert_eq!(names, vec!["src/App.tsx", "src/styles.css"]);
        assert_eq!(result.stats.dirs_skipped, 1);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_oversized_files_are_counted() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "big.ts", &"a".repeat(64));
        write(dir.path(), "small.ts", "a");

        let mut options = ScanOptions::new(dir.path());
        options.max_file_size = 16;
        let result = Scanner::new(options).unwrap().collect();

        assert_eq!(result.files.len(), 1);
        assert_eq!(result.stats.files_skipped, 1);
    }

    #[test]
    fn test_retintignore_is_honored() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), ".retintignore", "generated/\n");
        write(dir.path(), "generated/theme.ts", "x");
        write(dir.path(), "src/theme.ts", "x");

        let result = Scanner::new(ScanOptions::new(dir.path())).unwrap().collect();
        assert_eq!(result.files.len(), 1);
        assert_eq!(result.files[0].relative, "src/theme.ts");
    }

    #[test]
    fn test_extension_match_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "Legacy.JSX", "x");
        let result = Scanner::new(ScanOptions::new(dir.path()).with_extensions(["jsx"]))
            .unwrap()
            .collect();
        assert_eq!(result.files.len(), 1);
    }
}
