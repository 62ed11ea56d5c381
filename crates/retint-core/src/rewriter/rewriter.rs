//! Applies planned edits to files on disk.

use std::fs;
use std::path::{Path, PathBuf};

use super::backup::{write_backup, BackupNaming};
use super::edits::{plan_edits, EditPlan, UnmappedPolicy};
use crate::config::RewriteConfig;
use crate::errors::RewriteError;
use crate::matcher::Finding;
use crate::rules::RuleSet;

/// Resolved rewrite behavior for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOptions {
    /// Plan and report, never touch the disk.
    pub dry_run: bool,
    /// `None` disables backups.
    pub backup: Option<BackupNaming>,
    pub unmapped: UnmappedPolicy,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self::from_config(&RewriteConfig::default())
    }
}

impl RewriteOptions {
    pub fn from_config(config: &RewriteConfig) -> Self {
        let backup = config.effective_backup().then(|| {
            if config.effective_timestamped_backups() {
                BackupNaming::Timestamped
            } else {
                BackupNaming::Suffix(config.effective_backup_suffix().to_string())
            }
        });
        let unmapped = if config.effective_annotate_unmapped() {
            UnmappedPolicy::Annotate {
                marker: config.effective_review_marker().to_string(),
            }
        } else {
            UnmappedPolicy::Skip
        };
        Self {
            dry_run: config.effective_dry_run(),
            backup,
            unmapped,
        }
    }
}

/// Result of committing one file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Commit {
    pub written: bool,
    pub backup: Option<PathBuf>,
}

/// Stateless per-file rewriter.
#[derive(Debug, Clone, Default)]
pub struct Rewriter {
    options: RewriteOptions,
}

impl Rewriter {
    pub fn new(options: RewriteOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RewriteOptions {
        &self.options
    }

    /// Plan the edits for one file's findings.
    pub fn plan(&self, content: &str, findings: &mut [Finding], rules: &RuleSet) -> EditPlan {
        plan_edits(content, findings, rules, &self.options.unmapped)
    }

    /// Write a plan to `path`, after the backup when one is configured.
    ///
    /// Unchanged plans and dry runs never touch the disk. A failed backup
    /// aborts the write of this file.
    pub fn commit(&self, path: &Path, original: &str, plan: &EditPlan) -> Result<Commit, RewriteError> {
        if !plan.changed || self.options.dry_run {
            return Ok(Commit::default());
        }

        let backup = match &self.options.backup {
            Some(naming) => Some(write_backup(path, original.as_bytes(), naming)?),
            None => None,
        };

        fs::write(path, &plan.content).map_err(|source| RewriteError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Commit {
            written: true,
            backup,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::Matcher;
    use crate::rules::Preset;

    fn rewrite(options: RewriteOptions, path: &Path) -> Result<Commit, RewriteError> {
        let rules = RuleSet::preset(Preset::Classes).unwrap();
        let content = fs::read_to_string(path).unwrap();
        let mut findings = Matcher::new(&rules).find("a.tsx", &content);
        let rewriter = Rewriter::new(options);
        let plan = rewriter.plan(&content, &mut findings, &rules);
        rewriter.commit(path, &content, &plan)
    }

    #[test]
    fn test_options_from_default_config() {
        let options = RewriteOptions::default();
        assert!(!options.dry_run);
        assert_eq!(options.backup, Some(BackupNaming::Suffix(".backup".to_string())));
        assert_eq!(options.unmapped, UnmappedPolicy::Skip);
    }

    #[test]
    fn test_commit_writes_backup_then_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.tsx");
        let original = r#"<div className="bg-[var(--bg-cream)]" />"#;
        fs::write(&file, original).unwrap();

        let commit = rewrite(RewriteOptions::default(), &file).unwrap();
        assert!(commit.written);
        let backup = commit.backup.unwrap();
        assert_eq!(fs::read_to_string(backup).unwrap(), original);
        assert_eq!(
            fs::read_to_string(&file).unwrap(),
            r#"<div className="bg-theme-primary" />"#
        );
    }

    #[test]
    fn test_dry_run_leaves_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.tsx");
        let original = r#"<div className="bg-[var(--bg-cream)]" />"#;
        fs::write(&file, original).unwrap();

        let options = RewriteOptions {
            dry_run: true,
            ..RewriteOptions::default()
        };
        let commit = rewrite(options, &file).unwrap();
        assert!(!commit.written);
        assert_eq!(fs::read_to_string(&file).unwrap(), original);
        assert!(!dir.path().join("a.tsx.backup").exists());
    }

    #[test]
    fn test_no_backup_option() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.tsx");
        fs::write(&file, r#"<p className="text-[var(--text-navy)]" />"#).unwrap();

        let options = RewriteOptions {
            backup: None,
            ..RewriteOptions::default()
        };
        let commit = rewrite(options, &file).unwrap();
        assert!(commit.written);
        assert!(commit.backup.is_none());
        assert!(!dir.path().join("a.tsx.backup").exists());
    }
}
