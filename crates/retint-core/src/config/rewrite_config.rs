//! Rewriter configuration.

use serde::{Deserialize, Serialize};

pub const DEFAULT_BACKUP_SUFFIX: &str = ".backup";
pub const DEFAULT_REVIEW_MARKER: &str = "/* retint: review {token} */";

/// Configuration for in-place rewriting.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RewriteConfig {
    /// Report findings without touching any file. Default: false.
    pub dry_run: Option<bool>,
    /// Save an unmodified copy before writing. Default: true.
    pub backup: Option<bool>,
    /// Name backups `<file>.<timestamp>.bak` instead of using the suffix.
    pub timestamped_backups: Option<bool>,
    /// Suffix appended to backup copies. Default: `.backup`.
    pub backup_suffix: Option<String>,
    /// Insert a review marker after unmapped tokens. Default: false.
    pub annotate_unmapped: Option<bool>,
    /// Marker template; `{token}` is replaced with the unmapped token.
    pub review_marker: Option<String>,
}

impl RewriteConfig {
    pub fn effective_dry_run(&self) -> bool {
        self.dry_run.unwrap_or(false)
    }

    pub fn effective_backup(&self) -> bool {
        self.backup.unwrap_or(true)
    }

    pub fn effective_timestamped_backups(&self) -> bool {
        self.timestamped_backups.unwrap_or(false)
    }

    pub fn effective_backup_suffix(&self) -> &str {
        self.backup_suffix.as_deref().unwrap_or(DEFAULT_BACKUP_SUFFIX)
    }

    pub fn effective_annotate_unmapped(&self) -> bool {
        self.annotate_unmapped.unwrap_or(false)
    }

    pub fn effective_review_marker(&self) -> &str {
        self.review_marker.as_deref().unwrap_or(DEFAULT_REVIEW_MARKER)
    }
}
