//! Run report types.

use std::collections::BTreeSet;
use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::errors::RetintErrorCode;
use crate::matcher::{Finding, FindingStatus};
use crate::rules::Preset;

/// A non-fatal error recorded during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunError {
    pub path: String,
    pub code: String,
    pub message: String,
}

impl RunError {
    pub fn new<E>(path: impl Into<String>, error: &E) -> Self
    where
        E: RetintErrorCode + Display,
    {
        Self {
            path: path.into(),
            code: error.error_code().to_string(),
            message: error.to_string(),
        }
    }
}

/// What happened to one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOutcome {
    /// Path relative to the scan root.
    pub file: String,
    pub findings: Vec<Finding>,
    pub replacements: usize,
    pub annotations: usize,
    /// Written to disk, or would have been in a dry run.
    pub modified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RunError>,
}

impl FileOutcome {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            ..Self::default()
        }
    }

    pub fn count(&self, status: FindingStatus) -> usize {
        self.findings.iter().filter(|f| f.status == status).count()
    }
}

/// Aggregate counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub files_scanned: usize,
    pub files_with_findings: usize,
    pub files_modified: usize,
    /// Files skipped for size.
    pub files_skipped: usize,
    pub replacements: usize,
    pub annotations: usize,
    pub unmapped: usize,
    pub dynamic: usize,
    pub superseded: usize,
    pub errors: usize,
    pub duration_ms: u64,
}

/// Everything a run produced, built incrementally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub root: String,
    pub mode: Preset,
    pub dry_run: bool,
    pub stats: RunStats,
    /// Distinct tokens that had no mapping.
    pub unmapped_tokens: BTreeSet<String>,
    /// Files with findings or errors, sorted by path.
    pub files: Vec<FileOutcome>,
    pub errors: Vec<RunError>,
}

impl RunReport {
    pub fn new(root: impl Into<String>, mode: Preset, dry_run: bool) -> Self {
        Self {
            root: root.into(),
            mode,
            dry_run,
            stats: RunStats::default(),
            unmapped_tokens: BTreeSet::new(),
            files: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Fold one file's outcome into the counters.
    pub fn record_file(&mut self, outcome: FileOutcome) {
        self.stats.files_scanned += 1;
        self.stats.replacements += outcome.replacements;
        self.stats.annotations += outcome.annotations;
        if outcome.modified {
            self.stats.files_modified += 1;
        }
        if !outcome.findings.is_empty() {
            self.stats.files_with_findings += 1;
        }
        for finding in &outcome.findings {
            match finding.status {
                FindingStatus::Unmapped => {
                    self.stats.unmapped += 1;
                    self.unmapped_tokens.insert(finding.token.clone());
                }
                FindingStatus::Dynamic => self.stats.dynamic += 1,
                FindingStatus::Superseded => self.stats.superseded += 1,
                FindingStatus::Mapped => {}
            }
        }
        if let Some(error) = &outcome.error {
            self.record_error(error.clone());
        }
        if !outcome.findings.is_empty() || outcome.error.is_some() {
            self.files.push(outcome);
        }
    }

    pub fn record_error(&mut self, error: RunError) {
        self.stats.errors += 1;
        self.errors.push(error);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.files.iter().flat_map(|f| f.findings.iter())
    }
}
