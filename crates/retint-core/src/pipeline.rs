//! The codemod run: scan, match, rewrite, report.

use std::fs;
use std::path::Path;
use std::time::Instant;

use rayon::prelude::*;

use crate::config::RetintConfig;
use crate::errors::{ConfigError, PipelineError, ScanError};
use crate::matcher::{Finding, FindingStatus, Matcher};
use crate::report::{FileOutcome, RunError, RunReport};
use crate::rewriter::{EditPlan, RewriteOptions, Rewriter};
use crate::rules::{Preset, RuleSet};
use crate::scanner::{ScanOptions, Scanner, SourceFile};

/// One configured codemod run over a directory tree.
///
/// Files are processed independently on a rayon pool; outcomes are sorted
/// by relative path before they reach the report, so the report does not
/// depend on the thread count.
pub struct Codemod {
    mode: Preset,
    rules: RuleSet,
    scan: ScanOptions,
    rewriter: Rewriter,
    threads: usize,
}

impl Codemod {
    pub fn new(scan: ScanOptions, mode: Preset, rules: RuleSet, rewrite: RewriteOptions) -> Self {
        Self {
            mode,
            rules,
            scan,
            rewriter: Rewriter::new(rewrite),
            threads: 0,
        }
    }

    /// Build from resolved configuration. Backup files of the configured
    /// naming are excluded from the scan.
    pub fn from_config(root: &Path, config: &RetintConfig) -> Result<Self, PipelineError> {
        let mode = config.effective_mode();
        let rules = RuleSet::preset_with_mappings(mode, &config.mappings)?;
        let rewrite = RewriteOptions::from_config(&config.rewrite);

        let mut scan = ScanOptions::from_config(root, &config.scan);
        if let Some(naming) = &rewrite.backup {
            scan.extra_ignores.push(naming.ignore_pattern());
        }

        Ok(Self::new(scan, mode, rules, rewrite).with_threads(config.scan.effective_threads()))
    }

    /// Worker threads. 0 = rayon default.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn root(&self) -> &Path {
        &self.scan.root
    }

    /// Run over the whole tree. Only setup failures are returned as errors;
    /// per-file failures are recorded in the report.
    pub fn run(&self) -> Result<RunReport, PipelineError> {
        let start = Instant::now();
        let scanner = Scanner::new(self.scan.clone())?;
        let scan = scanner.collect();

        let mut report = RunReport::new(
            self.scan.root.display().to_string(),
            self.mode,
            self.rewriter.options().dry_run,
        );
        report.stats.files_skipped = scan.stats.files_skipped;
        for err in &scan.errors {
            report.record_error(RunError::new(error_path(err), err));
        }

        for outcome in self.process_all(&scan.files)? {
            report.record_file(outcome);
        }
        report.stats.duration_ms = start.elapsed().as_millis() as u64;

        let stats = &report.stats;
        tracing::info!(
            mode = %self.mode,
            dry_run = report.dry_run,
            files = stats.files_scanned,
            modified = stats.files_modified,
            replacements = stats.replacements,
            unmapped = stats.unmapped,
            dynamic = stats.dynamic,
            errors = stats.errors,
            duration_ms = stats.duration_ms,
            "run complete"
        );
        Ok(report)
    }

    fn process_all(&self, files: &[SourceFile]) -> Result<Vec<FileOutcome>, PipelineError> {
        let work = || {
            files
                .par_iter()
                .map(|file| self.process_file(file))
                .collect::<Vec<_>>()
        };

        let mut outcomes = if self.threads > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.threads)
                .build()
                .map_err(|e| ConfigError::InvalidValue {
                    field: "scan.threads".to_string(),
                    message: e.to_string(),
                })?;
            pool.install(work)
        } else {
            work()
        };

        outcomes.sort_by(|a, b| a.file.cmp(&b.file));
        Ok(outcomes)
    }

    /// Read, match, plan and commit one file. Never fails: errors end up
    /// on the outcome.
    pub fn process_file(&self, file: &SourceFile) -> FileOutcome {
        let mut outcome = FileOutcome::new(file.relative.clone());

        let content = match fs::read_to_string(&file.path) {
            Ok(content) => content,
            Err(source) => {
                let err = ScanError::FileRead {
                    path: file.path.clone(),
                    source,
                };
                tracing::warn!(path = %file.relative, error = %err, "skipping unreadable file");
                outcome.error = Some(RunError::new(file.relative.clone(), &err));
                return outcome;
            }
        };

        let (findings, plan) = self.process_source(&file.relative, &content);
        for finding in findings.iter().filter(|f| f.status == FindingStatus::Unmapped) {
            tracing::warn!(
                file = %finding.file,
                line = finding.line,
                token = %finding.token,
                "no mapping for token"
            );
        }

        match self.rewriter.commit(&file.path, &content, &plan) {
            Ok(commit) => {
                outcome.replacements = plan.replacements;
                outcome.annotations = plan.annotations;
                outcome.modified = commit.written || (plan.changed && self.rewriter.options().dry_run);
                outcome.backup = commit.backup.map(|p| p.display().to_string());
                if commit.written {
                    tracing::info!(
                        path = %file.relative,
                        replacements = plan.replacements,
                        "rewrote file"
                    );
                } else if plan.changed {
                    tracing::info!(
                        path = %file.relative,
                        replacements = plan.replacements,
                        "would rewrite file (dry run)"
                    );
                }
            }
            Err(err) => {
                tracing::error!(path = %file.relative, error = %err, "write failed");
                outcome.error = Some(RunError::new(file.relative.clone(), &err));
            }
        }

        outcome.findings = findings;
        outcome
    }

    /// Match and plan in memory, without touching the disk.
    pub fn process_source(&self, relative: &str, content: &str) -> (Vec<Finding>, EditPlan) {
        let mut findings = Matcher::new(&self.rules).find(relative, content);
        let plan = self.rewriter.plan(content, &mut findings, &self.rules);
        (findings, plan)
    }
}

fn error_path(err: &ScanError) -> String {
    err.path()
        .map(|p| p.display().to_string())
        .unwrap_or_default()
}
