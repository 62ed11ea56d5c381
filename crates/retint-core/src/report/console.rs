//! Console reporter: findings grouped by file plus a summary.

use std::fmt::Write as _;

use super::{Reporter, RunReport};
use crate::errors::ReportError;
use crate::matcher::FindingStatus;

pub struct ConsoleReporter {
    pub use_color: bool,
}

impl ConsoleReporter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn status_symbol(status: FindingStatus) -> &'static str {
        match status {
            FindingStatus::Mapped => "✓",
            FindingStatus::Unmapped => "?",
            FindingStatus::Dynamic => "~",
            FindingStatus::Superseded => "-",
        }
    }

    fn color_start(&self, status: FindingStatus) -> &'static str {
        if !self.use_color {
            return "";
        }
        match status {
            FindingStatus::Mapped => "\x1b[32m",     // green
            FindingStatus::Unmapped => "\x1b[33m",   // yellow
            FindingStatus::Dynamic => "\x1b[36m",    // cyan
            FindingStatus::Superseded => "\x1b[90m", // gray
        }
    }

    fn color_end(&self) -> &'static str {
        if self.use_color {
            "\x1b[0m"
        } else {
            ""
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Reporter for ConsoleReporter {
    fn name(&self) -> &'static str {
        "console"
    }

    fn generate(&self, report: &RunReport) -> Result<String, ReportError> {
        let mut out = String::new();
        let ce = self.color_end();

        for file in &report.files {
            let action = match (file.modified, report.dry_run) {
                (true, true) => " (would modify)",
                (true, false) => " (modified)",
                _ => "",
            };
            let _ = writeln!(out, "{}{action}", file.file);
            for finding in &file.findings {
                let cs = self.color_start(finding.status);
                let arrow = finding
                    .replacement
                    .as_deref()
                    .map(|r| format!(" -> {r}"))
                    .unwrap_or_default();
                let _ = writeln!(
                    out,
                    "  {cs}{} {}{ce} {}:{} {}{arrow}",
                    Self::status_symbol(finding.status),
                    finding.status.name(),
                    finding.line,
                    finding.column,
                    finding.matched_text.trim(),
                );
            }
            if let Some(error) = &file.error {
                let _ = writeln!(out, "  [{}] {}", error.code, error.message);
            }
        }

        let stats = &report.stats;
        let modified = if report.dry_run { "would modify" } else { "modified" };
        if !report.files.is_empty() {
            out.push('\n');
        }
        let _ = writeln!(
            out,
            "{} files scanned, {} {modified}, {} replacements, {} unmapped, {} dynamic, {} superseded, {} errors ({} ms)",
            stats.files_scanned,
            stats.files_modified,
            stats.replacements,
            stats.unmapped,
            stats.dynamic,
            stats.superseded,
            stats.errors,
            stats.duration_ms,
        );
        if stats.annotations > 0 {
            let _ = writeln!(out, "{} review markers inserted", stats.annotations);
        }
        if !report.unmapped_tokens.is_empty() {
            let tokens: Vec<&str> = report.unmapped_tokens.iter().map(String::as_str).collect();
            let _ = writeln!(out, "Unmapped tokens: {}", tokens.join(", "));
        }
        for error in &report.errors {
            if !report.files.iter().any(|f| f.error.as_ref() == Some(error)) {
                let _ = writeln!(out, "[{}] {}: {}", error.code, error.path, error.message);
            }
        }

        Ok(out)
    }
}
