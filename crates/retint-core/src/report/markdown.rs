//! Markdown reporter, one section per file.

use std::fmt::Write as _;

use super::{Reporter, RunReport};
use crate::errors::ReportError;

pub struct MarkdownReporter;

impl Reporter for MarkdownReporter {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn generate(&self, report: &RunReport) -> Result<String, ReportError> {
        let stats = &report.stats;
        let total: usize = report.files.iter().map(|f| f.findings.len()).sum();
        let mut md = String::with_capacity(4096);

        md.push_str("# CSS Variable Usage Report\n\n");
        let _ = writeln!(
            md,
            "Found {total} CSS variable usages across {} files.\n",
            stats.files_with_findings
        );

        md.push_str("| Metric | Count |\n|---|---|\n");
        let verb = if report.dry_run { "Files to modify" } else { "Files modified" };
        for (label, value) in [
            ("Mode", report.mode.to_string()),
            ("Files scanned", stats.files_scanned.to_string()),
            (verb, stats.files_modified.to_string()),
            ("Replacements", stats.replacements.to_string()),
            ("Unmapped", stats.unmapped.to_string()),
            ("Dynamic", stats.dynamic.to_string()),
            ("Superseded", stats.superseded.to_string()),
            ("Errors", stats.errors.to_string()),
        ] {
            let _ = writeln!(md, "| {label} | {value} |");
        }
        md.push('\n');

        if !report.unmapped_tokens.is_empty() {
            md.push_str("## Unmapped tokens\n\n");
            for token in &report.unmapped_tokens {
                let _ = writeln!(md, "- `{token}`");
            }
            md.push('\n');
        }

        for file in &report.files {
            let _ = writeln!(md, "## {} ({} findings)\n", file.file, file.findings.len());
            if let Some(error) = &file.error {
                let _ = writeln!(md, "> **{}**: {}\n", error.code, error.message);
            }
            for finding in &file.findings {
                let _ = writeln!(md, "- Line {}: `{}`", finding.line, finding.matched_text);
                let _ = writeln!(md, "  - Line content: `{}`", finding.context);
                let _ = writeln!(
                    md,
                    "  - Variable: {} ({}, {})",
                    finding.token,
                    finding.usage,
                    finding.status.name()
                );
                match &finding.replacement {
                    Some(replacement) => {
                        let _ = writeln!(md, "  - Suggested replacement: `{replacement}`\n");
                    }
                    None => md.push('\n'),
                }
            }
        }

        if !report.errors.is_empty() {
            md.push_str("## Errors\n\n");
            for error in &report.errors {
                let _ = writeln!(md, "- `{}` [{}] {}", error.path, error.code, error.message);
            }
        }

        Ok(md)
    }
}
