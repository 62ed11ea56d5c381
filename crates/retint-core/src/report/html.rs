//! HTML reporter: a single self-contained page with inline CSS.

use super::{Reporter, RunReport};
use crate::errors::ReportError;
use crate::matcher::FindingStatus;

pub struct HtmlReporter {
    pub title: String,
}

impl HtmlReporter {
    pub fn new() -> Self {
        Self {
            title: "CSS Variable Usage Report".to_string(),
        }
    }

    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    fn status_class(status: FindingStatus) -> &'static str {
        match status {
            FindingStatus::Mapped => "status-mapped",
            FindingStatus::Unmapped => "status-unmapped",
            FindingStatus::Dynamic => "status-dynamic",
            FindingStatus::Superseded => "status-superseded",
        }
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Escape text for element content and attribute values.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

impl Reporter for HtmlReporter {
    fn name(&self) -> &'static str {
        "html"
    }

    fn generate(&self, report: &RunReport) -> Result<String, ReportError> {
        let stats = &report.stats;
        let mut html = String::with_capacity(8192);

        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("<meta charset=\"UTF-8\">\n");
        html.push_str(&format!("<title>{}</title>\n", escape_html(&self.title)));
        html.push_str("<style>\n");
        html.push_str(INLINE_CSS);
        html.push_str("</style>\n</head>\n<body>\n<div class=\"container\">\n");
        html.push_str(&format!("<h1>{}</h1>\n", escape_html(&self.title)));

        let modified = if report.dry_run { "would modify" } else { "modified" };
        html.push_str(&format!(
            "<div class=\"summary\"><span>{} mode</span> &middot; {} files scanned &middot; {} {modified} &middot; {} replacements &middot; {} unmapped &middot; {} dynamic &middot; {} errors</div>\n",
            escape_html(report.mode.name()),
            stats.files_scanned,
            stats.files_modified,
            stats.replacements,
            stats.unmapped,
            stats.dynamic,
            stats.errors,
        ));

        if !report.unmapped_tokens.is_empty() {
            html.push_str("<h2>Unmapped tokens</h2>\n<ul class=\"tokens\">\n");
            for token in &report.unmapped_tokens {
                html.push_str(&format!("<li><code>{}</code></li>\n", escape_html(token)));
            }
            html.push_str("</ul>\n");
        }

        for file in &report.files {
            html.push_str(&format!(
                "<h2>{} <span class=\"count\">{} findings</span></h2>\n",
                escape_html(&file.file),
                file.findings.len()
            ));
            if let Some(error) = &file.error {
                html.push_str(&format!(
                    "<p class=\"error\">[{}] {}</p>\n",
                    escape_html(&error.code),
                    escape_html(&error.message)
                ));
            }
            if file.findings.is_empty() {
                continue;
            }
            html.push_str("<table>\n<thead><tr><th>Status</th><th>Line</th><th>Match</th><th>Token</th><th>Replacement</th></tr></thead>\n<tbody>\n");
            for finding in &file.findings {
                html.push_str(&format!(
                    "<tr class=\"{}\"><td>{}</td><td>{}:{}</td><td><code>{}</code></td><td><code>{}</code></td><td>{}</td></tr>\n",
                    Self::status_class(finding.status),
                    finding.status.name(),
                    finding.line,
                    finding.column,
                    escape_html(&finding.matched_text),
                    escape_html(&finding.token),
                    finding
                        .replacement
                        .as_deref()
                        .map(|r| format!("<code>{}</code>", escape_html(r)))
                        .unwrap_or_default(),
                ));
            }
            html.push_str("</tbody>\n</table>\n");
        }

        if !report.errors.is_empty() {
            html.push_str("<h2>Errors</h2>\n<ul>\n");
            for error in &report.errors {
                html.push_str(&format!(
                    "<li class=\"error\"><code>{}</code> [{}] {}</li>\n",
                    escape_html(&error.path),
                    escape_html(&error.code),
                    escape_html(&error.message)
                ));
            }
            html.push_str("</ul>\n");
        }

        html.push_str("</div>\n</body>\n</html>\n");
        Ok(html)
    }
}

const INLINE_CSS: &str = r#"body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", sans-serif; margin: 0; background: #f6f7f9; color: #1f2328; }
.container { max-width: 1100px; margin: 0 auto; padding: 24px; }
h1 { font-size: 1.6rem; }
h2 { font-size: 1.1rem; margin-top: 28px; }
.count { color: #6e7781; font-weight: normal; font-size: 0.9rem; }
.summary { background: #fff; border: 1px solid #d0d7de; border-radius: 6px; padding: 12px 16px; }
table { width: 100%; border-collapse: collapse; background: #fff; }
th, td { text-align: left; padding: 6px 10px; border-bottom: 1px solid #eaeef2; vertical-align: top; }
code { font-family: ui-monospace, SFMono-Regular, Menlo, monospace; font-size: 0.85rem; }
.status-mapped td:first-child { color: #1a7f37; }
.status-unmapped td:first-child { color: #9a6700; }
.status-dynamic td:first-child { color: #0969da; }
.status-superseded td:first-child { color: #6e7781; }
.error { color: #cf222e; }
"#;
