//! Rendering of [`AnalysisResult`]s.

use std::fmt::Write as _;

use super::html::escape_html;
use super::ReportFormat;
use crate::analysis::AnalysisResult;
use crate::errors::ReportError;

const TOP_USED: usize = 20;

/// Render an analysis in any report format.
pub fn render_analysis(result: &AnalysisResult, format: ReportFormat) -> Result<String, ReportError> {
    match format {
        ReportFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        ReportFormat::Markdown => Ok(markdown(result)),
        ReportFormat::Console => Ok(console(result)),
        ReportFormat::Html => Ok(html(result)),
    }
}

fn markdown(result: &AnalysisResult) -> String {
    let s = &result.summary;
    let mut md = String::with_capacity(4096);

    md.push_str("# CSS Variable Analysis Report\n\n");
    md.push_str("| Metric | Count |\n|---|---|\n");
    for (label, value) in [
        ("Files analyzed", s.files_analyzed),
        ("Variables defined", s.variables_defined),
        ("Variables used", s.variables_used),
        ("Theme-aware", s.theme_aware),
        ("Non-theme-aware", s.non_theme_aware),
        ("Undefined", s.undefined),
        ("Unused", s.unused),
        ("Files needing refactoring", s.files_needing_refactoring),
    ] {
        let _ = writeln!(md, "| {label} | {value} |");
    }
    md.push('\n');

    md.push_str("## Top used variables\n\n");
    for (i, (name, count)) in result.top_used(TOP_USED).iter().enumerate() {
        let _ = writeln!(md, "{}. `{name}` - used {count} times", i + 1);
    }
    md.push('\n');

    if !result.non_theme_aware.is_empty() {
        let _ = writeln!(
            md,
            "## Non-theme-aware variables (outside `{}`)\n",
            result.theme_prefix
        );
        md.push_str("| Variable | Uses | Files | Suggestion |\n|---|---|---|---|\n");
        for item in &result.non_theme_aware {
            let suggestion = item
                .suggestion
                .as_deref()
                .map(|s| format!("`{s}`"))
                .unwrap_or_else(|| "no direct replacement".to_string());
            let _ = writeln!(
                md,
                "| `{}` | {} | {} | {suggestion} |",
                item.variable,
                item.count,
                item.files.len()
            );
        }
        md.push('\n');
    }

    if !result.undefined.is_empty() {
        md.push_str("## Undefined variables\n\n");
        for name in &result.undefined {
            let files: Vec<&str> = result
                .used
                .get(name)
                .map(|u| u.files.iter().map(String::as_str).collect())
                .unwrap_or_default();
            let _ = writeln!(md, "- `{name}` in {}", files.join(", "));
        }
        md.push('\n');
    }

    if !result.unused.is_empty() {
        md.push_str("## Unused definitions\n\n");
        for name in &result.unused {
            let _ = writeln!(md, "- `{name}`");
        }
        md.push('\n');
    }

    if !result.competing_styles.is_empty() {
        md.push_str("## Competing light/dark styles\n\n");
        for item in &result.competing_styles {
            let _ = writeln!(md, "- {} ({} instances)", item.file, item.count);
            for example in &item.examples {
                let _ = writeln!(md, "  - `{example}`");
            }
        }
        md.push('\n');
    }

    if !result.errors.is_empty() {
        md.push_str("## Errors\n\n");
        for error in &result.errors {
            let _ = writeln!(md, "- `{}` [{}] {}", error.path, error.code, error.message);
        }
    }
    md
}

fn console(result: &AnalysisResult) -> String {
    let s = &result.summary;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} files, {} variables used ({} theme-aware, {} non-theme-aware), {} undefined, {} unused",
        s.files_analyzed, s.variables_used, s.theme_aware, s.non_theme_aware, s.undefined, s.unused
    );
    for item in &result.non_theme_aware {
        match &item.suggestion {
            Some(suggestion) => {
                let _ = writeln!(out, "  {} -> {suggestion} ({} uses)", item.variable, item.count);
            }
            None => {
                let _ = writeln!(out, "  {} (no direct replacement, {} uses)", item.variable, item.count);
            }
        }
    }
    for name in &result.undefined {
        let _ = writeln!(out, "  undefined: {name}");
    }
    out
}

fn html(result: &AnalysisResult) -> String {
    let s = &result.summary;
    let mut html = String::with_capacity(4096);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n");
    html.push_str("<title>CSS Variable Analysis Report</title>\n</head>\n<body>\n");
    html.push_str("<h1>CSS Variable Analysis Report</h1>\n");
    html.push_str(&format!(
        "<p>{} files &middot; {} variables used &middot; {} non-theme-aware &middot; {} undefined</p>\n",
        s.files_analyzed, s.variables_used, s.non_theme_aware, s.undefined
    ));
    html.push_str("<table>\n<thead><tr><th>Variable</th><th>Uses</th><th>Suggestion</th></tr></thead>\n<tbody>\n");
    for item in &result.non_theme_aware {
        html.push_str(&format!(
            "<tr><td><code>{}</code></td><td>{}</td><td>{}</td></tr>\n",
            escape_html(&item.variable),
            item.count,
            item.suggestion.as_deref().map(escape_html).unwrap_or_default()
        ));
    }
    html.push_str("</tbody>\n</table>\n</body>\n</html>\n");
    html
}
