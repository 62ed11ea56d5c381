//! Reporters: output formats for run and analysis results.
//!
//! Four formats: console text, Markdown, self-contained HTML, JSON.

pub mod analysis;
pub mod console;
pub mod html;
pub mod json;
pub mod markdown;
pub mod types;

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ReportError;

pub use analysis::render_analysis;
pub use types::{FileOutcome, RunError, RunReport, RunStats};

/// Output format of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Console,
    Markdown,
    Html,
    Json,
}

impl ReportFormat {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Console => "console",
            Self::Markdown => "markdown",
            Self::Html => "html",
            Self::Json => "json",
        }
    }

    /// Format implied by a report file's extension.
    pub fn from_path(path: &str) -> Option<Self> {
        let ext = Path::new(path).extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "md" | "markdown" => Some(Self::Markdown),
            "html" | "htm" => Some(Self::Html),
            "json" => Some(Self::Json),
            "txt" | "log" => Some(Self::Console),
            _ => None,
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReportFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "console" | "text" => Ok(Self::Console),
            "markdown" | "md" => Ok(Self::Markdown),
            "html" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            other => Err(ReportError::UnknownFormat(other.to_string())),
        }
    }
}

/// Trait for run report generation.
pub trait Reporter: Send + Sync {
    fn name(&self) -> &'static str;
    fn generate(&self, report: &RunReport) -> Result<String, ReportError>;
}

/// Create the reporter for a format. `use_color` only affects console output.
pub fn create_reporter(format: ReportFormat, use_color: bool) -> Box<dyn Reporter> {
    match format {
        ReportFormat::Console => Box::new(console::ConsoleReporter::new(use_color)),
        ReportFormat::Markdown => Box::new(markdown::MarkdownReporter),
        ReportFormat::Html => Box::new(html::HtmlReporter::new()),
        ReportFormat::Json => Box::new(json::JsonReporter),
    }
}

/// List all available reporter format names.
pub fn available_formats() -> &'static [&'static str] {
    &["console", "markdown", "html", "json"]
}

/// Write rendered output to `path`, creating parent directories.
pub fn write_report(path: &Path, content: &str) -> Result<(), ReportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| ReportError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, content).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(ReportFormat::from_path("out/report.md"), Some(ReportFormat::Markdown));
        assert_eq!(ReportFormat::from_path("report.HTML"), Some(ReportFormat::Html));
        assert_eq!(ReportFormat::from_path("report.json"), Some(ReportFormat::Json));
        assert_eq!(ReportFormat::from_path("report"), None);
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("md".parse::<ReportFormat>().unwrap(), ReportFormat::Markdown);
        assert!(matches!(
            "sarif".parse::<ReportFormat>(),
            Err(ReportError::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_every_format_has_a_reporter() {
        for name in available_formats() {
            let format: ReportFormat = name.parse().unwrap();
            assert_eq!(create_reporter(format, false).name(), *name);
        }
    }
}
