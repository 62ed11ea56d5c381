//! Report configuration.

use serde::{Deserialize, Serialize};

use crate::report::ReportFormat;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ReportConfig {
    /// Output format. Default: inferred from `path`, else console.
    pub format: Option<ReportFormat>,
    /// Write the report to this file instead of stdout.
    pub path: Option<String>,
    /// ANSI colors in console output. Default: true.
    pub color: Option<bool>,
}

impl ReportConfig {
    /// Explicit format, else the one implied by the report path extension,
    /// else console.
    pub fn effective_format(&self) -> ReportFormat {
        self.format
            .or_else(|| self.path.as_deref().and_then(ReportFormat::from_path))
            .unwrap_or(ReportFormat::Console)
    }

    pub fn effective_color(&self) -> bool {
        self.color.unwrap_or(true)
    }
}
