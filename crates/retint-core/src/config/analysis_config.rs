//! Variable analysis configuration.

use serde::{Deserialize, Serialize};

pub const DEFAULT_THEME_PREFIX: &str = "--theme-";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Prefix that marks a custom property as theme-aware.
    pub theme_prefix: Option<String>,
}

impl AnalysisConfig {
    pub fn effective_theme_prefix(&self) -> &str {
        self.theme_prefix.as_deref().unwrap_or(DEFAULT_THEME_PREFIX)
    }
}
