//! Variable inventory types.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::report::RunError;

/// Where and how often a variable is used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableUsage {
    pub count: usize,
    pub files: BTreeSet<String>,
}

/// A used variable outside the theme namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonThemeAware {
    pub variable: String,
    pub count: usize,
    pub files: BTreeSet<String>,
    /// Theme-aware variable to migrate to, when one is known.
    pub suggestion: Option<String>,
}

/// A file that styles the same property for light and dark mode with
/// arbitrary values instead of one theme-aware variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetingStyles {
    pub file: String,
    pub count: usize,
    /// Up to three matched snippets.
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub files_analyzed: usize,
    pub variables_defined: usize,
    pub variables_used: usize,
    pub theme_aware: usize,
    pub non_theme_aware: usize,
    pub undefined: usize,
    pub unused: usize,
    pub files_needing_refactoring: usize,
}

/// Result of analyzing a tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub root: String,
    pub theme_prefix: String,
    pub summary: AnalysisSummary,
    /// Variable -> stylesheets defining it.
    pub defined: BTreeMap<String, BTreeSet<String>>,
    pub used: BTreeMap<String, VariableUsage>,
    /// Used but never defined in a scanned stylesheet.
    pub undefined: Vec<String>,
    /// Defined but never used.
    pub unused: Vec<String>,
    pub non_theme_aware: Vec<NonThemeAware>,
    /// File -> number of distinct variables it uses.
    pub per_file: BTreeMap<String, usize>,
    pub competing_styles: Vec<CompetingStyles>,
    pub errors: Vec<RunError>,
}

impl AnalysisResult {
    /// Most used variables, by count then name.
    pub fn top_used(&self, limit: usize) -> Vec<(&str, usize)> {
        let mut top: Vec<(&str, usize)> = self
            .used
            .iter()
            .map(|(name, usage)| (name.as_str(), usage.count))
            .collect();
        top.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        top.truncate(limit);
        top
    }
}
