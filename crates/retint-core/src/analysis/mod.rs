//! CSS custom-property analysis: definitions, usages, theme awareness.

pub mod analyzer;
pub mod types;

pub use analyzer::{extract_variables, FileVariables, VariableAnalyzer};
pub use types::{AnalysisResult, AnalysisSummary, CompetingStyles, NonThemeAware, VariableUsage};
