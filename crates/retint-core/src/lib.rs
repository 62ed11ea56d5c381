//! retint-core: theme migration codemod for CSS variables and Tailwind classes.
//!
//! The pipeline is `scanner` (ignore-aware walk) -> `matcher` (ordered
//! regex rules producing findings) -> `rewriter` (non-overlapping edits,
//! backups, in-place writes) -> `report` (console, Markdown, HTML, JSON).
//! `analysis` inventories custom-property definitions and usages without
//! rewriting anything.
//!
//! ```ignore
//! let config = RetintConfig::load(root, None, None)?;
//! let report = Codemod::from_config(root, &config)?.run()?;
//! ```

pub mod analysis;
pub mod config;
pub mod errors;
pub mod matcher;
pub mod pipeline;
pub mod report;
pub mod rewriter;
pub mod rules;
pub mod scanner;
pub mod tracing;

pub use analysis::{AnalysisResult, VariableAnalyzer};
pub use config::{CliOverrides, RetintConfig};
pub use errors::{PipelineError, RetintErrorCode};
pub use matcher::{Finding, FindingStatus, Matcher};
pub use pipeline::Codemod;
pub use report::{create_reporter, render_analysis, ReportFormat, Reporter, RunReport};
pub use rewriter::{BackupNaming, RewriteOptions, Rewriter, UnmappedPolicy};
pub use rules::{MappingTable, MappingTarget, Preset, Rule, RuleSet, RuleSetBuilder};
pub use scanner::{ScanOptions, Scanner, SourceFile};
