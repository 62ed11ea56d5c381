//! Custom-property inventory across a source tree.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;

use once_cell::sync::Lazy;
use rayon::prelude::*;
use regex::Regex;

use super::types::{AnalysisResult, AnalysisSummary, CompetingStyles, NonThemeAware};
use crate::config::AnalysisConfig;
use crate::errors::{RuleError, ScanError};
use crate::report::RunError;
use crate::rules::{MappingTable, MappingTarget, Preset};
use crate::scanner::SourceFile;

/// `--name:` at the start of a declaration.
static DEFINITION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)(?:^|[\s{;])(?P<name>--[A-Za-z0-9_-]+)\s*:").expect("valid regex")
});

/// `var(--name ...)` or Tailwind shorthand `[--name]`.
static USAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"var\(\s*(?P<var>--[A-Za-z0-9_-]+)|\[(?P<short>--[A-Za-z0-9_-]+)\]")
        .expect("valid regex")
});

/// Same property styled twice, once under `dark:`.
static COMPETING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?P<light>bg|text|border|shadow)-\[[^\]]+\]\s+dark:(?P<dark>bg|text|border|shadow)-\[[^\]]+\]",
    )
    .expect("valid regex")
});

static COMPETING_GRADIENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"bg-gradient-to-\w+\s+from-\S+\s+to-\S+\s+dark:bg-gradient").expect("valid regex")
});

const MAX_EXAMPLES: usize = 3;

/// Variables found in one file.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FileVariables {
    pub defined: Vec<String>,
    /// One entry per occurrence.
    pub used: Vec<String>,
    pub competing: Vec<String>,
}

/// Extract definitions (stylesheets only), usages and competing
/// light/dark styles (JSX/TSX only) from one file's content.
pub fn extract_variables(content: &str, stylesheet: bool, jsx: bool) -> FileVariables {
    let defined = if stylesheet {
        DEFINITION
            .captures_iter(content)
            .filter_map(|c| c.name("name").map(|m| m.as_str().to_string()))
            .collect()
    } else {
        Vec::new()
    };

    let used = USAGE
        .captures_iter(content)
        .filter_map(|c| c.name("var").or_else(|| c.name("short")))
        .map(|m| m.as_str().to_string())
        .collect();

    let competing = if jsx {
        COMPETING
            .captures_iter(content)
            .filter(|c| c.name("light").map(|m| m.as_str()) == c.name("dark").map(|m| m.as_str()))
            .filter_map(|c| c.get(0).map(|m| m.as_str().to_string()))
            .chain(
                COMPETING_GRADIENT
                    .find_iter(content)
                    .map(|m| m.as_str().to_string()),
            )
            .collect()
    } else {
        Vec::new()
    };

    FileVariables {
        defined,
        used,
        competing,
    }
}

/// Builds an [`AnalysisResult`] from scanned files.
pub struct VariableAnalyzer {
    theme_prefix: String,
    suggestions: MappingTable,
}

impl VariableAnalyzer {
    /// Suggestions come from the `variables` preset plus any configured
    /// variable-to-variable mappings.
    pub fn new(
        config: &AnalysisConfig,
        extra: &BTreeMap<String, MappingTarget>,
    ) -> Result<Self, RuleError> {
        let var_to_var: BTreeMap<String, MappingTarget> = extra
            .iter()
            .filter(|(k, v)| k.starts_with("--") && v.value().starts_with("--"))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        let suggestions = Preset::Variables.mappings()?.merged(&var_to_var)?;
        Ok(Self {
            theme_prefix: config.effective_theme_prefix().to_string(),
            suggestions,
        })
    }

    pub fn analyze(&self, root: &str, files: &[SourceFile]) -> AnalysisResult {
        let extracted: Vec<(String, Result<FileVariables, ScanError>)> = files
            .par_iter()
            .map(|file| {
                let vars = fs::read_to_string(&file.path)
                    .map(|content| {
                        let jsx = matches!(file.extension().as_deref(), Some("jsx" | "tsx"));
                        extract_variables(&content, file.is_stylesheet(), jsx)
                    })
                    .map_err(|source| ScanError::FileRead {
                        path: file.path.clone(),
                        source,
                    });
                (file.relative.clone(), vars)
            })
            .collect();

        let mut result = AnalysisResult {
            root: root.to_string(),
            theme_prefix: self.theme_prefix.clone(),
            ..AnalysisResult::default()
        };

        for (file, vars) in extracted {
            let vars = match vars {
                Ok(vars) => vars,
                Err(err) => {
                    tracing::warn!(path = %file, error = %err, "skipping unreadable file");
                    result.errors.push(RunError::new(file, &err));
                    continue;
                }
            };
            result.summary.files_analyzed += 1;

            for name in vars.defined {
                result.defined.entry(name).or_default().insert(file.clone());
            }
            let distinct: BTreeSet<&String> = vars.used.iter().collect();
            if !distinct.is_empty() {
                result.per_file.insert(file.clone(), distinct.len());
            }
            for name in &vars.used {
                let usage = result.used.entry(name.clone()).or_default();
                usage.count += 1;
                usage.files.insert(file.clone());
            }
            if !vars.competing.is_empty() {
                result.competing_styles.push(CompetingStyles {
                    file: file.clone(),
                    count: vars.competing.len(),
                    examples: vars.competing.into_iter().take(MAX_EXAMPLES).collect(),
                });
            }
        }

        result.undefined = result
            .used
            .keys()
            .filter(|name| !result.defined.contains_key(*name))
            .cloned()
            .collect();
        result.unused = result
            .defined
            .keys()
            .filter(|name| !result.used.contains_key(*name))
            .cloned()
            .collect();
        result.non_theme_aware = result
            .used
            .iter()
            .filter(|(name, _)| !name.starts_with(&self.theme_prefix))
            .map(|(name, usage)| NonThemeAware {
                variable: name.clone(),
                count: usage.count,
                files: usage.files.clone(),
                suggestion: self.suggestions.get(name).map(|t| t.value().to_string()),
            })
            .collect();

        let refactor_files: BTreeSet<&String> =
            result.non_theme_aware.iter().flat_map(|n| n.files.iter()).collect();
        result.summary = AnalysisSummary {
            files_analyzed: result.summary.files_analyzed,
            variables_defined: result.defined.len(),
            variables_used: result.used.len(),
            theme_aware: result.used.len() - result.non_theme_aware.len(),
            non_theme_aware: result.non_theme_aware.len(),
            undefined: result.undefined.len(),
            unused: result.unused.len(),
            files_needing_refactoring: refactor_files.len(),
        };

        tracing::info!(
            files = result.summary.files_analyzed,
            used = result.summary.variables_used,
            non_theme_aware = result.summary.non_theme_aware,
            "analysis complete"
        );
        result
    }
}
