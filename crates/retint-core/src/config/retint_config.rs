//! Top-level retint configuration with layered resolution.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{AnalysisConfig, ReportConfig, RewriteConfig, ScanConfig};
use crate::errors::ConfigError;
use crate::report::ReportFormat;
use crate::rules::{MappingTarget, Preset};

/// Project config file looked up in the scan root.
pub const PROJECT_CONFIG_FILE: &str = "retint.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`RETINT_*`)
/// 3. Project config (`--config <file>`, else `retint.toml` in the root)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RetintConfig {
    /// Rule preset. Default: classes.
    pub mode: Option<Preset>,
    pub scan: ScanConfig,
    pub rewrite: RewriteConfig,
    pub report: ReportConfig,
    pub analysis: AnalysisConfig,
    /// Extra mappings merged over the preset's table.
    pub mappings: BTreeMap<String, MappingTarget>,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub mode: Option<Preset>,
    pub dry_run: Option<bool>,
    pub backup: Option<bool>,
    pub timestamped_backups: Option<bool>,
    pub annotate_unmapped: Option<bool>,
    pub extensions: Vec<String>,
    pub extra_ignore: Vec<String>,
    pub threads: Option<usize>,
    pub report_format: Option<ReportFormat>,
    pub report_path: Option<String>,
    pub color: Option<bool>,
}

impl RetintConfig {
    /// Load configuration with layered resolution.
    ///
    /// An explicit `config_path` must exist; the implicit `retint.toml` in
    /// `root` is optional.
    pub fn load(
        root: &Path,
        config_path: Option<&Path>,
        cli_overrides: Option<&CliOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        match config_path {
            Some(path) => {
                if !path.is_file() {
                    return Err(ConfigError::FileNotFound {
                        path: path.display().to_string(),
                    });
                }
                config = Self::from_file(path)?;
            }
            None => {
                let project_config_path = root.join(PROJECT_CONFIG_FILE);
                if project_config_path.is_file() {
                    config = Self::from_file(&project_config_path)?;
                }
            }
        }

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Returns the effective preset, defaulting to `classes`.
    pub fn effective_mode(&self) -> Preset {
        self.mode.unwrap_or_default()
    }

    /// Validate the configuration values.
    pub fn validate(config: &RetintConfig) -> Result<(), ConfigError> {
        if config.scan.max_file_size == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "scan.max_file_size".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if let Some(ref suffix) = config.rewrite.backup_suffix {
            if suffix.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "rewrite.backup_suffix".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        if let Some(ref marker) = config.rewrite.review_marker {
            if !marker.contains("{token}") {
                return Err(ConfigError::ValidationFailed {
                    field: "rewrite.review_marker".to_string(),
                    message: "must contain the {token} placeholder".to_string(),
                });
            }
        }
        if let Some(ref prefix) = config.analysis.theme_prefix {
            if !prefix.starts_with("--") {
                return Err(ConfigError::ValidationFailed {
                    field: "analysis.theme_prefix".to_string(),
                    message: "must start with --".to_string(),
                });
            }
        }
        for ext in &config.scan.extensions {
            if ext.trim_start_matches('.').is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "scan.extensions".to_string(),
                    message: "extensions must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Apply environment variable overrides.
    /// Unparseable values are ignored and the lower layer wins.
    fn apply_env_overrides(config: &mut RetintConfig) {
        if let Ok(val) = std::env::var("RETINT_MODE") {
            match val.parse::<Preset>() {
                Ok(mode) => config.mode = Some(mode),
                Err(_) => tracing::warn!(value = %val, "ignoring invalid RETINT_MODE"),
            }
        }
        if let Ok(val) = std::env::var("RETINT_DRY_RUN") {
            if let Ok(v) = val.parse::<bool>() {
                config.rewrite.dry_run = Some(v);
            }
        }
        if let Ok(val) = std::env::var("RETINT_THREADS") {
            if let Ok(v) = val.parse::<usize>() {
                config.scan.threads = Some(v);
            }
        }
        if let Ok(val) = std::env::var("RETINT_MAX_FILE_SIZE") {
            if let Ok(v) = val.parse::<u64>() {
                config.scan.max_file_size = Some(v);
            }
        }
        if let Ok(val) = std::env::var("RETINT_REPORT_FORMAT") {
            match val.parse::<ReportFormat>() {
                Ok(format) => config.report.format = Some(format),
                Err(_) => tracing::warn!(value = %val, "ignoring invalid RETINT_REPORT_FORMAT"),
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    pub fn apply_cli_overrides(config: &mut RetintConfig, cli: &CliOverrides) {
        if let Some(v) = cli.mode {
            config.mode = Some(v);
        }
        if let Some(v) = cli.dry_run {
            config.rewrite.dry_run = Some(v);
        }
        if let Some(v) = cli.backup {
            config.rewrite.backup = Some(v);
        }
        if let Some(v) = cli.timestamped_backups {
            config.rewrite.timestamped_backups = Some(v);
        }
        if let Some(v) = cli.annotate_unmapped {
            config.rewrite.annotate_unmapped = Some(v);
        }
        if !cli.extensions.is_empty() {
            config.scan.extensions = cli.extensions.clone();
        }
        // Ignore patterns accumulate across layers.
        config
            .scan
            .extra_ignore
            .extend(cli.extra_ignore.iter().cloned());
        if let Some(v) = cli.threads {
            config.scan.threads = Some(v);
        }
        if let Some(v) = cli.report_format {
            config.report.format = Some(v);
        }
        if let Some(ref v) = cli.report_path {
            config.report.path = Some(v.clone());
        }
        if let Some(v) = cli.color {
            config.report.color = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
