//! Configuration system for retint.
//! TOML-based, layered resolution: CLI > env > project file > defaults.

pub mod analysis_config;
pub mod report_config;
pub mod retint_config;
pub mod rewrite_config;
pub mod scan_config;

pub use analysis_config::AnalysisConfig;
pub use report_config::ReportConfig;
pub use retint_config::{CliOverrides, RetintConfig, PROJECT_CONFIG_FILE};
pub use rewrite_config::RewriteConfig;
pub use scan_config::ScanConfig;
