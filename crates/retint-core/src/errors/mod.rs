//! Error handling for retint.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod error_code;
pub mod pipeline_error;
pub mod report_error;
pub mod rewrite_error;
pub mod rule_error;
pub mod scan_error;

pub use config_error::ConfigError;
pub use error_code::RetintErrorCode;
pub use pipeline_error::PipelineError;
pub use report_error::ReportError;
pub use rewrite_error::RewriteError;
pub use rule_error::RuleError;
pub use scan_error::ScanError;
