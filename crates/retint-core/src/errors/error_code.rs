//! RetintErrorCode trait: stable, machine-readable error codes.

/// Every error enum implements this so reports and the CLI can print a
/// structured code next to the human-readable message.
pub trait RetintErrorCode {
    /// Returns the error code string (e.g., "SCAN_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const SCAN_ERROR: &str = "SCAN_ERROR";
pub const READ_ERROR: &str = "READ_ERROR";
pub const WRITE_ERROR: &str = "WRITE_ERROR";
pub const BACKUP_ERROR: &str = "BACKUP_ERROR";
pub const RULE_ERROR: &str = "RULE_ERROR";
pub const REPORT_ERROR: &str = "REPORT_ERROR";
