//! JSON reporter.

use super::{Reporter, RunReport};
use crate::errors::ReportError;

pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn generate(&self, report: &RunReport) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}
