//! Rule and mapping-table errors.

use super::error_code::{self, RetintErrorCode};

/// Errors raised while building rule sets and mapping tables.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("Rule {id} has an invalid pattern: {message}")]
    InvalidPattern { id: String, message: String },

    #[error("Rule {id} pattern has no named `token` group")]
    MissingTokenGroup { id: String },

    #[error("Duplicate rule id: {0}")]
    DuplicateRule(String),

    #[error("Mapping for {0:?} is empty")]
    EmptyMapping(String),

    #[error("Mapping target {target:?} for {source_token:?} is itself a mapped source token")]
    ChainedMapping {
        source_token: String,
        target: String,
    },

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),
}

impl RetintErrorCode for RuleError {
    fn error_code(&self) -> &'static str {
        error_code::RULE_ERROR
    }
}
