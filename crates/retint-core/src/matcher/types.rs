//! Finding types.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::rules::UsageKind;

/// What will happen to a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingStatus {
    /// The token has a mapping and will be rewritten.
    Mapped,
    /// No mapping exists; left as-is (or annotated).
    Unmapped,
    /// The token is built at runtime; never rewritten automatically.
    Dynamic,
    /// Overlaps an edit from an earlier-declared rule; reported only.
    Superseded,
}

impl FindingStatus {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mapped => "mapped",
            Self::Unmapped => "unmapped",
            Self::Dynamic => "dynamic",
            Self::Superseded => "superseded",
        }
    }
}

/// One detected token occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Path relative to the scan root.
    pub file: String,
    /// 1-based line.
    pub line: u32,
    /// 1-based column, in characters.
    pub column: u32,
    pub rule_id: String,
    pub usage: UsageKind,
    /// The full text the rule matched.
    pub matched_text: String,
    /// The token inside the match (`--bg-cream`, `text-white`).
    pub token: String,
    /// Text the match or token becomes, when mapped.
    pub replacement: Option<String>,
    /// Note attached to a compound mapping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub status: FindingStatus,
    /// The trimmed source line, for reports.
    pub context: String,
    #[serde(skip)]
    pub span: Range<usize>,
    #[serde(skip)]
    pub token_span: Range<usize>,
    /// Span of the enclosing scope match (the inline style object).
    #[serde(skip)]
    pub container: Option<Range<usize>>,
    /// Index of the producing rule in its rule set.
    #[serde(skip)]
    pub rule_order: usize,
}

impl Finding {
    pub fn is_mapped(&self) -> bool {
        self.status == FindingStatus::Mapped
    }

    /// `file:line:column`
    pub fn location(&self) -> String {
        format!("{}:{}:{}", self.file, self.line, self.column)
    }
}
