//! A single rewrite rule: a compiled pattern plus how to apply a mapping.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::errors::RuleError;

/// Named capture group every rule pattern must define.
pub const TOKEN_GROUP: &str = "token";
/// Optional group naming the Tailwind utility prefix (`bg`, `text`, ...).
pub const PREFIX_GROUP: &str = "prefix";
/// Optional group naming the inline-style property (`color`, ...).
pub const PROPERTY_GROUP: &str = "property";

/// How a mapped finding turns into an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewriteStrategy {
    /// The whole match is replaced by the target.
    ReplaceMatch,
    /// Only the token inside the match is replaced; everything around it
    /// (fallbacks, opacity modifiers, variant prefixes) is kept.
    ReplaceToken,
    /// The property is lifted out of an inline style object into a
    /// `className` attribute.
    StyleToClass,
}

/// The kind of usage a finding represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageKind {
    Background,
    Text,
    Border,
    Fill,
    Stroke,
    Shadow,
    Radius,
    Gradient,
    Ring,
    Transition,
    Variable,
    Other,
}

impl UsageKind {
    /// Classify a Tailwind utility prefix.
    pub fn from_utility_prefix(prefix: &str) -> Self {
        match prefix {
            "bg" => Self::Background,
            "text" | "placeholder" | "caret" | "decoration" | "accent" => Self::Text,
            "fill" => Self::Fill,
            "stroke" => Self::Stroke,
            "shadow" => Self::Shadow,
            "from" | "via" | "to" => Self::Gradient,
            "ring" | "outline" => Self::Ring,
            "transition" | "duration" | "ease" => Self::Transition,
            p if p.starts_with("border") || p.starts_with("divide") => Self::Border,
            p if p.starts_with("rounded") => Self::Radius,
            _ => Self::Other,
        }
    }

    /// Classify an inline-style property.
    pub fn from_style_property(property: &str) -> Self {
        match property {
            "color" => Self::Text,
            "backgroundColor" | "background" => Self::Background,
            "borderColor" => Self::Border,
            _ => Self::Other,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Text => "text",
            Self::Border => "border",
            Self::Fill => "fill",
            Self::Stroke => "stroke",
            Self::Shadow => "shadow",
            Self::Radius => "radius",
            Self::Gradient => "gradient",
            Self::Ring => "ring",
            Self::Transition => "transition",
            Self::Variable => "variable",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for UsageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A compiled rewrite rule.
#[derive(Debug, Clone)]
pub struct Rule {
    id: String,
    usage: UsageKind,
    pattern: Regex,
    scope: Option<Regex>,
    strategy: RewriteStrategy,
    standalone: bool,
}

impl Rule {
    /// Compile a rule. The pattern must define a `token` group.
    pub fn new(
        id: impl Into<String>,
        usage: UsageKind,
        pattern: &str,
        strategy: RewriteStrategy,
    ) -> Result<Self, RuleError> {
        let id = id.into();
        let pattern = compile(&id, pattern)?;
        if !pattern.capture_names().flatten().any(|n| n == TOKEN_GROUP) {
            return Err(RuleError::MissingTokenGroup { id });
        }
        Ok(Self {
            id,
            usage,
            pattern,
            scope: None,
            strategy,
            standalone: false,
        })
    }

    /// Restrict matching to the spans of `scope` matches.
    pub fn with_scope(mut self, scope: &str) -> Result<Self, RuleError> {
        self.scope = Some(compile(&self.id, scope)?);
        Ok(self)
    }

    /// Only accept matches that form a whole class name, i.e. are not glued
    /// to word characters or hyphens on either side.
    pub fn standalone(mut self) -> Self {
        self.standalone = true;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub fn scope(&self) -> Option<&Regex> {
        self.scope.as_ref()
    }

    pub fn strategy(&self) -> RewriteStrategy {
        self.strategy
    }

    pub fn is_standalone(&self) -> bool {
        self.standalone
    }

    /// Usage kind for one match, refined by the `prefix` or `property`
    /// group when the pattern has one.
    pub fn usage_for(&self, caps: &Captures<'_>) -> UsageKind {
        if let Some(prefix) = caps.name(PREFIX_GROUP) {
            return UsageKind::from_utility_prefix(prefix.as_str());
        }
        if let Some(property) = caps.name(PROPERTY_GROUP) {
            return UsageKind::from_style_property(property.as_str());
        }
        self.usage
    }
}

fn compile(id: &str, pattern: &str) -> Result<Regex, RuleError> {
    Regex::new(pattern).map_err(|e| RuleError::InvalidPattern {
        id: id.to_string(),
        message: e.to_string(),
    })
}
