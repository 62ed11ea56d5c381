//! Built-in rule sets and mapping tables.
//!
//! Each preset reproduces one of the legacy migration passes: Tailwind
//! arbitrary-value classes to theme utility classes, legacy variables to
//! theme variables, and hardcoded white/black classes to theme classes.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::mapping::{MappingTable, MappingTarget};
use super::rule::{RewriteStrategy, Rule, UsageKind};
use crate::errors::RuleError;

/// A custom-property token as it appears inside `var(...)` or `[...]`.
/// Deliberately loose so template fragments like `--${name}` are captured
/// and can be flagged as dynamic instead of silently ignored.
pub const TOKEN_PATTERN: &str = r#"--[^\s)\],'"`]+"#;

/// An optional `var()` fallback inside an arbitrary-value class, e.g.
/// `,#fff` or `,rgb(0,0,0)`. Arbitrary values never contain whitespace.
const CLASS_FALLBACK: &str = r#"(?:,[^\]\s'"`]*)?"#;

/// An optional `var()` fallback inside a quoted style value.
const STYLE_FALLBACK: &str = r#"(?:\s*,[^'"]*)?"#;

/// Tailwind utilities whose arbitrary values are rewritten in `classes` mode.
const UTILITY_PREFIXES: &str =
    r"text|bg|border(?:-[a-z]+)?|shadow|rounded(?:-[a-z]+)?|transition|duration|ease";

/// Which built-in rule set to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// `bg-[var(--x)]`, `text-[--x]` and inline style colors to theme classes.
    #[default]
    Classes,
    /// `var(--legacy)` to `var(--theme-...)`, fallbacks preserved.
    Variables,
    /// `text-white`, `bg-black`, ... to theme classes, opacity preserved.
    DirectColors,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Classes, Preset::Variables, Preset::DirectColors];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Classes => "classes",
            Self::Variables => "variables",
            Self::DirectColors => "direct-colors",
        }
    }

    /// Compile the preset's rules in declaration order.
    pub fn rules(&self) -> Result<Vec<Rule>, RuleError> {
        match self {
            Self::Classes => class_rules(),
            Self::Variables => variable_rules(),
            Self::DirectColors => direct_color_rules(),
        }
    }

    /// The preset's built-in mapping table.
    pub fn mappings(&self) -> Result<MappingTable, RuleError> {
        match self {
            Self::Classes => {
                let mut entries: Vec<(&str, MappingTarget)> = CLASS_MAPPINGS
                    .iter()
                    .map(|(token, class)| (*token, MappingTarget::from(*class)))
                    .collect();
                entries.extend(
                    CLASS_COMPOUND_MAPPINGS
                        .iter()
                        .map(|(token, class, note)| (*token, MappingTarget::from((*class, *note)))),
                );
                MappingTable::from_pairs(&entries)
            }
            Self::Variables => MappingTable::from_pairs(VARIABLE_MAPPINGS),
            Self::DirectColors => MappingTable::from_pairs(DIRECT_COLOR_MAPPINGS),
        }
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classes" | "class" => Ok(Self::Classes),
            "variables" | "vars" => Ok(Self::Variables),
            "direct-colors" | "direct_colors" | "colors" => Ok(Self::DirectColors),
            other => Err(RuleError::UnknownPreset(other.to_string())),
        }
    }
}

fn class_rules() -> Result<Vec<Rule>, RuleError> {
    Ok(vec![
        Rule::new(
            "style-property",
            UsageKind::Other,
            &format!(
                r#"\b(?P<property>backgroundColor|borderColor|color)\s*:\s*['"]var\((?P<token>{TOKEN_PATTERN}){STYLE_FALLBACK}\)['"]\s*,?\s*"#
            ),
            RewriteStrategy::StyleToClass,
        )?
        .with_scope(r"style=\{\{[^{}]*\}\}")?,
        // A full gradient collapses into the class mapped for its start stop.
        Rule::new(
            "gradient",
            UsageKind::Gradient,
            &format!(
                r"\bbg-gradient-to-[a-z]+\s+from-\[var\((?P<token>{TOKEN_PATTERN}){CLASS_FALLBACK}\)\](?:\s+via-\[var\({TOKEN_PATTERN}{CLASS_FALLBACK}\)\])?\s+to-\[var\({TOKEN_PATTERN}{CLASS_FALLBACK}\)\]"
            ),
            RewriteStrategy::ReplaceMatch,
        )?,
        Rule::new(
            "utility-var",
            UsageKind::Other,
            &format!(r"\b(?P<prefix>{UTILITY_PREFIXES})-\[var\((?P<token>{TOKEN_PATTERN}){CLASS_FALLBACK}\)\]"),
            RewriteStrategy::ReplaceMatch,
        )?,
        Rule::new(
            "utility-shorthand",
            UsageKind::Other,
            &format!(r"\b(?P<prefix>{UTILITY_PREFIXES})-\[(?P<token>{TOKEN_PATTERN})\]"),
            RewriteStrategy::ReplaceMatch,
        )?,
    ])
}

fn variable_rules() -> Result<Vec<Rule>, RuleError> {
    Ok(vec![Rule::new(
        "var-reference",
        UsageKind::Variable,
        &format!(r"var\(\s*(?P<token>{TOKEN_PATTERN})"),
        RewriteStrategy::ReplaceToken,
    )?])
}

fn direct_color_rules() -> Result<Vec<Rule>, RuleError> {
    // The whole class is the token; a `/NN` opacity suffix stays outside it.
    Ok(vec![Rule::new(
        "direct-color",
        UsageKind::Other,
        r"\b(?P<token>(?P<prefix>text|bg|border|shadow)-(?:white|black))\b",
        RewriteStrategy::ReplaceToken,
    )?
    .standalone()])
}

const CLASS_MAPPINGS: &[(&str, &str)] = &[
    // Text
    ("--theme-text-primary", "text-theme-primary"),
    ("--text-navy", "text-theme-primary"),
    ("--theme-text-secondary", "text-theme-secondary"),
    ("--theme-text-tertiary", "text-theme-tertiary"),
    ("--theme-text-subtle", "text-theme-subtle"),
    ("--theme-accent-secondary", "text-theme-accent"),
    ("--secondary-teal", "text-theme-accent"),
    ("--accent-red", "text-theme-error"),
    ("--theme-primary", "text-theme-primary-light"),
    ("--primary-orange", "text-theme-primary-light"),
    ("--theme-primary-light", "text-theme-primary-light"),
    ("--theme-accent-tertiary", "text-theme-accent-tertiary"),
    ("--accent-coral", "text-theme-accent-tertiary"),
    ("--theme-accent-coral", "text-theme-accent-tertiary"),
    ("--theme-accent-coral-dark", "text-theme-accent-quaternary"),
    ("--theme-accent-quaternary", "text-theme-accent-quaternary"),
    // Backgrounds
    ("--theme-bg-primary", "bg-theme-primary"),
    ("--bg-cream", "bg-theme-primary"),
    ("--bg-navy", "bg-theme-primary"),
    ("--theme-bg-secondary", "bg-theme-secondary"),
    ("--bg-cream-darker", "bg-theme-secondary"),
    ("--bg-navy-darker", "bg-theme-secondary"),
    ("--theme-bg-surface", "bg-theme-surface"),
    ("--theme-bg-card", "bg-theme-card"),
    ("--theme-card-bg-navy", "bg-theme-card"),
    ("--card-bg-navy", "bg-theme-card"),
    ("--secondary-teal-bg", "bg-theme-accent"),
    ("--secondary-teal-light", "bg-theme-accent-secondary-light"),
    ("--primary-orange-bg", "bg-theme-primary-light"),
    ("--primary-orange-light", "bg-theme-primary-light"),
    ("--theme-primary-hover", "bg-theme-primary-hover"),
    ("--primary-orange-hover", "bg-theme-primary-hover"),
    // Borders
    ("--theme-border", "border-theme-border"),
    ("--theme-border-light", "border-theme-light"),
    ("--theme-border-medium", "border-theme-border-medium"),
    ("--theme-border-primary", "border-theme-primary"),
    // Shadows
    ("--theme-shadow-sm", "shadow-theme-sm"),
    ("--theme-shadow-md", "shadow-theme-md"),
    ("--theme-shadow-lg", "shadow-theme-lg"),
    ("--theme-shadow-card", "shadow-theme-card"),
    ("--theme-shadow-btn", "shadow-theme-btn"),
    ("--shadow-sm", "shadow-theme-sm"),
    ("--shadow-md", "shadow-theme-md"),
    ("--shadow-lg", "shadow-theme-lg"),
    ("--shadow-btn", "shadow-theme-btn"),
    // Radius
    ("--theme-border-radius-md", "rounded-theme-md"),
    ("--theme-border-radius-lg", "rounded-theme-lg"),
    ("--border-radius-sm", "rounded-theme-sm"),
    ("--border-radius-md", "rounded-theme-md"),
    ("--border-radius-lg", "rounded-theme-lg"),
    ("--border-radius-xl", "rounded-theme-xl"),
    ("--border-radius-2xl", "rounded-theme-2xl"),
    ("--border-radius-full", "rounded-theme-full"),
    // Transitions
    ("--theme-transition-fast", "transition-theme-fast"),
    ("--theme-transition-normal", "transition-theme-normal"),
    ("--theme-transition-bounce", "transition-theme-bounce"),
    ("--transition-fast", "transition-theme-fast"),
    ("--transition-normal", "transition-theme-normal"),
    ("--transition-bounce", "transition-theme-bounce"),
    ("--transition-slow", "transition-theme-slow"),
    // Charts
    ("--theme-color-views", "chart-theme-line-views"),
    ("--theme-color-followers", "chart-theme-line-followers"),
    ("--theme-color-engagement", "chart-theme-line-engagement"),
    ("--theme-color-revenue", "chart-theme-line-revenue"),
    ("--theme-pattern-color", "bg-theme-pattern"),
];

const CLASS_COMPOUND_MAPPINGS: &[(&str, &str, &str)] = &[
    ("--theme-gradient-start", "bg-theme-gradient", "gradient start"),
    ("--theme-gradient-end", "bg-theme-gradient", "gradient end"),
    ("--theme-primary-gradient-start", "bg-theme-gradient-primary", "primary gradient start"),
    ("--theme-primary-gradient-end", "bg-theme-gradient-primary", "primary gradient end"),
    ("--theme-secondary-gradient-start", "bg-theme-gradient-secondary", "secondary gradient start"),
    ("--theme-secondary-gradient-end", "bg-theme-gradient-secondary", "secondary gradient end"),
    ("--theme-accent-gradient-start", "bg-theme-gradient-accent", "accent gradient start"),
    ("--theme-accent-gradient-end", "bg-theme-gradient-accent", "accent gradient end"),
    ("--theme-pattern-opacity", "bg-theme-pattern", "pattern opacity"),
];

const VARIABLE_MAPPINGS: &[(&str, &str)] = &[
    ("--text-navy", "--theme-text-primary"),
    ("--text-cream", "--theme-text-on-primary"),
    ("--bg-cream", "--theme-bg-primary"),
    ("--bg-cream-darker", "--theme-bg-secondary"),
    ("--bg-navy", "--theme-bg-primary"),
    ("--bg-navy-darker", "--theme-bg-secondary"),
    ("--primary-orange", "--theme-primary"),
    ("--primary-orange-hover", "--theme-primary-hover"),
    ("--primary-orange-light", "--theme-primary-light"),
    ("--secondary-teal", "--theme-accent-secondary"),
    ("--secondary-teal-hover", "--theme-accent-secondary-hover"),
    ("--secondary-teal-light", "--theme-accent-secondary-light"),
    ("--accent-coral", "--theme-accent-tertiary"),
    ("--accent-red", "--theme-accent-quaternary"),
    ("--card-bg-light", "--theme-bg-card"),
    ("--card-bg-navy", "--theme-bg-card"),
    ("--card-bg-dark", "--theme-bg-card"),
    ("--shadow-sm", "--theme-shadow-sm"),
    ("--shadow-md", "--theme-shadow-md"),
    ("--shadow-lg", "--theme-shadow-lg"),
    ("--shadow-btn", "--theme-shadow-btn"),
];

const DIRECT_COLOR_MAPPINGS: &[(&str, &str)] = &[
    ("text-white", "text-theme-on-primary"),
    ("text-black", "text-theme-primary"),
    ("bg-white", "bg-theme-bg-surface"),
    ("bg-black", "bg-theme-bg-secondary"),
    ("border-white", "border-theme-border-light"),
    ("border-black", "border-theme-border"),
    ("shadow-white", "shadow-theme-sm"),
    ("shadow-black", "shadow-theme-md"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_preset_compiles() {
        for preset in Preset::ALL {
            let rules = preset.rules().unwrap();
            assert!(!rules.is_empty(), "{preset} has no rules");
            let table = preset.mappings().unwrap();
            assert!(!table.is_empty(), "{preset} has no mappings");
        }
    }

    #[test]
    fn test_preset_parsing() {
        assert_eq!("classes".parse::<Preset>().unwrap(), Preset::Classes);
        assert_eq!("Direct-Colors".parse::<Preset>().unwrap(), Preset::DirectColors);
        assert!(matches!(
            "tailwind".parse::<Preset>(),
            Err(RuleError::UnknownPreset(_))
        ));
    }

    #[test]
    fn test_default_preset_is_classes() {
        assert_eq!(Preset::default(), Preset::Classes);
    }

    #[test]
    fn test_gradient_targets_carry_notes() {
        let table = Preset::Classes.mappings().unwrap();
        let target = table.get("--theme-gradient-start").unwrap();
        assert_eq!(target.value(), "bg-theme-gradient");
        assert_eq!(target.note(), Some("gradient start"));
    }

    #[test]
    fn test_utility_rule_matches_variants() {
        let rules = Preset::Classes.rules().unwrap();
        let utility = rules.iter().find(|r| r.id() == "utility-var").unwrap();
        let caps = utility
            .pattern()
            .captures("hover:border-t-[var(--theme-border)]")
            .unwrap();
        assert_eq!(&caps["token"], "--theme-border");
        assert_eq!(&caps["prefix"], "border-t");
    }

    #[test]
    fn test_class_rules_accept_var_fallbacks() {
        let rules = Preset::Classes.rules().unwrap();
        let rule = |id: &str| rules.iter().find(|r| r.id() == id).unwrap().pattern().clone();

        let caps = rule("utility-var").captures("bg-[var(--bg-cream,#fff)]").unwrap();
        assert_eq!(&caps["token"], "--bg-cream");
        assert_eq!(&caps[0], "bg-[var(--bg-cream,#fff)]");

        let caps = rule("utility-var")
            .captures("shadow-[var(--shadow-sm,0_1px_2px_rgb(0,0,0))] p-4")
            .unwrap();
        assert_eq!(&caps[0], "shadow-[var(--shadow-sm,0_1px_2px_rgb(0,0,0))]");

        let caps = rule("gradient")
            .captures("bg-gradient-to-r from-[var(--theme-gradient-start,#f00)] to-[var(--theme-gradient-end)]")
            .unwrap();
        assert_eq!(&caps["token"], "--theme-gradient-start");

        let caps = rule("style-property")
            .captures("{ color: 'var(--text-navy, #123)' }")
            .unwrap();
        assert_eq!(&caps["token"], "--text-navy");
    }
}
