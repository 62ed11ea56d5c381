//! Mapping tables: source token -> replacement target.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::RuleError;

/// What a source token is rewritten to.
///
/// In TOML a target is either a plain string or a two-element array
/// `[class, note]`; the note is carried into reports and logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MappingTarget {
    Single(String),
    Compound(String, String),
}

impl MappingTarget {
    /// The replacement text.
    pub fn value(&self) -> &str {
        match self {
            Self::Single(value) | Self::Compound(value, _) => value,
        }
    }

    /// The human-readable note of a compound target.
    pub fn note(&self) -> Option<&str> {
        match self {
            Self::Single(_) => None,
            Self::Compound(_, note) => Some(note),
        }
    }
}

impl From<&str> for MappingTarget {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<(&str, &str)> for MappingTarget {
    fn from((value, note): (&str, &str)) -> Self {
        Self::Compound(value.to_string(), note.to_string())
    }
}

/// A validated token -> target dictionary.
///
/// Invariants: keys and target values are non-empty, and no target value is
/// itself a key. The second rule is what makes a rewrite idempotent: the
/// output of one run never contains a token the next run would map again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MappingTable {
    entries: BTreeMap<String, MappingTarget>,
}

impl MappingTable {
    pub fn new(entries: BTreeMap<String, MappingTarget>) -> Result<Self, RuleError> {
        let table = Self { entries };
        table.validate()?;
        Ok(table)
    }

    /// Build from static `(token, target)` pairs.
    pub fn from_pairs<T>(pairs: &[(&str, T)]) -> Result<Self, RuleError>
    where
        T: Clone + Into<MappingTarget>,
    {
        let entries = pairs
            .iter()
            .map(|(token, target)| (token.to_string(), target.clone().into()))
            .collect();
        Self::new(entries)
    }

    /// Returns a new table where `overrides` replace or extend this one.
    pub fn merged(&self, overrides: &BTreeMap<String, MappingTarget>) -> Result<Self, RuleError> {
        let mut entries = self.entries.clone();
        for (token, target) in overrides {
            entries.insert(token.clone(), target.clone());
        }
        Self::new(entries)
    }

    pub fn get(&self, token: &str) -> Option<&MappingTarget> {
        self.entries.get(token)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.entries.contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &MappingTarget)> {
        self.entries.iter()
    }

    fn validate(&self) -> Result<(), RuleError> {
        for (token, target) in &self.entries {
            if token.trim().is_empty() || target.value().trim().is_empty() {
                return Err(RuleError::EmptyMapping(token.clone()));
            }
            if self.entries.contains_key(target.value()) {
                return Err(RuleError::ChainedMapping {
                    source_token: token.clone(),
                    target: target.value().to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compound_target_exposes_note() {
        let target = MappingTarget::from(("bg-theme-gradient", "gradient start"));
        assert_eq!(target.value(), "bg-theme-gradient");
        assert_eq!(target.note(), Some("gradient start"));
        assert_eq!(MappingTarget::from("bg-theme-card").note(), None);
    }

    #[test]
    fn test_rejects_chained_targets() {
        let err = MappingTable::from_pairs(&[
            ("--bg-cream", "--theme-bg-primary"),
            ("--theme-bg-primary", "--theme-bg"),
        ])
        .unwrap_err();
        assert!(matches!(err, RuleError::ChainedMapping { .. }));
    }

    #[test]
    fn test_rejects_empty_values() {
        let err = MappingTable::from_pairs(&[("--bg-cream", "  ")]).unwrap_err();
        assert!(matches!(err, RuleError::EmptyMapping(_)));
    }

    #[test]
    fn test_merged_overrides_win() {
        let base = MappingTable::from_pairs(&[("--bg-cream", "bg-theme-primary")]).unwrap();
        let mut extra = BTreeMap::new();
        extra.insert("--bg-cream".to_string(), MappingTarget::from("bg-theme-surface"));
        extra.insert("--brand-ink".to_string(), MappingTarget::from("text-theme-primary"));

        let merged = base.merged(&extra).unwrap();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.get("--bg-cream").unwrap().value(), "bg-theme-surface");
    }

    #[test]
    fn test_toml_accepts_string_and_pair() {
        #[derive(Deserialize)]
        struct Doc {
            mappings: BTreeMap<String, MappingTarget>,
        }
        let doc: Doc = toml::from_str(
            r#"
[mappings]
"--brand-ink" = "text-theme-primary"
"--hero-start" = ["bg-theme-gradient", "hero gradient start"]
"#,
        )
        .unwrap();
        assert_eq!(doc.mappings["--brand-ink"], MappingTarget::from("text-theme-primary"));
        assert_eq!(doc.mappings["--hero-start"].note(), Some("hero gradient start"));
    }
}
