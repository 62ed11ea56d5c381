//! Ordered rule collections bound to a mapping table.

use std::collections::{BTreeMap, HashSet};

use super::mapping::{MappingTable, MappingTarget};
use super::presets::Preset;
use super::rule::Rule;
use crate::errors::RuleError;

/// The rules of one run, in declaration order, plus the table they map
/// tokens through. Declaration order is significant: it breaks ties when
/// two rules produce overlapping edits.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
    table: MappingTable,
}

impl RuleSet {
    pub fn builder() -> RuleSetBuilder {
        RuleSetBuilder::default()
    }

    /// A preset's rules and table as-is.
    pub fn preset(preset: Preset) -> Result<Self, RuleError> {
        Self::builder().preset(preset).build()
    }

    /// A preset with extra mappings merged over its table.
    pub fn preset_with_mappings(
        preset: Preset,
        extra: &BTreeMap<String, MappingTarget>,
    ) -> Result<Self, RuleError> {
        Self::builder().preset(preset).mappings(extra.clone()).build()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn table(&self) -> &MappingTable {
        &self.table
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Assembles a [`RuleSet`] from presets, individual rules and mappings.
///
/// ```ignore
/// let rules = RuleSet::builder()
///     .preset(Preset::Variables)
///     .mapping("--brand-ink", "--theme-text-primary")
///     .build()?;
/// ```
#[derive(Debug, Default)]
pub struct RuleSetBuilder {
    presets: Vec<Preset>,
    rules: Vec<Rule>,
    mappings: BTreeMap<String, MappingTarget>,
}

impl RuleSetBuilder {
    /// Include a preset's rules and mappings. Preset rules come before
    /// rules added with [`rule`](Self::rule).
    pub fn preset(mut self, preset: Preset) -> Self {
        if !self.presets.contains(&preset) {
            self.presets.push(preset);
        }
        self
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn mapping(mut self, token: impl Into<String>, target: impl Into<MappingTarget>) -> Self {
        self.mappings.insert(token.into(), target.into());
        self
    }

    pub fn mappings(mut self, extra: BTreeMap<String, MappingTarget>) -> Self {
        self.mappings.extend(extra);
        self
    }

    pub fn build(self) -> Result<RuleSet, RuleError> {
        let mut rules = Vec::new();
        let mut base = BTreeMap::new();
        for preset in &self.presets {
            rules.extend(preset.rules()?);
            for (token, target) in preset.mappings()?.iter() {
                base.insert(token.clone(), target.clone());
            }
        }
        rules.extend(self.rules);

        let mut seen = HashSet::new();
        for rule in &rules {
            if !seen.insert(rule.id().to_string()) {
                return Err(RuleError::DuplicateRule(rule.id().to_string()));
            }
        }

        let table = MappingTable::new(base)?.merged(&self.mappings)?;
        tracing::debug!(rules = rules.len(), mappings = table.len(), "rule set built");
        Ok(RuleSet { rules, table })
    }
}
