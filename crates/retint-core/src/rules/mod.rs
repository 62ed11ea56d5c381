//! Rewrite rules, mapping tables and built-in presets.

pub mod mapping;
pub mod presets;
pub mod rule;
pub mod ruleset;

pub use mapping::{MappingTable, MappingTarget};
pub use presets::{Preset, TOKEN_PATTERN};
pub use rule::{RewriteStrategy, Rule, UsageKind, TOKEN_GROUP};
pub use ruleset::{RuleSet, RuleSetBuilder};
