//! Pattern matching over file content.

pub mod dynamic;
#[allow(clippy::module_inception)]
pub mod matcher;
pub mod types;

pub use matcher::{LineIndex, Matcher};
pub use types::{Finding, FindingStatus};
