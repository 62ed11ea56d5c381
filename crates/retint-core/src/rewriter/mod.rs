//! Rewriter: edit planning, backups and in-place writes.

pub mod backup;
pub mod edits;
#[allow(clippy::module_inception)]
pub mod rewriter;

pub use backup::{write_backup, BackupNaming};
pub use edits::{plan_edits, EditPlan, UnmappedPolicy};
pub use rewriter::{Commit, RewriteOptions, Rewriter};
