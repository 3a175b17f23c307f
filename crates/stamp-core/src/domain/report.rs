//! Outcome records returned by the application services.
//!
//! Reports carry only data; the CLI decides how to print them.

use std::path::PathBuf;

use serde::Serialize;

use crate::domain::{
    path::RelativePath,
    structure::{EntryKind, FilterPlan, WalkEntry},
};

/// Result of `include_license`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LicenseReport {
    pub source: PathBuf,
    pub destination: PathBuf,
    /// `true` if a `LICENSE` file existed and was overwritten.
    pub replaced: bool,
}

/// A source entry that could not be merged because the destination holds a
/// different kind of entry at the same path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeConflict {
    pub path: RelativePath,
    pub source_kind: EntryKind,
    pub destination_kind: EntryKind,
}

/// Result of `inherit_from_template`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    /// Files copied from the common directory.
    pub copied: Vec<RelativePath>,
    /// Directories created in the destination.
    pub created_dirs: Vec<RelativePath>,
    /// Files that already existed in the destination and were left alone.
    pub preserved: Vec<RelativePath>,
    pub conflicts: Vec<MergeConflict>,
    /// Symlinks in the common directory. They are not followed or recreated.
    pub skipped_links: Vec<RelativePath>,
}

/// Result of `keep_files`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterReport {
    /// Entries removed by the sweep (a removed directory includes its
    /// contents).
    pub removed: Vec<WalkEntry>,
    /// Directories found empty after the sweep and removed.
    pub pruned: Vec<RelativePath>,
    /// `true` if nothing was touched because the run was a dry run.
    pub dry_run: bool,
}

impl FilterReport {
    pub fn planned(plan: FilterPlan) -> Self {
        Self {
            removed: plan.removals,
            pruned: Vec::new(),
            dry_run: true,
        }
    }

    pub fn is_noop(&self) -> bool {
        self.removed.is_empty() && self.pruned.is_empty()
    }
}

/// Result of the pre-generate hook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PreHookReport {
    pub template: String,
    pub merge: Option<MergeReport>,
    pub license: Option<LicenseReport>,
}

/// Result of the post-generate hook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostHookReport {
    pub template: String,
    pub filter: FilterReport,
}
