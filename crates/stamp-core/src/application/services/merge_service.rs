//! Template Inheritance Merger - copies a shared "common" tree into a project
//! without overwriting anything the specific template already produced.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{EntryKind, MergeConflict, MergeReport, RelativePath},
    error::StampResult,
};

/// Additive-only merge of a common directory into a project directory.
pub struct TemplateMerger {
    filesystem: Arc<dyn Filesystem>,
}

impl TemplateMerger {
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Copy every entry of `source_common_dir` into `destination_project_dir`
    /// at the same relative path.
    ///
    /// Existing destination files win. When the destination holds a different
    /// kind of entry than the source (file vs directory), the destination
    /// entry is left alone, the conflict is reported, and nothing beneath a
    /// conflicting source directory is copied. Symlinks in the source are
    /// skipped and listed in the report. The first I/O error aborts the merge
    /// with whatever was copied so far left in place.
    #[instrument(
        skip_all,
        fields(
            source = %source_common_dir.display(),
            destination = %destination_project_dir.display()
        )
    )]
    pub fn inherit_from_template(
        &self,
        source_common_dir: &Path,
        destination_project_dir: &Path,
    ) -> StampResult<MergeReport> {
        if self.filesystem.entry_kind(source_common_dir) != Some(EntryKind::Directory) {
            return Err(ApplicationError::MissingSource {
                path: source_common_dir.to_path_buf(),
            }
            .into());
        }
        if self.filesystem.entry_kind(destination_project_dir) != Some(EntryKind::Directory) {
            return Err(ApplicationError::DestinationNotFound {
                path: destination_project_dir.to_path_buf(),
            }
            .into());
        }

        let mut report = MergeReport::default();
        let mut skipped: Vec<RelativePath> = Vec::new();

        for entry in self.filesystem.walk(source_common_dir)? {
            if skipped.iter().any(|s| entry.path.is_within(s)) {
                continue;
            }

            let from = entry.path.under(source_common_dir);
            let to = entry.path.under(destination_project_dir);
            let existing = self.filesystem.entry_kind(&to);

            match (entry.kind, existing) {
                (EntryKind::Symlink, _) => {
                    warn!(path = %entry.path, "Symlink in common directory, skipping");
                    report.skipped_links.push(entry.path);
                }
                (EntryKind::Directory, None) => {
                    self.filesystem.create_dir_all(&to)?;
                    debug!(path = %entry.path, "Created directory");
                    report.created_dirs.push(entry.path);
                }
                (EntryKind::Directory, Some(EntryKind::Directory)) => {}
                (_, None) => {
                    self.filesystem.copy_file(&from, &to)?;
                    debug!(path = %entry.path, "Copied file");
                    report.copied.push(entry.path);
                }
                (EntryKind::File, Some(EntryKind::File | EntryKind::Symlink)) => {
                    debug!(path = %entry.path, "Kept existing file");
                    report.preserved.push(entry.path);
                }
                (source_kind, Some(destination_kind)) => {
                    warn!(
                        path = %entry.path,
                        %source_kind,
                        %destination_kind,
                        "Entry kind conflict, keeping destination"
                    );
                    if source_kind.is_dir() {
                        skipped.push(entry.path.clone());
                    }
                    report.conflicts.push(MergeConflict {
                        path: entry.path,
                        source_kind,
                        destination_kind,
                    });
                }
            }
        }

        info!(
            copied = report.copied.len(),
            preserved = report.preserved.len(),
            conflicts = report.conflicts.len(),
            skipped_links = report.skipped_links.len(),
            "Common template merged"
        );
        Ok(report)
    }
}
