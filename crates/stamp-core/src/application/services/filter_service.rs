//! Desired-Structure Filter - deletes everything in a rendered project that
//! the template's allow-list does not name.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{DesiredStructure, EntryKind, FilterPlan, FilterReport, RelativePath},
    error::StampResult,
};

/// Subtractive-only filter over a project tree.
pub struct StructureFilter {
    filesystem: Arc<dyn Filesystem>,
}

impl StructureFilter {
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Compute the removals without touching anything.
    #[instrument(skip_all, fields(root = %project_root.display()))]
    pub fn plan(
        &self,
        project_root: &Path,
        desired: &DesiredStructure,
    ) -> StampResult<FilterPlan> {
        if self.filesystem.entry_kind(project_root) != Some(EntryKind::Directory) {
            return Err(ApplicationError::DestinationNotFound {
                path: project_root.to_path_buf(),
            }
            .into());
        }

        let entries = self.filesystem.walk(project_root)?;
        let plan = desired.plan(&entries);
        debug!(
            walked = entries.len(),
            removals = plan.len(),
            "Filter planned"
        );
        Ok(plan)
    }

    /// Reduce `project_root` to the entries covered by `desired`.
    ///
    /// Removals run in plan order and the first failure aborts the sweep.
    /// Afterwards every directory that is empty is removed, deepest first,
    /// whether or not it was named in `desired`. The root itself survives.
    #[instrument(skip_all, fields(root = %project_root.display(), keep = %desired))]
    pub fn keep_files(
        &self,
        project_root: &Path,
        desired: &DesiredStructure,
    ) -> StampResult<FilterReport> {
        if desired.is_empty() {
            warn!("Desired structure is empty, the project root will be emptied");
        }

        let plan = self.plan(project_root, desired)?;

        for removal in &plan.removals {
            let path = removal.path.under(project_root);
            match removal.kind {
                EntryKind::Directory => self.filesystem.remove_dir_all(&path)?,
                EntryKind::File | EntryKind::Symlink => self.filesystem.remove_file(&path)?,
            }
            debug!(path = %removal.path, kind = %removal.kind, "Removed");
        }

        let pruned = self.prune_empty_dirs(project_root)?;

        info!(
            removed = plan.len(),
            pruned = pruned.len(),
            "Project filtered to desired structure"
        );
        Ok(FilterReport {
            removed: plan.removals,
            pruned,
            dry_run: false,
        })
    }

    /// Remove empty directories, deepest first, so that a directory emptied
    /// by pruning its only child is pruned too.
    fn prune_empty_dirs(&self, project_root: &Path) -> StampResult<Vec<RelativePath>> {
        let mut dirs: Vec<RelativePath> = self
            .filesystem
            .walk(project_root)?
            .into_iter()
            .filter(|e| e.kind.is_dir())
            .map(|e| e.path)
            .collect();
        dirs.sort_by(|a, b| b.depth().cmp(&a.depth()).then_with(|| a.cmp(b)));

        let mut pruned = Vec::new();
        for dir in dirs {
            let path = dir.under(project_root);
            if self.filesystem.is_empty_dir(&path)? {
                self.filesystem.remove_dir(&path)?;
                debug!(path = %dir, "Pruned empty directory");
                pruned.push(dir);
            }
        }
        Ok(pruned)
    }
}
