//! Desired-structure allow-lists and filter planning.
//!
//! Planning is pure: given the entries found by walking a rendered project
//! and the template's [`DesiredStructure`], [`DesiredStructure::plan`] decides
//! which entries must be removed. The application layer applies the plan
//! through the `Filesystem` port and prunes empty directories afterwards.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{error::DomainError, path::RelativePath};

/// Kind of a filesystem entry as seen by a (non-following) walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
    /// Symlinks are never followed; they are removed like files.
    Symlink,
}

impl EntryKind {
    pub fn is_dir(self) -> bool {
        matches!(self, Self::Directory)
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Directory => write!(f, "directory"),
            Self::Symlink => write!(f, "symlink"),
        }
    }
}

/// One entry produced by walking a directory tree, relative to the walk root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WalkEntry {
    pub path: RelativePath,
    pub kind: EntryKind,
}

impl WalkEntry {
    pub fn new(path: RelativePath, kind: EntryKind) -> Self {
        Self { path, kind }
    }

    pub fn file(path: &str) -> Result<Self, DomainError> {
        Ok(Self::new(RelativePath::parse(path)?, EntryKind::File))
    }

    pub fn dir(path: &str) -> Result<Self, DomainError> {
        Ok(Self::new(RelativePath::parse(path)?, EntryKind::Directory))
    }
}

/// What the filter does with one walked entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The entry equals or lies under a desired entry.
    Keep,
    /// A directory on the way to a desired entry: it survives, its children
    /// are classified individually.
    Descend,
    /// Not covered by the allow-list.
    Remove,
}

/// The explicit allow-list of paths that survive the post-generate hook.
///
/// Entries are normalised and de-duplicated; order is preserved for display.
/// A directory entry keeps everything underneath it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct DesiredStructure {
    entries: Vec<RelativePath>,
}

impl DesiredStructure {
    /// Build from raw strings, validating each one.
    pub fn new<I, S>(entries: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for raw in entries {
            let path = RelativePath::parse(raw.as_ref())?;
            if seen.insert(path.clone()) {
                out.push(path);
            }
        }
        Ok(Self { entries: out })
    }

    pub fn entries(&self) -> &[RelativePath] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `true` if `path` equals or is a descendant of any desired entry.
    pub fn covers(&self, path: &RelativePath) -> bool {
        self.entries.iter().any(|e| path.is_within(e))
    }

    /// Classify one walked entry.
    pub fn classify(&self, entry: &WalkEntry) -> Decision {
        if self.covers(&entry.path) {
            return Decision::Keep;
        }
        if entry.kind.is_dir() && self.entries.iter().any(|e| entry.path.is_ancestor_of(e)) {
            return Decision::Descend;
        }
        Decision::Remove
    }

    /// Compute the removals for a tree.
    ///
    /// `entries` may arrive in any order. Entries underneath a removed
    /// directory are not listed separately; the directory's recursive removal
    /// covers them. Removals are returned shallowest first, ties broken by
    /// path.
    pub fn plan(&self, entries: &[WalkEntry]) -> FilterPlan {
        let mut sorted: Vec<&WalkEntry> = entries.iter().collect();
        sorted.sort_by(|a, b| {
            a.path
                .depth()
                .cmp(&b.path.depth())
                .then_with(|| a.path.cmp(&b.path))
        });

        let mut removed_dirs: Vec<&RelativePath> = Vec::new();
        let mut removals = Vec::new();

        for entry in sorted {
            if removed_dirs.iter().any(|d| entry.path.is_within(d)) {
                continue;
            }
            if self.classify(entry) == Decision::Remove {
                if entry.kind.is_dir() {
                    removed_dirs.push(&entry.path);
                }
                removals.push(entry.clone());
            }
        }

        FilterPlan { removals }
    }
}

impl TryFrom<Vec<String>> for DesiredStructure {
    type Error = DomainError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DesiredStructure> for Vec<String> {
    fn from(value: DesiredStructure) -> Self {
        value.entries.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for DesiredStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.entries.iter().map(ToString::to_string).collect();
        write!(f, "[{}]", parts.join(", "))
    }
}

/// The removals a filter run will perform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterPlan {
    pub removals: Vec<WalkEntry>,
}

impl FilterPlan {
    pub fn is_empty(&self) -> bool {
        self.removals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.removals.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desired(entries: &[&str]) -> DesiredStructure {
        DesiredStructure::new(entries.iter().copied()).unwrap()
    }

    fn paths(plan: &FilterPlan) -> Vec<String> {
        plan.removals.iter().map(|e| e.path.to_string()).collect()
    }

    fn tree(entries: &[(&str, bool)]) -> Vec<WalkEntry> {
        entries
            .iter()
            .map(|(p, is_dir)| {
                if *is_dir {
                    WalkEntry::dir(p).unwrap()
                } else {
                    WalkEntry::file(p).unwrap()
                }
            })
            .collect()
    }

    #[test]
    fn new_deduplicates_preserving_order() {
        let d = desired(&["src", "./src/", "README.md", "src"]);
        let names: Vec<String> = d.entries().iter().map(ToString::to_string).collect();
        assert_eq!(names, vec!["src", "README.md"]);
    }

    #[test]
    fn new_rejects_escaping_entries() {
        assert!(DesiredStructure::new(["../outside"]).is_err());
        assert!(DesiredStructure::new(["/abs"]).is_err());
    }

    #[test]
    fn classify_directory_on_the_way_descends() {
        let d = desired(&["a/b.txt"]);
        assert_eq!(d.classify(&WalkEntry::dir("a").unwrap()), Decision::Descend);
        assert_eq!(d.classify(&WalkEntry::file("a/b.txt").unwrap()), Decision::Keep);
        assert_eq!(d.classify(&WalkEntry::file("a/c.txt").unwrap()), Decision::Remove);
    }

    #[test]
    fn classify_file_named_like_ancestor_is_removed() {
        // A file at `a` cannot lead to `a/b.txt`.
        let d = desired(&["a/b.txt"]);
        assert_eq!(d.classify(&WalkEntry::file("a").unwrap()), Decision::Remove);
    }

    #[test]
    fn plan_matches_mixed_file_and_directory_example() {
        let d = desired(&["a/b.txt", "d"]);
        let entries = tree(&[
            ("a", true),
            ("a/b.txt", false),
            ("a/c.txt", false),
            ("d", true),
            ("d/e.txt", false),
        ]);

        assert_eq!(paths(&d.plan(&entries)), vec!["a/c.txt"]);
    }

    #[test]
    fn plan_removes_unrelated_tree_wholesale() {
        let d = desired(&["x/y.txt"]);
        let entries = tree(&[("z", true), ("z/w.txt", false)]);

        let plan = d.plan(&entries);
        assert_eq!(paths(&plan), vec!["z"], "children of a removed dir are not listed");
        assert_eq!(plan.removals[0].kind, EntryKind::Directory);
    }

    #[test]
    fn plan_is_order_independent() {
        let d = desired(&["keep"]);
        let forward = tree(&[("drop", true), ("drop/x", false), ("keep", false), ("z", false)]);
        let mut backward = forward.clone();
        backward.reverse();

        assert_eq!(d.plan(&forward), d.plan(&backward));
        assert_eq!(paths(&d.plan(&forward)), vec!["drop", "z"]);
    }

    #[test]
    fn plan_on_filtered_tree_is_empty() {
        let d = desired(&["a/b.txt", "d"]);
        let filtered = tree(&[("a", true), ("a/b.txt", false), ("d", true), ("d/e.txt", false)]);
        assert!(d.plan(&filtered).is_empty());
    }

    #[test]
    fn empty_structure_removes_everything_at_top_level() {
        let d = DesiredStructure::default();
        let entries = tree(&[("a", true), ("a/b", false), ("c", false)]);
        assert_eq!(paths(&d.plan(&entries)), vec!["a", "c"]);
    }

    #[test]
    fn symlinks_are_removed_as_entries() {
        let d = desired(&["src"]);
        let link = WalkEntry::new(RelativePath::parse("link").unwrap(), EntryKind::Symlink);
        let plan = d.plan(&[link.clone()]);
        assert_eq!(plan.removals, vec![link]);
    }

    #[test]
    fn display_lists_entries() {
        assert_eq!(desired(&["a", "b/c"]).to_string(), "[a, b/c]");
    }
}
