//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `stamp-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::{EntryKind, WalkEntry};
use crate::error::StampResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `stamp_adapters::filesystem::LocalFilesystem` (production)
/// - `stamp_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Contract
///
/// - Symlinks are never followed: `entry_kind` and `walk` report them as
///   [`EntryKind::Symlink`].
/// - `walk` excludes the root, yields parents before children, orders
///   siblings by file name and returns paths relative to the root.
/// - I/O failures map to `ApplicationError::PermissionDenied` when the OS
///   reports a permission problem and `ApplicationError::FilesystemError`
///   otherwise.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Kind of the entry at `path`, or `None` if nothing exists there.
    fn entry_kind(&self, path: &Path) -> Option<EntryKind>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> StampResult<()>;

    /// Copy file bytes from `from` to `to`, overwriting `to`.
    fn copy_file(&self, from: &Path, to: &Path) -> StampResult<()>;

    /// Recursively list everything under `root`.
    fn walk(&self, root: &Path) -> StampResult<Vec<WalkEntry>>;

    /// `true` if the directory at `path` has no entries.
    fn is_empty_dir(&self, path: &Path) -> StampResult<bool>;

    /// Remove a file or symlink.
    fn remove_file(&self, path: &Path) -> StampResult<()>;

    /// Remove an empty directory.
    fn remove_dir(&self, path: &Path) -> StampResult<()>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> StampResult<()>;
}
