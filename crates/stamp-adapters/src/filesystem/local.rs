//! Local filesystem adapter using std::fs and walkdir.

use std::fs;
use std::io;
use std::path::Path;

use walkdir::WalkDir;

use stamp_core::{
    application::{ApplicationError, ports::Filesystem},
    domain::{DomainError, EntryKind, RelativePath, WalkEntry},
    error::{StampError, StampResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn entry_kind(&self, path: &Path) -> Option<EntryKind> {
        let file_type = fs::symlink_metadata(path).ok()?.file_type();
        Some(kind_of(file_type))
    }

    fn create_dir_all(&self, path: &Path) -> StampResult<()> {
        fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn copy_file(&self, from: &Path, to: &Path) -> StampResult<()> {
        fs::copy(from, to)
            .map(|_| ())
            .map_err(|e| map_io_error(to, e, "copy file to"))
    }

    fn walk(&self, root: &Path) -> StampResult<Vec<WalkEntry>> {
        let mut entries = Vec::new();
        for entry in WalkDir::new(root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| map_walk_error(root, e))?;
            let rel = entry
                .path()
                .strip_prefix(root)
                .map_err(|_| DomainError::OutsideRoot {
                    path: entry.path().display().to_string(),
                    root: root.display().to_string(),
                })?;
            entries.push(WalkEntry::new(
                RelativePath::try_from_path(rel)?,
                kind_of(entry.file_type()),
            ));
        }
        Ok(entries)
    }

    fn is_empty_dir(&self, path: &Path) -> StampResult<bool> {
        let mut read_dir = fs::read_dir(path).map_err(|e| map_io_error(path, e, "read directory"))?;
        Ok(read_dir.next().is_none())
    }

    fn remove_file(&self, path: &Path) -> StampResult<()> {
        fs::remove_file(path).map_err(|e| map_io_error(path, e, "remove file"))
    }

    fn remove_dir(&self, path: &Path) -> StampResult<()> {
        fs::remove_dir(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }

    fn remove_dir_all(&self, path: &Path) -> StampResult<()> {
        fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }
}

fn kind_of(file_type: fs::FileType) -> EntryKind {
    if file_type.is_symlink() {
        EntryKind::Symlink
    } else if file_type.is_dir() {
        EntryKind::Directory
    } else {
        EntryKind::File
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> StampError {
    match e.kind() {
        io::ErrorKind::PermissionDenied => ApplicationError::PermissionDenied {
            path: path.to_path_buf(),
            operation: operation.to_string(),
        },
        _ => ApplicationError::FilesystemError {
            path: path.to_path_buf(),
            reason: format!("Failed to {}: {}", operation, e),
        },
    }
    .into()
}

fn map_walk_error(root: &Path, e: walkdir::Error) -> StampError {
    let path = e.path().unwrap_or(root).to_path_buf();
    match e.into_io_error() {
        Some(io_err) => map_io_error(&path, io_err, "walk"),
        None => ApplicationError::FilesystemError {
            path,
            reason: "filesystem loop detected".into(),
        }
        .into(),
    }
}
