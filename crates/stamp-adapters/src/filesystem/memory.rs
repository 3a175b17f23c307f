//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use stamp_core::{
    application::{ApplicationError, ports::Filesystem},
    domain::{EntryKind, RelativePath, WalkEntry},
    error::StampResult,
};

/// In-memory filesystem for testing.
///
/// Paths are stored as given, so callers should stick to absolute paths.
/// Symlinks are not modelled.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, Vec<u8>>,
    directories: BTreeSet<PathBuf>,
    locked: HashSet<PathBuf>,
}

impl MemoryFilesystemInner {
    fn kind(&self, path: &Path) -> Option<EntryKind> {
        if self.files.contains_key(path) {
            Some(EntryKind::File)
        } else if self.directories.contains(path) {
            Some(EntryKind::Directory)
        } else {
            None
        }
    }

    fn check_unlocked(&self, path: &Path, operation: &str) -> StampResult<()> {
        if self.locked.iter().any(|l| path.starts_with(l)) {
            return Err(ApplicationError::PermissionDenied {
                path: path.to_path_buf(),
                operation: operation.to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn insert_dirs(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.directories.insert(current.clone());
        }
    }
}

fn fs_error(path: &Path, reason: &str) -> ApplicationError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    fn read(&self) -> StampResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        Ok(self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?)
    }

    fn write(&self) -> StampResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        Ok(self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?)
    }

    /// Add a file, creating its parent directories (testing helper).
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) -> StampResult<()> {
        let path = path.as_ref();
        let mut inner = self.write()?;
        if let Some(parent) = path.parent() {
            inner.insert_dirs(parent);
        }
        inner.files.insert(path.to_path_buf(), content.into());
        Ok(())
    }

    /// Add a directory and its ancestors (testing helper).
    pub fn add_dir(&self, path: impl AsRef<Path>) -> StampResult<()> {
        self.write()?.insert_dirs(path.as_ref());
        Ok(())
    }

    /// Make every write or removal at or below `path` fail with a
    /// permission error (testing helper).
    pub fn lock(&self, path: impl AsRef<Path>) -> StampResult<()> {
        self.write()?.locked.insert(path.as_ref().to_path_buf());
        Ok(())
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<Vec<u8>> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// List all files.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// List all directories.
    pub fn list_dirs(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.directories.iter().cloned().collect())
            .unwrap_or_default()
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for MemoryFilesystem {
    fn entry_kind(&self, path: &Path) -> Option<EntryKind> {
        self.inner.read().ok()?.kind(path)
    }

    fn create_dir_all(&self, path: &Path) -> StampResult<()> {
        let mut inner = self.write()?;
        inner.check_unlocked(path, "create directory")?;
        if inner.files.contains_key(path) {
            return Err(fs_error(path, "A file exists at this path").into());
        }
        inner.insert_dirs(path);
        Ok(())
    }

    fn copy_file(&self, from: &Path, to: &Path) -> StampResult<()> {
        let mut inner = self.write()?;
        inner.check_unlocked(to, "copy file to")?;

        let content = inner
            .files
            .get(from)
            .cloned()
            .ok_or_else(|| fs_error(from, "Source file does not exist"))?;

        if let Some(parent) = to.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(fs_error(to, "Parent directory does not exist").into());
            }
        }
        if inner.directories.contains(to) {
            return Err(fs_error(to, "A directory exists at this path").into());
        }

        inner.files.insert(to.to_path_buf(), content);
        Ok(())
    }

    fn walk(&self, root: &Path) -> StampResult<Vec<WalkEntry>> {
        let inner = self.read()?;
        if !inner.directories.contains(root) {
            return Err(fs_error(root, "Directory does not exist").into());
        }

        let dirs = inner
            .directories
            .iter()
            .map(|p| (p, EntryKind::Directory));
        let files = inner.files.keys().map(|p| (p, EntryKind::File));

        let mut entries = Vec::new();
        for (path, kind) in dirs.chain(files) {
            if path.as_path() == root {
                continue;
            }
            if let Ok(rel) = path.strip_prefix(root) {
                entries.push(WalkEntry::new(RelativePath::try_from_path(rel)?, kind));
            }
        }
        // Component-wise ordering puts parents first and siblings by name.
        entries.sort_by(|a, b| a.path.as_path().cmp(b.path.as_path()));
        Ok(entries)
    }

    fn is_empty_dir(&self, path: &Path) -> StampResult<bool> {
        let inner = self.read()?;
        if !inner.directories.contains(path) {
            return Err(fs_error(path, "Directory does not exist").into());
        }
        let has_child = inner
            .directories
            .iter()
            .chain(inner.files.keys())
            .any(|p| p.parent() == Some(path));
        Ok(!has_child)
    }

    fn remove_file(&self, path: &Path) -> StampResult<()> {
        let mut inner = self.write()?;
        inner.check_unlocked(path, "remove file")?;
        inner
            .files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| fs_error(path, "File does not exist").into())
    }

    fn remove_dir(&self, path: &Path) -> StampResult<()> {
        let mut inner = self.write()?;
        inner.check_unlocked(path, "remove directory")?;
        let has_child = inner
            .directories
            .iter()
            .chain(inner.files.keys())
            .any(|p| p.parent() == Some(path));
        if has_child {
            return Err(fs_error(path, "Directory not empty").into());
        }
        if !inner.directories.remove(path) {
            return Err(fs_error(path, "Directory does not exist").into());
        }
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> StampResult<()> {
        let mut inner = self.write()?;
        inner.check_unlocked(path, "remove directory")?;
        if !inner.directories.contains(path) {
            return Err(fs_error(path, "Directory does not exist").into());
        }
        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));
        Ok(())
    }
}
