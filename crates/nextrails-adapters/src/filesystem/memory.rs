//! In-memory filesystem adapter for testing.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use nextrails_core::{
    application::{ApplicationError, ports::Filesystem},
    error::NextRailsResult,
};

/// In-memory filesystem for testing.
///
/// Clones share state, so a test can hand one clone to a service and inspect
/// the other afterwards.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: HashMap<PathBuf, String>,
    directories: HashSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, creating its parent directories (testing helper).
    pub fn with_file(self, path: impl AsRef<Path>, content: &str) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            let path = path.as_ref();
            if let Some(parent) = path.parent() {
                insert_ancestors(&mut inner.directories, parent);
            }
            inner.files.insert(path.to_path_buf(), content.to_string());
        }
        self
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path.as_ref()).cloned()
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = self
            .inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default();
        files.sort();
        files
    }

    fn write(&self) -> NextRailsResult<std::sync::RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        Ok(self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?)
    }
}

fn insert_ancestors(directories: &mut HashSet<PathBuf>, path: &Path) {
    let mut current = PathBuf::new();
    for component in path.components() {
        current.push(component);
        directories.insert(current.clone());
    }
}

fn not_found(path: &Path) -> ApplicationError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: "No such file".into(),
    }
}

impl Filesystem for MemoryFilesystem {
    fn read_to_string(&self, path: &Path) -> NextRailsResult<String> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(inner
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| not_found(path))?)
    }

    fn write_file(&self, path: &Path, content: &str) -> NextRailsResult<()> {
        let mut inner = self.write()?;

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn append(&self, path: &Path, content: &str) -> NextRailsResult<()> {
        let mut inner = self.write()?;
        let file = inner.files.get_mut(path).ok_or_else(|| not_found(path))?;
        file.push_str(content);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn create_dir_all(&self, path: &Path) -> NextRailsResult<()> {
        let mut inner = self.write()?;
        insert_ancestors(&mut inner.directories, path);
        Ok(())
    }
}
