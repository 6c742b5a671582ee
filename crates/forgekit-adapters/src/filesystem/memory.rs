//! In-memory filesystem adapter for testing.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use forgekit_core::application::ports::Filesystem;

/// In-memory filesystem for testing.
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

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// List all written files, sorted (testing helper).
    pub fn list_files(&self) -> Vec<PathBuf> {
        let inner = self.inner.read().unwrap();
        let mut files: Vec<PathBuf> = inner.files.keys().cloned().collect();
        files.sort();
        files
    }

    /// Number of written files.
    pub fn file_count(&self) -> usize {
        self.inner.read().unwrap().files.len()
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> forgekit_core::error::ForgeResult<()> {
        let mut inner = self.inner.write().unwrap();

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            inner.directories.insert(current.clone());
        }

        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> forgekit_core::error::ForgeResult<()> {
        let mut inner = self.inner.write().unwrap();

        // Mirror the real filesystem: writing into a missing directory fails.
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(forgekit_core::application::ApplicationError::Filesystem {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let inner = self.inner.read().unwrap();
        inner.files.contains_key(path) || inner.directories.contains(path)
    }
}
