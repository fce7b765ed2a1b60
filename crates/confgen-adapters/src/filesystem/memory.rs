//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use confgen_core::{
    application::{ApplicationError, ports::Filesystem},
    error::ConfgenResult,
};

/// In-memory filesystem for testing.
///
/// Clones share the same contents, so a test can keep a handle after
/// boxing one into a service.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, Vec<u8>>,
    directories: BTreeSet<PathBuf>,
}

impl MemoryFilesystemInner {
    fn add_ancestors(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.directories.insert(current.clone());
        }
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text file, creating its parent directories (testing helper).
    pub fn with_file(self, path: impl AsRef<Path>, content: &str) -> Self {
        self.insert(path.as_ref(), content.as_bytes().to_vec());
        self
    }

    /// Add a file with raw bytes, e.g. invalid UTF-8 (testing helper).
    pub fn with_bytes(self, path: impl AsRef<Path>, bytes: &[u8]) -> Self {
        self.insert(path.as_ref(), bytes.to_vec());
        self
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        let bytes = inner.files.get(path)?;
        String::from_utf8(bytes.clone()).ok()
    }

    /// All file paths, sorted.
    pub fn files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn insert(&self, path: &Path, bytes: Vec<u8>) {
        if let Ok(mut inner) = self.inner.write() {
            if let Some(parent) = path.parent() {
                inner.add_ancestors(parent);
            }
            inner.files.insert(path.to_path_buf(), bytes);
        }
    }
}

impl Filesystem for MemoryFilesystem {
    fn is_dir(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn list_files(&self, dir: &Path) -> ConfgenResult<Vec<PathBuf>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::LockPoisoned)?;

        if !inner.directories.contains(dir) {
            return Err(ApplicationError::FilesystemError {
                path: dir.to_path_buf(),
                reason: "Directory does not exist".into(),
            }
            .into());
        }

        Ok(inner
            .files
            .keys()
            .filter(|p| p.parent() == Some(dir))
            .cloned()
            .collect())
    }

    fn read_to_string(&self, path: &Path) -> ConfgenResult<String> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::LockPoisoned)?;

        let bytes = inner
            .files
            .get(path)
            .ok_or_else(|| ApplicationError::ReadFailed {
                path: path.to_path_buf(),
                reason: "No such file".into(),
            })?;

        String::from_utf8(bytes.clone()).map_err(|e| {
            ApplicationError::ReadFailed {
                path: path.to_path_buf(),
                reason: format!("not valid UTF-8: {}", e),
            }
            .into()
        })
    }

    fn create_dir_all(&self, path: &Path) -> ConfgenResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned)?;
        inner.add_ancestors(path);
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> ConfgenResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned)?;

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::WriteFailed {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner
            .files
            .insert(path.to_path_buf(), content.as_bytes().to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_file_creates_parent_directories() {
        let fs = MemoryFilesystem::new().with_file("/r/config/global/app.properties", "a=1");

        assert!(fs.is_dir(Path::new("/r/config/global")));
        assert!(fs.is_dir(Path::new("/r")));
        assert!(!fs.is_dir(Path::new("/r/config/global/class")));
        assert_eq!(
            fs.list_files(Path::new("/r/config")).unwrap(),
            Vec::<PathBuf>::new()
        );
    }

    #[test]
    fn write_requires_parent() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("/out/G.java"), "x").is_err());

        fs.create_dir_all(Path::new("/out")).unwrap();
        fs.write_file(Path::new("/out/G.java"), "x").unwrap();
        assert_eq!(fs.read_file(Path::new("/out/G.java")).as_deref(), Some("x"));
    }

    #[test]
    fn clones_share_contents() {
        let fs = MemoryFilesystem::new();
        let handle = fs.clone();
        fs.create_dir_all(Path::new("/d")).unwrap();
        fs.write_file(Path::new("/d/f"), "v").unwrap();
        assert_eq!(handle.files(), vec![PathBuf::from("/d/f")]);
    }

    #[test]
    fn invalid_utf8_fails_to_read() {
        let fs = MemoryFilesystem::new().with_bytes("/d/bad.properties", &[0xff]);
        assert!(fs.read_to_string(Path::new("/d/bad.properties")).is_err());
    }
}
