//! Local filesystem adapter using std::fs.

use std::io;
use std::path::{Path, PathBuf};

use confgen_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{ConfgenError, ConfgenResult},
};
use tracing::{trace, warn};
use walkdir::WalkDir;

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
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_files(&self, dir: &Path) -> ConfgenResult<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let entry = match entry {
                Ok(entry) => entry,
                // A broken child entry is left for the reader to fail on.
                Err(e) if e.depth() > 0 => {
                    if let Some(path) = e.path() {
                        warn!(path = %path.display(), error = %e, "Unresolvable directory entry");
                        files.push(path.to_path_buf());
                    }
                    continue;
                }
                Err(e) => {
                    return Err(ApplicationError::FilesystemError {
                        path: dir.to_path_buf(),
                        reason: format!("Failed to list directory: {}", e),
                    }
                    .into());
                }
            };
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        trace!(dir = %dir.display(), count = files.len(), "Listed directory");
        Ok(files)
    }

    fn read_to_string(&self, path: &Path) -> ConfgenResult<String> {
        let bytes = std::fs::read(path).map_err(|e| read_error(path, e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| read_error(path, format!("not valid UTF-8: {}", e)))
    }

    fn create_dir_all(&self, path: &Path) -> ConfgenResult<()> {
        std::fs::create_dir_all(path).map_err(|e| write_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> ConfgenResult<()> {
        std::fs::write(path, content).map_err(|e| write_error(path, e, "write file"))
    }
}

fn read_error(path: &Path, reason: String) -> ConfgenError {
    ApplicationError::ReadFailed {
        path: path.to_path_buf(),
        reason,
    }
    .into()
}

fn write_error(path: &Path, e: io::Error, operation: &str) -> ConfgenError {
    ApplicationError::WriteFailed {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn lists_only_direct_files() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("a.properties"), "a=1").unwrap();
        std::fs::create_dir(tmp.path().join("class")).unwrap();
        std::fs::write(tmp.path().join("class/b.properties"), "b=1").unwrap();

        let files = LocalFilesystem::new().list_files(tmp.path()).unwrap();
        assert_eq!(files, vec![tmp.path().join("a.properties")]);
    }

    #[test]
    fn missing_directory_is_a_filesystem_error() {
        let tmp = TempDir::new().unwrap();
        let err = LocalFilesystem::new()
            .list_files(&tmp.path().join("nope"))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfgenError::Application(ApplicationError::FilesystemError { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_is_listed_not_fatal() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("app.properties"), "a=1").unwrap();
        std::os::unix::fs::symlink(tmp.path().join("missing"), tmp.path().join("gone.properties"))
            .unwrap();

        let fs = LocalFilesystem::new();
        let mut files = fs.list_files(tmp.path()).unwrap();
        files.sort();
        assert_eq!(
            files,
            vec![tmp.path().join("app.properties"), tmp.path().join("gone.properties")]
        );
        assert!(matches!(
            fs.read_to_string(&tmp.path().join("gone.properties")),
            Err(ConfgenError::Application(ApplicationError::ReadFailed { .. }))
        ));
    }

    #[test]
    fn invalid_utf8_is_a_read_failure() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.properties");
        std::fs::write(&path, [b'a', b'=', 0xff, 0xfe]).unwrap();

        let err = LocalFilesystem::new().read_to_string(&path).unwrap_err();
        assert!(matches!(
            err,
            ConfgenError::Application(ApplicationError::ReadFailed { .. })
        ));
    }

    #[test]
    fn write_creates_and_replaces() {
        let tmp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let dir = tmp.path().join("gen/config");
        let file = dir.join("G.java");

        fs.create_dir_all(&dir).unwrap();
        fs.write_file(&file, "one").unwrap();
        fs.write_file(&file, "two").unwrap();

        assert!(fs.is_dir(&dir));
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "two");
    }
}
