//! Property file reader - lists and parses property files through the
//! filesystem port.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{PropertyFile, properties, value_objects::PROPERTIES_EXTENSION},
    error::{ConfgenError, ConfgenResult},
};

/// Reads single property files.
pub struct PropertyFileReader<'a> {
    filesystem: &'a dyn Filesystem,
}

impl<'a> PropertyFileReader<'a> {
    pub fn new(filesystem: &'a dyn Filesystem) -> Self {
        Self { filesystem }
    }

    /// Property files directly inside `dir`, sorted by file name.
    ///
    /// The sort makes the result independent of the platform's directory
    /// enumeration order.
    pub fn list(&self, dir: &Path) -> ConfgenResult<Vec<PathBuf>> {
        let mut files: Vec<PathBuf> = self
            .filesystem
            .list_files(dir)?
            .into_iter()
            .filter(|p| is_property_file(p))
            .collect();
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(files)
    }

    /// Read and parse one file.
    ///
    /// Every failure, including syntax errors, is reported as
    /// [`ApplicationError::ReadFailed`].
    pub fn read(&self, path: &Path) -> ConfgenResult<PropertyFile> {
        debug!(path = %path.display(), "Parsing property file");
        let text = self.filesystem.read_to_string(path)?;
        let map = properties::parse(&text).map_err(|e| -> ConfgenError {
            ApplicationError::ReadFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
            .into()
        })?;
        Ok(PropertyFile::new(path, map))
    }
}

fn is_property_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == PROPERTIES_EXTENSION)
}
