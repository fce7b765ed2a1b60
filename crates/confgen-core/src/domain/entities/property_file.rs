use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::properties::PropertyMap;

/// A parsed property file.
///
/// The base name (file name without `.properties`) is both the duplicate
/// detection key within a layer and the generated group name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyFile {
    base_name: String,
    path: PathBuf,
    properties: PropertyMap,
}

impl PropertyFile {
    pub fn new(path: impl Into<PathBuf>, properties: PropertyMap) -> Self {
        let path = path.into();
        let base_name = base_name_of(&path);
        Self {
            base_name,
            path,
            properties,
        }
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn properties(&self) -> &PropertyMap {
        &self.properties
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// Keys of `other` that this file also defines, in `other`'s read order.
    pub fn shared_keys(&self, other: &PropertyFile) -> Vec<String> {
        other
            .properties
            .keys()
            .filter(|k| self.properties.contains_key(k.as_str()))
            .cloned()
            .collect()
    }

    /// Split off every key matching `remove`, keeping the relative order of
    /// what stays. Returns the filtered file and the removed keys.
    pub fn partition_keys(self, remove: impl Fn(&str) -> bool) -> (Self, Vec<String>) {
        let mut removed = Vec::new();
        let mut kept = PropertyMap::with_capacity(self.properties.len());
        for (key, value) in self.properties {
            if remove(&key) {
                removed.push(key);
            } else {
                kept.insert(key, value);
            }
        }
        (
            Self {
                base_name: self.base_name,
                path: self.path,
                properties: kept,
            },
            removed,
        )
    }
}

/// File name without its last extension.
pub fn base_name_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
