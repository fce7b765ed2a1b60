use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::value_objects::{
    CONFIG_BASE_FOLDER, CONFIG_CLASS_FOLDER, CONFIG_GLOBAL_FOLDER, Layer,
};

/// A discovered layer directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigDirectory {
    layer: Layer,
    path: PathBuf,
    /// Resource root the directory was found under.
    root: PathBuf,
}

impl ConfigDirectory {
    pub fn global(root: impl Into<PathBuf>, path: impl Into<PathBuf>) -> Self {
        Self {
            layer: Layer::Global,
            path: path.into(),
            root: root.into(),
        }
    }

    /// CLASS directory belonging to this GLOBAL one.
    pub fn class_of(global: &ConfigDirectory, path: impl Into<PathBuf>) -> Self {
        Self {
            layer: Layer::Class,
            path: path.into(),
            root: global.root.clone(),
        }
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/config/global`
    pub fn global_path_for(root: &Path) -> PathBuf {
        root.join(CONFIG_BASE_FOLDER).join(CONFIG_GLOBAL_FOLDER)
    }

    /// `<global>/class`
    pub fn class_path_for(global: &Path) -> PathBuf {
        global.join(CONFIG_CLASS_FOLDER)
    }
}

/// Result of directory discovery, both lists in resource root order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiscoveredLayers {
    pub global: Vec<ConfigDirectory>,
    pub class: Vec<ConfigDirectory>,
}

impl DiscoveredLayers {
    pub fn is_empty(&self) -> bool {
        self.global.is_empty() && self.class.is_empty()
    }
}
