//! Directory discovery - locates layer directories in resource roots.

use std::path::PathBuf;

use tracing::{debug, instrument};

use crate::{
    application::ports::Filesystem,
    domain::{ConfigDirectory, DiscoveredLayers},
};

/// Finds `config/global` and `config/global/class` under each resource root.
pub struct DirectoryDiscovery<'a> {
    filesystem: &'a dyn Filesystem,
}

impl<'a> DirectoryDiscovery<'a> {
    pub fn new(filesystem: &'a dyn Filesystem) -> Self {
        Self { filesystem }
    }

    /// Discover layer directories, keeping the order of `roots`.
    ///
    /// Roots without a configuration tree are silently ignored; an empty
    /// result is valid.
    #[instrument(skip_all, fields(roots = roots.len()))]
    pub fn discover(&self, roots: &[PathBuf]) -> DiscoveredLayers {
        let global: Vec<ConfigDirectory> = roots
            .iter()
            .filter_map(|root| {
                let candidate = ConfigDirectory::global_path_for(root);
                if self.filesystem.is_dir(&candidate) {
                    debug!(path = %candidate.display(), "Found global config directory");
                    Some(ConfigDirectory::global(root, candidate))
                } else {
                    None
                }
            })
            .collect();

        let class = global
            .iter()
            .filter_map(|dir| {
                let candidate = ConfigDirectory::class_path_for(dir.path());
                if self.filesystem.is_dir(&candidate) {
                    debug!(path = %candidate.display(), "Found class config directory");
                    Some(ConfigDirectory::class_of(dir, candidate))
                } else {
                    None
                }
            })
            .collect();

        DiscoveredLayers { global, class }
    }
}
