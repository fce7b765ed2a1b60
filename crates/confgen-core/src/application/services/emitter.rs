//! Code emitter - renders a class spec and writes it below the output root.

use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::{
    application::ports::{ClassRenderer, Filesystem},
    domain::{DomainValidator as validator, GeneratedClassSpec},
    error::ConfgenResult,
};

pub struct CodeEmitter<'a> {
    filesystem: &'a dyn Filesystem,
    renderer: &'a dyn ClassRenderer,
}

impl<'a> CodeEmitter<'a> {
    pub fn new(filesystem: &'a dyn Filesystem, renderer: &'a dyn ClassRenderer) -> Self {
        Self {
            filesystem,
            renderer,
        }
    }

    /// Path the class is written to: `<output_dir>/<package dirs>/<Class>.<ext>`.
    pub fn target_path(&self, spec: &GeneratedClassSpec, output_dir: &Path) -> PathBuf {
        output_dir
            .join(spec.package.as_path())
            .join(format!("{}.{}", spec.class_name, self.renderer.file_extension()))
    }

    /// Validate, render and write one class. Existing files are replaced.
    #[instrument(skip_all, fields(class = %spec.class_name))]
    pub fn emit(&self, spec: &GeneratedClassSpec, output_dir: &Path) -> ConfgenResult<PathBuf> {
        validator::validate_class_spec(spec)?;

        let source = self.renderer.render(spec)?;
        let path = self.target_path(spec, output_dir);

        if let Some(parent) = path.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.write_file(&path, &source)?;

        info!(
            path = %path.display(),
            groups = spec.groups.len(),
            constants = spec.constant_count(),
            "Generated class written"
        );
        Ok(path)
    }
}
