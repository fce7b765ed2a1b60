//! Generation Service - main application orchestrator.
//!
//! One run walks the pipeline front to back:
//! 1. Validate the base package
//! 2. Discover `config/global` and `config/global/class` in every root
//! 3. Aggregate the GLOBAL layer (fatal on duplicate keys or file names)
//! 4. Aggregate the CLASS layer against the GLOBAL union
//! 5. Emit `G` and `C`
//!
//! Nothing is written until both layers are aggregated, so a fatal merge
//! error leaves the output directory untouched.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    application::{
        ports::{ClassRenderer, Filesystem},
        services::{
            aggregation::AggregationService, discovery::DirectoryDiscovery, emitter::CodeEmitter,
        },
    },
    domain::{
        Diagnostics, DiscoveredLayers, DomainValidator as validator,
        GeneratedClassSpec, PropertyFile, SourceSet,
        value_objects::{CLASS_CLASS_NAME, GLOBAL_CLASS_NAME},
    },
    error::ConfgenResult,
};

/// Input of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Resource roots in lookup order (test resources first by convention).
    pub resource_roots: Vec<PathBuf>,
    pub output_dir: PathBuf,
    /// Raw package name; validated at the start of the run.
    pub base_package: String,
    pub source_set: SourceSet,
}

impl GenerationRequest {
    pub fn new(
        resource_roots: Vec<PathBuf>,
        output_dir: impl Into<PathBuf>,
        base_package: impl Into<String>,
    ) -> Self {
        Self {
            resource_roots,
            output_dir: output_dir.into(),
            base_package: base_package.into(),
            source_set: SourceSet::default(),
        }
    }

    pub fn with_source_set(mut self, source_set: SourceSet) -> Self {
        self.source_set = source_set;
        self
    }
}

/// What the host needs to register the generated sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    /// Root of the generated source tree.
    pub source_root: PathBuf,
    pub source_set: SourceSet,
    /// Written files, `G` first.
    pub generated: Vec<PathBuf>,
    pub global_groups: Vec<String>,
    pub class_groups: Vec<String>,
    pub diagnostics: Diagnostics,
}

/// Discovery and aggregation results without any output written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    pub directories: DiscoveredLayers,
    pub global: Vec<PropertyFile>,
    pub class: Vec<PropertyFile>,
    pub diagnostics: Diagnostics,
}

impl ScanReport {
    pub fn global_key_count(&self) -> usize {
        self.global.iter().map(PropertyFile::len).sum()
    }

    pub fn class_key_count(&self) -> usize {
        self.class.iter().map(PropertyFile::len).sum()
    }
}

/// Result of a dry run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationPlan {
    pub scan: ScanReport,
    /// Paths that would be written, `G` first.
    pub targets: Vec<PathBuf>,
}

/// Main generation service.
pub struct GenerationService {
    filesystem: Box<dyn Filesystem>,
    renderer: Box<dyn ClassRenderer>,
}

impl GenerationService {
    /// Create a new generation service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use confgen_core::application::{GenerationRequest, GenerationService};
    ///
    /// let service = GenerationService::new(
    ///     Box::new(filesystem), // impl Filesystem
    ///     Box::new(renderer),   // impl ClassRenderer
    /// );
    /// let report = service.run(&GenerationRequest::new(roots, "target/gen", "gen.config"))?;
    /// ```
    pub fn new(filesystem: Box<dyn Filesystem>, renderer: Box<dyn ClassRenderer>) -> Self {
        Self {
            filesystem,
            renderer,
        }
    }

    /// Discover and aggregate both layers without writing anything.
    #[instrument(skip_all, fields(roots = resource_roots.len()))]
    pub fn scan(&self, resource_roots: &[PathBuf]) -> ConfgenResult<ScanReport> {
        let directories = DirectoryDiscovery::new(self.filesystem.as_ref()).discover(resource_roots);
        if directories.is_empty() {
            info!("No config directories found in resource roots");
        }

        let aggregation = AggregationService::new(self.filesystem.as_ref());
        let (global, mut skipped) = aggregation.aggregate_global(&directories.global)?;
        let (class, class_skipped) = aggregation.aggregate_class(&directories.class, &global.union)?;
        skipped.extend(class_skipped);

        Ok(ScanReport {
            directories,
            global: global.files,
            class: class.files,
            diagnostics: Diagnostics {
                skipped,
                overrides: class.overrides,
                collisions: class.collisions,
            },
        })
    }

    /// Everything [`Self::run`] checks, without writing: the merged layers
    /// plus the paths `G` and `C` would be written to.
    #[instrument(skip_all, fields(package = %request.base_package))]
    pub fn plan(&self, request: &GenerationRequest) -> ConfgenResult<GenerationPlan> {
        let (scan, specs) = self.prepare(request)?;
        let emitter = CodeEmitter::new(self.filesystem.as_ref(), self.renderer.as_ref());
        let targets = specs
            .iter()
            .map(|spec| emitter.target_path(spec, &request.output_dir))
            .collect();
        Ok(GenerationPlan { scan, targets })
    }

    /// Run the whole pipeline and write `G` and `C`.
    ///
    /// Both classes are always written, even without any property file, so
    /// the source root can be registered unconditionally.
    #[instrument(
        skip_all,
        fields(
            output_dir = %request.output_dir.display(),
            package = %request.base_package
        )
    )]
    pub fn run(&self, request: &GenerationRequest) -> ConfgenResult<GenerationReport> {
        let (scan, specs) = self.prepare(request)?;

        let emitter = CodeEmitter::new(self.filesystem.as_ref(), self.renderer.as_ref());
        let generated = specs
            .iter()
            .map(|spec| emitter.emit(spec, &request.output_dir))
            .collect::<ConfgenResult<Vec<_>>>()?;

        info!(
            files = generated.len(),
            source_set = %request.source_set,
            "Generation completed successfully"
        );

        let [global, class] = specs;
        Ok(GenerationReport {
            source_root: request.output_dir.clone(),
            source_set: request.source_set,
            generated,
            global_groups: group_names(&global),
            class_groups: group_names(&class),
            diagnostics: scan.diagnostics,
        })
    }

    /// Package check, scan, and both class specs validated before either is
    /// written.
    fn prepare(
        &self,
        request: &GenerationRequest,
    ) -> ConfgenResult<(ScanReport, [GeneratedClassSpec; 2])> {
        let package = validator::validate_package(&request.base_package)?;
        let scan = self.scan(&request.resource_roots)?;

        let specs = [
            GeneratedClassSpec::from_files(GLOBAL_CLASS_NAME, package.clone(), &scan.global),
            GeneratedClassSpec::from_files(CLASS_CLASS_NAME, package, &scan.class),
        ];
        for spec in &specs {
            validator::validate_class_spec(spec)?;
        }
        Ok((scan, specs))
    }
}

fn group_names(spec: &GeneratedClassSpec) -> Vec<String> {
    spec.groups.iter().map(|g| g.name.clone()).collect()
}
