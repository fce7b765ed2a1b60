//! Aggregation service - feeds property files into the layer aggregators.
//!
//! Read failures are logged and the file is skipped; merge rule violations
//! from the domain abort the stage.

use tracing::{debug, error, info, instrument, warn};

use crate::{
    application::{ApplicationError, ports::Filesystem, services::reader::PropertyFileReader},
    domain::{
        ClassAggregation, ClassAggregator, ConfigDirectory, GlobalAggregation, GlobalAggregator,
        GlobalUnion, PropertyFile, SkippedFile,
    },
    error::{ConfgenError, ConfgenResult},
};

/// Runs the GLOBAL and CLASS stages.
pub struct AggregationService<'a> {
    reader: PropertyFileReader<'a>,
}

impl<'a> AggregationService<'a> {
    pub fn new(filesystem: &'a dyn Filesystem) -> Self {
        Self {
            reader: PropertyFileReader::new(filesystem),
        }
    }

    /// Merge every GLOBAL property file.
    ///
    /// Returns the aggregation and the files skipped because they could not
    /// be read.
    #[instrument(skip_all, fields(directories = directories.len()))]
    pub fn aggregate_global(
        &self,
        directories: &[ConfigDirectory],
    ) -> ConfgenResult<(GlobalAggregation, Vec<SkippedFile>)> {
        let mut aggregator = GlobalAggregator::new();
        let mut skipped = Vec::new();

        for file in self.read_all(directories, &mut skipped)? {
            aggregator.accept(file)?;
        }

        let aggregation = aggregator.finish();
        debug!(
            files = aggregation.files.len(),
            keys = aggregation.union.len(),
            "Global layer aggregated"
        );
        Ok((aggregation, skipped))
    }

    /// Build CLASS property sets, dropping keys the GLOBAL layer defines.
    #[instrument(skip_all, fields(directories = directories.len()))]
    pub fn aggregate_class(
        &self,
        directories: &[ConfigDirectory],
        global: &GlobalUnion,
    ) -> ConfgenResult<(ClassAggregation, Vec<SkippedFile>)> {
        let mut aggregator = ClassAggregator::new(global);
        let mut skipped = Vec::new();

        for file in self.read_all(directories, &mut skipped)? {
            let name = file.path().display().to_string();
            let outcome = aggregator.accept(file)?;

            for key in &outcome.overridden {
                info!(file = %name, key = %key, "Found global properties override in class file");
            }
            if !outcome.collisions.is_empty() {
                let keys: String = outcome
                    .collisions
                    .iter()
                    .map(|c| format!(" [{}]", c.key))
                    .collect();
                warn!(
                    file = %name,
                    "Found duplicate property definitions, please don't reuse property keys for different purposes:{keys}"
                );
            }
        }

        Ok((aggregator.finish(), skipped))
    }

    fn read_all(
        &self,
        directories: &[ConfigDirectory],
        skipped: &mut Vec<SkippedFile>,
    ) -> ConfgenResult<Vec<PropertyFile>> {
        let mut files = Vec::new();
        for dir in directories {
            debug!(path = %dir.path().display(), layer = %dir.layer(), "Scanning config directory");
            for path in self.reader.list(dir.path())? {
                match self.reader.read(&path) {
                    Ok(file) => files.push(file),
                    Err(ConfgenError::Application(e @ ApplicationError::ReadFailed { .. })) => {
                        error!(error = %e, "Skipping unreadable properties file");
                        skipped.push(SkippedFile {
                            path,
                            reason: e.to_string(),
                        });
                    }
                    Err(e) => return Err(e),
                }
            }
        }
        Ok(files)
    }
}
