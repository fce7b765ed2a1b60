//! Layer merge rules.
//!
//! [`GlobalAggregator`] and [`ClassAggregator`] hold the override and
//! duplicate-detection rules. They never touch the filesystem: the
//! application layer reads files and feeds them in one by one, in
//! deterministic order.
//!
//! ```text
//!   GLOBAL files ──► GlobalAggregator ──► GlobalAggregation
//!                                            │ union (read-only)
//!                                            ▼
//!   CLASS files  ──► ClassAggregator  ──► ClassAggregation
//! ```

use std::collections::HashMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::domain::{
    entities::property_file::PropertyFile,
    error::{DomainError, KeyConflict},
    properties::PropertyMap,
    value_objects::Layer,
};

// ============================================================================
// Diagnostics
// ============================================================================

/// A CLASS key dropped because the GLOBAL layer defines it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverrideNotice {
    pub key: String,
    pub file: PathBuf,
}

/// A key defined by two CLASS files after global filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyCollision {
    pub key: String,
    pub file: PathBuf,
    pub other: PathBuf,
}

/// A property file that could not be read or parsed and was left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Non-fatal findings of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    pub skipped: Vec<SkippedFile>,
    pub overrides: Vec<OverrideNotice>,
    pub collisions: Vec<KeyCollision>,
}

impl Diagnostics {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.collisions.is_empty()
    }
}

// ============================================================================
// Global layer
// ============================================================================

/// Every key defined in the GLOBAL layer, in first-seen order.
///
/// Immutable once built; the CLASS stage only reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GlobalUnion(PropertyMap);

impl GlobalUnion {
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Output of the GLOBAL stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GlobalAggregation {
    pub union: GlobalUnion,
    pub files: Vec<PropertyFile>,
}

/// Merges GLOBAL files, rejecting any key defined twice.
#[derive(Debug, Default)]
pub struct GlobalAggregator {
    union: PropertyMap,
    files: Vec<PropertyFile>,
    registry: HashMap<String, PathBuf>,
}

impl GlobalAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one more file.
    ///
    /// Key collisions are checked before base-name collisions, so two roots
    /// shipping the same file with the same keys report the keys.
    pub fn accept(&mut self, file: PropertyFile) -> Result<(), DomainError> {
        let conflicts: Vec<KeyConflict> = self
            .files
            .iter()
            .flat_map(|previous| {
                previous
                    .shared_keys(&file)
                    .into_iter()
                    .map(|key| KeyConflict {
                        key,
                        defined_in: previous.path().to_path_buf(),
                    })
            })
            .collect();

        if !conflicts.is_empty() {
            return Err(DomainError::DuplicateGlobalKey {
                file: file.path().to_path_buf(),
                conflicts,
            });
        }

        register(&mut self.registry, &file, Layer::Global)?;

        self.union.extend(
            file.properties()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        self.files.push(file);
        Ok(())
    }

    pub fn finish(self) -> GlobalAggregation {
        GlobalAggregation {
            union: GlobalUnion(self.union),
            files: self.files,
        }
    }
}

// ============================================================================
// Class layer
// ============================================================================

/// What happened to one CLASS file on the way in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassFileOutcome {
    /// Keys dropped because the GLOBAL layer defines them.
    pub overridden: Vec<String>,
    /// Keys this file shares with earlier CLASS files.
    pub collisions: Vec<KeyCollision>,
}

/// Output of the CLASS stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassAggregation {
    pub files: Vec<PropertyFile>,
    pub overrides: Vec<OverrideNotice>,
    pub collisions: Vec<KeyCollision>,
}

/// Builds per-class property sets with GLOBAL keys omitted.
///
/// Unlike the GLOBAL layer, keys shared between CLASS files are only
/// reported; each class gets its own nested group so the values do not mix.
#[derive(Debug)]
pub struct ClassAggregator<'g> {
    global: &'g GlobalUnion,
    files: Vec<PropertyFile>,
    registry: HashMap<String, PathBuf>,
    overrides: Vec<OverrideNotice>,
    collisions: Vec<KeyCollision>,
}

impl<'g> ClassAggregator<'g> {
    pub fn new(global: &'g GlobalUnion) -> Self {
        Self {
            global,
            files: Vec::new(),
            registry: HashMap::new(),
            overrides: Vec::new(),
            collisions: Vec::new(),
        }
    }

    pub fn accept(&mut self, file: PropertyFile) -> Result<ClassFileOutcome, DomainError> {
        let (filtered, overridden) = file.partition_keys(|key| self.global.contains_key(key));

        let collisions: Vec<KeyCollision> = self
            .files
            .iter()
            .flat_map(|previous| {
                previous
                    .shared_keys(&filtered)
                    .into_iter()
                    .map(|key| KeyCollision {
                        key,
                        file: filtered.path().to_path_buf(),
                        other: previous.path().to_path_buf(),
                    })
            })
            .collect();

        register(&mut self.registry, &filtered, Layer::Class)?;

        self.overrides
            .extend(overridden.iter().map(|key| OverrideNotice {
                key: key.clone(),
                file: filtered.path().to_path_buf(),
            }));
        self.collisions.extend(collisions.iter().cloned());
        self.files.push(filtered);

        Ok(ClassFileOutcome {
            overridden,
            collisions,
        })
    }

    pub fn finish(self) -> ClassAggregation {
        ClassAggregation {
            files: self.files,
            overrides: self.overrides,
            collisions: self.collisions,
        }
    }
}

fn register(
    registry: &mut HashMap<String, PathBuf>,
    file: &PropertyFile,
    layer: Layer,
) -> Result<(), DomainError> {
    if let Some(previous) = registry.get(file.base_name()) {
        return Err(DomainError::DuplicateFileName {
            name: file.base_name().to_string(),
            layer: layer.to_string(),
            path: file.path().to_path_buf(),
            previous: previous.clone(),
        });
    }
    registry.insert(file.base_name().to_string(), file.path().to_path_buf());
    Ok(())
}
