//! Core domain layer for confgen.
//!
//! This module contains the pure merge rules with no I/O. Reading files and
//! writing generated sources are handled via ports (traits) defined in the
//! application layer.
//!
//! ## Layering rules
//!
//! - **GLOBAL** keys are unique across all GLOBAL files (violations abort)
//! - **CLASS** keys also defined globally are dropped (override-by-omission)
//! - **CLASS** keys shared between CLASS files are reported, never fatal
//! - File base names are unique per layer across all resource roots
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod properties;
pub mod value_objects;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use entities::{
    aggregation::{
        ClassAggregation, ClassAggregator, ClassFileOutcome, Diagnostics, GlobalAggregation,
        GlobalAggregator, GlobalUnion, KeyCollision, OverrideNotice, SkippedFile,
    },
    config_directory::{ConfigDirectory, DiscoveredLayers},
    generated_class::{Constant, ConstantGroup, GeneratedClassSpec},
    property_file::PropertyFile,
};

pub use error::{DomainError, ErrorCategory, KeyConflict};

pub use properties::{PropertiesError, PropertyMap};

pub use value_objects::{BasePackage, Layer, SourceSet, sanitize_identifier};

pub use validation::DomainValidator;
