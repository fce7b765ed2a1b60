//! Application layer for confgen.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (GenerationService and its stages)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! merge rules itself. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    AggregationService, CodeEmitter, DirectoryDiscovery, GenerationPlan, GenerationReport,
    GenerationRequest, GenerationService, PropertyFileReader, ScanReport,
};

// Re-export port traits (for adapter implementation)
pub use ports::{ClassRenderer, Filesystem};

pub use error::ApplicationError;
