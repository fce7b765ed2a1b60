//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "generate G and C" or "scan the resource roots".

pub mod aggregation;
pub mod discovery;
pub mod emitter;
pub mod generation_service;
pub mod reader;

pub use aggregation::AggregationService;
pub use discovery::DirectoryDiscovery;
pub use emitter::CodeEmitter;
pub use generation_service::{
    GenerationPlan, GenerationReport, GenerationRequest, GenerationService, ScanReport,
};
pub use reader::PropertyFileReader;
