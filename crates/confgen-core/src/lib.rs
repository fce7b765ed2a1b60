//! confgen core - layered configuration constants, hexagonal style.
//!
//! This crate provides the domain and application layers of the confgen
//! generator. It discovers `config/global` and `config/global/class`
//! property files in a list of resource roots, merges them under the layer
//! rules, and hands the result to a renderer that writes the `G` and `C`
//! constant classes.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           confgen-cli (CLI)             │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (GenerationService, Aggregation, ...)  │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │       (Filesystem, ClassRenderer)       │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     confgen-adapters (Infrastructure)   │
//! │  (LocalFilesystem, HandlebarsRenderer)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (PropertyFile, Global/ClassAggregator) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use confgen_core::application::{GenerationRequest, GenerationService};
//!
//! let service = GenerationService::new(Box::new(filesystem), Box::new(renderer));
//! let report = service.run(&GenerationRequest::new(
//!     vec!["src/test/resources".into(), "src/main/resources".into()],
//!     "target/generated-sources/config",
//!     "gen.config",
//! ))?;
//! println!("register {}", report.source_root.display());
//! ```

use std::path::PathBuf;

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GenerationPlan, GenerationReport, GenerationRequest, GenerationService, ScanReport,
        ports::{ClassRenderer, Filesystem},
    };
    pub use crate::domain::{
        BasePackage, Diagnostics, DomainError, GeneratedClassSpec, PropertyFile, PropertyMap,
        SourceSet,
    };
    pub use crate::error::{ConfgenError, ConfgenResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// One-shot generation with the given adapters and default source set.
///
/// Shorthand for building a [`GenerationService`](application::GenerationService)
/// and calling `run` once.
pub fn run(
    filesystem: impl application::Filesystem + 'static,
    renderer: impl application::ClassRenderer + 'static,
    resource_roots: Vec<PathBuf>,
    output_dir: impl Into<PathBuf>,
    base_package: impl Into<String>,
) -> error::ConfgenResult<application::GenerationReport> {
    let service = application::GenerationService::new(Box::new(filesystem), Box::new(renderer));
    service.run(&application::GenerationRequest::new(
        resource_roots,
        output_dir,
        base_package,
    ))
}
