//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `confgen-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: resource scanning, reading property files, writing sources
//!   - `ClassRenderer`: class spec → source text
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - `GenerationService::run` / `crate::run` (CLI, build plugins, tests)

pub mod output;

pub use output::{ClassRenderer, Filesystem};

#[cfg(test)]
pub use output::{MockClassRenderer, MockFilesystem};
