//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `confgen-adapters` crate provides implementations.

use crate::domain::GeneratedClassSpec;
use crate::error::ConfgenResult;
use std::path::{Path, PathBuf};

/// Port for filesystem operations.
///
/// Implemented by:
/// - `confgen_adapters::filesystem::LocalFilesystem` (production)
/// - `confgen_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - Listing order is unspecified; callers sort
/// - Read failures surface as `ApplicationError::ReadFailed`, write and
///   directory-creation failures as `ApplicationError::WriteFailed`
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// `true` if the path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Regular files directly inside `dir` (no recursion).
    fn list_files(&self, dir: &Path) -> ConfgenResult<Vec<PathBuf>>;

    /// Read a UTF-8 text file.
    fn read_to_string(&self, path: &Path) -> ConfgenResult<String>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> ConfgenResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> ConfgenResult<()>;
}

/// Port for turning a class spec into source text.
///
/// Implemented by:
/// - `confgen_adapters::renderer::HandlebarsRenderer` (built-in or custom template)
///
/// Implementations must be deterministic: the same spec always renders to
/// the same bytes.
#[cfg_attr(test, mockall::automock)]
pub trait ClassRenderer: Send + Sync {
    /// Render one generated class.
    fn render(&self, spec: &GeneratedClassSpec) -> ConfgenResult<String>;

    /// Extension of the produced source file, without the dot.
    fn file_extension(&self) -> &'static str;
}
