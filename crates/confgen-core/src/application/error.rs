//! Application layer errors.
//!
//! These errors represent I/O and rendering failures, not configuration
//! authoring mistakes. Those are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while reading inputs or producing outputs.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// A property file could not be opened, decoded, or parsed.
    ///
    /// Non-fatal during aggregation: the file is logged and skipped.
    #[error("Could not read properties file from {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    /// A generated source file (or its directory) could not be written.
    #[error("Could not write generated source {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    /// A configuration directory could not be listed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Template rendering failed.
    #[error("Template rendering failed for class {class_name}: {reason}")]
    RenderingFailed { class_name: String, reason: String },

    /// Shared state of an in-memory adapter was poisoned.
    #[error("Filesystem adapter lock poisoned")]
    LockPoisoned,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ReadFailed { path, .. } => vec![
                format!("Check the syntax and encoding (UTF-8) of {}", path.display()),
            ],
            Self::WriteFailed { path, .. } => vec![
                format!("Failed to write: {}", path.display()),
                "Check that you have write permissions on the output directory".into(),
                "Check available disk space".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that the resource directories are readable".into(),
            ],
            Self::RenderingFailed { .. } => vec![
                "If you use a custom template, check it against the built-in one".into(),
            ],
            Self::LockPoisoned => vec!["This appears to be a bug in confgen".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ReadFailed { .. } => ErrorCategory::Validation,
            Self::WriteFailed { .. } | Self::FilesystemError { .. } => ErrorCategory::Io,
            Self::RenderingFailed { .. } => ErrorCategory::Configuration,
            Self::LockPoisoned => ErrorCategory::Internal,
        }
    }
}
