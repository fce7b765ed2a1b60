//! Unified error handling for confgen core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for confgen core operations.
#[derive(Debug, Error, Clone)]
pub enum ConfgenError {
    /// Configuration authoring mistakes (duplicate keys, bad package, ...).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Reading, writing or rendering failures.
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl ConfgenError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Run `confgen config list` to see the effective settings".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Conflict => ErrorCategory::Conflict,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
        }
    }

    /// `true` for errors caused by the property files themselves, as opposed
    /// to the environment.
    pub fn is_authoring_error(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Validation | ErrorCategory::Conflict
        )
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
    Io,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type ConfgenResult<T> = Result<T, ConfgenError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn domain_errors_keep_their_message() {
        let err: ConfgenError = DomainError::InvalidPackage {
            package: "1x".into(),
            reason: "segment starts with a digit".into(),
        }
        .into();

        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(err.is_authoring_error());
        assert!(err.to_string().contains("1x"));
    }

    #[test]
    fn write_failure_is_io() {
        let err: ConfgenError = ApplicationError::WriteFailed {
            path: PathBuf::from("/out/G.java"),
            reason: "read-only".into(),
        }
        .into();

        assert_eq!(err.category(), ErrorCategory::Io);
        assert!(!err.is_authoring_error());
        assert!(!err.suggestions().is_empty());
    }
}
