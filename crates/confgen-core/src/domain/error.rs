// ============================================================================
// domain/error.rs - CONFIGURATION AUTHORING ERRORS
// ============================================================================

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// One key that a newly read GLOBAL file shares with an earlier one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyConflict {
    pub key: String,
    pub defined_in: PathBuf,
}

impl fmt::Display for KeyConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] (also in {})", self.key, self.defined_in.display())
    }
}

/// Root domain error type.
///
/// Every variant is a deterministic authoring mistake in the configuration
/// tree; re-running without changing the files yields the same error.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Layer invariants
    // ========================================================================
    #[error(
        "Found duplicate property definitions in {}, keys must be unique over files on the global layer: {}",
        .file.display(),
        join_conflicts(.conflicts)
    )]
    DuplicateGlobalKey {
        file: PathBuf,
        conflicts: Vec<KeyConflict>,
    },

    #[error(
        "Duplicate properties file '{name}' found in resource paths on the {layer} layer: {} and {}",
        .path.display(),
        .previous.display()
    )]
    DuplicateFileName {
        name: String,
        layer: String,
        path: PathBuf,
        previous: PathBuf,
    },

    // ========================================================================
    // Generated source constraints
    // ========================================================================
    #[error("Invalid base package '{package}': {reason}")]
    InvalidPackage { package: String, reason: String },

    #[error(
        "Keys {keys:?} in group '{group}' all map to the constant name '{identifier}'"
    )]
    IdentifierClash {
        group: String,
        identifier: String,
        keys: Vec<String>,
    },
}

fn join_conflicts(conflicts: &[KeyConflict]) -> String {
    conflicts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::DuplicateGlobalKey { conflicts, .. } => {
                let mut out = vec!["Global keys must be defined in exactly one file".into()];
                for conflict in conflicts {
                    out.push(format!(
                        "  • remove or rename '{}' (first defined in {})",
                        conflict.key,
                        conflict.defined_in.display()
                    ));
                }
                out
            }
            Self::DuplicateFileName { name, .. } => vec![
                format!("Two resource roots both provide '{}.properties'", name),
                "Rename one of the files; the file name becomes the generated class name".into(),
            ],
            Self::InvalidPackage { .. } => vec![
                "Use a dot-separated list of identifiers, e.g. com.example.gen.config".into(),
            ],
            Self::IdentifierClash { keys, .. } => vec![
                format!("Rename one of {:?} so they differ in letters or digits", keys),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DuplicateGlobalKey { .. } | Self::DuplicateFileName { .. } => {
                ErrorCategory::Conflict
            }
            Self::InvalidPackage { .. } | Self::IdentifierClash { .. } => {
                ErrorCategory::Validation
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
}
