//! Small immutable values shared across the domain.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// Directory under each resource root holding all layered configuration.
pub const CONFIG_BASE_FOLDER: &str = "config";
/// GLOBAL layer directory, relative to [`CONFIG_BASE_FOLDER`].
pub const CONFIG_GLOBAL_FOLDER: &str = "global";
/// CLASS layer directory, relative to the GLOBAL directory.
pub const CONFIG_CLASS_FOLDER: &str = "class";
/// Suffix selecting property files inside a layer directory.
pub const PROPERTIES_EXTENSION: &str = "properties";

/// Name of the generated class holding the GLOBAL layer.
pub const GLOBAL_CLASS_NAME: &str = "G";
/// Name of the generated class holding the CLASS layer.
pub const CLASS_CLASS_NAME: &str = "C";

// ============================================================================
// Layer
// ============================================================================

/// Override level a configuration directory belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    Global,
    Class,
}

impl Layer {
    /// Generated class name for this layer.
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Global => GLOBAL_CLASS_NAME,
            Self::Class => CLASS_CLASS_NAME,
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => write!(f, "global"),
            Self::Class => write!(f, "class"),
        }
    }
}

// ============================================================================
// SourceSet
// ============================================================================

/// Which compile source set the host should register the output under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceSet {
    #[default]
    Main,
    Test,
}

impl SourceSet {
    pub const fn from_test_only(test_source_only: bool) -> Self {
        if test_source_only { Self::Test } else { Self::Main }
    }
}

impl fmt::Display for SourceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Main => write!(f, "main"),
            Self::Test => write!(f, "test"),
        }
    }
}

// ============================================================================
// BasePackage
// ============================================================================

/// Dot-separated package the generated classes live in.
///
/// Invariant: empty (default package) or every segment is a valid,
/// non-keyword identifier. Enforced at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BasePackage(String);

impl BasePackage {
    pub fn parse(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(Self(String::new()));
        }

        for segment in trimmed.split('.') {
            let reason = if segment.is_empty() {
                Some("empty segment".to_string())
            } else if !is_identifier(segment) {
                Some(format!("'{segment}' is not a valid identifier"))
            } else if is_reserved(segment) {
                Some(format!("'{segment}' is a reserved word"))
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(DomainError::InvalidPackage {
                    package: raw.clone(),
                    reason,
                });
            }
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_default(&self) -> bool {
        self.0.is_empty()
    }

    /// Relative directory the package maps to (`a.b.c` → `a/b/c`).
    pub fn as_path(&self) -> PathBuf {
        self.0.split('.').filter(|s| !s.is_empty()).collect()
    }
}

impl FromStr for BasePackage {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for BasePackage {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<BasePackage> for String {
    fn from(value: BasePackage) -> Self {
        value.0
    }
}

impl fmt::Display for BasePackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Identifiers
// ============================================================================

const RESERVED: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final",
    "finally", "float", "for", "goto", "if", "implements", "import", "instanceof", "int",
    "interface", "long", "native", "new", "null", "package", "private", "protected", "public",
    "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this", "throw",
    "throws", "transient", "true", "try", "void", "volatile", "while", "_",
];

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_identifier_part(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(is_identifier_start) && chars.all(is_identifier_part)
}

fn is_reserved(s: &str) -> bool {
    RESERVED.contains(&s)
}

/// Turn an arbitrary property key or file name into a source identifier.
///
/// Unsupported characters become `_`, a leading digit gets a `_` prefix and
/// reserved words get a trailing `_`.
pub fn sanitize_identifier(raw: &str) -> String {
    let mut out: String = raw
        .chars()
        .map(|c| if is_identifier_part(c) { c } else { '_' })
        .collect();

    if out.is_empty() || !out.starts_with(is_identifier_start) {
        out.insert(0, '_');
    }
    if is_reserved(&out) {
        out.push('_');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn package_parses_dotted_names() {
        let pkg = BasePackage::parse("com.example.gen.config").unwrap();
        assert_eq!(pkg.as_str(), "com.example.gen.config");
        assert_eq!(pkg.as_path(), Path::new("com/example/gen/config"));
    }

    #[test]
    fn empty_package_is_default() {
        let pkg = BasePackage::parse("  ").unwrap();
        assert!(pkg.is_default());
        assert_eq!(pkg.as_path(), PathBuf::new());
    }

    #[test]
    fn package_rejects_bad_segments() {
        assert!(BasePackage::parse("com..example").is_err());
        assert!(BasePackage::parse("com.1example").is_err());
        assert!(BasePackage::parse("com.class").is_err());
        assert!(BasePackage::parse("com.ex-ample").is_err());
    }

    #[test]
    fn sanitize_keeps_valid_identifiers() {
        assert_eq!(sanitize_identifier("timeout"), "timeout");
        assert_eq!(sanitize_identifier("Widget"), "Widget");
    }

    #[test]
    fn sanitize_replaces_invalid_characters() {
        assert_eq!(sanitize_identifier("db.url"), "db_url");
        assert_eq!(sanitize_identifier("my-key name"), "my_key_name");
    }

    #[test]
    fn sanitize_prefixes_leading_digit_and_empty() {
        assert_eq!(sanitize_identifier("2fa"), "_2fa");
        assert_eq!(sanitize_identifier(""), "__");
    }

    #[test]
    fn sanitize_escapes_reserved_words() {
        assert_eq!(sanitize_identifier("class"), "class_");
        assert_eq!(sanitize_identifier("default"), "default_");
    }

    #[test]
    fn layer_class_names() {
        assert_eq!(Layer::Global.class_name(), "G");
        assert_eq!(Layer::Class.class_name(), "C");
    }

    #[test]
    fn source_set_from_flag() {
        assert_eq!(SourceSet::from_test_only(true), SourceSet::Test);
        assert_eq!(SourceSet::from_test_only(false), SourceSet::Main);
    }
}
