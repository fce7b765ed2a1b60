use std::collections::HashMap;

use serde::Serialize;

use crate::domain::{
    entities::property_file::PropertyFile,
    error::DomainError,
    value_objects::{BasePackage, sanitize_identifier},
};

/// One constant inside a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Constant {
    /// Original property key.
    pub key: String,
    /// Source identifier derived from the key.
    pub identifier: String,
    pub value: String,
}

/// One nested group, generated from one property file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstantGroup {
    /// Property file base name.
    pub name: String,
    pub identifier: String,
    pub constants: Vec<Constant>,
}

impl ConstantGroup {
    pub fn from_file(file: &PropertyFile) -> Self {
        Self {
            name: file.base_name().to_string(),
            identifier: sanitize_identifier(file.base_name()),
            constants: file
                .properties()
                .iter()
                .map(|(key, value)| Constant {
                    key: key.clone(),
                    identifier: sanitize_identifier(key),
                    value: value.clone(),
                })
                .collect(),
        }
    }
}

/// Everything the renderer needs to produce one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedClassSpec {
    pub class_name: String,
    pub package: BasePackage,
    pub groups: Vec<ConstantGroup>,
}

impl GeneratedClassSpec {
    /// Build a spec with one group per file, in the given order.
    pub fn from_files(
        class_name: impl Into<String>,
        package: BasePackage,
        files: &[PropertyFile],
    ) -> Self {
        Self {
            class_name: class_name.into(),
            package,
            groups: files.iter().map(ConstantGroup::from_file).collect(),
        }
    }

    pub fn constant_count(&self) -> usize {
        self.groups.iter().map(|g| g.constants.len()).sum()
    }

    /// Reject specs whose sanitised identifiers collide, which would not
    /// compile. A nested group may not share the enclosing class name either.
    pub fn validate(&self) -> Result<(), DomainError> {
        let enclosing = (self.class_name.as_str(), self.class_name.as_str());
        check_unique(
            &self.class_name,
            std::iter::once(enclosing)
                .chain(self.groups.iter().map(|g| (g.identifier.as_str(), g.name.as_str()))),
        )?;
        for group in &self.groups {
            check_unique(
                &group.name,
                group
                    .constants
                    .iter()
                    .map(|c| (c.identifier.as_str(), c.key.as_str())),
            )?;
        }
        Ok(())
    }
}

fn check_unique<'a>(
    scope: &str,
    items: impl Iterator<Item = (&'a str, &'a str)>,
) -> Result<(), DomainError> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for (identifier, original) in items {
        if let Some(first) = seen.insert(identifier, original) {
            return Err(DomainError::IdentifierClash {
                group: scope.to_string(),
                identifier: identifier.to_string(),
                keys: vec![first.to_string(), original.to_string()],
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str, pairs: &[(&str, &str)]) -> PropertyFile {
        PropertyFile::new(
            path,
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    fn package() -> BasePackage {
        BasePackage::parse("com.example").unwrap()
    }

    #[test]
    fn groups_follow_file_order_and_key_order() {
        let spec = GeneratedClassSpec::from_files(
            "G",
            package(),
            &[
                file("b.properties", &[("z", "1"), ("a", "2")]),
                file("a.properties", &[("m", "3")]),
            ],
        );

        let names: Vec<_> = spec.groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
        let keys: Vec<_> = spec.groups[0].constants.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["z", "a"]);
        assert_eq!(spec.constant_count(), 3);
    }

    #[test]
    fn identifiers_are_sanitised() {
        let spec = GeneratedClassSpec::from_files(
            "G",
            package(),
            &[file("my-app.properties", &[("db.url", "x")])],
        );
        assert_eq!(spec.groups[0].identifier, "my_app");
        assert_eq!(spec.groups[0].constants[0].identifier, "db_url");
        assert_eq!(spec.groups[0].constants[0].key, "db.url");
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn clashing_constant_identifiers_are_rejected() {
        let spec = GeneratedClassSpec::from_files(
            "G",
            package(),
            &[file("app.properties", &[("db.url", "x"), ("db_url", "y")])],
        );
        let err = spec.validate().unwrap_err();
        assert!(matches!(
            err,
            DomainError::IdentifierClash { ref identifier, .. } if identifier == "db_url"
        ));
    }

    #[test]
    fn clashing_group_identifiers_are_rejected() {
        let spec = GeneratedClassSpec::from_files(
            "C",
            package(),
            &[file("my-app.properties", &[]), file("my_app.properties", &[])],
        );
        assert!(spec.validate().is_err());
    }

    #[test]
    fn group_named_like_enclosing_class_is_rejected() {
        let spec = GeneratedClassSpec::from_files("G", package(), &[file("G.properties", &[])]);
        let err = spec.validate().unwrap_err();
        assert!(matches!(
            err,
            DomainError::IdentifierClash { ref keys, .. } if keys == &["G", "G"]
        ));
    }

    #[test]
    fn empty_spec_is_valid() {
        let spec = GeneratedClassSpec::from_files("C", package(), &[]);
        assert!(spec.groups.is_empty());
        assert!(spec.validate().is_ok());
    }
}
