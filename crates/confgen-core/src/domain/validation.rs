use crate::domain::{
    entities::GeneratedClassSpec,
    error::DomainError,
    value_objects::BasePackage,
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across entities.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_package(raw: &str) -> Result<BasePackage, DomainError> {
        BasePackage::parse(raw)
    }

    pub fn validate_class_spec(spec: &GeneratedClassSpec) -> Result<(), DomainError> {
        spec.validate()
    }
}
