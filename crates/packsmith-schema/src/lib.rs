//! Property schemas, validators, and the configuration object engine for packsmith.
//!
//! This crate defines the schema layer: static per-kind property tables
//! (`Kind`, `PropertyDecl`, `FieldType`), the stateless validator library
//! (`validator`), and the generic `ConfigObject` engine that enforces a schema
//! on assignment and renders an object into its JSON wire form. Non-fatal
//! findings travel beside a successful render as `Diagnostic`s.

pub mod kind;
pub mod object;
pub mod schema;
pub mod types;
pub mod validator;
pub mod value;

pub use kind::{Kind, Rule, ValidateFn};
pub use object::{ConfigObject, Diagnostic, Diagnostics, Rendered};
pub use schema::{FieldType, PropertyDecl};
pub use types::{EnvVar, TemplateVar, Title};
pub use value::{Properties, PropertyValue};

use thiserror::Error;

/// Validation failure raised at assignment or render time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("{kind}: unknown property '{field}' (allowed: {})", .allowed.join(", "))]
    SchemaViolation {
        kind: String,
        field: String,
        allowed: Vec<String>,
    },
    #[error("{kind}.{field}: expected {expected}, got {actual}")]
    TypeMismatch {
        kind: String,
        field: String,
        expected: String,
        actual: String,
    },
    #[error("{kind}: required properties missing: {}", .fields.join(", "))]
    RequiredFieldMissing { kind: String, fields: Vec<String> },
    #[error(
        "{kind}: exactly one of [{}] must be set, found {} ([{}])",
        .group.join(", "),
        .present.len(),
        .present.join(", ")
    )]
    MutualExclusivityViolation {
        kind: String,
        group: Vec<String>,
        present: Vec<String>,
    },
    #[error("{kind}.{field}: '{value}' is not one of [{}]", .allowed.join(", "))]
    EnumerationViolation {
        kind: String,
        field: String,
        value: String,
        allowed: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_missing_lists_every_field() {
        let err = SchemaError::RequiredFieldMissing {
            kind: "File".to_owned(),
            fields: vec!["source".to_owned(), "destination".to_owned()],
        };
        assert_eq!(
            err.to_string(),
            "File: required properties missing: source, destination"
        );
    }

    #[test]
    fn exclusivity_message_names_group_and_present() {
        let err = SchemaError::MutualExclusivityViolation {
            kind: "Shell".to_owned(),
            group: vec!["inline".to_owned(), "script".to_owned()],
            present: vec![],
        };
        assert_eq!(
            err.to_string(),
            "Shell: exactly one of [inline, script] must be set, found 0 ([])"
        );
    }
}
