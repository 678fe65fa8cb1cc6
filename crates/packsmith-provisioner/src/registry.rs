//! Catalog registration.
//!
//! Kinds are static data, so authoring mistakes (a rule naming a field that
//! does not exist, a field declared twice) are caught when a kind is
//! registered rather than when an object of that kind is first rendered.

use crate::{
    ANSIBLE, ANSIBLE_LOCAL, CONVERGE, FILE, POWERSHELL, PUPPET_MASTERLESS, PUPPET_SERVER,
    SALT_MASTERLESS, SHELL, SHELL_LOCAL, WINDOWS_RESTART, WINDOWS_SHELL,
};
use packsmith_schema::{FieldType, Kind};
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("{kind}: rule refers to unknown field '{field}'")]
    UnknownRuleField { kind: String, field: String },
    #[error("{kind}: field '{field}' declared more than once")]
    DuplicateField { kind: String, field: String },
    #[error("{kind}: field name 'type' is reserved for the resource type tag")]
    ReservedField { kind: String },
    #[error("{kind}: only kinds with a resource type can be registered")]
    MissingResourceType { kind: String },
    #[error("resource type '{0}' is already registered")]
    DuplicateResourceType(String),
}

/// Every provisioner kind shipped with packsmith.
pub static BUILTIN_KINDS: &[&Kind] = &[
    &ANSIBLE_LOCAL,
    &ANSIBLE,
    &FILE,
    &PUPPET_MASTERLESS,
    &PUPPET_SERVER,
    &SALT_MASTERLESS,
    &SHELL,
    &SHELL_LOCAL,
    &WINDOWS_SHELL,
    &WINDOWS_RESTART,
    &POWERSHELL,
    &CONVERGE,
];

pub fn catalog() -> &'static [&'static Kind] {
    BUILTIN_KINDS
}

/// Find a built-in kind by its resource type tag.
pub fn lookup(resource_type: &str) -> Option<&'static Kind> {
    BUILTIN_KINDS
        .iter()
        .copied()
        .find(|kind| kind.resource_type == Some(resource_type))
}

/// Check a kind's schema and rules for internal consistency, including the
/// kinds of any nested object fields.
pub fn check_kind(kind: &Kind) -> Result<(), CatalogError> {
    let mut seen = BTreeSet::new();
    for decl in kind.schema {
        if decl.name == "type" {
            return Err(CatalogError::ReservedField {
                kind: kind.name.to_owned(),
            });
        }
        if !seen.insert(decl.name) {
            return Err(CatalogError::DuplicateField {
                kind: kind.name.to_owned(),
                field: decl.name.to_owned(),
            });
        }
        if let Some(nested) = nested_kind(&decl.ty) {
            check_kind(nested)?;
        }
    }
    for rule in kind.rules {
        if let Some(field) = rule.fields().into_iter().find(|f| !seen.contains(f)) {
            return Err(CatalogError::UnknownRuleField {
                kind: kind.name.to_owned(),
                field: field.to_owned(),
            });
        }
    }
    Ok(())
}

fn nested_kind(ty: &FieldType) -> Option<&'static Kind> {
    match *ty {
        FieldType::Object(kind) => Some(kind),
        FieldType::List(inner) => nested_kind(inner),
        _ => None,
    }
}

/// Set of kinds addressable by resource type.
#[derive(Debug, Default)]
pub struct Registry {
    kinds: Vec<&'static Kind>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in kind.
    pub fn with_builtins() -> Result<Self, CatalogError> {
        let mut registry = Self::new();
        for kind in BUILTIN_KINDS {
            registry.register(*kind)?;
        }
        Ok(registry)
    }

    pub fn register(&mut self, kind: &'static Kind) -> Result<(), CatalogError> {
        let Some(tag) = kind.resource_type else {
            return Err(CatalogError::MissingResourceType {
                kind: kind.name.to_owned(),
            });
        };
        check_kind(kind)?;
        if self.get(tag).is_some() {
            return Err(CatalogError::DuplicateResourceType(tag.to_owned()));
        }
        debug!("registered provisioner kind {} ({tag})", kind.name);
        self.kinds.push(kind);
        Ok(())
    }

    pub fn get(&self, resource_type: &str) -> Option<&'static Kind> {
        self.kinds
            .iter()
            .copied()
            .find(|kind| kind.resource_type == Some(resource_type))
    }

    pub fn kinds(&self) -> &[&'static Kind] {
        &self.kinds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use packsmith_schema::{PropertyDecl, Rule};

    #[test]
    fn builtins_register_cleanly() {
        let registry = Registry::with_builtins().unwrap();
        assert_eq!(registry.kinds().len(), BUILTIN_KINDS.len());
        assert_eq!(registry.get("shell").map(|k| k.name), Some("Shell"));
        assert!(registry.get("chef-solo").is_none());
    }

    #[test]
    fn builtin_resource_types_are_unique() {
        let mut tags: Vec<_> = BUILTIN_KINDS.iter().filter_map(|k| k.resource_type).collect();
        tags.sort_unstable();
        tags.dedup();
        assert_eq!(tags.len(), BUILTIN_KINDS.len());
    }

    #[test]
    fn lookup_by_tag() {
        assert_eq!(lookup("salt-masterless").map(|k| k.name), Some("SaltMasterless"));
        assert!(lookup("SaltMasterless").is_none());
        assert!(catalog().iter().any(|k| k.name == "Converge"));
    }

    #[test]
    fn rejects_rule_with_unknown_field() {
        static BROKEN: Kind = Kind {
            name: "Broken",
            resource_type: Some("broken"),
            schema: &[PropertyDecl::optional("inline", FieldType::String)],
            rules: &[Rule::ExactlyOne(&["inline", "scirpt"])],
            validate: None,
        };
        assert_eq!(
            Registry::new().register(&BROKEN),
            Err(CatalogError::UnknownRuleField {
                kind: "Broken".to_owned(),
                field: "scirpt".to_owned(),
            })
        );
    }

    #[test]
    fn rejects_duplicate_and_reserved_fields() {
        static TWICE: Kind = Kind {
            name: "Twice",
            resource_type: Some("twice"),
            schema: &[
                PropertyDecl::optional("path", FieldType::String),
                PropertyDecl::optional("path", FieldType::Bool),
            ],
            rules: &[],
            validate: None,
        };
        static TYPED: Kind = Kind {
            name: "Typed",
            resource_type: Some("typed"),
            schema: &[PropertyDecl::optional("type", FieldType::String)],
            rules: &[],
            validate: None,
        };
        assert!(matches!(
            check_kind(&TWICE),
            Err(CatalogError::DuplicateField { .. })
        ));
        assert!(matches!(
            check_kind(&TYPED),
            Err(CatalogError::ReservedField { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_resource_type() {
        let mut registry = Registry::with_builtins().unwrap();
        assert_eq!(
            registry.register(&SHELL),
            Err(CatalogError::DuplicateResourceType("shell".to_owned()))
        );
    }

    #[test]
    fn embedded_kinds_cannot_be_registered() {
        assert!(matches!(
            Registry::new().register(&crate::MODULE_DIR),
            Err(CatalogError::MissingResourceType { .. })
        ));
    }
}
