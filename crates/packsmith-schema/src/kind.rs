use crate::object::{ConfigObject, Diagnostic, Diagnostics};
use crate::schema::PropertyDecl;
use crate::validator;
use crate::SchemaError;
use std::fmt;

/// Custom cross-field check run after the declarative rules of a kind.
pub type ValidateFn = fn(&ConfigObject, &mut Diagnostics) -> Result<(), SchemaError>;

/// Declarative cross-field rule attached to a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Exactly one of the listed fields must be assigned.
    ExactlyOne(&'static [&'static str]),
    /// When `trigger` is assigned together with any of `fields`, emit a
    /// non-fatal diagnostic carrying `message`.
    WarnIfAny {
        trigger: &'static str,
        fields: &'static [&'static str],
        message: &'static str,
    },
}

impl Rule {
    /// Every field name the rule refers to.
    pub fn fields(&self) -> Vec<&'static str> {
        match *self {
            Rule::ExactlyOne(fields) => fields.to_vec(),
            Rule::WarnIfAny {
                trigger, fields, ..
            } => std::iter::once(trigger).chain(fields.iter().copied()).collect(),
        }
    }

    pub(crate) fn apply(
        &self,
        object: &ConfigObject,
        sink: &mut Diagnostics,
    ) -> Result<(), SchemaError> {
        match *self {
            Rule::ExactlyOne(fields) => {
                validator::exactly_one(object.kind().name, object.properties(), fields)
            }
            Rule::WarnIfAny {
                trigger,
                fields,
                message,
            } => {
                if object.contains(trigger) && validator::count(object.properties(), fields) > 0 {
                    sink.push(Diagnostic::new(object, message));
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::ExactlyOne(fields) => write!(f, "exactly one of [{}]", fields.join(", ")),
            Rule::WarnIfAny {
                trigger, fields, ..
            } => write!(
                f,
                "warns when '{trigger}' is set with any of [{}]",
                fields.join(", ")
            ),
        }
    }
}

/// Static description of one configuration object kind.
///
/// A kind is pure data: the schema table, the declarative rules, and an
/// optional custom hook. Kinds with `resource_type: None` are embedded
/// property objects and render without a `type` key.
pub struct Kind {
    pub name: &'static str,
    pub resource_type: Option<&'static str>,
    pub schema: &'static [PropertyDecl],
    pub rules: &'static [Rule],
    pub validate: Option<ValidateFn>,
}

impl Kind {
    pub fn field(&self, name: &str) -> Option<&'static PropertyDecl> {
        let schema: &'static [PropertyDecl] = self.schema;
        schema.iter().find(|decl| decl.name == name)
    }

    pub fn field_names(&self) -> Vec<&'static str> {
        self.schema.iter().map(|decl| decl.name).collect()
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &'static PropertyDecl> {
        let schema: &'static [PropertyDecl] = self.schema;
        schema.iter().filter(|decl| decl.required)
    }

    /// Tag used in the rendered `type` key, or the kind name for embedded kinds.
    pub fn tag(&self) -> &'static str {
        self.resource_type.unwrap_or(self.name)
    }
}

impl fmt::Debug for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Kind")
            .field("name", &self.name)
            .field("resource_type", &self.resource_type)
            .field("fields", &self.schema.len())
            .field("rules", &self.rules)
            .field("custom_validate", &self.validate.is_some())
            .finish()
    }
}

impl PartialEq for Kind {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.resource_type == other.resource_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldType;

    static PROBE: Kind = Kind {
        name: "Probe",
        resource_type: Some("probe"),
        schema: &[
            PropertyDecl::required("target", FieldType::String),
            PropertyDecl::optional("inline", FieldType::List(&FieldType::String)),
            PropertyDecl::optional("script", FieldType::String),
        ],
        rules: &[Rule::ExactlyOne(&["inline", "script"])],
        validate: None,
    };

    #[test]
    fn field_lookup() {
        assert_eq!(PROBE.field("script").map(|d| d.ty), Some(FieldType::String));
        assert!(PROBE.field("missing").is_none());
        assert_eq!(PROBE.field_names(), vec!["target", "inline", "script"]);
    }

    #[test]
    fn required_fields_filters_optional() {
        let names: Vec<_> = PROBE.required_fields().map(|d| d.name).collect();
        assert_eq!(names, vec!["target"]);
    }

    #[test]
    fn rule_fields_include_trigger() {
        let rule = Rule::WarnIfAny {
            trigger: "minion_config",
            fields: &["remote_state_tree"],
            message: "ignored",
        };
        assert_eq!(rule.fields(), vec!["minion_config", "remote_state_tree"]);
        assert_eq!(PROBE.rules[0].fields(), vec!["inline", "script"]);
    }

    #[test]
    fn rule_display() {
        assert_eq!(PROBE.rules[0].to_string(), "exactly one of [inline, script]");
        let rule = Rule::WarnIfAny {
            trigger: "minion_config",
            fields: &["remote_pillar_roots", "remote_state_tree"],
            message: "ignored",
        };
        assert_eq!(
            rule.to_string(),
            "warns when 'minion_config' is set with any of [remote_pillar_roots, remote_state_tree]"
        );
    }

    #[test]
    fn embedded_kind_tag_falls_back_to_name() {
        static EMBEDDED: Kind = Kind {
            name: "ModuleDir",
            resource_type: None,
            schema: &[],
            rules: &[],
            validate: None,
        };
        assert_eq!(EMBEDDED.tag(), "ModuleDir");
        assert_eq!(PROBE.tag(), "probe");
    }
}
