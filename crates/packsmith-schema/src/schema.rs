use crate::kind::Kind;
use std::fmt;

/// Declared type of a schema field.
///
/// The set is closed: every value a caller can assign is checked against one
/// of these descriptors by [`crate::validator::check_type`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldType {
    String,
    Bool,
    Integer,
    /// Integer or finite floating point.
    Number,
    /// Untyped key/value block, rendered verbatim.
    Map,
    /// Ordered sequence whose elements all conform to the inner type.
    List(&'static FieldType),
    /// String restricted to an allowed set.
    Enum(&'static [&'static str]),
    /// Nested configuration object of the given kind.
    Object(&'static Kind),
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::String => f.write_str("string"),
            FieldType::Bool => f.write_str("bool"),
            FieldType::Integer => f.write_str("integer"),
            FieldType::Number => f.write_str("number"),
            FieldType::Map => f.write_str("map"),
            FieldType::List(inner) => write!(f, "[{inner}]"),
            FieldType::Enum(allowed) => write!(f, "one of [{}]", allowed.join(", ")),
            FieldType::Object(kind) => write!(f, "{} object", kind.name),
        }
    }
}

/// One row of a kind's property table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyDecl {
    pub name: &'static str,
    pub ty: FieldType,
    pub required: bool,
}

impl PropertyDecl {
    pub const fn required(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            required: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_nests_list_types() {
        assert_eq!(FieldType::List(&FieldType::String).to_string(), "[string]");
        assert_eq!(
            FieldType::List(&FieldType::List(&FieldType::Integer)).to_string(),
            "[[integer]]"
        );
    }

    #[test]
    fn display_enum_lists_allowed_values() {
        let ty = FieldType::Enum(&["upload", "download"]);
        assert_eq!(ty.to_string(), "one of [upload, download]");
    }

    #[test]
    fn decl_constructors_set_required_flag() {
        assert!(PropertyDecl::required("source", FieldType::String).required);
        assert!(!PropertyDecl::optional("binary", FieldType::Bool).required);
    }
}
