//! Stateless validation rules shared by every kind.
//!
//! Each check either passes or returns the matching [`SchemaError`]; none of
//! them coerce values.

use crate::schema::FieldType;
use crate::value::{Properties, PropertyValue};
use crate::SchemaError;

/// Confirm that `value` conforms to `ty`, recursing into list elements.
pub fn check_type(
    kind: &str,
    field: &str,
    ty: &FieldType,
    value: &PropertyValue,
) -> Result<(), SchemaError> {
    match (ty, value) {
        (FieldType::String, PropertyValue::String(_))
        | (FieldType::Integer, PropertyValue::Integer(_))
        | (FieldType::Number, PropertyValue::Integer(_))
        | (FieldType::Map, PropertyValue::Map(_)) => Ok(()),
        (FieldType::Number, PropertyValue::Float(n)) if n.is_finite() => Ok(()),
        (FieldType::Bool, _) => boolean(kind, field, value),
        (FieldType::Enum(allowed), PropertyValue::String(s)) => {
            string_list_item(allowed)(kind, field, s.as_str())
        }
        (FieldType::List(inner), PropertyValue::List(items)) => {
            for (i, item) in items.iter().enumerate() {
                check_type(kind, &format!("{field}[{i}]"), inner, item)?;
            }
            Ok(())
        }
        (FieldType::Object(expected), PropertyValue::Object(obj)) if obj.kind() == *expected => {
            Ok(())
        }
        _ => Err(mismatch(kind, field, ty, value)),
    }
}

/// Accept `true`/`false` only.
pub fn boolean(kind: &str, field: &str, value: &PropertyValue) -> Result<(), SchemaError> {
    match value {
        PropertyValue::Bool(_) => Ok(()),
        other => Err(mismatch(kind, field, &FieldType::Bool, other)),
    }
}

/// Build a membership check over `allowed`.
///
/// The returned closure takes `(kind, field, value)`.
pub fn string_list_item<'a>(
    allowed: &'a [&'a str],
) -> impl Fn(&str, &str, &str) -> Result<(), SchemaError> + 'a {
    move |kind: &str, field: &str, value: &str| {
        if allowed.contains(&value) {
            Ok(())
        } else {
            Err(SchemaError::EnumerationViolation {
                kind: kind.to_owned(),
                field: field.to_owned(),
                value: value.to_owned(),
                allowed: allowed.iter().map(|s| (*s).to_owned()).collect(),
            })
        }
    }
}

/// Require exactly one of `fields` to be assigned.
pub fn exactly_one(
    kind: &str,
    properties: &Properties,
    fields: &[&str],
) -> Result<(), SchemaError> {
    let present: Vec<String> = fields
        .iter()
        .filter(|f| properties.contains_key(**f))
        .map(|f| (*f).to_owned())
        .collect();
    if present.len() == 1 {
        return Ok(());
    }
    Err(SchemaError::MutualExclusivityViolation {
        kind: kind.to_owned(),
        group: fields.iter().map(|f| (*f).to_owned()).collect(),
        present,
    })
}

/// Number of `fields` that are assigned.
pub fn count(properties: &Properties, fields: &[&str]) -> usize {
    fields
        .iter()
        .filter(|f| properties.contains_key(**f))
        .count()
}

fn mismatch(kind: &str, field: &str, ty: &FieldType, value: &PropertyValue) -> SchemaError {
    SchemaError::TypeMismatch {
        kind: kind.to_owned(),
        field: field.to_owned(),
        expected: ty.to_string(),
        actual: value.describe(),
    }
}
