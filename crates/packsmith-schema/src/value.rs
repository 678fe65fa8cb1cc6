use crate::object::ConfigObject;
use crate::types::{EnvVar, TemplateVar};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Assigned properties of one object, keyed by schema field name.
pub type Properties = BTreeMap<&'static str, PropertyValue>;

/// A value assignable to a schema field.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    String(String),
    Bool(bool),
    Integer(i64),
    Float(f64),
    List(Vec<PropertyValue>),
    Map(Map<String, Value>),
    Object(Box<ConfigObject>),
}

impl PropertyValue {
    /// Short description used in type mismatch messages.
    pub fn describe(&self) -> String {
        match self {
            PropertyValue::String(s) => format!("string \"{s}\""),
            PropertyValue::Bool(b) => format!("bool {b}"),
            PropertyValue::Integer(n) => format!("integer {n}"),
            PropertyValue::Float(n) => format!("float {n}"),
            PropertyValue::List(items) => format!("list of {} items", items.len()),
            PropertyValue::Map(map) => format!("map with {} keys", map.len()),
            PropertyValue::Object(obj) => format!("{} object", obj.kind().name),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Convert an untyped JSON value. `null` has no counterpart and yields
    /// `None`, as does an array containing `null`.
    ///
    /// JSON objects become [`PropertyValue::Map`]; building nested
    /// configuration objects needs the schema, see
    /// [`ConfigObject::set_json`].
    pub fn from_json(value: Value) -> Option<Self> {
        Some(match value {
            Value::Null => return None,
            Value::Bool(b) => PropertyValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => PropertyValue::Integer(i),
                None => PropertyValue::Float(n.as_f64()?),
            },
            Value::String(s) => PropertyValue::String(s),
            Value::Array(items) => PropertyValue::List(
                items
                    .into_iter()
                    .map(PropertyValue::from_json)
                    .collect::<Option<Vec<_>>>()?,
            ),
            Value::Object(map) => PropertyValue::Map(map),
        })
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::String(s)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::String(s.to_owned())
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Bool(b)
    }
}

impl From<i64> for PropertyValue {
    fn from(n: i64) -> Self {
        PropertyValue::Integer(n)
    }
}

impl From<i32> for PropertyValue {
    fn from(n: i32) -> Self {
        PropertyValue::Integer(i64::from(n))
    }
}

impl From<u32> for PropertyValue {
    fn from(n: u32) -> Self {
        PropertyValue::Integer(i64::from(n))
    }
}

impl From<f64> for PropertyValue {
    fn from(n: f64) -> Self {
        PropertyValue::Float(n)
    }
}

impl<T: Into<PropertyValue>> From<Vec<T>> for PropertyValue {
    fn from(items: Vec<T>) -> Self {
        PropertyValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<PropertyValue>, const N: usize> From<[T; N]> for PropertyValue {
    fn from(items: [T; N]) -> Self {
        PropertyValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<Map<String, Value>> for PropertyValue {
    fn from(map: Map<String, Value>) -> Self {
        PropertyValue::Map(map)
    }
}

impl From<ConfigObject> for PropertyValue {
    fn from(obj: ConfigObject) -> Self {
        PropertyValue::Object(Box::new(obj))
    }
}

impl From<TemplateVar> for PropertyValue {
    fn from(var: TemplateVar) -> Self {
        PropertyValue::String(var.token())
    }
}

impl From<EnvVar> for PropertyValue {
    fn from(var: EnvVar) -> Self {
        PropertyValue::String(var.token())
    }
}
