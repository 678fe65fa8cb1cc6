use crate::kind::Kind;
use crate::schema::{FieldType, PropertyDecl};
use crate::types::Title;
use crate::validator;
use crate::value::{Properties, PropertyValue};
use crate::SchemaError;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use tracing::{debug, warn};

/// Non-fatal finding produced while validating an object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(object: &ConfigObject, message: impl Into<String>) -> Self {
        Self {
            kind: object.kind().name.to_owned(),
            title: object.title().map(ToString::to_string),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.title {
            Some(title) => write!(f, "{} '{title}': {}", self.kind, self.message),
            None => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}

/// Sink collecting diagnostics during validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.0
    }
}

/// Successful render: the wire mapping plus any diagnostics raised on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub body: Map<String, Value>,
    pub diagnostics: Vec<Diagnostic>,
}

/// An instance of a [`Kind`] with its assigned properties.
///
/// Every assignment is type-checked against the kind's schema immediately.
/// Presence of required fields and cross-field rules are checked when the
/// object is rendered, so an object may be built up incrementally.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigObject {
    kind: &'static Kind,
    title: Option<Title>,
    properties: Properties,
}

impl ConfigObject {
    pub fn new(kind: &'static Kind) -> Self {
        Self {
            kind,
            title: None,
            properties: Properties::new(),
        }
    }

    pub fn titled(kind: &'static Kind, title: impl Into<Title>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::new(kind)
        }
    }

    /// Construct with a batch of assignments, failing on the first invalid one.
    pub fn from_properties<I, K, V>(
        kind: &'static Kind,
        title: Option<&str>,
        properties: I,
    ) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<PropertyValue>,
    {
        let mut object = Self::new(kind);
        object.title = title.map(Title::from);
        for (key, value) in properties {
            object.set(key.as_ref(), value)?;
        }
        Ok(object)
    }

    /// Construct from an untyped JSON mapping, building nested objects where
    /// the schema declares them.
    pub fn from_json(
        kind: &'static Kind,
        title: Option<&str>,
        map: Map<String, Value>,
    ) -> Result<Self, SchemaError> {
        let mut object = Self::new(kind);
        object.title = title.map(Title::from);
        for (key, value) in map {
            object.set_json(&key, value)?;
        }
        Ok(object)
    }

    /// Builder-style assignment.
    pub fn with(
        mut self,
        key: &str,
        value: impl Into<PropertyValue>,
    ) -> Result<Self, SchemaError> {
        self.set(key, value)?;
        Ok(self)
    }

    pub fn set(&mut self, key: &str, value: impl Into<PropertyValue>) -> Result<(), SchemaError> {
        let decl = self.decl(key)?;
        let value = value.into();
        validator::check_type(self.kind.name, decl.name, &decl.ty, &value)?;
        debug!("{}: set {} = {}", self.kind.name, decl.name, value.describe());
        self.properties.insert(decl.name, value);
        Ok(())
    }

    /// Assign an untyped JSON value, converting it according to the schema.
    pub fn set_json(&mut self, key: &str, value: Value) -> Result<(), SchemaError> {
        let decl = self.decl(key)?;
        let value = convert_json(self.kind.name, decl.name, decl.ty, value)?;
        self.set(key, value)
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<PropertyValue> {
        self.properties.remove(key)
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn kind(&self) -> &'static Kind {
        self.kind
    }

    pub fn resource_type(&self) -> Option<&'static str> {
        self.kind.resource_type
    }

    pub fn title(&self) -> Option<&Title> {
        self.title.as_ref()
    }

    pub fn set_title(&mut self, title: impl Into<Title>) {
        self.title = Some(title.into());
    }

    /// Required schema fields that are not assigned, in declaration order.
    pub fn missing_required(&self) -> Vec<&'static str> {
        self.kind
            .required_fields()
            .filter(|decl| !self.properties.contains_key(decl.name))
            .map(|decl| decl.name)
            .collect()
    }

    /// Run the kind's cross-field rules, then its custom hook.
    pub fn validate(&self, sink: &mut Diagnostics) -> Result<(), SchemaError> {
        for rule in self.kind.rules {
            rule.apply(self, sink)?;
        }
        if let Some(hook) = self.kind.validate {
            hook(self, sink)?;
        }
        Ok(())
    }

    /// Validate and render to the wire mapping.
    ///
    /// All missing required fields are reported together. Cross-field rules
    /// only run once every required field is present. Rendering does not
    /// modify the object and can be repeated.
    pub fn render(&self) -> Result<Rendered, SchemaError> {
        let mut sink = Diagnostics::new();
        let body = self.render_into(&mut sink)?;
        Ok(Rendered {
            body,
            diagnostics: sink.into_vec(),
        })
    }

    /// Render and log diagnostics as warnings, returning only the mapping.
    pub fn to_dict(&self) -> Result<Map<String, Value>, SchemaError> {
        let rendered = self.render()?;
        for diagnostic in &rendered.diagnostics {
            warn!("{diagnostic}");
        }
        Ok(rendered.body)
    }

    fn render_into(&self, sink: &mut Diagnostics) -> Result<Map<String, Value>, SchemaError> {
        let missing = self.missing_required();
        if !missing.is_empty() {
            return Err(SchemaError::RequiredFieldMissing {
                kind: self.kind.name.to_owned(),
                fields: missing.into_iter().map(str::to_owned).collect(),
            });
        }
        self.validate(sink)?;

        let mut body = Map::new();
        if let Some(tag) = self.kind.resource_type {
            body.insert("type".to_owned(), Value::String(tag.to_owned()));
        }
        for (name, value) in &self.properties {
            body.insert((*name).to_owned(), render_value(value, sink)?);
        }
        Ok(body)
    }

    fn decl(&self, key: &str) -> Result<&'static PropertyDecl, SchemaError> {
        self.kind.field(key).ok_or_else(|| SchemaError::SchemaViolation {
            kind: self.kind.name.to_owned(),
            field: key.to_owned(),
            allowed: self
                .kind
                .field_names()
                .into_iter()
                .map(str::to_owned)
                .collect(),
        })
    }
}

fn render_value(value: &PropertyValue, sink: &mut Diagnostics) -> Result<Value, SchemaError> {
    Ok(match value {
        PropertyValue::String(s) => Value::String(s.clone()),
        PropertyValue::Bool(b) => Value::Bool(*b),
        PropertyValue::Integer(n) => Value::from(*n),
        PropertyValue::Float(n) => Value::from(*n),
        PropertyValue::List(items) => Value::Array(
            items
                .iter()
                .map(|item| render_value(item, sink))
                .collect::<Result<_, _>>()?,
        ),
        PropertyValue::Map(map) => Value::Object(map.clone()),
        PropertyValue::Object(obj) => Value::Object(obj.render_into(sink)?),
    })
}

fn convert_json(
    kind: &str,
    field: &str,
    ty: FieldType,
    value: Value,
) -> Result<PropertyValue, SchemaError> {
    match (ty, value) {
        (FieldType::Object(nested), Value::Object(map)) => {
            Ok(ConfigObject::from_json(nested, None, map)?.into())
        }
        (FieldType::List(inner), Value::Array(items)) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| convert_json(kind, &format!("{field}[{i}]"), *inner, item))
            .collect::<Result<Vec<_>, _>>()
            .map(PropertyValue::List),
        (ty, value) => PropertyValue::from_json(value).ok_or_else(|| SchemaError::TypeMismatch {
            kind: kind.to_owned(),
            field: field.to_owned(),
            expected: ty.to_string(),
            actual: "null".to_owned(),
        }),
    }
}
