use crate::registry::Registry;
use crate::template::{location, Template, TemplateError};
use packsmith_schema::ConfigObject;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// On-disk description of a template, in TOML or JSON.
///
/// Each `[[provisioners]]` table names its kind with `type` and may carry a
/// `title`; every other key is a schema field of that kind.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TemplateFile {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub min_packer_version: Option<String>,
    #[serde(default)]
    pub variables: BTreeMap<String, String>,
    #[serde(default)]
    pub builders: Vec<Map<String, Value>>,
    #[serde(default)]
    pub provisioners: Vec<Map<String, Value>>,
    #[serde(default, alias = "post-processors")]
    pub post_processors: Vec<Map<String, Value>>,
}

impl TemplateFile {
    /// Build a [`Template`], constructing each provisioner through the
    /// registry so every field is checked against its kind's schema.
    pub fn into_template(self, registry: &Registry) -> Result<Template, TemplateError> {
        let mut template = Template::new();
        template.description = self.description;
        template.min_packer_version = self.min_packer_version;
        for (name, default) in self.variables {
            template.add_variable(name, default);
        }
        for builder in self.builders {
            template.add_builder(builder)?;
        }
        for (index, entry) in self.provisioners.into_iter().enumerate() {
            template.add_provisioner(build_provisioner(registry, index, entry)?)?;
        }
        for step in self.post_processors {
            template.add_post_processor(step)?;
        }
        Ok(template)
    }
}

fn build_provisioner(
    registry: &Registry,
    index: usize,
    mut entry: Map<String, Value>,
) -> Result<ConfigObject, TemplateError> {
    let Some(Value::String(tag)) = entry.remove("type") else {
        return Err(TemplateError::MissingType { index });
    };
    let title = match entry.remove("title") {
        None => None,
        Some(Value::String(title)) => Some(title),
        Some(_) => return Err(TemplateError::InvalidTitle { index }),
    };
    let Some(kind) = registry.get(&tag) else {
        return Err(TemplateError::UnknownType { index, tag });
    };
    debug!(
        "{}: building {} from {} keys",
        location(index, title.as_deref()),
        kind.name,
        entry.len()
    );
    ConfigObject::from_json(kind, title.as_deref(), entry).map_err(|source| {
        TemplateError::Provisioner {
            at: location(index, title.as_deref()),
            source,
        }
    })
}

/// Parse a TOML template description.
///
/// Values pass through `toml::Table` so datetimes reach the schema as their
/// RFC 3339 text, like any other string.
pub fn parse_template_str(input: &str) -> Result<TemplateFile, TemplateError> {
    let table: toml::Table = toml::from_str(input)?;
    let document = toml_to_json(toml::Value::Table(table));
    TemplateFile::deserialize(document).map_err(TemplateError::Structure)
}

fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(n) => Value::from(n),
        toml::Value::Float(n) => Value::from(n),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(datetime) => Value::String(datetime.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, value)| (key, toml_to_json(value)))
                .collect(),
        ),
    }
}

pub fn parse_template_json(input: &str) -> Result<TemplateFile, TemplateError> {
    Ok(serde_json::from_str(input)?)
}

/// Read a template description, choosing JSON for `.json` files and TOML
/// otherwise.
pub fn parse_template_file(path: impl AsRef<Path>) -> Result<TemplateFile, TemplateError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json")) {
        parse_template_json(&content)
    } else {
        parse_template_str(&content)
    }
}
