//! Assembly of a complete Packer template document.
//!
//! Only provisioners are schema-checked. Builders and post-processors are
//! carried through as opaque JSON objects that merely need a `type` tag.

use crate::registry::CatalogError;
use packsmith_schema::{ConfigObject, Diagnostic, SchemaError, Title};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to read template file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse template: {0}")]
    ParseToml(#[from] toml::de::Error),
    #[error("invalid template JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid template: {0}")]
    Structure(serde_json::Error),
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("provisioners[{index}]: missing string 'type'")]
    MissingType { index: usize },
    #[error("provisioners[{index}]: unknown provisioner type '{tag}'")]
    UnknownType { index: usize, tag: String },
    #[error("provisioners[{index}]: 'title' must be a string")]
    InvalidTitle { index: usize },
    #[error("{section}[{index}]: expected an object with a string 'type'")]
    UntypedEntry { section: &'static str, index: usize },
    #[error("{kind} has no resource type and cannot be a top-level provisioner")]
    EmbeddedKind { kind: String },
    #[error("duplicate provisioner title '{0}'")]
    DuplicateTitle(String),
    #[error("{at}: {source}")]
    Provisioner { at: String, source: SchemaError },
}

impl TemplateError {
    /// Whether the error describes an invalid template rather than a failure
    /// to read one.
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::Io(_) | Self::Catalog(_))
    }
}

/// Location label used in provisioner error messages.
pub(crate) fn location(index: usize, title: Option<&str>) -> String {
    match title {
        Some(title) => format!("provisioners[{index}] '{title}'"),
        None => format!("provisioners[{index}]"),
    }
}

/// Rendered template document plus the diagnostics of every provisioner.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedTemplate {
    pub document: Value,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Template {
    pub description: Option<String>,
    pub min_packer_version: Option<String>,
    variables: BTreeMap<String, String>,
    builders: Vec<Map<String, Value>>,
    provisioners: Vec<ConfigObject>,
    post_processors: Vec<Map<String, Value>>,
}

impl Template {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_variable(&mut self, name: impl Into<String>, default: impl Into<String>) {
        self.variables.insert(name.into(), default.into());
    }

    pub fn add_builder(&mut self, builder: Map<String, Value>) -> Result<(), TemplateError> {
        check_typed("builders", self.builders.len(), &builder)?;
        self.builders.push(builder);
        Ok(())
    }

    pub fn add_post_processor(&mut self, step: Map<String, Value>) -> Result<(), TemplateError> {
        check_typed("post-processors", self.post_processors.len(), &step)?;
        self.post_processors.push(step);
        Ok(())
    }

    /// Append a provisioner. Objects are run in insertion order; titles, when
    /// given, must be unique across the template.
    pub fn add_provisioner(&mut self, object: ConfigObject) -> Result<(), TemplateError> {
        if object.resource_type().is_none() {
            return Err(TemplateError::EmbeddedKind {
                kind: object.kind().name.to_owned(),
            });
        }
        if let Some(title) = object.title() {
            if self.provisioner(title).is_some() {
                return Err(TemplateError::DuplicateTitle(title.to_string()));
            }
        }
        debug!(
            "template: added {} provisioner #{}",
            object.kind().tag(),
            self.provisioners.len()
        );
        self.provisioners.push(object);
        Ok(())
    }

    pub fn provisioner(&self, title: &str) -> Option<&ConfigObject> {
        self.provisioners
            .iter()
            .find(|p| p.title().is_some_and(|t| t.as_str() == title))
    }

    pub fn provisioners(&self) -> &[ConfigObject] {
        &self.provisioners
    }

    pub fn variables(&self) -> &BTreeMap<String, String> {
        &self.variables
    }

    pub fn builders(&self) -> &[Map<String, Value>] {
        &self.builders
    }

    pub fn post_processors(&self) -> &[Map<String, Value>] {
        &self.post_processors
    }

    /// Render every provisioner and assemble the document. The first failing
    /// provisioner aborts the render; no partial document is produced.
    pub fn render(&self) -> Result<RenderedTemplate, TemplateError> {
        let mut diagnostics = Vec::new();
        let mut provisioners = Vec::with_capacity(self.provisioners.len());
        for (index, object) in self.provisioners.iter().enumerate() {
            let rendered = object.render().map_err(|source| TemplateError::Provisioner {
                at: location(index, object.title().map(Title::as_str)),
                source,
            })?;
            diagnostics.extend(rendered.diagnostics);
            provisioners.push(Value::Object(rendered.body));
        }

        let mut document = Map::new();
        if let Some(description) = &self.description {
            document.insert("description".to_owned(), Value::from(description.as_str()));
        }
        if let Some(version) = &self.min_packer_version {
            document.insert("min_packer_version".to_owned(), Value::from(version.as_str()));
        }
        if !self.variables.is_empty() {
            let variables = self
                .variables
                .iter()
                .map(|(name, default)| (name.clone(), Value::from(default.as_str())))
                .collect();
            document.insert("variables".to_owned(), Value::Object(variables));
        }
        if !self.builders.is_empty() {
            document.insert("builders".to_owned(), objects(&self.builders));
        }
        if !provisioners.is_empty() {
            document.insert("provisioners".to_owned(), Value::Array(provisioners));
        }
        if !self.post_processors.is_empty() {
            document.insert("post-processors".to_owned(), objects(&self.post_processors));
        }

        Ok(RenderedTemplate {
            document: Value::Object(document),
            diagnostics,
        })
    }

    /// Render to pretty-printed JSON, logging diagnostics as warnings.
    pub fn to_json(&self) -> Result<String, TemplateError> {
        let rendered = self.render()?;
        for diagnostic in &rendered.diagnostics {
            warn!("{diagnostic}");
        }
        Ok(serde_json::to_string_pretty(&rendered.document)?)
    }
}

fn check_typed(
    section: &'static str,
    index: usize,
    entry: &Map<String, Value>,
) -> Result<(), TemplateError> {
    match entry.get("type") {
        Some(Value::String(_)) => Ok(()),
        _ => Err(TemplateError::UntypedEntry { section, index }),
    }
}

fn objects(entries: &[Map<String, Value>]) -> Value {
    Value::Array(entries.iter().cloned().map(Value::Object).collect())
}
