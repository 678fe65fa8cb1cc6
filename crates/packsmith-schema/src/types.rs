//! Small value types shared by the engine: object titles and the opaque
//! substitution tokens understood by the image-building tool.
//!
//! Tokens are stored and rendered as plain strings; nothing in packsmith
//! interprets them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// Caller-chosen label for a configuration object, used for referencing and
/// duplicate detection. Never rendered.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Title(String);

impl Title {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for Title {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Title {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Title {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl From<String> for Title {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Title {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Template variable such as `{{.Path}}`, expanded by the build tool when it
/// runs the provisioner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TemplateVar(&'static str);

impl TemplateVar {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub const fn name(&self) -> &'static str {
        self.0
    }

    pub fn token(&self) -> String {
        format!("{{{{.{}}}}}", self.0)
    }
}

impl fmt::Display for TemplateVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{{.{}}}}}", self.0)
    }
}

/// Environment variable exported by the build tool to provisioner scripts,
/// referenced as `$NAME`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnvVar(&'static str);

impl EnvVar {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub const fn name(&self) -> &'static str {
        self.0
    }

    pub fn token(&self) -> String {
        format!("${}", self.0)
    }
}

impl fmt::Display for EnvVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_display_and_as_ref() {
        let title = Title::new("bootstrap");
        assert_eq!(title.to_string(), "bootstrap");
        assert_eq!(title.as_str(), "bootstrap");
        assert_eq!(AsRef::<str>::as_ref(&title), "bootstrap");
        assert!(title == *"bootstrap");
    }

    #[test]
    fn title_serde_is_transparent() {
        let title = Title::from("step-1");
        let json = serde_json::to_string(&title).unwrap();
        assert_eq!(json, "\"step-1\"");
        let back: Title = serde_json::from_str(&json).unwrap();
        assert_eq!(back, title);
    }

    #[test]
    fn template_var_token() {
        let path = TemplateVar::new("Path");
        assert_eq!(path.token(), "{{.Path}}");
        assert_eq!(path.to_string(), "{{.Path}}");
        assert_eq!(path.name(), "Path");
    }

    #[test]
    fn env_var_token() {
        let var = EnvVar::new("PACKER_BUILD_NAME");
        assert_eq!(var.token(), "$PACKER_BUILD_NAME");
        assert_eq!(
            format!("echo {var}"),
            "echo $PACKER_BUILD_NAME"
        );
    }
}
