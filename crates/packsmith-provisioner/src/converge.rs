use packsmith_schema::{FieldType, Kind, PropertyDecl};

/// A directory uploaded before a Converge module runs. Embedded in
/// `module_dirs`, rendered without a `type` key.
pub static MODULE_DIR: Kind = Kind {
    name: "ModuleDir",
    resource_type: None,
    schema: &[
        PropertyDecl::required("source", FieldType::String),
        PropertyDecl::required("destination", FieldType::String),
        PropertyDecl::optional("exclude", FieldType::List(&FieldType::String)),
    ],
    rules: &[],
    validate: None,
};

static MODULE_DIR_ENTRY: FieldType = FieldType::Object(&MODULE_DIR);

/// Bootstraps Converge and applies a module.
pub static CONVERGE: Kind = Kind {
    name: "Converge",
    resource_type: Some("converge"),
    schema: &[
        PropertyDecl::required("module", FieldType::String),
        PropertyDecl::optional("bootstrap", FieldType::Bool),
        PropertyDecl::optional("version", FieldType::String),
        PropertyDecl::optional("bootstrap_command", FieldType::String),
        PropertyDecl::optional("prevent_bootstrap_sudo", FieldType::Bool),
        PropertyDecl::optional("module_dirs", FieldType::List(&MODULE_DIR_ENTRY)),
        PropertyDecl::optional("working_directory", FieldType::String),
        PropertyDecl::optional("params", FieldType::Map),
        PropertyDecl::optional("execute_command", FieldType::String),
        PropertyDecl::optional("prevent_sudo", FieldType::Bool),
    ],
    rules: &[],
    validate: None,
};

provisioner!(
    /// `converge` provisioner.
    Converge => CONVERGE
);

provisioner!(
    /// Entry of the Converge `module_dirs` list.
    ModuleDir => MODULE_DIR
);

#[cfg(test)]
mod tests {
    use super::*;
    use packsmith_schema::SchemaError;
    use serde_json::{json, Value};

    fn module_dir() -> packsmith_schema::ConfigObject {
        ModuleDir::new()
            .with("source", "./modules")
            .unwrap()
            .with("destination", "/tmp/modules")
            .unwrap()
    }

    #[test]
    fn module_dirs_render_without_type() {
        let body = Converge::new()
            .with("module", "nginx.hcl")
            .unwrap()
            .with("module_dirs", vec![module_dir()])
            .unwrap()
            .to_dict()
            .unwrap();
        assert_eq!(
            Value::Object(body),
            json!({
                "type": "converge",
                "module": "nginx.hcl",
                "module_dirs": [{"source": "./modules", "destination": "/tmp/modules"}]
            })
        );
    }

    #[test]
    fn incomplete_module_dir_fails_render() {
        let partial = ModuleDir::new().with("source", "./modules").unwrap();
        let obj = Converge::new()
            .with("module", "nginx.hcl")
            .unwrap()
            .with("module_dirs", vec![partial])
            .unwrap();
        assert_eq!(
            obj.render().unwrap_err(),
            SchemaError::RequiredFieldMissing {
                kind: "ModuleDir".to_owned(),
                fields: vec!["destination".to_owned()],
            }
        );
    }

    #[test]
    fn module_dirs_reject_plain_maps() {
        let Value::Object(map) = json!({"source": "a", "destination": "b"}) else {
            unreachable!()
        };
        let err = Converge::new()
            .with("module_dirs", vec![packsmith_schema::PropertyValue::Map(map)])
            .unwrap_err();
        assert!(matches!(err, SchemaError::TypeMismatch { ref field, .. } if field == "module_dirs[0]"));
    }

    #[test]
    fn module_dirs_from_json() {
        let mut obj = Converge::new().with("module", "app.hcl").unwrap();
        obj.set_json(
            "module_dirs",
            json!([{"source": "./m", "destination": "/m", "exclude": [".git"]}]),
        )
        .unwrap();
        let body = obj.to_dict().unwrap();
        assert_eq!(body["module_dirs"][0]["exclude"], json!([".git"]));
    }
}
