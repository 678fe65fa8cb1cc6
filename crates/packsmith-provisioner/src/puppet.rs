use packsmith_schema::{FieldType, Kind, PropertyDecl};

const STRINGS: FieldType = FieldType::List(&FieldType::String);

/// Applies a manifest with `puppet apply`, no Puppet server involved.
pub static PUPPET_MASTERLESS: Kind = Kind {
    name: "PuppetMasterless",
    resource_type: Some("puppet-masterless"),
    schema: &[
        PropertyDecl::required("manifest_file", FieldType::String),
        PropertyDecl::optional("extra_arguments", STRINGS),
        PropertyDecl::optional("execute_command", FieldType::String),
        PropertyDecl::optional("facter", FieldType::Map),
        PropertyDecl::optional("hiera_config_path", FieldType::String),
        PropertyDecl::optional("ignore_exit_codes", FieldType::Bool),
        PropertyDecl::optional("manifest_dir", FieldType::String),
        PropertyDecl::optional("module_paths", STRINGS),
        PropertyDecl::optional("prevent_sudo", FieldType::Bool),
        PropertyDecl::optional("puppet_bin_dir", FieldType::String),
        PropertyDecl::optional("staging_directory", FieldType::String),
        PropertyDecl::optional("working_directory", FieldType::String),
    ],
    rules: &[],
    validate: None,
};

/// Runs a Puppet agent against a Puppet server.
pub static PUPPET_SERVER: Kind = Kind {
    name: "PuppetServer",
    resource_type: Some("puppet-server"),
    schema: &[
        PropertyDecl::optional("client_cert_path", FieldType::String),
        PropertyDecl::optional("client_private_key_path", FieldType::String),
        PropertyDecl::optional("execute_command", FieldType::String),
        PropertyDecl::optional("facter", FieldType::Map),
        PropertyDecl::optional("ignore_exit_codes", FieldType::Bool),
        PropertyDecl::optional("options", FieldType::String),
        PropertyDecl::optional("prevent_sudo", FieldType::Bool),
        PropertyDecl::optional("puppet_node", FieldType::String),
        PropertyDecl::optional("puppet_server", FieldType::String),
        PropertyDecl::optional("staging_dir", FieldType::String),
    ],
    rules: &[],
    validate: None,
};

provisioner!(
    /// `puppet-masterless` provisioner.
    PuppetMasterless => PUPPET_MASTERLESS
);

provisioner!(
    /// `puppet-server` provisioner.
    PuppetServer => PUPPET_SERVER
);

#[cfg(test)]
mod tests {
    use super::*;
    use packsmith_schema::SchemaError;
    use serde_json::{json, Value};

    #[test]
    fn facter_is_free_form() {
        let Value::Object(facts) = json!({"role": "web", "replicas": 3}) else {
            unreachable!()
        };
        let body = PuppetMasterless::new()
            .with("manifest_file", "site.pp")
            .unwrap()
            .with("facter", facts)
            .unwrap()
            .to_dict()
            .unwrap();
        assert_eq!(body["facter"], json!({"role": "web", "replicas": 3}));
    }

    #[test]
    fn facter_rejects_scalars() {
        let err = PuppetServer::new().with("facter", "role=web").unwrap_err();
        assert!(matches!(err, SchemaError::TypeMismatch { .. }));
    }

    #[test]
    fn puppet_server_needs_nothing() {
        let body = PuppetServer::new().to_dict().unwrap();
        assert_eq!(Value::Object(body), json!({"type": "puppet-server"}));
    }
}
