use packsmith_schema::{FieldType, Kind, PropertyDecl, Rule};

/// Runs Salt states locally with `salt-call`, no Salt master involved.
///
/// A custom `minion_config` makes Salt ignore the remote pillar roots and
/// state tree. That combination is reported as a diagnostic, not an error.
pub static SALT_MASTERLESS: Kind = Kind {
    name: "SaltMasterless",
    resource_type: Some("salt-masterless"),
    schema: &[
        PropertyDecl::required("local_state_tree", FieldType::String),
        PropertyDecl::optional("bootstrap_args", FieldType::String),
        PropertyDecl::optional("disable_sudo", FieldType::Bool),
        PropertyDecl::optional("remote_pillar_roots", FieldType::String),
        PropertyDecl::optional("remote_state_tree", FieldType::String),
        PropertyDecl::optional("local_pillar_roots", FieldType::String),
        PropertyDecl::optional("custom_state", FieldType::String),
        PropertyDecl::optional("minion_config", FieldType::String),
        PropertyDecl::optional("grains_file", FieldType::String),
        PropertyDecl::optional("skip_bootstrap", FieldType::Bool),
        PropertyDecl::optional("temp_config_dir", FieldType::String),
        PropertyDecl::optional("no_exit_on_failure", FieldType::Bool),
        PropertyDecl::optional("log_level", FieldType::String),
        PropertyDecl::optional("salt_call_args", FieldType::String),
        PropertyDecl::optional("salt_bin_dir", FieldType::String),
    ],
    rules: &[Rule::WarnIfAny {
        trigger: "minion_config",
        fields: &["remote_pillar_roots", "remote_state_tree"],
        message: "'minion_config' is present, 'remote_pillar_roots' and 'remote_state_tree' will be ignored",
    }],
    validate: None,
};

provisioner!(
    /// `salt-masterless` provisioner.
    SaltMasterless => SALT_MASTERLESS
);

#[cfg(test)]
mod tests {
    use super::*;

    fn salt() -> packsmith_schema::ConfigObject {
        SaltMasterless::new()
            .with("local_state_tree", "./salt")
            .unwrap()
    }

    #[test]
    fn minion_config_with_remote_tree_warns() {
        let obj = salt()
            .with("minion_config", "./minion")
            .unwrap()
            .with("remote_state_tree", "/srv/salt")
            .unwrap();
        let rendered = obj.render().unwrap();
        assert_eq!(rendered.diagnostics.len(), 1);
        assert!(rendered.diagnostics[0].message.contains("will be ignored"));
        assert_eq!(rendered.body["remote_state_tree"], "/srv/salt");
        assert!(obj.to_dict().is_ok());
    }

    #[test]
    fn minion_config_alone_is_quiet() {
        let obj = salt().with("minion_config", "./minion").unwrap();
        assert!(obj.render().unwrap().diagnostics.is_empty());
    }

    #[test]
    fn remote_roots_without_minion_config_is_quiet() {
        let obj = salt()
            .with("remote_pillar_roots", "/srv/pillar")
            .unwrap()
            .with("remote_state_tree", "/srv/salt")
            .unwrap();
        assert!(obj.render().unwrap().diagnostics.is_empty());
    }
}
