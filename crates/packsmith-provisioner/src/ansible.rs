use packsmith_schema::{FieldType, Kind, PropertyDecl};

const STRINGS: FieldType = FieldType::List(&FieldType::String);

/// Runs a playbook with Ansible installed on the machine being built.
pub static ANSIBLE_LOCAL: Kind = Kind {
    name: "AnsibleLocal",
    resource_type: Some("ansible-local"),
    schema: &[
        PropertyDecl::required("playbook_file", FieldType::String),
        PropertyDecl::optional("command", FieldType::String),
        PropertyDecl::optional("extra_arguments", STRINGS),
        PropertyDecl::optional("inventory_groups", FieldType::String),
        PropertyDecl::optional("inventory_file", FieldType::String),
        PropertyDecl::optional("playbook_dir", FieldType::String),
        PropertyDecl::optional("playbook_paths", STRINGS),
        PropertyDecl::optional("galaxy_file", FieldType::String),
        PropertyDecl::optional("group_vars", FieldType::String),
        PropertyDecl::optional("host_vars", FieldType::String),
        PropertyDecl::optional("role_paths", STRINGS),
        PropertyDecl::optional("staging_directory", FieldType::String),
    ],
    rules: &[],
    validate: None,
};

/// Runs a playbook from the build host over SSH/WinRM.
pub static ANSIBLE: Kind = Kind {
    name: "Ansible",
    resource_type: Some("ansible"),
    schema: &[
        PropertyDecl::required("playbook_file", FieldType::String),
        PropertyDecl::optional("ansible_env_vars", STRINGS),
        PropertyDecl::optional("command", FieldType::String),
        PropertyDecl::optional("empty_groups", STRINGS),
        PropertyDecl::optional("extra_arguments", STRINGS),
        PropertyDecl::optional("groups", STRINGS),
        PropertyDecl::optional("host_alias", FieldType::String),
        PropertyDecl::optional("inventory_directory", FieldType::String),
        PropertyDecl::optional("local_port", FieldType::String),
        PropertyDecl::optional("sftp_command", FieldType::String),
        PropertyDecl::optional("skip_version_check", FieldType::Bool),
        PropertyDecl::optional("ssh_host_key_file", FieldType::String),
        PropertyDecl::optional("ssh_authorized_key_file", FieldType::String),
        PropertyDecl::optional("user", FieldType::String),
    ],
    rules: &[],
    validate: None,
};

provisioner!(
    /// `ansible-local` provisioner.
    AnsibleLocal => ANSIBLE_LOCAL
);

provisioner!(
    /// `ansible` provisioner.
    Ansible => ANSIBLE
);
