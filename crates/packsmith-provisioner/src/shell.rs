use packsmith_schema::{EnvVar, FieldType, Kind, PropertyDecl, Rule, TemplateVar};

const STRINGS: FieldType = FieldType::List(&FieldType::String);

/// Ways of supplying the commands to run; exactly one must be used.
pub(crate) const SCRIPT_SOURCES: &[&str] = &["inline", "script", "scripts"];

/// Runs shell commands or scripts on the machine being built.
pub static SHELL: Kind = Kind {
    name: "Shell",
    resource_type: Some("shell"),
    schema: &[
        PropertyDecl::optional("inline", STRINGS),
        PropertyDecl::optional("script", FieldType::String),
        PropertyDecl::optional("scripts", STRINGS),
        PropertyDecl::optional("binary", FieldType::Bool),
        PropertyDecl::optional("environment_vars", STRINGS),
        PropertyDecl::optional("execute_command", FieldType::String),
        PropertyDecl::optional("expect_disconnect", FieldType::Bool),
        PropertyDecl::optional("inline_shebang", FieldType::String),
        PropertyDecl::optional("remote_folder", FieldType::String),
        PropertyDecl::optional("remote_file", FieldType::String),
        PropertyDecl::optional("remote_path", FieldType::String),
        PropertyDecl::optional("skip_clean", FieldType::Bool),
        PropertyDecl::optional("start_retry_timeout", FieldType::String),
    ],
    rules: &[Rule::ExactlyOne(SCRIPT_SOURCES)],
    validate: None,
};

/// Runs a command on the build host.
pub static SHELL_LOCAL: Kind = Kind {
    name: "ShellLocal",
    resource_type: Some("shell-local"),
    schema: &[
        PropertyDecl::required("command", FieldType::String),
        PropertyDecl::optional("execute_command", STRINGS),
    ],
    rules: &[],
    validate: None,
};

provisioner!(
    /// `shell` provisioner.
    Shell => SHELL
);

impl Shell {
    /// Path of the uploaded script, usable in `execute_command`.
    pub const PATH: TemplateVar = TemplateVar::new("Path");
    /// Environment variable assignments, usable in `execute_command`.
    pub const VARS: TemplateVar = TemplateVar::new("Vars");

    pub const PACKER_BUILD_NAME: EnvVar = EnvVar::new("PACKER_BUILD_NAME");
    pub const PACKER_BUILDER_TYPE: EnvVar = EnvVar::new("PACKER_BUILDER_TYPE");
    pub const PACKER_HTTP_ADDR: EnvVar = EnvVar::new("PACKER_HTTP_ADDR");
}

provisioner!(
    /// `shell-local` provisioner.
    ShellLocal => SHELL_LOCAL
);

impl ShellLocal {
    /// The configured command, usable in `execute_command`.
    pub const COMMAND: TemplateVar = TemplateVar::new("Command");
}
