use crate::shell::SCRIPT_SOURCES;
use packsmith_schema::{
    ConfigObject, Diagnostics, FieldType, Kind, PropertyDecl, Rule, SchemaError, TemplateVar,
};

const STRINGS: FieldType = FieldType::List(&FieldType::String);

/// Runs `cmd` commands or batch scripts on a Windows machine.
///
/// Renders as `windows-shell`, the type Packer registers for this
/// provisioner. Some template generators emit `windows-local` here, which
/// Packer rejects as an unknown provisioner.
pub static WINDOWS_SHELL: Kind = Kind {
    name: "WindowsShell",
    resource_type: Some("windows-shell"),
    schema: &[
        PropertyDecl::optional("inline", STRINGS),
        PropertyDecl::optional("script", FieldType::String),
        PropertyDecl::optional("scripts", STRINGS),
        PropertyDecl::optional("binary", FieldType::Bool),
        PropertyDecl::optional("environment_vars", STRINGS),
        PropertyDecl::optional("execute_command", FieldType::String),
        PropertyDecl::optional("remote_path", FieldType::String),
        PropertyDecl::optional("start_retry_timeout", FieldType::String),
    ],
    rules: &[Rule::ExactlyOne(SCRIPT_SOURCES)],
    validate: None,
};

/// Restarts a Windows machine and waits for it to come back.
pub static WINDOWS_RESTART: Kind = Kind {
    name: "WindowsRestart",
    resource_type: Some("windows-restart"),
    schema: &[
        PropertyDecl::optional("restart_command", FieldType::String),
        PropertyDecl::optional("restart_check_command", FieldType::String),
        PropertyDecl::optional("restart_timeout", FieldType::String),
    ],
    rules: &[],
    validate: None,
};

/// Runs PowerShell commands or scripts on a Windows machine.
pub static POWERSHELL: Kind = Kind {
    name: "Powershell",
    resource_type: Some("powershell"),
    schema: &[
        PropertyDecl::optional("inline", STRINGS),
        PropertyDecl::optional("script", FieldType::String),
        PropertyDecl::optional("scripts", STRINGS),
        PropertyDecl::optional("binary", FieldType::Bool),
        PropertyDecl::optional("elevated_user", FieldType::String),
        PropertyDecl::optional("elevated_password", FieldType::String),
        PropertyDecl::optional("elevated_execute_command", FieldType::String),
        PropertyDecl::optional("environment_vars", STRINGS),
        PropertyDecl::optional("execute_command", FieldType::String),
        PropertyDecl::optional(
            "execution_policy",
            FieldType::Enum(Powershell::EXECUTION_POLICIES),
        ),
        PropertyDecl::optional("remote_path", FieldType::String),
        PropertyDecl::optional("skip_clean", FieldType::Bool),
        PropertyDecl::optional("start_retry_timeout", FieldType::String),
        PropertyDecl::optional("valid_exit_codes", FieldType::List(&FieldType::Integer)),
    ],
    rules: &[Rule::ExactlyOne(SCRIPT_SOURCES)],
    validate: Some(validate_elevated),
};

/// Elevated execution needs both the user and the password.
fn validate_elevated(object: &ConfigObject, _sink: &mut Diagnostics) -> Result<(), SchemaError> {
    let missing = match (
        object.contains("elevated_user"),
        object.contains("elevated_password"),
    ) {
        (true, false) => "elevated_password",
        (false, true) => "elevated_user",
        _ => return Ok(()),
    };
    Err(SchemaError::RequiredFieldMissing {
        kind: object.kind().name.to_owned(),
        fields: vec![missing.to_owned()],
    })
}

provisioner!(
    /// `windows-shell` provisioner.
    WindowsShell => WINDOWS_SHELL
);

impl WindowsShell {
    pub const VARS: TemplateVar = TemplateVar::new("Vars");
    pub const PATH: TemplateVar = TemplateVar::new("Path");
}

provisioner!(
    /// `windows-restart` provisioner.
    WindowsRestart => WINDOWS_RESTART
);

provisioner!(
    /// `powershell` provisioner.
    Powershell => POWERSHELL
);

impl Powershell {
    pub const VARS: TemplateVar = TemplateVar::new("Vars");
    pub const PATH: TemplateVar = TemplateVar::new("Path");

    pub const EXECUTION_POLICIES: &'static [&'static str] = &[
        "bypass",
        "allsigned",
        "default",
        "remotesigned",
        "restricted",
        "undefined",
        "unrestricted",
        "none",
    ];
}
