//! Provisioner catalog and template assembly for packsmith.
//!
//! Each provisioner kind is a static `Kind`: a schema table plus optional
//! cross-field rules, rendered by the shared engine in `packsmith-schema`.
//! The [`Registry`] checks kinds at registration time, [`Template`] collects
//! rendered provisioners into a full Packer document, and [`TemplateFile`]
//! reads a TOML/JSON description of such a document.

macro_rules! provisioner {
    ($(#[$meta:meta])* $name:ident => $kind:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name;

        impl $name {
            /// Create an empty instance, ready for assignments.
            #[allow(clippy::new_ret_no_self)]
            pub fn new() -> ::packsmith_schema::ConfigObject {
                ::packsmith_schema::ConfigObject::new(&$kind)
            }

            /// Create an empty instance with a title.
            pub fn titled(
                title: impl Into<::packsmith_schema::Title>,
            ) -> ::packsmith_schema::ConfigObject {
                ::packsmith_schema::ConfigObject::titled(&$kind, title)
            }

            /// The static kind behind this provisioner.
            pub fn kind() -> &'static ::packsmith_schema::Kind {
                &$kind
            }
        }
    };
}

pub mod ansible;
pub mod converge;
pub mod file;
pub mod puppet;
pub mod registry;
pub mod salt;
pub mod shell;
pub mod template;
pub mod template_file;
pub mod windows;

pub use ansible::{Ansible, AnsibleLocal, ANSIBLE, ANSIBLE_LOCAL};
pub use converge::{Converge, ModuleDir, CONVERGE, MODULE_DIR};
pub use file::{File, FILE};
pub use puppet::{PuppetMasterless, PuppetServer, PUPPET_MASTERLESS, PUPPET_SERVER};
pub use registry::{catalog, check_kind, lookup, CatalogError, Registry, BUILTIN_KINDS};
pub use salt::{SaltMasterless, SALT_MASTERLESS};
pub use shell::{Shell, ShellLocal, SHELL, SHELL_LOCAL};
pub use template::{RenderedTemplate, Template, TemplateError};
pub use template_file::{
    parse_template_file, parse_template_json, parse_template_str, TemplateFile,
};
pub use windows::{
    Powershell, WindowsRestart, WindowsShell, POWERSHELL, WINDOWS_RESTART, WINDOWS_SHELL,
};
