pub mod check;
pub mod completions;
pub mod describe;
pub mod kinds;
pub mod man_pages;
pub mod render;

use console::Style;
use packsmith_provisioner::{parse_template_file, Registry, Template, TemplateError};
use packsmith_schema::Diagnostic;
use std::path::Path;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_TEMPLATE_ERROR: u8 = 2;

pub fn json_pretty(value: &impl serde::Serialize) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("JSON serialization failed: {e}"))
}

pub fn registry() -> Result<Registry, String> {
    Registry::with_builtins().map_err(|e| format!("catalog error: {e}"))
}

/// Error message for a template failure. Invalid templates carry the
/// `template error:` prefix that selects the exit code.
pub fn template_error(err: &TemplateError) -> String {
    if err.is_validation() {
        format!("template error: {err}")
    } else {
        err.to_string()
    }
}

pub fn load_template(path: &Path) -> Result<Template, String> {
    let registry = registry()?;
    let file = parse_template_file(path).map_err(|e| template_error(&e))?;
    file.into_template(&registry).map_err(|e| template_error(&e))
}

pub fn print_diagnostics(diagnostics: &[Diagnostic]) {
    let label = Style::new().yellow().bold().apply_to("warning:");
    for diagnostic in diagnostics {
        eprintln!("{label} {diagnostic}");
    }
}

/// Styled `required`/`optional` label, left-aligned to `width` before any
/// escape codes are added.
pub fn colorize_required(required: bool, width: usize) -> String {
    let (label, style) = if required {
        ("required", Style::new().red())
    } else {
        ("optional", Style::new().dim())
    };
    style.apply_to(format!("{label:<width$}")).to_string()
}
