use super::{json_pretty, load_template, print_diagnostics, template_error, EXIT_SUCCESS};
use console::Style;
use std::path::Path;

pub fn run(template_path: &Path, json: bool) -> Result<u8, String> {
    let template = load_template(template_path)?;
    let rendered = template.render().map_err(|e| template_error(&e))?;
    let count = template.provisioners().len();

    if json {
        let payload = serde_json::json!({
            "status": "valid",
            "template": template_path,
            "provisioners": count,
            "diagnostics": rendered.diagnostics,
        });
        println!("{}", json_pretty(&payload)?);
    } else {
        print_diagnostics(&rendered.diagnostics);
        println!(
            "{} {} ({count} provisioner(s), {} warning(s))",
            Style::new().green().apply_to("valid"),
            template_path.display(),
            rendered.diagnostics.len()
        );
    }
    Ok(EXIT_SUCCESS)
}
