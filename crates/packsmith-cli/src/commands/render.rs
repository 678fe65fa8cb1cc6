use super::{json_pretty, load_template, print_diagnostics, template_error, EXIT_SUCCESS};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

fn write_atomic(dest: &Path, content: &str) -> Result<(), String> {
    let dir = dest
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| format!("write temp file: {e}"))?;
    tmp.write_all(content.as_bytes())
        .map_err(|e| format!("write temp file: {e}"))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| format!("fsync temp file: {e}"))?;
    tmp.persist(dest)
        .map_err(|e| format!("persist {}: {}", dest.display(), e.error))?;
    Ok(())
}

pub fn run(template_path: &Path, output: Option<&Path>, json: bool) -> Result<u8, String> {
    let template = load_template(template_path)?;
    let rendered = template.render().map_err(|e| template_error(&e))?;
    print_diagnostics(&rendered.diagnostics);

    let mut document = json_pretty(&rendered.document)?;
    document.push('\n');

    let Some(dest) = output else {
        print!("{document}");
        return Ok(EXIT_SUCCESS);
    };
    write_atomic(dest, &document)?;

    if json {
        let payload = serde_json::json!({
            "status": "rendered",
            "template": template_path,
            "output": dest,
            "provisioners": template.provisioners().len(),
            "diagnostics": rendered.diagnostics,
        });
        println!("{}", json_pretty(&payload)?);
    } else {
        println!(
            "rendered {} provisioner(s) to {}",
            template.provisioners().len(),
            dest.display()
        );
    }
    Ok(EXIT_SUCCESS)
}
