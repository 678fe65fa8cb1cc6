use super::{json_pretty, registry, EXIT_SUCCESS};

pub fn run(json: bool) -> Result<u8, String> {
    let registry = registry()?;
    if json {
        let kinds: Vec<_> = registry
            .kinds()
            .iter()
            .map(|kind| {
                serde_json::json!({
                    "type": kind.tag(),
                    "name": kind.name,
                    "fields": kind.schema.len(),
                    "required": kind.required_fields().map(|d| d.name).collect::<Vec<_>>(),
                })
            })
            .collect();
        println!("{}", json_pretty(&kinds)?);
        return Ok(EXIT_SUCCESS);
    }

    println!("{:<18} {:<18} REQUIRED", "TYPE", "NAME");
    for kind in registry.kinds() {
        let required: Vec<_> = kind.required_fields().map(|d| d.name).collect();
        let required = if required.is_empty() {
            "-".to_owned()
        } else {
            required.join(", ")
        };
        println!("{:<18} {:<18} {required}", kind.tag(), kind.name);
    }
    Ok(EXIT_SUCCESS)
}
