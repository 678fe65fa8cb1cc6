use super::{colorize_required, json_pretty, registry, EXIT_SUCCESS};
use packsmith_schema::{FieldType, Kind};

/// Kinds embedded in `kind`'s fields, in declaration order.
fn embedded_kinds(kind: &Kind) -> Vec<&'static Kind> {
    fn walk(ty: &FieldType) -> Option<&'static Kind> {
        match *ty {
            FieldType::Object(kind) => Some(kind),
            FieldType::List(inner) => walk(inner),
            _ => None,
        }
    }
    kind.schema.iter().filter_map(|decl| walk(&decl.ty)).collect()
}

fn kind_json(kind: &Kind) -> serde_json::Value {
    let fields: Vec<_> = kind
        .schema
        .iter()
        .map(|decl| {
            serde_json::json!({
                "name": decl.name,
                "type": decl.ty.to_string(),
                "required": decl.required,
            })
        })
        .collect();
    let rules: Vec<_> = kind.rules.iter().map(ToString::to_string).collect();
    serde_json::json!({
        "name": kind.name,
        "type": kind.resource_type,
        "fields": fields,
        "rules": rules,
        "custom_validation": kind.validate.is_some(),
    })
}

const REQUIRED_WIDTH: usize = 10;

fn field_rows(kind: &Kind) -> Vec<String> {
    let width = kind
        .schema
        .iter()
        .map(|decl| decl.name.len())
        .max()
        .unwrap_or(0)
        .max("FIELD".len());
    let mut rows = vec![format!(
        "  {:<width$}  {:<REQUIRED_WIDTH$} TYPE",
        "FIELD", "REQUIRED"
    )];
    rows.extend(kind.schema.iter().map(|decl| {
        format!(
            "  {:<width$}  {} {}",
            decl.name,
            colorize_required(decl.required, REQUIRED_WIDTH),
            decl.ty
        )
    }));
    rows.extend(kind.rules.iter().map(|rule| format!("  rule: {rule}")));
    rows
}

fn print_fields(kind: &Kind) {
    for row in field_rows(kind) {
        println!("{row}");
    }
}

pub fn run(resource_type: &str, json: bool) -> Result<u8, String> {
    let registry = registry()?;
    let kind = registry.get(resource_type).ok_or_else(|| {
        format!("unknown provisioner type '{resource_type}' (see 'packsmith kinds')")
    })?;
    let embedded = embedded_kinds(kind);

    if json {
        let mut payload = kind_json(kind);
        payload["embedded"] = embedded.iter().copied().map(kind_json).collect();
        println!("{}", json_pretty(&payload)?);
        return Ok(EXIT_SUCCESS);
    }

    println!("{} ({})", kind.name, kind.tag());
    print_fields(kind);
    for nested in embedded {
        println!();
        println!("{} (embedded)", nested.name);
        print_fields(nested);
    }
    Ok(EXIT_SUCCESS)
}
