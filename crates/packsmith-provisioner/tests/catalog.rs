//! Properties that hold for every kind in the built-in catalog.

use packsmith_provisioner::{Registry, BUILTIN_KINDS};
use packsmith_schema::{ConfigObject, FieldType, Kind, PropertyValue, Rule, SchemaError};
use serde_json::{Map, Value};

fn sample(ty: &FieldType) -> PropertyValue {
    match *ty {
        FieldType::String => "sample".into(),
        FieldType::Bool => true.into(),
        FieldType::Integer => 7.into(),
        FieldType::Number => 1.5.into(),
        FieldType::Map => {
            let mut map = Map::new();
            map.insert("key".to_owned(), Value::from("value"));
            map.into()
        }
        FieldType::List(inner) => PropertyValue::List(vec![sample(inner)]),
        FieldType::Enum(allowed) => allowed[0].into(),
        FieldType::Object(kind) => minimal(kind).into(),
    }
}

/// A value of the wrong type for `ty`.
fn mismatched(ty: &FieldType) -> PropertyValue {
    match ty {
        FieldType::String | FieldType::Enum(_) => false.into(),
        _ => "wrong".into(),
    }
}

/// Object with every required field set and the first member of each
/// exactly-one group chosen.
fn minimal(kind: &'static Kind) -> ConfigObject {
    let mut object = ConfigObject::new(kind);
    for decl in kind.required_fields() {
        object.set(decl.name, sample(&decl.ty)).unwrap();
    }
    for rule in kind.rules {
        if let Rule::ExactlyOne(group) = rule {
            let decl = kind.field(group[0]).unwrap();
            object.set(decl.name, sample(&decl.ty)).unwrap();
        }
    }
    object
}

#[test]
fn minimal_objects_render_with_their_tag() {
    for kind in BUILTIN_KINDS {
        let object = minimal(kind);
        let body = object.to_dict().unwrap();
        assert_eq!(body["type"], kind.tag(), "{}", kind.name);
        assert_eq!(body.len(), object.properties().len() + 1, "{}", kind.name);
    }
}

#[test]
fn each_missing_required_field_is_named() {
    for kind in BUILTIN_KINDS {
        for decl in kind.required_fields() {
            let mut object = minimal(kind);
            object.remove(decl.name);
            assert_eq!(
                object.render().unwrap_err(),
                SchemaError::RequiredFieldMissing {
                    kind: kind.name.to_owned(),
                    fields: vec![decl.name.to_owned()],
                }
            );
        }
    }
}

#[test]
fn unknown_keys_are_rejected_with_allowed_list() {
    for kind in BUILTIN_KINDS {
        let err = ConfigObject::new(kind)
            .set("not_a_field", "value")
            .unwrap_err();
        let SchemaError::SchemaViolation { allowed, .. } = err else {
            panic!("{}: expected schema violation, got {err}", kind.name);
        };
        assert_eq!(allowed, kind.field_names(), "{}", kind.name);
    }
}

#[test]
fn every_field_accepts_its_type_and_rejects_others() {
    for kind in BUILTIN_KINDS {
        for decl in kind.schema {
            let mut object = ConfigObject::new(kind);
            object
                .set(decl.name, sample(&decl.ty))
                .unwrap_or_else(|e| panic!("{}.{}: {e}", kind.name, decl.name));
            assert!(
                matches!(
                    object.set(decl.name, mismatched(&decl.ty)),
                    Err(SchemaError::TypeMismatch { .. })
                ),
                "{}.{} accepted a mismatched value",
                kind.name,
                decl.name
            );
            assert!(object.get(decl.name).is_some());
        }
    }
}

#[test]
fn render_is_repeatable_and_side_effect_free() {
    for kind in BUILTIN_KINDS {
        let object = minimal(kind);
        let before = object.clone();
        let first = object.render().unwrap();
        let second = object.render().unwrap();
        assert_eq!(first, second, "{}", kind.name);
        assert_eq!(object, before, "{}", kind.name);
    }
}

#[test]
fn rendered_body_rebuilds_the_same_object() {
    for kind in BUILTIN_KINDS {
        let object = minimal(kind);
        let mut body = object.to_dict().unwrap();
        body.remove("type");
        let rebuilt = ConfigObject::from_json(kind, None, body).unwrap();
        assert_eq!(rebuilt, object, "{}", kind.name);
    }
}

#[test]
fn titles_are_never_rendered() {
    for kind in BUILTIN_KINDS {
        let mut object = minimal(kind);
        object.set_title("step");
        let body = object.to_dict().unwrap();
        assert!(!body.contains_key("title"), "{}", kind.name);
        assert!(!body.values().any(|v| v == "step"), "{}", kind.name);
    }
}

#[test]
fn registry_resolves_every_builtin() {
    let registry = Registry::with_builtins().unwrap();
    for kind in BUILTIN_KINDS {
        let found = registry.get(kind.tag()).unwrap();
        assert_eq!(found, *kind);
    }
}
