use packsmith_schema::{FieldType, Kind, PropertyDecl};

/// Transfers files between the build host and the machine being built.
pub static FILE: Kind = Kind {
    name: "File",
    resource_type: Some("file"),
    schema: &[
        PropertyDecl::required("source", FieldType::String),
        PropertyDecl::required("destination", FieldType::String),
        PropertyDecl::required("direction", FieldType::Enum(&[File::UPLOAD, File::DOWNLOAD])),
    ],
    rules: &[],
    validate: None,
};

provisioner!(
    /// `file` provisioner.
    File => FILE
);

impl File {
    pub const UPLOAD: &'static str = "upload";
    pub const DOWNLOAD: &'static str = "download";
}

#[cfg(test)]
mod tests {
    use super::*;
    use packsmith_schema::SchemaError;

    fn upload() -> packsmith_schema::ConfigObject {
        File::new()
            .with("source", "app.tar.gz")
            .unwrap()
            .with("destination", "/tmp/app.tar.gz")
            .unwrap()
    }

    #[test]
    fn direction_accepts_upload_and_download() {
        for direction in [File::UPLOAD, File::DOWNLOAD] {
            let body = upload().with("direction", direction).unwrap().to_dict().unwrap();
            assert_eq!(body["direction"], direction);
            assert_eq!(body["type"], "file");
        }
    }

    #[test]
    fn direction_outside_enumeration_fails() {
        let err = upload().with("direction", "sideways").unwrap_err();
        assert_eq!(
            err,
            SchemaError::EnumerationViolation {
                kind: "File".to_owned(),
                field: "direction".to_owned(),
                value: "sideways".to_owned(),
                allowed: vec!["upload".to_owned(), "download".to_owned()],
            }
        );
    }

    #[test]
    fn all_missing_fields_reported_together() {
        let err = File::new().render().unwrap_err();
        assert_eq!(
            err.to_string(),
            "File: required properties missing: source, destination, direction"
        );
    }
}
