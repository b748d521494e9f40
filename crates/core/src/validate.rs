//! Structural validation of the parsed document tree.

use serde_json::Value;

use crate::error::{Error, Result};

/// Top-level sections every document must carry, in check order.
pub const REQUIRED_SECTIONS: [&str; 4] = ["asyncapi", "info", "channels", "components"];

/// Check that every mandatory top-level section is present.
///
/// Returns the tree unchanged on success. The first missing section aborts
/// with [`Error::SchemaStructure`]; later sections are not inspected. A
/// section set to `null` counts as missing, and so does every section when
/// the document root is not a mapping.
pub fn validate(doc: &Value) -> Result<&Value> {
    for section in REQUIRED_SECTIONS {
        if matches!(doc.get(section), None | Some(Value::Null)) {
            return Err(Error::SchemaStructure { section });
        }
    }
    Ok(doc)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use serde_json::json;

    fn complete() -> Value {
        json!({
            "asyncapi": "3.0.0",
            "info": { "title": "T", "version": "1" },
            "channels": {},
            "components": {}
        })
    }

    fn missing_section(doc: &Value) -> &'static str {
        match validate(doc) {
            Err(Error::SchemaStructure { section }) => section,
            other => panic!("expected SchemaStructure, got {other:?}"),
        }
    }

    #[test]
    fn test_complete_document_passes_unchanged() {
        let doc = complete();
        assert_eq!(validate(&doc).unwrap(), &doc);
    }

    #[test]
    fn test_each_section_is_required() {
        for section in REQUIRED_SECTIONS {
            let mut doc = complete();
            doc.as_object_mut().unwrap().remove(section);
            assert_eq!(missing_section(&doc), section);
        }
    }

    #[test]
    fn test_first_missing_section_wins() {
        let doc = json!({ "asyncapi": "3.0.0", "info": {} });
        assert_eq!(missing_section(&doc), "channels");
    }

    #[test]
    fn test_null_section_counts_as_missing() {
        let mut doc = complete();
        doc["info"] = Value::Null;
        assert_eq!(missing_section(&doc), "info");
    }

    #[test]
    fn test_non_mapping_root() {
        assert_eq!(missing_section(&json!(["asyncapi"])), "asyncapi");
    }
}
