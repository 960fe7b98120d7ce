//! Document parsing from JSON text.

use serde_json::Value;

use crate::document::Document;
use crate::error::FigtrimError;

/// Parse a JSON string into a Document.
pub fn parse_document(json: &str) -> Result<Document, FigtrimError> {
    match serde_json::from_str::<Value>(json)? {
        Value::Object(root) => Ok(Document::new(root)),
        other => Err(FigtrimError::InvalidDocument(format!(
            "expected a top-level object, found {}",
            kind_of(&other)
        ))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_key_order() {
        let doc = parse_document(r#"{"zeta":1,"alpha":2,"mid":3}"#).unwrap();
        let keys: Vec<_> = doc.root.keys().map(String::as_str).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_parse_rejects_non_object() {
        let err = parse_document("[1, 2]").unwrap_err();
        assert!(matches!(err, FigtrimError::InvalidDocument(_)));
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(
            parse_document("{\"tree\": "),
            Err(FigtrimError::Json(_))
        ));
    }
}
