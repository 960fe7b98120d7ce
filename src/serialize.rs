//! Document serialization to compact JSON.

use std::io::Write;

use crate::document::Document;
use crate::error::FigtrimError;

/// Serialize a Document with no whitespace between tokens.
pub fn serialize(doc: &Document) -> Result<String, FigtrimError> {
    Ok(serde_json::to_string(doc)?)
}

/// Stream a Document as compact JSON into `writer`.
pub fn write_document<W: Write>(writer: W, doc: &Document) -> Result<(), FigtrimError> {
    serde_json::to_writer(writer, doc)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_document;

    #[test]
    fn test_compact_separators() {
        let doc = parse_document("{\n  \"a\" : [ 1, 2 ],\n  \"b\" : { \"c\" : \"d e\" }\n}").unwrap();
        assert_eq!(serialize(&doc).unwrap(), r#"{"a":[1,2],"b":{"c":"d e"}}"#);
    }

    #[test]
    fn test_writer_matches_string() {
        let doc = parse_document(r#"{"z":1,"y":[true,null],"x":"ü"}"#).unwrap();
        let mut buf = Vec::new();
        write_document(&mut buf, &doc).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), serialize(&doc).unwrap());
    }
}
