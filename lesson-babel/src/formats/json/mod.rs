//! JSON format
//!
//! The tree as serde sees it: blocks and inlines tagged by `type`. Useful
//! for inspecting what the markdown grammar produced and for handing a
//! document to tools that do not speak markdown.

use crate::error::FormatError;
use crate::format::{Format, SerializedDocument};
use crate::ir::nodes::Document;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Document tree as JSON"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        serde_json::from_str(source).map_err(|e| FormatError::ParseError(e.to_string()))
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serde_json::to_string_pretty(doc)
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    /// `pretty=false` writes the tree on one line.
    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        let pretty = match options.get("pretty").map(String::as_str) {
            None | Some("true") => true,
            Some("false") => false,
            Some(other) => return Err(FormatError::bad_option_value("json", "pretty", other)),
        };
        if pretty {
            return self.serialize(doc).map(SerializedDocument::from);
        }
        serde_json::to_string(doc)
            .map(SerializedDocument::from)
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }
}
