//! Format trait definition
//!
//! Every persisted form of a lesson (markdown, render tags, JSON) implements
//! [`Format`], so the registry and the CLI handle them uniformly.

use crate::error::FormatError;
use crate::ir::nodes::Document;
use std::collections::HashMap;

/// Output of [`Format::serialize_with_options`]. Every lesson format writes
/// UTF-8 text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializedDocument(String);

impl SerializedDocument {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0.into_bytes()
    }
}

impl From<String> for SerializedDocument {
    fn from(text: String) -> Self {
        SerializedDocument(text)
    }
}

/// Trait for document formats
///
/// Implementors convert between a string representation and the lesson
/// [`Document`] tree. Formats can support parsing, serialization, or both.
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "markdown", "tag")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format (e.g., ["md", "markdown"])
    ///
    /// Returns a slice of file extensions without the leading dot.
    /// Used for automatic format detection from filenames.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Whether this format supports parsing (source → Document)
    fn supports_parsing(&self) -> bool {
        false
    }

    /// Whether this format supports serialization (Document → source)
    fn supports_serialization(&self) -> bool {
        false
    }

    /// Parse source text into a Document
    ///
    /// Default implementation returns NotSupported error.
    /// Formats that support parsing should override this method.
    fn parse(&self, _source: &str) -> Result<Document, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Serialize a Document into source text
    ///
    /// Default implementation returns NotSupported error.
    /// Formats that support serialization should override this method.
    fn serialize(&self, _doc: &Document) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }

    /// Serialize with `--extra-*` style parameters. The default accepts
    /// none and rejects the first key it is given.
    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        match options.keys().min() {
            None => self.serialize(doc).map(SerializedDocument::from),
            Some(key) => Err(FormatError::unknown_option(self.name(), key)),
        }
    }
}
