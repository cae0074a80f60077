//! Format registry
//!
//! Formats are looked up by name or by file extension. The markdown format
//! carries the schema it parses with, so a registry built with
//! [`FormatRegistry::with_schema`] reads only the constructs that schema
//! enables; tags and JSON always carry every kind.

use crate::error::FormatError;
use crate::format::{Format, SerializedDocument};
use crate::formats::{json::JsonFormat, markdown::MarkdownFormat, tag::TagFormat};
use crate::ir::nodes::Document;
use crate::schema::Schema;
use log::debug;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::path::Path;

/// # Examples
///
/// ```ignore
/// let registry = FormatRegistry::default();
/// let tags = registry.convert("$$E=mc^2$$", "markdown", "tag", &HashMap::new())?;
/// ```
pub struct FormatRegistry {
    formats: BTreeMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        FormatRegistry {
            formats: BTreeMap::new(),
        }
    }

    /// Built-in formats, markdown reading with `schema`.
    pub fn with_schema(schema: Schema) -> Self {
        let mut registry = Self::new();
        registry.register(MarkdownFormat::new(schema));
        registry.register(TagFormat);
        registry.register(JsonFormat);
        registry
    }

    pub fn with_defaults() -> Self {
        Self::with_schema(Schema::standard())
    }

    /// Replaces any format already registered under the same name.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    pub fn get(&self, name: &str) -> Result<&dyn Format, FormatError> {
        self.formats
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| FormatError::FormatNotFound(name.to_string()))
    }

    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// Format names, sorted.
    pub fn list_formats(&self) -> Vec<String> {
        self.formats.keys().cloned().collect()
    }

    /// `(name, description)` pairs, sorted by name.
    pub fn describe(&self) -> Vec<(&str, &str)> {
        self.formats
            .values()
            .map(|format| (format.name(), format.description()))
            .collect()
    }

    /// Format claiming a filename's extension, ignoring case.
    pub fn detect_format_from_filename(&self, filename: &str) -> Option<String> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())?
            .to_ascii_lowercase();

        self.formats
            .values()
            .find(|format| format.file_extensions().contains(&extension.as_str()))
            .map(|format| format.name().to_string())
    }

    /// An explicit name wins over the extension. Both must name a
    /// registered format.
    pub fn resolve_format(
        &self,
        filename: &str,
        explicit: Option<&str>,
    ) -> Result<String, FormatError> {
        let name = match explicit {
            Some(name) => name.to_string(),
            None => self
                .detect_format_from_filename(filename)
                .ok_or_else(|| FormatError::UndetectedFormat(filename.to_string()))?,
        };
        self.get(&name)?;
        Ok(name)
    }

    pub fn parse(&self, source: &str, format: &str) -> Result<Document, FormatError> {
        let fmt = self.get(format)?;
        if !fmt.supports_parsing() {
            return Err(FormatError::NotSupported(format!(
                "Format '{format}' does not support parsing"
            )));
        }
        fmt.parse(source)
    }

    /// Text output with no options.
    pub fn serialize(&self, doc: &Document, format: &str) -> Result<String, FormatError> {
        self.serialize_with_options(doc, format, &HashMap::new())
            .map(SerializedDocument::into_string)
    }

    pub fn serialize_with_options(
        &self,
        doc: &Document,
        format: &str,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        let fmt = self.get(format)?;
        if !fmt.supports_serialization() {
            return Err(FormatError::NotSupported(format!(
                "Format '{format}' does not support serialization"
            )));
        }
        fmt.serialize_with_options(doc, options)
    }

    /// Parse with `from`, write with `to`. Both formats are checked before
    /// the source is read.
    pub fn convert(
        &self,
        source: &str,
        from: &str,
        to: &str,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        self.get(from)?;
        self.get(to)?;
        let doc = self.parse(source, from)?;
        debug!(
            "converting {from} -> {to}: {} top-level blocks",
            doc.children.len()
        );
        self.serialize_with_options(&doc, to, options)
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
