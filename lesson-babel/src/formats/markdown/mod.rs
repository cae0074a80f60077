//! Lesson markdown format
//!
//! Markdown with the lesson constructs layered on top. The text is the
//! canonical persisted form of a lesson, so serialization is exact: writing
//! a tree and reading it back gives the same tree.
//!
//! # Construct Mapping
//!
//! | Node              | Markdown                                  | Notes                                   |
//! |-------------------|-------------------------------------------|-----------------------------------------|
//! | InlineEquation    | `$formula$`                               | empty formulas are dropped on export    |
//! | BlockEquation     | `$$formula$$` on its own line             |                                         |
//! | CodeBlock         | ```` ```lang ```` fence                   | missing language → schema default       |
//! | Embed             | `{{text}}` on its own line                |                                         |
//! | Vocabulary        | `\|term: definition\|`                    |                                         |
//! | ChemicalStructure | `[[smiles]]`                              | label is not written                    |
//! | Question          | `::?` / options / letter / body / `::?`   | see below                               |
//! | Table             | `<table>` + one `<tr>` per line + `</table>` | rows go through the tag format       |
//! | Heading           | `#`..`######`                             |                                         |
//! | List              | `- ` or `N. `                             | tight; ordered lists renumber from 1    |
//! | Blockquote        | `> `                                      |                                         |
//! | Strong, Emphasis  | `**x**`, `_x_`                            | `*x*` is also read as emphasis          |
//! | Code              | `` `x` ``                                 |                                         |
//!
//! A question looks like:
//!
//! ```text
//! ::?
//! Sodium | Potassium | Calcium
//! A
//! Which element has the symbol Na?
//! ::?
//! ```
//!
//! The second line holds the options when it contains `|`; a single option
//! is written `Option A |`. The third line, read only after options, is the
//! answer letter. Everything else up to the closing `::?` is the body.
//!
//! # Lossy Conversions
//!
//! - Leading and trailing whitespace on paragraph lines, options, terms,
//!   definitions and formulas is trimmed.
//! - Formulas cannot contain `$`; option texts cannot contain `|`; SMILES
//!   cannot contain `]]`. Questions do not nest.
//! - A chemical structure label is not written; it reads back as the SMILES.

pub mod parser;
pub mod serializer;

use crate::error::FormatError;
use crate::format::{Format, SerializedDocument};
use crate::ir::nodes::Document;
use crate::schema::{Schema, SchemaOptions};
use std::collections::HashMap;

/// Format implementation for lesson markdown
#[derive(Debug, Clone, Default)]
pub struct MarkdownFormat {
    schema: Schema,
}

impl MarkdownFormat {
    pub fn new(schema: Schema) -> Self {
        MarkdownFormat { schema }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "Lesson markdown with equations, questions and other custom blocks"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        parser::parse_from_markdown(source, &self.schema)
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serializer::MarkdownSerializer::for_schema(&self.schema).serialize(doc)
    }

    /// Accepts `code-language`, overriding the fence language written for
    /// code blocks that have none.
    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        let mut schema_options: SchemaOptions = self.schema.options().clone();
        for (key, value) in options {
            match key.as_str() {
                "code-language" => schema_options.default_code_language = value.clone(),
                other => return Err(FormatError::unknown_option("markdown", other)),
            }
        }
        serializer::MarkdownSerializer::for_schema(&self.schema)
            .with_options(schema_options)
            .serialize(doc)
            .map(SerializedDocument::from)
    }
}
