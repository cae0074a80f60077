//! Render-tag format
//!
//! The persisted markup form of a lesson document, the same elements a host
//! editor renders. Parsing and serialization both go through html5ever and
//! an RcDom.
//!
//! ## Element Mapping
//!
//! | Node               | Element                                                            |
//! |--------------------|--------------------------------------------------------------------|
//! | BlockEquation      | `<block-equation data-formula>`                                    |
//! | InlineEquation     | `<inline-equation data-formula>`                                   |
//! | Embed              | `<embed text>`                                                     |
//! | Vocabulary         | `<span data-vocabulary-term data-term data-definition>`            |
//! | ChemicalStructure  | `<span data-smiles data-label class="smiles-node">`                |
//! | Question           | `<div data-question data-options data-correct-option>` + children  |
//! | CodeBlock          | `<pre><code class="language-x">`                                   |
//! | Table, row, cell   | `<table>`, `<tr>`, `<td>`/`<th>` with `colspan`/`rowspan`          |
//! | Paragraph, Heading | `<p>`, `<h1>`..`<h6>`                                              |
//! | List, ListItem     | `<ul>`/`<ol>`, `<li>`                                              |
//! | Blockquote, break  | `<blockquote>`, `<hr>`                                             |
//! | Strong, Emphasis   | `<strong>`, `<em>`                                                 |
//! | Code               | `<code>`                                                           |
//!
//! Question options are JSON paragraph objects (see [`options`]). Missing
//! attributes read as empty strings; malformed option JSON reads as no
//! options and is logged at `warn`.

pub mod options;
pub mod parser;
pub mod serializer;

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::Document;

/// Format implementation for render tags
#[derive(Debug, Default)]
pub struct TagFormat;

impl Format for TagFormat {
    fn name(&self) -> &str {
        "tag"
    }

    fn description(&self) -> &str {
        "Render-tag markup for lesson documents"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "tag"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        Ok(parser::parse_from_tags(source))
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serializer::serialize_to_tags(doc)
    }
}
