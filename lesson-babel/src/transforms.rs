//! Whole-document pipelines built from the markdown parser and serializer.
//!
//! These back the CLI's `check` command and the round-trip tests: a source
//! is normalized by reading and rewriting it, and a normalized source must
//! survive a second pass unchanged.

use crate::error::FormatError;
use crate::formats::markdown::parser::parse_from_markdown;
use crate::formats::markdown::serializer::MarkdownSerializer;
use crate::ir::nodes::Document;
use crate::schema::Schema;

/// Outcome of reading and rewriting a source twice.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedPoint {
    /// `serialize(parse(source))`
    pub normalized: String,
    /// `serialize(parse(normalized))`
    pub second_pass: String,
}

impl FixedPoint {
    pub fn is_stable(&self) -> bool {
        self.normalized == self.second_pass
    }

    /// First differing line of the two passes, 1-based, with both versions.
    pub fn first_drift(&self) -> Option<(usize, &str, &str)> {
        let mut first = self.normalized.lines();
        let mut second = self.second_pass.lines();
        let mut line = 1;
        loop {
            match (first.next(), second.next()) {
                (None, None) => return None,
                (a, b) if a != b => return Some((line, a.unwrap_or(""), b.unwrap_or(""))),
                _ => line += 1,
            }
        }
    }
}

pub fn serialize_to_markdown(doc: &Document, schema: &Schema) -> Result<String, FormatError> {
    MarkdownSerializer::for_schema(schema).serialize(doc)
}

/// `serialize(parse(source))`
pub fn normalize_markdown(source: &str, schema: &Schema) -> Result<String, FormatError> {
    let doc = parse_from_markdown(source, schema)?;
    serialize_to_markdown(&doc, schema)
}

pub fn check_fixed_point(source: &str, schema: &Schema) -> Result<FixedPoint, FormatError> {
    let normalized = normalize_markdown(source, schema)?;
    let second_pass = normalize_markdown(&normalized, schema)?;
    Ok(FixedPoint {
        normalized,
        second_pass,
    })
}
