//! Markdown parsing (lesson markdown → tree)
//!
//! Two passes: the grammar turns source into a flat token stream, and the
//! tree builder nests it.

use crate::common::tree_builder::tokens_to_tree;
use crate::error::FormatError;
use crate::grammar;
use crate::ir::nodes::Document;
use crate::schema::Schema;

/// Parse lesson markdown with the constructs `schema` enables.
pub fn parse_from_markdown(source: &str, schema: &Schema) -> Result<Document, FormatError> {
    let tokens = grammar::tokenize(source, schema);
    Ok(tokens_to_tree(&tokens)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::custom::NodeKind;
    use crate::ir::nodes::{Block, Inline, InlineEquation, Paragraph};

    #[test]
    fn test_parse_paragraph_with_equation() {
        let doc = parse_from_markdown("Area is $\\pi r^2$.", &Schema::standard()).unwrap();
        assert_eq!(
            doc.children,
            vec![Block::Paragraph(Paragraph::new(vec![
                Inline::Text("Area is ".to_string()),
                Inline::InlineEquation(InlineEquation {
                    formula: "\\pi r^2".to_string()
                }),
                Inline::Text(".".to_string()),
            ]))]
        );
    }

    #[test]
    fn test_disabled_kind_reads_as_prose() {
        let schema = Schema::standard().without(NodeKind::Embed);
        let doc = parse_from_markdown("{{video}}", &schema).unwrap();
        assert_eq!(
            doc.children,
            vec![Block::Paragraph(Paragraph::from_text("{{video}}"))]
        );
    }

    #[test]
    fn test_empty_source() {
        let doc = parse_from_markdown("", &Schema::standard()).unwrap();
        assert!(doc.children.is_empty());
    }
}
