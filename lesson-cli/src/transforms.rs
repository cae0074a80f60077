//! CLI-specific transforms
//!
//! The views `lesson inspect` can print for a markdown file. Each one shows
//! the document at a different stage:
//!
//! 1. **Tokenization** - source → flat token stream
//!    - `tokens-json`: the tokens the grammar rules emitted
//!
//! 2. **Tree building** - tokens → document tree
//!    - `tree-json`: the nested tree
//!    - `tags`: the tree as editor tag markup
//!    - `kinds`: how many nodes of each lesson construct the tree holds
//!
//! ## Extra Parameters
//!
//! - `pretty`: "false" prints compact JSON (JSON views only)
//!
//! Example: `lesson inspect lesson.md tree-json --extra-pretty false`

use lesson_babel::formats::markdown::parser::parse_from_markdown;
use lesson_babel::formats::tag::serializer::serialize_to_tags;
use lesson_babel::grammar::tokenize;
use lesson_babel::ir::nodes::{Block, Document, Inline};
use lesson_babel::{NodeKind, Schema};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// All available CLI transforms
pub const AVAILABLE_TRANSFORMS: &[&str] = &["tokens-json", "tree-json", "tags", "kinds"];

/// Execute a named transform on markdown source.
///
/// # Examples
///
/// ```ignore
/// let schema = Schema::standard();
/// let output = execute_transform("Speed $v$", "kinds", &schema, &HashMap::new())?;
/// assert_eq!(output, "inline_equation\t1\n");
/// ```
pub fn execute_transform(
    source: &str,
    transform_name: &str,
    schema: &Schema,
    extra_params: &HashMap<String, String>,
) -> Result<String, String> {
    let pretty = extra_params
        .get("pretty")
        .map_or(true, |value| value != "false");

    match transform_name {
        "tokens-json" => to_json(&tokenize(source, schema), pretty),
        "tree-json" => to_json(&parse(source, schema)?, pretty),
        "tags" => {
            let doc = parse(source, schema)?;
            serialize_to_tags(&doc)
                .map(|tags| format!("{tags}\n"))
                .map_err(|e| format!("Tag serialization failed: {e}"))
        }
        "kinds" => {
            let doc = parse(source, schema)?;
            Ok(count_kinds(&doc)
                .into_iter()
                .map(|(kind, count)| format!("{kind}\t{count}\n"))
                .collect())
        }
        _ => Err(format!(
            "Unknown transform '{transform_name}'. Use --list-transforms to see the options."
        )),
    }
}

fn parse(source: &str, schema: &Schema) -> Result<Document, String> {
    parse_from_markdown(source, schema).map_err(|e| format!("Transform failed: {e}"))
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    json.map(|json| format!("{json}\n"))
        .map_err(|e| format!("JSON serialization failed: {e}"))
}

/// Occurrences of each lesson construct, in kind order. Absent kinds are
/// left out.
pub fn count_kinds(doc: &Document) -> BTreeMap<NodeKind, usize> {
    let mut counts = BTreeMap::new();
    count_blocks(&doc.children, &mut counts);
    counts
}

fn bump(kind: NodeKind, counts: &mut BTreeMap<NodeKind, usize>) {
    *counts.entry(kind).or_insert(0) += 1;
}

fn count_blocks(blocks: &[Block], counts: &mut BTreeMap<NodeKind, usize>) {
    for block in blocks {
        match block {
            Block::Paragraph(p) => count_inlines(&p.content, counts),
            Block::Heading(h) => count_inlines(&h.content, counts),
            Block::List(list) => {
                for item in &list.items {
                    count_blocks(&item.children, counts);
                }
            }
            Block::Blockquote(quote) => count_blocks(&quote.children, counts),
            Block::ThematicBreak => {}
            Block::CodeBlock(_) => bump(NodeKind::CodeBlock, counts),
            Block::BlockEquation(_) => bump(NodeKind::BlockEquation, counts),
            Block::Embed(_) => bump(NodeKind::Embed, counts),
            Block::Question(question) => {
                bump(NodeKind::Question, counts);
                count_blocks(&question.children, counts);
            }
            Block::Table(table) => {
                bump(NodeKind::Table, counts);
                for row in &table.rows {
                    bump(NodeKind::TableRow, counts);
                    for cell in &row.cells {
                        bump(NodeKind::TableCell, counts);
                        count_blocks(&cell.content, counts);
                    }
                }
            }
        }
    }
}

fn count_inlines(content: &[Inline], counts: &mut BTreeMap<NodeKind, usize>) {
    for inline in content {
        let kind = match inline {
            Inline::Strong(children) | Inline::Emphasis(children) => {
                count_inlines(children, counts);
                continue;
            }
            Inline::Text(_) | Inline::Code(_) => continue,
            Inline::InlineEquation(_) => NodeKind::InlineEquation,
            Inline::Vocabulary(_) => NodeKind::Vocabulary,
            Inline::ChemicalStructure(_) => NodeKind::ChemicalStructure,
        };
        bump(kind, counts);
    }
}
