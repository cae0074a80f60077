//! Tag parsing (render tags → tree)
//!
//! Markup is parsed with html5ever into an RcDom and walked from `<body>`.
//! Loose inline content at block level is gathered into paragraphs, and
//! whitespace between block elements is ignored. Unknown elements are
//! transparent: their children are read in place.

use super::options::{decode_correct_option, decode_options};
use crate::ir::nodes::*;
use crate::table::{MAX_COLSPAN, MAX_ROWSPAN};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use std::default::Default;

/// Parse tag markup into a document.
pub fn parse_from_tags(source: &str) -> Document {
    Document::new(parse_fragment(source))
}

/// Parse tag markup into the blocks it holds.
pub fn parse_fragment(markup: &str) -> Vec<Block> {
    let wrapped = format!("<!DOCTYPE html><html><head></head><body>{markup}</body></html>");
    let dom = parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .one(wrapped.as_bytes());
    match find_element(&dom.document, "body") {
        Some(body) => read_blocks(&body),
        None => vec![],
    }
}

fn find_element(handle: &Handle, name: &str) -> Option<Handle> {
    if element_name(handle).as_deref() == Some(name) {
        return Some(handle.clone());
    }
    handle
        .children
        .borrow()
        .iter()
        .find_map(|child| find_element(child, name))
}

fn element_name(handle: &Handle) -> Option<String> {
    match handle.data {
        NodeData::Element { ref name, .. } => Some(name.local.to_string()),
        _ => None,
    }
}

fn attr(handle: &Handle, key: &str) -> Option<String> {
    match handle.data {
        NodeData::Element { ref attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|a| a.name.local.as_ref() == key)
            .map(|a| a.value.to_string()),
        _ => None,
    }
}

fn attr_or_empty(handle: &Handle, key: &str) -> String {
    attr(handle, key).unwrap_or_default()
}

fn text_content(handle: &Handle) -> String {
    let mut out = String::new();
    collect_text(handle, &mut out);
    out
}

fn collect_text(handle: &Handle, out: &mut String) {
    if let NodeData::Text { ref contents } = handle.data {
        out.push_str(&contents.borrow());
    }
    for child in handle.children.borrow().iter() {
        collect_text(child, out);
    }
}

fn read_blocks(parent: &Handle) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut loose: Vec<Inline> = Vec::new();
    for child in parent.children.borrow().iter() {
        match read_block(child) {
            BlockOrInline::Blocks(found) => {
                flush_loose(&mut loose, &mut blocks);
                blocks.extend(found);
            }
            BlockOrInline::Inline(inline) => push_inline(&mut loose, inline),
            BlockOrInline::Skip => {}
        }
    }
    flush_loose(&mut loose, &mut blocks);
    blocks
}

fn flush_loose(loose: &mut Vec<Inline>, blocks: &mut Vec<Block>) {
    let content = std::mem::take(loose);
    let blank = content
        .iter()
        .all(|inline| matches!(inline, Inline::Text(text) if text.trim().is_empty()));
    if !blank {
        blocks.push(Block::Paragraph(Paragraph::new(content)));
    }
}

enum BlockOrInline {
    Blocks(Vec<Block>),
    Inline(Inline),
    Skip,
}

fn read_block(handle: &Handle) -> BlockOrInline {
    let name = match handle.data {
        NodeData::Element { ref name, .. } => name.local.to_string(),
        NodeData::Text { ref contents } => {
            return BlockOrInline::Inline(Inline::Text(contents.borrow().to_string()))
        }
        _ => return BlockOrInline::Skip,
    };
    let block = match name.as_str() {
        "p" => Block::Paragraph(Paragraph::new(read_inlines(handle))),
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => Block::Heading(Heading {
            level: name[1..].parse().unwrap_or(1),
            content: read_inlines(handle),
        }),
        "ul" | "ol" => Block::List(List {
            ordered: name == "ol",
            items: handle
                .children
                .borrow()
                .iter()
                .filter(|child| element_name(child).as_deref() == Some("li"))
                .map(|li| ListItem {
                    children: read_blocks(li),
                })
                .collect(),
        }),
        "blockquote" => Block::Blockquote(Blockquote {
            children: read_blocks(handle),
        }),
        "hr" => Block::ThematicBreak,
        "pre" => Block::CodeBlock(read_code_block(handle)),
        "block-equation" => Block::BlockEquation(BlockEquation {
            formula: attr_or_empty(handle, "data-formula"),
        }),
        "embed" => Block::Embed(Embed {
            text: attr_or_empty(handle, "text"),
        }),
        "div" if attr(handle, "data-question").is_some() => Block::Question(Question {
            options: decode_options(attr(handle, "data-options").as_deref()),
            correct_option: decode_correct_option(
                attr(handle, "data-correct-option").as_deref(),
            ),
            children: read_blocks(handle),
        }),
        "table" => Block::Table(read_table(handle)),
        "div" | "section" | "article" | "main" | "body" => {
            return BlockOrInline::Blocks(read_blocks(handle))
        }
        _ => return BlockOrInline::Inline(read_inline_element(handle, &name)),
    };
    BlockOrInline::Blocks(vec![block])
}

fn read_code_block(pre: &Handle) -> CodeBlock {
    let code = pre
        .children
        .borrow()
        .iter()
        .find(|child| element_name(child).as_deref() == Some("code"))
        .cloned();
    let language = code
        .as_ref()
        .and_then(|code| attr(code, "class"))
        .and_then(|class| {
            class
                .split_whitespace()
                .find_map(|c| c.strip_prefix("language-").map(str::to_string))
        })
        .filter(|language| !language.is_empty());
    let content = text_content(code.as_ref().unwrap_or(pre));
    CodeBlock { language, content }
}

fn read_table(table: &Handle) -> Table {
    let mut rows = Vec::new();
    for child in table.children.borrow().iter() {
        match element_name(child).as_deref() {
            Some("tr") => rows.push(read_row(child)),
            Some("thead" | "tbody" | "tfoot") => {
                for tr in child.children.borrow().iter() {
                    if element_name(tr).as_deref() == Some("tr") {
                        rows.push(read_row(tr));
                    }
                }
            }
            _ => {}
        }
    }
    Table { rows }
}

fn read_row(tr: &Handle) -> TableRow {
    let cells = tr
        .children
        .borrow()
        .iter()
        .filter_map(|cell| {
            let header = match element_name(cell).as_deref() {
                Some("th") => true,
                Some("td") => false,
                _ => return None,
            };
            Some(TableCell {
                header,
                colspan: span(cell, "colspan", MAX_COLSPAN),
                rowspan: span(cell, "rowspan", MAX_ROWSPAN),
                content: read_blocks(cell),
            })
        })
        .collect();
    TableRow { cells }
}

/// A missing, unreadable or zero span is 1. Overlong digit strings count as
/// the cap.
fn span(cell: &Handle, key: &str, max: usize) -> usize {
    let Some(value) = attr(cell, key) else {
        return 1;
    };
    let value = value.trim();
    match value.parse::<usize>() {
        Ok(0) => 1,
        Ok(n) => n.min(max),
        Err(_) if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) => max,
        Err(_) => 1,
    }
}

fn read_inlines(parent: &Handle) -> Vec<Inline> {
    let mut content = Vec::new();
    for child in parent.children.borrow().iter() {
        match child.data {
            NodeData::Text { ref contents } => {
                push_inline(&mut content, Inline::Text(contents.borrow().to_string()))
            }
            NodeData::Element { ref name, .. } => {
                let name = name.local.to_string();
                push_inline(&mut content, read_inline_element(child, &name));
            }
            _ => {}
        }
    }
    content
}

fn read_inline_element(handle: &Handle, name: &str) -> Inline {
    match name {
        "strong" | "b" => Inline::Strong(read_inlines(handle)),
        "em" | "i" => Inline::Emphasis(read_inlines(handle)),
        "code" => Inline::Code(text_content(handle)),
        "br" => Inline::Text("\n".to_string()),
        "inline-equation" => Inline::InlineEquation(InlineEquation {
            formula: attr_or_empty(handle, "data-formula"),
        }),
        "span" if attr(handle, "data-vocabulary-term").is_some() => {
            Inline::Vocabulary(Vocabulary {
                term: attr_or_empty(handle, "data-term"),
                definition: attr_or_empty(handle, "data-definition"),
            })
        }
        "span" if attr(handle, "data-smiles").is_some() => {
            Inline::ChemicalStructure(ChemicalStructure {
                smiles: attr_or_empty(handle, "data-smiles"),
                label: attr_or_empty(handle, "data-label"),
            })
        }
        _ => Inline::Text(text_content(handle)),
    }
}

/// Adjacent text runs are merged and empty ones dropped.
fn push_inline(content: &mut Vec<Inline>, inline: Inline) {
    match inline {
        Inline::Text(text) if text.is_empty() => {}
        Inline::Text(text) => match content.last_mut() {
            Some(Inline::Text(last)) => last.push_str(&text),
            _ => content.push(Inline::Text(text)),
        },
        other => content.push(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_blocks() {
        let blocks = parse_fragment(
            r#"<block-equation data-formula="E=mc^2"></block-equation><embed text="https://example.com/v">"#,
        );
        assert_eq!(
            blocks,
            vec![
                Block::BlockEquation(BlockEquation {
                    formula: "E=mc^2".to_string()
                }),
                Block::Embed(Embed {
                    text: "https://example.com/v".to_string()
                }),
            ]
        );
    }

    #[test]
    fn test_missing_attributes_default_to_empty() {
        let blocks = parse_fragment("<p><inline-equation></inline-equation><span data-smiles></span></p>");
        assert_eq!(
            blocks,
            vec![Block::Paragraph(Paragraph::new(vec![
                Inline::InlineEquation(InlineEquation {
                    formula: String::new()
                }),
                Inline::ChemicalStructure(ChemicalStructure {
                    smiles: String::new(),
                    label: String::new()
                }),
            ]))]
        );
    }

    #[test]
    fn test_question_with_invalid_options() {
        let blocks =
            parse_fragment(r#"<div data-question data-options="nope"><p>Why?</p></div>"#);
        assert_eq!(
            blocks,
            vec![Block::Question(Question {
                options: vec![],
                correct_option: None,
                children: vec![Block::Paragraph(Paragraph::from_text("Why?"))],
            })]
        );
    }

    #[test]
    fn test_code_block_language() {
        let blocks = parse_fragment(r#"<pre><code class="language-rust">fn main() {}</code></pre>"#);
        assert_eq!(
            blocks,
            vec![Block::CodeBlock(CodeBlock {
                language: Some("rust".to_string()),
                content: "fn main() {}".to_string(),
            })]
        );
    }

    #[test]
    fn test_table_through_tbody() {
        let blocks = parse_fragment(
            "<table>\n<tr><th>H</th><td rowspan=\"2\"><p>x</p></td></tr>\n</table>",
        );
        let [Block::Table(table)] = blocks.as_slice() else {
            panic!("expected one table, got {blocks:?}");
        };
        let cells = &table.rows[0].cells;
        assert_eq!(cells.len(), 2);
        assert!(cells[0].header);
        assert_eq!(
            cells[0].content,
            vec![Block::Paragraph(Paragraph::from_text("H"))]
        );
        assert_eq!(cells[1].rowspan, 2);
    }

    #[test]
    fn test_spans_are_clamped() {
        let blocks = parse_fragment(concat!(
            "<table><tr>",
            "<td colspan=\"18446744073709551615\">a</td>",
            "<td colspan=\"99999999999999999999999\" rowspan=\"70000\">b</td>",
            "<td colspan=\"0\" rowspan=\"-3\">c</td>",
            "</tr></table>",
        ));
        let [Block::Table(table)] = blocks.as_slice() else {
            panic!("expected one table, got {blocks:?}");
        };
        let spans: Vec<(usize, usize)> = table.rows[0]
            .cells
            .iter()
            .map(|c| (c.colspan, c.rowspan))
            .collect();
        assert_eq!(
            spans,
            vec![(MAX_COLSPAN, 1), (MAX_COLSPAN, MAX_ROWSPAN), (1, 1)]
        );
    }

    #[test]
    fn test_loose_inlines_become_paragraph() {
        let blocks = parse_fragment("  text <strong>bold</strong>\n<hr>\n ");
        assert_eq!(
            blocks,
            vec![
                Block::Paragraph(Paragraph::new(vec![
                    Inline::Text("  text ".to_string()),
                    Inline::Strong(vec![Inline::Text("bold".to_string())]),
                    Inline::Text("\n".to_string()),
                ])),
                Block::ThematicBreak,
            ]
        );
    }

    #[test]
    fn test_newline_reference_in_text() {
        let blocks = parse_fragment("<p>a&#10;b</p>");
        assert_eq!(blocks, vec![Block::Paragraph(Paragraph::from_text("a\nb"))]);
    }
}
