//! Tag serialization (tree → render tags)
//!
//! Builds an RcDom node per block and serializes it with html5ever.

use super::options::{encode_correct_option, encode_options};
use crate::error::FormatError;
use crate::ir::nodes::*;
use html5ever::{
    ns, serialize, serialize::SerializeOpts, serialize::TraversalScope, Attribute, LocalName,
    QualName,
};
use markup5ever_rcdom::{Handle, Node, NodeData, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::default::Default;
use std::rc::Rc;

/// Serialize a document as a sequence of top-level elements, one per line.
pub fn serialize_to_tags(doc: &Document) -> Result<String, FormatError> {
    let mut parts = Vec::with_capacity(doc.children.len());
    for block in &doc.children {
        parts.push(serialize_node(&block_element(block)?)?);
    }
    Ok(parts.join("\n"))
}

/// Table markup as lines: `<table>`, one `<tr>` element per line, `</table>`.
/// Newlines inside a row are written as `&#10;` so each row stays on one line.
pub fn render_table_lines(table: &Table) -> Result<Vec<String>, FormatError> {
    let mut lines = Vec::with_capacity(table.rows.len() + 2);
    lines.push("<table>".to_string());
    for row in &table.rows {
        let markup = serialize_node(&row_element(row)?)?;
        lines.push(markup.replace('\r', "&#13;").replace('\n', "&#10;"));
    }
    lines.push("</table>".to_string());
    Ok(lines)
}

pub(crate) fn block_element(block: &Block) -> Result<Handle, FormatError> {
    let element = match block {
        Block::Paragraph(paragraph) => {
            let p = create_element("p", vec![]);
            append_inlines(&p, &paragraph.content);
            p
        }
        Block::Heading(heading) => {
            let tag = format!("h{}", heading.level.clamp(1, 6));
            let h = create_element(&tag, vec![]);
            append_inlines(&h, &heading.content);
            h
        }
        Block::List(list) => {
            let tag = if list.ordered { "ol" } else { "ul" };
            let element = create_element(tag, vec![]);
            for item in &list.items {
                let li = create_element("li", vec![]);
                append_blocks(&li, &item.children)?;
                append(&element, li);
            }
            element
        }
        Block::Blockquote(quote) => {
            let element = create_element("blockquote", vec![]);
            append_blocks(&element, &quote.children)?;
            element
        }
        Block::ThematicBreak => create_element("hr", vec![]),
        Block::CodeBlock(code) => {
            let class = code
                .language
                .as_deref()
                .filter(|l| !l.is_empty())
                .map(|l| format!("language-{l}"));
            let attrs = class.as_deref().map(|c| vec![("class", c)]).unwrap_or_default();
            let pre = create_element("pre", vec![]);
            let code_element = create_element("code", attrs);
            append(&code_element, create_text(&code.content));
            append(&pre, code_element);
            pre
        }
        Block::BlockEquation(eq) => {
            create_element("block-equation", vec![("data-formula", &eq.formula)])
        }
        Block::Embed(embed) => create_element("embed", vec![("text", &embed.text)]),
        Block::Question(question) => {
            let options = encode_options(&question.options)?;
            let correct = question
                .correct_option
                .as_ref()
                .map(encode_correct_option)
                .transpose()?;
            let mut attrs = vec![("data-question", ""), ("data-options", options.as_str())];
            if let Some(correct) = correct.as_deref() {
                attrs.push(("data-correct-option", correct));
            }
            let div = create_element("div", attrs);
            append_blocks(&div, &question.children)?;
            div
        }
        Block::Table(table) => {
            let element = create_element("table", vec![]);
            for row in &table.rows {
                append(&element, row_element(row)?);
            }
            element
        }
    };
    Ok(element)
}

fn row_element(row: &TableRow) -> Result<Handle, FormatError> {
    let tr = create_element("tr", vec![]);
    for cell in &row.cells {
        let colspan = cell.colspan.to_string();
        let rowspan = cell.rowspan.to_string();
        let mut attrs = vec![];
        if cell.colspan > 1 {
            attrs.push(("colspan", colspan.as_str()));
        }
        if cell.rowspan > 1 {
            attrs.push(("rowspan", rowspan.as_str()));
        }
        let element = create_element(if cell.header { "th" } else { "td" }, attrs);
        append_blocks(&element, &cell.content)?;
        append(&tr, element);
    }
    Ok(tr)
}

fn append_blocks(parent: &Handle, blocks: &[Block]) -> Result<(), FormatError> {
    for block in blocks {
        append(parent, block_element(block)?);
    }
    Ok(())
}

fn append_inlines(parent: &Handle, content: &[Inline]) {
    for inline in content {
        append(parent, inline_node(inline));
    }
}

fn inline_node(inline: &Inline) -> Handle {
    match inline {
        Inline::Text(text) => create_text(text),
        Inline::Strong(children) => {
            let strong = create_element("strong", vec![]);
            append_inlines(&strong, children);
            strong
        }
        Inline::Emphasis(children) => {
            let em = create_element("em", vec![]);
            append_inlines(&em, children);
            em
        }
        Inline::Code(code) => {
            let element = create_element("code", vec![]);
            append(&element, create_text(code));
            element
        }
        Inline::InlineEquation(eq) => {
            create_element("inline-equation", vec![("data-formula", &eq.formula)])
        }
        Inline::Vocabulary(vocab) => create_element(
            "span",
            vec![
                ("data-vocabulary-term", ""),
                ("data-term", &vocab.term),
                ("data-definition", &vocab.definition),
            ],
        ),
        Inline::ChemicalStructure(chem) => create_element(
            "span",
            vec![
                ("data-smiles", &chem.smiles),
                ("data-label", &chem.label),
                ("class", "smiles-node"),
            ],
        ),
    }
}

fn append(parent: &Handle, child: Handle) {
    parent.children.borrow_mut().push(child);
}

/// Create an element node with attributes
fn create_element(tag: &str, attrs: Vec<(&str, &str)>) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.to_string().into(),
        })
        .collect();

    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

/// Create a text node
fn create_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}

/// Serialize one element together with its subtree.
fn serialize_node(handle: &Handle) -> Result<String, FormatError> {
    let mut output = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };
    let serializable = SerializableHandle::from(handle.clone());
    serialize(&mut output, &serializable, opts)
        .map_err(|e| FormatError::SerializationError(format!("Tag serialization failed: {e}")))?;

    String::from_utf8(output)
        .map_err(|e| FormatError::SerializationError(format!("UTF-8 conversion failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(block: Block) -> String {
        serialize_node(&block_element(&block).unwrap()).unwrap()
    }

    #[test]
    fn test_block_equation_tag() {
        let html = tags(Block::BlockEquation(BlockEquation {
            formula: "x^2 + 1".to_string(),
        }));
        assert_eq!(
            html,
            r#"<block-equation data-formula="x^2 + 1"></block-equation>"#
        );
    }

    #[test]
    fn test_embed_is_void() {
        let html = tags(Block::Embed(Embed {
            text: "https://example.com".to_string(),
        }));
        assert_eq!(html, r#"<embed text="https://example.com">"#);
    }

    #[test]
    fn test_code_block_language_class() {
        let html = tags(Block::CodeBlock(CodeBlock {
            language: Some("python".to_string()),
            content: "print(1 < 2)".to_string(),
        }));
        assert_eq!(
            html,
            r#"<pre><code class="language-python">print(1 &lt; 2)</code></pre>"#
        );
    }

    #[test]
    fn test_inline_atoms() {
        let html = tags(Block::Paragraph(Paragraph::new(vec![
            Inline::Vocabulary(Vocabulary {
                term: "mole".to_string(),
                definition: "6.022e23 things".to_string(),
            }),
            Inline::ChemicalStructure(ChemicalStructure::new("CCO")),
        ])));
        assert_eq!(
            html,
            concat!(
                r#"<p><span data-vocabulary-term="" data-term="mole" data-definition="6.022e23 things"></span>"#,
                r#"<span data-smiles="CCO" data-label="CCO" class="smiles-node"></span></p>"#
            )
        );
    }

    #[test]
    fn test_question_attributes() {
        let html = tags(Block::Question(Question {
            options: vec![Paragraph::from_text("A")],
            correct_option: Some(Paragraph::from_text("A")),
            children: vec![],
        }));
        assert!(html.starts_with("<div data-question=\"\" data-options=\"[{&quot;type&quot;"));
        assert!(html.contains("data-correct-option="));
    }

    #[test]
    fn test_table_lines_escape_newlines() {
        let table = Table {
            rows: vec![TableRow {
                cells: vec![TableCell {
                    colspan: 2,
                    ..TableCell::new(vec![Block::Paragraph(Paragraph::from_text("a\nb"))])
                }],
            }],
        };
        assert_eq!(
            render_table_lines(&table).unwrap(),
            vec![
                "<table>".to_string(),
                r#"<tr><td colspan="2"><p>a&#10;b</p></td></tr>"#.to_string(),
                "</table>".to_string(),
            ]
        );
    }
}
