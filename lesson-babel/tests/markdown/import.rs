//! Import tests for the markdown format (lesson markdown → tree)

use crate::common::{kitchensink, para, para_text, text};
use lesson_babel::format::Format;
use lesson_babel::formats::markdown::MarkdownFormat;
use lesson_babel::ir::nodes::*;
use lesson_babel::{NodeKind, Schema};

fn parse(source: &str) -> Document {
    MarkdownFormat::default().parse(source).unwrap()
}

#[test]
fn test_kitchensink_import() {
    let md = MarkdownFormat::default().serialize(&kitchensink()).unwrap();
    assert_eq!(parse(&md), kitchensink());
}

#[test]
fn test_inline_atoms_in_prose() {
    let doc = parse("Speed $v = d/t$ of |ion: charged atom| in [[Na+]] water");
    assert_eq!(
        doc.children,
        vec![para(vec![
            text("Speed "),
            Inline::InlineEquation(InlineEquation {
                formula: "v = d/t".to_string()
            }),
            text(" of "),
            Inline::Vocabulary(Vocabulary {
                term: "ion".to_string(),
                definition: "charged atom".to_string()
            }),
            text(" in "),
            Inline::ChemicalStructure(ChemicalStructure::new("Na+")),
            text(" water"),
        ])]
    );
}

#[test]
fn test_block_constructs() {
    let doc = parse("$$ E = mc^2 $$\n\n{{ https://example.com/video }}\n\n```rust\nfn main() {}\n```");
    assert_eq!(
        doc.children,
        vec![
            Block::BlockEquation(BlockEquation {
                formula: "E = mc^2".to_string()
            }),
            Block::Embed(Embed {
                text: "https://example.com/video".to_string()
            }),
            Block::CodeBlock(CodeBlock {
                language: Some("rust".to_string()),
                content: "fn main() {}".to_string()
            }),
        ]
    );
}

#[test]
fn test_question_with_letter_answer() {
    let doc = parse("::?\nMitochondria | Ribosome | Nucleus\nA\nWhich organelle produces ATP?\n::?");
    let [Block::Question(question)] = doc.children.as_slice() else {
        panic!("expected one question, got {:?}", doc.children);
    };
    assert_eq!(question.options.len(), 3);
    assert_eq!(question.correct_index(), Some(0));
    assert_eq!(
        question.children,
        vec![para_text("Which organelle produces ATP?")]
    );
}

#[test]
fn test_question_with_legacy_answer_text() {
    let doc = parse("::?\nred | blue\nblue\nPick one\n::?");
    let [Block::Question(question)] = doc.children.as_slice() else {
        panic!("expected one question");
    };
    assert_eq!(question.correct_option, Some(Paragraph::from_text("blue")));
}

#[test]
fn test_unclosed_question_is_prose() {
    let doc = parse("::?\nA | B");
    assert!(doc
        .children
        .iter()
        .all(|block| matches!(block, Block::Paragraph(_))));
}

#[test]
fn test_table_markup() {
    let doc = parse("<table>\n<tr><th><p>H</p></th></tr>\n<tr><td rowspan=\"2\"><p>a</p></td></tr>\n</table>");
    let [Block::Table(table)] = doc.children.as_slice() else {
        panic!("expected one table");
    };
    assert!(table.rows[0].cells[0].header);
    assert_eq!(table.rows[1].cells[0].rowspan, 2);
}

#[test]
fn test_disabled_kinds_read_as_prose() {
    let schema = Schema::standard()
        .without(NodeKind::InlineEquation)
        .without(NodeKind::Embed);
    let doc = MarkdownFormat::new(schema)
        .parse("costs $5$\n\n{{x}}")
        .unwrap();
    assert_eq!(
        doc.children,
        vec![para_text("costs $5$"), para_text("{{x}}")]
    );
}

#[test]
fn test_escapes_keep_delimiters_literal() {
    let doc = parse(r"\$x\$ and \[\[C]] and \|a: b\|");
    assert_eq!(doc.children, vec![para_text("$x$ and [[C]] and |a: b|")]);
}

#[test]
fn test_nested_structure() {
    let doc = parse("> quoted **bold**\n\n- one\n- two\n\n---");
    assert_eq!(
        doc.children,
        vec![
            Block::Blockquote(Blockquote {
                children: vec![para(vec![
                    text("quoted "),
                    Inline::Strong(vec![text("bold")])
                ])]
            }),
            Block::List(List {
                ordered: false,
                items: vec![
                    ListItem {
                        children: vec![para_text("one")]
                    },
                    ListItem {
                        children: vec![para_text("two")]
                    },
                ]
            }),
            Block::ThematicBreak,
        ]
    );
}

#[test]
fn test_dollar_runs_are_prose() {
    for source in ["cost $$x$$ here", "a $b$$c d", "$$a$ b", "x $5$$"] {
        let doc = parse(source);
        assert_eq!(doc.children, vec![para_text(source)], "{source}");
        let md = MarkdownFormat::default().serialize(&doc).unwrap();
        assert_eq!(parse(&md), doc, "{md}");
    }
}

#[test]
fn test_escaped_dollar_before_equation() {
    let doc = parse(r"\$$x$");
    assert_eq!(
        doc.children,
        vec![para(vec![
            text("$"),
            Inline::InlineEquation(InlineEquation {
                formula: "x".to_string()
            }),
        ])]
    );
}

#[test]
fn test_adjacent_equations_read_back() {
    let equation = |formula: &str| {
        Inline::InlineEquation(InlineEquation {
            formula: formula.to_string(),
        })
    };
    let doc = Document::new(vec![para(vec![equation("a"), equation("b")])]);
    let md = MarkdownFormat::default().serialize(&doc).unwrap();
    assert_eq!(md, "$a$ $b$");
    assert_eq!(
        parse(&md).children,
        vec![para(vec![equation("a"), text(" "), equation("b")])]
    );
}
