//! Serializing, reading back and serializing again gives the same markdown.

use lesson_babel::ir::nodes::*;
use lesson_babel::transforms::{check_fixed_point, serialize_to_markdown};
use lesson_babel::{parse_markdown, to_markdown, NodeKind, Schema};
use proptest::prelude::*;

fn word() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,7}"
}

fn phrase() -> impl Strategy<Value = String> {
    prop::collection::vec(word(), 1..4).prop_map(|words| words.join(" "))
}

/// Prose made of delimiters and line-start markers, all of which the
/// serializer has to escape.
fn awkward_phrase() -> impl Strategy<Value = String> {
    let token = prop_oneof![
        2 => word(),
        1 => r"[a-z0-9#>+:{}<.\-\\`*_$|\[\]]{1,6}",
        1 => prop::sample::select(vec![
            "#", ">", "-", "+", ":", "::?", "{{", "<table>", "1.", "12.", "$$", "[[", "]]",
            "|", "\\", "---", "**", "_", "`",
        ])
        .prop_map(str::to_string),
    ];
    prop::collection::vec(token, 1..4).prop_map(|tokens| tokens.join(" "))
}

fn inline() -> impl Strategy<Value = Inline> {
    prop_oneof![
        2 => phrase().prop_map(Inline::Text),
        2 => awkward_phrase().prop_map(Inline::Text),
        1 => phrase().prop_map(|p| Inline::Strong(vec![Inline::Text(p)])),
        1 => phrase().prop_map(|p| Inline::Emphasis(vec![Inline::Text(p)])),
        1 => phrase().prop_map(Inline::Code),
        1 => phrase().prop_map(|formula| Inline::InlineEquation(InlineEquation { formula })),
        1 => (word(), phrase()).prop_map(|(term, definition)| {
            Inline::Vocabulary(Vocabulary { term, definition })
        }),
        1 => "[A-Z][A-Za-z0-9=#()]{0,8}"
            .prop_map(|smiles| Inline::ChemicalStructure(ChemicalStructure::new(smiles))),
    ]
}

/// Inlines separated by single spaces, so atoms never touch prose delimiters.
fn paragraph() -> impl Strategy<Value = Paragraph> {
    prop::collection::vec(inline(), 1..5).prop_map(|items| {
        let mut content = Vec::new();
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                content.push(Inline::Text(" ".to_string()));
            }
            content.push(item);
        }
        Paragraph::new(content)
    })
}

/// A rectangular table of plain cells, with an optional header row.
fn table() -> impl Strategy<Value = Block> {
    (1usize..4, 1usize..4, any::<bool>())
        .prop_flat_map(|(rows, cols, header)| {
            (
                prop::collection::vec(prop::collection::vec(phrase(), cols), rows),
                Just(header),
            )
        })
        .prop_map(|(rows, header)| {
            Block::Table(Table {
                rows: rows
                    .into_iter()
                    .enumerate()
                    .map(|(r, cells)| TableRow {
                        cells: cells
                            .into_iter()
                            .map(|t| {
                                let content = vec![Block::Paragraph(Paragraph::from_text(t))];
                                if header && r == 0 {
                                    TableCell::header(content)
                                } else {
                                    TableCell::new(content)
                                }
                            })
                            .collect(),
                    })
                    .collect(),
            })
        })
}

/// Quotes nested up to three deep.
fn quote() -> impl Strategy<Value = Block> {
    paragraph()
        .prop_map(|p| Block::Blockquote(Blockquote {
            children: vec![Block::Paragraph(p)],
        }))
        .prop_recursive(2, 6, 2, |inner| {
            (paragraph(), inner).prop_map(|(p, nested)| {
                Block::Blockquote(Blockquote {
                    children: vec![Block::Paragraph(p), nested],
                })
            })
        })
}

fn block() -> impl Strategy<Value = Block> {
    prop_oneof![
        1 => table(),
        1 => quote(),
        4 => paragraph().prop_map(Block::Paragraph),
        1 => (1usize..=6, phrase()).prop_map(|(level, t)| Block::Heading(Heading {
            level,
            content: vec![Inline::Text(t)],
        })),
        1 => phrase().prop_map(|formula| Block::BlockEquation(BlockEquation { formula })),
        1 => phrase().prop_map(|text| Block::Embed(Embed { text })),
        1 => (prop::option::of("[a-z]{1,6}"), prop::collection::vec(phrase(), 1..4)).prop_map(
            |(language, lines)| Block::CodeBlock(CodeBlock {
                language,
                content: lines.join("\n"),
            })
        ),
        1 => (
            prop::collection::vec(phrase(), 1..5),
            prop::option::of(0usize..5),
            prop::collection::vec(paragraph(), 0..3),
        )
            .prop_map(|(options, correct, body)| {
                let mut question = Question {
                    children: body.into_iter().map(Block::Paragraph).collect(),
                    ..Question::default()
                };
                question.set_options(options.into_iter().map(Paragraph::from_text).collect());
                question.set_correct_index(correct);
                Block::Question(question)
            }),
        1 => (any::<bool>(), prop::collection::vec(paragraph(), 1..4)).prop_map(
            |(ordered, items)| Block::List(List {
                ordered,
                items: items
                    .into_iter()
                    .map(|p| ListItem {
                        children: vec![Block::Paragraph(p)],
                    })
                    .collect(),
            })
        ),
    ]
}

fn document() -> impl Strategy<Value = Document> {
    prop::collection::vec(block(), 0..6).prop_map(Document::new)
}

proptest! {
    #[test]
    fn prop_serialized_markdown_is_a_fixed_point(doc in document()) {
        let schema = Schema::standard();
        let md = serialize_to_markdown(&doc, &schema).unwrap();
        let fixed = check_fixed_point(&md, &schema).unwrap();
        prop_assert_eq!(&fixed.normalized, &md);
        prop_assert!(fixed.is_stable());
    }

    #[test]
    fn prop_atoms_survive_round_trip(doc in document()) {
        let md = to_markdown(&doc).unwrap();
        let back = parse_markdown(&md).unwrap();
        prop_assert_eq!(count_atoms(&back.children), count_atoms(&doc.children));
    }
}

fn count_atoms(blocks: &[Block]) -> usize {
    fn inlines(content: &[Inline]) -> usize {
        content
            .iter()
            .map(|inline| match inline {
                Inline::InlineEquation(_) | Inline::Vocabulary(_) | Inline::ChemicalStructure(_) => 1,
                Inline::Strong(children) | Inline::Emphasis(children) => inlines(children),
                _ => 0,
            })
            .sum()
    }
    blocks
        .iter()
        .map(|block| match block {
            Block::Paragraph(p) => inlines(&p.content),
            Block::BlockEquation(_) | Block::Embed(_) => 1,
            Block::Question(q) => count_atoms(&q.children),
            Block::List(list) => list.items.iter().map(|item| count_atoms(&item.children)).sum(),
            Block::Blockquote(quote) => count_atoms(&quote.children),
            Block::Table(table) => table
                .rows
                .iter()
                .flat_map(|row| &row.cells)
                .map(|cell| count_atoms(&cell.content))
                .sum(),
            _ => 0,
        })
        .sum()
}

#[test]
fn test_non_normal_input_converges() {
    let fixed = check_fixed_point("* a\n* b\n\n\n\nplain   \n", &Schema::standard()).unwrap();
    assert_eq!(fixed.normalized, "- a\n- b\n\nplain");
    assert!(fixed.is_stable());
}

#[test]
fn test_disabled_kinds_serialize_to_a_fixed_point() {
    for kind in [NodeKind::Question, NodeKind::InlineEquation, NodeKind::Table, NodeKind::CodeBlock] {
        let schema = Schema::standard().without(kind);
        let md = serialize_to_markdown(&crate::common::kitchensink(), &schema).unwrap();
        let fixed = check_fixed_point(&md, &schema).unwrap();
        assert_eq!(fixed.normalized, md, "{kind:?}");
        assert!(fixed.is_stable(), "{kind:?}");
    }
}
