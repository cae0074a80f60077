use crate::common::{kitchensink, para, para_text, text};
use insta::assert_snapshot;
use lesson_babel::format::Format;
use lesson_babel::formats::tag::parser::parse_from_tags;
use lesson_babel::formats::tag::serializer::serialize_to_tags;
use lesson_babel::formats::TagFormat;
use lesson_babel::ir::nodes::*;

#[test]
fn test_kitchensink_survives_tags() {
    let tags = serialize_to_tags(&kitchensink()).unwrap();
    assert_eq!(parse_from_tags(&tags), kitchensink());
}

#[test]
fn test_paragraph_tags() {
    let doc = Document::new(vec![para(vec![
        text("Area "),
        Inline::InlineEquation(InlineEquation {
            formula: "r^2".to_string(),
        }),
        text(" is "),
        Inline::Emphasis(vec![text("square")]),
    ])]);
    assert_snapshot!(
        TagFormat.serialize(&doc).unwrap(),
        @r###"<p>Area <inline-equation data-formula="r^2"></inline-equation> is <em>square</em></p>"###
    );
}

#[test]
fn test_question_answer_survives_tags() {
    let mut question = Question {
        children: vec![para_text("Pick the gas")],
        ..Question::default()
    };
    question.set_options(vec![
        Paragraph::from_text("Iron"),
        Paragraph::from_text("Neon"),
    ]);
    question.set_correct_index(Some(1));
    let doc = Document::new(vec![Block::Question(question)]);

    let back = TagFormat.parse(&TagFormat.serialize(&doc).unwrap()).unwrap();
    let [Block::Question(question)] = back.children.as_slice() else {
        panic!("expected a question, got {:?}", back.children);
    };
    assert_eq!(question.correct_index(), Some(1));
    assert_eq!(back, doc);
}

#[test]
fn test_merged_cells_survive_tags() {
    let doc = Document::new(vec![Block::Table(Table {
        rows: vec![
            TableRow {
                cells: vec![TableCell {
                    colspan: 2,
                    rowspan: 1,
                    ..TableCell::header(vec![para_text("Both")])
                }],
            },
            TableRow {
                cells: vec![
                    TableCell::new(vec![para_text("a")]),
                    TableCell::new(vec![para_text("b")]),
                ],
            },
        ],
    })]);
    let tags = serialize_to_tags(&doc).unwrap();
    assert!(tags.contains(r#"<th colspan="2">"#));
    assert_eq!(parse_from_tags(&tags), doc);
}

#[test]
fn test_foreign_markup_keeps_text() {
    let doc = parse_from_tags("<p>see <a href=\"x\">this</a> and <b>that</b></p>");
    assert_eq!(
        doc.children,
        vec![para(vec![
            text("see this and "),
            Inline::Strong(vec![text("that")])
        ])]
    );
}
