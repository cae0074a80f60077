//! Fixtures shared by the format tests.

use lesson_babel::ir::nodes::*;

pub fn text(value: &str) -> Inline {
    Inline::Text(value.to_string())
}

pub fn para(content: Vec<Inline>) -> Block {
    Block::Paragraph(Paragraph::new(content))
}

pub fn para_text(value: &str) -> Block {
    Block::Paragraph(Paragraph::from_text(value))
}

/// One of every lesson construct.
pub fn kitchensink() -> Document {
    Document::new(vec![
        Block::Heading(Heading {
            level: 1,
            content: vec![text("Stoichiometry")],
        }),
        para(vec![
            text("One "),
            Inline::Vocabulary(Vocabulary {
                term: "mole".to_string(),
                definition: "6.022e23 particles".to_string(),
            }),
            text(" of "),
            Inline::ChemicalStructure(ChemicalStructure::new("O=O")),
            text(" weighs "),
            Inline::InlineEquation(InlineEquation {
                formula: "32g".to_string(),
            }),
            text(", "),
            Inline::Strong(vec![text("always")]),
            text("."),
        ]),
        Block::BlockEquation(BlockEquation {
            formula: "n = m / M".to_string(),
        }),
        Block::CodeBlock(CodeBlock {
            language: Some("python".to_string()),
            content: "def moles(m, M):\n    return m / M".to_string(),
        }),
        Block::Embed(Embed {
            text: "https://example.com/titration".to_string(),
        }),
        Block::List(List {
            ordered: true,
            items: vec![
                ListItem {
                    children: vec![para_text("weigh")],
                },
                ListItem {
                    children: vec![para_text("divide")],
                },
            ],
        }),
        Block::Question(Question {
            options: vec![
                Paragraph::from_text("16"),
                Paragraph::from_text("32"),
                Paragraph::from_text("64"),
            ],
            correct_option: Some(Paragraph::from_text("32")),
            children: vec![para_text("Molar mass of oxygen gas?")],
        }),
        Block::Table(Table {
            rows: vec![
                TableRow {
                    cells: vec![
                        TableCell::header(vec![para_text("Element")]),
                        TableCell::header(vec![para_text("Symbol")]),
                    ],
                },
                TableRow {
                    cells: vec![
                        TableCell::new(vec![para_text("Sodium")]),
                        TableCell::new(vec![para_text("Na")]),
                    ],
                },
            ],
        }),
    ])
}
