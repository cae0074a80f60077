//! Defines the flat token stream produced by the grammar rules.

use crate::ir::nodes::Table;
use serde::Serialize;

/// A single token in the flat stream.
///
/// Containers are bracketed by `*Open` / `*Close` pairs; leaves carry their
/// payload directly. The tree builder turns the stream back into nested
/// [`Document`](crate::ir::nodes::Document) nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "token", rename_all = "snake_case")]
pub enum Token {
    ParagraphOpen,
    ParagraphClose,
    HeadingOpen {
        level: usize,
    },
    HeadingClose,
    ListOpen {
        ordered: bool,
    },
    ListClose,
    ListItemOpen,
    ListItemClose,
    BlockquoteOpen,
    BlockquoteClose,
    ThematicBreak,
    CodeBlock {
        language: Option<String>,
        content: String,
    },
    BlockEquation {
        formula: String,
    },
    Embed {
        text: String,
    },
    /// Opens a question. `correct` is already resolved to an index into `options`.
    QuestionOpen {
        options: Vec<String>,
        correct: Option<usize>,
    },
    QuestionClose,
    Table {
        table: Table,
    },
    Text {
        text: String,
    },
    StrongOpen,
    StrongClose,
    EmphasisOpen,
    EmphasisClose,
    Code {
        code: String,
    },
    InlineEquation {
        formula: String,
    },
    Vocabulary {
        term: String,
        definition: String,
    },
    ChemicalStructure {
        smiles: String,
        label: String,
    },
}

impl Token {
    pub fn text(text: impl Into<String>) -> Self {
        Token::Text { text: text.into() }
    }

    /// Short name used in error messages and token dumps.
    pub fn name(&self) -> &'static str {
        match self {
            Token::ParagraphOpen => "paragraph_open",
            Token::ParagraphClose => "paragraph_close",
            Token::HeadingOpen { .. } => "heading_open",
            Token::HeadingClose => "heading_close",
            Token::ListOpen { .. } => "list_open",
            Token::ListClose => "list_close",
            Token::ListItemOpen => "list_item_open",
            Token::ListItemClose => "list_item_close",
            Token::BlockquoteOpen => "blockquote_open",
            Token::BlockquoteClose => "blockquote_close",
            Token::ThematicBreak => "thematic_break",
            Token::CodeBlock { .. } => "code_block",
            Token::BlockEquation { .. } => "block_equation",
            Token::Embed { .. } => "embed",
            Token::QuestionOpen { .. } => "question_open",
            Token::QuestionClose => "question_close",
            Token::Table { .. } => "table",
            Token::Text { .. } => "text",
            Token::StrongOpen => "strong_open",
            Token::StrongClose => "strong_close",
            Token::EmphasisOpen => "emphasis_open",
            Token::EmphasisClose => "emphasis_close",
            Token::Code { .. } => "code",
            Token::InlineEquation { .. } => "inline_equation",
            Token::Vocabulary { .. } => "vocabulary",
            Token::ChemicalStructure { .. } => "chemical_structure",
        }
    }
}
