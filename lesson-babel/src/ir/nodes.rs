//! Core data structures for the lesson document tree.
//!
//! The tree is a closed set of typed variants. Generic prose blocks
//! (paragraphs, headings, lists, quotes) sit next to the custom lesson
//! constructs (equations, code blocks, embeds, questions, tables) so every
//! format works against the same shapes.

use serde::{Deserialize, Serialize};

/// Represents the root of a document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    pub children: Vec<Block>,
}

impl Document {
    pub fn new(children: Vec<Block>) -> Self {
        Document { children }
    }
}

/// A block-level node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Paragraph(Paragraph),
    Heading(Heading),
    List(List),
    Blockquote(Blockquote),
    ThematicBreak,
    CodeBlock(CodeBlock),
    BlockEquation(BlockEquation),
    Embed(Embed),
    Question(Question),
    Table(Table),
}

/// Represents a paragraph of text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Paragraph {
    pub content: Vec<Inline>,
}

impl Paragraph {
    pub fn new(content: Vec<Inline>) -> Self {
        Paragraph { content }
    }

    /// A paragraph holding a single text run. Empty text yields an empty paragraph.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            Paragraph { content: vec![] }
        } else {
            Paragraph {
                content: vec![Inline::Text(text)],
            }
        }
    }

    /// Concatenated text of every inline run, formatting dropped.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for inline in &self.content {
            inline.collect_text(&mut out);
        }
        out
    }
}

/// Represents a heading with a specific level (1-6).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    pub level: usize,
    pub content: Vec<Inline>,
}

/// Represents a list of items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List {
    pub ordered: bool,
    pub items: Vec<ListItem>,
}

/// Represents an item in a list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ListItem {
    pub children: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Blockquote {
    pub children: Vec<Block>,
}

/// A fenced code block. `language` is `None` when the fence carried no info string.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CodeBlock {
    pub language: Option<String>,
    pub content: String,
}

/// Display math occupying its own line.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BlockEquation {
    pub formula: String,
}

/// An embedded external resource (video, applet, ...) referenced by text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Embed {
    pub text: String,
}

/// A quiz question: answer options, the correct one, and the prompt body.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Question {
    pub options: Vec<Paragraph>,
    pub correct_option: Option<Paragraph>,
    pub children: Vec<Block>,
}

impl Question {
    /// Index of the first option structurally equal to the correct option.
    pub fn correct_index(&self) -> Option<usize> {
        let correct = self.correct_option.as_ref()?;
        self.options.iter().position(|option| option == correct)
    }

    /// Replace the option list. A correct option no longer present is kept
    /// as-is and simply stops resolving.
    pub fn set_options(&mut self, options: Vec<Paragraph>) {
        self.options = options;
    }

    /// Mark the option at `index` as correct; out of range clears the mark.
    pub fn set_correct_index(&mut self, index: Option<usize>) {
        self.correct_option = index.and_then(|i| self.options.get(i).cloned());
    }
}

/// A table: rows of cells, each cell holding block content.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Table {
    pub rows: Vec<TableRow>,
}

/// Represents a table row.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

/// Represents a table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    pub header: bool,
    pub colspan: usize,
    pub rowspan: usize,
    pub content: Vec<Block>,
}

impl TableCell {
    pub fn new(content: Vec<Block>) -> Self {
        TableCell {
            header: false,
            colspan: 1,
            rowspan: 1,
            content,
        }
    }

    pub fn header(content: Vec<Block>) -> Self {
        TableCell {
            header: true,
            ..TableCell::new(content)
        }
    }
}

impl Default for TableCell {
    fn default() -> Self {
        TableCell::new(vec![])
    }
}

/// Represents inline content, such as text, bold, italics, etc.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Inline {
    Text(String),
    Strong(Vec<Inline>),
    Emphasis(Vec<Inline>),
    Code(String),
    InlineEquation(InlineEquation),
    Vocabulary(Vocabulary),
    ChemicalStructure(ChemicalStructure),
}

impl Inline {
    fn collect_text(&self, out: &mut String) {
        match self {
            Inline::Text(text) | Inline::Code(text) => out.push_str(text),
            Inline::Strong(children) | Inline::Emphasis(children) => {
                for child in children {
                    child.collect_text(out);
                }
            }
            Inline::InlineEquation(eq) => out.push_str(&eq.formula),
            Inline::Vocabulary(vocab) => out.push_str(&vocab.term),
            Inline::ChemicalStructure(chem) => out.push_str(&chem.label),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InlineEquation {
    pub formula: String,
}

/// A glossary term with its definition, rendered inline.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Vocabulary {
    pub term: String,
    pub definition: String,
}

/// A SMILES chemical-structure annotation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChemicalStructure {
    pub smiles: String,
    pub label: String,
}

impl ChemicalStructure {
    pub fn new(smiles: impl Into<String>) -> Self {
        let smiles = smiles.into();
        ChemicalStructure {
            label: smiles.clone(),
            smiles,
        }
    }

    /// Update the structure; the label falls back to the SMILES string.
    pub fn set_smiles(&mut self, smiles: impl Into<String>, label: Option<String>) {
        self.smiles = smiles.into();
        self.label = label
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| self.smiles.clone());
    }
}
