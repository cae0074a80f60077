//! An in-memory [`EditorHost`]: committed blocks plus the line being typed,
//! with the caret always at the end.

use super::host::{EditorHost, OBJECT_REPLACEMENT};
use super::InputRules;
use crate::ir::custom::Node;
use crate::ir::nodes::{Block, Document, Inline, Paragraph};
use std::ops::Range;

#[derive(Debug, Clone)]
pub struct ScratchEditor {
    blocks: Vec<Block>,
    line: Vec<Inline>,
    selection_empty: bool,
}

impl ScratchEditor {
    pub fn new() -> Self {
        ScratchEditor {
            blocks: Vec::new(),
            line: Vec::new(),
            selection_empty: true,
        }
    }

    /// Type `text` one character at a time, running the input rules after
    /// each keystroke.
    pub fn type_text(&mut self, text: &str, rules: &InputRules) {
        for c in text.chars() {
            self.insert_char(c);
            rules.handle_text_input(self);
        }
    }

    /// Commit the current line as a paragraph and start a new one.
    pub fn enter(&mut self) {
        let line = std::mem::take(&mut self.line);
        self.blocks.push(Block::Paragraph(Paragraph::new(line)));
    }

    /// Backspace: unwrap an atom if the rules take it, otherwise delete the
    /// last character, atom or block.
    pub fn backspace(&mut self, rules: &InputRules) {
        if rules.handle_backspace(self) {
            return;
        }
        match self.line.last_mut() {
            Some(Inline::Text(text)) => {
                text.pop();
                if text.is_empty() {
                    self.line.pop();
                }
            }
            Some(_) => {
                self.line.pop();
            }
            None => {
                self.blocks.pop();
            }
        }
    }

    pub fn set_selection_empty(&mut self, empty: bool) {
        self.selection_empty = empty;
    }

    pub fn line(&self) -> &[Inline] {
        &self.line
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Committed blocks followed by the current line, if it has content.
    pub fn document(&self) -> Document {
        let mut children = self.blocks.clone();
        if !self.line.is_empty() {
            children.push(Block::Paragraph(Paragraph::new(self.line.clone())));
        }
        Document::new(children)
    }

    fn insert_char(&mut self, c: char) {
        match self.line.last_mut() {
            Some(Inline::Text(text)) => text.push(c),
            _ => self.line.push(Inline::Text(c.to_string())),
        }
    }

    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.line.last_mut() {
            Some(Inline::Text(last)) => last.push_str(text),
            _ => self.line.push(Inline::Text(text.to_string())),
        }
    }
}

impl Default for ScratchEditor {
    fn default() -> Self {
        Self::new()
    }
}

/// How an inline reads in the text before the caret.
fn caret_text(inline: &Inline, out: &mut String) {
    match inline {
        Inline::Text(text) | Inline::Code(text) => out.push_str(text),
        Inline::Strong(children) | Inline::Emphasis(children) => {
            children.iter().for_each(|child| caret_text(child, out))
        }
        Inline::InlineEquation(_) | Inline::Vocabulary(_) | Inline::ChemicalStructure(_) => {
            out.push(OBJECT_REPLACEMENT)
        }
    }
}

impl EditorHost for ScratchEditor {
    fn text_before_caret(&self) -> String {
        let mut out = String::new();
        self.line.iter().for_each(|inline| caret_text(inline, &mut out));
        out
    }

    fn selection_is_empty(&self) -> bool {
        self.selection_empty
    }

    fn node_before_caret(&self) -> Option<Node> {
        match self.line.last() {
            Some(Inline::Text(_)) => None,
            Some(inline) => Some(Node::Inline(inline.clone())),
            None => self.blocks.last().cloned().map(Node::Block),
        }
    }

    /// Keeps whole inlines before `range.start`, cutting a text run that
    /// straddles it, and drops everything after.
    fn replace_before_caret(&mut self, range: Range<usize>, node: Node) {
        let mut kept = Vec::new();
        let mut offset = 0;
        for inline in std::mem::take(&mut self.line) {
            let mut rendered = String::new();
            caret_text(&inline, &mut rendered);
            let end = offset + rendered.len();
            if end <= range.start {
                kept.push(inline);
            } else if let Inline::Text(text) = &inline {
                if let Some(head) = text.get(..range.start.saturating_sub(offset)) {
                    if !head.is_empty() {
                        kept.push(Inline::Text(head.to_string()));
                    }
                }
                break;
            } else {
                break;
            }
            offset = end;
        }
        self.line = kept;
        if let Node::Inline(inline) = node {
            self.line.push(inline);
        }
    }

    fn replace_textblock(&mut self, node: Node) {
        self.line.clear();
        if let Node::Block(block) = node {
            self.blocks.push(block);
        }
    }

    fn unwrap_node_before_caret(&mut self, text: &str) {
        if self.line.pop().is_none() {
            self.blocks.pop();
        }
        self.push_text(text);
    }
}
