//! Live-typing recognizers
//!
//! After each keystroke the text before the caret is matched against every
//! enabled [`InputRule`], in schema order. The first rule that matches turns
//! the typed delimiters into a node: inline rules replace the matched tail of
//! the line, textblock rules replace the whole line.
//!
//! Backspace directly after an atom undoes the conversion: the node is
//! replaced by the exact source text the markdown serializer would write for
//! it, so `$x$` typed, converted and backspaced reads `$x$` again.
//!
//! Recognizers never touch a document directly. They see it only through
//! [`EditorHost`]; [`ScratchEditor`] is a small in-memory host.

pub mod host;
pub mod rules;
pub mod scratch;

pub use host::{EditorHost, OBJECT_REPLACEMENT};
pub use scratch::ScratchEditor;

use crate::formats::markdown::serializer::{
    serialize_block_equation, serialize_chemical_structure, serialize_embed,
    serialize_inline_equation, serialize_vocabulary,
};
use crate::ir::custom::{Node, NodeKind};
use crate::ir::nodes::{Block, Inline};
use crate::schema::{Schema, SchemaOptions};
use log::debug;
use std::ops::Range;

/// What a match replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputScope {
    /// The matched byte range at the end of the text before the caret.
    Inline,
    /// The whole textblock the caret is in.
    Textblock,
}

/// A recognized construct and the text it replaces.
#[derive(Debug, Clone, PartialEq)]
pub struct InputMatch {
    pub range: Range<usize>,
    pub node: Node,
}

pub trait InputRule: Send + Sync {
    fn name(&self) -> &'static str;

    /// Kind of node the rule creates.
    fn kind(&self) -> NodeKind;

    fn scope(&self) -> InputScope;

    /// Match against the text before the caret. Inline atoms in that text
    /// appear as [`OBJECT_REPLACEMENT`].
    fn find(&self, before_caret: &str, options: &SchemaOptions) -> Option<InputMatch>;
}

/// The enabled input rules of one schema.
#[derive(Clone)]
pub struct InputRules {
    rules: Vec<&'static dyn InputRule>,
    options: SchemaOptions,
}

impl InputRules {
    pub fn new(schema: &Schema) -> Self {
        InputRules {
            rules: schema.input_rules(),
            options: schema.options().clone(),
        }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// First match against the text before the caret, without applying it.
    pub fn find(&self, before_caret: &str) -> Option<(&'static dyn InputRule, InputMatch)> {
        self.rules
            .iter()
            .find_map(|rule| rule.find(before_caret, &self.options).map(|m| (*rule, m)))
    }

    /// Run after text was inserted. Returns whether a rule fired.
    pub fn handle_text_input(&self, host: &mut dyn EditorHost) -> bool {
        let before = host.text_before_caret();
        let Some((rule, found)) = self.find(&before) else {
            return false;
        };
        debug!(
            "input rule {} matched {:?}",
            rule.name(),
            before.get(found.range.clone()).unwrap_or_default()
        );
        match rule.scope() {
            InputScope::Inline => host.replace_before_caret(found.range, found.node),
            InputScope::Textblock => host.replace_textblock(found.node),
        }
        true
    }

    /// Run on backspace. With an empty selection and an atom of an enabled
    /// kind right before the caret, the atom turns back into its source text.
    pub fn handle_backspace(&self, host: &mut dyn EditorHost) -> bool {
        if !host.selection_is_empty() {
            return false;
        }
        let Some(node) = host.node_before_caret() else {
            return false;
        };
        let Some(kind) = node.kind() else {
            return false;
        };
        if !self.rules.iter().any(|rule| rule.kind() == kind) {
            return false;
        }
        let Some(text) = unwrap_text(&node) else {
            return false;
        };
        debug!("unwrapping {kind} to {text:?}");
        host.unwrap_node_before_caret(&text);
        true
    }
}

impl std::fmt::Debug for InputRules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputRules")
            .field("rules", &self.names())
            .field("options", &self.options)
            .finish()
    }
}

/// Source text an atom unwraps to, identical to its markdown form.
pub fn unwrap_text(node: &Node) -> Option<String> {
    match node {
        Node::Inline(Inline::InlineEquation(eq)) => Some(serialize_inline_equation(eq)),
        Node::Inline(Inline::Vocabulary(vocab)) => Some(serialize_vocabulary(vocab)),
        Node::Inline(Inline::ChemicalStructure(chem)) => {
            Some(serialize_chemical_structure(chem))
        }
        Node::Block(Block::BlockEquation(eq)) => Some(serialize_block_equation(eq)),
        Node::Block(Block::Embed(embed)) => Some(serialize_embed(embed)),
        _ => None,
    }
}
