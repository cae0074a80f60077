//! The editor surface input rules work against.

use crate::ir::custom::Node;
use std::ops::Range;

/// Stands in for an inline atom in [`EditorHost::text_before_caret`].
pub const OBJECT_REPLACEMENT: char = '\u{FFFC}';

pub trait EditorHost {
    /// Text of the current textblock up to the caret. Inline atoms appear as
    /// [`OBJECT_REPLACEMENT`].
    fn text_before_caret(&self) -> String;

    fn selection_is_empty(&self) -> bool;

    /// The node that ends exactly at the caret, if any: an inline atom, or
    /// the previous block when the caret is at the start of an empty line.
    fn node_before_caret(&self) -> Option<Node>;

    /// Replace `range` of [`EditorHost::text_before_caret`] with an inline
    /// node and put the caret after it.
    fn replace_before_caret(&mut self, range: Range<usize>, node: Node);

    /// Replace the whole current textblock with a block node.
    fn replace_textblock(&mut self, node: Node);

    /// Replace the node before the caret with plain text, caret at its end.
    fn unwrap_node_before_caret(&mut self, text: &str);
}
