//! Token grammar: block and inline rules over an immutable cursor.
//!
//! # The Contract
//!
//! A rule is handed the source, a cursor value and a `silent` flag. It either
//! declines (`None`) or returns a match carrying the cursor to resume from
//! and, unless silent, the tokens it recognized. Rules never mutate shared
//! state: a silent probe followed by a real run at the same cursor consumes
//! exactly the same input.
//!
//! Block rules work on whole lines and must move the line cursor strictly
//! forward; the block loop discards a non-advancing match so parsing always
//! terminates. Inline rules work on byte offsets inside one block's text.
//!
//! # Precedence
//!
//! Rules are tried in the order the [`Schema`] lists them and the first
//! match at a position wins. A rule that declines is not retried at that
//! position. Container rules (questions, lists, quotes) recurse through the
//! [`ParseContext`], so nested content goes through the same rule set.

pub mod block;
pub mod inline;
pub mod rules;

use crate::ir::tokens::Token;
use crate::schema::Schema;

/// Nesting depth past which container rules stop recursing.
const MAX_DEPTH: usize = 48;

/// Source lines of one block-level parse.
#[derive(Debug, Clone)]
pub struct LineSource<'a> {
    lines: Vec<&'a str>,
}

impl<'a> LineSource<'a> {
    pub fn new(text: &'a str) -> Self {
        let lines = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect();
        LineSource { lines }
    }

    pub fn from_lines(lines: Vec<&'a str>) -> Self {
        LineSource { lines }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.lines.get(index).copied()
    }

    pub fn line(&self, at: LineCursor) -> Option<&'a str> {
        self.get(at.line)
    }

    pub fn is_blank(&self, index: usize) -> bool {
        self.get(index).is_some_and(|line| line.trim().is_empty())
    }

    /// Lines from `start` up to (not including) `end`.
    pub fn slice(&self, start: usize, end: usize) -> &[&'a str] {
        let end = end.min(self.lines.len());
        &self.lines[start.min(end)..end]
    }
}

/// Position of a block rule: the index of the next unread line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct LineCursor {
    pub line: usize,
}

impl LineCursor {
    pub fn at(line: usize) -> Self {
        LineCursor { line }
    }

    pub fn advance(self, lines: usize) -> Self {
        LineCursor {
            line: self.line + lines,
        }
    }
}

/// Outcome of a successful block rule.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockMatch {
    pub next: LineCursor,
    pub tokens: Vec<Token>,
}

impl BlockMatch {
    /// Build a match, dropping the tokens when the rule ran silently.
    pub fn new(next: LineCursor, silent: bool, tokens: impl FnOnce() -> Vec<Token>) -> Self {
        BlockMatch {
            next,
            tokens: if silent { Vec::new() } else { tokens() },
        }
    }
}

/// Byte offset of an inline rule inside the block text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct InlineCursor {
    pub pos: usize,
}

impl InlineCursor {
    pub fn at(pos: usize) -> Self {
        InlineCursor { pos }
    }

    pub fn advance(self, bytes: usize) -> Self {
        InlineCursor {
            pos: self.pos + bytes,
        }
    }
}

/// Outcome of a successful inline rule.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineMatch {
    pub next: InlineCursor,
    pub tokens: Vec<Token>,
}

impl InlineMatch {
    pub fn new(next: InlineCursor, silent: bool, tokens: impl FnOnce() -> Vec<Token>) -> Self {
        InlineMatch {
            next,
            tokens: if silent { Vec::new() } else { tokens() },
        }
    }
}

/// A block-level recognizer.
pub trait BlockRule: Send + Sync {
    fn name(&self) -> &'static str;

    fn apply(
        &self,
        src: &LineSource<'_>,
        at: LineCursor,
        silent: bool,
        ctx: &ParseContext<'_>,
    ) -> Option<BlockMatch>;
}

/// An inline recognizer.
pub trait InlineRule: Send + Sync {
    fn name(&self) -> &'static str;

    fn apply(
        &self,
        text: &str,
        at: InlineCursor,
        silent: bool,
        ctx: &ParseContext<'_>,
    ) -> Option<InlineMatch>;
}

/// Shared state of one parse: the rule set and the current nesting depth.
#[derive(Debug, Clone, Copy)]
pub struct ParseContext<'s> {
    schema: &'s Schema,
    depth: usize,
}

impl<'s> ParseContext<'s> {
    pub fn new(schema: &'s Schema) -> Self {
        ParseContext { schema, depth: 0 }
    }

    pub fn schema(&self) -> &'s Schema {
        self.schema
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    fn nested(&self) -> ParseContext<'s> {
        ParseContext {
            schema: self.schema,
            depth: self.depth + 1,
        }
    }

    pub(crate) fn too_deep(&self) -> bool {
        self.depth >= MAX_DEPTH
    }

    /// Tokenize a whole text at block level.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        block::tokenize(&LineSource::new(text), self)
    }

    /// Tokenize the lines of a container body one level deeper.
    pub fn tokenize_lines(&self, lines: &[&str]) -> Vec<Token> {
        block::tokenize(&LineSource::from_lines(lines.to_vec()), &self.nested())
    }

    /// Tokenize the text of a single block at inline level.
    pub fn tokenize_inline(&self, text: &str) -> Vec<Token> {
        inline::tokenize(text, self)
    }

    /// Tokenize inline content from `start` until `terminator` closes it.
    /// Returns the inner tokens and the cursor just past the terminator, or
    /// `None` if the text ends first.
    pub fn tokenize_inline_until(
        &self,
        text: &str,
        start: InlineCursor,
        terminator: &str,
    ) -> Option<(Vec<Token>, InlineCursor)> {
        if self.too_deep() {
            return None;
        }
        inline::run(text, start, Some(terminator), &self.nested())
    }

    /// Whether any block rule other than `except` claims the line at `at`.
    pub fn claims_line(&self, src: &LineSource<'_>, at: LineCursor, except: &str) -> bool {
        block::rules_for(self)
            .iter()
            .filter(|rule| rule.name() != except)
            .any(|rule| {
                rule.apply(src, at, true, self)
                    .is_some_and(|found| found.next > at)
            })
    }
}

/// Tokenize `text` with the rules of `schema`.
pub fn tokenize(text: &str, schema: &Schema) -> Vec<Token> {
    ParseContext::new(schema).tokenize(text)
}
