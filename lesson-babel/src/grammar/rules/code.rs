//! Fenced code blocks.

use crate::grammar::{BlockMatch, BlockRule, LineCursor, LineSource, ParseContext};
use crate::ir::tokens::Token;

/// Opening fence of three or more backticks plus an optional language. The
/// block closes at the next line made only of at least as many backticks.
/// Without a closing fence the rule declines.
pub struct CodeFenceRule;

impl BlockRule for CodeFenceRule {
    fn name(&self) -> &'static str {
        "code_fence"
    }

    fn apply(
        &self,
        src: &LineSource<'_>,
        at: LineCursor,
        silent: bool,
        _ctx: &ParseContext<'_>,
    ) -> Option<BlockMatch> {
        let (fence, info) = opening_fence(src.line(at)?)?;
        let close = (at.line + 1..src.len()).find(|&i| {
            src.get(i)
                .and_then(backtick_line)
                .is_some_and(|run| run >= fence)
        })?;
        let body = src.slice(at.line + 1, close);
        Some(BlockMatch::new(LineCursor::at(close + 1), silent, || {
            vec![Token::CodeBlock {
                language: (!info.is_empty()).then(|| info.to_string()),
                content: body.join("\n"),
            }]
        }))
    }
}

fn opening_fence(line: &str) -> Option<(usize, &str)> {
    let line = line.trim();
    let fence = line.bytes().take_while(|b| *b == b'`').count();
    if fence < 3 {
        return None;
    }
    let info = line[fence..].trim();
    if info.contains('`') {
        return None;
    }
    Some((fence, info))
}

/// Length of a line made only of backticks, ignoring surrounding whitespace.
pub(crate) fn backtick_line(line: &str) -> Option<usize> {
    let line = line.trim();
    (line.len() >= 3 && line.bytes().all(|b| b == b'`')).then_some(line.len())
}
