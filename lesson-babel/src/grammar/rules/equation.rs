//! Math: `$$formula$$` on its own line and `$formula$` inside text.

use crate::grammar::{
    BlockMatch, BlockRule, InlineCursor, InlineMatch, InlineRule, LineCursor, LineSource,
    ParseContext,
};
use crate::ir::tokens::Token;
use log::debug;

/// Single-line display equation. Runs ahead of the code fence rule.
pub struct BlockEquationRule;

impl BlockRule for BlockEquationRule {
    fn name(&self) -> &'static str {
        "block_equation"
    }

    fn apply(
        &self,
        src: &LineSource<'_>,
        at: LineCursor,
        silent: bool,
        _ctx: &ParseContext<'_>,
    ) -> Option<BlockMatch> {
        let formula = block_formula(src.line(at)?)?;
        if !silent {
            debug!("block equation at line {}", at.line + 1);
        }
        Some(BlockMatch::new(at.advance(1), silent, || {
            vec![Token::BlockEquation {
                formula: formula.to_string(),
            }]
        }))
    }
}

pub(crate) fn block_formula(line: &str) -> Option<&str> {
    let line = line.trim();
    if line.len() < 4 || !line.starts_with("$$") || !line.ends_with("$$") {
        return None;
    }
    Some(line[2..line.len() - 2].trim())
}

/// Inline equation. Neither delimiter may touch another `$`: the opening
/// `$` is not preceded or followed by one, the closing `$` (the next one) is
/// not followed by one. An escaped `\$` before the opening does not count.
pub struct InlineEquationRule;

impl InlineRule for InlineEquationRule {
    fn name(&self) -> &'static str {
        "inline_equation"
    }

    fn apply(
        &self,
        text: &str,
        at: InlineCursor,
        silent: bool,
        _ctx: &ParseContext<'_>,
    ) -> Option<InlineMatch> {
        let rest = text[at.pos..].strip_prefix('$')?;
        if rest.starts_with('$') || follows_dollar(text.as_bytes(), at.pos) {
            return None;
        }
        let end = rest.find('$')?;
        let formula = &rest[..end];
        if formula.is_empty() || rest.as_bytes().get(end + 1) == Some(&b'$') {
            return None;
        }
        Some(InlineMatch::new(at.advance(end + 2), silent, || {
            vec![Token::InlineEquation {
                formula: formula.to_string(),
            }]
        }))
    }
}

/// An unescaped `$` sits right before `pos`.
fn follows_dollar(bytes: &[u8], pos: usize) -> bool {
    if pos == 0 || bytes[pos - 1] != b'$' {
        return false;
    }
    let backslashes = bytes[..pos - 1]
        .iter()
        .rev()
        .take_while(|&&b| b == b'\\')
        .count();
    backslashes % 2 == 0
}
