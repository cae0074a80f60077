//! The block loop: walks lines and hands each position to the block rules.

use super::rules::PARAGRAPH;
use super::{BlockMatch, BlockRule, LineCursor, LineSource, ParseContext};
use crate::ir::tokens::Token;
use log::warn;

/// Rule set used once nesting is too deep to keep recursing.
static FLAT_RULES: [&dyn BlockRule; 1] = [&PARAGRAPH];

pub(crate) fn rules_for<'s>(ctx: &ParseContext<'s>) -> &'s [&'static dyn BlockRule] {
    if ctx.too_deep() {
        &FLAT_RULES
    } else {
        ctx.schema().block_rules()
    }
}

/// Tokenize every line of `src`. Blank lines between blocks are skipped.
pub fn tokenize(src: &LineSource<'_>, ctx: &ParseContext<'_>) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut at = LineCursor::default();

    while at.line < src.len() {
        if src.is_blank(at.line) {
            at = at.advance(1);
            continue;
        }

        match first_match(src, at, ctx) {
            Some(found) => {
                tokens.extend(found.tokens);
                at = found.next;
            }
            None => {
                // Only reachable with a schema that dropped the paragraph rule.
                let line = src.line(at).unwrap_or_default();
                tokens.push(Token::ParagraphOpen);
                tokens.extend(ctx.tokenize_inline(line.trim()));
                tokens.push(Token::ParagraphClose);
                at = at.advance(1);
            }
        }
    }

    tokens
}

fn first_match(
    src: &LineSource<'_>,
    at: LineCursor,
    ctx: &ParseContext<'_>,
) -> Option<BlockMatch> {
    for rule in rules_for(ctx) {
        match rule.apply(src, at, false, ctx) {
            Some(found) if found.next > at => return Some(found),
            Some(_) => warn!(
                "block rule '{}' matched line {} without consuming it",
                rule.name(),
                at.line + 1
            ),
            None => {}
        }
    }
    None
}
