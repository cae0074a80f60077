//! The inline loop: walks one block's text and hands each offset to the
//! inline rules, optionally stopping at a closing delimiter.

use super::{InlineCursor, ParseContext};
use crate::ir::tokens::Token;

/// Tokenize `text` completely.
pub fn tokenize(text: &str, ctx: &ParseContext<'_>) -> Vec<Token> {
    run(text, InlineCursor::default(), None, ctx)
        .map(|(tokens, _)| tokens)
        .unwrap_or_default()
}

pub(crate) fn run(
    text: &str,
    start: InlineCursor,
    terminator: Option<&str>,
    ctx: &ParseContext<'_>,
) -> Option<(Vec<Token>, InlineCursor)> {
    let mut tokens = Vec::new();
    let mut at = start;

    while at.pos < text.len() {
        if let Some(term) = terminator {
            if closes_at(text, at.pos, term) {
                return Some((tokens, at.advance(term.len())));
            }
        }

        let mut matched = false;
        for rule in ctx.schema().inline_rules() {
            if let Some(found) = rule.apply(text, at, false, ctx) {
                if found.next > at {
                    tokens.extend(found.tokens);
                    at = found.next;
                    matched = true;
                    break;
                }
            }
        }

        if !matched {
            let ch = text[at.pos..].chars().next()?;
            tokens.push(Token::text(ch));
            at = at.advance(ch.len_utf8());
        }
    }

    match terminator {
        Some(_) => None,
        None => Some((tokens, at)),
    }
}

/// A single `*` closer must not be the first half of `**`.
fn closes_at(text: &str, pos: usize, terminator: &str) -> bool {
    let rest = &text[pos..];
    if !rest.starts_with(terminator) {
        return false;
    }
    !(terminator == "*" && rest[1..].starts_with('*'))
}
