//! Generic inline rules: escapes, code spans, strong, emphasis and text.

use crate::grammar::{InlineCursor, InlineMatch, InlineRule, ParseContext};
use crate::ir::tokens::Token;

/// Bytes that can start an inline construct. Text runs stop in front of them.
pub(crate) const SPECIAL: &[u8] = b"\\`$|[*_";

/// `\` followed by ASCII punctuation yields the punctuation as text.
pub struct EscapeRule;

impl InlineRule for EscapeRule {
    fn name(&self) -> &'static str {
        "escape"
    }

    fn apply(
        &self,
        text: &str,
        at: InlineCursor,
        silent: bool,
        _ctx: &ParseContext<'_>,
    ) -> Option<InlineMatch> {
        let rest = &text[at.pos..];
        let mut chars = rest.chars();
        if chars.next()? != '\\' {
            return None;
        }
        let escaped = chars.next().filter(char::is_ascii_punctuation)?;
        Some(InlineMatch::new(at.advance(2), silent, || {
            vec![Token::text(escaped)]
        }))
    }
}

/// Backtick code span; the closing run has the same length as the opening one.
pub struct CodeSpanRule;

impl InlineRule for CodeSpanRule {
    fn name(&self) -> &'static str {
        "code_span"
    }

    fn apply(
        &self,
        text: &str,
        at: InlineCursor,
        silent: bool,
        _ctx: &ParseContext<'_>,
    ) -> Option<InlineMatch> {
        let rest = &text[at.pos..];
        let fence = rest.bytes().take_while(|b| *b == b'`').count();
        if fence == 0 {
            return None;
        }
        let body = &rest[fence..];
        let mut search = 0;
        while let Some(offset) = body[search..].find('`') {
            let start = search + offset;
            let run = body[start..].bytes().take_while(|b| *b == b'`').count();
            if run == fence {
                let code = strip_code_padding(&body[..start]);
                return Some(InlineMatch::new(
                    at.advance(fence + start + run),
                    silent,
                    || {
                        vec![Token::Code {
                            code: code.to_string(),
                        }]
                    },
                ));
            }
            search = start + run;
        }
        None
    }
}

/// One leading and trailing space is padding when both are present.
fn strip_code_padding(code: &str) -> &str {
    if code.len() >= 2 && code.starts_with(' ') && code.ends_with(' ') && !code.trim().is_empty()
    {
        &code[1..code.len() - 1]
    } else {
        code
    }
}

/// `**strong**`
pub struct StrongRule;

impl InlineRule for StrongRule {
    fn name(&self) -> &'static str {
        "strong"
    }

    fn apply(
        &self,
        text: &str,
        at: InlineCursor,
        silent: bool,
        ctx: &ParseContext<'_>,
    ) -> Option<InlineMatch> {
        if !text[at.pos..].starts_with("**") {
            return None;
        }
        delimited(text, at, "**", silent, ctx, Token::StrongOpen, Token::StrongClose)
    }
}

/// `_emphasis_` or `*emphasis*`
pub struct EmphasisRule;

impl InlineRule for EmphasisRule {
    fn name(&self) -> &'static str {
        "emphasis"
    }

    fn apply(
        &self,
        text: &str,
        at: InlineCursor,
        silent: bool,
        ctx: &ParseContext<'_>,
    ) -> Option<InlineMatch> {
        let rest = &text[at.pos..];
        let marker = if rest.starts_with('_') {
            "_"
        } else if rest.starts_with('*') && !rest.starts_with("**") {
            "*"
        } else {
            return None;
        };
        delimited(
            text,
            at,
            marker,
            silent,
            ctx,
            Token::EmphasisOpen,
            Token::EmphasisClose,
        )
    }
}

fn delimited(
    text: &str,
    at: InlineCursor,
    marker: &str,
    silent: bool,
    ctx: &ParseContext<'_>,
    open: Token,
    close: Token,
) -> Option<InlineMatch> {
    let (inner, next) = ctx.tokenize_inline_until(text, at.advance(marker.len()), marker)?;
    if inner.is_empty() {
        return None;
    }
    Some(InlineMatch::new(next, silent, || {
        let mut tokens = Vec::with_capacity(inner.len() + 2);
        tokens.push(open);
        tokens.extend(inner);
        tokens.push(close);
        tokens
    }))
}

/// Plain text up to the next special byte. A special byte no rule claimed
/// is consumed on its own.
pub struct TextRule;

impl InlineRule for TextRule {
    fn name(&self) -> &'static str {
        "text"
    }

    fn apply(
        &self,
        text: &str,
        at: InlineCursor,
        silent: bool,
        _ctx: &ParseContext<'_>,
    ) -> Option<InlineMatch> {
        let rest = &text[at.pos..];
        let first = rest.chars().next()?;
        // SPECIAL is ASCII, so every hit is a char boundary past `first`.
        let len = match rest.bytes().skip(first.len_utf8()).position(|b| SPECIAL.contains(&b)) {
            Some(offset) => offset + first.len_utf8(),
            None => rest.len(),
        };
        Some(InlineMatch::new(at.advance(len), silent, || {
            vec![Token::text(&rest[..len])]
        }))
    }
}
