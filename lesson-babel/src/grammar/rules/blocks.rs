//! Generic prose block rules: headings, breaks, quotes, lists, paragraphs.
//!
//! These carry the ordinary document structure the lesson constructs live
//! inside. Quotes and list items recurse through the context, so a question
//! inside a list item is recognized like a top-level one.

use crate::grammar::{BlockMatch, BlockRule, LineCursor, LineSource, ParseContext};
use crate::ir::tokens::Token;

pub struct HeadingRule;

impl BlockRule for HeadingRule {
    fn name(&self) -> &'static str {
        "heading"
    }

    fn apply(
        &self,
        src: &LineSource<'_>,
        at: LineCursor,
        silent: bool,
        ctx: &ParseContext<'_>,
    ) -> Option<BlockMatch> {
        let line = src.line(at)?.trim();
        let level = line.bytes().take_while(|b| *b == b'#').count();
        if level == 0 || level > 6 {
            return None;
        }
        let rest = &line[level..];
        if !rest.is_empty() && !rest.starts_with(' ') {
            return None;
        }
        Some(BlockMatch::new(at.advance(1), silent, || {
            let mut tokens = vec![Token::HeadingOpen { level }];
            tokens.extend(ctx.tokenize_inline(rest.trim()));
            tokens.push(Token::HeadingClose);
            tokens
        }))
    }
}

pub struct ThematicBreakRule;

impl BlockRule for ThematicBreakRule {
    fn name(&self) -> &'static str {
        "thematic_break"
    }

    fn apply(
        &self,
        src: &LineSource<'_>,
        at: LineCursor,
        silent: bool,
        _ctx: &ParseContext<'_>,
    ) -> Option<BlockMatch> {
        if !is_thematic_break(src.line(at)?) {
            return None;
        }
        Some(BlockMatch::new(at.advance(1), silent, || {
            vec![Token::ThematicBreak]
        }))
    }
}

/// Three or more of the same `-`, `*` or `_`, optionally spaced.
pub(crate) fn is_thematic_break(line: &str) -> bool {
    let mut marks = line.chars().filter(|c| !c.is_whitespace());
    let Some(first) = marks.next() else {
        return false;
    };
    if !matches!(first, '-' | '*' | '_') {
        return false;
    }
    let mut count = 1;
    for c in marks {
        if c != first {
            return false;
        }
        count += 1;
    }
    count >= 3
}

pub struct BlockquoteRule;

impl BlockRule for BlockquoteRule {
    fn name(&self) -> &'static str {
        "blockquote"
    }

    fn apply(
        &self,
        src: &LineSource<'_>,
        at: LineCursor,
        silent: bool,
        ctx: &ParseContext<'_>,
    ) -> Option<BlockMatch> {
        let mut body = Vec::new();
        let mut line_no = at.line;
        while let Some(line) = src.get(line_no) {
            let Some(rest) = line.trim_start().strip_prefix('>') else {
                break;
            };
            body.push(rest.strip_prefix(' ').unwrap_or(rest));
            line_no += 1;
        }
        if body.is_empty() {
            return None;
        }
        Some(BlockMatch::new(LineCursor::at(line_no), silent, || {
            let mut tokens = vec![Token::BlockquoteOpen];
            tokens.extend(ctx.tokenize_lines(&body));
            tokens.push(Token::BlockquoteClose);
            tokens
        }))
    }
}

pub struct ListRule;

/// A list marker found at the start of a line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ListMarker {
    pub ordered: bool,
    /// Byte offset where the item content starts; also the continuation indent.
    pub width: usize,
}

pub(crate) fn list_marker(line: &str) -> Option<ListMarker> {
    let indent = leading_spaces(line);
    if indent > 3 {
        return None;
    }
    let rest = &line[indent..];
    let (ordered, marker_len) = match rest.as_bytes().first()? {
        b'-' | b'*' | b'+' => (false, 1),
        b'0'..=b'9' => {
            let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
            if digits > 9 || rest.as_bytes().get(digits) != Some(&b'.') {
                return None;
            }
            (true, digits + 1)
        }
        _ => return None,
    };
    let after = &rest[marker_len..];
    if after.is_empty() {
        Some(ListMarker {
            ordered,
            width: indent + marker_len,
        })
    } else if after.starts_with(' ') {
        Some(ListMarker {
            ordered,
            width: indent + marker_len + 1,
        })
    } else {
        None
    }
}

fn leading_spaces(line: &str) -> usize {
    line.bytes().take_while(|b| *b == b' ').count()
}

impl BlockRule for ListRule {
    fn name(&self) -> &'static str {
        "list"
    }

    fn apply(
        &self,
        src: &LineSource<'_>,
        at: LineCursor,
        silent: bool,
        ctx: &ParseContext<'_>,
    ) -> Option<BlockMatch> {
        let first = list_marker(src.line(at)?)?;
        let mut items: Vec<Vec<&str>> = Vec::new();
        let mut line_no = at.line;

        while let Some(line) = src.get(line_no) {
            let Some(marker) = list_marker(line).filter(|m| m.ordered == first.ordered) else {
                break;
            };
            let mut item = vec![line.get(marker.width..).unwrap_or("")];
            line_no += 1;

            while let Some(next) = src.get(line_no) {
                if next.trim().is_empty() {
                    // A blank run belongs to the item only if indented content follows.
                    let mut ahead = line_no;
                    while src.is_blank(ahead) {
                        ahead += 1;
                    }
                    match src.get(ahead) {
                        Some(resume) if leading_spaces(resume) >= marker.width => {
                            item.extend(std::iter::repeat("").take(ahead - line_no));
                            line_no = ahead;
                        }
                        _ => break,
                    }
                } else if leading_spaces(next) >= marker.width {
                    item.push(&next[marker.width..]);
                    line_no += 1;
                } else {
                    break;
                }
            }

            items.push(item);
            if src.is_blank(line_no) {
                break;
            }
        }

        Some(BlockMatch::new(LineCursor::at(line_no), silent, || {
            let mut tokens = vec![Token::ListOpen {
                ordered: first.ordered,
            }];
            for item in &items {
                tokens.push(Token::ListItemOpen);
                tokens.extend(ctx.tokenize_lines(item));
                tokens.push(Token::ListItemClose);
            }
            tokens.push(Token::ListClose);
            tokens
        }))
    }
}

/// Fallback rule: consecutive lines up to a blank line or a line another
/// rule claims. Each line is trimmed; lines are joined by `\n`.
pub struct ParagraphRule;

impl BlockRule for ParagraphRule {
    fn name(&self) -> &'static str {
        "paragraph"
    }

    fn apply(
        &self,
        src: &LineSource<'_>,
        at: LineCursor,
        silent: bool,
        ctx: &ParseContext<'_>,
    ) -> Option<BlockMatch> {
        let first = src.line(at)?;
        if first.trim().is_empty() {
            return None;
        }
        let mut lines = vec![first.trim()];
        let mut next = at.advance(1);
        while let Some(line) = src.line(next) {
            if line.trim().is_empty() || ctx.claims_line(src, next, self.name()) {
                break;
            }
            lines.push(line.trim());
            next = next.advance(1);
        }
        Some(BlockMatch::new(next, silent, || {
            let mut tokens = vec![Token::ParagraphOpen];
            tokens.extend(ctx.tokenize_inline(&lines.join("\n")));
            tokens.push(Token::ParagraphClose);
            tokens
        }))
    }
}
