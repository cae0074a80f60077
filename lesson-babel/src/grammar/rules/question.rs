//! Quiz questions fenced by `::?` lines.
//!
//! ```text
//! ::?
//! Mitochondria | Ribosome | Nucleus
//! A
//! Which organelle produces ATP?
//! ::?
//! ```
//!
//! The first body line is the option list when it contains `|`. A single
//! option is written with a trailing `|` (`Option A |`) so it still reads as
//! a list. When options were read, the next line may name the correct one:
//! a letter `A`-`Z` (out of range means unset), or, for older documents,
//! the exact text of an option. Everything else is the question body and is
//! tokenized recursively. The nearest following `::?` line closes the block,
//! so questions do not nest.

use crate::grammar::{BlockMatch, BlockRule, LineCursor, LineSource, ParseContext};
use crate::ir::tokens::Token;
use log::debug;

pub const QUESTION_FENCE: &str = "::?";

pub struct QuestionRule;

impl BlockRule for QuestionRule {
    fn name(&self) -> &'static str {
        "question"
    }

    fn apply(
        &self,
        src: &LineSource<'_>,
        at: LineCursor,
        silent: bool,
        ctx: &ParseContext<'_>,
    ) -> Option<BlockMatch> {
        if src.line(at)?.trim() != QUESTION_FENCE {
            return None;
        }
        let close =
            (at.line + 1..src.len()).find(|&i| src.get(i).is_some_and(is_fence))?;
        let next = LineCursor::at(close + 1);
        if silent {
            return Some(BlockMatch::new(next, true, Vec::new));
        }

        let body = src.slice(at.line + 1, close);
        let header = read_header(body);
        debug!(
            "question at line {} with {} option(s)",
            at.line + 1,
            header.options.len()
        );

        let mut tokens = vec![Token::QuestionOpen {
            options: header.options,
            correct: header.correct,
        }];
        tokens.extend(ctx.tokenize_lines(&body[header.consumed..]));
        tokens.push(Token::QuestionClose);
        Some(BlockMatch { next, tokens })
    }
}

fn is_fence(line: &str) -> bool {
    line.trim() == QUESTION_FENCE
}

#[derive(Debug, Default, PartialEq)]
struct Header {
    options: Vec<String>,
    correct: Option<usize>,
    consumed: usize,
}

fn read_header(body: &[&str]) -> Header {
    let mut header = Header::default();
    let Some(first) = body.first().filter(|line| line.contains('|')) else {
        return header;
    };
    header.options = split_options(first);
    header.consumed = 1;

    if let Some(answer) = body.get(1).map(|line| line.trim()) {
        if let Some(index) = answer_letter(answer) {
            header.correct = (index < header.options.len()).then_some(index);
            header.consumed = 2;
        } else if !answer.is_empty() {
            if let Some(index) = header.options.iter().position(|o| o == answer) {
                header.correct = Some(index);
                header.consumed = 2;
            }
        }
    }
    header
}

/// Option texts of an options line. One trailing `|` is a terminator, not
/// an empty option.
pub(crate) fn split_options(line: &str) -> Vec<String> {
    let line = line.trim();
    let line = line.strip_suffix('|').unwrap_or(line);
    line.split('|').map(|o| o.trim().to_string()).collect()
}

/// `A`..`Z` as an index.
pub(crate) fn answer_letter(line: &str) -> Option<usize> {
    match line.as_bytes() {
        [c @ b'A'..=b'Z'] => Some((c - b'A') as usize),
        _ => None,
    }
}
