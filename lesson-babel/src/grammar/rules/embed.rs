//! `{{resource}}` embeds occupying a whole line.

use crate::grammar::{BlockMatch, BlockRule, LineCursor, LineSource, ParseContext};
use crate::ir::tokens::Token;
use once_cell::sync::Lazy;
use regex::Regex;

static EMBED_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\{\{(.*?)\}\}$").unwrap());

pub struct EmbedRule;

impl BlockRule for EmbedRule {
    fn name(&self) -> &'static str {
        "embed"
    }

    fn apply(
        &self,
        src: &LineSource<'_>,
        at: LineCursor,
        silent: bool,
        _ctx: &ParseContext<'_>,
    ) -> Option<BlockMatch> {
        let line = src.line(at)?.trim();
        let caps = EMBED_LINE.captures(line)?;
        let text = caps.get(1).map_or("", |m| m.as_str()).trim();
        Some(BlockMatch::new(at.advance(1), silent, || {
            vec![Token::Embed {
                text: text.to_string(),
            }]
        }))
    }
}
