//! `|term: definition|` vocabulary annotations.

use crate::grammar::{InlineCursor, InlineMatch, InlineRule, ParseContext};
use crate::ir::tokens::Token;

/// The next `|` closes. The body splits at its first `:`; both halves are
/// trimmed and must be non-empty.
pub struct VocabularyRule;

impl InlineRule for VocabularyRule {
    fn name(&self) -> &'static str {
        "vocabulary"
    }

    fn apply(
        &self,
        text: &str,
        at: InlineCursor,
        silent: bool,
        _ctx: &ParseContext<'_>,
    ) -> Option<InlineMatch> {
        let rest = text[at.pos..].strip_prefix('|')?;
        let end = rest.find('|')?;
        let (term, definition) = split_entry(&rest[..end])?;
        Some(InlineMatch::new(at.advance(end + 2), silent, || {
            vec![Token::Vocabulary {
                term: term.to_string(),
                definition: definition.to_string(),
            }]
        }))
    }
}

pub(crate) fn split_entry(body: &str) -> Option<(&str, &str)> {
    let (term, definition) = body.split_once(':')?;
    let (term, definition) = (term.trim(), definition.trim());
    (!term.is_empty() && !definition.is_empty()).then_some((term, definition))
}
