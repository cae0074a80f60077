//! Tables, written in markdown as their tag form:
//!
//! ```text
//! <table>
//! <tr><th><p>Element</p></th><th><p>Symbol</p></th></tr>
//! <tr><td><p>Sodium</p></td><td><p>Na</p></td></tr>
//! </table>
//! ```
//!
//! The lines from `<table` through the first line ending in `</table>` are
//! handed to the tag bridge. The rule declines if the closing tag is missing
//! or the markup does not hold exactly one table.

use crate::formats::tag::parser::parse_fragment;
use crate::grammar::{BlockMatch, BlockRule, LineCursor, LineSource, ParseContext};
use crate::ir::nodes::Block;
use crate::ir::tokens::Token;

pub struct TableRule;

impl BlockRule for TableRule {
    fn name(&self) -> &'static str {
        "table"
    }

    fn apply(
        &self,
        src: &LineSource<'_>,
        at: LineCursor,
        silent: bool,
        _ctx: &ParseContext<'_>,
    ) -> Option<BlockMatch> {
        if !src.line(at)?.trim_start().starts_with("<table") {
            return None;
        }
        let close = (at.line..src.len()).find(|&i| {
            src.get(i)
                .is_some_and(|line| line.trim_end().ends_with("</table>"))
        })?;
        let markup = src.slice(at.line, close + 1).join("\n");
        let table = match parse_fragment(&markup).as_mut_slice() {
            [Block::Table(table)] => std::mem::take(table),
            _ => return None,
        };
        Some(BlockMatch::new(LineCursor::at(close + 1), silent, || {
            vec![Token::Table { table }]
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::nodes::{Paragraph, TableCell};
    use crate::schema::Schema;

    fn apply(text: &str) -> Option<BlockMatch> {
        let schema = Schema::standard();
        let src = LineSource::new(text);
        TableRule.apply(&src, LineCursor::default(), false, &ParseContext::new(&schema))
    }

    #[test]
    fn test_table_lines() {
        let found = apply(
            "<table>\n<tr><th><p>H</p></th></tr>\n<tr><td colspan=\"2\"></td></tr>\n</table>\nafter",
        )
        .unwrap();
        assert_eq!(found.next, LineCursor::at(4));
        let [Token::Table { table }] = found.tokens.as_slice() else {
            panic!("expected a table token, got {:?}", found.tokens);
        };
        assert_eq!(table.rows.len(), 2);
        assert_eq!(
            table.rows[0].cells[0],
            TableCell::header(vec![Block::Paragraph(Paragraph::from_text("H"))])
        );
        assert_eq!(table.rows[1].cells[0].colspan, 2);
    }

    #[test]
    fn test_unclosed_table_declines() {
        assert!(apply("<table>\n<tr><td></td></tr>").is_none());
    }

    #[test]
    fn test_other_markup_declines() {
        assert!(apply("<tablet></tablet>").is_none());
    }
}
