//! `[[SMILES]]` chemical-structure annotations.

use crate::grammar::{InlineCursor, InlineMatch, InlineRule, ParseContext};
use crate::ir::tokens::Token;

/// The first `]]` closes, so a SMILES string cannot itself contain `]]`.
pub struct ChemicalStructureRule;

impl InlineRule for ChemicalStructureRule {
    fn name(&self) -> &'static str {
        "chemical_structure"
    }

    fn apply(
        &self,
        text: &str,
        at: InlineCursor,
        silent: bool,
        _ctx: &ParseContext<'_>,
    ) -> Option<InlineMatch> {
        let rest = text[at.pos..].strip_prefix("[[")?;
        let end = rest.find("]]")?;
        let smiles = &rest[..end];
        Some(InlineMatch::new(at.advance(end + 4), silent, || {
            vec![Token::ChemicalStructure {
                smiles: smiles.to_string(),
                label: smiles.to_string(),
            }]
        }))
    }
}
