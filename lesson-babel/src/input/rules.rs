//! One recognizer per custom kind, each anchored at the caret.

use super::{InputMatch, InputRule, InputScope};
use crate::ir::custom::{AttrValue, Attributes, Node, NodeKind};
use crate::ir::nodes::{Block, Paragraph, Question};
use crate::schema::SchemaOptions;
use once_cell::sync::Lazy;
use regex::Regex;

static INLINE_EQUATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|[^$])(\$([^$]+)\$)$").unwrap());
static BLOCK_EQUATION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\$\$(.+?)\$\$$").unwrap());
static EMBED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\{\{(.+?)\}\}$").unwrap());
static VOCABULARY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\|([^:|]+):\s?([^|]+)\|$").unwrap());
static CHEMICAL_STRUCTURE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[([^\]]+)\]\]$").unwrap());
static QUESTION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^::\?$").unwrap());
static CODE_BLOCK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^```([a-z]+)?\s$").unwrap());

pub static INLINE_EQUATION: InlineEquationInput = InlineEquationInput;
pub static BLOCK_EQUATION: BlockEquationInput = BlockEquationInput;
pub static EMBED: EmbedInput = EmbedInput;
pub static VOCABULARY: VocabularyInput = VocabularyInput;
pub static CHEMICAL_STRUCTURE: ChemicalStructureInput = ChemicalStructureInput;
pub static QUESTION: QuestionInput = QuestionInput;
pub static CODE_BLOCK: CodeBlockInput = CodeBlockInput;

fn text(value: &str) -> AttrValue {
    AttrValue::Text(value.to_string())
}

/// Build through the kind's factory so typed nodes match parsed ones.
fn create(kind: NodeKind, attrs: Attributes) -> Node {
    kind.create(&attrs)
}

pub struct InlineEquationInput;

impl InputRule for InlineEquationInput {
    fn name(&self) -> &'static str {
        "inline_equation"
    }

    fn kind(&self) -> NodeKind {
        NodeKind::InlineEquation
    }

    fn scope(&self) -> InputScope {
        InputScope::Inline
    }

    fn find(&self, before_caret: &str, _options: &SchemaOptions) -> Option<InputMatch> {
        let caps = INLINE_EQUATION_RE.captures(before_caret)?;
        let whole = caps.get(1)?;
        let formula = caps.get(2)?.as_str();
        Some(InputMatch {
            range: whole.range(),
            node: create(
                NodeKind::InlineEquation,
                Attributes::new().with("formula", text(formula)),
            ),
        })
    }
}

pub struct BlockEquationInput;

impl InputRule for BlockEquationInput {
    fn name(&self) -> &'static str {
        "block_equation"
    }

    fn kind(&self) -> NodeKind {
        NodeKind::BlockEquation
    }

    fn scope(&self) -> InputScope {
        InputScope::Textblock
    }

    fn find(&self, before_caret: &str, _options: &SchemaOptions) -> Option<InputMatch> {
        let caps = BLOCK_EQUATION_RE.captures(before_caret)?;
        let formula = caps.get(1)?.as_str().trim();
        Some(InputMatch {
            range: 0..before_caret.len(),
            node: create(
                NodeKind::BlockEquation,
                Attributes::new().with("formula", text(formula)),
            ),
        })
    }
}

pub struct EmbedInput;

impl InputRule for EmbedInput {
    fn name(&self) -> &'static str {
        "embed"
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Embed
    }

    fn scope(&self) -> InputScope {
        InputScope::Textblock
    }

    fn find(&self, before_caret: &str, _options: &SchemaOptions) -> Option<InputMatch> {
        let caps = EMBED_RE.captures(before_caret)?;
        let inner = caps.get(1)?.as_str().trim();
        Some(InputMatch {
            range: 0..before_caret.len(),
            node: create(NodeKind::Embed, Attributes::new().with("text", text(inner))),
        })
    }
}

pub struct VocabularyInput;

impl InputRule for VocabularyInput {
    fn name(&self) -> &'static str {
        "vocabulary"
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Vocabulary
    }

    fn scope(&self) -> InputScope {
        InputScope::Inline
    }

    fn find(&self, before_caret: &str, _options: &SchemaOptions) -> Option<InputMatch> {
        let caps = VOCABULARY_RE.captures(before_caret)?;
        let term = caps.get(1)?.as_str().trim();
        let definition = caps.get(2)?.as_str().trim();
        if term.is_empty() || definition.is_empty() {
            return None;
        }
        Some(InputMatch {
            range: caps.get(0)?.range(),
            node: create(
                NodeKind::Vocabulary,
                Attributes::new()
                    .with("term", text(term))
                    .with("definition", text(definition)),
            ),
        })
    }
}

pub struct ChemicalStructureInput;

impl InputRule for ChemicalStructureInput {
    fn name(&self) -> &'static str {
        "chemical_structure"
    }

    fn kind(&self) -> NodeKind {
        NodeKind::ChemicalStructure
    }

    fn scope(&self) -> InputScope {
        InputScope::Inline
    }

    fn find(&self, before_caret: &str, _options: &SchemaOptions) -> Option<InputMatch> {
        let caps = CHEMICAL_STRUCTURE_RE.captures(before_caret)?;
        let smiles = caps.get(1)?.as_str().trim();
        if smiles.is_empty() {
            return None;
        }
        Some(InputMatch {
            range: caps.get(0)?.range(),
            node: create(
                NodeKind::ChemicalStructure,
                Attributes::new().with("smiles", text(smiles)),
            ),
        })
    }
}

pub struct QuestionInput;

impl InputRule for QuestionInput {
    fn name(&self) -> &'static str {
        "question"
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Question
    }

    fn scope(&self) -> InputScope {
        InputScope::Textblock
    }

    /// An empty question with one empty paragraph to type into.
    fn find(&self, before_caret: &str, _options: &SchemaOptions) -> Option<InputMatch> {
        QUESTION_RE.find(before_caret)?;
        Some(InputMatch {
            range: 0..before_caret.len(),
            node: Node::Block(Block::Question(Question {
                options: vec![],
                correct_option: None,
                children: vec![Block::Paragraph(Paragraph::default())],
            })),
        })
    }
}

pub struct CodeBlockInput;

impl InputRule for CodeBlockInput {
    fn name(&self) -> &'static str {
        "code_block"
    }

    fn kind(&self) -> NodeKind {
        NodeKind::CodeBlock
    }

    fn scope(&self) -> InputScope {
        InputScope::Textblock
    }

    fn find(&self, before_caret: &str, options: &SchemaOptions) -> Option<InputMatch> {
        let caps = CODE_BLOCK_RE.captures(before_caret)?;
        let language = caps
            .get(1)
            .map_or(options.default_code_language.as_str(), |m| m.as_str());
        Some(InputMatch {
            range: 0..before_caret.len(),
            node: create(
                NodeKind::CodeBlock,
                Attributes::new().with("language", text(language)),
            ),
        })
    }
}
