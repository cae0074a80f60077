//! Rule instances. Rules are stateless, so each one is a single static the
//! schema refers to.

pub mod blocks;
pub mod chemistry;
pub mod code;
pub mod embed;
pub mod equation;
pub mod inlines;
pub mod question;
pub mod table;
pub mod vocabulary;

pub static BLOCK_EQUATION: equation::BlockEquationRule = equation::BlockEquationRule;
pub static CODE_FENCE: code::CodeFenceRule = code::CodeFenceRule;
pub static EMBED: embed::EmbedRule = embed::EmbedRule;
pub static QUESTION: question::QuestionRule = question::QuestionRule;
pub static TABLE: table::TableRule = table::TableRule;

pub static HEADING: blocks::HeadingRule = blocks::HeadingRule;
pub static THEMATIC_BREAK: blocks::ThematicBreakRule = blocks::ThematicBreakRule;
pub static BLOCKQUOTE: blocks::BlockquoteRule = blocks::BlockquoteRule;
pub static LIST: blocks::ListRule = blocks::ListRule;
pub static PARAGRAPH: blocks::ParagraphRule = blocks::ParagraphRule;

pub static INLINE_EQUATION: equation::InlineEquationRule = equation::InlineEquationRule;
pub static VOCABULARY: vocabulary::VocabularyRule = vocabulary::VocabularyRule;
pub static CHEMICAL_STRUCTURE: chemistry::ChemicalStructureRule =
    chemistry::ChemicalStructureRule;

pub static ESCAPE: inlines::EscapeRule = inlines::EscapeRule;
pub static CODE_SPAN: inlines::CodeSpanRule = inlines::CodeSpanRule;
pub static STRONG: inlines::StrongRule = inlines::StrongRule;
pub static EMPHASIS: inlines::EmphasisRule = inlines::EmphasisRule;
pub static TEXT: inlines::TextRule = inlines::TextRule;
