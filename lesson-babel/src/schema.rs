//! The schema: which lesson constructs are active and in what order their
//! rules run.
//!
//! A [`Schema`] is a plain value handed to parsers, serializers and input
//! rules when they are built. There is no global registration step; two
//! schemas with different kinds enabled can be used side by side.
//!
//! Block precedence is: the custom block rules in [`NodeSpec::standard`]
//! order (block equation runs before the code fence), then headings,
//! thematic breaks, quotes and lists, and the paragraph rule last. Inline
//! precedence is: escapes and code spans, the custom inline rules, then
//! strong, emphasis and plain text.

use crate::grammar::rules;
use crate::grammar::{BlockRule, InlineRule};
use crate::input::rules as input_rules;
use crate::input::InputRule;
use crate::ir::custom::NodeKind;
use std::fmt;

/// How a kind is recognized in text.
#[derive(Clone, Copy)]
pub enum Rule {
    Block(&'static dyn BlockRule),
    Inline(&'static dyn InlineRule),
    /// Created only by templates and table commands, never by a text rule.
    Structural,
}

/// One row of the dispatch table.
#[derive(Clone, Copy)]
pub struct NodeSpec {
    pub kind: NodeKind,
    pub rule: Rule,
    pub input: Option<&'static dyn InputRule>,
}

impl NodeSpec {
    /// Every custom kind, in rule precedence order.
    pub fn standard() -> Vec<NodeSpec> {
        vec![
            NodeSpec {
                kind: NodeKind::BlockEquation,
                rule: Rule::Block(&rules::BLOCK_EQUATION),
                input: Some(&input_rules::BLOCK_EQUATION),
            },
            NodeSpec {
                kind: NodeKind::CodeBlock,
                rule: Rule::Block(&rules::CODE_FENCE),
                input: Some(&input_rules::CODE_BLOCK),
            },
            NodeSpec {
                kind: NodeKind::Embed,
                rule: Rule::Block(&rules::EMBED),
                input: Some(&input_rules::EMBED),
            },
            NodeSpec {
                kind: NodeKind::Question,
                rule: Rule::Block(&rules::QUESTION),
                input: Some(&input_rules::QUESTION),
            },
            NodeSpec {
                kind: NodeKind::Table,
                rule: Rule::Block(&rules::TABLE),
                input: None,
            },
            NodeSpec {
                kind: NodeKind::TableRow,
                rule: Rule::Structural,
                input: None,
            },
            NodeSpec {
                kind: NodeKind::TableCell,
                rule: Rule::Structural,
                input: None,
            },
            NodeSpec {
                kind: NodeKind::InlineEquation,
                rule: Rule::Inline(&rules::INLINE_EQUATION),
                input: Some(&input_rules::INLINE_EQUATION),
            },
            NodeSpec {
                kind: NodeKind::Vocabulary,
                rule: Rule::Inline(&rules::VOCABULARY),
                input: Some(&input_rules::VOCABULARY),
            },
            NodeSpec {
                kind: NodeKind::ChemicalStructure,
                rule: Rule::Inline(&rules::CHEMICAL_STRUCTURE),
                input: Some(&input_rules::CHEMICAL_STRUCTURE),
            },
        ]
    }
}

impl fmt::Debug for NodeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = match self.rule {
            Rule::Block(rule) => rule.name(),
            Rule::Inline(rule) => rule.name(),
            Rule::Structural => "structural",
        };
        f.debug_struct("NodeSpec")
            .field("kind", &self.kind)
            .field("rule", &rule)
            .field("input", &self.input.map(|input| input.name()))
            .finish()
    }
}

/// Options shared by the parser and serializer.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaOptions {
    /// Language written on code fences whose block has none.
    pub default_code_language: String,
}

impl Default for SchemaOptions {
    fn default() -> Self {
        SchemaOptions {
            default_code_language: "javascript".to_string(),
        }
    }
}

#[derive(Clone)]
pub struct Schema {
    specs: Vec<NodeSpec>,
    options: SchemaOptions,
    block_rules: Vec<&'static dyn BlockRule>,
    inline_rules: Vec<&'static dyn InlineRule>,
}

impl Schema {
    pub fn new(specs: Vec<NodeSpec>, options: SchemaOptions) -> Self {
        let mut schema = Schema {
            specs,
            options,
            block_rules: Vec::new(),
            inline_rules: Vec::new(),
        };
        schema.rebuild();
        schema
    }

    /// All lesson constructs with default options.
    pub fn standard() -> Self {
        Schema::new(NodeSpec::standard(), SchemaOptions::default())
    }

    /// Drop a kind. Its text is then read as ordinary prose.
    pub fn without(mut self, kind: NodeKind) -> Self {
        self.specs.retain(|spec| spec.kind != kind);
        self.rebuild();
        self
    }

    pub fn with_options(mut self, options: SchemaOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &SchemaOptions {
        &self.options
    }

    pub fn specs(&self) -> &[NodeSpec] {
        &self.specs
    }

    pub fn spec(&self, kind: NodeKind) -> Option<&NodeSpec> {
        self.specs.iter().find(|spec| spec.kind == kind)
    }

    pub fn is_enabled(&self, kind: NodeKind) -> bool {
        self.spec(kind).is_some()
    }

    pub fn block_rules(&self) -> &[&'static dyn BlockRule] {
        &self.block_rules
    }

    pub fn inline_rules(&self) -> &[&'static dyn InlineRule] {
        &self.inline_rules
    }

    /// Live-typing rules of the enabled kinds, in precedence order.
    pub fn input_rules(&self) -> Vec<&'static dyn InputRule> {
        self.specs.iter().filter_map(|spec| spec.input).collect()
    }

    fn rebuild(&mut self) {
        let mut block: Vec<&'static dyn BlockRule> = Vec::new();
        let mut inline: Vec<&'static dyn InlineRule> = vec![&rules::ESCAPE, &rules::CODE_SPAN];
        for spec in &self.specs {
            match spec.rule {
                Rule::Block(rule) => block.push(rule),
                Rule::Inline(rule) => inline.push(rule),
                Rule::Structural => {}
            }
        }
        block.extend([
            &rules::HEADING as &'static dyn BlockRule,
            &rules::THEMATIC_BREAK,
            &rules::BLOCKQUOTE,
            &rules::LIST,
            &rules::PARAGRAPH,
        ]);
        inline.extend([
            &rules::STRONG as &'static dyn InlineRule,
            &rules::EMPHASIS,
            &rules::TEXT,
        ]);
        self.block_rules = block;
        self.inline_rules = inline;
    }
}

impl Default for Schema {
    fn default() -> Self {
        Schema::standard()
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("specs", &self.specs)
            .field("options", &self.options)
            .finish()
    }
}
