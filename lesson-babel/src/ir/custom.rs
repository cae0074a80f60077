//! Custom node kinds and their attribute view.
//!
//! Every lesson construct is a typed variant of [`Block`] or [`Inline`]
//! (plus table rows and cells). This module gives hosts a uniform,
//! string-keyed handle on them: a [`NodeKind`] discriminant, an attribute
//! map, and a factory that builds a node from attributes. The kind of a node
//! never changes after creation; only its attributes and children do.

use crate::ir::nodes::*;
use std::collections::BTreeMap;
use std::fmt;

/// Discriminant of the custom lesson constructs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    InlineEquation,
    BlockEquation,
    CodeBlock,
    Embed,
    Vocabulary,
    ChemicalStructure,
    Question,
    Table,
    TableRow,
    TableCell,
}

impl NodeKind {
    pub const ALL: [NodeKind; 10] = [
        NodeKind::InlineEquation,
        NodeKind::BlockEquation,
        NodeKind::CodeBlock,
        NodeKind::Embed,
        NodeKind::Vocabulary,
        NodeKind::ChemicalStructure,
        NodeKind::Question,
        NodeKind::Table,
        NodeKind::TableRow,
        NodeKind::TableCell,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::InlineEquation => "inline_equation",
            NodeKind::BlockEquation => "block_equation",
            NodeKind::CodeBlock => "code_block",
            NodeKind::Embed => "embed",
            NodeKind::Vocabulary => "vocabulary",
            NodeKind::ChemicalStructure => "chemical_structure",
            NodeKind::Question => "question",
            NodeKind::Table => "table",
            NodeKind::TableRow => "table_row",
            NodeKind::TableCell => "table_cell",
        }
    }

    pub fn from_name(name: &str) -> Option<NodeKind> {
        NodeKind::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn is_inline(&self) -> bool {
        matches!(
            self,
            NodeKind::InlineEquation | NodeKind::Vocabulary | NodeKind::ChemicalStructure
        )
    }

    /// Kinds that own child content.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            NodeKind::Question | NodeKind::Table | NodeKind::TableRow | NodeKind::TableCell
        )
    }

    /// Leaf kinds that backspace unwraps back into source text.
    pub fn is_atom(&self) -> bool {
        matches!(
            self,
            NodeKind::InlineEquation
                | NodeKind::Vocabulary
                | NodeKind::ChemicalStructure
                | NodeKind::BlockEquation
                | NodeKind::Embed
        )
    }

    pub fn attribute_names(&self) -> &'static [&'static str] {
        match self {
            NodeKind::InlineEquation | NodeKind::BlockEquation => &["formula"],
            NodeKind::CodeBlock => &["language", "content"],
            NodeKind::Embed => &["text"],
            NodeKind::Vocabulary => &["term", "definition"],
            NodeKind::ChemicalStructure => &["smiles", "label"],
            NodeKind::Question => &["options", "correctOption"],
            NodeKind::Table | NodeKind::TableRow => &[],
            NodeKind::TableCell => &["colspan", "rowspan", "header"],
        }
    }

    /// Build a fresh node of this kind. Missing attributes take their
    /// defaults; containers start without children.
    pub fn create(&self, attrs: &Attributes) -> Node {
        let text = |name: &str| attrs.text(name).unwrap_or_default();
        match self {
            NodeKind::InlineEquation => Node::Inline(Inline::InlineEquation(InlineEquation {
                formula: text("formula"),
            })),
            NodeKind::BlockEquation => Node::Block(Block::BlockEquation(BlockEquation {
                formula: text("formula"),
            })),
            NodeKind::CodeBlock => Node::Block(Block::CodeBlock(CodeBlock {
                language: attrs.text("language").filter(|l| !l.is_empty()),
                content: text("content"),
            })),
            NodeKind::Embed => Node::Block(Block::Embed(Embed {
                text: text("text"),
            })),
            NodeKind::Vocabulary => Node::Inline(Inline::Vocabulary(Vocabulary {
                term: text("term"),
                definition: text("definition"),
            })),
            NodeKind::ChemicalStructure => {
                let mut chem = ChemicalStructure::default();
                chem.set_smiles(text("smiles"), attrs.text("label"));
                Node::Inline(Inline::ChemicalStructure(chem))
            }
            NodeKind::Question => Node::Block(Block::Question(Question {
                options: attrs.options("options").unwrap_or_default(),
                correct_option: attrs.optional("correctOption").unwrap_or_default(),
                children: vec![],
            })),
            NodeKind::Table => Node::Block(Block::Table(Table::default())),
            NodeKind::TableRow => Node::Row(TableRow::default()),
            NodeKind::TableCell => Node::Cell(TableCell {
                header: attrs.flag("header").unwrap_or(false),
                colspan: attrs.count("colspan").unwrap_or(1).max(1),
                rowspan: attrs.count("rowspan").unwrap_or(1).max(1),
                content: vec![],
            }),
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Text(String),
    Options(Vec<Paragraph>),
    Optional(Option<Paragraph>),
    Count(usize),
    Flag(bool),
}

impl AttrValue {
    fn type_name(&self) -> &'static str {
        match self {
            AttrValue::Text(_) => "text",
            AttrValue::Options(_) => "options",
            AttrValue::Optional(_) => "optional option",
            AttrValue::Count(_) => "count",
            AttrValue::Flag(_) => "flag",
        }
    }
}

/// Ordered attribute map.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Attributes(BTreeMap<String, AttrValue>);

impl Attributes {
    pub fn new() -> Self {
        Attributes(BTreeMap::new())
    }

    pub fn with(mut self, name: &str, value: AttrValue) -> Self {
        self.0.insert(name.to_string(), value);
        self
    }

    pub fn insert(&mut self, name: &str, value: AttrValue) {
        self.0.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.0.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn text(&self, name: &str) -> Option<String> {
        match self.0.get(name) {
            Some(AttrValue::Text(value)) => Some(value.clone()),
            _ => None,
        }
    }

    pub fn options(&self, name: &str) -> Option<Vec<Paragraph>> {
        match self.0.get(name) {
            Some(AttrValue::Options(value)) => Some(value.clone()),
            _ => None,
        }
    }

    pub fn optional(&self, name: &str) -> Option<Option<Paragraph>> {
        match self.0.get(name) {
            Some(AttrValue::Optional(value)) => Some(value.clone()),
            _ => None,
        }
    }

    pub fn count(&self, name: &str) -> Option<usize> {
        match self.0.get(name) {
            Some(AttrValue::Count(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn flag(&self, name: &str) -> Option<bool> {
        match self.0.get(name) {
            Some(AttrValue::Flag(value)) => Some(*value),
            _ => None,
        }
    }
}

/// Errors raised when mutating node attributes.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeError {
    /// The node is a generic block or inline, not a custom kind
    NotCustom,
    /// The kind has no attribute with this name
    Unknown { kind: NodeKind, name: String },
    /// The value has the wrong shape for the attribute
    TypeMismatch {
        kind: NodeKind,
        name: String,
        found: &'static str,
    },
}

impl fmt::Display for AttributeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeError::NotCustom => write!(f, "Node has no custom attributes"),
            AttributeError::Unknown { kind, name } => {
                write!(f, "Node kind '{kind}' has no attribute '{name}'")
            }
            AttributeError::TypeMismatch { kind, name, found } => {
                write!(f, "Attribute '{name}' of '{kind}' cannot hold a {found} value")
            }
        }
    }
}

impl std::error::Error for AttributeError {}

/// Any node a host can hold: a block, an inline, or a table part.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Block(Block),
    Inline(Inline),
    Row(TableRow),
    Cell(TableCell),
}

impl Node {
    /// The custom kind, or `None` for generic prose nodes.
    pub fn kind(&self) -> Option<NodeKind> {
        match self {
            Node::Block(Block::CodeBlock(_)) => Some(NodeKind::CodeBlock),
            Node::Block(Block::BlockEquation(_)) => Some(NodeKind::BlockEquation),
            Node::Block(Block::Embed(_)) => Some(NodeKind::Embed),
            Node::Block(Block::Question(_)) => Some(NodeKind::Question),
            Node::Block(Block::Table(_)) => Some(NodeKind::Table),
            Node::Block(_) => None,
            Node::Inline(Inline::InlineEquation(_)) => Some(NodeKind::InlineEquation),
            Node::Inline(Inline::Vocabulary(_)) => Some(NodeKind::Vocabulary),
            Node::Inline(Inline::ChemicalStructure(_)) => Some(NodeKind::ChemicalStructure),
            Node::Inline(_) => None,
            Node::Row(_) => Some(NodeKind::TableRow),
            Node::Cell(_) => Some(NodeKind::TableCell),
        }
    }

    pub fn attributes(&self) -> Attributes {
        let text = |v: &str| AttrValue::Text(v.to_string());
        match self {
            Node::Inline(Inline::InlineEquation(eq)) => {
                Attributes::new().with("formula", text(&eq.formula))
            }
            Node::Block(Block::BlockEquation(eq)) => {
                Attributes::new().with("formula", text(&eq.formula))
            }
            Node::Block(Block::CodeBlock(code)) => Attributes::new()
                .with("language", text(code.language.as_deref().unwrap_or("")))
                .with("content", text(&code.content)),
            Node::Block(Block::Embed(embed)) => Attributes::new().with("text", text(&embed.text)),
            Node::Inline(Inline::Vocabulary(vocab)) => Attributes::new()
                .with("term", text(&vocab.term))
                .with("definition", text(&vocab.definition)),
            Node::Inline(Inline::ChemicalStructure(chem)) => Attributes::new()
                .with("smiles", text(&chem.smiles))
                .with("label", text(&chem.label)),
            Node::Block(Block::Question(q)) => Attributes::new()
                .with("options", AttrValue::Options(q.options.clone()))
                .with("correctOption", AttrValue::Optional(q.correct_option.clone())),
            Node::Cell(cell) => Attributes::new()
                .with("colspan", AttrValue::Count(cell.colspan))
                .with("rowspan", AttrValue::Count(cell.rowspan))
                .with("header", AttrValue::Flag(cell.header)),
            _ => Attributes::new(),
        }
    }

    /// Update one attribute in place. The node keeps its kind and children.
    pub fn set_attribute(&mut self, name: &str, value: AttrValue) -> Result<(), AttributeError> {
        let kind = self.kind().ok_or(AttributeError::NotCustom)?;
        if !kind.attribute_names().contains(&name) {
            return Err(AttributeError::Unknown {
                kind,
                name: name.to_string(),
            });
        }
        let mismatch = |value: &AttrValue| AttributeError::TypeMismatch {
            kind,
            name: name.to_string(),
            found: value.type_name(),
        };

        match (self, name, value) {
            (Node::Inline(Inline::InlineEquation(eq)), _, AttrValue::Text(v)) => eq.formula = v,
            (Node::Block(Block::BlockEquation(eq)), _, AttrValue::Text(v)) => eq.formula = v,
            (Node::Block(Block::CodeBlock(code)), "language", AttrValue::Text(v)) => {
                code.language = Some(v).filter(|l| !l.is_empty())
            }
            (Node::Block(Block::CodeBlock(code)), _, AttrValue::Text(v)) => code.content = v,
            (Node::Block(Block::Embed(embed)), _, AttrValue::Text(v)) => embed.text = v,
            (Node::Inline(Inline::Vocabulary(vocab)), "term", AttrValue::Text(v)) => {
                vocab.term = v
            }
            (Node::Inline(Inline::Vocabulary(vocab)), _, AttrValue::Text(v)) => {
                vocab.definition = v
            }
            (Node::Inline(Inline::ChemicalStructure(chem)), "smiles", AttrValue::Text(v)) => {
                chem.smiles = v
            }
            (Node::Inline(Inline::ChemicalStructure(chem)), _, AttrValue::Text(v)) => {
                chem.label = v
            }
            (Node::Block(Block::Question(q)), "options", AttrValue::Options(v)) => {
                q.set_options(v)
            }
            (Node::Block(Block::Question(q)), "correctOption", AttrValue::Optional(v)) => {
                q.correct_option = v
            }
            (Node::Cell(cell), "colspan", AttrValue::Count(v)) => cell.colspan = v.max(1),
            (Node::Cell(cell), "rowspan", AttrValue::Count(v)) => cell.rowspan = v.max(1),
            (Node::Cell(cell), "header", AttrValue::Flag(v)) => cell.header = v,
            (_, _, other) => return Err(mismatch(&other)),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_then_attributes_round_trip() {
        let attrs = Attributes::new()
            .with("term", AttrValue::Text("mitosis".to_string()))
            .with("definition", AttrValue::Text("cell division".to_string()));
        let node = NodeKind::Vocabulary.create(&attrs);
        assert_eq!(node.kind(), Some(NodeKind::Vocabulary));
        assert_eq!(node.attributes(), attrs);
    }

    #[test]
    fn test_create_defaults() {
        let node = NodeKind::CodeBlock.create(&Attributes::new());
        assert_eq!(
            node,
            Node::Block(Block::CodeBlock(CodeBlock {
                language: None,
                content: String::new(),
            }))
        );

        let cell = NodeKind::TableCell.create(&Attributes::new());
        assert_eq!(cell, Node::Cell(TableCell::default()));
    }

    #[test]
    fn test_chemical_label_defaults_to_smiles() {
        let attrs = Attributes::new().with("smiles", AttrValue::Text("CCO".to_string()));
        let node = NodeKind::ChemicalStructure.create(&attrs);
        assert_eq!(
            node.attributes().text("label"),
            Some("CCO".to_string())
        );
    }

    #[test]
    fn test_set_attribute_keeps_kind() {
        let mut node = NodeKind::BlockEquation.create(&Attributes::new());
        node.set_attribute("formula", AttrValue::Text("E=mc^2".to_string()))
            .unwrap();
        assert_eq!(node.kind(), Some(NodeKind::BlockEquation));
        assert_eq!(node.attributes().text("formula"), Some("E=mc^2".to_string()));
    }

    #[test]
    fn test_set_attribute_rejects_unknown_name() {
        let mut node = NodeKind::Embed.create(&Attributes::new());
        let err = node
            .set_attribute("formula", AttrValue::Text("x".to_string()))
            .unwrap_err();
        assert_eq!(
            err,
            AttributeError::Unknown {
                kind: NodeKind::Embed,
                name: "formula".to_string()
            }
        );
    }

    #[test]
    fn test_set_attribute_rejects_wrong_shape() {
        let mut node = NodeKind::Question.create(&Attributes::new());
        let err = node
            .set_attribute("options", AttrValue::Text("a | b".to_string()))
            .unwrap_err();
        assert!(matches!(err, AttributeError::TypeMismatch { .. }));
    }

    #[test]
    fn test_generic_nodes_have_no_kind() {
        let mut node = Node::Block(Block::ThematicBreak);
        assert_eq!(node.kind(), None);
        assert_eq!(
            node.set_attribute("formula", AttrValue::Text("x".to_string())),
            Err(AttributeError::NotCustom)
        );
    }

    #[test]
    fn test_kind_names_round_trip() {
        for kind in NodeKind::ALL {
            assert_eq!(NodeKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(NodeKind::from_name("paragraph"), None);
    }
}
