//! Converts the flat token stream into the nested document tree.
//!
//! # The Algorithm
//!
//! The stack holds the containers that are currently open. Finished
//! top-level blocks go to the document root.
//!
//! 1. An `*Open` token pushes a new, empty container.
//! 2. A leaf token (text, equation, code block, table, ...) is added to the
//!    container on top of the stack, or to the root when nothing is open.
//!    Adjacent text runs are merged.
//! 3. A `*Close` token pops the top container, checks it is the kind being
//!    closed, and adds the finished node to its parent.
//! 4. At the end the stack must be empty.
//!
//! Question bodies, list items and quotes arrive already flattened by the
//! recursive block rules, so nesting of any depth is rebuilt the same way.

use crate::ir::nodes::*;
use crate::ir::tokens::Token;

/// Error type for token-to-tree conversion
#[derive(Debug, Clone, PartialEq)]
pub enum BuildError {
    /// A close token arrived with nothing open
    UnexpectedClose(String),
    /// Close token does not match the open container
    MismatchedClose { expected: String, found: String },
    /// A node was added to a container that cannot hold it
    Misplaced { node: String, container: String },
    /// Containers still open at the end of the stream
    UnclosedContainers(usize),
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::UnexpectedClose(token) => write!(f, "Unexpected close token: {token}"),
            BuildError::MismatchedClose { expected, found } => {
                write!(f, "Mismatched close: expected {expected}, found {found}")
            }
            BuildError::Misplaced { node, container } => {
                write!(f, "{node} cannot be placed inside {container}")
            }
            BuildError::UnclosedContainers(count) => {
                write!(f, "Unclosed containers: {count} nodes remain on stack")
            }
        }
    }
}

impl std::error::Error for BuildError {}

/// A node being built on the stack
#[derive(Debug)]
enum StackNode {
    Paragraph(Vec<Inline>),
    Heading {
        level: usize,
        content: Vec<Inline>,
    },
    List {
        ordered: bool,
        items: Vec<ListItem>,
    },
    ListItem(Vec<Block>),
    Blockquote(Vec<Block>),
    Question {
        options: Vec<String>,
        correct: Option<usize>,
        children: Vec<Block>,
    },
    Strong(Vec<Inline>),
    Emphasis(Vec<Inline>),
}

/// What a finished container turns into
enum Built {
    Block(Block),
    Item(ListItem),
    Inline(Inline),
}

impl Built {
    fn type_name(&self) -> &'static str {
        match self {
            Built::Block(_) => "Block",
            Built::Item(_) => "ListItem",
            Built::Inline(_) => "Inline",
        }
    }
}

impl StackNode {
    fn type_name(&self) -> &'static str {
        match self {
            StackNode::Paragraph(_) => "Paragraph",
            StackNode::Heading { .. } => "Heading",
            StackNode::List { .. } => "List",
            StackNode::ListItem(_) => "ListItem",
            StackNode::Blockquote(_) => "Blockquote",
            StackNode::Question { .. } => "Question",
            StackNode::Strong(_) => "Strong",
            StackNode::Emphasis(_) => "Emphasis",
        }
    }

    fn finish(self) -> Built {
        match self {
            StackNode::Blockquote(children) => {
                Built::Block(Block::Blockquote(Blockquote { children }))
            }
            StackNode::Paragraph(content) => Built::Block(Block::Paragraph(Paragraph { content })),
            StackNode::Heading { level, content } => {
                Built::Block(Block::Heading(Heading { level, content }))
            }
            StackNode::List { ordered, items } => Built::Block(Block::List(List { ordered, items })),
            StackNode::ListItem(children) => Built::Item(ListItem { children }),
            StackNode::Question {
                options,
                correct,
                children,
            } => {
                let options: Vec<Paragraph> = options.into_iter().map(Paragraph::from_text).collect();
                let correct_option = correct.and_then(|i| options.get(i).cloned());
                Built::Block(Block::Question(Question {
                    options,
                    correct_option,
                    children,
                }))
            }
            StackNode::Strong(children) => Built::Inline(Inline::Strong(children)),
            StackNode::Emphasis(children) => Built::Inline(Inline::Emphasis(children)),
        }
    }

    fn add(&mut self, built: Built) -> Result<(), BuildError> {
        match (self, built) {
            (
                StackNode::ListItem(children)
                | StackNode::Blockquote(children)
                | StackNode::Question { children, .. },
                Built::Block(block),
            ) => {
                children.push(block);
                Ok(())
            }
            (StackNode::List { items, .. }, Built::Item(item)) => {
                items.push(item);
                Ok(())
            }
            (
                StackNode::Paragraph(content)
                | StackNode::Heading { content, .. }
                | StackNode::Strong(content)
                | StackNode::Emphasis(content),
                Built::Inline(inline),
            ) => {
                push_inline(content, inline);
                Ok(())
            }
            (container, built) => Err(BuildError::Misplaced {
                node: built.type_name().to_string(),
                container: container.type_name().to_string(),
            }),
        }
    }
}

/// Append an inline, merging it into a preceding text run.
fn push_inline(content: &mut Vec<Inline>, inline: Inline) {
    if let Inline::Text(text) = &inline {
        if text.is_empty() {
            return;
        }
        if let Some(Inline::Text(last)) = content.last_mut() {
            last.push_str(text);
            return;
        }
    }
    content.push(inline);
}

#[derive(Default)]
struct Builder {
    root: Vec<Block>,
    stack: Vec<StackNode>,
}

impl Builder {
    fn open(&mut self, node: StackNode) {
        self.stack.push(node);
    }

    fn add(&mut self, built: Built) -> Result<(), BuildError> {
        match (self.stack.last_mut(), built) {
            (Some(top), built) => top.add(built),
            (None, Built::Block(block)) => {
                self.root.push(block);
                Ok(())
            }
            (None, other) => Err(BuildError::Misplaced {
                node: other.type_name().to_string(),
                container: "Document".to_string(),
            }),
        }
    }

    fn close(&mut self, token: &Token, expected: &str) -> Result<(), BuildError> {
        let node = self
            .stack
            .pop()
            .ok_or_else(|| BuildError::UnexpectedClose(token.name().to_string()))?;
        if node.type_name() != expected {
            return Err(BuildError::MismatchedClose {
                expected: node.type_name().to_string(),
                found: token.name().to_string(),
            });
        }
        self.add(node.finish())
    }

    fn finish(self) -> Result<Document, BuildError> {
        if !self.stack.is_empty() {
            return Err(BuildError::UnclosedContainers(self.stack.len()));
        }
        Ok(Document {
            children: self.root,
        })
    }
}

/// Converts a flat token stream into a document.
///
/// # Example
///
/// ```ignore
/// let tokens = vec![
///     Token::ParagraphOpen,
///     Token::text("Hello"),
///     Token::ParagraphClose,
/// ];
///
/// let doc = tokens_to_tree(&tokens)?;
/// assert_eq!(doc.children.len(), 1);
/// ```
pub fn tokens_to_tree(tokens: &[Token]) -> Result<Document, BuildError> {
    let mut builder = Builder::default();

    for token in tokens {
        match token {
            Token::ParagraphOpen => builder.open(StackNode::Paragraph(Vec::new())),
            Token::HeadingOpen { level } => builder.open(StackNode::Heading {
                level: *level,
                content: Vec::new(),
            }),
            Token::ListOpen { ordered } => builder.open(StackNode::List {
                ordered: *ordered,
                items: Vec::new(),
            }),
            Token::ListItemOpen => builder.open(StackNode::ListItem(Vec::new())),
            Token::BlockquoteOpen => builder.open(StackNode::Blockquote(Vec::new())),
            Token::QuestionOpen { options, correct } => builder.open(StackNode::Question {
                options: options.clone(),
                correct: *correct,
                children: Vec::new(),
            }),
            Token::StrongOpen => builder.open(StackNode::Strong(Vec::new())),
            Token::EmphasisOpen => builder.open(StackNode::Emphasis(Vec::new())),

            Token::ParagraphClose => builder.close(token, "Paragraph")?,
            Token::HeadingClose => builder.close(token, "Heading")?,
            Token::ListClose => builder.close(token, "List")?,
            Token::ListItemClose => builder.close(token, "ListItem")?,
            Token::BlockquoteClose => builder.close(token, "Blockquote")?,
            Token::QuestionClose => builder.close(token, "Question")?,
            Token::StrongClose => builder.close(token, "Strong")?,
            Token::EmphasisClose => builder.close(token, "Emphasis")?,

            Token::ThematicBreak => builder.add(Built::Block(Block::ThematicBreak))?,
            Token::CodeBlock { language, content } => builder.add(
                Built::Block(Block::CodeBlock(CodeBlock {
                    language: language.clone(),
                    content: content.clone(),
                })),
            )?,
            Token::BlockEquation { formula } => builder.add(
                Built::Block(Block::BlockEquation(BlockEquation {
                    formula: formula.clone(),
                })),
            )?,
            Token::Embed { text } => builder.add(
                Built::Block(Block::Embed(Embed { text: text.clone() })),
            )?,
            Token::Table { table } => {
                builder.add(Built::Block(Block::Table(table.clone())))?
            }
            Token::Text { text } => builder.add(Built::Inline(Inline::Text(text.clone())))?,
            Token::Code { code } => builder.add(Built::Inline(Inline::Code(code.clone())))?,
            Token::InlineEquation { formula } => builder.add(
                Built::Inline(Inline::InlineEquation(InlineEquation {
                    formula: formula.clone(),
                })),
            )?,
            Token::Vocabulary { term, definition } => builder.add(
                Built::Inline(Inline::Vocabulary(Vocabulary {
                    term: term.clone(),
                    definition: definition.clone(),
                })),
            )?,
            Token::ChemicalStructure { smiles, label } => builder.add(
                Built::Inline(Inline::ChemicalStructure(ChemicalStructure {
                    smiles: smiles.clone(),
                    label: label.clone(),
                })),
            )?,
        }
    }

    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stream() {
        assert_eq!(tokens_to_tree(&[]).unwrap(), Document::default());
    }

    #[test]
    fn test_paragraph_merges_text_runs() {
        let doc = tokens_to_tree(&[
            Token::ParagraphOpen,
            Token::text("Hello"),
            Token::text(", "),
            Token::text("world"),
            Token::ParagraphClose,
        ])
        .unwrap();
        assert_eq!(
            doc.children,
            vec![Block::Paragraph(Paragraph::from_text("Hello, world"))]
        );
    }

    #[test]
    fn test_question_resolves_correct_option() {
        let doc = tokens_to_tree(&[
            Token::QuestionOpen {
                options: vec!["a".to_string(), "b".to_string()],
                correct: Some(1),
            },
            Token::ParagraphOpen,
            Token::text("Pick"),
            Token::ParagraphClose,
            Token::QuestionClose,
        ])
        .unwrap();
        let Block::Question(question) = &doc.children[0] else {
            panic!("expected question");
        };
        assert_eq!(question.correct_option, Some(Paragraph::from_text("b")));
        assert_eq!(question.children.len(), 1);
    }

    #[test]
    fn test_nested_list_in_question() {
        let doc = tokens_to_tree(&[
            Token::QuestionOpen {
                options: vec![],
                correct: None,
            },
            Token::ListOpen { ordered: true },
            Token::ListItemOpen,
            Token::ParagraphOpen,
            Token::text("step"),
            Token::ParagraphClose,
            Token::ListItemClose,
            Token::ListClose,
            Token::QuestionClose,
        ])
        .unwrap();
        let Block::Question(question) = &doc.children[0] else {
            panic!("expected question");
        };
        assert!(matches!(question.children[0], Block::List(List { ordered: true, .. })));
    }

    #[test]
    fn test_mismatched_close() {
        let err = tokens_to_tree(&[Token::ParagraphOpen, Token::HeadingClose]).unwrap_err();
        assert_eq!(
            err,
            BuildError::MismatchedClose {
                expected: "Paragraph".to_string(),
                found: "heading_close".to_string()
            }
        );
    }

    #[test]
    fn test_unclosed_container() {
        let err = tokens_to_tree(&[Token::BlockquoteOpen]).unwrap_err();
        assert_eq!(err, BuildError::UnclosedContainers(1));
    }

    #[test]
    fn test_close_without_open() {
        let err = tokens_to_tree(&[Token::ParagraphClose]).unwrap_err();
        assert_eq!(
            err,
            BuildError::UnexpectedClose("paragraph_close".to_string())
        );
    }

    #[test]
    fn test_inline_outside_paragraph_is_misplaced() {
        let err = tokens_to_tree(&[Token::text("loose")]).unwrap_err();
        assert!(matches!(err, BuildError::Misplaced { .. }));
    }
}
