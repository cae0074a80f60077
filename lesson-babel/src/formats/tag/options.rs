//! JSON encoding of question options for the `data-options` and
//! `data-correct-option` attributes.
//!
//! Each option is a paragraph object:
//! `{"type":"paragraph","content":[{"type":"text","text":"..."}]}`.
//! Malformed input never fails a parse: it degrades to an empty list or an
//! unset answer and is logged.

use crate::error::FormatError;
use crate::ir::nodes::Paragraph;
use log::warn;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct OptionNode {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    content: Vec<TextNode>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TextNode {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

impl From<&Paragraph> for OptionNode {
    fn from(paragraph: &Paragraph) -> Self {
        let text = paragraph.plain_text();
        let content = if text.is_empty() {
            vec![]
        } else {
            vec![TextNode {
                kind: "text".to_string(),
                text,
            }]
        };
        OptionNode {
            kind: "paragraph".to_string(),
            content,
        }
    }
}

impl From<OptionNode> for Paragraph {
    fn from(node: OptionNode) -> Self {
        let text: String = node.content.into_iter().map(|t| t.text).collect();
        Paragraph::from_text(text)
    }
}

pub fn encode_options(options: &[Paragraph]) -> Result<String, FormatError> {
    let nodes: Vec<OptionNode> = options.iter().map(OptionNode::from).collect();
    serde_json::to_string(&nodes)
        .map_err(|e| FormatError::SerializationError(format!("Invalid options: {e}")))
}

pub fn encode_correct_option(option: &Paragraph) -> Result<String, FormatError> {
    serde_json::to_string(&OptionNode::from(option))
        .map_err(|e| FormatError::SerializationError(format!("Invalid correct option: {e}")))
}

pub fn decode_options(raw: Option<&str>) -> Vec<Paragraph> {
    let Some(raw) = raw.filter(|raw| !raw.trim().is_empty()) else {
        return vec![];
    };
    match serde_json::from_str::<Vec<OptionNode>>(raw) {
        Ok(nodes) => nodes.into_iter().map(Paragraph::from).collect(),
        Err(e) => {
            warn!("ignoring malformed data-options {raw:?}: {e}");
            vec![]
        }
    }
}

pub fn decode_correct_option(raw: Option<&str>) -> Option<Paragraph> {
    let raw = raw.map(str::trim).filter(|raw| !raw.is_empty())?;
    match serde_json::from_str::<Option<OptionNode>>(raw) {
        Ok(node) => node.map(Paragraph::from),
        Err(e) => {
            warn!("ignoring malformed data-correct-option {raw:?}: {e}");
            None
        }
    }
}
