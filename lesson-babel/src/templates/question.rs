use super::TemplateSnippet;
use crate::error::FormatError;
use crate::formats::markdown::serializer::MarkdownSerializer;
use crate::ir::nodes::{Block, Paragraph, Question};
use crate::schema::SchemaOptions;

pub const QUESTION_PLACEHOLDER: &str = "Enter your question here...";
pub const FIRST_OPTION: &str = "Option A";

/// A question with a single correct option and a placeholder prompt.
pub fn question_template() -> Question {
    let option = Paragraph::from_text(FIRST_OPTION);
    Question {
        options: vec![option.clone()],
        correct_option: Some(option),
        children: vec![Block::Paragraph(Paragraph::from_text(QUESTION_PLACEHOLDER))],
    }
}

/// The template as markdown, caret on the placeholder.
pub fn build_question_snippet(options: &SchemaOptions) -> Result<TemplateSnippet, FormatError> {
    let text = MarkdownSerializer::new(options.clone()).question(&question_template())?;
    let cursor_offset = text.find(QUESTION_PLACEHOLDER).unwrap_or(0);
    Ok(TemplateSnippet {
        text,
        cursor_offset,
    })
}
