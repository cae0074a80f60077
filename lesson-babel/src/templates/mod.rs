//! Ready-to-insert lesson structures.
//!
//! Editors insert questions, tables and code blocks without reimplementing
//! the markdown syntax. Each builder returns the node and a snippet: the
//! markdown text plus the byte offset where the caret should land.
//!
//! # Available Templates
//!
//! - **Question** ([`question`]): one option `Option A`, marked correct, and
//!   a placeholder prompt.
//! - **Table** ([`table`]): an empty `rows × cols` grid, optionally with a
//!   header row.
//! - **Code** ([`code`]): a fenced block from a source file, with the
//!   language inferred from its extension.
//!
//! # Example
//!
//! ```ignore
//! use lesson_babel::templates::question::build_question_snippet;
//!
//! let snippet = build_question_snippet(&SchemaOptions::default())?;
//! // snippet.text == "::?\nOption A |\nA\nEnter your question here...\n::?"
//! ```

pub mod code;
pub mod question;
pub mod table;

pub use code::{build_code_snippet, CodeSnippetRequest};
pub use question::{build_question_snippet, question_template};
pub use table::{build_table_snippet, TableTemplate};

/// Markdown for a template and where the caret goes in it.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateSnippet {
    pub text: String,
    pub cursor_offset: usize,
}
