//! Format implementations: lesson markdown, render tags and JSON.

pub mod json;
pub mod markdown;
pub mod tag;

pub use json::JsonFormat;
pub use markdown::MarkdownFormat;
pub use tag::TagFormat;
