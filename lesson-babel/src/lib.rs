//! Lesson documents: custom markdown nodes and their conversions
//!
//! This crate reads and writes lesson material: markdown extended with equations, embeds,
//! vocabulary terms, chemical structures (SMILES), multiple-choice questions and tables, and
//! the tag markup a rich-text editor stores the same nodes as.
//!
//! This is a pure lib, that is, it powers the lesson CLI but is shell agnostic: no code
//! should suppose a shell environment, be it std print, env vars etc.
//!
//! Architecture
//!
//! Everything converts through one nested tree, the IR (./ir/nodes.rs). Markdown comes in
//! through a token grammar (./grammar) that emits a flat, balanced token stream, and the
//! tree builder (./common/tree_builder.rs) nests it. Going out, each format walks the tree.
//!
//! The file structure :
//! ```text
//! .
//! ├── error.rs
//! ├── format.rs               # Format trait definition
//! ├── registry.rs             # FormatRegistry for discovery and selection
//! ├── schema.rs               # Enabled node kinds, rule order, options
//! ├── grammar                 # Block and inline rules, cursors, tokenizer
//! ├── common                  # Token stream -> tree
//! ├── formats
//! │   ├── markdown            # Lesson markdown, both ways
//! │   ├── tag                 # Editor tag markup, both ways
//! │   └── json                # IR dump
//! ├── input                   # Live typing rules and backspace unwrap
//! ├── table                   # Grid map and row / column / merge operations
//! ├── templates               # Insertable snippets
//! ├── transforms.rs           # Normalize and fixed point checks
//! └── ir                      # Intermediate Representation
//! ```
//!
//! Testing
//! ```text
//! tests
//! ├── lib.rs
//! └── <area>
//!     ├── mod.rs
//!     └── <testname>.rs
//! ```
//!
//! Rust does not discover tests in subdirectories by default, so tests/lib.rs includes them.
//!
//! Schema
//!
//! Which custom kinds exist is decided by a [`Schema`]. Removing a kind removes its grammar
//! rule and its input rule together, so its delimiters read as plain prose, and the
//! [`SchemaOptions`] (default code language) flow into parsing, serializing and typing alike.
//!
//! Round trip
//!
//! Markdown written by the serializer parses back to the same tree, and serializing that tree
//! gives the same text: `serialize(parse(serialize(doc))) == serialize(doc)`. Inputs that are
//! not in that normal form (other list markers, extra blank lines) converge after one pass.
//! See [`transforms::check_fixed_point`].
//!
pub mod error;
pub mod format;
pub mod formats;
pub mod registry;
pub mod schema;
pub mod templates;
pub mod transforms;

pub mod common;
pub mod grammar;
pub mod input;
pub mod ir;
pub mod table;

pub use error::FormatError;
pub use format::{Format, SerializedDocument};
pub use input::{EditorHost, InputRules, ScratchEditor};
pub use ir::custom::{Node, NodeKind};
pub use ir::nodes::Document;
pub use registry::FormatRegistry;
pub use schema::{Schema, SchemaOptions};
pub use table::{TableError, TableMap};

/// Parse lesson markdown with the standard schema.
pub fn parse_markdown(source: &str) -> Result<Document, FormatError> {
    formats::markdown::parser::parse_from_markdown(source, &Schema::standard())
}

/// Serialize to lesson markdown with the standard schema.
pub fn to_markdown(doc: &Document) -> Result<String, FormatError> {
    transforms::serialize_to_markdown(doc, &Schema::standard())
}
