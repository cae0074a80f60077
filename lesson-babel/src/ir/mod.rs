//! Intermediate Representation (IR) for lesson documents.
//!
//! `nodes` holds the nested tree every format converts to and from,
//! `tokens` the flat stream the grammar rules emit, and `custom` the
//! kind/attribute view hosts use to create and edit lesson constructs.

pub mod custom;
pub mod nodes;
pub mod tokens;
