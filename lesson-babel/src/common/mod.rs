//! Shared conversion machinery used by more than one format.

pub mod tree_builder;
