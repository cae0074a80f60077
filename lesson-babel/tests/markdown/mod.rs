//! Markdown format tests
//!
//! Tests for lesson markdown ↔ tree conversion.

mod export;
mod import;
mod round_trip;
