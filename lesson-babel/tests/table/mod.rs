//! Table command tests
//!
//! Commands run on tables read from markdown, and the edited table is
//! written back and read again.

mod commands;
