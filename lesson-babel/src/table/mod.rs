//! Table grid operations.
//!
//! A [`Table`] stores rows of cells with HTML-style spans. [`TableMap`]
//! resolves the spans into a rectangular grid, and the commands in this
//! module (insert and delete rows and columns, toggle headers, merge and
//! split) edit the table through that grid so spans stay consistent.

mod map;
mod ops;

pub use map::{Slot, TableMap};

/// Largest `colspan` kept; wider spans are clamped to it, as browsers do.
pub const MAX_COLSPAN: usize = 1000;
/// Largest `rowspan` kept.
pub const MAX_ROWSPAN: usize = 65534;

use crate::ir::nodes::{Block, Paragraph, Table, TableCell};
use std::fmt;

/// An inclusive rectangle of grid slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub top: usize,
    pub left: usize,
    pub bottom: usize,
    pub right: usize,
}

impl CellRect {
    pub fn new(top: usize, left: usize, bottom: usize, right: usize) -> Self {
        CellRect {
            top,
            left,
            bottom,
            right,
        }
    }
}

/// Errors from table commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// Coordinates outside the grid
    OutOfBounds { row: usize, col: usize },
    /// The slot is covered by another cell's span
    Covered { row: usize, col: usize },
    /// The rectangle cuts through a merged cell
    CutsMergedCell,
    /// Top/left past bottom/right
    InvalidRect,
    /// Merging needs at least two slots
    SingleCell,
    /// Splitting needs a cell that spans more than one slot
    NotMerged { row: usize, col: usize },
    /// The last row or column cannot be deleted
    WouldBeEmpty,
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::OutOfBounds { row, col } => {
                write!(f, "Cell ({row}, {col}) is outside the table")
            }
            TableError::Covered { row, col } => {
                write!(f, "Cell ({row}, {col}) is covered by a merged cell")
            }
            TableError::CutsMergedCell => write!(f, "Selection cuts through a merged cell"),
            TableError::InvalidRect => write!(f, "Selection is not a rectangle"),
            TableError::SingleCell => write!(f, "Select more than one cell to merge"),
            TableError::NotMerged { row, col } => {
                write!(f, "Cell ({row}, {col}) is not merged")
            }
            TableError::WouldBeEmpty => write!(f, "A table needs at least one row and column"),
        }
    }
}

impl std::error::Error for TableError {}

impl Table {
    pub fn map(&self) -> TableMap {
        TableMap::new(self)
    }
}

/// A cell holding one empty paragraph.
pub(crate) fn empty_cell() -> TableCell {
    TableCell::new(vec![Block::Paragraph(Paragraph::default())])
}
