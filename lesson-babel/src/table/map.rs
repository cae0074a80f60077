//! Grid view of a table.
//!
//! Rows store only the cells anchored in them; a cell with `colspan` or
//! `rowspan` covers further slots. [`TableMap`] resolves that into a
//! `width × height` grid where every slot is an anchor cell, a slot covered
//! by a merged cell, or missing.

use super::MAX_COLSPAN;
use crate::ir::nodes::{Table, TableCell};

/// One grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Top-left slot of `table.rows[row].cells[index]`.
    Cell { row: usize, index: usize },
    /// Covered by the cell anchored at `(row, col)`.
    Merged { row: usize, col: usize },
    /// No cell reaches this slot.
    Missing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableMap {
    width: usize,
    height: usize,
    slots: Vec<Slot>,
}

impl TableMap {
    pub fn new(table: &Table) -> Self {
        Grid::from_table(table).map()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn slot(&self, row: usize, col: usize) -> Option<Slot> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.slots.get(row * self.width + col).copied()
    }

    /// The cell anchored at a slot, as `(row, index)` into `table.rows`.
    /// Slots covered by a merged cell are not addressable.
    pub fn cell_at(&self, row: usize, col: usize) -> Option<(usize, usize)> {
        match self.slot(row, col)? {
            Slot::Cell { row, index } => Some((row, index)),
            _ => None,
        }
    }

    /// Slots of a row that some cell reaches.
    pub fn filled_in_row(&self, row: usize) -> usize {
        (0..self.width)
            .filter(|&col| !matches!(self.slot(row, col), Some(Slot::Missing) | None))
            .count()
    }

    /// Every slot is reached by a cell.
    pub fn is_complete(&self) -> bool {
        !self.slots.contains(&Slot::Missing)
    }
}

/// A cell with its grid position. The cell's spans are authoritative.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Placed {
    pub row: usize,
    pub col: usize,
    pub cell: TableCell,
    /// Where the cell sat in the rows it was read from.
    pub source: (usize, usize),
}

impl Placed {
    pub fn covers(&self, row: usize, col: usize) -> bool {
        (self.row..self.row + self.cell.rowspan).contains(&row)
            && (self.col..self.col + self.cell.colspan).contains(&col)
    }
}

/// Working form for table operations.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Grid {
    pub width: usize,
    pub height: usize,
    pub placed: Vec<Placed>,
}

impl Grid {
    /// Lay cells out row by row, skipping slots already covered from above.
    /// Row spans are clamped to the table's height, column spans to
    /// [`MAX_COLSPAN`].
    pub fn from_table(table: &Table) -> Grid {
        let height = table.rows.len();
        let mut occupied: Vec<Vec<bool>> = vec![Vec::new(); height];
        let mut placed = Vec::new();

        for (r, row) in table.rows.iter().enumerate() {
            let mut col = 0;
            for (index, cell) in row.cells.iter().enumerate() {
                while occupied[r].get(col).copied().unwrap_or(false) {
                    col += 1;
                }
                let mut cell = cell.clone();
                cell.colspan = cell.colspan.clamp(1, MAX_COLSPAN);
                cell.rowspan = cell.rowspan.clamp(1, height - r);
                for line in occupied.iter_mut().skip(r).take(cell.rowspan) {
                    if line.len() < col + cell.colspan {
                        line.resize(col + cell.colspan, false);
                    }
                    line[col..col + cell.colspan].fill(true);
                }
                let colspan = cell.colspan;
                placed.push(Placed {
                    row: r,
                    col,
                    cell,
                    source: (r, index),
                });
                col = col.saturating_add(colspan);
            }
        }

        let width = occupied.iter().map(Vec::len).max().unwrap_or(0);
        Grid {
            width,
            height,
            placed,
        }
    }

    pub fn map(&self) -> TableMap {
        let mut slots = vec![Slot::Missing; self.width * self.height];
        for p in &self.placed {
            for row in p.row..(p.row + p.cell.rowspan).min(self.height) {
                for col in p.col..(p.col + p.cell.colspan).min(self.width) {
                    let slot = &mut slots[row * self.width + col];
                    if *slot != Slot::Missing {
                        continue;
                    }
                    *slot = if (row, col) == (p.row, p.col) {
                        Slot::Cell {
                            row: p.source.0,
                            index: p.source.1,
                        }
                    } else {
                        Slot::Merged {
                            row: p.row,
                            col: p.col,
                        }
                    };
                }
            }
        }
        TableMap {
            width: self.width,
            height: self.height,
            slots,
        }
    }

    /// Index into `placed` of the cell covering a slot.
    pub fn owner(&self, row: usize, col: usize) -> Option<usize> {
        self.placed.iter().position(|p| p.covers(row, col))
    }

    /// Put an empty cell in every slot no cell reaches.
    pub fn fill_missing(&mut self, header: impl Fn(usize, usize) -> bool) {
        for row in 0..self.height {
            for col in 0..self.width {
                if self.owner(row, col).is_none() {
                    let cell = TableCell {
                        header: header(row, col),
                        ..super::empty_cell()
                    };
                    self.placed.push(Placed {
                        row,
                        col,
                        cell,
                        source: (row, 0),
                    });
                }
            }
        }
    }

    pub fn into_table(mut self) -> Table {
        self.placed.sort_by_key(|p| (p.row, p.col));
        let mut rows = vec![crate::ir::nodes::TableRow::default(); self.height];
        for p in self.placed {
            if let Some(row) = rows.get_mut(p.row) {
                row.cells.push(p.cell);
            }
        }
        Table { rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::nodes::TableRow;

    fn cell(colspan: usize, rowspan: usize) -> TableCell {
        TableCell {
            colspan,
            rowspan,
            ..TableCell::default()
        }
    }

    fn table(rows: Vec<Vec<TableCell>>) -> Table {
        Table {
            rows: rows.into_iter().map(|cells| TableRow { cells }).collect(),
        }
    }

    #[test]
    fn test_plain_grid() {
        let map = TableMap::new(&table(vec![
            vec![cell(1, 1), cell(1, 1)],
            vec![cell(1, 1), cell(1, 1)],
        ]));
        assert_eq!((map.width(), map.height()), (2, 2));
        assert_eq!(map.cell_at(1, 1), Some((1, 1)));
        assert!(map.is_complete());
    }

    #[test]
    fn test_spans_cover_slots() {
        // ┌───────┬───┐
        // │ 0,0   │0,1│
        // │       ├───┤
        // │       │1,0│
        // └───────┴───┘
        let map = TableMap::new(&table(vec![
            vec![cell(2, 2), cell(1, 1)],
            vec![cell(1, 1)],
        ]));
        assert_eq!(map.width(), 3);
        assert_eq!(map.slot(0, 1), Some(Slot::Merged { row: 0, col: 0 }));
        assert_eq!(map.slot(1, 1), Some(Slot::Merged { row: 0, col: 0 }));
        assert_eq!(map.cell_at(1, 2), Some((1, 0)));
        assert_eq!(map.cell_at(1, 0), None);
    }

    #[test]
    fn test_ragged_rows_leave_missing_slots() {
        let map = TableMap::new(&table(vec![vec![cell(1, 1), cell(1, 1)], vec![cell(1, 1)]]));
        assert_eq!(map.slot(1, 1), Some(Slot::Missing));
        assert_eq!(map.filled_in_row(1), 1);
        assert!(!map.is_complete());
    }

    #[test]
    fn test_rowspan_clamped_to_height() {
        let grid = Grid::from_table(&table(vec![vec![cell(1, 5)]]));
        assert_eq!(grid.placed[0].cell.rowspan, 1);
    }

    #[test]
    fn test_colspan_clamped() {
        let grid = Grid::from_table(&table(vec![
            vec![cell(usize::MAX, 1), cell(1, 1)],
            vec![cell(0, 1)],
        ]));
        assert_eq!(grid.placed[0].cell.colspan, MAX_COLSPAN);
        assert_eq!(grid.placed[1].col, MAX_COLSPAN);
        assert_eq!(grid.placed[2].cell.colspan, 1);
        assert_eq!(grid.width, MAX_COLSPAN + 1);
    }

    #[test]
    fn test_out_of_range_slot() {
        let map = TableMap::new(&table(vec![vec![cell(1, 1)]]));
        assert_eq!(map.slot(0, 1), None);
        assert_eq!(map.slot(1, 0), None);
    }
}
