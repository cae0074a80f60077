//! Row, column, header and merge commands on [`Table`].
//!
//! Each command lays the table out as a grid, edits cell positions and spans
//! there, fills any slot left uncovered with an empty cell and writes the
//! rows back. Afterwards every row spans the full map width.

use super::map::{Grid, Placed};
use super::{empty_cell, CellRect, TableError};
use crate::ir::nodes::{Block, Table, TableCell, TableRow};

impl Table {
    /// A `rows × cols` table of empty cells, the first row as headers when
    /// `header_row` is set.
    pub fn new(rows: usize, cols: usize, header_row: bool) -> Table {
        let rows = (0..rows)
            .map(|r| TableRow {
                cells: (0..cols)
                    .map(|_| TableCell {
                        header: header_row && r == 0,
                        ..empty_cell()
                    })
                    .collect(),
            })
            .collect();
        Table { rows }
    }

    pub fn insert_row_before(&mut self, row: usize) -> Result<(), TableError> {
        self.check_row(row)?;
        self.insert_row(row);
        Ok(())
    }

    pub fn insert_row_after(&mut self, row: usize) -> Result<(), TableError> {
        self.check_row(row)?;
        self.insert_row(row + 1);
        Ok(())
    }

    pub fn insert_column_before(&mut self, col: usize) -> Result<(), TableError> {
        self.check_column(col)?;
        self.insert_column(col);
        Ok(())
    }

    pub fn insert_column_after(&mut self, col: usize) -> Result<(), TableError> {
        self.check_column(col)?;
        self.insert_column(col + 1);
        Ok(())
    }

    /// Cells anchored in the row go away unless they span further down, in
    /// which case they shrink and their anchor moves to the next row.
    pub fn delete_row(&mut self, row: usize) -> Result<(), TableError> {
        self.check_row(row)?;
        let mut grid = Grid::from_table(self);
        if grid.height == 1 {
            return Err(TableError::WouldBeEmpty);
        }
        grid.placed.retain_mut(|p| {
            if p.row == row {
                if p.cell.rowspan == 1 {
                    return false;
                }
                p.cell.rowspan -= 1;
            } else if p.row < row && row < p.row + p.cell.rowspan {
                p.cell.rowspan -= 1;
            } else if p.row > row {
                p.row -= 1;
            }
            true
        });
        grid.height -= 1;
        self.store(grid);
        Ok(())
    }

    pub fn delete_column(&mut self, col: usize) -> Result<(), TableError> {
        self.check_column(col)?;
        let mut grid = Grid::from_table(self);
        if grid.width == 1 {
            return Err(TableError::WouldBeEmpty);
        }
        grid.placed.retain_mut(|p| {
            if p.col == col {
                if p.cell.colspan == 1 {
                    return false;
                }
                p.cell.colspan -= 1;
            } else if p.col < col && col < p.col + p.cell.colspan {
                p.cell.colspan -= 1;
            } else if p.col > col {
                p.col -= 1;
            }
            true
        });
        grid.width -= 1;
        self.store(grid);
        Ok(())
    }

    /// Headers off if every cell anchored in the row is a header, on
    /// otherwise.
    pub fn toggle_header_row(&mut self, row: usize) -> Result<(), TableError> {
        self.check_row(row)?;
        self.toggle_headers(|p| p.row == row);
        Ok(())
    }

    pub fn toggle_header_column(&mut self, col: usize) -> Result<(), TableError> {
        self.check_column(col)?;
        self.toggle_headers(|p| p.col == col);
        Ok(())
    }

    pub fn toggle_header_cell(&mut self, row: usize, col: usize) -> Result<(), TableError> {
        let (r, index) = self.addressable(row, col)?;
        let cell = &mut self.rows[r].cells[index];
        cell.header = !cell.header;
        Ok(())
    }

    /// Merge every cell in `rect` into its top-left cell. Content of the
    /// merged cells is appended in reading order; empty cells add nothing.
    pub fn merge_cells(&mut self, rect: CellRect) -> Result<(), TableError> {
        let mut grid = Grid::from_table(self);
        if rect.bottom >= grid.height || rect.right >= grid.width {
            return Err(TableError::OutOfBounds {
                row: rect.bottom,
                col: rect.right,
            });
        }
        if rect.top > rect.bottom || rect.left > rect.right {
            return Err(TableError::InvalidRect);
        }
        if rect.top == rect.bottom && rect.left == rect.right {
            return Err(TableError::SingleCell);
        }
        grid.fill_missing(|_, _| false);

        let mut inside: Vec<Placed> = Vec::new();
        let mut outside: Vec<Placed> = Vec::new();
        for p in grid.placed.drain(..) {
            let overlaps = p.row <= rect.bottom
                && rect.top < p.row + p.cell.rowspan
                && p.col <= rect.right
                && rect.left < p.col + p.cell.colspan;
            if !overlaps {
                outside.push(p);
                continue;
            }
            let contained = p.row >= rect.top
                && p.row + p.cell.rowspan <= rect.bottom + 1
                && p.col >= rect.left
                && p.col + p.cell.colspan <= rect.right + 1;
            if !contained {
                return Err(TableError::CutsMergedCell);
            }
            inside.push(p);
        }

        inside.sort_by_key(|p| (p.row, p.col));
        let mut cells = inside.into_iter();
        let Some(mut anchor) = cells.next() else {
            return Err(TableError::InvalidRect);
        };
        if (anchor.row, anchor.col) != (rect.top, rect.left) {
            return Err(TableError::CutsMergedCell);
        }
        for other in cells {
            if !is_empty(&other.cell) {
                if is_empty(&anchor.cell) {
                    anchor.cell.content.clear();
                }
                anchor.cell.content.extend(other.cell.content);
            }
        }
        anchor.cell.rowspan = rect.bottom - rect.top + 1;
        anchor.cell.colspan = rect.right - rect.left + 1;
        outside.push(anchor);
        grid.placed = outside;
        self.store(grid);
        Ok(())
    }

    /// Undo a merge: the cell shrinks to one slot and the freed slots get
    /// empty cells of the same header kind.
    pub fn split_cell(&mut self, row: usize, col: usize) -> Result<(), TableError> {
        let (r, index) = self.addressable(row, col)?;
        let cell = &mut self.rows[r].cells[index];
        if cell.colspan == 1 && cell.rowspan == 1 {
            return Err(TableError::NotMerged { row, col });
        }
        let header = cell.header;
        cell.colspan = 1;
        cell.rowspan = 1;
        let mut grid = Grid::from_table(self);
        grid.fill_missing(|_, _| header);
        *self = grid.into_table();
        Ok(())
    }

    fn insert_row(&mut self, at: usize) {
        let mut grid = Grid::from_table(self);
        for p in &mut grid.placed {
            if p.row >= at {
                p.row += 1;
            } else if at < p.row + p.cell.rowspan {
                p.cell.rowspan += 1;
            }
        }
        grid.height += 1;
        self.store(grid);
    }

    fn insert_column(&mut self, at: usize) {
        let mut grid = Grid::from_table(self);
        for p in &mut grid.placed {
            if p.col >= at {
                p.col += 1;
            } else if at < p.col + p.cell.colspan {
                p.cell.colspan += 1;
            }
        }
        grid.width += 1;
        self.store(grid);
    }

    fn toggle_headers(&mut self, selected: impl Fn(&Placed) -> bool) {
        let mut grid = Grid::from_table(self);
        let all_headers = grid
            .placed
            .iter()
            .filter(|p| selected(p))
            .all(|p| p.cell.header);
        for p in grid.placed.iter_mut().filter(|p| selected(p)) {
            p.cell.header = !all_headers;
        }
        self.store(grid);
    }

    /// Write a grid back, filling holes. New cells in a row or column where
    /// every other cell is a header become headers too.
    fn store(&mut self, mut grid: Grid) {
        let all_headers = |owners: Vec<usize>, grid: &Grid| {
            !owners.is_empty() && owners.iter().all(|&i| grid.placed[i].cell.header)
        };
        let header_columns: Vec<bool> = (0..grid.width)
            .map(|col| {
                let owners = (0..grid.height).filter_map(|row| grid.owner(row, col)).collect();
                all_headers(owners, &grid)
            })
            .collect();
        let header_rows: Vec<bool> = (0..grid.height)
            .map(|row| {
                let owners = (0..grid.width).filter_map(|col| grid.owner(row, col)).collect();
                all_headers(owners, &grid)
            })
            .collect();
        grid.fill_missing(|row, col| {
            header_rows.get(row).copied().unwrap_or(false)
                || header_columns.get(col).copied().unwrap_or(false)
        });
        *self = grid.into_table();
    }

    fn check_row(&self, row: usize) -> Result<(), TableError> {
        if row < self.rows.len() {
            Ok(())
        } else {
            Err(TableError::OutOfBounds { row, col: 0 })
        }
    }

    fn check_column(&self, col: usize) -> Result<(), TableError> {
        let width = Grid::from_table(self).width;
        if col < width {
            Ok(())
        } else {
            Err(TableError::OutOfBounds { row: 0, col })
        }
    }

    fn addressable(&self, row: usize, col: usize) -> Result<(usize, usize), TableError> {
        let map = self.map();
        match map.slot(row, col) {
            None => Err(TableError::OutOfBounds { row, col }),
            Some(_) => map.cell_at(row, col).ok_or(TableError::Covered { row, col }),
        }
    }
}

fn is_empty(cell: &TableCell) -> bool {
    cell.content.iter().all(|block| match block {
        Block::Paragraph(p) => p.content.is_empty(),
        _ => false,
    })
}
