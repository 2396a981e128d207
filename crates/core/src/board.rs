//! Board module - manages the game grid
//!
//! The board is a `rows x cols` grid where each cell is empty or locked with
//! the piece kind that filled it. Uses a flat row-major vector sized once at
//! construction; dimensions never change afterwards.
//! Coordinates: (row, col) where row 0 is the top and col 0 is the left edge.

use crate::error::EngineError;
use crate::shapes::shape_cells;
use crate::types::{Cell, PieceKind};

/// The game board using flat storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: u32,
    cols: u32,
    /// Flat vector of cells, row-major order (row * cols + col)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(rows: u32, cols: u32) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::Empty; rows as usize * cols as usize],
        }
    }

    /// Calculate flat index from (row, col) coordinates
    #[inline(always)]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if !self.in_bounds(row, col) {
            return None;
        }
        Some(row as usize * self.cols as usize + col as usize)
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// True iff `0 <= row < rows` and `0 <= col < cols`
    #[inline]
    pub fn in_bounds(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as i64) < self.rows as i64 && (col as i64) < self.cols as i64
    }

    /// True iff the position is in bounds and empty
    ///
    /// Rows above the top edge are out of bounds like any other, so a piece
    /// poking above row 0 never fits.
    #[inline]
    pub fn is_cell_free(&self, row: i32, col: i32) -> bool {
        matches!(self.get(row, col), Some(Cell::Empty))
    }

    /// Get cell at position (row, col)
    /// Returns None if out of bounds
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at position (row, col)
    /// Returns false if out of bounds
    pub fn set(&mut self, row: i32, col: i32, cell: Cell) -> bool {
        match self.index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check whether a piece fits at `anchor` (top-left of its bounding box)
    pub fn can_place(&self, kind: PieceKind, rotation_index: usize, anchor: (i32, i32)) -> bool {
        self.first_blocked(kind, rotation_index, anchor).is_none()
    }

    /// First cell of the placement that is out of bounds or occupied
    fn first_blocked(
        &self,
        kind: PieceKind,
        rotation_index: usize,
        (row, col): (i32, i32),
    ) -> Option<(i32, i32)> {
        shape_cells(kind, rotation_index)
            .iter()
            .map(|&(dr, dc)| (row + dr, col + dc))
            .find(|&(r, c)| !self.is_cell_free(r, c))
    }

    /// Lock a piece onto the board
    ///
    /// The placement must satisfy [`Board::can_place`]. Otherwise nothing is
    /// written and [`EngineError::InvariantViolation`] names the first
    /// offending cell.
    pub fn lock(
        &mut self,
        kind: PieceKind,
        rotation_index: usize,
        anchor: (i32, i32),
    ) -> Result<(), EngineError> {
        if let Some((row, col)) = self.first_blocked(kind, rotation_index, anchor) {
            return Err(EngineError::InvariantViolation { row, col });
        }

        for (dr, dc) in shape_cells(kind, rotation_index) {
            self.set(anchor.0 + dr, anchor.1 + dc, Cell::Locked(kind));
        }
        Ok(())
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= self.rows as usize || self.cols == 0 {
            return false;
        }
        self.row(row).iter().all(Cell::is_locked)
    }

    /// Clear all full rows and return how many were removed
    ///
    /// Full rows are detected in one pass before anything moves: remaining
    /// rows are compacted toward the bottom with a write pointer, keeping
    /// their relative order, and the vacated rows at the top become empty.
    pub fn clear_full_rows(&mut self) -> u32 {
        let width = self.cols as usize;
        let height = self.rows as usize;
        let mut write_row = height;
        let mut cleared = 0u32;

        // Scan from bottom to top
        for read_row in (0..height).rev() {
            if self.is_row_full(read_row) {
                cleared += 1;
            } else {
                write_row -= 1;
                if write_row != read_row {
                    let src = read_row * width;
                    self.cells.copy_within(src..src + width, write_row * width);
                }
            }
        }

        // Clear the remaining rows at the top
        self.cells[..write_row * width].fill(Cell::Empty);

        cleared
    }

    /// Indices of all full rows, top to bottom
    pub fn full_rows(&self) -> Vec<usize> {
        (0..self.rows as usize)
            .filter(|&row| self.is_row_full(row))
            .collect()
    }

    /// Borrow one row of cells
    ///
    /// Panics if `row >= rows`.
    pub fn row(&self, row: usize) -> &[Cell] {
        let width = self.cols as usize;
        &self.cells[row * width..(row + 1) * width]
    }

    /// Iterate over rows, top to bottom
    pub fn iter_rows(&self) -> impl ExactSizeIterator<Item = &[Cell]> + '_ {
        // chunks_exact panics on a zero chunk size
        let width = (self.cols as usize).max(1);
        let rows = if self.cols == 0 { 0 } else { self.rows as usize };
        self.cells.chunks_exact(width).take(rows)
    }

    /// Get a reference to the flat cell storage
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of locked cells on the board
    pub fn locked_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_locked()).count()
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Write compact cell codes (see [`Cell::code`]) into `out`, row-major
    pub fn write_codes(&self, out: &mut Vec<u8>) {
        out.clear();
        out.extend(self.cells.iter().map(Cell::code));
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(crate::types::DEFAULT_ROWS, crate::types::DEFAULT_COLS)
    }
}
