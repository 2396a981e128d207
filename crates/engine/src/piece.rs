//! The falling piece
//!
//! An [`ActivePiece`] is plain data: a kind, a rotation index into the shape
//! catalog and the anchor (top-left of the bounding box) in board
//! coordinates. Collision decisions live in the engine and the board.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::core::shapes::{shape_cells, shape_extent, PieceShape};
use crate::types::PieceKind;

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation_index: usize,
    /// `(row, col)` of the bounding box's top-left corner
    pub anchor: (i32, i32),
}

impl ActivePiece {
    /// Spawn placement for `kind` on a board `cols` wide
    ///
    /// Rotation 0, bounding box centered horizontally (rounded left), topmost
    /// occupied cell on row 0.
    pub fn spawn(kind: PieceKind, cols: u32) -> Self {
        let (_, width) = shape_extent(kind, 0);
        let top = shape_cells(kind, 0)
            .iter()
            .map(|&(dr, _)| dr)
            .min()
            .unwrap_or(0);
        Self {
            kind,
            rotation_index: 0,
            anchor: (-top, (cols as i32 - width) / 2),
        }
    }

    /// Get the shape offsets for the current rotation
    pub fn shape(&self) -> PieceShape {
        shape_cells(self.kind, self.rotation_index)
    }

    /// Absolute board cells covered by this piece
    pub fn cells(&self) -> PieceShape {
        let (row, col) = self.anchor;
        self.shape().map(|(dr, dc)| (row + dr, col + dc))
    }

    /// Same piece with the anchor moved by `(delta_row, delta_col)`
    pub fn shifted(&self, delta_row: i32, delta_col: i32) -> Self {
        Self {
            anchor: (self.anchor.0 + delta_row, self.anchor.1 + delta_col),
            ..*self
        }
    }

    /// Inclusive `(top, bottom)` board rows covered by this piece
    pub fn row_span(&self) -> (i32, i32) {
        let cells = self.cells();
        let top = cells.iter().map(|&(r, _)| r).min().unwrap_or(self.anchor.0);
        let bottom = cells.iter().map(|&(r, _)| r).max().unwrap_or(self.anchor.0);
        (top, bottom)
    }
}

/// Read-only view of the active piece for render layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ActivePieceView {
    pub kind: PieceKind,
    pub rotation_index: usize,
    pub anchor: (i32, i32),
    /// Absolute `(row, col)` cells
    pub cells: [(i32, i32); 4],
}

impl From<ActivePiece> for ActivePieceView {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            rotation_index: value.rotation_index,
            anchor: value.anchor,
            cells: value.cells(),
        }
    }
}
