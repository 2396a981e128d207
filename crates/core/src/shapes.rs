//! Shape catalog - static rotation tables for every piece kind
//!
//! Each rotation state is the tight bounding box of the previous state turned
//! 90° clockwise, stored as `(row, col)` offsets from the box's top-left
//! corner. States that repeat are not stored: I, S and Z have two states, O
//! has one, T, J and L have four.
//!
//! Lookups take the rotation index modulo the state count, so every index is
//! valid.

use crate::types::PieceKind;

/// Offset of a single cell relative to the piece anchor, as `(row, col)`
pub type CellOffset = (i32, i32);

/// Shape of a piece in one rotation state - 4 cell offsets
pub type PieceShape = [CellOffset; 4];

/// Side length of the square mask every rotation state fits in
pub const MASK_SIZE: usize = 4;

const I_STATES: [PieceShape; 2] = [
    // horizontal bar
    [(0, 0), (0, 1), (0, 2), (0, 3)],
    // vertical bar
    [(0, 0), (1, 0), (2, 0), (3, 0)],
];

const O_STATES: [PieceShape; 1] = [[(0, 0), (0, 1), (1, 0), (1, 1)]];

const T_STATES: [PieceShape; 4] = [
    [(0, 1), (1, 0), (1, 1), (1, 2)],
    [(0, 0), (1, 0), (1, 1), (2, 0)],
    [(0, 0), (0, 1), (0, 2), (1, 1)],
    [(0, 1), (1, 0), (1, 1), (2, 1)],
];

const S_STATES: [PieceShape; 2] = [
    [(0, 1), (0, 2), (1, 0), (1, 1)],
    [(0, 0), (1, 0), (1, 1), (2, 1)],
];

const Z_STATES: [PieceShape; 2] = [
    [(0, 0), (0, 1), (1, 1), (1, 2)],
    [(0, 1), (1, 0), (1, 1), (2, 0)],
];

const J_STATES: [PieceShape; 4] = [
    [(0, 0), (1, 0), (1, 1), (1, 2)],
    [(0, 0), (0, 1), (1, 0), (2, 0)],
    [(0, 0), (0, 1), (0, 2), (1, 2)],
    [(0, 1), (1, 1), (2, 0), (2, 1)],
];

const L_STATES: [PieceShape; 4] = [
    [(0, 2), (1, 0), (1, 1), (1, 2)],
    [(0, 0), (1, 0), (2, 0), (2, 1)],
    [(0, 0), (0, 1), (0, 2), (1, 0)],
    [(0, 0), (0, 1), (1, 1), (2, 1)],
];

/// All rotation states for a piece kind, in clockwise order
pub fn rotation_states(kind: PieceKind) -> &'static [PieceShape] {
    match kind {
        PieceKind::I => &I_STATES,
        PieceKind::O => &O_STATES,
        PieceKind::T => &T_STATES,
        PieceKind::S => &S_STATES,
        PieceKind::Z => &Z_STATES,
        PieceKind::J => &J_STATES,
        PieceKind::L => &L_STATES,
    }
}

/// Number of distinct rotation states for a piece kind
pub fn rotation_count(kind: PieceKind) -> usize {
    rotation_states(kind).len()
}

/// Get the cell offsets for a piece kind and rotation index
///
/// Total over `rotation_index`: the index is reduced modulo
/// [`rotation_count`].
///
/// # Examples
///
/// ```
/// use blockfall_core::shapes::shape_cells;
/// use blockfall_types::PieceKind;
///
/// assert_eq!(shape_cells(PieceKind::I, 0), [(0, 0), (0, 1), (0, 2), (0, 3)]);
/// assert_eq!(shape_cells(PieceKind::I, 2), shape_cells(PieceKind::I, 0));
/// assert_eq!(shape_cells(PieceKind::O, 5), shape_cells(PieceKind::O, 0));
/// ```
pub fn shape_cells(kind: PieceKind, rotation_index: usize) -> PieceShape {
    let states = rotation_states(kind);
    states[rotation_index % states.len()]
}

/// Width and height of the rotation state's bounding box, as `(rows, cols)`
pub fn shape_extent(kind: PieceKind, rotation_index: usize) -> (i32, i32) {
    let cells = shape_cells(kind, rotation_index);
    let rows = cells.iter().map(|&(r, _)| r).max().unwrap_or(0) + 1;
    let cols = cells.iter().map(|&(_, c)| c).max().unwrap_or(0) + 1;
    (rows, cols)
}

/// Boolean mask view of a rotation state, `mask[row][col]`
pub fn shape_mask(kind: PieceKind, rotation_index: usize) -> [[bool; MASK_SIZE]; MASK_SIZE] {
    let mut mask = [[false; MASK_SIZE]; MASK_SIZE];
    for (row, col) in shape_cells(kind, rotation_index) {
        mask[row as usize][col as usize] = true;
    }
    mask
}

/// Wall-kick column offsets tried after the unshifted rotation fails
///
/// Offsets are tried in order and the first that fits wins. Only the I piece
/// gets the two-column kicks.
pub fn kick_offsets(kind: PieceKind) -> &'static [CellOffset] {
    match kind {
        PieceKind::I => &I_KICKS,
        _ => &BASIC_KICKS,
    }
}

const BASIC_KICKS: [CellOffset; 2] = [(0, 1), (0, -1)];

const I_KICKS: [CellOffset; 4] = [(0, 1), (0, -1), (0, 2), (0, -2)];
