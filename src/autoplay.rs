//! Greedy placement policy for the headless driver
//!
//! For every rotation and column the engine accepts, the landing position is
//! planned with [`plan_place`], locked onto a scratch copy of the board and
//! scored. The deepest landing wins; ties go to the board with fewer holes.

use log::{debug, info};

use crate::core::{rotation_count, Board};
use crate::engine::{apply_place, plan_place, ActivePiece, GameEngine};

/// One candidate placement of the active piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub col: i32,
    pub rotation: usize,
    pub landing: ActivePiece,
    /// Holes left on the board after the lock and any clears
    pub holes: usize,
}

impl Placement {
    /// Bottom board row the piece would occupy
    pub fn landing_row(&self) -> i32 {
        self.landing.row_span().1
    }

    fn better_than(&self, other: &Placement) -> bool {
        (self.landing_row(), std::cmp::Reverse(self.holes))
            > (other.landing_row(), std::cmp::Reverse(other.holes))
    }
}

/// Totals from one automated session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayStats {
    pub pieces_placed: u32,
    /// Lock events bucketed by lines cleared (index 0 = no clear)
    pub clears: [u32; 5],
}

/// Empty cells with at least one locked cell above them in the same column
pub fn count_holes(board: &Board) -> usize {
    let mut holes = 0;
    for col in 0..board.cols() as i32 {
        let mut covered = false;
        for row in 0..board.rows() as i32 {
            match board.get(row, col) {
                Some(cell) if cell.is_locked() => covered = true,
                Some(_) if covered => holes += 1,
                _ => {}
            }
        }
    }
    holes
}

/// Best placement for the active piece, if it has any legal one
pub fn choose_placement(engine: &GameEngine) -> Option<Placement> {
    let kind = engine.active_piece()?.kind;
    let cols = engine.board().cols() as i32;
    let mut best: Option<Placement> = None;

    for rotation in 0..rotation_count(kind) {
        for col in 0..cols {
            let Ok(landing) = plan_place(engine, col, rotation) else {
                continue;
            };
            let mut scratch = engine.board().clone();
            if scratch
                .lock(landing.kind, landing.rotation_index, landing.anchor)
                .is_err()
            {
                continue;
            }
            scratch.clear_full_rows();

            let candidate = Placement {
                col,
                rotation,
                landing,
                holes: count_holes(&scratch),
            };
            if best.map_or(true, |b| candidate.better_than(&b)) {
                best = Some(candidate);
            }
        }
    }
    best
}

/// Place up to `max_pieces` pieces, stopping early on game over or pause
///
/// A piece with no reachable placement is hard-dropped where it spawned.
pub fn play(engine: &mut GameEngine, max_pieces: u32) -> PlayStats {
    let mut stats = PlayStats::default();

    while stats.pieces_placed < max_pieces && !engine.is_game_over() && !engine.is_paused() {
        match choose_placement(engine) {
            Some(placement) => {
                debug!(
                    "placing {:?} at col {} rotation {} (row {}, {} holes)",
                    placement.landing.kind,
                    placement.col,
                    placement.rotation,
                    placement.landing_row(),
                    placement.holes
                );
                if let Err(err) = apply_place(engine, placement.col, placement.rotation) {
                    debug!("planned placement rejected: {}", err);
                    engine.hard_drop();
                }
            }
            None => {
                engine.hard_drop();
            }
        }
        stats.pieces_placed += 1;

        if let Some(event) = engine.take_last_event() {
            stats.clears[event.lines_cleared.min(4) as usize] += 1;
        }
    }

    info!(
        "autoplay stopped after {} pieces (game over: {})",
        stats.pieces_placed,
        engine.is_game_over()
    );
    stats
}
