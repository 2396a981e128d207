//! Placement helper for bots and replays
//!
//! Turns "put the active piece at this column and rotation" into the same
//! rotate / shift / hard-drop steps a player would make. The whole path is
//! checked before anything is committed, so a rejected placement leaves the
//! engine untouched.

use thiserror::Error;

use crate::core::rotation_count;
use crate::core::shapes::shape_extent;
use crate::engine::GameEngine;
use crate::piece::ActivePiece;
use crate::types::RotationDirection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlaceError {
    #[error("could not rotate to target rotation")]
    RotationBlocked,
    #[error("target column would place piece out of bounds")]
    ColOutOfBounds,
    #[error("could not move to target column due to collision")]
    ColBlocked,
    #[error("game is not playable")]
    NotPlayable,
    #[error("no active piece")]
    NoActive,
}

impl PlaceError {
    pub fn code(self) -> &'static str {
        match self {
            PlaceError::NotPlayable => "not_playable",
            PlaceError::RotationBlocked
            | PlaceError::ColOutOfBounds
            | PlaceError::ColBlocked
            | PlaceError::NoActive => "invalid_place",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PlaceError::RotationBlocked => "could not rotate to target rotation",
            PlaceError::ColOutOfBounds => "target column would place piece out of bounds",
            PlaceError::ColBlocked => "could not move to target column due to collision",
            PlaceError::NotPlayable => "game is not playable",
            PlaceError::NoActive => "no active piece",
        }
    }
}

/// Where the active piece would come to rest for a target column and rotation
///
/// Does not mutate the engine.
pub fn plan_place(
    engine: &GameEngine,
    target_col: i32,
    target_rotation: usize,
) -> Result<ActivePiece, PlaceError> {
    if engine.is_paused() || engine.is_game_over() {
        return Err(PlaceError::NotPlayable);
    }
    let Some(active0) = engine.active() else {
        return Err(PlaceError::NoActive);
    };

    let count = rotation_count(active0.kind);
    let target_rotation = target_rotation % count;
    let cur = active0.rotation_index % count;

    // Try CW and CCW; keep the shorter one first.
    let cw = (target_rotation + count - cur) % count;
    let ccw = (cur + count - target_rotation) % count;
    let mut plans = [(RotationDirection::Cw, cw), (RotationDirection::Ccw, ccw)];
    if plans[1].1 < plans[0].1 {
        plans.swap(0, 1);
    }

    let rotated = plans
        .iter()
        .find_map(|&(direction, steps)| {
            (0..steps).try_fold(active0, |piece, _| engine.rotated(piece, direction))
        })
        .ok_or(PlaceError::RotationBlocked)?;

    // Validate the column range against the rotated shape.
    let (_, width) = shape_extent(rotated.kind, rotated.rotation_index);
    if target_col < 0 || target_col > engine.board().cols() as i32 - width {
        return Err(PlaceError::ColOutOfBounds);
    }

    let step = (target_col - rotated.anchor.1).signum();
    let mut piece = rotated;
    while piece.anchor.1 != target_col {
        piece = engine
            .moved(piece, 0, step)
            .ok_or(PlaceError::ColBlocked)?;
    }

    Ok(engine.landing(piece))
}

/// Rotate, shift and hard-drop the active piece to the target placement
pub fn apply_place(
    engine: &mut GameEngine,
    target_col: i32,
    target_rotation: usize,
) -> Result<(), PlaceError> {
    let landing = plan_place(engine, target_col, target_rotation)?;
    engine.set_active(landing);
    engine.hard_drop();
    Ok(())
}
