//! Game engine - the spawn / fall / lock / clear state machine
//!
//! This module ties together the rule pieces: board, shape catalog,
//! randomizer and scoring. It owns all mutable game state and exposes two
//! surfaces:
//!
//! - mutation: [`GameEngine::tick`], [`GameEngine::apply_input`],
//!   [`GameEngine::reset`]
//! - observation: read-only accessors and [`GameEngine::snapshot`]
//!
//! Every call runs to completion. Locking, line clearing and spawning the
//! next piece all happen inside the call that made the piece land, so the
//! only externally visible phases are "falling" and "game over" (plus the
//! orthogonal paused flag).
//!
//! Timing is the driver's job: call `tick()` once per [`GameEngine::fall_interval`].

use std::time::Duration;

use arrayvec::ArrayVec;
use log::{debug, info, trace};

use crate::config::EngineConfig;
use crate::core::{
    kick_offsets, rotation_count, scoring, Board, EngineError, PieceSource, Randomizer,
};
use crate::piece::{ActivePiece, ActivePieceView};
use crate::snapshot::GameSnapshot;
use crate::types::{Cell, Command, PieceKind, RotationDirection, START_LEVEL};

/// Event recorded each time a piece locks (consumed by observers)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    /// Board rows that were full after the lock, top to bottom, before removal
    pub cleared_rows: ArrayVec<usize, 4>,
    pub lines_cleared: u32,
    pub score_delta: u64,
    pub level_up: bool,
}

/// Complete game state
#[derive(Debug)]
pub struct GameEngine {
    config: EngineConfig,
    board: Board,
    active: Option<ActivePiece>,
    randomizer: Randomizer,
    score: u64,
    level: u32,
    lines_cleared: u32,
    fall_interval: Duration,
    /// Pieces spawned since the last reset
    pieces_spawned: u32,
    /// Last lock event (consumed by observers)
    last_event: Option<LockEvent>,
    paused: bool,
    game_over: bool,
}

impl GameEngine {
    /// Create a new game on an empty `rows x cols` board
    ///
    /// With `seed: None` the uniform randomizer is seeded from OS entropy.
    /// Boards too small to hold a spawning piece start in game over.
    pub fn new(rows: u32, cols: u32, seed: Option<u64>) -> Self {
        let config = EngineConfig::new(rows, cols, seed);
        let randomizer = Randomizer::seeded(config.randomizer, config.seed);
        let board = Board::new(rows, cols);
        Self::assemble(config, board, randomizer)
    }

    /// Create a new game from a validated configuration
    pub fn from_config(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let randomizer = Randomizer::seeded(config.randomizer, config.seed);
        let board = Board::new(config.rows, config.cols);
        Ok(Self::assemble(config, board, randomizer))
    }

    /// Create a new game drawing pieces from `source`
    ///
    /// `config.seed` and `config.randomizer` are ignored.
    pub fn with_source(
        config: EngineConfig,
        source: Box<dyn PieceSource + Send>,
    ) -> Result<Self, EngineError> {
        let board = Board::new(config.rows, config.cols);
        Self::with_board(config, board, source)
    }

    /// Create a new game starting from a pre-filled board
    ///
    /// The board must match the configured dimensions and contain no full
    /// rows.
    pub fn with_board(
        config: EngineConfig,
        board: Board,
        source: Box<dyn PieceSource + Send>,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        if board.rows() != config.rows || board.cols() != config.cols {
            return Err(EngineError::InvalidConfig(format!(
                "board is {}x{} but config expects {}x{}",
                board.rows(),
                board.cols(),
                config.rows,
                config.cols
            )));
        }
        if let Some(&row) = board.full_rows().first() {
            return Err(EngineError::InvalidConfig(format!(
                "starting board has a full row at {}",
                row
            )));
        }
        Ok(Self::assemble(config, board, Randomizer::new(source)))
    }

    fn assemble(config: EngineConfig, board: Board, randomizer: Randomizer) -> Self {
        let fall_interval = scoring::fall_interval(START_LEVEL, config.min_fall_interval_ms);
        let mut engine = Self {
            config,
            board,
            active: None,
            randomizer,
            score: 0,
            level: START_LEVEL,
            lines_cleared: 0,
            fall_interval,
            pieces_spawned: 0,
            last_event: None,
            paused: false,
            game_over: false,
        };
        engine.spawn_piece();
        engine
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Locked cells, one slice per row, top to bottom
    pub fn board_cells(&self) -> impl ExactSizeIterator<Item = &[Cell]> + '_ {
        self.board.iter_rows()
    }

    pub fn active_piece(&self) -> Option<ActivePieceView> {
        self.active.map(ActivePieceView::from)
    }

    pub(crate) fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn next_piece_kind(&self) -> PieceKind {
        self.randomizer.peek()
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    /// Time the driver should wait between two `tick()` calls
    pub fn fall_interval(&self) -> Duration {
        self.fall_interval
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_codes(&mut out.board);
        out.rows = self.board.rows();
        out.cols = self.board.cols();
        out.active = self.active_piece();
        out.ghost_anchor = self.ghost_anchor();
        out.next = self.next_piece_kind();
        out.score = self.score;
        out.level = self.level;
        out.lines_cleared = self.lines_cleared;
        out.fall_interval_ms = self.fall_interval.as_millis() as u64;
        out.paused = self.paused;
        out.game_over = self.game_over;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Advance the simulation by one fall step
    ///
    /// Moves the active piece down one row, or locks it when it cannot move.
    /// No-op while paused or after game over. Returns whether anything changed.
    pub fn tick(&mut self) -> bool {
        if self.paused || self.game_over {
            return false;
        }
        self.step_down()
    }

    /// Apply a single input command
    ///
    /// While paused only [`Command::TogglePause`] has an effect; after game
    /// over nothing does until [`GameEngine::reset`]. Returns whether the
    /// command changed the game.
    pub fn apply_input(&mut self, command: Command) -> bool {
        if self.game_over {
            return false;
        }
        if command == Command::TogglePause {
            self.paused = !self.paused;
            debug!("pause toggled: paused={}", self.paused);
            return true;
        }
        if self.paused {
            return false;
        }

        match command {
            Command::MoveLeft => self.try_move(0, -1),
            Command::MoveRight => self.try_move(0, 1),
            Command::SoftDrop => self.step_down(),
            Command::HardDrop => {
                self.hard_drop();
                true
            }
            Command::RotateCw => self.try_rotate(RotationDirection::Cw),
            Command::RotateCcw => self.try_rotate(RotationDirection::Ccw),
            Command::TogglePause => unreachable!("handled above"),
        }
    }

    /// Start a fresh game with the same configuration and piece source
    pub fn reset(&mut self) {
        self.board.clear();
        self.active = None;
        self.score = 0;
        self.level = START_LEVEL;
        self.lines_cleared = 0;
        self.fall_interval = scoring::fall_interval(START_LEVEL, self.config.min_fall_interval_ms);
        self.pieces_spawned = 0;
        self.last_event = None;
        self.paused = false;
        self.game_over = false;
        self.randomizer.refresh();
        info!("game reset");
        self.spawn_piece();
    }

    /// Try to move the active piece; commits only if the target fits
    pub fn try_move(&mut self, delta_row: i32, delta_col: i32) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        match self.moved(active, delta_row, delta_col) {
            Some(piece) => {
                self.active = Some(piece);
                true
            }
            None => false,
        }
    }

    /// Try to rotate the active piece with wall kicks
    ///
    /// Tries the unshifted rotation first, then each kick offset in order;
    /// the first fit is committed. Rotating O always succeeds in place.
    pub fn try_rotate(&mut self, direction: RotationDirection) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        match self.rotated(active, direction) {
            Some(piece) => {
                self.active = Some(piece);
                true
            }
            None => {
                trace!(
                    "rotation {:?} rejected for {:?} at {:?}",
                    direction,
                    active.kind,
                    active.anchor
                );
                false
            }
        }
    }

    /// Drop the active piece as far as it goes and lock it
    ///
    /// Returns the number of rows dropped.
    pub fn hard_drop(&mut self) -> u32 {
        if self.active.is_none() {
            return 0;
        }
        let mut dropped = 0;
        while self.try_move(1, 0) {
            dropped += 1;
        }
        self.lock_piece();
        dropped
    }

    /// Anchor the active piece would land at if hard-dropped
    pub fn ghost_anchor(&self) -> Option<(i32, i32)> {
        let active = self.active?;
        Some(self.landing(active).anchor)
    }

    /// `piece` moved by the given delta, if it fits
    pub(crate) fn moved(
        &self,
        piece: ActivePiece,
        delta_row: i32,
        delta_col: i32,
    ) -> Option<ActivePiece> {
        let candidate = piece.shifted(delta_row, delta_col);
        self.fits(&candidate).then_some(candidate)
    }

    /// `piece` rotated one step in `direction`, kicked if needed, if it fits
    pub(crate) fn rotated(
        &self,
        piece: ActivePiece,
        direction: RotationDirection,
    ) -> Option<ActivePiece> {
        let rotation_index = direction.apply(piece.rotation_index, rotation_count(piece.kind));
        let turned = ActivePiece {
            rotation_index,
            ..piece
        };

        std::iter::once(&(0, 0))
            .chain(kick_offsets(piece.kind))
            .map(|&(dr, dc)| turned.shifted(dr, dc))
            .find(|candidate| self.fits(candidate))
    }

    /// Lowest resting position of `piece` straight below it
    pub(crate) fn landing(&self, piece: ActivePiece) -> ActivePiece {
        let mut resting = piece;
        while let Some(lower) = self.moved(resting, 1, 0) {
            resting = lower;
        }
        resting
    }

    /// Replace the active piece with an already validated placement
    pub(crate) fn set_active(&mut self, piece: ActivePiece) {
        debug_assert!(self.fits(&piece));
        self.active = Some(piece);
    }

    fn fits(&self, piece: &ActivePiece) -> bool {
        self.board
            .can_place(piece.kind, piece.rotation_index, piece.anchor)
    }

    /// Move down one row, or lock when blocked
    fn step_down(&mut self) -> bool {
        if self.active.is_none() {
            return false;
        }
        if !self.try_move(1, 0) {
            self.lock_piece();
        }
        true
    }

    /// Lock the active piece, clear lines, score, and spawn the next piece
    fn lock_piece(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        // The piece was valid where it stands; anything else is an engine bug
        if let Err(err) = self
            .board
            .lock(active.kind, active.rotation_index, active.anchor)
        {
            panic!("active piece locked at an unchecked placement: {err}");
        }

        // Only rows the piece touched can have become full
        let (top, bottom) = active.row_span();
        let cleared_rows: ArrayVec<usize, 4> = (top..=bottom)
            .map(|row| row as usize)
            .filter(|&row| self.board.is_row_full(row))
            .collect();

        let lines = self.board.clear_full_rows();
        debug_assert_eq!(lines as usize, cleared_rows.len());

        let update = scoring::score_clear(lines, self.level, self.lines_cleared);
        self.score = self.score.saturating_add(update.score_delta);
        self.lines_cleared = update.lines_cleared;
        self.level = update.level;
        self.fall_interval = scoring::fall_interval(self.level, self.config.min_fall_interval_ms);

        debug!(
            "locked {:?} at {:?} rotation {}, cleared {} line(s), +{} points",
            active.kind, active.anchor, active.rotation_index, lines, update.score_delta
        );
        if update.level_up {
            info!(
                "level up: level {} after {} lines, fall interval {:?}",
                self.level, self.lines_cleared, self.fall_interval
            );
        }

        self.last_event = Some(LockEvent {
            kind: active.kind,
            cleared_rows,
            lines_cleared: lines,
            score_delta: update.score_delta,
            level_up: update.level_up,
        });

        self.spawn_piece();
    }

    /// Spawn the held next piece; game over if it does not fit
    fn spawn_piece(&mut self) -> bool {
        let kind = self.randomizer.draw();
        let piece = ActivePiece::spawn(kind, self.board.cols());

        if !self.fits(&piece) {
            self.active = None;
            self.game_over = true;
            info!(
                "game over: {:?} cannot spawn at {:?} (score {}, lines {}, level {})",
                kind, piece.anchor, self.score, self.lines_cleared, self.level
            );
            return false;
        }

        self.active = Some(piece);
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);
        debug!("spawned {:?} at {:?}, next {:?}", kind, piece.anchor, self.randomizer.peek());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SequenceSource;

    fn engine_with(kinds: &[PieceKind]) -> GameEngine {
        GameEngine::with_source(
            EngineConfig::new(20, 10, None),
            Box::new(SequenceSource::new(kinds.iter().copied())),
        )
        .unwrap()
    }

    fn fill_row_except(engine: &mut GameEngine, row: i32, gaps: &[i32]) {
        for col in 0..10 {
            if !gaps.contains(&col) {
                engine.board_mut().set(row, col, Cell::Locked(PieceKind::Z));
            }
        }
    }

    #[test]
    fn test_new_game_state() {
        let engine = GameEngine::new(20, 10, Some(12345));

        assert!(!engine.is_game_over());
        assert!(!engine.is_paused());
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.level(), 1);
        assert_eq!(engine.lines_cleared(), 0);
        assert_eq!(engine.fall_interval(), Duration::from_millis(1000));
        assert_eq!(engine.pieces_spawned(), 1);
        assert!(engine.active_piece().is_some());
        assert_eq!(engine.board().locked_count(), 0);
    }

    #[test]
    fn test_same_seed_same_game() {
        let mut a = GameEngine::new(20, 10, Some(77));
        let mut b = GameEngine::new(20, 10, Some(77));
        for _ in 0..20 {
            assert_eq!(a.active_piece(), b.active_piece());
            assert_eq!(a.next_piece_kind(), b.next_piece_kind());
            a.apply_input(Command::HardDrop);
            b.apply_input(Command::HardDrop);
        }
        assert_eq!(a.board(), b.board());
    }

    #[test]
    fn test_from_config_validates() {
        assert!(GameEngine::from_config(EngineConfig::new(0, 10, Some(1))).is_err());
        let engine = GameEngine::from_config(EngineConfig::new(20, 10, Some(1))).unwrap();
        assert_eq!(engine.config().rows, 20);
    }

    #[test]
    fn test_with_board_rejects_mismatch_and_full_rows() {
        let config = EngineConfig::new(20, 10, None);
        let source = || Box::new(SequenceSource::new([PieceKind::T]));

        let err = GameEngine::with_board(config.clone(), Board::new(10, 10), source()).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));

        let mut board = Board::new(20, 10);
        for col in 0..10 {
            board.set(19, col, Cell::Locked(PieceKind::I));
        }
        let err = GameEngine::with_board(config, board, source()).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
    }

    #[test]
    fn test_spawn_and_next() {
        let engine = engine_with(&[PieceKind::T, PieceKind::O, PieceKind::I]);
        let active = engine.active_piece().unwrap();
        assert_eq!(active.kind, PieceKind::T);
        assert_eq!(active.anchor, (0, 3));
        assert_eq!(active.rotation_index, 0);
        assert_eq!(engine.next_piece_kind(), PieceKind::O);
    }

    #[test]
    fn test_try_move() {
        let mut engine = engine_with(&[PieceKind::O]);
        assert!(engine.try_move(0, -1));
        assert_eq!(engine.active_piece().unwrap().anchor, (0, 3));
        assert!(engine.try_move(1, 0));
        assert_eq!(engine.active_piece().unwrap().anchor, (1, 3));
    }

    #[test]
    fn test_try_move_collision_leaves_piece() {
        let mut engine = engine_with(&[PieceKind::O]);
        for _ in 0..4 {
            assert!(engine.try_move(0, -1));
        }
        let before = engine.active_piece();
        assert!(!engine.try_move(0, -1));
        assert_eq!(engine.active_piece(), before);

        // Moving up off the top is rejected too
        assert!(!engine.try_move(-1, 0));
        assert_eq!(engine.active_piece(), before);
    }

    #[test]
    fn test_rotate_in_place() {
        let mut engine = engine_with(&[PieceKind::T]);
        engine.try_move(1, 0);
        assert!(engine.try_rotate(RotationDirection::Cw));
        let active = engine.active_piece().unwrap();
        assert_eq!(active.rotation_index, 1);
        assert_eq!(active.anchor, (1, 3));

        assert!(engine.try_rotate(RotationDirection::Ccw));
        assert_eq!(engine.active_piece().unwrap().rotation_index, 0);
    }

    #[test]
    fn test_rotate_o_never_shifts() {
        let mut engine = engine_with(&[PieceKind::O]);
        let before = engine.active_piece().unwrap();
        assert!(engine.try_rotate(RotationDirection::Cw));
        assert!(engine.try_rotate(RotationDirection::Ccw));
        let after = engine.active_piece().unwrap();
        assert_eq!(before.cells, after.cells);
        assert_eq!(after.rotation_index, 0);
    }

    #[test]
    fn test_wall_kick_right_edge_t() {
        let mut engine = engine_with(&[PieceKind::T]);
        // Rotate to the vertical state (width 2) and push against the right wall
        engine.try_move(2, 0);
        assert!(engine.try_rotate(RotationDirection::Cw));
        while engine.try_move(0, 1) {}
        let pinned = engine.active_piece().unwrap();
        assert_eq!(pinned.anchor, (2, 8));

        // Back to the flat state (width 3): unshifted and +1 fail, -1 fits
        assert!(engine.try_rotate(RotationDirection::Ccw));
        let kicked = engine.active_piece().unwrap();
        assert_eq!(kicked.rotation_index, 0);
        assert_eq!(kicked.anchor, (2, 7));
    }

    #[test]
    fn test_wall_kick_i_uses_two_column_offset() {
        let mut engine = engine_with(&[PieceKind::I]);
        engine.try_move(3, 0);
        assert!(engine.try_rotate(RotationDirection::Cw));
        while engine.try_move(0, 1) {}
        assert_eq!(engine.active_piece().unwrap().anchor, (3, 9));

        // Flat I needs four columns; no offset up to -2 reaches col 6
        assert!(!engine.try_rotate(RotationDirection::Cw));
        assert_eq!(engine.active_piece().unwrap().rotation_index, 1);

        // One column in from the wall: unshifted, +1, -1 and +2 fail, -2 fits
        assert!(engine.try_move(0, -1));
        assert_eq!(engine.active_piece().unwrap().anchor, (3, 8));
        assert!(engine.try_rotate(RotationDirection::Cw));
        let kicked = engine.active_piece().unwrap();
        assert_eq!(kicked.rotation_index, 0);
        assert_eq!(kicked.anchor, (3, 6));
    }

    #[test]
    fn test_wall_kick_prefers_right_over_left() {
        let mut engine = engine_with(&[PieceKind::T]);
        assert!(engine.try_move(5, 0));
        assert_eq!(engine.active_piece().unwrap().anchor, (5, 3));
        // Upright T at (5, 3) would cover (7, 3); both +1 and -1 fit
        engine.board_mut().set(7, 3, Cell::Locked(PieceKind::O));

        assert!(engine.try_rotate(RotationDirection::Cw));
        let kicked = engine.active_piece().unwrap();
        assert_eq!(kicked.rotation_index, 1);
        assert_eq!(kicked.anchor, (5, 4));
    }

    #[test]
    fn test_wall_kick_i_prefers_one_column_over_two() {
        let mut engine = engine_with(&[PieceKind::I]);
        assert!(engine.try_move(5, 0));
        assert_eq!(engine.active_piece().unwrap().anchor, (5, 3));
        // Upright I at (5, 3) would cover (6, 3); +1, -1, +2 and -2 all fit
        engine.board_mut().set(6, 3, Cell::Locked(PieceKind::O));

        assert!(engine.try_rotate(RotationDirection::Cw));
        let kicked = engine.active_piece().unwrap();
        assert_eq!(kicked.rotation_index, 1);
        assert_eq!(kicked.anchor, (5, 4));
    }

    #[test]
    fn test_rotation_fails_without_mutation() {
        let mut engine = engine_with(&[PieceKind::T]);
        engine.try_move(5, 0);
        // Box the T in so no rotation state fits
        let active = engine.active_piece().unwrap();
        for row in 4..9 {
            for col in 0..10 {
                if !active.cells.contains(&(row, col)) {
                    engine.board_mut().set(row, col, Cell::Locked(PieceKind::J));
                }
            }
        }
        let board_before = engine.board().clone();
        assert!(!engine.try_rotate(RotationDirection::Cw));
        assert!(!engine.try_rotate(RotationDirection::Ccw));
        assert_eq!(engine.active_piece(), Some(active));
        assert_eq!(engine.board(), &board_before);
    }

    #[test]
    fn test_tick_gravity_and_lock() {
        let mut engine = engine_with(&[PieceKind::O, PieceKind::T]);
        for row in 1..=18 {
            assert!(engine.tick());
            assert_eq!(engine.active_piece().unwrap().anchor, (row, 4));
        }
        // Resting on the floor: the next tick locks and spawns
        assert!(engine.tick());
        assert_eq!(engine.board().get(19, 4), Some(Cell::Locked(PieceKind::O)));
        assert_eq!(engine.board().get(18, 5), Some(Cell::Locked(PieceKind::O)));
        assert_eq!(engine.active_piece().unwrap().kind, PieceKind::T);
        assert_eq!(engine.pieces_spawned(), 2);

        let event = engine.take_last_event().unwrap();
        assert_eq!(event.kind, PieceKind::O);
        assert_eq!(event.lines_cleared, 0);
        assert!(engine.take_last_event().is_none());
    }

    #[test]
    fn test_soft_drop_matches_tick() {
        let mut a = engine_with(&[PieceKind::L, PieceKind::S]);
        let mut b = engine_with(&[PieceKind::L, PieceKind::S]);
        for _ in 0..25 {
            a.tick();
            b.apply_input(Command::SoftDrop);
            assert_eq!(a.active_piece(), b.active_piece());
        }
        assert_eq!(a.board(), b.board());
    }

    #[test]
    fn test_hard_drop_matches_repeated_move_down() {
        let mut a = engine_with(&[PieceKind::J, PieceKind::Z]);
        let mut b = engine_with(&[PieceKind::J, PieceKind::Z]);
        a.board_mut().set(15, 4, Cell::Locked(PieceKind::I));
        b.board_mut().set(15, 4, Cell::Locked(PieceKind::I));

        let dropped = a.hard_drop();
        let mut moves = 0;
        while b.try_move(1, 0) {
            moves += 1;
        }
        b.tick();

        assert_eq!(dropped, moves);
        assert_eq!(a.board(), b.board());
    }

    #[test]
    fn test_ghost_anchor() {
        let mut engine = engine_with(&[PieceKind::I]);
        assert_eq!(engine.ghost_anchor(), Some((19, 3)));
        engine.board_mut().set(10, 5, Cell::Locked(PieceKind::T));
        assert_eq!(engine.ghost_anchor(), Some((9, 3)));
    }

    #[test]
    fn test_line_clear_scores_and_records_rows() {
        let mut engine = engine_with(&[PieceKind::I, PieceKind::O]);
        fill_row_except(&mut engine, 19, &[3, 4, 5, 6]);
        engine.board_mut().set(18, 1, Cell::Locked(PieceKind::Z));

        engine.hard_drop();
        assert_eq!(engine.lines_cleared(), 1);
        assert_eq!(engine.score(), 100);
        // Row 18 shifted down into 19
        assert_eq!(engine.board().get(19, 0), Some(Cell::Empty));
        assert_eq!(engine.board().get(18, 1), Some(Cell::Empty));
        assert_eq!(engine.board().get(19, 1), Some(Cell::Locked(PieceKind::Z)));

        let event = engine.take_last_event().unwrap();
        assert_eq!(event.cleared_rows.as_slice(), &[19]);
        assert_eq!(event.score_delta, 100);
        assert!(!event.level_up);
    }

    #[test]
    fn test_tetris_clear() {
        let mut engine = engine_with(&[PieceKind::I, PieceKind::O]);
        for row in 16..20 {
            fill_row_except(&mut engine, row, &[9]);
        }
        assert!(engine.try_rotate(RotationDirection::Cw));
        while engine.try_move(0, 1) {}
        engine.hard_drop();

        assert_eq!(engine.lines_cleared(), 4);
        assert_eq!(engine.score(), 800);
        assert_eq!(engine.board().locked_count(), 0);
        let event = engine.take_last_event().unwrap();
        assert_eq!(event.cleared_rows.as_slice(), &[16, 17, 18, 19]);
    }

    #[test]
    fn test_level_progression_and_speed() {
        let mut engine = engine_with(&[PieceKind::I]);
        let mut last_level = engine.level();
        let mut last_score = engine.score();
        for round in 0..12u32 {
            fill_row_except(&mut engine, 19, &[3, 4, 5, 6]);
            let level_before = engine.level();
            engine.hard_drop();
            assert_eq!(engine.lines_cleared(), round + 1);
            assert_eq!(engine.score() - last_score, 100 * u64::from(level_before));
            assert_eq!(engine.level(), engine.lines_cleared() / 10 + 1);
            assert!(engine.level() >= last_level);
            last_level = engine.level();
            last_score = engine.score();
        }
        assert_eq!(engine.level(), 2);
        assert_eq!(engine.fall_interval(), Duration::from_millis(800));
        // 10 clears at level 1, two at level 2
        assert_eq!(engine.score(), 10 * 100 + 2 * 200);
    }

    #[test]
    fn test_pause_blocks_tick_and_input() {
        let mut engine = engine_with(&[PieceKind::T]);
        let before = engine.active_piece();

        assert!(engine.apply_input(Command::TogglePause));
        assert!(engine.is_paused());
        assert!(!engine.tick());
        assert!(!engine.apply_input(Command::MoveLeft));
        assert!(!engine.apply_input(Command::HardDrop));
        assert_eq!(engine.active_piece(), before);

        assert!(engine.apply_input(Command::TogglePause));
        assert!(!engine.is_paused());
        assert!(engine.apply_input(Command::MoveLeft));
    }

    #[test]
    fn test_game_over_when_spawn_blocked() {
        let mut engine = engine_with(&[PieceKind::I, PieceKind::O]);
        engine.board_mut().set(1, 4, Cell::Locked(PieceKind::T));

        // I cannot fall; the tick locks it on row 0 and the O spawn collides
        assert!(engine.tick());
        assert!(engine.is_game_over());
        assert!(engine.active_piece().is_none());

        let board = engine.board().clone();
        assert!(!engine.tick());
        for cmd in [
            Command::MoveLeft,
            Command::HardDrop,
            Command::RotateCw,
            Command::TogglePause,
        ] {
            assert!(!engine.apply_input(cmd));
        }
        assert_eq!(engine.board(), &board);
        assert!(!engine.is_paused());
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut engine = engine_with(&[PieceKind::I, PieceKind::O, PieceKind::T]);
        fill_row_except(&mut engine, 19, &[3, 4, 5, 6]);
        engine.hard_drop();
        engine.apply_input(Command::TogglePause);
        assert!(engine.score() > 0);

        engine.reset();
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.level(), 1);
        assert_eq!(engine.lines_cleared(), 0);
        assert!(!engine.is_paused());
        assert!(!engine.is_game_over());
        assert_eq!(engine.board().locked_count(), 0);
        assert_eq!(engine.pieces_spawned(), 1);
        assert_eq!(engine.fall_interval(), Duration::from_millis(1000));
        assert!(engine.active_piece().is_some());
        assert!(engine.take_last_event().is_none());
    }

    #[test]
    fn test_reset_after_game_over() {
        let mut engine = engine_with(&[PieceKind::I, PieceKind::O]);
        engine.board_mut().set(1, 4, Cell::Locked(PieceKind::T));
        engine.tick();
        assert!(engine.is_game_over());

        engine.reset();
        assert!(!engine.is_game_over());
        assert!(engine.active_piece().is_some());
        assert!(engine.tick());
    }

    #[test]
    fn test_degenerate_board_starts_over() {
        let engine = GameEngine::new(1, 10, Some(5));
        // Every kind is at least two rows tall in rotation 0 except I
        if engine.active_piece().is_none() {
            assert!(engine.is_game_over());
        }
        let narrow = GameEngine::new(20, 1, Some(5));
        assert!(narrow.is_game_over());
    }
}
