#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::piece::ActivePieceView;
use crate::types::{PieceKind, DEFAULT_COLS, DEFAULT_ROWS};

/// Owned copy of everything a render layer or observer needs
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GameSnapshot {
    pub rows: u32,
    pub cols: u32,
    /// Row-major cell codes: 0 = empty, 1..=7 = kind in catalog order
    pub board: Vec<u8>,
    pub active: Option<ActivePieceView>,
    pub ghost_anchor: Option<(i32, i32)>,
    pub next: PieceKind,
    pub score: u64,
    pub level: u32,
    pub lines_cleared: u32,
    pub fall_interval_ms: u64,
    pub paused: bool,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.rows = DEFAULT_ROWS;
        self.cols = DEFAULT_COLS;
        self.board.clear();
        self.board
            .resize(DEFAULT_ROWS as usize * DEFAULT_COLS as usize, 0);
        self.active = None;
        self.ghost_anchor = None;
        self.next = PieceKind::I;
        self.score = 0;
        self.level = 1;
        self.lines_cleared = 0;
        self.fall_interval_ms = 0;
        self.paused = false;
        self.game_over = false;
    }

    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }

    /// Cell code at (row, col), if in bounds
    pub fn code_at(&self, row: i32, col: i32) -> Option<u8> {
        if row < 0 || col < 0 || row as u32 >= self.rows || col as u32 >= self.cols {
            return None;
        }
        self.board
            .get(row as usize * self.cols as usize + col as usize)
            .copied()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            rows: 0,
            cols: 0,
            board: Vec::new(),
            active: None,
            ghost_anchor: None,
            next: PieceKind::I,
            score: 0,
            level: 1,
            lines_cleared: 0,
            fall_interval_ms: 0,
            paused: false,
            game_over: false,
        };
        s.clear();
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SequenceSource;
    use crate::types::Command;
    use crate::{EngineConfig, GameEngine};

    #[test]
    fn test_default_snapshot() {
        let s = GameSnapshot::default();
        assert_eq!(s.board.len(), 200);
        assert!(s.board.iter().all(|&c| c == 0));
        assert!(s.playable());
        assert_eq!(s.code_at(0, 0), Some(0));
        assert_eq!(s.code_at(20, 0), None);
        assert_eq!(s.code_at(0, -1), None);
    }

    #[test]
    fn test_snapshot_reflects_engine() {
        let mut engine = GameEngine::with_source(
            EngineConfig::new(20, 10, None),
            Box::new(SequenceSource::new([PieceKind::O, PieceKind::L])),
        )
        .unwrap();
        engine.apply_input(Command::HardDrop);

        let s = engine.snapshot();
        assert_eq!((s.rows, s.cols), (20, 10));
        // O has catalog index 1
        assert_eq!(s.code_at(19, 4), Some(2));
        assert_eq!(s.code_at(18, 5), Some(2));
        assert_eq!(s.active.map(|a| a.kind), Some(PieceKind::L));
        assert_eq!(s.next, PieceKind::O);
        assert_eq!(s.fall_interval_ms, 1000);
        assert_eq!(s.ghost_anchor, engine.ghost_anchor());
        assert!(s.playable());
    }

    #[test]
    fn test_snapshot_into_reuses_buffer() {
        let engine = GameEngine::new(8, 6, Some(3));
        let mut s = GameSnapshot::default();
        engine.snapshot_into(&mut s);
        assert_eq!(s.board.len(), 48);
        assert_eq!((s.rows, s.cols), (8, 6));
    }
}
