//! Core game rules - pure, deterministic, and testable
//!
//! This crate contains the rule pieces the engine is built from. It has
//! **no dependencies** on UI, input, timers, or I/O:
//!
//! - **Deterministic**: the same seed produces the same piece stream
//! - **Testable**: every rule is a plain function or a small value type
//! - **Portable**: runs anywhere, headless included
//!
//! # Module Structure
//!
//! - [`shapes`]: static rotation tables and wall-kick offsets for the 7 kinds
//! - [`board`]: fixed-size grid with collision testing and line clearing
//! - [`rng`]: piece randomizer with one-piece lookahead and pluggable sources
//! - [`scoring`]: line-clear points, level formula, fall-speed curve
//! - [`error`]: invariant and configuration errors
//!
//! # Example
//!
//! ```
//! use blockfall_core::Board;
//! use blockfall_types::{Cell, PieceKind};
//!
//! let mut board = Board::new(20, 10);
//! assert!(board.can_place(PieceKind::I, 0, (19, 0)));
//! board.lock(PieceKind::I, 0, (19, 0)).unwrap();
//! assert_eq!(board.get(19, 3), Some(Cell::Locked(PieceKind::I)));
//! assert!(!board.can_place(PieceKind::O, 0, (18, 0)));
//! ```

pub mod board;
pub mod error;
pub mod rng;
pub mod scoring;
pub mod shapes;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use error::EngineError;
pub use rng::{
    BagSource, PieceSource, Randomizer, RandomizerMode, SequenceSource, SimpleRng, UniformSource,
};
pub use scoring::{fall_interval, level_for_lines, line_clear_score, score_clear, ScoreUpdate};
pub use shapes::{kick_offsets, rotation_count, shape_cells, shape_mask};
