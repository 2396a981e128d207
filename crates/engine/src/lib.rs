//! Game engine - the falling-block state machine
//!
//! Owns the board, the falling piece, the randomizer and the score/level
//! counters, and exposes the call-driven API a surrounding application needs:
//!
//! - [`GameEngine::tick`] advances one fall step
//! - [`GameEngine::apply_input`] applies one [`Command`](types::Command)
//! - [`GameEngine::reset`] starts over
//! - read-only accessors and [`GameSnapshot`] for rendering
//!
//! Rendering, key binding and the fall timer are left to the caller.
//!
//! # Example
//!
//! ```
//! use blockfall_engine::GameEngine;
//! use blockfall_types::Command;
//!
//! let mut game = GameEngine::new(20, 10, Some(12345));
//! assert!(game.active_piece().is_some());
//!
//! game.apply_input(Command::MoveLeft);
//! game.apply_input(Command::RotateCw);
//! game.apply_input(Command::HardDrop);
//!
//! assert_eq!(game.board().locked_count(), 4);
//! assert_eq!(game.pieces_spawned(), 2);
//! ```

pub mod config;
pub mod engine;
pub mod piece;
pub mod place;
pub mod snapshot;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use config::EngineConfig;
pub use engine::{GameEngine, LockEvent};
pub use piece::{ActivePiece, ActivePieceView};
pub use place::{apply_place, plan_place, PlaceError};
pub use snapshot::GameSnapshot;
