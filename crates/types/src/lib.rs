//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the engine.
//! All types are plain data with no required dependencies, so they can be used
//! by the rules crate, the engine, and any render/input layer sitting on top.
//!
//! # Board Dimensions
//!
//! The canonical playfield is 20 rows by 10 columns. Row 0 is the top of the
//! board; columns grow left to right. Dimensions are chosen per game session
//! and fixed for its lifetime.
//!
//! # Scoring
//!
//! | Lines | Base points |
//! |-------|-------------|
//! | 1 | 100 |
//! | 2 | 300 |
//! | 3 | 500 |
//! | 4 | 800 |
//!
//! Base points are multiplied by the current level (which starts at 1).
//!
//! # Fall Intervals by Level
//!
//! | Level | Interval |
//! |-------|----------|
//! | 1 | 1000ms |
//! | 2 | 800ms |
//! | 3 | 650ms |
//! | 4 | 500ms |
//! | 5 | 400ms |
//! | 6 | 320ms |
//! | 7 | 250ms |
//! | 8 | 200ms |
//! | 9+ | 160ms (never below the configured floor, 100ms by default) |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Cell, Command, PieceKind, DEFAULT_COLS, DEFAULT_ROWS};
//!
//! let piece = PieceKind::T;
//! assert_eq!(PieceKind::from_str("t"), Some(piece));
//!
//! let cell = Cell::Locked(piece);
//! assert!(cell.is_locked());
//! assert_eq!(cell.kind(), Some(PieceKind::T));
//!
//! assert_eq!(Command::from_str("rotateCw"), Some(Command::RotateCw));
//!
//! assert_eq!(DEFAULT_ROWS, 20);
//! assert_eq!(DEFAULT_COLS, 10);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Canonical board height in rows
pub const DEFAULT_ROWS: u32 = 20;

/// Canonical board width in columns
pub const DEFAULT_COLS: u32 = 10;

/// Number of cleared lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Level a fresh game starts at
pub const START_LEVEL: u32 = 1;

/// Base points for clearing N lines in one lock, indexed by N (capped at 4).
///
/// The awarded score is `LINE_SCORES[n] * level`.
pub const LINE_SCORES: [u64; 5] = [0, 100, 300, 500, 800];

/// Fall intervals by level (milliseconds per row)
///
/// Index 0 = Level 1, Index 8 = Level 9+
pub const FALL_INTERVALS_MS: [u32; 9] = [1000, 800, 650, 500, 400, 320, 250, 200, 160];

/// Default lower bound for the fall interval (100ms)
pub const DEFAULT_MIN_FALL_INTERVAL_MS: u32 = 100;

/// The seven piece kinds
///
/// Each kind has a distinct shape and (in the render layer) color:
/// - **I**: Cyan, straight bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Magenta, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds, in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Position in [`PieceKind::ALL`]
    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }

    /// Inverse of [`PieceKind::index`], wrapping modulo 7
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }
}

/// A cell on the game board
///
/// Locked cells remember which kind locked them; the engine never reads that
/// tag back, it only exists for the render layer's colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Cell {
    #[default]
    Empty,
    Locked(PieceKind),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, Cell::Locked(_))
    }

    pub fn kind(&self) -> Option<PieceKind> {
        match self {
            Cell::Empty => None,
            Cell::Locked(kind) => Some(*kind),
        }
    }

    /// Compact code used by snapshots: 0 = empty, 1..=7 = kind in catalog order
    pub fn code(&self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Locked(kind) => kind.index() as u8 + 1,
        }
    }
}

/// Rotation direction for a rotate attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RotationDirection {
    Cw,
    Ccw,
}

impl RotationDirection {
    /// Apply this direction to a rotation index within `count` states
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::RotationDirection;
    ///
    /// assert_eq!(RotationDirection::Cw.apply(3, 4), 0);
    /// assert_eq!(RotationDirection::Ccw.apply(0, 4), 3);
    /// assert_eq!(RotationDirection::Ccw.apply(0, 1), 0);
    /// ```
    pub fn apply(&self, rotation_index: usize, count: usize) -> usize {
        let count = count.max(1);
        match self {
            RotationDirection::Cw => (rotation_index % count + 1) % count,
            RotationDirection::Ccw => (rotation_index % count + count - 1) % count,
        }
    }
}

/// Input commands accepted by the engine
///
/// These are produced by whatever input layer drives the game (keyboard,
/// bot, replay file) and applied with `GameEngine::apply_input`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Command {
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Move piece one row down, locking it if it cannot move
    SoftDrop,
    /// Drop piece to its lowest valid row and lock it
    HardDrop,
    /// Rotate piece clockwise
    RotateCw,
    /// Rotate piece counter-clockwise
    RotateCcw,
    /// Toggle pause state
    TogglePause,
}

impl Command {
    /// Parse a command from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("HARDDROP"), Some(Command::HardDrop));
    /// assert_eq!(Command::from_str("hold"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "softdrop" => Some(Command::SoftDrop),
            "harddrop" => Some(Command::HardDrop),
            "rotatecw" => Some(Command::RotateCw),
            "rotateccw" => Some(Command::RotateCcw),
            "togglepause" | "pause" => Some(Command::TogglePause),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDrop => "softDrop",
            Command::HardDrop => "hardDrop",
            Command::RotateCw => "rotateCw",
            Command::RotateCcw => "rotateCcw",
            Command::TogglePause => "togglePause",
        }
    }
}
