//! Engine error type
//!
//! Rejected moves and rotations are not errors; they come back as `false`.
//! These variants cover internal invariant breaks and bad configuration only.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A piece was locked at a placement `can_place` would have rejected.
    #[error("invariant violation: cannot lock piece cell at row {row}, col {col}")]
    InvariantViolation { row: i32, col: i32 },

    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),
}
