//! Engine configuration
//!
//! Everything a game session fixes at construction time. Missing fields fall
//! back to the canonical 20x10 setup when deserialized.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::core::{EngineError, RandomizerMode};
use crate::types::{DEFAULT_COLS, DEFAULT_MIN_FALL_INTERVAL_MS, DEFAULT_ROWS};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    pub rows: u32,
    pub cols: u32,
    /// Randomizer seed; `None` takes one from OS entropy
    pub seed: Option<u64>,
    pub randomizer: RandomizerMode,
    /// Lower bound of the fall interval, in milliseconds
    pub min_fall_interval_ms: u32,
}

impl EngineConfig {
    pub fn new(rows: u32, cols: u32, seed: Option<u64>) -> Self {
        Self {
            rows,
            cols,
            seed,
            ..Self::default()
        }
    }

    pub fn with_randomizer(mut self, mode: RandomizerMode) -> Self {
        self.randomizer = mode;
        self
    }

    pub fn with_min_fall_interval_ms(mut self, ms: u32) -> Self {
        self.min_fall_interval_ms = ms;
        self
    }

    /// Reject configurations no game can run on
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(EngineError::InvalidConfig(format!(
                "board dimensions must be positive, got {}x{}",
                self.rows, self.cols
            )));
        }
        if self.rows > i32::MAX as u32 || self.cols > i32::MAX as u32 {
            return Err(EngineError::InvalidConfig(format!(
                "board dimensions too large: {}x{}",
                self.rows, self.cols
            )));
        }
        if self.min_fall_interval_ms == 0 {
            return Err(EngineError::InvalidConfig(
                "min_fall_interval_ms must be positive".into(),
            ));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            seed: None,
            randomizer: RandomizerMode::Uniform,
            min_fall_interval_ms: DEFAULT_MIN_FALL_INTERVAL_MS,
        }
    }
}
