//! Scoring module - line-clear points, level progression and fall speed
//!
//! Compatibility note: the point table, the level multiplier and the level
//! formula are a fixed contract:
//! - `score += LINE_SCORES[min(n, 4)] * level`, using the level in effect
//!   before the clear is counted
//! - `level = lines_cleared / 10 + 1`
//! - the fall interval is a non-increasing step function of the level that
//!   never drops below the configured floor

use std::time::Duration;

use crate::types::{FALL_INTERVALS_MS, LINES_PER_LEVEL, LINE_SCORES, START_LEVEL};

/// Points for clearing `lines` rows at `level`
///
/// # Examples
///
/// ```
/// use blockfall_core::scoring::line_clear_score;
///
/// assert_eq!(line_clear_score(1, 1), 100);
/// assert_eq!(line_clear_score(4, 3), 2400);
/// assert_eq!(line_clear_score(0, 5), 0);
/// ```
pub fn line_clear_score(lines: u32, level: u32) -> u64 {
    let index = lines.min(4) as usize;
    LINE_SCORES[index] * u64::from(level)
}

/// Level for a total number of cleared lines
pub fn level_for_lines(lines_cleared: u32) -> u32 {
    lines_cleared / LINES_PER_LEVEL + START_LEVEL
}

/// Fall interval in milliseconds for `level`, floored at `floor_ms`
pub fn fall_interval_ms(level: u32, floor_ms: u32) -> u32 {
    let index = (level.saturating_sub(START_LEVEL) as usize).min(FALL_INTERVALS_MS.len() - 1);
    FALL_INTERVALS_MS[index].max(floor_ms)
}

/// [`fall_interval_ms`] as a [`Duration`]
pub fn fall_interval(level: u32, floor_ms: u32) -> Duration {
    Duration::from_millis(u64::from(fall_interval_ms(level, floor_ms)))
}

/// Counters after a line clear has been scored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreUpdate {
    /// Points added by this clear
    pub score_delta: u64,
    /// Total lines cleared so far
    pub lines_cleared: u32,
    /// Level after counting this clear
    pub level: u32,
    /// Whether this clear crossed a level boundary
    pub level_up: bool,
}

/// Score a clear of `lines` rows given the counters before the clear
///
/// A zero-line lock changes nothing.
pub fn score_clear(lines: u32, level: u32, lines_before: u32) -> ScoreUpdate {
    if lines == 0 {
        return ScoreUpdate {
            score_delta: 0,
            lines_cleared: lines_before,
            level,
            level_up: false,
        };
    }

    let score_delta = line_clear_score(lines, level);
    let lines_cleared = lines_before.saturating_add(lines);
    let new_level = level_for_lines(lines_cleared);

    ScoreUpdate {
        score_delta,
        lines_cleared,
        level: new_level,
        level_up: new_level > level,
    }
}
