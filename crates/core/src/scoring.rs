//! Scoring module - line clear points, levels and gravity speed
//!
//! One fixed ruleset:
//! - Points per lock come from [`LINE_SCORES`] indexed by rows cleared at once,
//!   multiplied by the current level.
//! - Level is `1 + lines / 10`.
//! - Gravity interval is `800 - (level - 1) * 60` ms, floored at 120 ms.

use crate::types::{INITIAL_DROP_MS, LEVEL_SPEEDUP_MS, LINES_PER_LEVEL, LINE_SCORES, MIN_DROP_MS};

/// Points for clearing `rows` rows in a single lock at `level`.
///
/// More than four rows can only come from a hand-built grid; they score as four.
pub fn line_clear_score(rows: usize, level: u32) -> u32 {
    let base = LINE_SCORES[rows.min(LINE_SCORES.len() - 1)];
    base.saturating_mul(level)
}

/// Level reached after clearing `lines` lines in total.
pub fn level_for_lines(lines: u32) -> u32 {
    1 + lines / LINES_PER_LEVEL
}

/// Gravity interval for a level (level 1 is the slowest).
pub fn drop_interval_ms(level: u32) -> u32 {
    let speedup = level.saturating_sub(1).saturating_mul(LEVEL_SPEEDUP_MS);
    INITIAL_DROP_MS.saturating_sub(speedup).max(MIN_DROP_MS)
}
