//! Scoring module - line, combo and level counters
//!
//! Rules applied on every lock with `n` cleared rows:
//! - `n > 0`: total lines += n, combo += 1, level progress += n, and at most
//!   one level-up per lock once progress reaches the current goal.
//! - `n == 0`: the combo, previous clear size and previous spin bonus reset.

use crate::types::{SpinBonus, LEVEL_GRAVITY_TICKS, LEVEL_LINE_GOALS, MAX_LEVEL};

fn table_index(level: u32) -> usize {
    (level.clamp(1, MAX_LEVEL) - 1) as usize
}

/// Ticks between automatic falls at `level`; 0 means fall to the floor every tick.
pub fn gravity_ticks(level: u32) -> u32 {
    LEVEL_GRAVITY_TICKS[table_index(level)]
}

/// Lines needed to leave `level`.
pub fn line_goal(level: u32) -> u32 {
    LEVEL_LINE_GOALS[table_index(level)]
}

/// Session counters touched by locks and spin bonuses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearStats {
    pub total_lines: u32,
    pub level: u32,
    /// Lines cleared since the last level-up
    pub level_progress: u32,
    pub combo: u32,
    /// Rows cleared by the last lock (0 after a non-clearing lock)
    pub previous_clear: u32,
    pub previous_spin: SpinBonus,
}

impl ClearStats {
    pub fn new(start_level: u32) -> Self {
        Self {
            total_lines: 0,
            level: start_level.max(1),
            level_progress: 0,
            combo: 0,
            previous_clear: 0,
            previous_spin: SpinBonus::None,
        }
    }

    pub fn line_goal(&self) -> u32 {
        line_goal(self.level)
    }

    pub fn gravity_ticks(&self) -> u32 {
        gravity_ticks(self.level)
    }

    /// Apply a lock that cleared `rows` rows. Returns true on a level-up.
    pub fn record_lock(&mut self, rows: u32, max_level: u32) -> bool {
        if rows == 0 {
            self.combo = 0;
            self.previous_clear = 0;
            self.previous_spin = SpinBonus::None;
            return false;
        }

        self.total_lines += rows;
        self.combo += 1;
        self.level_progress += rows;
        self.previous_clear = rows;

        let goal = self.line_goal();
        if self.level_progress >= goal && self.level < max_level {
            self.level_progress -= goal;
            self.level += 1;
            return true;
        }
        false
    }

    pub fn record_spin(&mut self, bonus: SpinBonus) {
        if bonus.is_bonus() {
            self.previous_spin = bonus;
        }
    }
}

impl Default for ClearStats {
    fn default() -> Self {
        Self::new(1)
    }
}
