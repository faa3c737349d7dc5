//! Rule parameters
//!
//! Defaults are the reference rules. [`RulesConfig::from_env`] lets tools
//! override them with `TTRIS_*` variables; grid size and the level tables
//! stay compile-time constants.

use anyhow::{ensure, Result};

use crate::grid::Grid;
use crate::piece::Piece;
use crate::types::{
    Cell, LOCK_DELAY_TICKS, LOCK_RESET_LIMIT, MAX_LEVEL, MAX_PREVIEW_DEPTH, PREVIEW_DEPTH,
    SPAWN_POSITION,
};

/// Tunable rule parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RulesConfig {
    pub preview_depth: usize,
    pub lock_delay_ticks: u32,
    pub lock_reset_limit: u8,
    pub max_level: u32,
    pub start_level: u32,
    pub spawn_x: i8,
    pub spawn_y: i8,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            preview_depth: PREVIEW_DEPTH,
            lock_delay_ticks: LOCK_DELAY_TICKS,
            lock_reset_limit: LOCK_RESET_LIMIT,
            max_level: MAX_LEVEL,
            start_level: 1,
            spawn_x: SPAWN_POSITION.0,
            spawn_y: SPAWN_POSITION.1,
        }
    }
}

impl RulesConfig {
    /// Create from environment variables; unset or unparsable values keep defaults.
    ///
    /// | Variable | Field |
    /// |----------|-------|
    /// | `TTRIS_PREVIEW_DEPTH` | `preview_depth` |
    /// | `TTRIS_LOCK_DELAY_TICKS` | `lock_delay_ticks` |
    /// | `TTRIS_LOCK_RESET_LIMIT` | `lock_reset_limit` |
    /// | `TTRIS_MAX_LEVEL` | `max_level` |
    /// | `TTRIS_START_LEVEL` | `start_level` |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`RulesConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        fn parse_or<T: std::str::FromStr>(raw: Option<String>, default: T) -> T {
            raw.and_then(|s| s.trim().parse().ok()).unwrap_or(default)
        }

        let defaults = Self::default();
        Self {
            preview_depth: parse_or(lookup("TTRIS_PREVIEW_DEPTH"), defaults.preview_depth),
            lock_delay_ticks: parse_or(
                lookup("TTRIS_LOCK_DELAY_TICKS"),
                defaults.lock_delay_ticks,
            ),
            lock_reset_limit: parse_or(
                lookup("TTRIS_LOCK_RESET_LIMIT"),
                defaults.lock_reset_limit,
            ),
            max_level: parse_or(lookup("TTRIS_MAX_LEVEL"), defaults.max_level),
            start_level: parse_or(lookup("TTRIS_START_LEVEL"), defaults.start_level),
            ..defaults
        }
    }

    pub fn spawn_origin(&self) -> (i8, i8) {
        (self.spawn_x, self.spawn_y)
    }

    /// Reject values the rules cannot run with.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.preview_depth <= MAX_PREVIEW_DEPTH,
            "preview depth {} exceeds the maximum of {}",
            self.preview_depth,
            MAX_PREVIEW_DEPTH
        );
        ensure!(
            (1..=MAX_LEVEL).contains(&self.max_level),
            "max level {} must be between 1 and {}",
            self.max_level,
            MAX_LEVEL
        );
        ensure!(
            (1..=self.max_level).contains(&self.start_level),
            "start level {} must be between 1 and max level {}",
            self.start_level,
            self.max_level
        );

        let empty = Grid::new();
        for kind in Cell::PIECES {
            ensure!(
                Piece::at(kind, self.spawn_x, self.spawn_y).is_valid_position(&empty),
                "{:?} does not fit the grid at spawn origin ({}, {})",
                kind,
                self.spawn_x,
                self.spawn_y
            );
        }
        Ok(())
    }
}
