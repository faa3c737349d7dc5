//! Snapshot module - read-only state export
//!
//! A [`GameSnapshot`] is a plain value a presentation layer can render from
//! without borrowing the session. [`crate::Session::snapshot_into`] refills an
//! existing snapshot in place, so a render loop can keep one around.

use arrayvec::ArrayVec;
#[cfg(feature = "serde")]
use serde::Serialize;

use crate::piece::Piece;
use crate::types::{Cell, SpinBonus, BOARD_HEIGHT, BOARD_WIDTH, MAX_PREVIEW_DEPTH};

/// Grid rows of cell codes (0 = empty, 1..=7 = I..L)
pub type BoardCodes = [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ActiveSnapshot {
    pub kind: Cell,
    pub x: i8,
    pub y: i8,
    pub spin: u8,
    /// Absolute cell coordinates
    pub cells: [(i8, i8); 4],
}

impl From<&Piece> for ActiveSnapshot {
    fn from(value: &Piece) -> Self {
        Self {
            kind: value.kind(),
            x: value.x(),
            y: value.y(),
            spin: value.spin(),
            cells: value.cells(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct GameSnapshot {
    pub board: BoardCodes,
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub hold: Option<Cell>,
    pub hold_locked: bool,
    pub preview: ArrayVec<Cell, MAX_PREVIEW_DEPTH>,
    pub level: u32,
    pub lines: u32,
    pub level_progress: u32,
    pub line_goal: u32,
    pub previous_clear: u32,
    pub combo: u32,
    pub previous_spin: SpinBonus,
    pub game_over: bool,
    pub tick: u64,
    pub pieces_locked: u64,
    pub seed: u64,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.active = None;
        self.ghost_y = None;
        self.hold = None;
        self.hold_locked = false;
        self.preview.clear();
        self.level = 1;
        self.lines = 0;
        self.level_progress = 0;
        self.line_goal = 0;
        self.previous_clear = 0;
        self.combo = 0;
        self.previous_spin = SpinBonus::None;
        self.game_over = false;
        self.tick = 0;
        self.pieces_locked = 0;
        self.seed = 0;
    }

    /// Number of filled grid cells.
    pub fn filled_cells(&self) -> usize {
        self.board
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&code| code != 0)
            .count()
    }

    pub fn playable(&self) -> bool {
        !self.game_over && self.active.is_some()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            hold: None,
            hold_locked: false,
            preview: ArrayVec::new(),
            level: 1,
            lines: 0,
            level_progress: 0,
            line_goal: 0,
            previous_clear: 0,
            combo: 0,
            previous_spin: SpinBonus::None,
            game_over: false,
            tick: 0,
            pieces_locked: 0,
            seed: 0,
        };
        s.clear();
        s
    }
}
