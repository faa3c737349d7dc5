//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the rules engine.
//! All types are plain data with no required dependencies, making them usable
//! from the core, from presentation layers, and from tooling alike.
//!
//! # Grid Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 25 rows (indexed 0-24, row 0 is the top)
//! - **Overflow**: the top 5 rows are spawn/rotation headroom; rows 5-24 are visible
//! - **Spawn position**: (3, 2) for every piece
//!
//! # Timing Constants
//!
//! Timing is measured in ticks of a fixed 60 Hz frame clock:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_RATE_HZ` | 60 | Frame clock driving `Session::step` |
//! | `LOCK_DELAY_TICKS` | 60 | Ticks a resting piece may wait before locking |
//! | `LOCK_RESET_LIMIT` | 15 | Max lock timer resets per piece |
//!
//! # Gravity by Level
//!
//! Ticks per automatic fall, level 1 through 15. Zero means the piece falls
//! straight to the floor on every tick.
//!
//! | Level | 1 | 2 | 3 | 4 | 5 | 6 | 7 | 8 | 9 | 10 | 11 | 12 | 13 | 14 | 15 |
//! |-------|---|---|---|---|---|---|---|---|---|----|----|----|----|----|----|
//! | Ticks | 60 | 48 | 37 | 28 | 21 | 16 | 11 | 8 | 6 | 4 | 3 | 2 | 1 | 1 | 0 |
//!
//! # Examples
//!
//! ```
//! use ttris_types::{Cell, Intent, RotationDirection, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let kind = Cell::from_str("t").unwrap();
//! assert_eq!(kind, Cell::T);
//! assert!(kind.is_filled());
//! assert!(Cell::Empty.is_empty());
//!
//! assert_eq!(RotationDirection::Clockwise.apply(3), 0);
//!
//! assert_eq!(Intent::from_str("rotateCw"), Some(Intent::RotateCw));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 25);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Grid width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Grid height in cells, overflow rows included (25 rows)
pub const BOARD_HEIGHT: u8 = 25;

/// Rows above the visible play-field reserved for spawning and rotation
pub const OVERFLOW_HEIGHT: u8 = 5;

/// Rows of the play-field shown to the player
pub const VISIBLE_HEIGHT: u8 = BOARD_HEIGHT - OVERFLOW_HEIGHT;

/// Frame clock rate the tick constants are authored against
pub const TICK_RATE_HZ: u32 = 60;

/// Lock delay in ticks (one second at 60 Hz)
pub const LOCK_DELAY_TICKS: u32 = 60;

/// Maximum number of lock timer resets per piece (15)
pub const LOCK_RESET_LIMIT: u8 = 15;

/// Highest reachable level
pub const MAX_LEVEL: u32 = 15;

/// Number of upcoming pieces shown in the preview
pub const PREVIEW_DEPTH: usize = 5;

/// Upper bound accepted for a configured preview depth
pub const MAX_PREVIEW_DEPTH: usize = 7;

/// Spawn origin (x, y) of a piece's top-left pattern cell
pub const SPAWN_POSITION: (i8, i8) = (3, 2);

/// Ticks per automatic fall, indexed by `level - 1`.
pub const LEVEL_GRAVITY_TICKS: [u32; MAX_LEVEL as usize] =
    [60, 48, 37, 28, 21, 16, 11, 8, 6, 4, 3, 2, 1, 1, 0];

/// Lines needed to leave a level, indexed by `level - 1` (five per level).
pub const LEVEL_LINE_GOALS: [u32; MAX_LEVEL as usize] =
    [5, 10, 15, 20, 25, 30, 35, 40, 45, 50, 55, 60, 65, 70, 75];


/// Value of a single grid cell, also used as the shape kind of a piece.
///
/// `Empty` is the zero value. Presence must be tested with [`Cell::is_empty`]
/// or [`Cell::is_filled`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Cell {
    #[default]
    Empty,
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl Cell {
    /// The seven piece kinds, in canonical order.
    pub const PIECES: [Cell; 7] = [
        Cell::I,
        Cell::O,
        Cell::T,
        Cell::S,
        Cell::Z,
        Cell::J,
        Cell::L,
    ];

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub fn is_filled(self) -> bool {
        self != Cell::Empty
    }

    /// Numeric code for compact grid export (0 = empty, 1..=7 = I..L).
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use ttris_types::Cell;
    ///
    /// assert_eq!(Cell::from_str("i"), Some(Cell::I));
    /// assert_eq!(Cell::from_str("L"), Some(Cell::L));
    /// assert_eq!(Cell::from_str("empty"), Some(Cell::Empty));
    /// assert_eq!(Cell::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "empty" => Some(Cell::Empty),
            "i" => Some(Cell::I),
            "o" => Some(Cell::O),
            "t" => Some(Cell::T),
            "s" => Some(Cell::S),
            "z" => Some(Cell::Z),
            "j" => Some(Cell::J),
            "l" => Some(Cell::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(self) -> &'static str {
        match self {
            Cell::Empty => "empty",
            Cell::I => "i",
            Cell::O => "o",
            Cell::T => "t",
            Cell::S => "s",
            Cell::Z => "z",
            Cell::J => "j",
            Cell::L => "l",
        }
    }
}

/// Direction of a rotation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
    /// Half turn, applied as two clockwise steps.
    Flip,
}

impl RotationDirection {
    /// Spin index reached from `spin` after this rotation (mod 4).
    pub fn apply(self, spin: u8) -> u8 {
        let step = match self {
            RotationDirection::Clockwise => 1,
            RotationDirection::CounterClockwise => 3,
            RotationDirection::Flip => 2,
        };
        (spin % 4 + step) % 4
    }
}

/// Discrete player intents delivered to the core once per tick.
///
/// Key repeat and debouncing happen before intents reach the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Intent {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell down
    SoftDrop,
    /// Drop piece to the floor and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Rotate piece 180°
    Rotate180,
    /// Swap the active piece with the hold slot
    Hold,
}

impl Intent {
    pub const ALL: [Intent; 8] = [
        Intent::MoveLeft,
        Intent::MoveRight,
        Intent::SoftDrop,
        Intent::HardDrop,
        Intent::RotateCw,
        Intent::RotateCcw,
        Intent::Rotate180,
        Intent::Hold,
    ];

    /// Parse intent from string
    ///
    /// # Examples
    ///
    /// ```
    /// use ttris_types::Intent;
    ///
    /// assert_eq!(Intent::from_str("moveLeft"), Some(Intent::MoveLeft));
    /// assert_eq!(Intent::from_str("harddrop"), Some(Intent::HardDrop));
    /// assert_eq!(Intent::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Intent::MoveLeft),
            "moveright" => Some(Intent::MoveRight),
            "softdrop" => Some(Intent::SoftDrop),
            "harddrop" => Some(Intent::HardDrop),
            "rotatecw" => Some(Intent::RotateCw),
            "rotateccw" => Some(Intent::RotateCcw),
            "rotate180" => Some(Intent::Rotate180),
            "hold" => Some(Intent::Hold),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::MoveLeft => "moveLeft",
            Intent::MoveRight => "moveRight",
            Intent::SoftDrop => "softDrop",
            Intent::HardDrop => "hardDrop",
            Intent::RotateCw => "rotateCw",
            Intent::RotateCcw => "rotateCcw",
            Intent::Rotate180 => "rotate180",
            Intent::Hold => "hold",
        }
    }

    /// Rotation requested by this intent, if any.
    pub fn rotation(self) -> Option<RotationDirection> {
        match self {
            Intent::RotateCw => Some(RotationDirection::Clockwise),
            Intent::RotateCcw => Some(RotationDirection::CounterClockwise),
            Intent::Rotate180 => Some(RotationDirection::Flip),
            _ => None,
        }
    }
}

/// Spin bonus classification
///
/// Only the T piece earns a bonus, and only right after a successful rotation.
/// - **None**: No bonus
/// - **Mini**: 3+ corners filled but the two front corners are not both filled
/// - **Full**: both front corners filled, or the rotation used the (±1, -2) kick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SpinBonus {
    #[default]
    None,
    Mini,
    Full,
}

impl SpinBonus {
    pub fn is_bonus(self) -> bool {
        self != SpinBonus::None
    }

    /// Returns `None` for `SpinBonus::None`, `Some("mini")` for Mini,
    /// and `Some("full")` for Full.
    pub fn as_str(self) -> Option<&'static str> {
        match self {
            SpinBonus::None => None,
            SpinBonus::Mini => Some("mini"),
            SpinBonus::Full => Some("full"),
        }
    }
}

/// Outward event emitted by the core for the presentation layer.
///
/// Signals carry no core-side state; the presentation layer maps them to
/// sounds and effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "signal", rename_all = "camelCase"))]
pub enum Signal {
    /// A horizontal move or soft drop changed the piece position this tick
    Movement,
    /// A rotation succeeded this tick
    Rotation,
    /// The rotation earned a spin bonus
    Special,
    /// The active piece was swapped into the hold slot
    Hold,
    /// A piece locked into the grid
    HardDrop,
    /// Rows were cleared; `combo` is the combo count after this clear
    LineClear { combo: u32 },
    /// Four rows were cleared at once
    LineClearSpecial,
    /// The next piece could not spawn
    GameOver,
}

/// Presentation name for a clear of `rows` rows.
pub fn clear_name(rows: u32) -> Option<&'static str> {
    match rows {
        1 => Some("single"),
        2 => Some("double"),
        3 => Some("triple"),
        4 => Some("tetris"),
        _ => None,
    }
}
