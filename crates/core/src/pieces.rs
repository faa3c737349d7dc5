//! Pieces module - occupancy patterns and the rotation system
//!
//! Every shape is an N×N boolean matrix (N = 4 for I, 3 for the others)
//! anchored at its top-left cell. Rotation turns the whole matrix in place,
//! then tries the kick offsets of the standard rotation system in order.
//! Reference: https://tetris.wiki/SRS

use crate::types::{Cell, RotationDirection};

/// Offset of a single cell relative to the pattern's top-left corner
pub type MinoOffset = (i8, i8);

/// Candidate (dx, dy) offsets tried during a rotation, authored y-up.
pub type KickList = [(i8, i8); 5];

/// Largest pattern side (the I piece)
const MAX_SIZE: usize = 4;

/// Square occupancy matrix of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pattern {
    size: u8,
    rows: [[bool; MAX_SIZE]; MAX_SIZE],
}

impl Pattern {
    const fn from_rows<const N: usize>(src: [[u8; N]; N]) -> Self {
        let mut rows = [[false; MAX_SIZE]; MAX_SIZE];
        let mut r = 0;
        while r < N {
            let mut c = 0;
            while c < N {
                rows[r][c] = src[r][c] != 0;
                c += 1;
            }
            r += 1;
        }
        Self { size: N as u8, rows }
    }

    /// Spawn orientation pattern of a piece kind.
    ///
    /// # Panics
    ///
    /// Panics for `Cell::Empty`, which has no shape.
    pub fn spawn(kind: Cell) -> Self {
        match kind {
            Cell::I => I_SPAWN,
            Cell::O => O_SPAWN,
            Cell::T => T_SPAWN,
            Cell::S => S_SPAWN,
            Cell::Z => Z_SPAWN,
            Cell::J => J_SPAWN,
            Cell::L => L_SPAWN,
            Cell::Empty => panic!("the empty cell has no pattern"),
        }
    }

    /// Side length of the matrix
    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn is_filled(&self, col: usize, row: usize) -> bool {
        col < self.size as usize && row < self.size as usize && self.rows[row][col]
    }

    /// Filled cells as (dx, dy) offsets, row by row.
    pub fn offsets(&self) -> impl Iterator<Item = MinoOffset> + '_ {
        let n = self.size as usize;
        (0..n).flat_map(move |row| {
            (0..n)
                .filter(move |&col| self.rows[row][col])
                .map(move |col| (col as i8, row as i8))
        })
    }

    pub fn filled_count(&self) -> usize {
        self.offsets().count()
    }

    /// Quarter turn clockwise: reverse the rows, then transpose.
    pub fn rotated_cw(&self) -> Self {
        let n = self.size as usize;
        let mut rows = [[false; MAX_SIZE]; MAX_SIZE];
        for (r, row) in rows.iter_mut().enumerate().take(n) {
            for (c, cell) in row.iter_mut().enumerate().take(n) {
                *cell = self.rows[n - 1 - c][r];
            }
        }
        Self { size: self.size, rows }
    }

    /// Quarter turn counter-clockwise: transpose, then reverse the rows.
    pub fn rotated_ccw(&self) -> Self {
        let n = self.size as usize;
        let mut rows = [[false; MAX_SIZE]; MAX_SIZE];
        for (r, row) in rows.iter_mut().enumerate().take(n) {
            for (c, cell) in row.iter_mut().enumerate().take(n) {
                *cell = self.rows[c][n - 1 - r];
            }
        }
        Self { size: self.size, rows }
    }

    pub fn rotated(&self, direction: RotationDirection) -> Self {
        match direction {
            RotationDirection::Clockwise => self.rotated_cw(),
            RotationDirection::CounterClockwise => self.rotated_ccw(),
            RotationDirection::Flip => self.rotated_cw().rotated_cw(),
        }
    }
}

const I_SPAWN: Pattern = Pattern::from_rows([
    [0, 0, 0, 0],
    [1, 1, 1, 1],
    [0, 0, 0, 0],
    [0, 0, 0, 0],
]);
const O_SPAWN: Pattern = Pattern::from_rows([[0, 1, 1], [0, 1, 1], [0, 0, 0]]);
const T_SPAWN: Pattern = Pattern::from_rows([[0, 1, 0], [1, 1, 1], [0, 0, 0]]);
const S_SPAWN: Pattern = Pattern::from_rows([[0, 1, 1], [1, 1, 0], [0, 0, 0]]);
const Z_SPAWN: Pattern = Pattern::from_rows([[1, 1, 0], [0, 1, 1], [0, 0, 0]]);
const J_SPAWN: Pattern = Pattern::from_rows([[1, 0, 0], [1, 1, 1], [0, 0, 0]]);
const L_SPAWN: Pattern = Pattern::from_rows([[0, 0, 1], [1, 1, 1], [0, 0, 0]]);

/// Kick table indexed by `[spin][0 = clockwise, 1 = counter-clockwise]`.
pub type KickTable = [[KickList; 2]; 4];

/// JLSTZ kick table (shared by J, L, S, T, Z)
const JLSTZ_KICKS: KickTable = [
    [
        // 0->1 (clockwise)
        [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
        // 0->3 (counter-clockwise)
        [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    ],
    [
        // 1->2
        [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
        // 1->0
        [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    ],
    [
        // 2->3
        [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
        // 2->1
        [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    ],
    [
        // 3->0
        [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
        // 3->2
        [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    ],
];

/// I piece kick table (different from JLSTZ)
const I_KICKS: KickTable = [
    [
        // 0->1
        [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
        // 0->3
        [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    ],
    [
        // 1->2
        [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
        // 1->0
        [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    ],
    [
        // 2->3
        [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
        // 2->1
        [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    ],
    [
        // 3->0
        [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
        // 3->2
        [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    ],
];

/// O piece never kicks (it never rotates)
const O_KICKS: KickTable = [[[(0, 0); 5]; 2]; 4];

/// Get the kick table for a piece kind
pub fn kick_table(kind: Cell) -> &'static KickTable {
    match kind {
        Cell::I => &I_KICKS,
        Cell::O => &O_KICKS,
        _ => &JLSTZ_KICKS,
    }
}

/// Kicks to try when turning `kind` a quarter turn away from `spin`.
pub fn kicks(kind: Cell, spin: u8, clockwise: bool) -> &'static KickList {
    let column = if clockwise { 0 } else { 1 };
    &kick_table(kind)[(spin % 4) as usize][column]
}
