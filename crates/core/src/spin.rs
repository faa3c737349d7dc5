//! Spin module - T spin-bonus detection
//!
//! Runs only right after a successful rotation of a T piece. Two checks:
//!
//! 1. **Kick signature**: the rotation landed on a (±1, -2) kick ⇒ Full.
//! 2. **Corners**: look at the four corners of the T's 3×3 box. Walls, floor
//!    and occupied cells count as filled. Fewer than three filled ⇒ no bonus;
//!    otherwise Full when both corners on the pointing side are filled, Mini
//!    when they are not.

use crate::grid::Grid;
use crate::piece::Piece;
use crate::types::{Cell, SpinBonus};

/// Box corners in clockwise order starting top-left, with the first repeated
/// so that `[spin]` and `[spin + 1]` are the two front corners of any spin.
pub const CORNER_CYCLE: [(i8, i8); 5] = [(0, 0), (2, 0), (2, 2), (0, 2), (0, 0)];

fn corner_filled(piece: &Piece, grid: &Grid, (cx, cy): (i8, i8)) -> bool {
    let (x, y) = (piece.x() + cx, piece.y() + cy);
    grid.is_out_of_bounds(x, y) || grid.is_filled(x, y)
}

/// Classify the spin bonus of a piece that has just rotated.
pub fn detect(piece: &Piece, grid: &Grid) -> SpinBonus {
    if piece.kind() != Cell::T {
        return SpinBonus::None;
    }

    if let Some((dx, dy)) = piece.last_kick() {
        if dx.abs() == 1 && dy == -2 {
            return SpinBonus::Full;
        }
    }

    let filled = CORNER_CYCLE[..4]
        .iter()
        .filter(|&&corner| corner_filled(piece, grid, corner))
        .count();
    if filled < 3 {
        return SpinBonus::None;
    }

    let spin = (piece.spin() % 4) as usize;
    let front = [CORNER_CYCLE[spin], CORNER_CYCLE[spin + 1]];
    if front.iter().all(|&corner| corner_filled(piece, grid, corner)) {
        SpinBonus::Full
    } else {
        SpinBonus::Mini
    }
}
