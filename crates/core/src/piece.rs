//! Piece module - the falling piece
//!
//! A [`Piece`] is a small `Copy` value: kind, pattern, origin, spin, the last
//! kick it used, and its lock-delay state. Geometry changes go through the
//! pure `try_*` functions, which return a moved copy when the target position
//! is legal; the committing forms replace `self` with that copy.

use tracing::trace;

use crate::grid::Grid;
use crate::pieces::{kicks, Pattern};
use crate::types::{Cell, RotationDirection, SPAWN_POSITION};

/// Kick offset (dx, dy) as listed in the kick tables, y pointing up.
pub type Kick = (i8, i8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: Cell,
    pattern: Pattern,
    x: i8,
    y: i8,
    spin: u8,
    last_kick: Option<Kick>,
    /// Tick at which the lock timer started; `None` while idle.
    lock_delay_start: Option<u64>,
    lock_resets: u8,
    ghost_y: i8,
}

impl Piece {
    /// Spawn-orientation piece at the reference spawn origin.
    pub fn new(kind: Cell) -> Self {
        Self::at(kind, SPAWN_POSITION.0, SPAWN_POSITION.1)
    }

    /// Spawn-orientation piece with its pattern's top-left cell at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if `kind` is `Cell::Empty`.
    pub fn at(kind: Cell, x: i8, y: i8) -> Self {
        assert!(kind.is_filled(), "a piece cannot be built from an empty cell");
        Self {
            kind,
            pattern: Pattern::spawn(kind),
            x,
            y,
            spin: 0,
            last_kick: None,
            lock_delay_start: None,
            lock_resets: 0,
            ghost_y: y,
        }
    }

    pub fn kind(&self) -> Cell {
        self.kind
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn x(&self) -> i8 {
        self.x
    }

    pub fn y(&self) -> i8 {
        self.y
    }

    /// Orientation, 0 = spawn, incrementing clockwise (mod 4).
    pub fn spin(&self) -> u8 {
        self.spin
    }

    /// Kick used by the last successful rotation.
    pub fn last_kick(&self) -> Option<Kick> {
        self.last_kick
    }

    pub fn lock_delay_start(&self) -> Option<u64> {
        self.lock_delay_start
    }

    pub fn lock_resets(&self) -> u8 {
        self.lock_resets
    }

    /// Cached resting row, valid after the last move, rotation or refresh.
    pub fn ghost_y(&self) -> i8 {
        self.ghost_y
    }

    /// Absolute grid coordinates of the four filled cells.
    pub fn cells(&self) -> [(i8, i8); 4] {
        let mut out = [(0, 0); 4];
        for (slot, (dx, dy)) in out.iter_mut().zip(self.pattern.offsets()) {
            *slot = (self.x + dx, self.y + dy);
        }
        out
    }

    /// Every filled cell is inside the grid and on an empty cell.
    pub fn is_valid_position(&self, grid: &Grid) -> bool {
        self.cells().iter().all(|&(x, y)| grid.is_vacant(x, y))
    }

    pub fn can_fall(&self, grid: &Grid) -> bool {
        self.cells().iter().all(|&(x, y)| grid.is_vacant(x, y + 1))
    }

    fn offset_by(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Copy moved by (dx, dy), if that position is valid.
    pub fn try_translate(&self, dx: i8, dy: i8, grid: &Grid) -> Option<Self> {
        let mut moved = self.offset_by(dx, dy);
        if !moved.is_valid_position(grid) {
            return None;
        }
        moved.refresh_ghost(grid);
        Some(moved)
    }

    pub fn translate(&mut self, dx: i8, dy: i8, grid: &Grid) -> bool {
        match self.try_translate(dx, dy, grid) {
            Some(moved) => {
                *self = moved;
                true
            }
            None => false,
        }
    }

    /// Horizontal move that also counts as a lock reset.
    pub fn shift(&mut self, dx: i8, grid: &Grid, reset_limit: u8) -> bool {
        let moved = self.translate(dx, 0, grid);
        if moved {
            self.register_lock_reset(reset_limit);
        }
        moved
    }

    pub fn soft_drop(&mut self, grid: &Grid) -> bool {
        self.translate(0, 1, grid)
    }

    /// Fall until blocked; returns the number of rows fallen.
    pub fn hard_drop(&mut self, grid: &Grid) -> u32 {
        let mut rows = 0;
        while self.can_fall(grid) {
            self.y += 1;
            rows += 1;
        }
        self.ghost_y = self.y;
        rows
    }

    /// Row the piece would come to rest on if dropped from here.
    pub fn compute_ghost_y(&self, grid: &Grid) -> i8 {
        if !self.is_valid_position(grid) {
            return self.y;
        }
        let mut probe = *self;
        probe.hard_drop(grid);
        probe.y
    }

    pub fn refresh_ghost(&mut self, grid: &Grid) {
        self.ghost_y = self.compute_ghost_y(grid);
    }

    /// One quarter turn trying the kick list in order.
    fn turn_quarter(&self, clockwise: bool, grid: &Grid) -> Option<Self> {
        let (pattern, direction) = if clockwise {
            (self.pattern.rotated_cw(), RotationDirection::Clockwise)
        } else {
            (self.pattern.rotated_ccw(), RotationDirection::CounterClockwise)
        };
        let spin = direction.apply(self.spin);

        kicks(self.kind, self.spin, clockwise)
            .iter()
            .map(|&(dx, dy)| Self {
                pattern,
                spin,
                x: self.x + dx,
                y: self.y - dy,
                last_kick: Some((dx, dy)),
                ..*self
            })
            .find(|candidate| candidate.is_valid_position(grid))
    }

    /// Rotated copy, if any kick candidate fits.
    ///
    /// The O piece never rotates. A flip is two clockwise quarter turns and
    /// succeeds only when both do; the second turn's kick is recorded.
    pub fn try_rotate(&self, direction: RotationDirection, grid: &Grid) -> Option<Self> {
        if self.kind == Cell::O {
            return None;
        }
        let mut rotated = match direction {
            RotationDirection::Clockwise => self.turn_quarter(true, grid)?,
            RotationDirection::CounterClockwise => self.turn_quarter(false, grid)?,
            RotationDirection::Flip => self
                .turn_quarter(true, grid)?
                .turn_quarter(true, grid)?,
        };
        rotated.refresh_ghost(grid);
        Some(rotated)
    }

    /// Commit a rotation and apply lock reset accounting.
    pub fn rotate(&mut self, direction: RotationDirection, grid: &Grid, reset_limit: u8) -> bool {
        match self.try_rotate(direction, grid) {
            Some(rotated) => {
                *self = rotated;
                self.register_lock_reset(reset_limit);
                true
            }
            None => false,
        }
    }

    pub fn is_lock_counting(&self) -> bool {
        self.lock_delay_start.is_some()
    }

    /// Per-tick lock timer transition.
    ///
    /// A resting piece starts counting if idle. A piece that can fall again
    /// returns to idle, unless its reset budget is spent.
    pub fn update_lock_delay(&mut self, tick: u64, grid: &Grid, reset_limit: u8) {
        if !self.can_fall(grid) {
            if self.lock_delay_start.is_none() {
                trace!(tick, kind = self.kind.as_str(), "lock delay started");
                self.lock_delay_start = Some(tick);
            }
        } else if self.lock_resets < reset_limit && self.lock_delay_start.is_some() {
            trace!(tick, kind = self.kind.as_str(), "lock delay cancelled");
            self.lock_delay_start = None;
        }
    }

    /// Cancel a running lock timer if the reset budget allows.
    pub fn register_lock_reset(&mut self, reset_limit: u8) {
        if self.lock_delay_start.is_some() && self.lock_resets < reset_limit {
            self.lock_resets += 1;
            self.lock_delay_start = None;
        }
    }

    pub fn lock_delay_expired(&self, tick: u64, delay_ticks: u32) -> bool {
        match self.lock_delay_start {
            Some(start) => tick.saturating_sub(start) > u64::from(delay_ticks),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LOCK_DELAY_TICKS, LOCK_RESET_LIMIT};

    #[test]
    fn test_new_piece_at_spawn() {
        let piece = Piece::new(Cell::T);
        assert_eq!((piece.x(), piece.y()), SPAWN_POSITION);
        assert_eq!(piece.spin(), 0);
        assert_eq!(piece.last_kick(), None);
        assert!(!piece.is_lock_counting());
        assert_eq!(piece.cells(), [(4, 2), (3, 3), (4, 3), (5, 3)]);
    }

    #[test]
    #[should_panic(expected = "empty cell")]
    fn test_empty_piece_panics() {
        let _ = Piece::new(Cell::Empty);
    }

    #[test]
    fn test_valid_position_iff_in_bounds_and_vacant() {
        let mut grid = Grid::new();
        assert!(Piece::at(Cell::O, 0, 0).is_valid_position(&grid));
        // O pattern leaves column 0 empty, so x = -1 still fits.
        assert!(Piece::at(Cell::O, -1, 0).is_valid_position(&grid));
        assert!(!Piece::at(Cell::O, -2, 0).is_valid_position(&grid));
        assert!(!Piece::at(Cell::O, 0, 24).is_valid_position(&grid));

        grid.set(2, 11, Cell::Z);
        assert!(!Piece::at(Cell::O, 0, 10).is_valid_position(&grid));
        assert!(Piece::at(Cell::O, 2, 10).is_valid_position(&grid));
    }

    #[test]
    fn test_translate_commits_only_when_valid() {
        let grid = Grid::new();
        let mut piece = Piece::at(Cell::I, 0, 5);

        assert!(!piece.translate(-1, 0, &grid));
        assert_eq!(piece.x(), 0);
        assert!(piece.translate(1, 0, &grid));
        assert_eq!(piece.x(), 1);
    }

    #[test]
    fn test_try_translate_leaves_receiver_untouched() {
        let grid = Grid::new();
        let piece = Piece::new(Cell::L);
        let moved = piece.try_translate(2, 1, &grid).unwrap();

        assert_eq!((piece.x(), piece.y()), (3, 2));
        assert_eq!((moved.x(), moved.y()), (5, 3));
    }

    #[test]
    fn test_hard_drop_and_ghost() {
        let grid = Grid::from_ascii(&["JJJJ......"]);
        let mut piece = Piece::at(Cell::I, 0, 2);

        // Row 1 of the I pattern lands on row 23, above the stack.
        assert_eq!(piece.compute_ghost_y(&grid), 22);
        assert_eq!(piece.hard_drop(&grid), 20);
        assert_eq!(piece.y(), 22);
        assert!(!piece.can_fall(&grid));
        assert!(!piece.soft_drop(&grid));
    }

    #[test]
    fn test_ghost_refreshes_after_move() {
        let grid = Grid::from_ascii(&["JJJJ......"]);
        let mut piece = Piece::at(Cell::I, 0, 2);
        piece.refresh_ghost(&grid);
        assert_eq!(piece.ghost_y(), 22);

        assert!(piece.translate(6, 0, &grid));
        assert_eq!(piece.ghost_y(), 23);
    }

    #[test]
    fn test_o_never_rotates() {
        let grid = Grid::new();
        let mut piece = Piece::new(Cell::O);
        let before = piece;

        for dir in [
            RotationDirection::Clockwise,
            RotationDirection::CounterClockwise,
            RotationDirection::Flip,
        ] {
            assert!(piece.try_rotate(dir, &grid).is_none());
            assert!(!piece.rotate(dir, &grid, LOCK_RESET_LIMIT));
        }
        assert_eq!(piece, before);
    }

    #[test]
    fn test_cw_then_ccw_is_identity_in_open_space() {
        let grid = Grid::new();
        for kind in [Cell::I, Cell::T, Cell::S, Cell::Z, Cell::J, Cell::L] {
            let start = Piece::at(kind, 3, 10);
            let mut piece = start;

            assert!(piece.rotate(RotationDirection::Clockwise, &grid, LOCK_RESET_LIMIT));
            assert_eq!(piece.last_kick(), Some((0, 0)));
            assert_eq!(piece.spin(), 1);
            assert!(piece.rotate(RotationDirection::CounterClockwise, &grid, LOCK_RESET_LIMIT));
            assert_eq!(piece.last_kick(), Some((0, 0)));

            assert_eq!(piece.spin(), 0);
            assert_eq!(piece.pattern(), start.pattern());
            assert_eq!((piece.x(), piece.y()), (start.x(), start.y()));
        }
    }

    #[test]
    fn test_wall_kick_against_left_wall() {
        let grid = Grid::new();
        // Vertical I (spin 3) hugging the left wall: cells in column 0.
        let mut piece = Piece::at(Cell::I, 0, 10);
        assert!(piece.rotate(RotationDirection::CounterClockwise, &grid, LOCK_RESET_LIMIT));
        assert!(piece.translate(-1, 0, &grid));
        assert_eq!(piece.cells()[0].0, 0);

        // 3->0 needs a kick: (0,0) would put the bar at x = -1.
        assert!(piece.rotate(RotationDirection::Clockwise, &grid, LOCK_RESET_LIMIT));
        assert_eq!(piece.spin(), 0);
        assert_eq!(piece.last_kick(), Some((1, 0)));
        assert!(piece.is_valid_position(&grid));
    }

    #[test]
    fn test_failed_rotation_changes_nothing() {
        // Vertical I standing in a one-wide well cannot turn flat.
        let grid = Grid::from_ascii(&["ZZ.ZZZZZZZ", "ZZ.ZZZZZZZ", "ZZ.ZZZZZZZ"]);
        let mut piece = Piece::at(Cell::I, 0, 20);
        assert!(piece.rotate(RotationDirection::Clockwise, &grid, LOCK_RESET_LIMIT));
        let before = piece;

        assert_eq!(piece.try_rotate(RotationDirection::Clockwise, &grid), None);
        assert!(!piece.rotate(RotationDirection::Flip, &grid, LOCK_RESET_LIMIT));
        assert_eq!(piece, before);
    }

    #[test]
    fn test_flip_is_two_clockwise_turns() {
        let grid = Grid::new();
        let piece = Piece::at(Cell::J, 3, 10);

        let flipped = piece.try_rotate(RotationDirection::Flip, &grid).unwrap();
        let twice = piece
            .try_rotate(RotationDirection::Clockwise, &grid)
            .and_then(|p| p.try_rotate(RotationDirection::Clockwise, &grid))
            .unwrap();

        assert_eq!(flipped.spin(), 2);
        assert_eq!(flipped.cells(), twice.cells());
    }

    #[test]
    fn test_flip_counts_as_one_reset() {
        let grid = Grid::from_ascii(&["LLLL..LLLL"]);
        let mut piece = Piece::at(Cell::T, 3, 10);
        piece.hard_drop(&grid);
        piece.update_lock_delay(0, &grid, LOCK_RESET_LIMIT);
        assert!(piece.is_lock_counting());

        assert!(piece.rotate(RotationDirection::Flip, &grid, LOCK_RESET_LIMIT));
        assert_eq!(piece.lock_resets(), 1);
        assert!(!piece.is_lock_counting());
    }

    #[test]
    fn test_lock_delay_expires_after_delay() {
        let grid = Grid::new();
        let mut piece = Piece::at(Cell::O, 3, 2);
        piece.hard_drop(&grid);

        piece.update_lock_delay(100, &grid, LOCK_RESET_LIMIT);
        assert_eq!(piece.lock_delay_start(), Some(100));
        assert!(!piece.lock_delay_expired(160, LOCK_DELAY_TICKS));
        assert!(piece.lock_delay_expired(161, LOCK_DELAY_TICKS));
    }

    #[test]
    fn test_lock_delay_idles_when_piece_can_fall() {
        let floor = Grid::from_ascii(&["SSSSSSSSS.", "SSSSSSSSS."]);
        let mut piece = Piece::at(Cell::O, 3, 21);
        piece.update_lock_delay(0, &floor, LOCK_RESET_LIMIT);
        assert!(piece.is_lock_counting());

        // Floor cleared away underneath: the piece can fall again.
        piece.update_lock_delay(1, &Grid::new(), LOCK_RESET_LIMIT);
        assert!(!piece.is_lock_counting());
        assert_eq!(piece.lock_resets(), 0);
    }

    #[test]
    fn test_exhausted_resets_lock_even_while_moving() {
        let grid = Grid::new();
        let mut piece = Piece::at(Cell::T, 3, 2);
        piece.hard_drop(&grid);

        let mut locked_at = None;
        for tick in 0..200u64 {
            piece.update_lock_delay(tick, &grid, LOCK_RESET_LIMIT);
            if piece.lock_delay_expired(tick, LOCK_DELAY_TICKS) {
                locked_at = Some(tick);
                break;
            }
            let dx = if tick % 2 == 0 { -1 } else { 1 };
            assert!(piece.shift(dx, &grid, LOCK_RESET_LIMIT));
        }

        assert_eq!(piece.lock_resets(), LOCK_RESET_LIMIT);
        // Budget runs out at tick 15; the timer started then is never cancelled.
        assert_eq!(locked_at, Some(15 + u64::from(LOCK_DELAY_TICKS) + 1));
    }

    #[test]
    fn test_exhausted_budget_keeps_counting_in_the_air() {
        let floor = Grid::from_ascii(&["SSSSSSSSS.", "SSSSSSSSS."]);
        let mut piece = Piece::at(Cell::O, 3, 21);
        for tick in 0..u64::from(LOCK_RESET_LIMIT) {
            piece.update_lock_delay(tick, &floor, LOCK_RESET_LIMIT);
            piece.register_lock_reset(LOCK_RESET_LIMIT);
        }
        assert_eq!(piece.lock_resets(), LOCK_RESET_LIMIT);

        piece.update_lock_delay(20, &floor, LOCK_RESET_LIMIT);
        assert_eq!(piece.lock_delay_start(), Some(20));
        piece.update_lock_delay(21, &Grid::new(), LOCK_RESET_LIMIT);
        assert_eq!(piece.lock_delay_start(), Some(20));
    }
}
