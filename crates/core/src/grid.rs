//! Grid module - the occupancy matrix
//!
//! The grid is 10 columns by 25 rows; the top 5 rows are overflow headroom
//! above the visible play-field. Uses a flat array for cache locality and
//! zero allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..24 (top to bottom)

use arrayvec::ArrayVec;

use crate::piece::Piece;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH, OVERFLOW_HEIGHT};

/// Total number of cells on the grid
const GRID_SIZE: usize = BOARD_WIDTH as usize * BOARD_HEIGHT as usize;

/// Number of rows on the grid
pub const GRID_ROWS: usize = BOARD_HEIGHT as usize;

/// Row indices removed by one clear, top to bottom.
pub type ClearedRows = ArrayVec<usize, GRID_ROWS>;

/// The grid - 10 columns x 25 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; GRID_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// In bounds and occupied.
    pub fn is_filled(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(cell) if cell.is_filled())
    }

    /// In bounds and empty, i.e. a piece cell may sit here.
    pub fn is_vacant(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Cell::Empty))
    }

    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        Self::index(x, y).is_none()
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= GRID_ROWS {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_filled())
    }

    /// Cells of row `y`, left to right.
    pub fn row(&self, y: usize) -> &[Cell] {
        let width = BOARD_WIDTH as usize;
        &self.cells[y * width..(y + 1) * width]
    }

    /// Iterator over the visible rows (overflow excluded), top to bottom.
    pub fn visible_rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        (OVERFLOW_HEIGHT as usize..GRID_ROWS).map(move |y| self.row(y))
    }

    /// Remove every full row at once and return their indices (top to bottom).
    ///
    /// Non-full rows slide down to fill the gaps in their original order and
    /// as many empty rows as were removed appear at the top. Uses a two-pointer
    /// pass with zero allocation, so no intermediate state is ever observable.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared_rows = ClearedRows::new();
        let width = BOARD_WIDTH as usize;
        let mut write_y = GRID_ROWS;

        // Scan from bottom to top
        for read_y in (0..GRID_ROWS).rev() {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        for cell in &mut self.cells[..write_y * width] {
            *cell = Cell::Empty;
        }

        cleared_rows.reverse();
        cleared_rows
    }

    /// Copy the piece's filled cells into the grid.
    ///
    /// # Panics
    ///
    /// Panics if any cell of the piece lies outside the grid. Callers lock a
    /// piece only from a validated position.
    pub fn lock_cells(&mut self, piece: &Piece) {
        let kind = piece.kind();
        for (x, y) in piece.cells() {
            match Self::index(x, y) {
                Some(idx) => self.cells[idx] = kind,
                None => panic!("cannot lock {:?} cell at ({}, {}): outside the grid", kind, x, y),
            }
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = Cell::Empty;
        }
    }

    /// Export cell codes (0 = empty, 1..=7 = I..L) row by row.
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_WIDTH as usize]; GRID_ROWS]) {
        for (y, row) in out.iter_mut().enumerate() {
            for (x, code) in row.iter_mut().enumerate() {
                *code = self.cells[y * BOARD_WIDTH as usize + x].code();
            }
        }
    }

    /// Build a grid from text rows aligned to the bottom of the grid.
    ///
    /// `.` is empty and `I O T S Z J L` are filled cells; the last string is
    /// row 24. Intended for fixtures and tools.
    ///
    /// # Panics
    ///
    /// Panics on a row of the wrong width, too many rows, or an unknown character.
    ///
    /// # Examples
    ///
    /// ```
    /// use ttris_core::Grid;
    /// use ttris_core::types::Cell;
    ///
    /// let grid = Grid::from_ascii(&[
    ///     "T.........",
    ///     "IIIIIIIII.",
    /// ]);
    /// assert_eq!(grid.get(0, 23), Some(Cell::T));
    /// assert!(grid.is_vacant(9, 24));
    /// ```
    pub fn from_ascii(rows: &[&str]) -> Self {
        assert!(rows.len() <= GRID_ROWS, "too many rows: {}", rows.len());
        let mut grid = Self::new();
        let top = GRID_ROWS - rows.len();
        for (i, line) in rows.iter().enumerate() {
            assert_eq!(
                line.chars().count(),
                BOARD_WIDTH as usize,
                "row {:?} must be {} cells wide",
                line,
                BOARD_WIDTH
            );
            for (x, ch) in line.chars().enumerate() {
                let cell = match ch {
                    '.' => Cell::Empty,
                    other => Cell::from_str(&other.to_string())
                        .filter(|c| c.is_filled())
                        .unwrap_or_else(|| panic!("unknown cell character {:?}", other)),
                };
                grid.cells[(top + i) * BOARD_WIDTH as usize + x] = cell;
            }
        }
        grid
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
