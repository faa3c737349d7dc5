//! Piece tests - shapes, rotation states and kicks through the public API

use ttris::core::pieces::{kick_table, kicks};
use ttris::core::{Grid, Pattern, Piece};
use ttris::types::{Cell, RotationDirection, LOCK_RESET_LIMIT};

fn shape(kind: Cell, spin: u8) -> Vec<(i8, i8)> {
    let mut pattern = Pattern::spawn(kind);
    for _ in 0..spin {
        pattern = pattern.rotated_cw();
    }
    pattern.offsets().collect()
}

// ============== Shape Tests ==============

#[test]
fn test_i_piece_shapes() {
    assert_eq!(shape(Cell::I, 0), vec![(0, 1), (1, 1), (2, 1), (3, 1)]);
    assert_eq!(shape(Cell::I, 1), vec![(2, 0), (2, 1), (2, 2), (2, 3)]);
    assert_eq!(shape(Cell::I, 2), vec![(0, 2), (1, 2), (2, 2), (3, 2)]);
    assert_eq!(shape(Cell::I, 3), vec![(1, 0), (1, 1), (1, 2), (1, 3)]);
}

#[test]
fn test_o_piece_shape() {
    assert_eq!(shape(Cell::O, 0), vec![(1, 0), (2, 0), (1, 1), (2, 1)]);
}

#[test]
fn test_s_and_z_piece_shapes() {
    assert_eq!(shape(Cell::S, 0), vec![(1, 0), (2, 0), (0, 1), (1, 1)]);
    assert_eq!(shape(Cell::S, 1), vec![(1, 0), (1, 1), (2, 1), (2, 2)]);
    assert_eq!(shape(Cell::Z, 0), vec![(0, 0), (1, 0), (1, 1), (2, 1)]);
    assert_eq!(shape(Cell::Z, 1), vec![(2, 0), (1, 1), (2, 1), (1, 2)]);
}

#[test]
fn test_j_and_l_piece_shapes() {
    assert_eq!(shape(Cell::J, 0), vec![(0, 0), (0, 1), (1, 1), (2, 1)]);
    assert_eq!(shape(Cell::J, 1), vec![(1, 0), (2, 0), (1, 1), (1, 2)]);
    assert_eq!(shape(Cell::L, 0), vec![(2, 0), (0, 1), (1, 1), (2, 1)]);
    assert_eq!(shape(Cell::L, 1), vec![(1, 0), (1, 1), (1, 2), (2, 2)]);
}

#[test]
fn test_shape_bounds_within_pattern() {
    for kind in Cell::PIECES {
        let size = Pattern::spawn(kind).size() as i8;
        for spin in 0..4 {
            for (x, y) in shape(kind, spin) {
                assert!((0..size).contains(&x) && (0..size).contains(&y));
            }
        }
    }
}

// ============== Rotation Tests ==============

#[test]
fn test_t_rotation_with_kick() {
    // East T at (3,5) would cover (4,5), (4,6), (5,6), (4,7).
    let mut grid = Grid::new();
    grid.set(4, 6, Cell::Z);
    let piece = Piece::at(Cell::T, 3, 5);

    let rotated = piece
        .try_rotate(RotationDirection::Clockwise, &grid)
        .expect("a kick should fit");
    assert_eq!(rotated.spin(), 1);
    assert_ne!(rotated.last_kick(), Some((0, 0)));
    assert!(rotated.is_valid_position(&grid));
}

#[test]
fn test_kicks_apply_with_y_pointing_up() {
    // Block (0,0) and (-1,0) for a 0->1 T turn; (-1,1) moves the piece up a row.
    let mut grid = Grid::new();
    grid.set(4, 7, Cell::Z);
    grid.set(3, 7, Cell::Z);
    let piece = Piece::at(Cell::T, 3, 5);

    let rotated = piece
        .try_rotate(RotationDirection::Clockwise, &grid)
        .expect("third kick should fit");
    assert_eq!(rotated.last_kick(), Some((-1, 1)));
    assert_eq!((rotated.x(), rotated.y()), (2, 4));
}

#[test]
fn test_ccw_rotation() {
    let grid = Grid::new();
    let rotated = Piece::at(Cell::T, 3, 5)
        .try_rotate(RotationDirection::CounterClockwise, &grid)
        .unwrap();
    assert_eq!(rotated.spin(), 3);
    assert_eq!(rotated.cells(), [(4, 5), (3, 6), (4, 6), (4, 7)]);
}

#[test]
fn test_rotation_blocked_everywhere() {
    // A full grid below a floating piece leaves no room for any kick.
    let mut grid = Grid::new();
    for y in 0..25 {
        for x in 0..10 {
            grid.set(x, y, Cell::Z);
        }
    }
    for (x, y) in Piece::at(Cell::T, 3, 10).cells() {
        grid.set(x, y, Cell::Empty);
    }
    let mut piece = Piece::at(Cell::T, 3, 10);
    assert!(piece.is_valid_position(&grid));
    assert!(!piece.rotate(RotationDirection::Clockwise, &grid, LOCK_RESET_LIMIT));
    assert_eq!(piece.spin(), 0);
}

#[test]
fn test_i_rotation_uses_i_kicks() {
    let grid = Grid::new();
    let rotated = Piece::at(Cell::I, 3, 5)
        .try_rotate(RotationDirection::Clockwise, &grid)
        .unwrap();
    assert_eq!(rotated.spin(), 1);
    assert_eq!(rotated.cells(), [(5, 5), (5, 6), (5, 7), (5, 8)]);
}

#[test]
fn test_i_two_to_one_fourth_kick() {
    assert_eq!(kicks(Cell::I, 2, false)[3], (1, -2));
}

#[test]
fn test_kick_table_consistency() {
    let o_kicks = kick_table(Cell::O);
    assert!(o_kicks
        .iter()
        .flat_map(|pair| pair.iter())
        .flat_map(|list| list.iter())
        .all(|&k| k == (0, 0)));

    let t_kicks = kick_table(Cell::T);
    for kind in [Cell::J, Cell::L, Cell::S, Cell::Z] {
        assert_eq!(kick_table(kind), t_kicks);
    }
    assert_ne!(kick_table(Cell::I), t_kicks);
}

#[test]
fn test_flip_rotation_from_every_spin() {
    let grid = Grid::new();
    for kind in [Cell::I, Cell::T, Cell::S, Cell::Z, Cell::J, Cell::L] {
        let mut piece = Piece::at(kind, 3, 10);
        for expected in [2, 0, 2, 0] {
            assert!(piece.rotate(RotationDirection::Flip, &grid, LOCK_RESET_LIMIT));
            assert_eq!(piece.spin(), expected);
        }
    }
}
