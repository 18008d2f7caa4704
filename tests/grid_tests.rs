//! Grid tests: bounds, locking and row sweeping

use blockfall::core::Grid;
use blockfall::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

fn fill_row(grid: &mut Grid, y: i8, kind: PieceKind) {
    for x in 0..BOARD_WIDTH as i8 {
        grid.set(x, y, Some(kind));
    }
}

#[test]
fn test_grid_new_empty() {
    let grid = Grid::new();
    assert_eq!(grid.width(), BOARD_WIDTH);
    assert_eq!(grid.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert_eq!(grid.get(x, y), Some(None), "cell ({}, {})", x, y);
        }
    }
}

#[test]
fn test_grid_get_out_of_bounds() {
    let grid = Grid::new();

    assert_eq!(grid.get(-1, 0), None);
    assert_eq!(grid.get(0, -1), None);
    assert_eq!(grid.get(BOARD_WIDTH as i8, 0), None);
    assert_eq!(grid.get(0, BOARD_HEIGHT as i8), None);
}

#[test]
fn test_lock_stores_kind_and_skips_spawn_buffer() {
    let mut grid = Grid::new();
    grid.lock(&[(4, -2), (3, -1), (4, 0), (5, 0)], PieceKind::T);

    assert_eq!(grid.get(4, 0), Some(Some(PieceKind::T)));
    assert_eq!(grid.get(5, 0), Some(Some(PieceKind::T)));
    assert_eq!(grid.cells().iter().filter(|c| c.is_some()).count(), 2);
}

#[test]
fn test_sweep_two_separated_rows() {
    let mut grid = Grid::new();
    fill_row(&mut grid, 2, PieceKind::I);
    fill_row(&mut grid, 5, PieceKind::I);
    // markers above, between and below the full rows
    grid.set(0, 1, Some(PieceKind::S));
    grid.set(1, 3, Some(PieceKind::Z));
    grid.set(2, 6, Some(PieceKind::L));

    assert_eq!(grid.sweep_full_rows(), 2);

    // Row 1 moves down by two, row 3 by one, row 6 stays.
    assert_eq!(grid.get(0, 3), Some(Some(PieceKind::S)));
    assert_eq!(grid.get(1, 4), Some(Some(PieceKind::Z)));
    assert_eq!(grid.get(2, 6), Some(Some(PieceKind::L)));
    for y in 0..2 {
        assert!(!grid.is_row_full(y));
        for x in 0..BOARD_WIDTH as i8 {
            assert_eq!(grid.get(x, y as i8), Some(None));
        }
    }
    assert_eq!(grid.cells().iter().filter(|c| c.is_some()).count(), 3);

    // Idempotent once nothing is full.
    assert_eq!(grid.sweep_full_rows(), 0);
}

#[test]
fn test_sweep_adjacent_rows_at_bottom() {
    let mut grid = Grid::new();
    for y in 16..20 {
        fill_row(&mut grid, y, PieceKind::O);
    }
    grid.set(9, 15, Some(PieceKind::J));

    assert_eq!(grid.sweep_full_rows(), 4);
    assert_eq!(grid.get(9, 19), Some(Some(PieceKind::J)));
    assert_eq!(grid.cells().iter().filter(|c| c.is_some()).count(), 1);
}

#[test]
fn test_partial_row_is_kept() {
    let mut grid = Grid::new();
    fill_row(&mut grid, 19, PieceKind::I);
    grid.set(7, 19, None);

    assert!(!grid.is_row_full(19));
    assert_eq!(grid.sweep_full_rows(), 0);
    assert_eq!(grid.cells().iter().filter(|c| c.is_some()).count(), 9);
}
