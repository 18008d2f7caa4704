//! Collision test between a piece and the grid.

use crate::grid::Grid;
use crate::piece::Piece;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// True if any cell of `piece` is blocked.
///
/// Only cells with y >= 0 are checked: they collide when they leave the
/// board horizontally, sit at or below the floor, or land on an occupied
/// cell. Cells still inside the spawn buffer (y < 0) always pass, even when
/// their x is off the board.
pub fn collides(piece: &Piece, grid: &Grid) -> bool {
    piece.cells().iter().any(|&(x, y)| {
        if y < 0 {
            return false;
        }
        if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return true;
        }
        grid.is_occupied(x, y)
    })
}
