//! The falling piece.

use arrayvec::ArrayVec;

use crate::shapes::{offsets_for, PieceShape};
use crate::types::{PieceKind, Rotation, SPAWN_X, SPAWN_Y};

/// Active falling piece
///
/// A plain value: moves and rotations build a new candidate which is only
/// committed once it has passed the collision test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Create a new piece at the spawn anchor, in its spawn orientation
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    /// Get the shape (mino offsets) for current rotation
    pub fn shape(&self) -> PieceShape {
        offsets_for(self.kind, self.rotation)
    }

    /// Absolute grid coordinates of the four cells.
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.shape()
            .map(|(dx, dy)| (self.x.saturating_add(dx), self.y.saturating_add(dy)))
    }

    /// Cells that are below the spawn buffer (y >= 0), i.e. the ones a renderer draws.
    pub fn visible_cells(&self) -> ArrayVec<(i8, i8), 4> {
        self.cells().into_iter().filter(|&(_, y)| y >= 0).collect()
    }

    /// Candidate translated by (dx, dy).
    ///
    /// Saturates: above the board nothing stops sideways moves, so x is unbounded there.
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..*self
        }
    }

    /// Candidate with a different rotation state, anchor unchanged.
    pub fn with_rotation(&self, rotation: Rotation) -> Self {
        Self { rotation, ..*self }
    }
}
