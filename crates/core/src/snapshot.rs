//! Read-only copies of the game state for renderers and logs.

use crate::piece::Piece;
use crate::types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

/// Board as grid codes: 0 is empty, 1..=7 are [`PieceKind::code`].
pub type BoardCodes = [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

impl From<ActiveSnapshot> for Piece {
    fn from(value: ActiveSnapshot) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: BoardCodes,
    /// FNV-1a 64 of `board`, row-major. Lets renderers skip unchanged frames.
    pub board_hash: u64,
    pub active: Option<ActiveSnapshot>,
    pub running: bool,
    pub game_over: bool,
    pub piece_id: u32,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub drop_interval_ms: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.board_hash = Self::hash_board(&self.board);
        self.active = None;
        self.running = false;
        self.game_over = false;
        self.piece_id = 0;
        self.score = 0;
        self.lines = 0;
        self.level = 0;
        self.drop_interval_ms = 0;
    }

    pub fn paused(&self) -> bool {
        !self.running && !self.game_over
    }

    pub fn playable(&self) -> bool {
        self.running
    }

    /// Stable 64-bit FNV-1a over the board codes.
    pub fn hash_board(board: &BoardCodes) -> u64 {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in board.iter().flat_map(|row| row.iter().copied()) {
            h ^= b as u64;
            h = h.wrapping_mul(0x00000100000001B3);
        }
        h
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            board_hash: 0,
            active: None,
            running: false,
            game_over: false,
            piece_id: 0,
            score: 0,
            lines: 0,
            level: 0,
            drop_interval_ms: 0,
        };
        s.clear();
        s
    }
}
