//! Game state module - manages the complete game state
//!
//! This module ties together all core components: grid, pieces, piece source
//! and scoring. It handles piece movement, rotation with wall kicks, locking,
//! line clears, level progression, gravity timing and the game lifecycle.
//!
//! Every mutating operation is synchronous. Operations that matter to the HUD
//! or the toast surface queue a [`GameEvent`]; drain them with
//! [`GameState::drain_events`] or [`GameState::dispatch`] after each call.

use std::vec::Drain;

use crate::collision::collides;
use crate::notify::{GameEvent, Notifier};
use crate::piece::Piece;
use crate::rng::{PieceSource, UniformPieces};
use crate::scoring::{drop_interval_ms, level_for_lines, line_clear_score};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::*;
use crate::Grid;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<S = UniformPieces> {
    grid: Grid,
    active: Option<Piece>,
    source: S,
    score: u32,
    lines: u32,
    level: u32,
    drop_interval_ms: u32,
    running: bool,
    game_over: bool,
    /// Gravity fires on the first tick strictly after this timestamp.
    next_drop_ms: u64,
    /// Monotonic id for spawned pieces.
    piece_id: u32,
    /// Set when the last lock left cells in the spawn buffer.
    topped_out: bool,
    events: Vec<GameEvent>,
}

impl GameState<UniformPieces> {
    /// Create a new running game whose pieces are drawn uniformly from `seed`.
    pub fn new(seed: u32) -> Self {
        Self::with_source(UniformPieces::new(seed))
    }

    pub fn seed(&self) -> u32 {
        self.source.seed()
    }
}

impl Default for GameState<UniformPieces> {
    fn default() -> Self {
        Self::new(1)
    }
}

impl<S: PieceSource> GameState<S> {
    /// Create a new running game drawing pieces from `source`.
    ///
    /// The first piece is spawned immediately and a HUD event is queued.
    pub fn with_source(source: S) -> Self {
        let mut state = Self {
            grid: Grid::new(),
            active: None,
            source,
            score: 0,
            lines: 0,
            level: 1,
            drop_interval_ms: INITIAL_DROP_MS,
            running: true,
            game_over: false,
            next_drop_ms: 0,
            piece_id: 0,
            topped_out: false,
            events: Vec::with_capacity(4),
        };
        state.spawn();
        state.push_hud();
        state
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn paused(&self) -> bool {
        !self.running && !self.game_over
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn next_drop_ms(&self) -> u64 {
        self.next_drop_ms
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Spawn a new piece at the spawn anchor.
    ///
    /// Returns false, and ends the game, when the new piece collides or the
    /// previous lock left part of its piece above the board. Does nothing
    /// while paused or over.
    pub fn spawn(&mut self) -> bool {
        if !self.running {
            return false;
        }
        let piece = Piece::spawn(self.source.next_kind());
        self.active = Some(piece);
        self.piece_id = self.piece_id.wrapping_add(1);

        if collides(&piece, &self.grid) || self.topped_out {
            self.running = false;
            self.game_over = true;
            self.events.push(GameEvent::Notice(Notice::GameOver));
            return false;
        }

        true
    }

    /// Shift the piece horizontally by `dx` if the target is free.
    pub fn move_by(&mut self, dx: i8) -> bool {
        if !self.running {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let candidate = active.shifted(dx, 0);
        if collides(&candidate, &self.grid) {
            return false;
        }
        self.active = Some(candidate);
        true
    }

    /// Rotate one step, trying the kick offsets in [`KICK_OFFSETS`] order.
    ///
    /// The first candidate that fits is committed. If none fits the piece is
    /// left untouched.
    pub fn rotate(&mut self, direction: RotateDirection) -> bool {
        if !self.running {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let turned = active.with_rotation(active.rotation.turned(direction));

        let kicked = KICK_OFFSETS
            .iter()
            .map(|&dx| turned.shifted(dx, 0))
            .find(|candidate| !collides(candidate, &self.grid));

        match kicked {
            Some(candidate) => {
                self.active = Some(candidate);
                true
            }
            None => false,
        }
    }

    /// Move the piece down one row, or lock it where it is if it cannot fall.
    ///
    /// Returns true if the piece moved.
    pub fn soft_drop(&mut self) -> bool {
        if !self.running {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let candidate = active.shifted(0, 1);
        if collides(&candidate, &self.grid) {
            self.lock_piece();
            return false;
        }
        self.active = Some(candidate);
        true
    }

    /// Drop the piece to the lowest free row and lock it.
    ///
    /// Returns the number of rows it fell.
    pub fn hard_drop(&mut self) -> u32 {
        if !self.running {
            return 0;
        }
        let Some(mut piece) = self.active else {
            return 0;
        };

        // Bounded: the floor collides once any cell reaches row BOARD_HEIGHT.
        let mut distance = 0;
        while !collides(&piece.shifted(0, 1), &self.grid) {
            piece = piece.shifted(0, 1);
            distance += 1;
        }

        self.active = Some(piece);
        self.lock_piece();
        distance
    }

    /// Lock the active piece into the grid, clear full rows, score, and spawn the next piece.
    pub fn lock_piece(&mut self) {
        if !self.running {
            return;
        }
        let Some(active) = self.active.take() else {
            return;
        };

        let cells = active.cells();
        self.grid.lock(&cells, active.kind);
        self.topped_out = cells.iter().any(|&(_, y)| y < 0);

        let cleared = self.grid.sweep_full_rows();
        if cleared > 0 {
            self.score = self
                .score
                .saturating_add(line_clear_score(cleared, self.level));
            self.lines += cleared as u32;

            let level = level_for_lines(self.lines);
            if level != self.level {
                self.level = level;
                self.drop_interval_ms = drop_interval_ms(level);
            }
            self.push_hud();
        }

        self.spawn();
    }

    /// Gravity step, driven by the frame clock.
    ///
    /// When running and `now_ms` is past the scheduled drop, soft drops once and
    /// schedules the next drop one interval after `now_ms`. Returns true if a
    /// drop was attempted.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if !self.running || now_ms <= self.next_drop_ms {
            return false;
        }

        self.soft_drop();
        self.next_drop_ms = now_ms.saturating_add(self.drop_interval_ms as u64);
        true
    }

    /// Pause or resume.
    ///
    /// The drop schedule is left alone, so resuming after a long pause drops on
    /// the very next tick. Ignored once the game is over: only [`reset`](Self::reset)
    /// leaves that state.
    pub fn toggle_pause(&mut self) {
        if self.game_over {
            return;
        }
        self.running = !self.running;
        let notice = if self.running {
            Notice::Resumed
        } else {
            Notice::Paused
        };
        self.events.push(GameEvent::Notice(notice));
    }

    /// Start a fresh game with the same piece source.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.score = 0;
        self.lines = 0;
        self.level = 1;
        self.drop_interval_ms = INITIAL_DROP_MS;
        self.running = true;
        self.game_over = false;
        self.topped_out = false;
        self.spawn();
        self.push_hud();
        self.events.push(GameEvent::Notice(Notice::NewGame));
    }

    /// Apply a discrete input command.
    ///
    /// Returns true if the command changed anything.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_by(-1),
            GameAction::MoveRight => self.move_by(1),
            GameAction::SoftDrop => {
                let was_running = self.running;
                self.soft_drop();
                was_running
            }
            GameAction::HardDrop => {
                let was_running = self.running;
                self.hard_drop();
                was_running
            }
            GameAction::RotateCw => self.rotate(RotateDirection::Clockwise),
            GameAction::RotateCcw => self.rotate(RotateDirection::CounterClockwise),
            GameAction::Pause => {
                let before = self.running;
                self.toggle_pause();
                before != self.running
            }
            GameAction::Restart => {
                self.reset();
                true
            }
        }
    }

    /// Take all queued events in the order they were raised.
    pub fn drain_events(&mut self) -> Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    /// Deliver all queued events to `notifier`.
    pub fn dispatch(&mut self, notifier: &mut impl Notifier) {
        for event in self.events.drain(..) {
            notifier.deliver(&event);
        }
    }

    fn push_hud(&mut self) {
        self.events.push(GameEvent::Hud {
            score: self.score,
            lines: self.lines,
            level: self.level,
        });
    }

    /// Fill only the board and its hash.
    pub fn snapshot_board_into(&self, out: &mut GameSnapshot) {
        self.grid.write_u8_grid(&mut out.board);
        out.board_hash = GameSnapshot::hash_board(&out.board);
    }

    /// Fill everything except the board.
    pub fn snapshot_meta_into(&self, out: &mut GameSnapshot) {
        out.active = self.active.map(ActiveSnapshot::from);
        out.score = self.score;
        out.lines = self.lines;
        out.level = self.level;
        out.drop_interval_ms = self.drop_interval_ms;
        out.running = self.running;
        out.game_over = self.game_over;
        out.piece_id = self.piece_id;
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.snapshot_board_into(out);
        self.snapshot_meta_into(out);
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
