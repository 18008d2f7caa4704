//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the game rules, state management, and simulation logic.
//! It has **zero dependencies** on terminals or I/O, making it:
//!
//! - **Deterministic**: Same seed (or scripted piece source) produces identical games
//! - **Testable**: Every rule is a synchronous call on [`GameState`]
//! - **Portable**: The presentation layer only sees snapshots and [`GameEvent`]s
//!
//! # Module Structure
//!
//! - [`grid`]: 10x20 cell grid with locking and row sweeping
//! - [`shapes`]: Cell offsets for every piece kind and rotation state
//! - [`piece`]: The falling piece value
//! - [`collision`]: Fit test for a candidate piece against walls, floor and locked cells
//! - [`game_state`]: Complete game state: movement, kicks, locking, gravity, lifecycle
//! - [`rng`]: Seedable uniform piece source
//! - [`scoring`]: Line clear points, levels and gravity speed
//! - [`notify`]: HUD and toast events for the presentation layer
//! - [`snapshot`]: Read-only copies for renderers and logs
//!
//! # Game Rules
//!
//! - **Uniform pieces**: Every spawn picks one of seven kinds independently
//! - **Simple kicks**: Rotation tries horizontal offsets 0, -1, +1, -2, +2
//! - **No lock delay**: A piece that cannot fall locks on the next gravity step
//! - **Scoring**: 100/300/500/800 for 1-4 rows, times the level
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::GameAction;
//!
//! // A new game is already running with its first piece spawned
//! let mut game = GameState::new(12345);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! // Hard drops score nothing by themselves
//! assert_eq!(game.score(), 0);
//! assert_eq!(game.piece_id(), 2);
//! ```
//!
//! # Timing
//!
//! The caller owns the clock. Call [`GameState::tick`](game_state::GameState::tick)
//! every frame with a monotonic millisecond timestamp; gravity fires once the
//! timestamp passes the scheduled drop.

pub mod collision;
pub mod game_state;
pub mod grid;
pub mod notify;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod shapes;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use collision::collides;
pub use game_state::GameState;
pub use grid::Grid;
pub use notify::{GameEvent, Notifier, NullNotifier};
pub use piece::Piece;
pub use rng::{PieceSource, SequencePieces, SimpleRng, UniformPieces};
pub use scoring::{drop_interval_ms, level_for_lines, line_clear_score};
pub use shapes::{offsets_for, MinoOffset, PieceShape};
pub use snapshot::{ActiveSnapshot, BoardCodes, GameSnapshot};
