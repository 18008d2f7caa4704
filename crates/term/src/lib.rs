//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal gameplay. It avoids
//! widget/layout libraries and instead renders into a simple framebuffer that
//! is flushed to the terminal with crossterm.
//!
//! - [`game_view`] draws a [`core::GameSnapshot`] plus the [`StatusPanel`]
//! - [`status`] is the terminal's HUD and toast notifier
//! - [`renderer`] writes a frame when its fingerprint changes, diffing against the screen
//! - [`render_throttle`] skips redraws of static frames

pub mod fb;
pub mod game_view;
pub mod render_throttle;
pub mod renderer;
pub mod status;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{piece_color, AnchorY, GameView, LockedColors, Viewport, LOCKED_FILL};
pub use render_throttle::{frame_fingerprint, RenderThrottle};
pub use renderer::{encode_frame_into, TerminalRenderer};
pub use status::{StatusPanel, Toast};
