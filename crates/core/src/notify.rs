//! Notifications from the game to its presentation layer.
//!
//! The game never calls into UI code directly. Mutating operations queue
//! [`GameEvent`]s; the driver drains them right after the call returns and
//! hands each one to a [`Notifier`] before rendering the next frame.

use crate::types::Notice;

/// Something the presentation layer should hear about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Score, lines or level changed (or were reset).
    Hud { score: u32, lines: u32, level: u32 },
    /// A status toast: game over, pause, resume, new game.
    Notice(Notice),
}

/// HUD and toast surface.
pub trait Notifier {
    fn update_hud(&mut self, score: u32, lines: u32, level: u32);

    fn notify(&mut self, notice: Notice);

    /// Route one event to the matching callback.
    fn deliver(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::Hud {
                score,
                lines,
                level,
            } => self.update_hud(score, lines, level),
            GameEvent::Notice(notice) => self.notify(notice),
        }
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn update_hud(&mut self, _score: u32, _lines: u32, _level: u32) {}

    fn notify(&mut self, _notice: Notice) {}
}

impl<N: Notifier + ?Sized> Notifier for &mut N {
    fn update_hud(&mut self, score: u32, lines: u32, level: u32) {
        (**self).update_hud(score, lines, level);
    }

    fn notify(&mut self, notice: Notice) {
        (**self).notify(notice);
    }
}
