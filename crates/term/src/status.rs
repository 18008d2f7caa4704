//! StatusPanel: the terminal side of the HUD and toast notifications.

use crate::core::Notifier;
use crate::types::{Notice, TOAST_MS};

/// One toast message and when it was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toast {
    pub notice: Notice,
    pub raised_ms: u64,
}

impl Toast {
    pub fn text(&self) -> &'static str {
        self.notice.message()
    }

    pub fn visible_at(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.raised_ms) < TOAST_MS
    }
}

/// Latest HUD values and the current toast.
///
/// The driver sets the clock with [`StatusPanel::set_clock`] before dispatching
/// events so toasts are stamped with the frame time they were raised on. A new
/// toast replaces the previous one and restarts the timer.
#[derive(Debug, Clone, Default)]
pub struct StatusPanel {
    score: u32,
    lines: u32,
    level: u32,
    toast: Option<Toast>,
    now_ms: u64,
}

impl StatusPanel {
    pub fn new() -> Self {
        Self {
            level: 1,
            ..Self::default()
        }
    }

    pub fn set_clock(&mut self, now_ms: u64) {
        self.now_ms = now_ms;
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

    /// The toast still on screen at `now_ms`, if any.
    pub fn toast_at(&self, now_ms: u64) -> Option<Toast> {
        self.toast.filter(|t| t.visible_at(now_ms))
    }

    /// Drop an expired toast. Returns true if one was removed.
    pub fn expire(&mut self, now_ms: u64) -> bool {
        match self.toast {
            Some(t) if !t.visible_at(now_ms) => {
                self.toast = None;
                true
            }
            _ => false,
        }
    }

    /// Mix of everything drawn from the panel, for redraw throttling.
    pub fn fingerprint(&self, now_ms: u64) -> u64 {
        let toast = self
            .toast_at(now_ms)
            .map(|t| ((t.notice as u64) + 1) << 48 ^ t.raised_ms)
            .unwrap_or(0);
        (self.score as u64)
            ^ (self.lines as u64) << 32
            ^ (self.level as u64) << 56
            ^ toast.rotate_left(17)
    }
}

impl Notifier for StatusPanel {
    fn update_hud(&mut self, score: u32, lines: u32, level: u32) {
        self.score = score;
        self.lines = lines;
        self.level = level;
    }

    fn notify(&mut self, notice: Notice) {
        self.toast = Some(Toast {
            notice,
            raised_ms: self.now_ms,
        });
    }
}
