//! Redraw throttling for frames that are not changing.

use crate::core::GameSnapshot;
use crate::status::StatusPanel;

/// Hash of everything a frame shows: board, falling piece, game flags and status panel.
pub fn frame_fingerprint(snap: &GameSnapshot, status: &StatusPanel, now_ms: u64) -> u64 {
    let active = snap
        .active
        .map(|a| {
            (a.kind.code() as u64) << 24
                | (a.rotation.index() as u64) << 16
                | (a.x as u8 as u64) << 8
                | a.y as u8 as u64
        })
        .unwrap_or(0);
    let flags = (snap.running as u64) | (snap.game_over as u64) << 1;

    snap.board_hash
        ^ active.rotate_left(29)
        ^ flags.rotate_left(61)
        ^ status.fingerprint(now_ms).rotate_left(7)
}

#[derive(Debug, Clone)]
pub struct RenderThrottle {
    min_static_interval_ms: u64,
    last_render_ms: u64,
    last_fingerprint: u64,
    has_rendered: bool,
}

impl RenderThrottle {
    pub fn new(min_static_interval_ms: u64) -> Self {
        Self {
            min_static_interval_ms,
            last_render_ms: 0,
            last_fingerprint: 0,
            has_rendered: false,
        }
    }

    /// Decide whether to render a new frame.
    ///
    /// - When `is_static=false` (game running): always render.
    /// - When `is_static=true` (paused or over): render immediately on fingerprint change,
    ///   otherwise at most once per `min_static_interval_ms`.
    pub fn should_render(&mut self, now_ms: u64, fingerprint: u64, is_static: bool) -> bool {
        let changed = fingerprint != self.last_fingerprint;
        let due = now_ms.saturating_sub(self.last_render_ms) >= self.min_static_interval_ms;

        if self.has_rendered && is_static && !changed && !due {
            return false;
        }

        self.has_rendered = true;
        self.last_render_ms = now_ms;
        self.last_fingerprint = fingerprint;
        true
    }

    /// Force the next call to render.
    pub fn reset(&mut self) {
        self.has_rendered = false;
    }
}
