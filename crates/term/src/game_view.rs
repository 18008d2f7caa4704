//! GameView: maps a game snapshot and the status panel into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, Piece};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::status::StatusPanel;
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Play-area background.
pub const BOARD_BG: Rgb = Rgb::hex(0x0b1130);
/// Empty-cell grid dots.
pub const GRID_DOT: Rgb = Rgb::hex(0x11193d);
/// Single fill used for locked cells in mono mode.
pub const LOCKED_FILL: Rgb = Rgb::hex(0x2a356f);

/// Fixed kind to colour table.
pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::hex(0x65e0ff),
        PieceKind::J => Rgb::hex(0x6a8dff),
        PieceKind::L => Rgb::hex(0xffb15e),
        PieceKind::O => Rgb::hex(0xffd95e),
        PieceKind::S => Rgb::hex(0x64e39f),
        PieceKind::T => Rgb::hex(0xc47bff),
        PieceKind::Z => Rgb::hex(0xff7f7f),
    }
}

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// How locked cells are coloured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockedColors {
    /// Keep the colour of the piece that locked there.
    ByKind,
    /// Everything locked uses [`LOCKED_FILL`].
    Mono,
}

/// Board position inside the viewport, in terminal cells.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// A lightweight terminal view of the board, HUD and toasts.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
    locked: LockedColors,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            anchor_y: AnchorY::Center,
            locked: LockedColors::ByKind,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn with_locked_colors(mut self, locked: LockedColors) -> Self {
        self.locked = locked;
        self
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    ///
    /// Callers can reuse one framebuffer across frames.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        status: &StatusPanel,
        now_ms: u64,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let board_px_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_px_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let frame = Frame {
            x: viewport.width.saturating_sub(board_px_w + 2) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(board_px_h + 2) / 2,
                AnchorY::Top => 0,
            },
            w: board_px_w + 2,
            h: board_px_h + 2,
        };

        let bg = CellStyle::new(GRID_DOT, BOARD_BG);
        fb.fill_rect(frame.x + 1, frame.y + 1, board_px_w, board_px_h, ' ', bg);
        draw_border(fb, frame, CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0)));

        for y in 0..BOARD_HEIGHT {
            for x in 0..BOARD_WIDTH {
                let code = snap.board[y as usize][x as usize];
                match PieceKind::from_code(code) {
                    Some(kind) => {
                        let fg = match self.locked {
                            LockedColors::ByKind => piece_color(kind),
                            LockedColors::Mono => LOCKED_FILL,
                        };
                        self.fill_cell(fb, frame, x as u16, y as u16, '█', CellStyle::new(fg, BOARD_BG));
                    }
                    None => {
                        self.fill_cell(fb, frame, x as u16, y as u16, '·', bg.dim());
                    }
                }
            }
        }

        // Only cells below the spawn buffer are drawn.
        if let Some(active) = snap.active {
            let piece = Piece::from(active);
            let style = CellStyle::new(piece_color(piece.kind), BOARD_BG).bold();
            for (x, y) in piece.visible_cells() {
                if x >= 0 && x < BOARD_WIDTH as i8 && y < BOARD_HEIGHT as i8 {
                    self.fill_cell(fb, frame, x as u16, y as u16, '█', style);
                }
            }
        }

        self.draw_side_panel(fb, status, snap, viewport, frame);

        if let Some(toast) = status.toast_at(now_ms) {
            let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0x1b, 0x24, 0x50)).bold();
            let y = if frame.y > 0 { frame.y - 1 } else { frame.y + frame.h };
            fb.put_str_centered(frame.x, frame.w, y, toast.text(), style);
        }

        let overlay = if snap.game_over {
            Some("GAME OVER")
        } else if snap.paused() {
            Some("PAUSED")
        } else {
            None
        };
        if let Some(text) = overlay {
            let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
            fb.put_str_centered(frame.x, frame.w, frame.y.saturating_add(frame.h / 2), text, style);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &GameSnapshot,
        status: &StatusPanel,
        now_ms: u64,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, status, now_ms, viewport, &mut fb);
        fb
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, frame: Frame, cell_x: u16, cell_y: u16, ch: char, style: CellStyle) {
        let px = frame.x + 1 + cell_x * self.cell_w;
        let py = frame.y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        status: &StatusPanel,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let mut y = frame.y;
        for (name, v) in [
            ("SCORE", status.score()),
            ("LINES", status.lines()),
            ("LEVEL", status.level()),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, v, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "SPEED", label);
        let end = fb.put_u32(panel_x, y + 1, snap.drop_interval_ms, value);
        fb.put_str(end, y + 1, "ms", value.dim());
        y = y.saturating_add(3);

        let help = value.dim();
        for line in [
            "←→ move",
            "↑ rotate  z ccw",
            "↓ soft  ␣ hard",
            "p pause  r new",
            "q quit",
        ] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, help);
            y = y.saturating_add(1);
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
    let Frame { x, y, w, h } = frame;
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameState, Notifier, SequencePieces};
    use crate::types::Notice;

    fn view() -> GameView {
        GameView::default().with_anchor_y(AnchorY::Top)
    }

    #[test]
    fn locked_cells_use_kind_or_mono_colour() {
        let mut snap = GameSnapshot::default();
        snap.board[19][0] = PieceKind::S.code();
        let status = StatusPanel::new();
        let vp = Viewport::new(60, 24);

        let fb = view().render(&snap, &status, 0, vp);
        // row 19 -> y = 20, column 0 -> x = frame.x + 1
        let frame_x = (60 - 22) / 2;
        let cell = fb.get(frame_x + 1, 20).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, piece_color(PieceKind::S));

        let mono = view().with_locked_colors(LockedColors::Mono);
        let fb = mono.render(&snap, &status, 0, vp);
        assert_eq!(fb.get(frame_x + 1, 20).unwrap().style.fg, LOCKED_FILL);
    }

    #[test]
    fn spawn_buffer_cells_are_not_drawn() {
        let game = GameState::with_source(SequencePieces::repeat(PieceKind::T));
        let snap = game.snapshot();
        let fb = view().render(&snap, &StatusPanel::new(), 0, Viewport::new(60, 24));

        assert!(!fb.cells().iter().any(|c| c.ch == '█'));
    }

    #[test]
    fn hud_comes_from_status_panel() {
        let snap = GameSnapshot::default();
        let mut status = StatusPanel::new();
        status.update_hud(1200, 12, 2);

        let fb = view().render(&snap, &status, 0, Viewport::new(60, 24));
        let panel_x = (60 - 22) / 2 + 22 + 2;
        let text: String = fb.row_text(1).chars().skip(panel_x as usize).collect();
        assert!(text.starts_with("1200"), "{:?}", text);
        let text: String = fb.row_text(4).chars().skip(panel_x as usize).collect();
        assert!(text.starts_with("12"), "{:?}", text);
    }

    #[test]
    fn toast_shows_until_expiry() {
        let snap = GameSnapshot::default();
        let mut status = StatusPanel::new();
        status.set_clock(100);
        status.notify(Notice::NewGame);
        let vp = Viewport::new(60, 24);

        let shown = view().render(&snap, &status, 200, vp);
        assert!(shown.row_text(22).contains("New game started"));

        let gone = view().render(&snap, &status, 1_300, vp);
        assert!(!gone.row_text(22).contains("New game started"));
    }

    #[test]
    fn overlays() {
        let mut snap = GameSnapshot::default();
        let status = StatusPanel::new();
        let vp = Viewport::new(60, 24);

        let fb = view().render(&snap, &status, 0, vp);
        assert!(fb.row_text(11).contains("PAUSED"));

        snap.game_over = true;
        let fb = view().render(&snap, &status, 0, vp);
        assert!(fb.row_text(11).contains("GAME OVER"));

        snap.game_over = false;
        snap.running = true;
        let fb = view().render(&snap, &status, 0, vp);
        assert!(!fb.row_text(11).contains("PAUSED"));
    }
}
