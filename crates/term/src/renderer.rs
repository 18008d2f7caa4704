//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Frames are keyed by their [`frame_fingerprint`](crate::frame_fingerprint).
//! A frame whose fingerprint matches the one on screen is not written at all.
//! Otherwise only cells that differ from the screen are rewritten, except on
//! the first frame, after a resize or after [`TerminalRenderer::invalidate`],
//! which clear and repaint everything.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

/// What is currently on screen.
struct Screen {
    frame: FrameBuffer,
    fingerprint: u64,
}

pub struct TerminalRenderer {
    stdout: io::Stdout,
    screen: Option<Screen>,
    buf: Vec<u8>,
    active: bool,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            screen: None,
            buf: Vec::with_capacity(16 * 1024),
            active: false,
        }
    }

    /// Current terminal size in cells.
    pub fn size() -> Result<(u16, u16)> {
        Ok(terminal::size()?)
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        self.active = true;
        Ok(())
    }

    /// Restore the terminal. Safe to call more than once.
    pub fn exit(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Forget what is on screen; the next frame repaints everything.
    pub fn invalidate(&mut self) {
        self.screen = None;
    }

    /// True when `fb` with this fingerprint is already on screen.
    pub fn is_current(&self, fb: &FrameBuffer, fingerprint: u64) -> bool {
        self.screen.as_ref().is_some_and(|s| {
            s.fingerprint == fingerprint
                && s.frame.width() == fb.width()
                && s.frame.height() == fb.height()
        })
    }

    /// Put `fb` on screen unless it is already there.
    ///
    /// On a write, the frame is kept as the new screen and `fb` receives the
    /// previous one, so a caller can keep passing the same buffer every frame.
    /// Returns whether anything was written.
    pub fn present(&mut self, fb: &mut FrameBuffer, fingerprint: u64) -> Result<bool> {
        if self.is_current(fb, fingerprint) {
            return Ok(false);
        }

        self.buf.clear();
        encode_frame_into(self.screen.as_ref().map(|s| &s.frame), fb, &mut self.buf)?;
        self.flush_buf()?;

        match self.screen.as_mut() {
            Some(screen) => {
                std::mem::swap(&mut screen.frame, fb);
                screen.fingerprint = fingerprint;
            }
            None => {
                let frame = std::mem::replace(fb, FrameBuffer::new(fb.width(), fb.height()));
                self.screen = Some(Screen { frame, fingerprint });
            }
        }
        Ok(true)
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode the commands that turn `prev` into `next` into `out`.
///
/// With no `prev`, or one of a different size, the screen is cleared and every
/// cell written. Returns the number of cells written.
pub fn encode_frame_into(
    prev: Option<&FrameBuffer>,
    next: &FrameBuffer,
    out: &mut Vec<u8>,
) -> Result<usize> {
    let prev = prev.filter(|p| p.width() == next.width() && p.height() == next.height());
    let mut pen = Pen::new(out);
    if prev.is_none() {
        pen.out.queue(terminal::Clear(terminal::ClearType::All))?;
    }

    let width = next.width() as usize;
    let mut written = 0;
    if width > 0 {
        for (y, row) in next.cells().chunks(width).enumerate() {
            let old = prev.map(|p| &p.cells()[y * width..(y + 1) * width]);
            for (x, &cell) in row.iter().enumerate() {
                if old.is_some_and(|old| old[x] == cell) {
                    continue;
                }
                pen.put(x as u16, y as u16, cell)?;
                written += 1;
            }
        }
    }

    pen.finish()?;
    Ok(written)
}

/// Tracks the terminal's cursor and SGR state so only changes are emitted.
struct Pen<'a> {
    out: &'a mut Vec<u8>,
    cursor: Option<(u16, u16)>,
    style: Option<CellStyle>,
}

impl<'a> Pen<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self {
            out,
            cursor: None,
            style: None,
        }
    }

    fn put(&mut self, x: u16, y: u16, cell: Cell) -> Result<()> {
        if self.cursor != Some((x, y)) {
            self.out.queue(cursor::MoveTo(x, y))?;
        }
        self.set_style(cell.style)?;
        self.out.queue(Print(cell.ch))?;
        self.cursor = Some((x.saturating_add(1), y));
        Ok(())
    }

    fn set_style(&mut self, style: CellStyle) -> Result<()> {
        if self.style == Some(style) {
            return Ok(());
        }
        let mut known = self.style;
        if known.map_or(true, |k| k.bold != style.bold || k.dim != style.dim) {
            // SGR reset also drops both colours.
            self.out.queue(SetAttribute(Attribute::Reset))?;
            if style.bold {
                self.out.queue(SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                self.out.queue(SetAttribute(Attribute::Dim))?;
            }
            known = None;
        }
        if known.map_or(true, |k| k.fg != style.fg) {
            self.out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
        }
        if known.map_or(true, |k| k.bg != style.bg) {
            self.out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
        }
        self.style = Some(style);
        Ok(())
    }

    fn finish(self) -> Result<()> {
        self.out.queue(ResetColor)?;
        self.out.queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(out: &[u8]) -> String {
        String::from_utf8(out.to_vec()).unwrap()
    }

    fn moves(out: &[u8]) -> usize {
        // MoveTo is CSI row;col H; nothing else emitted here ends in 'H'.
        text(out).matches('H').count()
    }

    fn xs(fb: &mut FrameBuffer, y: u16, xs: impl IntoIterator<Item = u16>) {
        for x in xs {
            fb.set(x, y, CellStyle::default().cell('X'));
        }
    }

    #[test]
    fn style_colours_are_truecolor() {
        assert_eq!(
            rgb_to_color(Rgb::hex(0xc47bff)),
            Color::Rgb {
                r: 0xc4,
                g: 0x7b,
                b: 0xff
            }
        );
    }

    #[test]
    fn first_frame_clears_and_writes_every_cell() {
        let fb = FrameBuffer::new(4, 2);
        let mut out = Vec::new();
        assert_eq!(encode_frame_into(None, &fb, &mut out).unwrap(), 8);
        assert!(text(&out).contains("\x1b[2J"));
        // One move per row: cells within a row follow the cursor.
        assert_eq!(moves(&out), 2);
    }

    #[test]
    fn identical_frames_write_no_cells() {
        let a = FrameBuffer::new(4, 2);
        let mut out = Vec::new();
        assert_eq!(encode_frame_into(Some(&a), &a.clone(), &mut out).unwrap(), 0);
        assert_eq!(moves(&out), 0);
        assert!(!text(&out).contains("\x1b[2J"));
    }

    #[test]
    fn resized_frames_are_repainted() {
        let a = FrameBuffer::new(3, 1);
        let b = FrameBuffer::new(4, 2);
        let mut out = Vec::new();
        assert_eq!(encode_frame_into(Some(&a), &b, &mut out).unwrap(), 8);
        assert!(text(&out).contains("\x1b[2J"));
    }

    #[test]
    fn adjacent_changes_share_one_cursor_move() {
        let a = FrameBuffer::new(8, 2);
        let mut b = a.clone();
        xs(&mut b, 0, 1..=3);
        xs(&mut b, 0, [6]);

        let mut out = Vec::new();
        assert_eq!(encode_frame_into(Some(&a), &b, &mut out).unwrap(), 4);
        assert_eq!(moves(&out), 2);
        assert!(text(&out).contains("\x1b[1;2H"));
        assert!(text(&out).contains("XXX"));
        assert!(text(&out).contains("\x1b[1;7H"));
    }

    #[test]
    fn unchanged_style_is_not_repeated() {
        let a = FrameBuffer::new(6, 1);
        let mut b = a.clone();
        xs(&mut b, 0, 0..6);
        let mut out = Vec::new();
        encode_frame_into(Some(&a), &b, &mut out).unwrap();
        assert_eq!(text(&out).matches("38;2;").count(), 1);
    }

    #[test]
    fn colour_change_keeps_other_state() {
        let a = FrameBuffer::new(2, 1);
        let mut b = a.clone();
        let red = CellStyle::new(Rgb::hex(0xff0000), Rgb::new(0, 0, 0));
        b.set(0, 0, red.cell('X'));
        xs(&mut b, 0, [1]);

        let mut out = Vec::new();
        encode_frame_into(Some(&a), &b, &mut out).unwrap();
        let text = text(&out);
        // Second cell only swaps the foreground.
        assert_eq!(text.matches("38;2;").count(), 2);
        assert_eq!(text.matches("48;2;").count(), 1);
        // One reset before the first cell, two when finishing.
        assert_eq!(text.matches("\x1b[0m").count(), 3);
    }

    #[test]
    fn present_skips_frames_already_on_screen() {
        let mut term = TerminalRenderer::new();
        let fb = FrameBuffer::new(4, 2);
        assert!(!term.is_current(&fb, 7));

        term.screen = Some(Screen {
            frame: fb.clone(),
            fingerprint: 7,
        });
        assert!(term.is_current(&fb, 7));
        assert!(!term.is_current(&fb, 8));
        assert!(!term.is_current(&FrameBuffer::new(5, 2), 7));

        term.invalidate();
        assert!(!term.is_current(&fb, 7));
    }
}
