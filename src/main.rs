//! Blockfall terminal runner (default binary).
//!
//! Owns the single game, the frame clock and the terminal. Each frame it reads
//! at most one key, advances gravity, hands queued game events to the status
//! panel and the event log, then redraws if anything visible changed.

use std::fs::File;
use std::io::BufWriter;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::core::{GameSnapshot, GameState, Notifier};
use blockfall::input::{handle_key_event, should_quit};
use blockfall::term::{
    frame_fingerprint, FrameBuffer, GameView, LockedColors, RenderThrottle, StatusPanel,
    TerminalRenderer, Viewport,
};
use blockfall::{Config, EventLog};

/// Redraw period for frames that are not changing (paused or game over).
const STATIC_REDRAW_MS: u64 = 250;

type FileLog = EventLog<BufWriter<File>>;

fn main() -> Result<()> {
    let config = Config::from_env()?;
    let mut log = match &config.log_path {
        Some(path) => Some(EventLog::open(path)?),
        None => None,
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config, &mut log);

    // Always try to restore terminal state before reporting anything.
    let _ = term.exit();

    report(result, config.seed)
}

/// Print the final summary, or hand the error back for `main` to return.
fn report(result: Result<GameSnapshot>, seed: u32) -> Result<()> {
    let last = result?;
    eprintln!(
        "[blockfall] seed {} score {} lines {} level {}",
        seed, last.score, last.lines, last.level
    );
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: &Config, log: &mut Option<FileLog>) -> Result<GameSnapshot> {
    let clock = Instant::now();
    let now_ms = || clock.elapsed().as_millis() as u64;

    let mut game = GameState::new(config.seed);
    let mut status = StatusPanel::new();
    if let Some(log) = log.as_mut() {
        log.session_start(now_ms(), config.seed)?;
    }

    let locked = if config.mono_locked {
        LockedColors::Mono
    } else {
        LockedColors::ByKind
    };
    let view = GameView::default().with_locked_colors(locked);
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut throttle = RenderThrottle::new(STATIC_REDRAW_MS);

    let frame = Duration::from_millis(config.frame_ms);
    let mut last_frame = Instant::now();

    loop {
        // Input with timeout until next frame.
        let timeout = frame.checked_sub(last_frame.elapsed()).unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        game.snapshot_into(&mut snap);
                        return Ok(snap);
                    }
                    if let Some(action) = handle_key_event(key) {
                        game.apply_action(action);
                        throttle.reset();
                    }
                }
                Event::Resize(..) => {
                    term.invalidate();
                    throttle.reset();
                }
                _ => {}
            }
        }

        if last_frame.elapsed() >= frame {
            last_frame = Instant::now();
            game.tick(now_ms());
        }

        let now = now_ms();
        status.set_clock(now);
        for event in game.drain_events() {
            status.deliver(&event);
            if let Some(log) = log.as_mut() {
                log.event(now, &event)?;
            }
        }
        status.expire(now);

        game.snapshot_into(&mut snap);
        let fingerprint = frame_fingerprint(&snap, &status, now);
        if throttle.should_render(now, fingerprint, !snap.running) {
            let (w, h) = TerminalRenderer::size().unwrap_or((80, 24));
            view.render_into(&snap, &status, now, Viewport::new(w, h), &mut fb);
            term.present(&mut fb, fingerprint)?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn report_returns_run_errors() {
        let err = report(Err(anyhow!("terminal went away")), 7).unwrap_err();
        assert_eq!(err.to_string(), "terminal went away");
    }

    #[test]
    fn report_accepts_finished_game() {
        assert!(report(Ok(GameSnapshot::default()), 7).is_ok());
    }
}
