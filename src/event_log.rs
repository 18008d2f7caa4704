//! JSON-lines event log.
//!
//! One object per line, tagged by `type`:
//!
//! ```text
//! {"type":"session_start","ts_ms":0,"seed":42}
//! {"type":"hud","ts_ms":5120,"score":100,"lines":1,"level":1}
//! {"type":"notice","ts_ms":9001,"notice":"paused","message":"Paused"}
//! ```

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::GameEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogRecord {
    SessionStart {
        ts_ms: u64,
        seed: u32,
    },
    Hud {
        ts_ms: u64,
        score: u32,
        lines: u32,
        level: u32,
    },
    Notice {
        ts_ms: u64,
        notice: &'static str,
        message: &'static str,
    },
}

impl LogRecord {
    pub fn from_event(ts_ms: u64, event: &GameEvent) -> Self {
        match *event {
            GameEvent::Hud {
                score,
                lines,
                level,
            } => LogRecord::Hud {
                ts_ms,
                score,
                lines,
                level,
            },
            GameEvent::Notice(notice) => LogRecord::Notice {
                ts_ms,
                notice: notice.as_str(),
                message: notice.message(),
            },
        }
    }
}

/// Appends [`LogRecord`]s to a writer, one JSON object per line.
pub struct EventLog<W: Write> {
    out: W,
    buf: Vec<u8>,
}

impl EventLog<BufWriter<File>> {
    /// Open `path` for appending, creating it if needed.
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening event log {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> EventLog<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            buf: Vec::with_capacity(256),
        }
    }

    pub fn write_record(&mut self, record: &LogRecord) -> Result<()> {
        self.buf.clear();
        serde_json::to_writer(&mut self.buf, record)?;
        self.buf.push(b'\n');
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }

    pub fn session_start(&mut self, ts_ms: u64, seed: u32) -> Result<()> {
        self.write_record(&LogRecord::SessionStart { ts_ms, seed })
    }

    pub fn event(&mut self, ts_ms: u64, event: &GameEvent) -> Result<()> {
        self.write_record(&LogRecord::from_event(ts_ms, event))
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
