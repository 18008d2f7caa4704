//! Runtime configuration from environment variables.
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `BLOCKFALL_SEED` | Piece sequence seed (u32) | system clock |
//! | `BLOCKFALL_LOG_PATH` | JSON-lines event log path | disabled |
//! | `BLOCKFALL_FRAME_MS` | Driver frame period | 16 |
//! | `BLOCKFALL_MONO_LOCKED` | `1`/`true`: locked cells use one fill colour | off |
//!
//! Game rules are compile-time constants in `blockfall-types`.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};

pub const DEFAULT_FRAME_MS: u64 = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub seed: u32,
    pub log_path: Option<PathBuf>,
    pub frame_ms: u64,
    pub mono_locked: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: clock_seed(),
            log_path: None,
            frame_ms: DEFAULT_FRAME_MS,
            mono_locked: false,
        }
    }
}

impl Config {
    /// Read the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup.
    ///
    /// An explicit seed that does not parse is an error; every other bad value
    /// falls back to its default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let seed = match get("BLOCKFALL_SEED") {
            Some(s) => s
                .parse::<u32>()
                .with_context(|| format!("BLOCKFALL_SEED must be an unsigned 32-bit integer, got {:?}", s))?,
            None => clock_seed(),
        };

        let log_path = get("BLOCKFALL_LOG_PATH").map(PathBuf::from);

        let frame_ms = get("BLOCKFALL_FRAME_MS")
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_FRAME_MS)
            .max(1);

        let mono_locked = get("BLOCKFALL_MONO_LOCKED")
            .map(|s| parse_flag(&s))
            .unwrap_or(false);

        Ok(Self {
            seed,
            log_path,
            frame_ms,
            mono_locked,
        })
    }
}

fn parse_flag(s: &str) -> bool {
    matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}
