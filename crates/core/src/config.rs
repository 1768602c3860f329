//! Configuration for rounds and minigames.
//!
//! Every config validates in its constructor, so a value that exists is usable:
//! a zero-length countdown or an impossible board fails fast here instead of
//! producing a round that is over before it starts.

use thiserror::Error;

use crate::types::{
    Color, DEFAULT_COLUMNS, DEFAULT_DURATION_MS, DEFAULT_PALETTE_SIZE, DEFAULT_ROWS,
    MAX_DIMENSION, RESULT_DISPLAY_MS, TICK_MS,
};

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("round duration must be greater than 0ms")]
    ZeroDuration,
    #[error("tick interval must be greater than 0ms")]
    ZeroTick,
    #[error("{name} must be between 1 and {max}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: u32,
        max: u32,
    },
    #[error("{0}")]
    Inconsistent(&'static str),
}

fn check_range(name: &'static str, value: u32, max: u32) -> ConfigResult<()> {
    if value == 0 || value > max {
        return Err(ConfigError::OutOfRange { name, value, max });
    }
    Ok(())
}

/// Timing shared by every minigame round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundConfig {
    duration_ms: u32,
    tick_ms: u32,
    result_display_ms: u32,
}

impl RoundConfig {
    pub fn new(duration_ms: u32) -> ConfigResult<Self> {
        if duration_ms == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        Ok(Self {
            duration_ms,
            tick_ms: TICK_MS,
            result_display_ms: RESULT_DISPLAY_MS,
        })
    }

    pub fn with_tick_ms(mut self, tick_ms: u32) -> ConfigResult<Self> {
        if tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        self.tick_ms = tick_ms;
        Ok(self)
    }

    /// How long a Won/Lost/Reset result stays up before the round settles (0 = immediately)
    pub fn with_result_display_ms(mut self, result_display_ms: u32) -> Self {
        self.result_display_ms = result_display_ms;
        self
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn tick_ms(&self) -> u32 {
        self.tick_ms
    }

    pub fn result_display_ms(&self) -> u32 {
        self.result_display_ms
    }
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            tick_ms: TICK_MS,
            result_display_ms: RESULT_DISPLAY_MS,
        }
    }
}

/// Tile-clearing board shape and color count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileConfig {
    rows: u8,
    columns: u8,
    palette_size: u8,
}

impl TileConfig {
    pub fn new(rows: u8, columns: u8, palette_size: u8) -> ConfigResult<Self> {
        check_range("rows", rows as u32, MAX_DIMENSION as u32)?;
        check_range("columns", columns as u32, MAX_DIMENSION as u32)?;
        check_range("palette size", palette_size as u32, Color::PALETTE.len() as u32)?;
        if rows as u32 * (columns as u32) < 2 {
            return Err(ConfigError::Inconsistent("tile board needs at least 2 cells"));
        }
        Ok(Self {
            rows,
            columns,
            palette_size,
        })
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn columns(&self) -> u8 {
        self.columns
    }

    pub fn palette_size(&self) -> u8 {
        self.palette_size
    }
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            palette_size: DEFAULT_PALETTE_SIZE,
        }
    }
}

/// Memory-pattern grid and reveal timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryConfig {
    rows: u8,
    columns: u8,
    pattern_len: u8,
    reveal_ms: u32,
}

impl MemoryConfig {
    pub fn new(rows: u8, columns: u8, pattern_len: u8, reveal_ms: u32) -> ConfigResult<Self> {
        check_range("rows", rows as u32, MAX_DIMENSION as u32)?;
        check_range("columns", columns as u32, MAX_DIMENSION as u32)?;
        check_range(
            "pattern length",
            pattern_len as u32,
            rows as u32 * columns as u32,
        )?;
        Ok(Self {
            rows,
            columns,
            pattern_len,
            reveal_ms,
        })
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn columns(&self) -> u8 {
        self.columns
    }

    pub fn pattern_len(&self) -> u8 {
        self.pattern_len
    }

    pub fn reveal_ms(&self) -> u32 {
        self.reveal_ms
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            rows: 4,
            columns: 4,
            pattern_len: 5,
            reveal_ms: 2000,
        }
    }
}

/// Hidden code length, digit alphabet and guess budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeConfig {
    code_len: u8,
    digits: u8,
    max_attempts: u8,
}

impl CodeConfig {
    pub fn new(code_len: u8, digits: u8, max_attempts: u8) -> ConfigResult<Self> {
        check_range("code length", code_len as u32, 8)?;
        check_range("digits", digits as u32, 10)?;
        check_range("attempts", max_attempts as u32, 20)?;
        Ok(Self {
            code_len,
            digits,
            max_attempts,
        })
    }

    pub fn code_len(&self) -> u8 {
        self.code_len
    }

    pub fn digits(&self) -> u8 {
        self.digits
    }

    pub fn max_attempts(&self) -> u8 {
        self.max_attempts
    }
}

impl Default for CodeConfig {
    fn default() -> Self {
        Self {
            code_len: 4,
            digits: 6,
            max_attempts: 8,
        }
    }
}

/// Typing race phrase length and mistake budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingConfig {
    words: u8,
    mistake_limit: u8,
}

impl TypingConfig {
    pub fn new(words: u8, mistake_limit: u8) -> ConfigResult<Self> {
        check_range("words", words as u32, 16)?;
        check_range("mistake limit", mistake_limit as u32, u8::MAX as u32)?;
        Ok(Self {
            words,
            mistake_limit,
        })
    }

    pub fn words(&self) -> u8 {
        self.words
    }

    pub fn mistake_limit(&self) -> u8 {
        self.mistake_limit
    }
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            words: 4,
            mistake_limit: 3,
        }
    }
}

/// Timing lock track geometry and sweep speed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockConfig {
    pins: u8,
    track_len: u8,
    window: u8,
    sweep_ms: u32,
}

impl LockConfig {
    pub fn new(pins: u8, track_len: u8, window: u8, sweep_ms: u32) -> ConfigResult<Self> {
        check_range("pins", pins as u32, 8)?;
        check_range("track length", track_len as u32, 64)?;
        check_range("window", window as u32, track_len as u32)?;
        if track_len < 2 {
            return Err(ConfigError::Inconsistent("track needs at least 2 positions"));
        }
        if sweep_ms == 0 {
            return Err(ConfigError::Inconsistent("sweep time must be greater than 0ms"));
        }
        Ok(Self {
            pins,
            track_len,
            window,
            sweep_ms,
        })
    }

    pub fn pins(&self) -> u8 {
        self.pins
    }

    pub fn track_len(&self) -> u8 {
        self.track_len
    }

    pub fn window(&self) -> u8 {
        self.window
    }

    /// Time for the indicator to travel from one end of the track to the other
    pub fn sweep_ms(&self) -> u32 {
        self.sweep_ms
    }
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            pins: 3,
            track_len: 21,
            window: 3,
            sweep_ms: 1200,
        }
    }
}
