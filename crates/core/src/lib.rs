//! Core game logic module - pure, deterministic, and testable
//!
//! This crate holds the round lifecycle, its timing primitives, the tile grid
//! engine and the bundled minigames. It has **no dependencies** on terminal,
//! input devices or I/O:
//!
//! - **Deterministic**: every random choice comes from a seeded [`SimpleRng`]
//! - **Clock-free**: time is always passed in as `now_ms`, so tests drive it directly
//! - **Portable**: runs the same in the terminal host, tests and benchmarks
//!
//! # Module Structure
//!
//! - [`ticker`]: cancelable interval ticker
//! - [`countdown`]: progress in `[0, 1]` recomputed from absolute time, one completion
//! - [`round`]: Idle/Running/Won/Lost/Reset state machine and the win streak
//! - [`board`]: flat tile grid with cluster search, gravity and lateral compaction
//! - [`game`]: the [`Minigame`] trait and the [`GameController`] that runs one
//! - [`games`]: tiles, memory, code, typing and lock minigames
//! - [`config`]: validated round and minigame settings
//! - [`rng`]: seeded LCG
//!
//! # Example
//!
//! ```
//! use puzzle_arcade_core::{take_turn, Board, Turn};
//!
//! let mut board = Board::parse(&["RRB", "R.B", "GGG"]).unwrap();
//!
//! // Clear the red cluster; the rest falls and slides left
//! assert_eq!(take_turn(&mut board, 0), Turn::Cleared(3));
//! assert_eq!(board.to_rows(), vec!["..B", "..B", "GGG"]);
//! ```
//!
//! # Timing
//!
//! Hosts call [`GameController::tick`] from an [`IntervalTicker`] (16ms by
//! default). Countdown progress is derived from the round's start instant, so a
//! late or skipped tick never slows the clock down.

pub mod board;
pub mod config;
pub mod countdown;
pub mod game;
pub mod games;
pub mod rng;
pub mod round;
pub mod ticker;

pub use puzzle_arcade_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::{
    CodeConfig, ConfigError, ConfigResult, LockConfig, MemoryConfig, RoundConfig, TileConfig,
    TypingConfig,
};
pub use countdown::{Countdown, CountdownTick, TimerHandle};
pub use game::{
    Frame, FrameBody, GameController, GridCell, GridCursor, Minigame, Outcome, RoundEvent, Verdict,
};
pub use games::{
    create, grade, take_turn, CodeBreaker, GameSettings, Guess, MemoryGame, TileGame, TimingLock,
    Turn, TypingRace,
};
pub use rng::SimpleRng;
pub use round::{next_streak, transition, Round, StatusListener, TransitionError};
pub use ticker::IntervalTicker;
