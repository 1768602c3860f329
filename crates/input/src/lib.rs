//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::PuzzleInput`]. How a key is
//! read depends on the running game's [`crate::types::InputMode`]: grid games use
//! arrows/WASD/HJKL, text games receive printable keys verbatim.

pub mod map;

pub use puzzle_arcade_types as types;

pub use map::{map_key, should_quit};
