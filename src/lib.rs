//! Puzzle Arcade (workspace facade crate).
//!
//! Re-exports the workspace crates under one name (`puzzle_arcade::{core, analytics,
//! input, term, types}`) and holds the pieces the binary is assembled from: argument
//! parsing and the [`session::Session`] that ties a game controller to analytics.

pub use puzzle_arcade_analytics as analytics;
pub use puzzle_arcade_core as core;
pub use puzzle_arcade_input as input;
pub use puzzle_arcade_term as term;
pub use puzzle_arcade_types as types;

pub mod cli;
pub mod session;
