//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the arcade.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (round logic, grid engine, terminal rendering, analytics).
//!
//! # Round Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Interval ticker delay (~60 FPS) |
//! | `DEFAULT_DURATION_MS` | 30000 | Countdown length of one round |
//! | `RESULT_DISPLAY_MS` | 1500 | How long Won/Lost/Reset stays on screen |
//!
//! # Board Defaults
//!
//! The tile-clearing board defaults to 8 rows by 12 columns with a palette of
//! 3 colors. Dimensions are capped at [`MAX_DIMENSION`].
//!
//! # Examples
//!
//! ```
//! use puzzle_arcade_types::{Color, GameKind, RoundStatus};
//!
//! // Parse a game kind (case-insensitive)
//! assert_eq!(GameKind::from_str("Tiles"), Some(GameKind::Tiles));
//!
//! // Only Won/Lost/Reset end a round
//! assert!(RoundStatus::Won.is_terminal());
//! assert!(!RoundStatus::Running.is_terminal());
//!
//! // Palette lookups
//! assert_eq!(Color::from_index(0), Some(Color::Red));
//! assert_eq!(Color::Red.as_char(), 'R');
//! ```

/// Interval ticker delay in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Default countdown length of a round (30 seconds)
pub const DEFAULT_DURATION_MS: u32 = 30_000;

/// Time a terminal status (Won/Lost/Reset) is displayed before the round settles to Idle
pub const RESULT_DISPLAY_MS: u32 = 1500;

/// Default tile board rows
pub const DEFAULT_ROWS: u8 = 8;

/// Default tile board columns
pub const DEFAULT_COLUMNS: u8 = 12;

/// Default number of distinct tile colors
pub const DEFAULT_PALETTE_SIZE: u8 = 3;

/// Largest accepted board dimension (rows or columns)
pub const MAX_DIMENSION: u8 = 32;

/// Status of a single round
///
/// - **Idle**: between rounds; the only state a round auto-starts from
/// - **Running**: countdown active, gameplay input accepted
/// - **Lost** / **Won** / **Reset**: the round is over and its result is on display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RoundStatus {
    #[default]
    Idle,
    Running,
    Lost,
    Won,
    Reset,
}

impl RoundStatus {
    /// Whether the round has ended (Won, Lost or Reset)
    pub fn is_terminal(&self) -> bool {
        matches!(self, RoundStatus::Lost | RoundStatus::Won | RoundStatus::Reset)
    }

    /// Convert to lowercase string representation
    ///
    /// # Examples
    ///
    /// ```
    /// use puzzle_arcade_types::RoundStatus;
    ///
    /// assert_eq!(RoundStatus::Running.as_str(), "running");
    /// assert_eq!(RoundStatus::Lost.as_str(), "lost");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundStatus::Idle => "idle",
            RoundStatus::Running => "running",
            RoundStatus::Lost => "lost",
            RoundStatus::Won => "won",
            RoundStatus::Reset => "reset",
        }
    }
}

/// Things that can happen to a round
///
/// The round state machine accepts a trigger only from the states listed here:
/// - **Start**: Idle → Running
/// - **Win**: Running → Won
/// - **Lose**: Running → Lost
/// - **Expire**: Running → Lost (countdown reached 100%)
/// - **Reset**: Running | Won | Lost → Reset
/// - **Settle**: Won | Lost | Reset → Idle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundTrigger {
    Start,
    Win,
    Lose,
    Expire,
    Reset,
    Settle,
}

impl RoundTrigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundTrigger::Start => "start",
            RoundTrigger::Win => "win",
            RoundTrigger::Lose => "lose",
            RoundTrigger::Expire => "expire",
            RoundTrigger::Reset => "reset",
            RoundTrigger::Settle => "settle",
        }
    }
}

/// Notification emitted on every accepted round transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub status: RoundStatus,
    pub streak: u32,
    /// Host clock time (ms) at which the transition happened.
    pub at_ms: u64,
}

/// Tile colors
///
/// The palette is ordered; a palette size of N uses the first N colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
    Cyan,
}

impl Color {
    /// Full palette in index order
    pub const PALETTE: [Color; 6] = [
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::Yellow,
        Color::Purple,
        Color::Cyan,
    ];

    /// Look up a palette color by index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::PALETTE.get(index).copied()
    }

    /// Position of this color in [`Color::PALETTE`]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Single-letter representation (used by board fixtures and text dumps)
    pub fn as_char(&self) -> char {
        match self {
            Color::Red => 'R',
            Color::Green => 'G',
            Color::Blue => 'B',
            Color::Yellow => 'Y',
            Color::Purple => 'P',
            Color::Cyan => 'C',
        }
    }

    /// Parse a single-letter color (case-insensitive)
    pub fn from_char(ch: char) -> Option<Self> {
        match ch.to_ascii_uppercase() {
            'R' => Some(Color::Red),
            'G' => Some(Color::Green),
            'B' => Some(Color::Blue),
            'Y' => Some(Color::Yellow),
            'P' => Some(Color::Purple),
            'C' => Some(Color::Cyan),
            _ => None,
        }
    }
}

/// A cell on the tile board
///
/// - `None`: Empty cell
/// - `Some(Color)`: Cell holding a tile of that color
pub type Cell = Option<Color>;

/// Player input, independent of the input device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PuzzleInput {
    /// Move the cursor one cell up
    Up,
    /// Move the cursor one cell down
    Down,
    /// Move the cursor one cell left
    Left,
    /// Move the cursor one cell right
    Right,
    /// Activate the cell under the cursor / submit / press the lock
    Activate,
    /// A typed character
    Char(char),
    /// Delete the last typed character
    Backspace,
    /// Abandon the current round
    Restart,
}

/// How a host should translate keys for a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Arrow/letter navigation plus activate
    #[default]
    Navigate,
    /// Printable characters are typed text
    Text,
}

/// The available minigames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKind {
    Tiles,
    Memory,
    Code,
    Typing,
    Lock,
}

impl GameKind {
    pub const ALL: [GameKind; 5] = [
        GameKind::Tiles,
        GameKind::Memory,
        GameKind::Code,
        GameKind::Typing,
        GameKind::Lock,
    ];

    /// Parse game kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use puzzle_arcade_types::GameKind;
    ///
    /// assert_eq!(GameKind::from_str("memory"), Some(GameKind::Memory));
    /// assert_eq!(GameKind::from_str("LOCK"), Some(GameKind::Lock));
    /// assert_eq!(GameKind::from_str("chess"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "tiles" => Some(GameKind::Tiles),
            "memory" => Some(GameKind::Memory),
            "code" => Some(GameKind::Code),
            "typing" => Some(GameKind::Typing),
            "lock" => Some(GameKind::Lock),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::Tiles => "tiles",
            GameKind::Memory => "memory",
            GameKind::Code => "code",
            GameKind::Typing => "typing",
            GameKind::Lock => "lock",
        }
    }

    /// One-line description for menus and `list`
    pub fn description(&self) -> &'static str {
        match self {
            GameKind::Tiles => "Clear connected groups of same-colored tiles",
            GameKind::Memory => "Recall the cells that lit up",
            GameKind::Code => "Break the hidden digit code",
            GameKind::Typing => "Type the phrase before time runs out",
            GameKind::Lock => "Set each pin while the sweep is in the window",
        }
    }
}
