//! Analytics module - round events as records
//!
//! Turns round status changes into [`RoundRecord`]s (round start, complete, fail,
//! reset) carrying the game, streak, score and time since the round started, and
//! hands them to an [`AnalyticsSink`]. Where the records end up is the sink's
//! business: [`JsonLinesSink`] writes one JSON object per line, [`MemorySink`]
//! keeps them for tests.
//!
//! # Example
//!
//! ```
//! use puzzle_arcade_analytics::{AnalyticsSink, MemorySink, RecordKind, RoundRecorder};
//! use puzzle_arcade_types::{GameKind, RoundStatus, StatusChange};
//!
//! let mut recorder = RoundRecorder::new();
//! let mut sink = MemorySink::default();
//!
//! let start = StatusChange { status: RoundStatus::Running, streak: 0, at_ms: 1000 };
//! let won = StatusChange { status: RoundStatus::Won, streak: 1, at_ms: 4500 };
//!
//! for change in [start, won] {
//!     if let Some(record) = recorder.observe(GameKind::Tiles, &change, 12) {
//!         sink.record(&record).unwrap();
//!     }
//! }
//!
//! let records = sink.records();
//! assert_eq!(records[1].event, RecordKind::RoundComplete);
//! assert_eq!(records[1].elapsed_ms, 3500);
//! ```

mod sink;

use serde::Serialize;

use puzzle_arcade_types::{GameKind, RoundStatus, StatusChange};

pub use sink::{AnalyticsError, AnalyticsResult, AnalyticsSink, JsonLinesSink, MemorySink};

/// Analytics event name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    RoundStart,
    RoundComplete,
    RoundFail,
    RoundReset,
}

impl RecordKind {
    /// Event for a status change; Idle is bookkeeping and records nothing.
    pub fn for_status(status: RoundStatus) -> Option<Self> {
        match status {
            RoundStatus::Running => Some(Self::RoundStart),
            RoundStatus::Won => Some(Self::RoundComplete),
            RoundStatus::Lost => Some(Self::RoundFail),
            RoundStatus::Reset => Some(Self::RoundReset),
            RoundStatus::Idle => None,
        }
    }
}

/// One analytics record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundRecord {
    pub event: RecordKind,
    pub game: &'static str,
    pub status: &'static str,
    pub streak: u32,
    pub score: u32,
    /// Time since the round entered Running (0 for round_start)
    pub elapsed_ms: u64,
    pub at_ms: u64,
}

/// Tracks round start instants so outcome records carry elapsed time.
#[derive(Debug, Clone, Default)]
pub struct RoundRecorder {
    started_at_ms: Option<u64>,
}

impl RoundRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record for `change`, if it is one worth recording.
    pub fn observe(
        &mut self,
        game: GameKind,
        change: &StatusChange,
        score: u32,
    ) -> Option<RoundRecord> {
        let event = RecordKind::for_status(change.status)?;
        let elapsed_ms = match event {
            RecordKind::RoundStart => {
                self.started_at_ms = Some(change.at_ms);
                0
            }
            _ => self
                .started_at_ms
                .take()
                .map_or(0, |start| change.at_ms.saturating_sub(start)),
        };
        Some(RoundRecord {
            event,
            game: game.as_str(),
            status: change.status.as_str(),
            streak: change.streak,
            score,
            elapsed_ms,
            at_ms: change.at_ms,
        })
    }
}
