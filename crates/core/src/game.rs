//! Minigame trait and the controller that runs any minigame through a [`Round`].
//!
//! A minigame only decides what its input means and whether that input won or lost
//! the round. Everything shared lives in [`GameController`]:
//!
//! - auto-start from Idle (fresh game state, fresh countdown)
//! - input forwarded only while Running
//! - countdown expiry forcing a loss
//! - a result display delay before settling back to Idle
//! - a queue of [`RoundEvent`]s for hosts and analytics

use tracing::warn;

use crate::config::RoundConfig;
use crate::rng::SimpleRng;
use crate::round::{Round, TransitionError};
use crate::types::{Color, GameKind, InputMode, PuzzleInput, RoundStatus, StatusChange};

/// What a piece of input (or a tick) did to the round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Continue,
    Won,
    Lost,
}

impl Verdict {
    /// The round outcome this verdict decides, if any
    pub fn outcome(self) -> Option<Outcome> {
        match self {
            Verdict::Continue => None,
            Verdict::Won => Some(Outcome::Won),
            Verdict::Lost => Some(Outcome::Lost),
        }
    }
}

/// How a finished round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

impl Outcome {
    pub fn status(self) -> RoundStatus {
        match self {
            Outcome::Won => RoundStatus::Won,
            Outcome::Lost => RoundStatus::Lost,
        }
    }
}

impl TryFrom<RoundStatus> for Outcome {
    /// Statuses other than Won and Lost are handed back unchanged.
    type Error = RoundStatus;

    fn try_from(status: RoundStatus) -> Result<Self, Self::Error> {
        match status {
            RoundStatus::Won => Ok(Outcome::Won),
            RoundStatus::Lost => Ok(Outcome::Lost),
            other => Err(other),
        }
    }
}

/// Display state of one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridCell {
    Empty,
    Tile(Color),
    /// Highlighted (e.g. a pattern cell being shown)
    Lit,
    /// Unknown to the player
    Hidden,
    /// Found / confirmed by the player
    Marked,
    /// A wrong pick
    Miss,
}

/// What a host needs to draw a game
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FrameBody {
    Grid {
        rows: u8,
        columns: u8,
        cells: Vec<GridCell>,
        cursor: Option<usize>,
    },
    Text {
        lines: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Frame {
    pub caption: String,
    pub body: FrameBody,
}

pub trait Minigame {
    fn kind(&self) -> GameKind;

    /// Replace all per-round state. Called right before each round starts.
    fn new_round(&mut self, rng: &mut SimpleRng, now_ms: u64);

    /// Apply one input while the round is running.
    fn handle_input(&mut self, input: PuzzleInput, now_ms: u64) -> Verdict;

    /// Per-tick logic while the round is running.
    fn tick(&mut self, _now_ms: u64) -> Verdict {
        Verdict::Continue
    }

    fn score(&self) -> u32;

    fn input_mode(&self) -> InputMode {
        InputMode::Navigate
    }

    fn frame(&self) -> Frame;
}

impl<G: Minigame + ?Sized> Minigame for Box<G> {
    fn kind(&self) -> GameKind {
        (**self).kind()
    }

    fn new_round(&mut self, rng: &mut SimpleRng, now_ms: u64) {
        (**self).new_round(rng, now_ms)
    }

    fn handle_input(&mut self, input: PuzzleInput, now_ms: u64) -> Verdict {
        (**self).handle_input(input, now_ms)
    }

    fn tick(&mut self, now_ms: u64) -> Verdict {
        (**self).tick(now_ms)
    }

    fn score(&self) -> u32 {
        (**self).score()
    }

    fn input_mode(&self) -> InputMode {
        (**self).input_mode()
    }

    fn frame(&self) -> Frame {
        (**self).frame()
    }
}

/// Cursor over a `rows x columns` grid, clamped at the edges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCursor {
    rows: u8,
    columns: u8,
    index: usize,
}

impl GridCursor {
    pub fn new(rows: u8, columns: u8) -> Self {
        Self {
            rows,
            columns,
            index: 0,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Move for a direction input; returns false for any other input.
    pub fn apply(&mut self, input: PuzzleInput) -> bool {
        let columns = self.columns.max(1) as usize;
        let (row, col) = (self.index / columns, self.index % columns);
        let (row, col) = match input {
            PuzzleInput::Up => (row.saturating_sub(1), col),
            PuzzleInput::Down => ((row + 1).min(self.rows.saturating_sub(1) as usize), col),
            PuzzleInput::Left => (row, col.saturating_sub(1)),
            PuzzleInput::Right => (row, (col + 1).min(columns - 1)),
            _ => return false,
        };
        self.index = row * columns + col;
        true
    }
}

/// A status change tagged with the game and its score at that moment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundEvent {
    pub game: GameKind,
    pub change: StatusChange,
    pub score: u32,
}

/// Runs a [`Minigame`] through the shared round lifecycle.
#[derive(Debug)]
pub struct GameController<G: Minigame> {
    game: G,
    round: Round,
    rng: SimpleRng,
    config: RoundConfig,
    settle_at_ms: Option<u64>,
    events: Vec<RoundEvent>,
}

impl<G: Minigame> GameController<G> {
    /// Create a controller with an Idle round. Call [`GameController::mount`] (or
    /// [`GameController::tick`]) to auto-start the first round.
    pub fn new(game: G, config: RoundConfig, seed: u32) -> Self {
        Self {
            game,
            round: Round::new(&config),
            rng: SimpleRng::new(seed),
            config,
            settle_at_ms: None,
            events: Vec::new(),
        }
    }

    /// Start the first round right away.
    pub fn mount(&mut self, now_ms: u64) {
        if self.round.status() == RoundStatus::Idle {
            // Idle -> Running cannot be rejected.
            let _ = self.start_round(now_ms);
        }
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn status(&self) -> RoundStatus {
        self.round.status()
    }

    pub fn streak(&self) -> u32 {
        self.round.streak()
    }

    pub fn progress(&self) -> f64 {
        self.round.progress()
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    /// Register a host side effect for every accepted round transition.
    pub fn on_status_change(&mut self, listener: impl FnMut(&StatusChange) + 'static) {
        self.round.on_status_change(listener);
    }

    /// Drain events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<RoundEvent> {
        std::mem::take(&mut self.events)
    }

    /// Idle -> Running with fresh game state.
    pub fn start_round(&mut self, now_ms: u64) -> Result<StatusChange, TransitionError> {
        if self.round.status() != RoundStatus::Idle {
            // Let the round report the rejected trigger.
            return self.round.start(now_ms);
        }
        self.game.new_round(&mut self.rng, now_ms);
        let change = self.round.start(now_ms)?;
        self.record(change);
        Ok(change)
    }

    /// Report a win or loss decided outside the game's own input handling.
    pub fn report_outcome(
        &mut self,
        outcome: Outcome,
        now_ms: u64,
    ) -> Result<StatusChange, TransitionError> {
        let change = self.round.report_status(outcome.status(), now_ms)?;
        self.finish(change, now_ms);
        Ok(change)
    }

    /// Abandon the current round (or cut a result display short).
    pub fn reset_round(&mut self, now_ms: u64) -> Result<StatusChange, TransitionError> {
        let change = self.round.reset(now_ms)?;
        self.finish(change, now_ms);
        Ok(change)
    }

    /// Route one input. Ignored unless the round is running (except Restart).
    pub fn handle_input(&mut self, input: PuzzleInput, now_ms: u64) {
        if input == PuzzleInput::Restart {
            if let Err(err) = self.reset_round(now_ms) {
                warn!(%err, "restart ignored");
            }
            return;
        }
        if self.round.status() != RoundStatus::Running {
            return;
        }
        let verdict = self.game.handle_input(input, now_ms);
        self.apply_verdict(verdict, now_ms);
    }

    /// Advance time: countdown, game tick, result display and auto-start.
    pub fn tick(&mut self, now_ms: u64) {
        match self.round.status() {
            RoundStatus::Idle => {
                let _ = self.start_round(now_ms);
            }
            RoundStatus::Running => {
                if let Some(change) = self.round.tick(now_ms) {
                    self.finish(change, now_ms);
                    return;
                }
                let verdict = self.game.tick(now_ms);
                self.apply_verdict(verdict, now_ms);
            }
            RoundStatus::Won | RoundStatus::Lost | RoundStatus::Reset => {
                let due = self.settle_at_ms.unwrap_or(now_ms);
                if now_ms >= due {
                    self.settle_at_ms = None;
                    if let Ok(change) = self.round.settle(now_ms) {
                        self.record(change);
                        let _ = self.start_round(now_ms);
                    }
                }
            }
        }
    }

    pub(crate) fn apply_verdict(&mut self, verdict: Verdict, now_ms: u64) {
        let Some(outcome) = verdict.outcome() else {
            return;
        };
        if let Err(err) = self.report_outcome(outcome, now_ms) {
            warn!(%err, "game verdict ignored");
        }
    }

    fn finish(&mut self, change: StatusChange, now_ms: u64) {
        self.settle_at_ms = Some(now_ms + self.config.result_display_ms() as u64);
        self.record(change);
    }

    fn record(&mut self, change: StatusChange) {
        self.events.push(RoundEvent {
            game: self.game.kind(),
            change,
            score: self.game.score(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Wins on Activate, loses on Backspace, counts characters as score.
    struct Dummy {
        rounds: u32,
        typed: u32,
    }

    impl Minigame for Dummy {
        fn kind(&self) -> GameKind {
            GameKind::Typing
        }

        fn new_round(&mut self, _rng: &mut SimpleRng, _now_ms: u64) {
            self.rounds += 1;
            self.typed = 0;
        }

        fn handle_input(&mut self, input: PuzzleInput, _now_ms: u64) -> Verdict {
            match input {
                PuzzleInput::Activate => Verdict::Won,
                PuzzleInput::Backspace => Verdict::Lost,
                PuzzleInput::Char(_) => {
                    self.typed += 1;
                    Verdict::Continue
                }
                _ => Verdict::Continue,
            }
        }

        fn score(&self) -> u32 {
            self.typed
        }

        fn frame(&self) -> Frame {
            Frame {
                caption: String::new(),
                body: FrameBody::Text { lines: Vec::new() },
            }
        }
    }

    fn controller(duration_ms: u32, display_ms: u32) -> GameController<Dummy> {
        let config = RoundConfig::new(duration_ms)
            .unwrap()
            .with_result_display_ms(display_ms);
        GameController::new(Dummy { rounds: 0, typed: 0 }, config, 1)
    }

    #[test]
    fn test_mount_starts_round() {
        let mut c = controller(1000, 100);
        assert_eq!(c.status(), RoundStatus::Idle);
        c.mount(0);
        assert_eq!(c.status(), RoundStatus::Running);
        assert_eq!(c.game().rounds, 1);
        let events = c.take_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].change.status, RoundStatus::Running);
        assert_eq!(events[0].game, GameKind::Typing);
    }

    #[test]
    fn test_input_ignored_outside_running() {
        let mut c = controller(1000, 100);
        c.handle_input(PuzzleInput::Char('a'), 0);
        assert_eq!(c.game().typed, 0);
        c.mount(0);
        c.handle_input(PuzzleInput::Activate, 10);
        assert_eq!(c.status(), RoundStatus::Won);
        c.handle_input(PuzzleInput::Char('a'), 20);
        assert_eq!(c.game().typed, 0);
    }

    #[test]
    fn test_win_then_settle_then_auto_start() {
        let mut c = controller(1000, 100);
        c.mount(0);
        c.handle_input(PuzzleInput::Char('x'), 5);
        c.handle_input(PuzzleInput::Activate, 10);
        assert_eq!(c.streak(), 1);

        c.tick(50);
        assert_eq!(c.status(), RoundStatus::Won);
        c.tick(110);
        assert_eq!(c.status(), RoundStatus::Running);
        assert_eq!(c.game().rounds, 2);
        assert_eq!(c.streak(), 1);

        let statuses: Vec<_> = c.take_events().iter().map(|e| e.change.status).collect();
        assert_eq!(
            statuses,
            vec![
                RoundStatus::Running,
                RoundStatus::Won,
                RoundStatus::Idle,
                RoundStatus::Running
            ]
        );
    }

    #[test]
    fn test_event_carries_score() {
        let mut c = controller(1000, 100);
        c.mount(0);
        c.handle_input(PuzzleInput::Char('a'), 1);
        c.handle_input(PuzzleInput::Char('b'), 2);
        c.handle_input(PuzzleInput::Backspace, 3);
        let events = c.take_events();
        let last = events.last().unwrap();
        assert_eq!(last.change.status, RoundStatus::Lost);
        assert_eq!(last.score, 2);
    }

    #[test]
    fn test_countdown_expiry_loses() {
        let mut c = controller(100, 50);
        c.mount(0);
        c.tick(0);
        c.tick(60);
        assert_eq!(c.status(), RoundStatus::Running);
        c.tick(100);
        assert_eq!(c.status(), RoundStatus::Lost);
        assert_eq!(c.streak(), 0);
    }

    #[test]
    fn test_restart_resets_streak() {
        let mut c = controller(1000, 0);
        c.mount(0);
        c.handle_input(PuzzleInput::Activate, 1);
        c.tick(2);
        assert_eq!(c.streak(), 1);
        c.handle_input(PuzzleInput::Restart, 3);
        assert_eq!(c.status(), RoundStatus::Reset);
        assert_eq!(c.streak(), 0);
    }

    #[test]
    fn test_report_outcome_when_idle_is_rejected() {
        let mut c = controller(1000, 0);
        assert!(c.report_outcome(Outcome::Won, 0).is_err());
        assert_eq!(c.streak(), 0);
    }

    #[test]
    fn test_report_outcome_sets_matching_status() {
        let mut c = controller(1000, 100);
        c.mount(0);
        let change = c.report_outcome(Outcome::Won, 10).unwrap();
        assert_eq!(change.status, RoundStatus::Won);
        assert_eq!(c.streak(), 1);
        // A second report during the result display is rejected.
        assert!(c.report_outcome(Outcome::Lost, 20).is_err());
        assert_eq!(c.status(), RoundStatus::Won);

        c.tick(110);
        assert_eq!(c.status(), RoundStatus::Running);
        let change = c.report_outcome(Outcome::Lost, 120).unwrap();
        assert_eq!(change.status, RoundStatus::Lost);
        assert_eq!(c.streak(), 0);
    }

    #[test]
    fn test_outcome_only_from_finished_statuses() {
        assert_eq!(Outcome::try_from(RoundStatus::Won), Ok(Outcome::Won));
        assert_eq!(Outcome::try_from(RoundStatus::Lost), Ok(Outcome::Lost));
        for status in [RoundStatus::Idle, RoundStatus::Running, RoundStatus::Reset] {
            assert_eq!(Outcome::try_from(status), Err(status));
        }
        assert_eq!(Verdict::Continue.outcome(), None);
        assert_eq!(Verdict::Lost.outcome().map(Outcome::status), Some(RoundStatus::Lost));
    }

    #[test]
    fn test_grid_cursor_clamps() {
        let mut cursor = GridCursor::new(2, 3);
        assert!(cursor.apply(PuzzleInput::Left));
        assert_eq!(cursor.index(), 0);
        cursor.apply(PuzzleInput::Right);
        cursor.apply(PuzzleInput::Right);
        cursor.apply(PuzzleInput::Right);
        assert_eq!(cursor.index(), 2);
        cursor.apply(PuzzleInput::Down);
        cursor.apply(PuzzleInput::Down);
        assert_eq!(cursor.index(), 5);
        cursor.apply(PuzzleInput::Up);
        assert_eq!(cursor.index(), 2);
        assert!(!cursor.apply(PuzzleInput::Activate));
    }
}
