//! Round lifecycle - status, streak and countdown shared by every minigame.
//!
//! ```text
//!   Idle --Start--> Running --Win----------> Won   --Settle--> Idle
//!                           --Lose/Expire--> Lost  --Settle--> Idle
//!                           --Reset------> Reset --Settle--> Idle
//!   Won | Lost --Reset--> Reset
//! ```
//!
//! Transitions are checked against [`transition`]; anything else is rejected with a
//! [`TransitionError`] and leaves the round untouched. Every accepted transition
//! updates the streak, then notifies each registered listener once, synchronously.
//!
//! Streak: +1 on entering Won, 0 on entering Lost or Reset, unchanged otherwise.
//! The countdown runs only while Running; entering Running starts it and leaving
//! Running cancels it through the round's own [`TimerHandle`].

use thiserror::Error;
use tracing::{debug, warn};

use crate::config::RoundConfig;
use crate::countdown::{Countdown, CountdownTick, TimerHandle};
use crate::types::{RoundStatus, RoundTrigger, StatusChange};

/// A trigger that is not valid from the round's current status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid round transition: {} from {}", trigger.as_str(), from.as_str())]
pub struct TransitionError {
    pub from: RoundStatus,
    pub trigger: RoundTrigger,
}

/// Transition table. `None` means the pair is not allowed.
pub fn transition(from: RoundStatus, trigger: RoundTrigger) -> Option<RoundStatus> {
    use RoundStatus as S;
    use RoundTrigger as T;

    match (from, trigger) {
        (S::Idle, T::Start) => Some(S::Running),
        (S::Running, T::Win) => Some(S::Won),
        (S::Running, T::Lose) | (S::Running, T::Expire) => Some(S::Lost),
        (S::Running | S::Won | S::Lost, T::Reset) => Some(S::Reset),
        (S::Won | S::Lost | S::Reset, T::Settle) => Some(S::Idle),
        _ => None,
    }
}

/// Streak after entering `status`
pub fn next_streak(streak: u32, status: RoundStatus) -> u32 {
    match status {
        RoundStatus::Won => streak.saturating_add(1),
        RoundStatus::Lost | RoundStatus::Reset => 0,
        RoundStatus::Idle | RoundStatus::Running => streak,
    }
}

pub type StatusListener = Box<dyn FnMut(&StatusChange)>;

pub struct Round {
    status: RoundStatus,
    streak: u32,
    countdown: Countdown,
    timer: Option<TimerHandle>,
    started_at_ms: Option<u64>,
    listeners: Vec<StatusListener>,
}

impl Round {
    /// Create an Idle round with a stopped countdown.
    pub fn new(config: &RoundConfig) -> Self {
        Self {
            status: RoundStatus::Idle,
            streak: 0,
            countdown: Countdown::new(config),
            timer: None,
            started_at_ms: None,
            listeners: Vec::new(),
        }
    }

    /// Create a round and immediately start it (auto-start on mount).
    pub fn mounted(config: &RoundConfig, now_ms: u64) -> Self {
        let mut round = Self::new(config);
        // Idle -> Running is always valid on a fresh round.
        let _ = round.fire(RoundTrigger::Start, now_ms);
        round
    }

    pub fn status(&self) -> RoundStatus {
        self.status
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Countdown progress in [0, 1] as of the last tick
    pub fn progress(&self) -> f64 {
        self.countdown.progress()
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    /// When the current (or last) round started, in host milliseconds
    pub fn started_at_ms(&self) -> Option<u64> {
        self.started_at_ms
    }

    /// Register a side effect run on every accepted transition.
    pub fn on_status_change(&mut self, listener: impl FnMut(&StatusChange) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Idle -> Running
    pub fn start(&mut self, now_ms: u64) -> Result<StatusChange, TransitionError> {
        self.fire(RoundTrigger::Start, now_ms)
    }

    /// Running | Won | Lost -> Reset
    pub fn reset(&mut self, now_ms: u64) -> Result<StatusChange, TransitionError> {
        self.fire(RoundTrigger::Reset, now_ms)
    }

    /// Won | Lost | Reset -> Idle
    pub fn settle(&mut self, now_ms: u64) -> Result<StatusChange, TransitionError> {
        self.fire(RoundTrigger::Settle, now_ms)
    }

    /// Report a status the way a game controller sees it.
    ///
    /// `Won` and `Lost` end a running round, `Reset` abandons it, `Running` starts one
    /// from Idle and `Idle` settles a finished one.
    pub fn report_status(
        &mut self,
        status: RoundStatus,
        now_ms: u64,
    ) -> Result<StatusChange, TransitionError> {
        let trigger = match status {
            RoundStatus::Idle => RoundTrigger::Settle,
            RoundStatus::Running => RoundTrigger::Start,
            RoundStatus::Won => RoundTrigger::Win,
            RoundStatus::Lost => RoundTrigger::Lose,
            RoundStatus::Reset => RoundTrigger::Reset,
        };
        self.fire(trigger, now_ms)
    }

    /// Advance the countdown. Returns the forced Lost transition when time runs out.
    pub fn tick(&mut self, now_ms: u64) -> Option<StatusChange> {
        if self.status != RoundStatus::Running {
            return None;
        }
        match self.countdown.poll(now_ms) {
            CountdownTick::Completed => self.fire(RoundTrigger::Expire, now_ms).ok(),
            CountdownTick::Idle | CountdownTick::Progress(_) => None,
        }
    }

    /// Apply `trigger` if the transition table allows it.
    pub fn fire(
        &mut self,
        trigger: RoundTrigger,
        now_ms: u64,
    ) -> Result<StatusChange, TransitionError> {
        let from = self.status;
        let Some(to) = transition(from, trigger) else {
            warn!(
                from = from.as_str(),
                trigger = trigger.as_str(),
                "rejected round transition"
            );
            return Err(TransitionError { from, trigger });
        };

        if from == RoundStatus::Running {
            if let Some(handle) = self.timer.take() {
                self.countdown.cancel(handle);
            }
        }
        if to == RoundStatus::Running {
            self.timer = Some(self.countdown.start(now_ms));
            self.started_at_ms = Some(now_ms);
        }

        self.status = to;
        self.streak = next_streak(self.streak, to);

        let change = StatusChange {
            status: to,
            streak: self.streak,
            at_ms: now_ms,
        };
        debug!(
            from = from.as_str(),
            to = to.as_str(),
            streak = self.streak,
            at_ms = now_ms,
            "round transition"
        );
        for listener in &mut self.listeners {
            listener(&change);
        }
        Ok(change)
    }
}

impl std::fmt::Debug for Round {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Round")
            .field("status", &self.status)
            .field("streak", &self.streak)
            .field("countdown", &self.countdown)
            .field("started_at_ms", &self.started_at_ms)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
