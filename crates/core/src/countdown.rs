//! Countdown timer - round deadline expressed as a progress fraction.
//!
//! Progress is recomputed from absolute time on every tick:
//! `progress = clamp((now - start) / duration, 0, 1)`. Nothing is accumulated, so
//! irregular or sparse ticks never cause drift and the value never overshoots 1.
//!
//! Completion is reported exactly once, by the first tick at or after the deadline.
//! Each [`Countdown::start`] hands out a fresh [`TimerHandle`]; cancelling with a handle
//! from an earlier start is ignored, so a stale round cannot stop a newer timer.

use crate::config::RoundConfig;
use crate::ticker::IntervalTicker;

/// Identifies one started run of a [`Countdown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Stopped,
    Running,
    Completed,
}

/// Result of one countdown tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CountdownTick {
    /// Nothing happened (not running, or no tick due)
    Idle,
    /// Still running, with the recomputed progress
    Progress(f64),
    /// Deadline reached on this tick; reported once per start
    Completed,
}

#[derive(Debug, Clone)]
pub struct Countdown {
    duration_ms: u32,
    start_ms: u64,
    progress: f64,
    phase: Phase,
    generation: u32,
    ticker: IntervalTicker,
}

impl Countdown {
    /// Create a stopped countdown for one round's duration and tick interval.
    ///
    /// Both come from a validated [`RoundConfig`], so they are never zero.
    pub fn new(config: &RoundConfig) -> Self {
        Self {
            duration_ms: config.duration_ms(),
            start_ms: 0,
            progress: 0.0,
            phase: Phase::Stopped,
            generation: 0,
            ticker: IntervalTicker::new(config.tick_ms()),
        }
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    /// Fraction of the duration elapsed at the last tick, in [0, 1]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_completed(&self) -> bool {
        self.phase == Phase::Completed
    }

    /// Milliseconds since the last start (0 if never started)
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.start_ms)
    }

    /// Milliseconds left before the deadline
    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        (self.duration_ms as u64).saturating_sub(self.elapsed_ms(now_ms))
    }

    /// Start (or restart) the countdown at `now_ms`.
    ///
    /// Any previous run is cancelled first; its handle becomes stale.
    pub fn start(&mut self, now_ms: u64) -> TimerHandle {
        self.ticker.cancel();
        self.generation = self.generation.wrapping_add(1);
        self.start_ms = now_ms;
        self.progress = 0.0;
        self.phase = Phase::Running;
        self.ticker.start(now_ms);
        TimerHandle(self.generation)
    }

    /// Cancel the run identified by `handle`.
    ///
    /// Returns false for stale handles. Safe to call repeatedly; a cancelled run never
    /// reports completion.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        if handle.0 != self.generation {
            return false;
        }
        self.ticker.cancel();
        if self.phase == Phase::Running {
            self.phase = Phase::Stopped;
        }
        true
    }

    /// Recompute progress from absolute time.
    pub fn tick(&mut self, now_ms: u64) -> CountdownTick {
        if self.phase != Phase::Running {
            return CountdownTick::Idle;
        }

        let elapsed = self.elapsed_ms(now_ms) as f64;
        let progress = (elapsed / self.duration_ms as f64).clamp(0.0, 1.0);
        self.progress = progress;

        if progress >= 1.0 {
            self.progress = 1.0;
            self.phase = Phase::Completed;
            self.ticker.cancel();
            return CountdownTick::Completed;
        }
        CountdownTick::Progress(progress)
    }

    /// Tick only if the interval ticker says one is due.
    pub fn poll(&mut self, now_ms: u64) -> CountdownTick {
        if self.ticker.poll(now_ms) {
            self.tick(now_ms)
        } else {
            CountdownTick::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn countdown(duration_ms: u32, tick_ms: u32) -> Countdown {
        let config = RoundConfig::new(duration_ms)
            .unwrap()
            .with_tick_ms(tick_ms)
            .unwrap();
        Countdown::new(&config)
    }

    #[test]
    fn test_duration_and_tick_come_from_config() {
        let c = Countdown::new(&RoundConfig::new(1).unwrap());
        assert_eq!(c.duration_ms(), 1);

        let mut c = countdown(1000, 250);
        c.start(0);
        assert_eq!(c.poll(0), CountdownTick::Progress(0.0));
        assert_eq!(c.poll(249), CountdownTick::Idle);
        assert_eq!(c.poll(250), CountdownTick::Progress(0.25));
    }

    #[test]
    fn test_zero_duration_never_reaches_a_countdown() {
        assert!(RoundConfig::new(0).is_err());
        assert!(RoundConfig::new(100).unwrap().with_tick_ms(0).is_err());
    }

    #[test]
    fn test_new_is_stopped() {
        let c = countdown(1000, 16);
        assert!(!c.is_running());
        assert_eq!(c.progress(), 0.0);
    }

    #[test]
    fn test_progress_sequence() {
        let mut c = countdown(1000, 16);
        c.start(0);
        assert_eq!(c.tick(0), CountdownTick::Progress(0.0));
        assert_eq!(c.tick(400), CountdownTick::Progress(0.4));
        assert_eq!(c.tick(900), CountdownTick::Progress(0.9));
        assert_eq!(c.tick(1300), CountdownTick::Completed);
        assert_eq!(c.progress(), 1.0);
    }

    #[test]
    fn test_completion_reported_once() {
        let mut c = countdown(100, 16);
        c.start(0);
        assert_eq!(c.tick(100), CountdownTick::Completed);
        assert_eq!(c.tick(150), CountdownTick::Idle);
        assert_eq!(c.tick(5000), CountdownTick::Idle);
        assert_eq!(c.progress(), 1.0);
    }

    #[test]
    fn test_cancel_prevents_completion() {
        let mut c = countdown(100, 16);
        let handle = c.start(0);
        assert!(c.cancel(handle));
        assert!(c.cancel(handle));
        assert_eq!(c.tick(500), CountdownTick::Idle);
        assert!(!c.is_completed());
    }

    #[test]
    fn test_stale_handle_cannot_cancel_new_run() {
        let mut c = countdown(100, 16);
        let old = c.start(0);
        let _new = c.start(50);
        assert!(!c.cancel(old));
        assert!(c.is_running());
        assert_eq!(c.tick(150), CountdownTick::Completed);
    }

    #[test]
    fn test_restart_resets_progress() {
        let mut c = countdown(100, 16);
        c.start(0);
        c.tick(100);
        c.start(1000);
        assert_eq!(c.progress(), 0.0);
        assert_eq!(c.tick(1050), CountdownTick::Progress(0.5));
    }

    #[test]
    fn test_clock_before_start_clamps_to_zero() {
        let mut c = countdown(100, 16);
        c.start(500);
        assert_eq!(c.tick(400), CountdownTick::Progress(0.0));
    }

    #[test]
    fn test_poll_follows_ticker() {
        let mut c = countdown(1000, 250);
        c.start(0);
        assert_eq!(c.poll(0), CountdownTick::Progress(0.0));
        assert_eq!(c.poll(100), CountdownTick::Idle);
        assert_eq!(c.poll(250), CountdownTick::Progress(0.25));
        // Under-sampled: one late poll still lands on exactly 1.
        assert_eq!(c.poll(4000), CountdownTick::Completed);
        assert_eq!(c.poll(4250), CountdownTick::Idle);
    }

    #[test]
    fn test_remaining_ms() {
        let mut c = countdown(1000, 16);
        c.start(100);
        assert_eq!(c.remaining_ms(600), 500);
        assert_eq!(c.remaining_ms(5000), 0);
    }
}
