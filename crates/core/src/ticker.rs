//! Interval ticker - a cancelable periodic schedule driven by the host clock.
//!
//! The ticker does not own a thread or a timer; the host calls [`IntervalTicker::poll`]
//! (or [`IntervalTicker::pump`]) from its event loop with the current time in
//! milliseconds and runs its callback when a tick is due. Missed ticks are coalesced
//! into one, so a host that stalls does not get a burst of callbacks afterwards.
//!
//! Stopping:
//! - [`IntervalTicker::cancel`] stops immediately and is safe to call repeatedly.
//! - [`IntervalTicker::pause`] is checked when the next tick is scheduled: a tick that
//!   is already due still fires once, then nothing is scheduled after it.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalTicker {
    delay_ms: u32,
    next_due_ms: Option<u64>,
    paused: bool,
}

impl IntervalTicker {
    /// Create an inactive ticker. A zero delay is treated as 1ms.
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms: delay_ms.max(1),
            next_due_ms: None,
            paused: false,
        }
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    /// Begin ticking; the first tick is due immediately at `now_ms`.
    ///
    /// Restarting an active ticker replaces its schedule.
    pub fn start(&mut self, now_ms: u64) {
        self.paused = false;
        self.next_due_ms = Some(now_ms);
    }

    /// Stop ticking. Idempotent.
    pub fn cancel(&mut self) {
        self.next_due_ms = None;
    }

    /// Request a stop at the next scheduling cycle.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn is_active(&self) -> bool {
        self.next_due_ms.is_some()
    }

    /// Milliseconds until the next tick (0 when overdue); `None` when inactive.
    pub fn due_in(&self, now_ms: u64) -> Option<u64> {
        self.next_due_ms.map(|due| due.saturating_sub(now_ms))
    }

    /// Returns true when a tick is due at `now_ms`, and schedules the following one.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        let Some(due) = self.next_due_ms else {
            return false;
        };
        if now_ms < due {
            return false;
        }

        self.next_due_ms = if self.paused {
            None
        } else {
            Some(now_ms + self.delay_ms as u64)
        };
        true
    }

    /// Invoke `callback` with `now_ms` if a tick is due. Returns whether it ran.
    pub fn pump(&mut self, now_ms: u64, mut callback: impl FnMut(u64)) -> bool {
        if self.poll(now_ms) {
            callback(now_ms);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_due_in() {
        let mut t = IntervalTicker::new(50);
        assert_eq!(t.due_in(0), None);
        t.start(100);
        assert_eq!(t.due_in(90), Some(10));
        assert!(t.poll(100));
        assert_eq!(t.due_in(120), Some(30));
        assert_eq!(t.due_in(400), Some(0));
    }

    #[test]
    fn test_inactive_until_started() {
        let mut t = IntervalTicker::new(100);
        assert!(!t.is_active());
        assert!(!t.poll(0));
        assert!(!t.poll(1000));
    }

    #[test]
    fn test_fires_at_delay() {
        let mut t = IntervalTicker::new(100);
        t.start(0);
        assert!(t.poll(0));
        assert!(!t.poll(50));
        assert!(!t.poll(99));
        assert!(t.poll(100));
        assert!(!t.poll(150));
        assert!(t.poll(200));
    }

    #[test]
    fn test_missed_ticks_coalesce() {
        let mut t = IntervalTicker::new(100);
        t.start(0);
        assert!(t.poll(0));
        assert!(t.poll(1000));
        assert!(!t.poll(1050));
        assert!(t.poll(1100));
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut t = IntervalTicker::new(10);
        t.start(0);
        t.cancel();
        t.cancel();
        assert!(!t.is_active());
        assert!(!t.poll(100));
    }

    #[test]
    fn test_pause_lets_due_tick_fire_once() {
        let mut t = IntervalTicker::new(100);
        t.start(0);
        assert!(t.poll(0));
        t.pause();
        // Already scheduled for t=100: it still fires, but nothing follows it.
        assert!(t.poll(100));
        assert!(!t.is_active());
        assert!(!t.poll(200));
    }

    #[test]
    fn test_pump_invokes_callback() {
        let mut t = IntervalTicker::new(50);
        let mut seen = Vec::new();
        t.start(10);
        for now in [10, 20, 60, 70, 110] {
            t.pump(now, |at| seen.push(at));
        }
        assert_eq!(seen, vec![10, 60, 110]);
    }

    #[test]
    fn test_zero_delay_clamped() {
        let t = IntervalTicker::new(0);
        assert_eq!(t.delay_ms(), 1);
    }
}
