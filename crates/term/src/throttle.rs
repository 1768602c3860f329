//! Frame pacing: redraw on change, and at a bounded rate while nothing moves.

use std::hash::{Hash, Hasher};

#[derive(Debug, Clone)]
pub struct RenderThrottle {
    min_idle_interval_ms: u64,
    last_render_ms: u64,
    last_fingerprint: u64,
    has_rendered: bool,
}

impl RenderThrottle {
    pub fn new(min_idle_interval_ms: u64) -> Self {
        Self {
            min_idle_interval_ms,
            last_render_ms: 0,
            last_fingerprint: 0,
            has_rendered: false,
        }
    }

    /// Decide whether to draw a frame.
    ///
    /// - `animating=true` (countdown running): always draw.
    /// - otherwise draw when the fingerprint changes, else at most once per
    ///   `min_idle_interval_ms`.
    pub fn should_render(&mut self, now_ms: u64, fingerprint: u64, animating: bool) -> bool {
        let changed = !self.has_rendered || fingerprint != self.last_fingerprint;
        let stale = now_ms.saturating_sub(self.last_render_ms) >= self.min_idle_interval_ms;
        if !(animating || changed || stale) {
            return false;
        }
        self.has_rendered = true;
        self.last_render_ms = now_ms;
        self.last_fingerprint = fingerprint;
        true
    }
}

/// Stable-within-a-process hash of anything a frame is drawn from.
pub fn fingerprint(value: &impl Hash) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}
