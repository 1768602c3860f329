//! Timing lock: an indicator sweeps a track; set each pin while it is inside the window.
//!
//! The indicator position is a triangle wave over absolute time since the round
//! started, so like the countdown it cannot drift with irregular ticks.

use crate::config::LockConfig;
use crate::game::{Frame, FrameBody, Minigame, Verdict};
use crate::rng::SimpleRng;
use crate::types::{GameKind, PuzzleInput};

#[derive(Debug, Clone)]
pub struct TimingLock {
    config: LockConfig,
    started_ms: u64,
    now_ms: u64,
    pins_set: u8,
    window_start: u8,
    /// Seeded from the controller's rng each round; rolls the next pin's window.
    rng: SimpleRng,
}

impl TimingLock {
    pub fn new(config: LockConfig) -> Self {
        Self {
            config,
            started_ms: 0,
            now_ms: 0,
            pins_set: 0,
            window_start: 0,
            rng: SimpleRng::default(),
        }
    }

    pub fn pins_set(&self) -> u8 {
        self.pins_set
    }

    /// Inclusive-exclusive range of track positions that count as a hit
    pub fn window(&self) -> std::ops::Range<u8> {
        self.window_start..self.window_start + self.config.window()
    }

    /// Pin the window somewhere specific (fixtures).
    pub fn set_window_start(&mut self, start: u8) {
        let max_start = self.config.track_len() - self.config.window();
        self.window_start = start.min(max_start);
    }

    /// Indicator position on the track at `now_ms`
    pub fn position(&self, now_ms: u64) -> u8 {
        let sweep = self.config.sweep_ms() as u64;
        let last = (self.config.track_len() - 1) as u64;
        let t = now_ms.saturating_sub(self.started_ms) % (2 * sweep);
        // Forward on the first half of the period, back on the second.
        let travelled = if t < sweep { t } else { 2 * sweep - t };
        ((travelled * last + sweep / 2) / sweep) as u8
    }

    /// Try to set the current pin at `now_ms`.
    pub fn press(&mut self, now_ms: u64) -> Verdict {
        self.now_ms = now_ms;
        if !self.window().contains(&self.position(now_ms)) {
            return Verdict::Lost;
        }
        self.pins_set += 1;
        if self.pins_set == self.config.pins() {
            return Verdict::Won;
        }
        self.roll_window();
        Verdict::Continue
    }

    fn roll_window(&mut self) {
        let positions = (self.config.track_len() - self.config.window()) as u32 + 1;
        self.window_start = self.rng.next_range(positions) as u8;
    }
}

impl Minigame for TimingLock {
    fn kind(&self) -> GameKind {
        GameKind::Lock
    }

    fn new_round(&mut self, rng: &mut SimpleRng, now_ms: u64) {
        self.started_ms = now_ms;
        self.now_ms = now_ms;
        self.pins_set = 0;
        self.rng = SimpleRng::new(rng.next_u32());
        self.roll_window();
    }

    fn handle_input(&mut self, input: PuzzleInput, now_ms: u64) -> Verdict {
        match input {
            PuzzleInput::Activate => self.press(now_ms),
            _ => Verdict::Continue,
        }
    }

    fn tick(&mut self, now_ms: u64) -> Verdict {
        self.now_ms = now_ms;
        Verdict::Continue
    }

    fn score(&self) -> u32 {
        self.pins_set as u32
    }

    fn frame(&self) -> Frame {
        let position = self.position(self.now_ms);
        let window = self.window();
        let track: String = (0..self.config.track_len())
            .map(|i| match (i == position, window.contains(&i)) {
                (true, _) => '|',
                (false, true) => '=',
                (false, false) => '-',
            })
            .collect();
        let pins: String = (0..self.config.pins())
            .map(|i| if i < self.pins_set { '#' } else { 'o' })
            .collect();
        Frame {
            caption: format!("Pins {}/{}", self.pins_set, self.config.pins()),
            body: FrameBody::Text {
                lines: vec![track, pins],
            },
        }
    }
}
