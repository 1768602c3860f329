//! One arcade session: a game controller, its analytics, and what the view needs.

use tracing::{info, warn};

use crate::analytics::{AnalyticsSink, RoundRecorder};
use crate::core::{create, Frame, GameController, GameSettings, Minigame, RoundConfig};
use crate::term::Hud;
use crate::types::{GameKind, InputMode, PuzzleInput, RoundStatus};

pub struct Session {
    controller: GameController<Box<dyn Minigame>>,
    recorder: RoundRecorder,
    sink: Option<Box<dyn AnalyticsSink>>,
}

impl Session {
    pub fn new(game: GameKind, settings: &GameSettings, round: RoundConfig, seed: u32) -> Self {
        Self {
            controller: GameController::new(create(game, settings), round, seed),
            recorder: RoundRecorder::new(),
            sink: None,
        }
    }

    /// Send round records to `sink`.
    pub fn with_sink(mut self, sink: Box<dyn AnalyticsSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn controller(&self) -> &GameController<Box<dyn Minigame>> {
        &self.controller
    }

    pub fn input_mode(&self) -> InputMode {
        self.controller.game().input_mode()
    }

    /// Start the first round.
    pub fn mount(&mut self, now_ms: u64) {
        self.controller.mount(now_ms);
        self.drain_events();
    }

    pub fn handle_input(&mut self, input: PuzzleInput, now_ms: u64) {
        self.controller.handle_input(input, now_ms);
        self.drain_events();
    }

    pub fn tick(&mut self, now_ms: u64) {
        self.controller.tick(now_ms);
        self.drain_events();
    }

    pub fn frame(&self) -> Frame {
        self.controller.game().frame()
    }

    pub fn hud(&self) -> Hud {
        Hud {
            game: self.controller.game().kind(),
            status: self.controller.status(),
            streak: self.controller.streak(),
            score: self.controller.game().score(),
            progress: self.controller.progress(),
            mode: self.input_mode(),
        }
    }

    /// Flush the analytics sink (end of session).
    pub fn finish(&mut self) {
        if let Some(sink) = self.sink.as_mut() {
            if let Err(err) = sink.flush() {
                warn!(%err, "analytics flush failed");
            }
        }
    }

    fn drain_events(&mut self) {
        for event in self.controller.take_events() {
            if event.change.status.is_terminal() {
                info!(
                    game = event.game.as_str(),
                    status = event.change.status.as_str(),
                    streak = event.change.streak,
                    score = event.score,
                    "round over"
                );
            }
            let Some(record) = self.recorder.observe(event.game, &event.change, event.score) else {
                continue;
            };
            let Some(sink) = self.sink.as_mut() else {
                continue;
            };
            if let Err(err) = sink.record(&record) {
                // Analytics is best-effort; keep playing without it.
                warn!(%err, "analytics disabled");
                self.sink = None;
            }
        }
    }

    /// Whether the countdown is moving (the screen changes every tick).
    pub fn is_animating(&self) -> bool {
        self.controller.status() == RoundStatus::Running
    }
}
