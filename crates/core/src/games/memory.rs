//! Memory-pattern recall: a set of cells lights up, then the player picks them back.

use crate::config::MemoryConfig;
use crate::game::{Frame, FrameBody, GridCell, GridCursor, Minigame, Verdict};
use crate::rng::SimpleRng;
use crate::types::{GameKind, PuzzleInput};

#[derive(Debug, Clone)]
pub struct MemoryGame {
    config: MemoryConfig,
    /// Per-cell: part of the pattern?
    pattern: Vec<bool>,
    found: Vec<bool>,
    miss: Option<usize>,
    reveal_until_ms: u64,
    now_ms: u64,
    cursor: GridCursor,
}

impl MemoryGame {
    pub fn new(config: MemoryConfig) -> Self {
        let len = config.rows() as usize * config.columns() as usize;
        Self {
            config,
            pattern: vec![false; len],
            found: vec![false; len],
            miss: None,
            reveal_until_ms: 0,
            now_ms: 0,
            cursor: GridCursor::new(config.rows(), config.columns()),
        }
    }

    /// Whether the pattern is still on display at `now_ms`
    pub fn is_revealing(&self, now_ms: u64) -> bool {
        now_ms < self.reveal_until_ms
    }

    /// Indices of the pattern cells, ascending
    pub fn pattern(&self) -> Vec<usize> {
        self.pattern
            .iter()
            .enumerate()
            .filter_map(|(i, &p)| p.then_some(i))
            .collect()
    }

    pub fn found_count(&self) -> usize {
        self.found.iter().filter(|&&f| f).count()
    }

    /// Pick a cell. Wrong cells lose, the last missing pattern cell wins.
    pub fn pick(&mut self, index: usize, now_ms: u64) -> Verdict {
        if self.is_revealing(now_ms) || index >= self.pattern.len() {
            return Verdict::Continue;
        }
        if !self.pattern[index] {
            self.miss = Some(index);
            return Verdict::Lost;
        }
        self.found[index] = true;
        if self.found_count() == self.config.pattern_len() as usize {
            Verdict::Won
        } else {
            Verdict::Continue
        }
    }
}

impl Minigame for MemoryGame {
    fn kind(&self) -> GameKind {
        GameKind::Memory
    }

    fn new_round(&mut self, rng: &mut SimpleRng, now_ms: u64) {
        let len = self.pattern.len();
        self.pattern.fill(false);
        self.found.fill(false);
        for index in rng.sample_distinct(len, self.config.pattern_len() as usize) {
            self.pattern[index] = true;
        }
        self.miss = None;
        self.reveal_until_ms = now_ms + self.config.reveal_ms() as u64;
        self.now_ms = now_ms;
        self.cursor = GridCursor::new(self.config.rows(), self.config.columns());
    }

    fn handle_input(&mut self, input: PuzzleInput, now_ms: u64) -> Verdict {
        self.now_ms = now_ms;
        if self.cursor.apply(input) {
            return Verdict::Continue;
        }
        match input {
            PuzzleInput::Activate => self.pick(self.cursor.index(), now_ms),
            _ => Verdict::Continue,
        }
    }

    fn tick(&mut self, now_ms: u64) -> Verdict {
        self.now_ms = now_ms;
        Verdict::Continue
    }

    fn score(&self) -> u32 {
        self.found_count() as u32
    }

    fn frame(&self) -> Frame {
        let revealing = self.is_revealing(self.now_ms);
        let cells = (0..self.pattern.len())
            .map(|i| {
                if revealing {
                    if self.pattern[i] {
                        GridCell::Lit
                    } else {
                        GridCell::Hidden
                    }
                } else if self.miss == Some(i) {
                    GridCell::Miss
                } else if self.found[i] {
                    GridCell::Marked
                } else {
                    GridCell::Hidden
                }
            })
            .collect();
        let caption = if revealing {
            "Memorize the lit cells".to_string()
        } else {
            format!(
                "Found {}/{}",
                self.found_count(),
                self.config.pattern_len()
            )
        };
        Frame {
            caption,
            body: FrameBody::Grid {
                rows: self.config.rows(),
                columns: self.config.columns(),
                cells,
                cursor: (!revealing).then_some(self.cursor.index()),
            },
        }
    }
}
