//! Typing race: type a phrase exactly before the countdown runs out.

use crate::config::TypingConfig;
use crate::game::{Frame, FrameBody, Minigame, Verdict};
use crate::rng::SimpleRng;
use crate::types::{GameKind, InputMode, PuzzleInput};

const WORDS: &[&str] = &[
    "anchor", "binary", "cobalt", "delta", "ember", "fabric", "glacier", "harbor", "island",
    "jigsaw", "kernel", "lantern", "marble", "nebula", "orbit", "pixel", "quartz", "ripple",
    "signal", "timber", "umbra", "vector", "walnut", "xenon", "yonder", "zephyr", "beacon",
    "canyon", "domino", "falcon", "garnet", "hollow", "ivory", "jasper", "kettle", "lumen",
    "meadow", "nickel", "oxide", "pepper", "quiver", "rocket", "saddle", "tunnel", "velvet",
    "willow", "cipher", "socket", "thread", "buffer",
];

#[derive(Debug, Clone)]
pub struct TypingRace {
    config: TypingConfig,
    target: Vec<char>,
    typed: usize,
    mistakes: u8,
}

impl TypingRace {
    pub fn new(config: TypingConfig) -> Self {
        Self {
            config,
            target: Vec::new(),
            typed: 0,
            mistakes: 0,
        }
    }

    pub fn target(&self) -> String {
        self.target.iter().collect()
    }

    pub fn typed(&self) -> usize {
        self.typed
    }

    pub fn mistakes(&self) -> u8 {
        self.mistakes
    }

    /// Replace the phrase (fixtures, custom prompts).
    pub fn set_target(&mut self, phrase: &str) {
        self.target = phrase.chars().collect();
        self.typed = 0;
        self.mistakes = 0;
    }

    /// Accept `ch` if it is the next expected character; count a mistake otherwise.
    pub fn type_char(&mut self, ch: char) -> Verdict {
        let Some(&expected) = self.target.get(self.typed) else {
            return Verdict::Continue;
        };
        if ch == expected {
            self.typed += 1;
            if self.typed == self.target.len() {
                return Verdict::Won;
            }
            return Verdict::Continue;
        }

        self.mistakes = self.mistakes.saturating_add(1);
        if self.mistakes >= self.config.mistake_limit() {
            Verdict::Lost
        } else {
            Verdict::Continue
        }
    }
}

impl Minigame for TypingRace {
    fn kind(&self) -> GameKind {
        GameKind::Typing
    }

    fn new_round(&mut self, rng: &mut SimpleRng, _now_ms: u64) {
        let words: Vec<&str> = (0..self.config.words())
            .map(|_| WORDS[rng.next_index(WORDS.len())])
            .collect();
        self.set_target(&words.join(" "));
    }

    fn handle_input(&mut self, input: PuzzleInput, _now_ms: u64) -> Verdict {
        match input {
            PuzzleInput::Char(ch) => self.type_char(ch),
            _ => Verdict::Continue,
        }
    }

    fn score(&self) -> u32 {
        self.typed as u32
    }

    fn input_mode(&self) -> InputMode {
        InputMode::Text
    }

    fn frame(&self) -> Frame {
        let done: String = self.target[..self.typed].iter().collect();
        let rest: String = self.target[self.typed..].iter().collect();
        Frame {
            caption: format!(
                "Mistakes {}/{}",
                self.mistakes,
                self.config.mistake_limit()
            ),
            body: FrameBody::Text {
                lines: vec![self.target(), format!("{done}|{rest}")],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn race(phrase: &str, limit: u8) -> TypingRace {
        let mut r = TypingRace::new(TypingConfig::new(1, limit).unwrap());
        r.set_target(phrase);
        r
    }

    #[test]
    fn test_new_round_picks_words() {
        let mut r = TypingRace::new(TypingConfig::new(3, 2).unwrap());
        r.new_round(&mut SimpleRng::new(8), 0);
        let target = r.target();
        assert_eq!(target.split(' ').count(), 3);
        assert!(target.split(' ').all(|w| WORDS.contains(&w)));
    }

    #[test]
    fn test_typing_phrase_wins() {
        let mut r = race("ab c", 3);
        assert_eq!(r.type_char('a'), Verdict::Continue);
        assert_eq!(r.type_char('b'), Verdict::Continue);
        assert_eq!(r.type_char(' '), Verdict::Continue);
        assert_eq!(r.type_char('c'), Verdict::Won);
        assert_eq!(r.score(), 4);
    }

    #[test]
    fn test_mistakes_are_not_accepted() {
        let mut r = race("abc", 3);
        assert_eq!(r.type_char('x'), Verdict::Continue);
        assert_eq!(r.typed(), 0);
        assert_eq!(r.mistakes(), 1);
        assert_eq!(r.type_char('a'), Verdict::Continue);
        assert_eq!(r.typed(), 1);
    }

    #[test]
    fn test_mistake_limit_loses() {
        let mut r = race("abc", 2);
        assert_eq!(r.type_char('z'), Verdict::Continue);
        assert_eq!(r.type_char('z'), Verdict::Lost);
    }

    #[test]
    fn test_frame_marks_progress() {
        let mut r = race("hello", 3);
        r.type_char('h');
        r.type_char('e');
        match r.frame().body {
            FrameBody::Text { lines } => assert_eq!(lines[1], "he|llo"),
            FrameBody::Grid { .. } => panic!("typing draws text"),
        }
    }
}
