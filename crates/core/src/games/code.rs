//! Code breaking: guess a hidden digit code from exact/partial feedback.

use crate::config::CodeConfig;
use crate::game::{Frame, FrameBody, Minigame, Verdict};
use crate::rng::SimpleRng;
use crate::types::{GameKind, InputMode, PuzzleInput};

/// Feedback for one submitted guess
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guess {
    pub digits: Vec<u8>,
    /// Right digit, right position
    pub exact: u8,
    /// Right digit, wrong position
    pub partial: u8,
}

/// Score `guess` against `secret` (same length expected).
///
/// Partial matches are counted per digit value, so repeated digits are never
/// credited more often than they appear in the secret.
pub fn grade(secret: &[u8], guess: &[u8]) -> (u8, u8) {
    let mut exact = 0u8;
    let mut secret_left = [0u8; 10];
    let mut guess_left = [0u8; 10];

    for (&s, &g) in secret.iter().zip(guess) {
        if s == g {
            exact += 1;
        } else {
            secret_left[s as usize % 10] += 1;
            guess_left[g as usize % 10] += 1;
        }
    }
    let partial = secret_left
        .iter()
        .zip(guess_left.iter())
        .map(|(a, b)| (*a).min(*b))
        .sum();
    (exact, partial)
}

#[derive(Debug, Clone)]
pub struct CodeBreaker {
    config: CodeConfig,
    secret: Vec<u8>,
    entry: Vec<u8>,
    history: Vec<Guess>,
}

impl CodeBreaker {
    pub fn new(config: CodeConfig) -> Self {
        Self {
            config,
            secret: Vec::new(),
            entry: Vec::new(),
            history: Vec::new(),
        }
    }

    pub fn history(&self) -> &[Guess] {
        &self.history
    }

    pub fn entry(&self) -> &[u8] {
        &self.entry
    }

    pub fn attempts_left(&self) -> u8 {
        self.config
            .max_attempts()
            .saturating_sub(self.history.len() as u8)
    }

    #[cfg(test)]
    fn set_secret(&mut self, secret: &[u8]) {
        self.secret = secret.to_vec();
    }

    /// Submit the current entry. Incomplete entries are ignored.
    pub fn submit(&mut self) -> Verdict {
        if self.entry.len() != self.config.code_len() as usize {
            return Verdict::Continue;
        }
        let digits = std::mem::take(&mut self.entry);
        let (exact, partial) = grade(&self.secret, &digits);
        self.history.push(Guess {
            digits,
            exact,
            partial,
        });

        if exact == self.config.code_len() {
            Verdict::Won
        } else if self.attempts_left() == 0 {
            Verdict::Lost
        } else {
            Verdict::Continue
        }
    }

    fn digits_text(digits: &[u8]) -> String {
        digits.iter().map(|d| char::from(b'0' + d)).collect()
    }
}

impl Minigame for CodeBreaker {
    fn kind(&self) -> GameKind {
        GameKind::Code
    }

    fn new_round(&mut self, rng: &mut SimpleRng, _now_ms: u64) {
        let digits = self.config.digits() as u32;
        self.secret = (0..self.config.code_len())
            .map(|_| rng.next_range(digits) as u8)
            .collect();
        self.entry.clear();
        self.history.clear();
    }

    fn handle_input(&mut self, input: PuzzleInput, _now_ms: u64) -> Verdict {
        match input {
            PuzzleInput::Char(ch) => {
                let Some(digit) = ch.to_digit(10) else {
                    return Verdict::Continue;
                };
                if digit < self.config.digits() as u32
                    && self.entry.len() < self.config.code_len() as usize
                {
                    self.entry.push(digit as u8);
                }
                Verdict::Continue
            }
            PuzzleInput::Backspace => {
                self.entry.pop();
                Verdict::Continue
            }
            PuzzleInput::Activate => self.submit(),
            _ => Verdict::Continue,
        }
    }

    /// Attempts left when solved; 0 otherwise.
    fn score(&self) -> u32 {
        match self.history.last() {
            Some(last) if last.exact == self.config.code_len() => self.attempts_left() as u32,
            _ => 0,
        }
    }

    fn input_mode(&self) -> InputMode {
        InputMode::Text
    }

    fn frame(&self) -> Frame {
        let mut lines: Vec<String> = self
            .history
            .iter()
            .map(|g| {
                format!(
                    "{}  exact {}  partial {}",
                    Self::digits_text(&g.digits),
                    g.exact,
                    g.partial
                )
            })
            .collect();

        let mut entry = Self::digits_text(&self.entry);
        while entry.len() < self.config.code_len() as usize {
            entry.push('_');
        }
        lines.push(format!("> {entry}"));

        Frame {
            caption: format!(
                "Digits 0-{}, {} attempts left",
                self.config.digits() - 1,
                self.attempts_left()
            ),
            body: FrameBody::Text { lines },
        }
    }
}
