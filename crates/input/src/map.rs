//! Key mapping from terminal events to puzzle input.

use crate::types::{InputMode, PuzzleInput};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map keyboard input to puzzle input for a game in `mode`.
///
/// In [`InputMode::Text`] printable keys are typed, so navigation letters and
/// `r` lose their meaning there; restart moves to Ctrl-R.
pub fn map_key(key: KeyEvent, mode: InputMode) -> Option<PuzzleInput> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Left => Some(PuzzleInput::Left),
        KeyCode::Right => Some(PuzzleInput::Right),
        KeyCode::Up => Some(PuzzleInput::Up),
        KeyCode::Down => Some(PuzzleInput::Down),
        KeyCode::Enter => Some(PuzzleInput::Activate),
        KeyCode::Backspace => Some(PuzzleInput::Backspace),

        KeyCode::Char('r') | KeyCode::Char('R') if ctrl => Some(PuzzleInput::Restart),
        KeyCode::Char(_) if ctrl => None,

        KeyCode::Char(ch) => match mode {
            InputMode::Text => Some(PuzzleInput::Char(ch)),
            InputMode::Navigate => map_navigate_char(ch),
        },

        _ => None,
    }
}

fn map_navigate_char(ch: char) -> Option<PuzzleInput> {
    match ch {
        'h' | 'H' | 'a' | 'A' => Some(PuzzleInput::Left),
        'l' | 'L' | 'd' | 'D' => Some(PuzzleInput::Right),
        'k' | 'K' | 'w' | 'W' => Some(PuzzleInput::Up),
        'j' | 'J' | 's' | 'S' => Some(PuzzleInput::Down),
        ' ' => Some(PuzzleInput::Activate),
        'r' | 'R' => Some(PuzzleInput::Restart),
        _ => None,
    }
}

/// Check if key should quit the arcade.
pub fn should_quit(key: KeyEvent, mode: InputMode) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        || (mode == InputMode::Navigate && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q')))
}
