//! The bundled minigames.
//!
//! | Kind | Type | Input | Win | Loss (besides the countdown) |
//! |------|------|-------|-----|------------------------------|
//! | tiles | [`TileGame`] | grid | board empty | a color down to one tile |
//! | memory | [`MemoryGame`] | grid | every pattern cell picked | a wrong pick |
//! | code | [`CodeBreaker`] | text | exact guess | out of attempts |
//! | typing | [`TypingRace`] | text | phrase typed | mistake limit |
//! | lock | [`TimingLock`] | activate | every pin set | press outside the window |

mod code;
mod lock;
mod memory;
mod tiles;
mod typing;

pub use code::{grade, CodeBreaker, Guess};
pub use lock::TimingLock;
pub use memory::MemoryGame;
pub use tiles::{take_turn, TileGame, Turn};
pub use typing::TypingRace;

use crate::config::{CodeConfig, LockConfig, MemoryConfig, TileConfig, TypingConfig};
use crate::game::Minigame;
use crate::types::GameKind;

/// Per-game settings, one slot per minigame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameSettings {
    pub tiles: TileConfig,
    pub memory: MemoryConfig,
    pub code: CodeConfig,
    pub typing: TypingConfig,
    pub lock: LockConfig,
}

/// Build the minigame for `kind`.
pub fn create(kind: GameKind, settings: &GameSettings) -> Box<dyn Minigame> {
    match kind {
        GameKind::Tiles => Box::new(TileGame::new(settings.tiles)),
        GameKind::Memory => Box::new(MemoryGame::new(settings.memory)),
        GameKind::Code => Box::new(CodeBreaker::new(settings.code)),
        GameKind::Typing => Box::new(TypingRace::new(settings.typing)),
        GameKind::Lock => Box::new(TimingLock::new(settings.lock)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_matches_kind() {
        let settings = GameSettings::default();
        for kind in GameKind::ALL {
            assert_eq!(create(kind, &settings).kind(), kind);
        }
    }
}
