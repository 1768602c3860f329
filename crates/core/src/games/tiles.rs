//! Tile-clearing puzzle: remove connected groups until the board is empty.
//!
//! A turn on cell `i`:
//! 1. find the cluster at `i`; a cluster of one tile (or an empty cell) is not a move
//! 2. empty every cell of the cluster
//! 3. gravity, then lateral compaction (empty columns only exist after settling)
//! 4. the board is won when empty and lost when some color has exactly one tile left

use tracing::{debug, trace};

use crate::board::Board;
use crate::config::TileConfig;
use crate::game::{Frame, FrameBody, GameController, GridCell, GridCursor, Minigame, Verdict};
use crate::rng::SimpleRng;
use crate::types::{Color, GameKind, PuzzleInput, RoundStatus};

/// Unplayable fresh boards are re-rolled at most this many times.
const MAX_FILL_ATTEMPTS: u32 = 64;

/// Result of one turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    /// Not a move (out of range, empty cell or a lone tile); board unchanged
    Rejected,
    /// Tiles were removed and play goes on
    Cleared(usize),
    /// Tiles were removed and the board is empty
    Won(usize),
    /// Tiles were removed and `Color` is down to a single, unclearable tile
    Lost(usize, Color),
}

/// Play one turn on `board` at `index`.
pub fn take_turn(board: &mut Board, index: usize) -> Turn {
    let cluster = board.find_cluster(index);
    if cluster.len() <= 1 {
        return Turn::Rejected;
    }

    let removed = board.clear_cells(&cluster);
    board.apply_gravity();
    board.apply_lateral_compaction();

    if board.is_cleared() {
        return Turn::Won(removed);
    }
    match board.stranded_color() {
        Some(color) => Turn::Lost(removed, color),
        None => Turn::Cleared(removed),
    }
}

#[derive(Debug, Clone)]
pub struct TileGame {
    config: TileConfig,
    board: Board,
    cursor: GridCursor,
    cleared: u32,
}

impl TileGame {
    pub fn new(config: TileConfig) -> Self {
        Self {
            config,
            board: Board::new(config.rows(), config.columns()),
            cursor: GridCursor::new(config.rows(), config.columns()),
            cleared: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Replace the board (fixtures, replays). Dimensions come from the board itself.
    pub fn set_board(&mut self, board: Board) {
        self.cursor = GridCursor::new(board.rows(), board.columns());
        self.board = board;
        self.cleared = 0;
    }

    pub fn cursor(&self) -> usize {
        self.cursor.index()
    }

    /// Activate a cell directly (pointer input). Out-of-range indices are no-ops.
    pub fn activate_cell(&mut self, index: usize) -> Verdict {
        let turn = take_turn(&mut self.board, index);
        trace!(index, ?turn, "tile turn");
        match turn {
            Turn::Rejected => Verdict::Continue,
            Turn::Cleared(n) => {
                self.cleared += n as u32;
                Verdict::Continue
            }
            Turn::Won(n) => {
                self.cleared += n as u32;
                Verdict::Won
            }
            Turn::Lost(n, _) => {
                self.cleared += n as u32;
                Verdict::Lost
            }
        }
    }

    /// A random board that has at least one legal move and no stranded color.
    ///
    /// Falls back to a single-color board (one cluster covering every cell) when
    /// no random fill qualifies; the config guarantees at least two cells.
    fn fresh_board(&self, rng: &mut SimpleRng) -> Board {
        let (rows, columns, palette) = (
            self.config.rows(),
            self.config.columns(),
            self.config.palette_size(),
        );
        for _ in 0..MAX_FILL_ATTEMPTS {
            let board = Board::random(rows, columns, palette, rng);
            if board.has_move() && board.stranded_color().is_none() {
                return board;
            }
        }
        debug!(rows, columns, palette, "no playable fill found, using one color");
        Board::random(rows, columns, 1, rng)
    }
}

impl Minigame for TileGame {
    fn kind(&self) -> GameKind {
        GameKind::Tiles
    }

    fn new_round(&mut self, rng: &mut SimpleRng, _now_ms: u64) {
        self.board = self.fresh_board(rng);
        self.cursor = GridCursor::new(self.config.rows(), self.config.columns());
        self.cleared = 0;
    }

    fn handle_input(&mut self, input: PuzzleInput, _now_ms: u64) -> Verdict {
        if self.cursor.apply(input) {
            return Verdict::Continue;
        }
        match input {
            PuzzleInput::Activate => self.activate_cell(self.cursor.index()),
            _ => Verdict::Continue,
        }
    }

    fn score(&self) -> u32 {
        self.cleared
    }

    fn frame(&self) -> Frame {
        let cells = self
            .board
            .cells()
            .iter()
            .map(|cell| cell.map_or(GridCell::Empty, GridCell::Tile))
            .collect();
        Frame {
            caption: format!("{} tiles left", self.board.tile_count()),
            body: FrameBody::Grid {
                rows: self.board.rows(),
                columns: self.board.columns(),
                cells,
                cursor: Some(self.cursor.index()),
            },
        }
    }
}

impl GameController<TileGame> {
    /// Pointer activation of a board cell. Ignored unless the round is running.
    pub fn handle_cell_activated(&mut self, index: usize, now_ms: u64) {
        if self.status() != RoundStatus::Running {
            return;
        }
        let verdict = self.game_mut().activate_cell(index);
        self.apply_verdict(verdict, now_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: &[&str]) -> Board {
        Board::parse(rows).unwrap()
    }

    #[test]
    fn test_turn_rejects_single_and_empty() {
        let mut b = board(&["RG", "GR"]);
        let before = b.clone();
        assert_eq!(take_turn(&mut b, 0), Turn::Rejected);
        assert_eq!(take_turn(&mut b, 10), Turn::Rejected);
        assert_eq!(b, before);

        let mut b = board(&["R.", "RR"]);
        assert_eq!(take_turn(&mut b, 1), Turn::Rejected);
    }

    #[test]
    fn test_turn_sequence_to_win() {
        let mut b = board(&["RRB", "R.B", "GGG"]);

        assert_eq!(take_turn(&mut b, 0), Turn::Cleared(3));
        assert_eq!(b.to_rows(), vec!["..B", "..B", "GGG"]);

        assert_eq!(take_turn(&mut b, 6), Turn::Cleared(3));
        assert_eq!(b.to_rows(), vec!["...", "B..", "B.."]);

        assert_eq!(take_turn(&mut b, 3), Turn::Won(2));
        assert!(b.is_cleared());
    }

    #[test]
    fn test_turn_detects_stranded_tile() {
        let mut b = board(&["RRB", "GGB", "GRG"]);
        // Clearing the top R pair leaves one R at the bottom.
        assert_eq!(take_turn(&mut b, 0), Turn::Lost(2, Color::Red));
    }

    #[test]
    fn test_turn_compacts_after_gravity() {
        let mut b = board(&["R.G", "R.G"]);
        assert_eq!(take_turn(&mut b, 0), Turn::Cleared(2));
        assert_eq!(b.to_rows(), vec!["G..", "G.."]);
    }

    #[test]
    fn test_new_round_fills_board() {
        let mut game = TileGame::new(TileConfig::new(5, 6, 3).unwrap());
        let mut rng = SimpleRng::new(9);
        game.new_round(&mut rng, 0);
        assert_eq!(game.board().tile_count(), 30);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_new_round_board_is_playable() {
        // 2x2 with two colors rolls RG/GR-style dead boards often.
        let mut game = TileGame::new(TileConfig::new(2, 2, 2).unwrap());
        for seed in 1..=500 {
            let mut rng = SimpleRng::new(seed);
            game.new_round(&mut rng, 0);
            let b = game.board();
            assert!(b.has_move(), "seed {} dealt {:?}", seed, b.to_rows());
            assert_eq!(b.stranded_color(), None, "seed {}", seed);
            assert_eq!(b.tile_count(), 4);
        }
    }

    #[test]
    fn test_new_round_two_cell_board_is_playable() {
        // Two cells, six colors: five fills in six are dead.
        let mut game = TileGame::new(TileConfig::new(1, 2, 6).unwrap());
        for seed in 1..=200 {
            let mut rng = SimpleRng::new(seed);
            game.new_round(&mut rng, 0);
            assert!(game.board().has_move(), "seed {}", seed);
            assert_eq!(take_turn(&mut game.board().clone(), 0), Turn::Won(2));
        }
    }

    #[test]
    fn test_input_moves_cursor_and_activates() {
        let mut game = TileGame::new(TileConfig::new(3, 3, 3).unwrap());
        game.set_board(board(&["RRB", "R.B", "GGG"]));

        assert_eq!(game.handle_input(PuzzleInput::Right, 0), Verdict::Continue);
        assert_eq!(game.cursor(), 1);
        assert_eq!(game.handle_input(PuzzleInput::Activate, 0), Verdict::Continue);
        assert_eq!(game.score(), 3);
    }

    #[test]
    fn test_activate_out_of_range_is_noop() {
        let mut game = TileGame::new(TileConfig::new(2, 2, 2).unwrap());
        game.set_board(board(&["RR", "GG"]));
        assert_eq!(game.activate_cell(4), Verdict::Continue);
        assert_eq!(game.board().tile_count(), 4);
    }

    #[test]
    fn test_controller_cell_activation() {
        use crate::config::RoundConfig;

        let mut c = GameController::new(
            TileGame::new(TileConfig::new(3, 3, 3).unwrap()),
            RoundConfig::new(1000).unwrap(),
            7,
        );
        // Not running yet.
        c.handle_cell_activated(0, 0);
        c.mount(0);
        c.game_mut().set_board(board(&["RR.", "GG.", "..."]));
        c.handle_cell_activated(0, 10);
        assert_eq!(c.status(), RoundStatus::Running);
        // The G pair fell to the bottom row.
        c.handle_cell_activated(6, 20);
        assert_eq!(c.status(), RoundStatus::Won);
        assert_eq!(c.streak(), 1);
    }

    #[test]
    fn test_frame_reports_tiles() {
        let mut game = TileGame::new(TileConfig::new(1, 2, 2).unwrap());
        game.set_board(board(&["R."]));
        let frame = game.frame();
        match frame.body {
            FrameBody::Grid { cells, cursor, .. } => {
                assert_eq!(cells, vec![GridCell::Tile(Color::Red), GridCell::Empty]);
                assert_eq!(cursor, Some(0));
            }
            FrameBody::Text { .. } => panic!("tile game draws a grid"),
        }
        assert_eq!(frame.caption, "1 tiles left");
    }
}
