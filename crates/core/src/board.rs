//! Board module - the tile grid and its physics
//!
//! The board is a `rows x columns` grid where each cell is empty or holds a colored tile.
//! Uses a flat vector for cache locality; index `i` maps to `row = i / columns`,
//! `col = i % columns`. Row 0 is the top row, so gravity pulls tiles toward higher rows.
//!
//! The engine operations are deterministic and touch nothing but the board:
//!
//! - [`Board::find_cluster`]: 4-connected same-color region around a cell
//! - [`Board::apply_gravity`]: per-column downward compaction
//! - [`Board::apply_lateral_compaction`]: shift non-empty columns left over empty ones

use arrayvec::ArrayVec;

use crate::rng::SimpleRng;
use crate::types::{Cell, Color};

/// The tile board - flat row-major storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: u8,
    columns: u8,
    /// Flat array of cells, row-major order (row * columns + col)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(rows: u8, columns: u8) -> Self {
        Self {
            rows,
            columns,
            cells: vec![None; rows as usize * columns as usize],
        }
    }

    /// Create a board with every cell filled from the first `palette_size` colors.
    pub fn random(rows: u8, columns: u8, palette_size: u8, rng: &mut SimpleRng) -> Self {
        let palette = palette_size.clamp(1, Color::PALETTE.len() as u8) as u32;
        let cells = (0..rows as usize * columns as usize)
            .map(|_| Color::from_index(rng.next_range(palette) as usize))
            .collect();
        Self {
            rows,
            columns,
            cells,
        }
    }

    /// Build a board from text rows, top row first.
    ///
    /// Each character is a color letter (see [`Color::from_char`]) or `.` for empty.
    /// Returns `None` when rows are ragged, empty, too large, or contain unknown characters.
    ///
    /// ```
    /// use puzzle_arcade_core::Board;
    ///
    /// let board = Board::parse(&["RRB", "R.B", "GGG"]).unwrap();
    /// assert_eq!(board.rows(), 3);
    /// assert_eq!(board.columns(), 3);
    /// assert_eq!(board.find_cluster(0), vec![0, 1, 3]);
    /// ```
    pub fn parse(rows: &[&str]) -> Option<Self> {
        let columns = rows.first()?.chars().count();
        if columns == 0 || columns > u8::MAX as usize || rows.len() > u8::MAX as usize {
            return None;
        }
        let mut cells = Vec::with_capacity(rows.len() * columns);
        for row in rows {
            if row.chars().count() != columns {
                return None;
            }
            for ch in row.chars() {
                match ch {
                    '.' => cells.push(None),
                    other => cells.push(Some(Color::from_char(other)?)),
                }
            }
        }
        Some(Self {
            rows: rows.len() as u8,
            columns: columns as u8,
            cells,
        })
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn columns(&self) -> u8 {
        self.columns
    }

    /// Number of cells (`rows * columns`)
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Calculate flat index from (row, col)
    #[inline(always)]
    pub fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.rows as usize || col >= self.columns as usize {
            return None;
        }
        Some(row * self.columns as usize + col)
    }

    /// Split a flat index into (row, col)
    #[inline(always)]
    pub fn coords(&self, index: usize) -> Option<(usize, usize)> {
        if index >= self.cells.len() {
            return None;
        }
        let columns = self.columns as usize;
        Some((index / columns, index % columns))
    }

    /// Get cell at index; `None` if out of bounds
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Set cell at index; returns false if out of bounds
    pub fn set(&mut self, index: usize, cell: Cell) -> bool {
        match self.cells.get_mut(index) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Orthogonal neighbours of `index`; never wraps across row or column edges.
    #[inline]
    fn neighbours(&self, index: usize) -> ArrayVec<usize, 4> {
        let mut out = ArrayVec::new();
        let columns = self.columns as usize;
        let (row, col) = (index / columns, index % columns);
        if row > 0 {
            out.push(index - columns);
        }
        if row + 1 < self.rows as usize {
            out.push(index + columns);
        }
        if col > 0 {
            out.push(index - 1);
        }
        if col + 1 < columns {
            out.push(index + 1);
        }
        out
    }

    /// Find the maximal 4-connected region sharing the color at `start`.
    ///
    /// Returns the region's indices in ascending order. A lone tile yields a single
    /// index; an empty or out-of-range start yields an empty vector. Deciding that a
    /// single tile is not removable is up to the caller.
    ///
    /// Traversal uses an explicit stack, so board size never bounds recursion depth.
    pub fn find_cluster(&self, start: usize) -> Vec<usize> {
        let Some(Some(color)) = self.get(start) else {
            return Vec::new();
        };

        let mut seen = vec![false; self.cells.len()];
        let mut stack = vec![start];
        let mut cluster = Vec::new();
        seen[start] = true;

        while let Some(index) = stack.pop() {
            cluster.push(index);
            for next in self.neighbours(index) {
                if !seen[next] && self.cells[next] == Some(color) {
                    seen[next] = true;
                    stack.push(next);
                }
            }
        }

        cluster.sort_unstable();
        cluster
    }

    /// Empty every listed cell; out-of-range indices are skipped.
    /// Returns how many tiles were removed.
    pub fn clear_cells(&mut self, indices: &[usize]) -> usize {
        let mut removed = 0;
        for &index in indices {
            if let Some(slot) = self.cells.get_mut(index) {
                if slot.take().is_some() {
                    removed += 1;
                }
            }
        }
        removed
    }

    /// Compact each column downward, keeping the tiles' top-to-bottom order.
    ///
    /// Two-pointer scan from the bottom of every column; tiles never change column.
    pub fn apply_gravity(&mut self) {
        let columns = self.columns as usize;
        let rows = self.rows as usize;

        for col in 0..columns {
            let mut write_row = rows;
            for read_row in (0..rows).rev() {
                let read = read_row * columns + col;
                if self.cells[read].is_some() {
                    write_row -= 1;
                    if write_row != read_row {
                        let write = write_row * columns + col;
                        self.cells[write] = self.cells[read].take();
                    }
                }
            }
        }
    }

    /// Close gaps left by fully empty columns by sliding later columns left.
    ///
    /// Scans left to right counting empty columns; each non-empty column moves left by
    /// the number of empty columns seen so far, leaving its source column empty.
    pub fn apply_lateral_compaction(&mut self) {
        let columns = self.columns as usize;
        let rows = self.rows as usize;
        let mut shift = 0;

        for col in 0..columns {
            if self.is_column_empty(col) {
                shift += 1;
                continue;
            }
            if shift == 0 {
                continue;
            }
            let target = col - shift;
            for row in 0..rows {
                let from = row * columns + col;
                self.cells[row * columns + target] = self.cells[from].take();
            }
        }
    }

    /// Check whether every cell of a column is empty
    pub fn is_column_empty(&self, col: usize) -> bool {
        if col >= self.columns as usize {
            return true;
        }
        let columns = self.columns as usize;
        (0..self.rows as usize).all(|row| self.cells[row * columns + col].is_none())
    }

    /// Whether no tiles remain
    pub fn is_cleared(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_none())
    }

    /// Count of remaining tiles per palette color (indexed by [`Color::index`])
    pub fn color_counts(&self) -> [usize; Color::PALETTE.len()] {
        let mut counts = [0; Color::PALETTE.len()];
        for color in self.cells.iter().flatten() {
            counts[color.index()] += 1;
        }
        counts
    }

    /// First color (palette order) with exactly one tile left on the board.
    ///
    /// A color with zero tiles or with two or more tiles is fine; a single tile can
    /// never join a cluster, so the board is unsolvable.
    pub fn stranded_color(&self) -> Option<Color> {
        self.color_counts()
            .iter()
            .position(|&count| count == 1)
            .and_then(Color::from_index)
    }

    /// Whether any tile touches a tile of its own color, i.e. some activation
    /// would clear a cluster.
    pub fn has_move(&self) -> bool {
        self.cells.iter().enumerate().any(|(index, cell)| {
            cell.is_some()
                && self
                    .neighbours(index)
                    .iter()
                    .any(|&next| self.cells[next] == *cell)
        })
    }

    /// Number of tiles still on the board
    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Render rows as text (same alphabet as [`Board::parse`])
    pub fn to_rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.columns.max(1) as usize)
            .map(|row| {
                row.iter()
                    .map(|cell| cell.map_or('.', |color| color.as_char()))
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: &[&str]) -> Board {
        Board::parse(rows).expect("valid fixture")
    }

    #[test]
    fn test_index_and_coords() {
        let b = Board::new(3, 4);
        assert_eq!(b.index(0, 0), Some(0));
        assert_eq!(b.index(0, 3), Some(3));
        assert_eq!(b.index(1, 0), Some(4));
        assert_eq!(b.index(2, 3), Some(11));
        assert_eq!(b.index(3, 0), None);
        assert_eq!(b.index(0, 4), None);
        assert_eq!(b.coords(5), Some((1, 1)));
        assert_eq!(b.coords(12), None);
    }

    #[test]
    fn test_neighbours_do_not_wrap() {
        let b = Board::new(3, 3);
        let mut right_edge = b.neighbours(2).to_vec();
        right_edge.sort_unstable();
        // index 3 is the start of the next row, not a neighbour of 2.
        assert_eq!(right_edge, vec![1, 5]);

        let mut centre = b.neighbours(4).to_vec();
        centre.sort_unstable();
        assert_eq!(centre, vec![1, 3, 5, 7]);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(Board::parse(&[]).is_none());
        assert!(Board::parse(&["RR", "R"]).is_none());
        assert!(Board::parse(&["RX"]).is_none());
        assert!(Board::parse(&[""]).is_none());
    }

    #[test]
    fn test_find_cluster_basic() {
        let b = board(&["RRB", "R.B", "GGG"]);
        assert_eq!(b.find_cluster(0), vec![0, 1, 3]);
        assert_eq!(b.find_cluster(2), vec![2, 5]);
        assert_eq!(b.find_cluster(7), vec![6, 7, 8]);
    }

    #[test]
    fn test_find_cluster_single_and_empty() {
        let b = board(&["RB", ".R"]);
        assert_eq!(b.find_cluster(0), vec![0]);
        assert!(b.find_cluster(2).is_empty());
        assert!(b.find_cluster(99).is_empty());
    }

    #[test]
    fn test_find_cluster_does_not_cross_row_edge() {
        // R at end of row 0 and start of row 1 are adjacent in memory only.
        let b = board(&["BBR", "RBB"]);
        assert_eq!(b.find_cluster(2), vec![2]);
        assert_eq!(b.find_cluster(3), vec![3]);
    }

    #[test]
    fn test_gravity_compacts_columns() {
        let mut b = board(&["R.G", ".B.", "..."]);
        b.apply_gravity();
        assert_eq!(b.to_rows(), vec!["...", "...", "RBG"]);
    }

    #[test]
    fn test_gravity_preserves_order() {
        let mut b = board(&["R", ".", "G", ".", "B"]);
        b.apply_gravity();
        assert_eq!(b.to_rows(), vec![".", ".", "R", "G", "B"]);
    }

    #[test]
    fn test_lateral_compaction() {
        let mut b = board(&["...R", ".G.B"]);
        b.apply_lateral_compaction();
        assert_eq!(b.to_rows(), vec![".R..", "GB.."]);
    }

    #[test]
    fn test_lateral_compaction_no_gaps_is_noop() {
        let mut b = board(&["RG..", "RGB."]);
        let before = b.clone();
        b.apply_lateral_compaction();
        assert_eq!(b, before);
    }

    #[test]
    fn test_clear_cells_counts_tiles() {
        let mut b = board(&["RR.", "GGG"]);
        assert_eq!(b.clear_cells(&[0, 1, 2, 50]), 2);
        assert_eq!(b.to_rows(), vec!["...", "GGG"]);
    }

    #[test]
    fn test_stranded_color() {
        assert_eq!(board(&["RRG", "GG."]).stranded_color(), None);
        assert_eq!(board(&["RRB", "GG."]).stranded_color(), Some(Color::Blue));
        // Red and Blue both stranded: palette order picks Red.
        assert_eq!(board(&["RB.", "GG."]).stranded_color(), Some(Color::Red));
        assert_eq!(board(&["...", "..."]).stranded_color(), None);
    }

    #[test]
    fn test_has_move() {
        assert!(!board(&["RG", "GR"]).has_move());
        assert!(board(&["RG", "RB"]).has_move());
        assert!(board(&["..", ".R", ".R"]).has_move());
        // Same color but not adjacent.
        assert!(!board(&["R.R"]).has_move());
        assert!(!board(&["..", ".."]).has_move());
    }

    #[test]
    fn test_random_respects_palette() {
        let mut rng = SimpleRng::new(42);
        let b = Board::random(6, 6, 2, &mut rng);
        assert_eq!(b.len(), 36);
        assert!(b
            .cells()
            .iter()
            .all(|c| matches!(c, Some(Color::Red) | Some(Color::Green))));
    }
}
