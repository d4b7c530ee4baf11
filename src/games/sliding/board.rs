//! Tile board operations for the sliding-merge game.
//!
//! The board owns the N x N grid of tiles and the compaction/merge pass.
//! Scoring, phases, and spawning policy live in the engine; the board
//! only knows how tiles slide and combine.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Direction, GameRng, Grid, Position};

/// Unique tile identifier.
///
/// Ids come from a monotonically increasing allocator that survives
/// `restart()`, so no id is ever reused across games on the same engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileId(pub u32);

impl TileId {
    /// Create a tile id.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw id value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}

/// A numbered tile on the board.
///
/// `value` is always a power of two >= 2. `just_merged` is set on the
/// tile a merge produced and holds for exactly one snapshot: the next
/// shift clears it, which is what prevents double-merging within a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub value: u32,
    pub position: Position,
    pub just_merged: bool,
    pub is_new: bool,
}

/// What a single compaction pass did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShiftReport {
    /// Whether any tile changed position or value.
    pub moved: bool,
    /// Sum of the merge values produced (each merged tile's new value).
    pub merge_score: u32,
    /// Number of merges performed.
    pub merges: u32,
    /// Highest tile value a merge produced, 0 if none.
    pub highest_merged: u32,
}

/// The N x N tile board.
#[derive(Clone, Debug)]
pub struct Board {
    grid: Grid<Option<Tile>>,
    next_id: u32,
}

impl Board {
    /// Create an empty board, allocating tile ids starting at `first_id`.
    #[must_use]
    pub fn new(size: usize, first_id: u32) -> Self {
        Self {
            grid: Grid::filled(size, size, None),
            next_id: first_id,
        }
    }

    /// Board side length.
    #[must_use]
    pub fn size(&self) -> usize {
        self.grid.width()
    }

    /// The next tile id the allocator would hand out.
    #[must_use]
    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    fn alloc_id(&mut self) -> TileId {
        let id = TileId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Tile at `pos`, if any.
    #[must_use]
    pub fn tile_at(&self, pos: Position) -> Option<Tile> {
        self.grid.get(pos).copied().flatten()
    }

    /// All tiles in row-major order.
    #[must_use]
    pub fn tiles(&self) -> Vec<Tile> {
        self.grid.iter().filter_map(|(_, cell)| *cell).collect()
    }

    /// Number of tiles on the board.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.grid.iter().filter(|(_, cell)| cell.is_some()).count()
    }

    /// Sum of all tile values.
    #[must_use]
    pub fn value_sum(&self) -> u32 {
        self.grid
            .iter()
            .filter_map(|(_, cell)| cell.map(|t| t.value))
            .sum()
    }

    /// All empty positions in row-major order.
    #[must_use]
    pub fn empty_positions(&self) -> Vec<Position> {
        self.grid
            .iter()
            .filter(|(_, cell)| cell.is_none())
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Clear the one-snapshot `just_merged` and `is_new` flags.
    ///
    /// Called at the start of each shift so the previous move's flags
    /// last exactly one snapshot.
    pub fn clear_turn_flags(&mut self) {
        let positions: Vec<Position> = self.grid.positions().collect();
        for pos in positions {
            if let Some(Some(tile)) = self.grid.get_mut(pos).map(|c| c.as_mut()) {
                tile.just_merged = false;
                tile.is_new = false;
            }
        }
    }

    /// Spawn one tile in a uniformly random empty cell: value 2 with
    /// probability `1 - four_chance`, value 4 otherwise.
    ///
    /// Returns `None` when the board is full.
    pub fn spawn(&mut self, rng: &mut GameRng, four_chance: f64) -> Option<Tile> {
        let empties = self.empty_positions();
        if empties.is_empty() {
            return None;
        }
        let position = empties[rng.gen_range_usize(0..empties.len())];
        let value = if rng.gen_bool(four_chance) { 4 } else { 2 };
        let tile = Tile {
            id: self.alloc_id(),
            value,
            position,
            just_merged: false,
            is_new: true,
        };
        self.grid.set(position, Some(tile));
        Some(tile)
    }

    /// Place a tile directly. Test and setup helper.
    pub fn place(&mut self, position: Position, value: u32) -> Tile {
        let tile = Tile {
            id: self.alloc_id(),
            value,
            position,
            just_merged: false,
            is_new: false,
        };
        self.grid.set(position, Some(tile));
        tile
    }

    /// Traversal order for a shift: positions farthest in the move
    /// direction come first, so no tile is processed twice and a tile
    /// produced by a merge can never merge again in the same pass.
    fn traversal(&self, direction: Direction) -> Vec<Position> {
        let size = self.size();
        let mut order: Vec<Position> = (0..size)
            .flat_map(|y| (0..size).map(move |x| Position::new(x, y)))
            .collect();
        match direction {
            Direction::Left => order.sort_by_key(|p| p.x),
            Direction::Right => order.sort_by_key(|p| std::cmp::Reverse(p.x)),
            Direction::Up => order.sort_by_key(|p| p.y),
            Direction::Down => order.sort_by_key(|p| std::cmp::Reverse(p.y)),
        }
        order
    }

    /// Compact every tile toward `direction`, merging equal neighbors.
    ///
    /// Each tile walks one step at a time while the next cell is empty,
    /// then either merges into an equal-valued blocker (once per blocker
    /// per pass) or stops one short of it.
    pub fn shift(&mut self, direction: Direction) -> ShiftReport {
        self.clear_turn_flags();

        let size = self.size();
        let mut report = ShiftReport::default();
        // Scratch for the walk; a tile crosses at most size - 1 cells.
        let mut path: SmallVec<[Position; 4]> = SmallVec::new();

        for start in self.traversal(direction) {
            let Some(tile) = self.tile_at(start) else {
                continue;
            };

            path.clear();
            let mut current = start;
            let mut merge_target: Option<Tile> = None;

            loop {
                match current.step(direction, size, size) {
                    Some(next) => match self.tile_at(next) {
                        None => {
                            current = next;
                            path.push(next);
                        }
                        Some(blocker) => {
                            if blocker.value == tile.value && !blocker.just_merged {
                                merge_target = Some(blocker);
                            }
                            break;
                        }
                    },
                    None => break,
                }
            }

            if let Some(blocker) = merge_target {
                let merged_value = tile.value * 2;
                let merged = Tile {
                    id: self.alloc_id(),
                    value: merged_value,
                    position: blocker.position,
                    just_merged: true,
                    is_new: false,
                };
                self.grid.set(start, None);
                self.grid.set(blocker.position, Some(merged));
                report.moved = true;
                report.merges += 1;
                report.merge_score += merged_value;
                report.highest_merged = report.highest_merged.max(merged_value);
            } else if current != start {
                let mut relocated = tile;
                relocated.position = current;
                self.grid.set(start, None);
                self.grid.set(current, Some(relocated));
                report.moved = true;
            }
        }

        report
    }

    /// Whether any move can still change the board.
    ///
    /// True when an empty cell exists or some cell shares a value with
    /// its right or down neighbor (each adjacency checked once).
    #[must_use]
    pub fn has_moves(&self) -> bool {
        let size = self.size();
        for pos in self.grid.positions() {
            let Some(tile) = self.tile_at(pos) else {
                return true;
            };
            for direction in [Direction::Right, Direction::Down] {
                if let Some(neighbor) = pos.step(direction, size, size) {
                    if let Some(other) = self.tile_at(neighbor) {
                        if other.value == tile.value {
                            return true;
                        }
                    }
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_left_merges_pair() {
        let mut board = Board::new(2, 0);
        board.place(Position::new(0, 0), 2);
        board.place(Position::new(1, 0), 2);

        let report = board.shift(Direction::Left);

        assert!(report.moved);
        assert_eq!(report.merge_score, 4);
        assert_eq!(report.merges, 1);
        assert_eq!(report.highest_merged, 4);

        let merged = board.tile_at(Position::new(0, 0)).unwrap();
        assert_eq!(merged.value, 4);
        assert!(merged.just_merged);
        assert_eq!(board.tile_count(), 1);
    }

    #[test]
    fn test_shift_no_double_merge() {
        // [4, 2, 2, 0] shifted left must give [4, 4, 0, 0], not [8, ...].
        let mut board = Board::new(4, 0);
        board.place(Position::new(0, 0), 4);
        board.place(Position::new(1, 0), 2);
        board.place(Position::new(2, 0), 2);

        let report = board.shift(Direction::Left);

        assert_eq!(report.merge_score, 4);
        assert_eq!(board.tile_at(Position::new(0, 0)).unwrap().value, 4);
        assert_eq!(board.tile_at(Position::new(1, 0)).unwrap().value, 4);
        assert!(board.tile_at(Position::new(2, 0)).is_none());
    }

    #[test]
    fn test_shift_four_equal_tiles_merge_pairwise() {
        // [2, 2, 2, 2] shifted left gives [4, 4, 0, 0].
        let mut board = Board::new(4, 0);
        for x in 0..4 {
            board.place(Position::new(x, 0), 2);
        }

        let report = board.shift(Direction::Left);

        assert_eq!(report.merges, 2);
        assert_eq!(report.merge_score, 8);
        assert_eq!(board.tile_at(Position::new(0, 0)).unwrap().value, 4);
        assert_eq!(board.tile_at(Position::new(1, 0)).unwrap().value, 4);
        assert_eq!(board.tile_count(), 2);
    }

    #[test]
    fn test_shift_relocates_without_merge() {
        let mut board = Board::new(4, 0);
        let tile = board.place(Position::new(3, 2), 8);

        let report = board.shift(Direction::Left);

        assert!(report.moved);
        assert_eq!(report.merge_score, 0);
        let moved = board.tile_at(Position::new(0, 2)).unwrap();
        assert_eq!(moved.id, tile.id);
        assert_eq!(moved.value, 8);
    }

    #[test]
    fn test_shift_blocked_is_not_a_move() {
        let mut board = Board::new(2, 0);
        board.place(Position::new(0, 0), 2);
        board.place(Position::new(1, 0), 4);

        let report = board.shift(Direction::Left);

        assert!(!report.moved);
        assert_eq!(board.tile_at(Position::new(0, 0)).unwrap().value, 2);
        assert_eq!(board.tile_at(Position::new(1, 0)).unwrap().value, 4);
    }

    #[test]
    fn test_merge_allocates_fresh_id() {
        let mut board = Board::new(2, 0);
        let a = board.place(Position::new(0, 0), 2);
        let b = board.place(Position::new(1, 0), 2);

        board.shift(Direction::Left);

        let merged = board.tile_at(Position::new(0, 0)).unwrap();
        assert_ne!(merged.id, a.id);
        assert_ne!(merged.id, b.id);
    }

    #[test]
    fn test_spawn_fills_random_empty_cell() {
        let mut board = Board::new(2, 0);
        let mut rng = GameRng::new(7);

        for _ in 0..4 {
            let tile = board.spawn(&mut rng, 0.1).unwrap();
            assert!(tile.is_new);
            assert!(tile.value == 2 || tile.value == 4);
        }
        assert_eq!(board.tile_count(), 4);
        assert!(board.spawn(&mut rng, 0.1).is_none());
    }

    #[test]
    fn test_has_moves() {
        let mut board = Board::new(2, 0);
        assert!(board.has_moves());

        // Full board, no equal neighbors.
        board.place(Position::new(0, 0), 2);
        board.place(Position::new(1, 0), 4);
        board.place(Position::new(0, 1), 8);
        board.place(Position::new(1, 1), 16);
        assert!(!board.has_moves());

        // Full board with one mergeable pair.
        let mut board = Board::new(2, 0);
        board.place(Position::new(0, 0), 2);
        board.place(Position::new(1, 0), 4);
        board.place(Position::new(0, 1), 2);
        board.place(Position::new(1, 1), 16);
        assert!(board.has_moves());
    }

    #[test]
    fn test_value_sum_conserved_by_shift() {
        let mut board = Board::new(4, 0);
        board.place(Position::new(0, 0), 2);
        board.place(Position::new(1, 0), 2);
        board.place(Position::new(3, 1), 4);

        let before = board.value_sum();
        board.shift(Direction::Left);
        assert_eq!(board.value_sum(), before);
    }
}
