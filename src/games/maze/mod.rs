//! Maze engine: procedural generation plus movement adjudication.
//!
//! Generation carves a perfect maze (see [`generator`]); the engine then
//! validates player movement against the walls and detects completion by
//! exact coordinate equality with the goal room. There is no losing
//! phase: the only terminal state is reaching the goal.

pub mod generator;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Difficulty, Direction, Engine, GameClock, GameRng, Position, Rejection};
use crate::score::{GameKind, ScoreRecord, TerminalReason};

use generator::MazeGrid;

/// Tuning knobs for one maze game.
///
/// Difficulty drives size, base score, and multiplier together: harder
/// mazes are larger, slower to reward, and worth more per second saved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeConfig {
    /// Rooms per side; the cell grid is `2*rooms + 1` square.
    pub rooms: usize,
    /// Score floor for finishing at all.
    pub base_score: u32,
    /// Seconds of time bonus available at completion.
    pub time_budget_secs: u32,
    /// Multiplier applied to the whole score.
    pub multiplier: u32,
}

impl MazeConfig {
    /// The standard config for a difficulty tier.
    #[must_use]
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                rooms: 5,
                base_score: 100,
                time_budget_secs: 120,
                multiplier: 1,
            },
            Difficulty::Medium => Self {
                rooms: 10,
                base_score: 200,
                time_budget_secs: 240,
                multiplier: 2,
            },
            Difficulty::Hard => Self {
                rooms: 15,
                base_score: 300,
                time_budget_secs: 360,
                multiplier: 3,
            },
        }
    }
}

/// Lifecycle phase. `Won` is absorbing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MazePhase {
    Playing,
    Won,
}

/// One cell in a snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeCell {
    /// Solid wall; movement into it is blocked.
    pub is_wall: bool,
    /// The player has stood here.
    pub is_visited: bool,
    /// Carved passage cell.
    pub is_path: bool,
}

/// Owned state snapshot.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MazeSnapshot {
    pub phase: MazePhase,
    pub width: usize,
    pub height: usize,
    /// Cells in row-major order, `width` per row.
    pub cells: Vec<MazeCell>,
    pub player: Position,
    pub start: Position,
    pub goal: Position,
    pub moves: u32,
    pub elapsed_secs: u32,
}

/// The maze engine.
pub struct MazeEngine {
    config: MazeConfig,
    difficulty: Difficulty,
    grid: MazeGrid,
    player: Position,
    start: Position,
    goal: Position,
    visited: HashSet<Position>,
    phase: MazePhase,
    moves: u32,
    clock: GameClock,
    rng: GameRng,
    record: Option<ScoreRecord>,
}

impl MazeEngine {
    /// Generate a maze for a difficulty tier and place the player at the
    /// start room.
    #[must_use]
    pub fn new(difficulty: Difficulty, rng: GameRng) -> Self {
        Self::with_config(MazeConfig::for_difficulty(difficulty), difficulty, rng)
    }

    /// Generate with explicit tuning.
    #[must_use]
    pub fn with_config(config: MazeConfig, difficulty: Difficulty, mut rng: GameRng) -> Self {
        let grid = generator::carve(config.rooms, &mut rng);
        let span = grid.width();
        let start = Position::new(1, 1);
        let goal = Position::new(span - 2, span - 2);
        let mut visited = HashSet::new();
        visited.insert(start);
        Self {
            config,
            difficulty,
            grid,
            player: start,
            start,
            goal,
            visited,
            phase: MazePhase::Playing,
            moves: 0,
            clock: GameClock::new(),
            rng,
            record: None,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> MazePhase {
        self.phase
    }

    /// Player position.
    #[must_use]
    pub fn player(&self) -> Position {
        self.player
    }

    /// Goal position.
    #[must_use]
    pub fn goal(&self) -> Position {
        self.goal
    }

    /// The carved grid, mainly for tests and tooling.
    #[must_use]
    pub fn grid(&self) -> &MazeGrid {
        &self.grid
    }

    /// Destination of a move in `direction`, if it is in bounds and not
    /// a wall. Pure lookahead; no state change.
    #[must_use]
    pub fn can_move_to(&self, direction: Direction) -> Option<Position> {
        let dest = self
            .player
            .step(direction, self.grid.width(), self.grid.height())?;
        if self.grid.get(dest) == Some(&false) {
            Some(dest)
        } else {
            None
        }
    }

    /// Move the player one cell.
    ///
    /// Returns the new position, `Rejection::Blocked` against a wall or
    /// the border, and `Rejection::GameOver` once won. Reaching the goal
    /// cell (exact coordinate equality) wins.
    pub fn try_move(&mut self, direction: Direction) -> Result<Position, Rejection> {
        if self.phase == MazePhase::Won {
            return Err(Rejection::GameOver);
        }
        let dest = self.can_move_to(direction).ok_or(Rejection::Blocked)?;
        self.player = dest;
        self.visited.insert(dest);
        self.moves += 1;

        if dest == self.goal {
            self.conclude();
        }
        Ok(dest)
    }

    /// Regenerate a fresh maze at the same difficulty.
    pub fn restart(&mut self) {
        let mut rng = self.rng.fork();
        let grid = generator::carve(self.config.rooms, &mut rng);
        let span = grid.width();
        self.grid = grid;
        self.rng = rng;
        self.player = self.start;
        self.goal = Position::new(span - 2, span - 2);
        self.visited = HashSet::from([self.start]);
        self.phase = MazePhase::Playing;
        self.moves = 0;
        self.clock = GameClock::new();
        self.record = None;
    }

    fn final_score(&self) -> u32 {
        let time_bonus = self
            .config
            .time_budget_secs
            .saturating_sub(self.clock.elapsed_secs());
        (self.config.base_score + time_bonus) * self.config.multiplier
    }

    fn conclude(&mut self) {
        debug!(moves = self.moves, elapsed = self.clock.elapsed_secs(), "maze completed");
        self.phase = MazePhase::Won;
        self.record = Some(ScoreRecord {
            game: GameKind::Maze,
            score: self.final_score(),
            moves_or_guesses: self.moves,
            time_elapsed_ms: self.clock.elapsed_ms(),
            difficulty: self.difficulty,
            terminal_reason: TerminalReason::Won,
        });
    }
}

impl Engine for MazeEngine {
    type Snapshot = MazeSnapshot;

    fn tick(&mut self, delta_secs: u32) {
        if self.phase == MazePhase::Won {
            return;
        }
        self.clock.advance(delta_secs);
    }

    fn snapshot(&self) -> MazeSnapshot {
        let cells = self
            .grid
            .iter()
            .map(|(pos, wall)| MazeCell {
                is_wall: *wall,
                is_visited: self.visited.contains(&pos),
                is_path: !*wall,
            })
            .collect();
        MazeSnapshot {
            phase: self.phase,
            width: self.grid.width(),
            height: self.grid.height(),
            cells,
            player: self.player,
            start: self.start,
            goal: self.goal,
            moves: self.moves,
            elapsed_secs: self.clock.elapsed_secs(),
        }
    }

    fn score_record(&self) -> Option<ScoreRecord> {
        self.record.clone()
    }

    fn is_terminal(&self) -> bool {
        self.phase == MazePhase::Won
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> MazeEngine {
        MazeEngine::new(Difficulty::Easy, GameRng::new(42))
    }

    #[test]
    fn test_player_starts_at_start_room() {
        let engine = engine();
        assert_eq!(engine.player(), Position::new(1, 1));
        assert_eq!(engine.phase(), MazePhase::Playing);
    }

    #[test]
    fn test_move_into_wall_is_blocked() {
        let mut engine = engine();
        // The border above the start room is always a wall.
        assert_eq!(engine.try_move(Direction::Up), Err(Rejection::Blocked));
        assert_eq!(engine.player(), Position::new(1, 1));
        assert_eq!(engine.snapshot().moves, 0);
    }

    #[test]
    fn test_open_move_updates_position_and_trail() {
        let mut engine = engine();
        let direction = Direction::all()
            .into_iter()
            .find(|d| engine.can_move_to(*d).is_some())
            .expect("start room has at least one exit");

        let dest = engine.try_move(direction).unwrap();
        assert_eq!(engine.player(), dest);
        assert_eq!(engine.snapshot().moves, 1);

        let snapshot = engine.snapshot();
        let idx = dest.y * snapshot.width + dest.x;
        assert!(snapshot.cells[idx].is_visited);
    }

    #[test]
    fn test_walking_the_maze_to_goal_wins() {
        let mut engine = engine();
        // Depth-first walk along open cells until the goal is reached.
        let mut trail = vec![engine.player()];
        let mut seen = HashSet::from([engine.player()]);
        while engine.phase() == MazePhase::Playing {
            let next = Direction::all().into_iter().find(|d| {
                engine
                    .can_move_to(*d)
                    .map(|p| !seen.contains(&p))
                    .unwrap_or(false)
            });
            match next {
                Some(direction) => {
                    let pos = engine.try_move(direction).unwrap();
                    seen.insert(pos);
                    trail.push(pos);
                }
                None => {
                    // Dead end: backtrack one step.
                    trail.pop();
                    let back = *trail.last().expect("trail never empties before the goal");
                    let direction = Direction::all()
                        .into_iter()
                        .find(|d| engine.can_move_to(*d) == Some(back))
                        .expect("backtrack step is always open");
                    engine.try_move(direction).unwrap();
                }
            }
        }
        assert_eq!(engine.player(), engine.goal());
        assert!(engine.score_record().is_some());
    }

    #[test]
    fn test_won_is_absorbing() {
        let mut engine = engine();
        engine.phase = MazePhase::Won;
        assert_eq!(engine.try_move(Direction::Down), Err(Rejection::GameOver));
    }

    #[test]
    fn test_score_formula() {
        let mut engine = engine();
        engine.tick(30);
        engine.conclude();
        let record = engine.score_record().unwrap();
        // (100 + (120 - 30)) * 1
        assert_eq!(record.score, 190);
        assert_eq!(record.time_elapsed_ms, 30_000);
    }

    #[test]
    fn test_slow_run_still_scores_base() {
        let mut engine = engine();
        engine.tick(1000);
        engine.conclude();
        assert_eq!(engine.score_record().unwrap().score, 100);
    }

    #[test]
    fn test_restart_regenerates() {
        let mut engine = engine();
        let before = engine.snapshot().cells;
        engine.restart();
        let after = engine.snapshot().cells;
        assert_eq!(engine.player(), Position::new(1, 1));
        assert_eq!(engine.snapshot().moves, 0);
        // Different carving with overwhelming probability.
        assert_ne!(before, after);
    }

    #[test]
    fn test_config_tiers() {
        assert_eq!(MazeConfig::for_difficulty(Difficulty::Easy).rooms, 5);
        assert_eq!(MazeConfig::for_difficulty(Difficulty::Medium).multiplier, 2);
        assert_eq!(MazeConfig::for_difficulty(Difficulty::Hard).base_score, 300);
    }
}
