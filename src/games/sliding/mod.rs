//! Sliding-merge tile puzzle engine (2048 rules).
//!
//! Maintains an N x N grid of numbered tiles and applies directional
//! moves: compact toward the chosen edge, merge equal neighbors once per
//! move, spawn one tile after every effective move. Reaching the target
//! tile wins; a full board with no adjacent equal pair loses.
//!
//! The win phase is not fully absorbing: `continue_game` reopens play and
//! merges keep scoring until the board locks up.
//!
//! Best score flows through the injected [`BestScoreStore`] port; the
//! engine never touches ambient storage.

pub mod board;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Difficulty, Direction, Engine, GameClock, GameRng, Rejection};
use crate::score::{BestScoreStore, GameKind, ScoreRecord, TerminalReason};

pub use board::{Board, ShiftReport, Tile, TileId};

/// Tuning knobs for one sliding-merge game.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlidingConfig {
    /// Board side length.
    pub size: usize,
    /// Tile value that wins the game.
    pub target: u32,
    /// Probability a spawned tile is a 4 instead of a 2.
    pub spawn_four_chance: f64,
    /// Terminal time bonus before decay.
    pub time_bonus_cap: u32,
    /// Bonus points lost per elapsed second.
    pub time_decay_per_sec: u32,
    /// Points per step of merge streak at the terminal transition.
    pub streak_bonus: u32,
}

impl SlidingConfig {
    /// The standard config for a difficulty tier.
    #[must_use]
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let (size, target) = match difficulty {
            Difficulty::Easy => (4, 1024),
            Difficulty::Medium => (4, 2048),
            Difficulty::Hard => (5, 4096),
        };
        Self {
            size,
            target,
            spawn_four_chance: 0.1,
            time_bonus_cap: 1000,
            time_decay_per_sec: 2,
            streak_bonus: 50,
        }
    }
}

/// Lifecycle phase.
///
/// `Won` is reached when the target tile appears; it blocks moves until
/// the explicit `continue_game` transition to `Continued`. `Lost` is
/// absorbing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlidingPhase {
    Playing,
    Won,
    Continued,
    Lost,
}

/// What one `shift` call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveReport {
    /// Whether the move was effective (changed any tile). Ineffective
    /// moves consume no turn and spawn nothing.
    pub moved: bool,
    /// Score gained from merges this move.
    pub merge_score: u32,
    /// Tile spawned after the move, if any.
    pub spawned: Option<Tile>,
    /// Phase after the move.
    pub phase: SlidingPhase,
}

/// Owned state snapshot, safe for the caller to hold and render.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SlidingSnapshot {
    pub phase: SlidingPhase,
    pub size: usize,
    pub target: u32,
    pub tiles: Vec<Tile>,
    pub score: u32,
    pub best_score: u32,
    pub moves: u32,
    pub merge_streak: u32,
    pub elapsed_secs: u32,
}

/// The sliding-merge engine.
pub struct SlidingMergeEngine<S: BestScoreStore> {
    config: SlidingConfig,
    difficulty: Difficulty,
    board: Board,
    phase: SlidingPhase,
    score: u32,
    best_score: u32,
    moves: u32,
    merge_streak: u32,
    bonus_applied: bool,
    clock: GameClock,
    rng: GameRng,
    store: S,
    record: Option<ScoreRecord>,
}

impl<S: BestScoreStore> SlidingMergeEngine<S> {
    /// Create an engine for a difficulty tier.
    ///
    /// Loads the previous best score through the store port and spawns
    /// the two opening tiles.
    #[must_use]
    pub fn new(difficulty: Difficulty, rng: GameRng, store: S) -> Self {
        Self::with_config(SlidingConfig::for_difficulty(difficulty), difficulty, rng, store)
    }

    /// Create an engine with explicit tuning.
    #[must_use]
    pub fn with_config(
        config: SlidingConfig,
        difficulty: Difficulty,
        mut rng: GameRng,
        store: S,
    ) -> Self {
        let mut board = Board::new(config.size, 0);
        for _ in 0..2 {
            board.spawn(&mut rng, config.spawn_four_chance);
        }
        let best_score = store.load();
        Self {
            config,
            difficulty,
            board,
            phase: SlidingPhase::Playing,
            score: 0,
            best_score,
            moves: 0,
            merge_streak: 0,
            bonus_applied: false,
            clock: GameClock::new(),
            rng,
            store,
            record: None,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> SlidingPhase {
        self.phase
    }

    /// Running score.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Best score, including this game if it set a new one.
    #[must_use]
    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    /// Direct board access, mainly for tests and tooling.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Apply a directional move.
    ///
    /// Rejected once the game is `Won` (until `continue_game`) or `Lost`.
    /// An ineffective move returns `Ok` with `moved == false` and changes
    /// nothing.
    pub fn shift(&mut self, direction: Direction) -> Result<MoveReport, Rejection> {
        match self.phase {
            SlidingPhase::Playing | SlidingPhase::Continued => {}
            SlidingPhase::Won | SlidingPhase::Lost => return Err(Rejection::GameOver),
        }

        let report = self.board.shift(direction);
        if !report.moved {
            return Ok(MoveReport {
                moved: false,
                merge_score: 0,
                spawned: None,
                phase: self.phase,
            });
        }

        self.moves += 1;
        self.score += report.merge_score;
        if report.merges > 0 {
            self.merge_streak += 1;
        } else {
            self.merge_streak = 0;
        }
        self.write_through_best();

        let spawned = self.board.spawn(&mut self.rng, self.config.spawn_four_chance);

        if self.phase == SlidingPhase::Playing && report.highest_merged >= self.config.target {
            self.conclude(SlidingPhase::Won, TerminalReason::Won);
        } else if !self.board.has_moves() {
            self.conclude(SlidingPhase::Lost, TerminalReason::Lost);
        }

        Ok(MoveReport {
            moved: true,
            merge_score: report.merge_score,
            spawned,
            phase: self.phase,
        })
    }

    /// Keep playing past the win.
    ///
    /// Only legal in the `Won` phase. Clears the cached score record;
    /// a fresh one is produced when the continued game ends.
    pub fn continue_game(&mut self) -> Result<(), Rejection> {
        if self.phase != SlidingPhase::Won {
            return Err(Rejection::GameOver);
        }
        debug!(score = self.score, "continuing past win");
        self.phase = SlidingPhase::Continued;
        self.record = None;
        Ok(())
    }

    /// Start a fresh game at the same difficulty.
    ///
    /// The tile-id allocator carries over so no id from the previous game
    /// is reused, and the RNG forks so the new game draws fresh values.
    pub fn restart(&mut self) {
        let first_id = self.board.next_id();
        let mut board = Board::new(self.config.size, first_id);
        let mut rng = self.rng.fork();
        for _ in 0..2 {
            board.spawn(&mut rng, self.config.spawn_four_chance);
        }
        self.board = board;
        self.rng = rng;
        self.phase = SlidingPhase::Playing;
        self.score = 0;
        self.moves = 0;
        self.merge_streak = 0;
        self.bonus_applied = false;
        self.clock = GameClock::new();
        self.record = None;
        self.best_score = self.store.load();
    }

    fn write_through_best(&mut self) {
        if self.score > self.best_score {
            self.best_score = self.score;
            self.store.save(self.score);
        }
    }

    fn terminal_bonus(&self) -> u32 {
        let decay = self.clock.elapsed_secs() * self.config.time_decay_per_sec;
        let time_bonus = self.config.time_bonus_cap.saturating_sub(decay);
        time_bonus + self.merge_streak * self.config.streak_bonus
    }

    fn conclude(&mut self, phase: SlidingPhase, reason: TerminalReason) {
        debug!(?phase, score = self.score, moves = self.moves, "game concluded");
        self.phase = phase;
        if !self.bonus_applied {
            self.score += self.terminal_bonus();
            self.bonus_applied = true;
            self.write_through_best();
        }
        self.record = Some(ScoreRecord {
            game: GameKind::SlidingMerge,
            score: self.score,
            moves_or_guesses: self.moves,
            time_elapsed_ms: self.clock.elapsed_ms(),
            difficulty: self.difficulty,
            terminal_reason: reason,
        });
    }
}

impl<S: BestScoreStore> Engine for SlidingMergeEngine<S> {
    type Snapshot = SlidingSnapshot;

    fn tick(&mut self, delta_secs: u32) {
        if self.is_terminal() {
            return;
        }
        self.clock.advance(delta_secs);
    }

    fn snapshot(&self) -> SlidingSnapshot {
        SlidingSnapshot {
            phase: self.phase,
            size: self.config.size,
            target: self.config.target,
            tiles: self.board.tiles(),
            score: self.score,
            best_score: self.best_score,
            moves: self.moves,
            merge_streak: self.merge_streak,
            elapsed_secs: self.clock.elapsed_secs(),
        }
    }

    fn score_record(&self) -> Option<ScoreRecord> {
        self.record.clone()
    }

    fn is_terminal(&self) -> bool {
        matches!(self.phase, SlidingPhase::Won | SlidingPhase::Lost)
    }
}
