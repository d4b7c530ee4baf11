//! # arcade-core
//!
//! A headless engine library for a casual-gaming arcade: four small,
//! fully deterministic mini-games behind one shared `Engine` trait.
//!
//! ## Design Principles
//!
//! 1. **Pure and Headless**: No rendering, no timers, no storage side
//!    effects. Engines are plain state machines; the embedding layer
//!    owns the UI, the scheduler, and persistence.
//!
//! 2. **Caller-Driven Time**: Engines never spawn timers. The caller
//!    advances time with `tick(delta_secs)` at whatever cadence it runs.
//!
//! 3. **Deterministic Replay**: Every random draw flows through a
//!    seedable `GameRng`, so any game is reproducible from its seed.
//!
//! 4. **Expected Rejections**: Actions return `Result<T, Rejection>`.
//!    A rejected action leaves the engine untouched; there is no
//!    exception-style control flow.
//!
//! ## Modules
//!
//! - `core`: grid primitives, clock/countdowns, difficulty, RNG, the
//!   `Engine` trait, and the `Rejection` type
//! - `score`: score records, leaderboard entries, best-score storage
//! - `games`: the four engines (sliding-merge, maze, match-pair,
//!   word-guess)

pub mod core;
pub mod games;
pub mod score;

// Re-export commonly used types
pub use crate::core::{
    Countdown, Difficulty, Direction, Engine, GameClock, GameRng, Grid, Position, Rejection,
};

pub use crate::score::{
    BestScoreStore, GameKind, LeaderboardEntry, MemoryBestScore, ScoreRecord, TerminalReason,
};

pub use crate::games::matchpair::{MatchPairConfig, MatchPairEngine, MatchPairSnapshot};
pub use crate::games::maze::{MazeConfig, MazeEngine, MazeSnapshot};
pub use crate::games::sliding::{SlidingConfig, SlidingMergeEngine, SlidingSnapshot};
pub use crate::games::wordguess::{WordGuessConfig, WordGuessEngine, WordGuessSnapshot};
