//! Score records and the leaderboard handoff.
//!
//! ## ScoreRecord
//!
//! The immutable artifact an engine produces at its terminal phase. It is
//! computed exactly once and never mutated afterward.
//!
//! ## LeaderboardEntry
//!
//! A score record plus player identity, the only data handed to the
//! external leaderboard store. The engines never talk to the store
//! themselves; the caller forwards the entry unmodified. `to_bytes` gives
//! the compact wire form.
//!
//! ## BestScoreStore
//!
//! The injectable persistence port for best-score tracking. The engine
//! calls through the port instead of touching any ambient storage, so
//! tests run against the in-memory implementation.

use serde::{Deserialize, Serialize};

use crate::core::Difficulty;

/// Which engine produced a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameKind {
    SlidingMerge,
    Maze,
    MatchPair,
    WordGuess,
}

impl std::fmt::Display for GameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameKind::SlidingMerge => write!(f, "sliding-merge"),
            GameKind::Maze => write!(f, "maze"),
            GameKind::MatchPair => write!(f, "match-pair"),
            GameKind::WordGuess => write!(f, "word-guess"),
        }
    }
}

/// How a game concluded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminalReason {
    Won,
    Lost,
    /// Eliminated with a human-readable cause ("Too many wrong moves", ...).
    Eliminated { reason: String },
}

impl std::fmt::Display for TerminalReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminalReason::Won => write!(f, "won"),
            TerminalReason::Lost => write!(f, "lost"),
            TerminalReason::Eliminated { reason } => write!(f, "eliminated: {reason}"),
        }
    }
}

/// Immutable terminal score artifact.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Which game produced this record.
    pub game: GameKind,
    /// Final score, including any terminal bonuses.
    pub score: u32,
    /// Moves, flips, or guesses taken, per the game's own counting.
    pub moves_or_guesses: u32,
    /// Elapsed play time in milliseconds.
    pub time_elapsed_ms: u64,
    /// The difficulty tier the game was played at.
    pub difficulty: Difficulty,
    /// How the game ended.
    pub terminal_reason: TerminalReason,
}

/// A score record with player identity, ready for the leaderboard store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub user_id: String,
    pub display_name: String,
    pub record: ScoreRecord,
    /// Completion timestamp, supplied by the caller.
    pub completed_at_unix_secs: u64,
}

impl LeaderboardEntry {
    /// Attach player identity to a finished record.
    #[must_use]
    pub fn new(
        record: ScoreRecord,
        user_id: impl Into<String>,
        display_name: impl Into<String>,
        completed_at_unix_secs: u64,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: display_name.into(),
            record,
            completed_at_unix_secs,
        }
    }

    /// Compact byte form for the wire handoff.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Decode an entry from its byte form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}

/// Injectable persistence port for a best score that outlives one game.
///
/// The sliding-merge engine reads the previous best at construction and
/// writes through whenever the running score first exceeds it.
pub trait BestScoreStore {
    /// Load the persisted best score (0 when none exists).
    fn load(&self) -> u32;

    /// Persist a new best score.
    fn save(&mut self, value: u32);
}

/// In-memory `BestScoreStore`, the default for tests and throwaway games.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemoryBestScore {
    value: u32,
}

impl MemoryBestScore {
    /// Create a store with no recorded best.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with an existing best score.
    #[must_use]
    pub fn with_best(value: u32) -> Self {
        Self { value }
    }
}

impl BestScoreStore for MemoryBestScore {
    fn load(&self) -> u32 {
        self.value
    }

    fn save(&mut self, value: u32) {
        self.value = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> ScoreRecord {
        ScoreRecord {
            game: GameKind::Maze,
            score: 310,
            moves_or_guesses: 42,
            time_elapsed_ms: 65_000,
            difficulty: Difficulty::Medium,
            terminal_reason: TerminalReason::Won,
        }
    }

    #[test]
    fn test_entry_round_trip_bytes() {
        let entry = LeaderboardEntry::new(sample_record(), "u-1", "Alice", 1_700_000_000);

        let bytes = entry.to_bytes().unwrap();
        let back = LeaderboardEntry::from_bytes(&bytes).unwrap();

        assert_eq!(entry, back);
    }

    #[test]
    fn test_record_json() {
        let record = sample_record();
        let json = serde_json::to_string(&record).unwrap();
        let back: ScoreRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }

    #[test]
    fn test_memory_best_score() {
        let mut store = MemoryBestScore::new();
        assert_eq!(store.load(), 0);

        store.save(128);
        assert_eq!(store.load(), 128);

        let seeded = MemoryBestScore::with_best(512);
        assert_eq!(seeded.load(), 512);
    }

    #[test]
    fn test_terminal_reason_display() {
        let reason = TerminalReason::Eliminated {
            reason: "Too many wrong moves".to_string(),
        };
        assert_eq!(format!("{reason}"), "eliminated: Too many wrong moves");
    }
}
