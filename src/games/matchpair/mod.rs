//! Pair-matching elimination game engine.
//!
//! A `rows x cols` grid of face-down cards holds every symbol exactly
//! twice. Flipping resolves pairs: two matching face-up cards are
//! eliminated from play, two mismatched ones stay face-up until the next
//! interaction flips them back. The game is lost by elimination, which is
//! multi-causal: too many moves, too many wrong moves, or running out the
//! clock each end the game independently, and only the first triggered
//! cause is recorded.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::core::{Difficulty, Engine, GameClock, GameRng, Position, Rejection};
use crate::score::{GameKind, ScoreRecord, TerminalReason};

/// Fixed symbol alphabet cards draw from, always in pairs.
pub const SYMBOLS: [char; 20] = [
    '🍎', '🍌', '🍒', '🍇', '🍋', '🍉', '🍓', '🍑', '🥝', '🍍',
    '🌵', '🌻', '🍄', '🌙', '⭐', '🔥', '❄', '🌈', '🐚', '🎈',
];

/// Unique card identifier; doubles as the card's index in the deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a card id.
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

/// One card on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub symbol: char,
    pub is_flipped: bool,
    pub is_matched: bool,
    pub position: Position,
}

/// Why the player was eliminated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EliminationReason {
    TooManyMoves,
    TooManyWrongMoves,
    TimeUp,
}

impl std::fmt::Display for EliminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EliminationReason::TooManyMoves => write!(f, "Too many moves"),
            EliminationReason::TooManyWrongMoves => write!(f, "Too many wrong moves"),
            EliminationReason::TimeUp => write!(f, "Time is up"),
        }
    }
}

/// Tuning knobs for one match-pair game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPairConfig {
    pub rows: usize,
    pub cols: usize,
    /// Completed comparisons allowed before elimination.
    pub max_moves: u32,
    /// Mismatched comparisons allowed before elimination.
    pub max_wrong_moves: u32,
    /// Wall-clock budget in seconds.
    pub time_limit_secs: u32,
}

impl MatchPairConfig {
    /// The standard config for a difficulty tier.
    #[must_use]
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                rows: 2,
                cols: 3,
                max_moves: 15,
                max_wrong_moves: 5,
                time_limit_secs: 90,
            },
            Difficulty::Medium => Self {
                rows: 3,
                cols: 4,
                max_moves: 30,
                max_wrong_moves: 10,
                time_limit_secs: 150,
            },
            Difficulty::Hard => Self {
                rows: 4,
                cols: 5,
                max_moves: 50,
                max_wrong_moves: 15,
                time_limit_secs: 240,
            },
        }
    }

    /// Number of symbol pairs on this grid.
    #[must_use]
    pub fn total_pairs(&self) -> u32 {
        (self.rows * self.cols / 2) as u32
    }
}

/// Lifecycle phase. `Won` and `Eliminated` are absorbing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPairPhase {
    Playing,
    Won,
    Eliminated,
}

/// What one `flip` call resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlipOutcome {
    /// First card of a pair turned face-up.
    FirstUp,
    /// Second card completed a matching pair.
    Matched { won: bool },
    /// Second card completed a mismatch; both stay face-up for the
    /// caller to flip down on the next interaction.
    Mismatch { eliminated: bool },
}

/// Owned state snapshot.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchPairSnapshot {
    pub phase: MatchPairPhase,
    pub rows: usize,
    pub cols: usize,
    pub cards: Vec<Card>,
    pub moves: u32,
    pub wrong_moves: u32,
    pub matched_pairs: u32,
    pub total_pairs: u32,
    pub elimination_reason: Option<EliminationReason>,
    pub elapsed_secs: u32,
}

/// The match-pair engine.
pub struct MatchPairEngine {
    config: MatchPairConfig,
    difficulty: Difficulty,
    cards: Vector<Card>,
    face_up: SmallVec<[CardId; 2]>,
    moves: u32,
    wrong_moves: u32,
    matched_pairs: u32,
    phase: MatchPairPhase,
    elimination_reason: Option<EliminationReason>,
    clock: GameClock,
    rng: GameRng,
    record: Option<ScoreRecord>,
}

impl MatchPairEngine {
    /// Deal a shuffled grid for a difficulty tier.
    #[must_use]
    pub fn new(difficulty: Difficulty, rng: GameRng) -> Self {
        Self::with_config(MatchPairConfig::for_difficulty(difficulty), difficulty, rng)
    }

    /// Deal with explicit tuning.
    ///
    /// `rows * cols` must be even so every symbol has its pair.
    #[must_use]
    pub fn with_config(config: MatchPairConfig, difficulty: Difficulty, mut rng: GameRng) -> Self {
        let cards = Self::deal(&config, &mut rng);
        Self {
            config,
            difficulty,
            cards,
            face_up: SmallVec::new(),
            moves: 0,
            wrong_moves: 0,
            matched_pairs: 0,
            phase: MatchPairPhase::Playing,
            elimination_reason: None,
            clock: GameClock::new(),
            rng,
            record: None,
        }
    }

    fn deal(config: &MatchPairConfig, rng: &mut GameRng) -> Vector<Card> {
        let cell_count = config.rows * config.cols;
        assert!(cell_count % 2 == 0, "grid must hold an even number of cards");
        let pairs = cell_count / 2;
        assert!(pairs <= SYMBOLS.len(), "not enough symbols for this grid");

        let mut deck: Vec<char> = SYMBOLS[..pairs]
            .iter()
            .flat_map(|&s| [s, s])
            .collect();
        rng.shuffle(&mut deck);

        deck.into_iter()
            .enumerate()
            .map(|(i, symbol)| Card {
                id: CardId(i as u32),
                symbol,
                is_flipped: false,
                is_matched: false,
                position: Position::new(i % config.cols, i / config.cols),
            })
            .collect()
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> MatchPairPhase {
        self.phase
    }

    /// Matched pair count so far.
    #[must_use]
    pub fn matched_pairs(&self) -> u32 {
        self.matched_pairs
    }

    /// The recorded elimination cause, if eliminated.
    #[must_use]
    pub fn elimination_reason(&self) -> Option<EliminationReason> {
        self.elimination_reason
    }

    fn card(&self, id: CardId) -> Option<Card> {
        self.cards.get(id.raw() as usize).copied()
    }

    fn set_card(&mut self, card: Card) {
        self.cards.set(card.id.raw() as usize, card);
    }

    /// Flip a card.
    ///
    /// If two unmatched cards are already face-up, they flip back down
    /// first (the third click resolves the previous pair); clicking one
    /// of the stale pair itself flips both down and turns that card up
    /// again. When the flip completes a pair, the comparison counts as
    /// one move; the win condition is checked before elimination
    /// thresholds so the final matching move can never be falsely
    /// eliminated.
    pub fn flip(&mut self, id: CardId) -> Result<FlipOutcome, Rejection> {
        if self.phase != MatchPairPhase::Playing {
            return Err(Rejection::GameOver);
        }
        let card = self.card(id).ok_or(Rejection::UnknownId)?;
        if card.is_matched {
            return Err(Rejection::CardUnavailable);
        }

        if self.face_up.len() == 2 {
            for stale_id in std::mem::take(&mut self.face_up) {
                if let Some(mut stale) = self.card(stale_id) {
                    stale.is_flipped = false;
                    self.set_card(stale);
                }
            }
        }

        let mut card = self.card(id).ok_or(Rejection::UnknownId)?;
        if card.is_flipped {
            return Err(Rejection::CardUnavailable);
        }
        card.is_flipped = true;
        self.set_card(card);
        self.face_up.push(id);

        if self.face_up.len() < 2 {
            return Ok(FlipOutcome::FirstUp);
        }

        self.moves += 1;
        let first = self.card(self.face_up[0]).ok_or(Rejection::UnknownId)?;
        let second = self.card(self.face_up[1]).ok_or(Rejection::UnknownId)?;

        if first.symbol == second.symbol {
            for mut matched in [first, second] {
                matched.is_matched = true;
                matched.is_flipped = false;
                self.set_card(matched);
            }
            self.face_up.clear();
            self.matched_pairs += 1;

            if self.matched_pairs == self.config.total_pairs() {
                self.conclude_won();
                return Ok(FlipOutcome::Matched { won: true });
            }
            self.check_move_eliminations();
            return Ok(FlipOutcome::Matched { won: false });
        }

        self.wrong_moves += 1;
        self.check_move_eliminations();
        Ok(FlipOutcome::Mismatch {
            eliminated: self.phase == MatchPairPhase::Eliminated,
        })
    }

    /// Deal a fresh shuffled grid at the same difficulty.
    pub fn restart(&mut self) {
        let mut rng = self.rng.fork();
        self.cards = Self::deal(&self.config, &mut rng);
        self.rng = rng;
        self.face_up.clear();
        self.moves = 0;
        self.wrong_moves = 0;
        self.matched_pairs = 0;
        self.phase = MatchPairPhase::Playing;
        self.elimination_reason = None;
        self.clock = GameClock::new();
        self.record = None;
    }

    fn check_move_eliminations(&mut self) {
        if self.moves > self.config.max_moves {
            self.eliminate(EliminationReason::TooManyMoves);
        } else if self.wrong_moves > self.config.max_wrong_moves {
            self.eliminate(EliminationReason::TooManyWrongMoves);
        }
    }

    fn eliminate(&mut self, reason: EliminationReason) {
        if self.phase != MatchPairPhase::Playing {
            return;
        }
        debug!(%reason, moves = self.moves, wrong = self.wrong_moves, "eliminated");
        self.phase = MatchPairPhase::Eliminated;
        self.elimination_reason = Some(reason);
        self.record = Some(ScoreRecord {
            game: GameKind::MatchPair,
            score: self.matched_pairs * 100,
            moves_or_guesses: self.moves,
            time_elapsed_ms: self.clock.elapsed_ms(),
            difficulty: self.difficulty,
            terminal_reason: TerminalReason::Eliminated {
                reason: reason.to_string(),
            },
        });
    }

    fn conclude_won(&mut self) {
        debug!(moves = self.moves, wrong = self.wrong_moves, "all pairs matched");
        self.phase = MatchPairPhase::Won;
        let time_bonus = self
            .config
            .time_limit_secs
            .saturating_sub(self.clock.elapsed_secs())
            * 2;
        let score = (self.matched_pairs * 100 + time_bonus).saturating_sub(self.wrong_moves * 5);
        self.record = Some(ScoreRecord {
            game: GameKind::MatchPair,
            score,
            moves_or_guesses: self.moves,
            time_elapsed_ms: self.clock.elapsed_ms(),
            difficulty: self.difficulty,
            terminal_reason: TerminalReason::Won,
        });
    }
}

impl Engine for MatchPairEngine {
    type Snapshot = MatchPairSnapshot;

    fn tick(&mut self, delta_secs: u32) {
        if self.phase != MatchPairPhase::Playing {
            return;
        }
        self.clock.advance(delta_secs);
        if self.clock.elapsed_secs() > self.config.time_limit_secs {
            self.eliminate(EliminationReason::TimeUp);
        }
    }

    fn snapshot(&self) -> MatchPairSnapshot {
        MatchPairSnapshot {
            phase: self.phase,
            rows: self.config.rows,
            cols: self.config.cols,
            cards: self.cards.iter().copied().collect(),
            moves: self.moves,
            wrong_moves: self.wrong_moves,
            matched_pairs: self.matched_pairs,
            total_pairs: self.config.total_pairs(),
            elimination_reason: self.elimination_reason,
            elapsed_secs: self.clock.elapsed_secs(),
        }
    }

    fn score_record(&self) -> Option<ScoreRecord> {
        self.record.clone()
    }

    fn is_terminal(&self) -> bool {
        self.phase != MatchPairPhase::Playing
    }
}
