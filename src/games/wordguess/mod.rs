//! Word-guess engine: hangman with a resource economy.
//!
//! A secret word is drawn from a category at the requested difficulty.
//! Letter guesses reveal every occurrence at once and earn
//! frequency-weighted points; wrong guesses burn a fixed budget. Score
//! doubles as currency: power-ups debit it atomically before applying
//! their effect, and the timed ones (freeze, double points) revert when
//! their countdown runs out.

pub mod powerups;
pub mod words;

use im::{HashSet as ImHashSet, Vector};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Countdown, Difficulty, Engine, GameClock, GameRng, Rejection};
use crate::score::{GameKind, ScoreRecord, TerminalReason};

pub use powerups::{PowerUp, PowerUpCatalog, PowerUpEffect, PowerUpId};
pub use words::Category;

/// Tuning knobs for one word-guess game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordGuessConfig {
    /// Wrong guesses allowed before losing (before any extra-guess
    /// power-ups).
    pub max_wrong_guesses: u32,
    /// Wall-clock budget; `None` plays untimed.
    pub time_limit_secs: Option<u32>,
    /// Multiplier applied to every letter weight.
    pub letter_point_scale: u32,
    /// Terminal streak bonus per consecutive correct guess.
    pub streak_bonus: u32,
}

impl WordGuessConfig {
    /// The standard config for a difficulty tier.
    #[must_use]
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let (max_wrong_guesses, time_limit_secs) = match difficulty {
            Difficulty::Easy => (8, None),
            Difficulty::Medium => (6, Some(180)),
            Difficulty::Hard => (4, Some(120)),
        };
        Self {
            max_wrong_guesses,
            time_limit_secs,
            letter_point_scale: 5,
            streak_bonus: 10,
        }
    }
}

/// Lifecycle phase. `Won` and `Lost` are absorbing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WordGuessPhase {
    Playing,
    Won,
    Lost,
}

/// What one `guess_letter` call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuessOutcome {
    /// The letter is in the word; all its occurrences were revealed.
    Correct { revealed: u32, points: u32, won: bool },
    /// The letter is not in the word.
    Wrong { remaining: u32, lost: bool },
}

/// What one `use_power_up` call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PowerUpOutcome {
    pub effect: PowerUpEffect,
    pub cost: u32,
    /// The category hint, for `CategoryHint`.
    pub hint: Option<&'static str>,
    /// Whether the reveal effect completed the word.
    pub won: bool,
}

/// Owned state snapshot. The secret word only appears once terminal.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WordGuessSnapshot {
    pub phase: WordGuessPhase,
    pub category: Category,
    /// Display mask, one `_` per unrevealed letter.
    pub masked: String,
    pub guessed: Vec<char>,
    pub wrong_guesses: Vec<char>,
    pub remaining_guesses: u32,
    pub score: u32,
    pub streak: u32,
    pub multiplier: u32,
    pub freeze_secs_remaining: u32,
    pub double_secs_remaining: u32,
    pub elapsed_secs: u32,
    pub hint: Option<String>,
    /// Revealed only after the game ends.
    pub word: Option<String>,
}

/// The word-guess engine.
pub struct WordGuessEngine {
    config: WordGuessConfig,
    difficulty: Difficulty,
    category: Category,
    word: Vec<char>,
    masked: Vec<char>,
    guessed: ImHashSet<char>,
    wrong: Vector<char>,
    score: u32,
    streak: u32,
    multiplier: u32,
    extra_guesses: u32,
    freeze: Option<Countdown>,
    double_points: Option<Countdown>,
    hint_taken: bool,
    catalog: PowerUpCatalog,
    phase: WordGuessPhase,
    clock: GameClock,
    rng: GameRng,
    record: Option<ScoreRecord>,
}

impl WordGuessEngine {
    /// Draw a random category and word for a difficulty tier.
    #[must_use]
    pub fn new(difficulty: Difficulty, mut rng: GameRng) -> Self {
        let category = words::random_category(&mut rng);
        let word = words::pick_word(category, difficulty, &mut rng);
        Self::with_word(
            WordGuessConfig::for_difficulty(difficulty),
            difficulty,
            category,
            word,
            rng,
        )
    }

    /// Build a game around an explicit word.
    ///
    /// Used by tests and deterministic replays; `word` must be uppercase
    /// ASCII letters.
    #[must_use]
    pub fn with_word(
        config: WordGuessConfig,
        difficulty: Difficulty,
        category: Category,
        word: &str,
        rng: GameRng,
    ) -> Self {
        assert!(
            !word.is_empty() && word.chars().all(|c| c.is_ascii_uppercase()),
            "word must be non-empty uppercase ASCII"
        );
        let word: Vec<char> = word.chars().collect();
        let masked = vec!['_'; word.len()];
        Self {
            config,
            difficulty,
            category,
            word,
            masked,
            guessed: ImHashSet::new(),
            wrong: Vector::new(),
            score: 0,
            streak: 0,
            multiplier: 1,
            extra_guesses: 0,
            freeze: None,
            double_points: None,
            hint_taken: false,
            catalog: PowerUpCatalog::standard(),
            phase: WordGuessPhase::Playing,
            clock: GameClock::new(),
            rng,
            record: None,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> WordGuessPhase {
        self.phase
    }

    /// Running score.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// The word's category.
    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    /// The power-up catalog in play.
    #[must_use]
    pub fn catalog(&self) -> &PowerUpCatalog {
        &self.catalog
    }

    /// Total wrong guesses allowed, including extra-guess purchases.
    #[must_use]
    pub fn wrong_guess_budget(&self) -> u32 {
        self.config.max_wrong_guesses + self.extra_guesses
    }

    /// Wrong guesses left before losing.
    #[must_use]
    pub fn remaining_guesses(&self) -> u32 {
        self.wrong_guess_budget().saturating_sub(self.wrong.len() as u32)
    }

    /// Guess a letter (case-insensitive).
    ///
    /// A repeat guess is rejected with no state change. A correct guess
    /// reveals every occurrence and scores frequency-weighted points
    /// under the active multiplier; a wrong guess burns budget and
    /// resets the streak.
    pub fn guess_letter(&mut self, letter: char) -> Result<GuessOutcome, Rejection> {
        if self.phase != WordGuessPhase::Playing {
            return Err(Rejection::GameOver);
        }
        if !letter.is_ascii_alphabetic() {
            return Err(Rejection::NotALetter(letter));
        }
        let letter = letter.to_ascii_uppercase();
        if self.guessed.contains(&letter) {
            return Err(Rejection::AlreadyGuessed(letter));
        }

        self.guessed.insert(letter);

        let revealed = self.reveal(letter);
        if revealed > 0 {
            let points =
                words::letter_weight(letter) * self.config.letter_point_scale * revealed * self.multiplier;
            self.score += points;
            self.streak += 1;
            let won = self.is_complete();
            if won {
                self.conclude_won();
            }
            return Ok(GuessOutcome::Correct { revealed, points, won });
        }

        self.wrong.push_back(letter);
        self.streak = 0;
        let lost = self.wrong.len() as u32 >= self.wrong_guess_budget();
        if lost {
            self.conclude_lost();
        }
        Ok(GuessOutcome::Wrong {
            remaining: self.remaining_guesses(),
            lost,
        })
    }

    /// Buy and apply a power-up.
    ///
    /// Debit-then-effect is atomic: if the score does not cover the
    /// cost, nothing happens. Reveal effects can complete the word and
    /// win the game in the same call.
    pub fn use_power_up(&mut self, id: PowerUpId) -> Result<PowerUpOutcome, Rejection> {
        if self.phase != WordGuessPhase::Playing {
            return Err(Rejection::GameOver);
        }
        let power_up = self.catalog.get(id).ok_or(Rejection::UnknownId)?;
        if power_up.cost > self.score {
            return Err(Rejection::InsufficientScore {
                cost: power_up.cost,
                available: self.score,
            });
        }
        self.score -= power_up.cost;
        debug!(effect = ?power_up.effect, cost = power_up.cost, "power-up applied");

        let mut hint = None;
        match power_up.effect {
            PowerUpEffect::RevealLetter => {
                let hidden = self.hidden_letters();
                if let Some(&letter) = self.rng.choose(&hidden) {
                    self.guessed.insert(letter);
                    self.reveal(letter);
                }
            }
            PowerUpEffect::ExtraGuess => {
                self.extra_guesses += 1;
            }
            PowerUpEffect::FreezeTime => {
                let duration = power_up.duration_secs.unwrap_or(0);
                match &mut self.freeze {
                    Some(countdown) => countdown.extend(duration),
                    None => self.freeze = Some(Countdown::new(duration)),
                }
            }
            PowerUpEffect::DoublePoints => {
                let duration = power_up.duration_secs.unwrap_or(0);
                self.multiplier = 2;
                match &mut self.double_points {
                    Some(countdown) => countdown.extend(duration),
                    None => self.double_points = Some(Countdown::new(duration)),
                }
            }
            PowerUpEffect::RevealVowels => {
                for letter in self.hidden_letters() {
                    if words::is_vowel(letter) {
                        self.guessed.insert(letter);
                        self.reveal(letter);
                    }
                }
            }
            PowerUpEffect::CategoryHint => {
                self.hint_taken = true;
                hint = Some(self.category.hint());
            }
        }

        let won = self.is_complete();
        if won {
            self.conclude_won();
        }
        Ok(PowerUpOutcome {
            effect: power_up.effect,
            cost: power_up.cost,
            hint,
            won,
        })
    }

    /// Start a fresh game: new category, new word, zeroed economy.
    pub fn restart(&mut self) {
        let mut rng = self.rng.fork();
        let category = words::random_category(&mut rng);
        let word = words::pick_word(category, self.difficulty, &mut rng);
        *self = Self::with_word(self.config, self.difficulty, category, word, rng);
    }

    /// Reveal every occurrence of `letter`, returning how many cells
    /// opened.
    fn reveal(&mut self, letter: char) -> u32 {
        let mut revealed = 0;
        for (i, &c) in self.word.iter().enumerate() {
            if c == letter && self.masked[i] == '_' {
                self.masked[i] = c;
                revealed += 1;
            }
        }
        revealed
    }

    /// Distinct letters of the word still masked.
    fn hidden_letters(&self) -> Vec<char> {
        let mut letters: Vec<char> = self
            .word
            .iter()
            .zip(&self.masked)
            .filter(|(_, &m)| m == '_')
            .map(|(&c, _)| c)
            .collect();
        letters.sort_unstable();
        letters.dedup();
        letters
    }

    fn is_complete(&self) -> bool {
        !self.masked.contains(&'_')
    }

    fn conclude_won(&mut self) {
        let time_bonus = match self.config.time_limit_secs {
            Some(limit) => limit.saturating_sub(self.clock.elapsed_secs()),
            None => 0,
        };
        self.score += time_bonus + self.streak * self.config.streak_bonus;
        debug!(score = self.score, streak = self.streak, "word completed");
        self.phase = WordGuessPhase::Won;
        self.record = Some(self.build_record(TerminalReason::Won));
    }

    fn conclude_lost(&mut self) {
        debug!(wrong = self.wrong.len(), "out of guesses");
        self.phase = WordGuessPhase::Lost;
        self.record = Some(self.build_record(TerminalReason::Lost));
    }

    fn build_record(&self, reason: TerminalReason) -> ScoreRecord {
        ScoreRecord {
            game: GameKind::WordGuess,
            score: self.score,
            moves_or_guesses: self.guessed.len() as u32,
            time_elapsed_ms: self.clock.elapsed_ms(),
            difficulty: self.difficulty,
            terminal_reason: reason,
        }
    }
}

impl Engine for WordGuessEngine {
    type Snapshot = WordGuessSnapshot;

    fn tick(&mut self, delta_secs: u32) {
        if self.phase != WordGuessPhase::Playing {
            return;
        }

        // The double-points window counts down even while time is frozen.
        if let Some(countdown) = &mut self.double_points {
            if countdown.tick(delta_secs) {
                self.double_points = None;
                self.multiplier = 1;
            }
        }

        if let Some(countdown) = &mut self.freeze {
            if countdown.tick(delta_secs) {
                self.freeze = None;
            }
            return;
        }

        self.clock.advance(delta_secs);
        if let Some(limit) = self.config.time_limit_secs {
            if self.clock.elapsed_secs() > limit {
                self.conclude_lost();
            }
        }
    }

    fn snapshot(&self) -> WordGuessSnapshot {
        let mut guessed: Vec<char> = self.guessed.iter().copied().collect();
        guessed.sort_unstable();
        WordGuessSnapshot {
            phase: self.phase,
            category: self.category,
            masked: self.masked.iter().collect(),
            guessed,
            wrong_guesses: self.wrong.iter().copied().collect(),
            remaining_guesses: self.remaining_guesses(),
            score: self.score,
            streak: self.streak,
            multiplier: self.multiplier,
            freeze_secs_remaining: self.freeze.map_or(0, |c| c.remaining_secs()),
            double_secs_remaining: self.double_points.map_or(0, |c| c.remaining_secs()),
            elapsed_secs: self.clock.elapsed_secs(),
            hint: self.hint_taken.then(|| self.category.hint().to_string()),
            word: (self.phase != WordGuessPhase::Playing)
                .then(|| self.word.iter().collect()),
        }
    }

    fn score_record(&self) -> Option<ScoreRecord> {
        self.record.clone()
    }

    fn is_terminal(&self) -> bool {
        self.phase != WordGuessPhase::Playing
    }
}
