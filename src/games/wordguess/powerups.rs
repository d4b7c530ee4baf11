//! Power-up catalog for the word-guess economy.
//!
//! Power-ups cost points from the same currency as the score. Applying
//! one is an atomic debit-then-effect: the engine verifies the score
//! covers the cost before any effect happens, so a failed purchase
//! changes nothing. Freeze and double-points carry a duration and revert
//! automatically when their countdown expires.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Power-up identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PowerUpId(pub u32);

impl PowerUpId {
    /// Create a power-up id.
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

/// What a power-up does when applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpEffect {
    /// Reveal one random unrevealed letter and all its occurrences.
    RevealLetter,
    /// Grant one extra wrong-guess allowance.
    ExtraGuess,
    /// Stop the elapsed-time clock for the duration.
    FreezeTime,
    /// Double letter-guess rewards for the duration.
    DoublePoints,
    /// Reveal every vowel present in the word.
    RevealVowels,
    /// Surface the category-level hint string.
    CategoryHint,
}

/// A purchasable power-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: PowerUpId,
    pub effect: PowerUpEffect,
    /// Cost in score points.
    pub cost: u32,
    /// Countdown length for timed effects, `None` for instant ones.
    pub duration_secs: Option<u32>,
}

/// The fixed catalog of purchasable power-ups.
#[derive(Clone, Debug)]
pub struct PowerUpCatalog {
    entries: FxHashMap<PowerUpId, PowerUp>,
}

impl PowerUpCatalog {
    /// The standard six-entry catalog.
    #[must_use]
    pub fn standard() -> Self {
        let list = [
            PowerUp {
                id: PowerUpId(0),
                effect: PowerUpEffect::RevealLetter,
                cost: 50,
                duration_secs: None,
            },
            PowerUp {
                id: PowerUpId(1),
                effect: PowerUpEffect::ExtraGuess,
                cost: 75,
                duration_secs: None,
            },
            PowerUp {
                id: PowerUpId(2),
                effect: PowerUpEffect::FreezeTime,
                cost: 60,
                duration_secs: Some(15),
            },
            PowerUp {
                id: PowerUpId(3),
                effect: PowerUpEffect::DoublePoints,
                cost: 80,
                duration_secs: Some(20),
            },
            PowerUp {
                id: PowerUpId(4),
                effect: PowerUpEffect::RevealVowels,
                cost: 100,
                duration_secs: None,
            },
            PowerUp {
                id: PowerUpId(5),
                effect: PowerUpEffect::CategoryHint,
                cost: 30,
                duration_secs: None,
            },
        ];
        Self {
            entries: list.into_iter().map(|p| (p.id, p)).collect(),
        }
    }

    /// Look up a power-up by id.
    #[must_use]
    pub fn get(&self, id: PowerUpId) -> Option<PowerUp> {
        self.entries.get(&id).copied()
    }

    /// All catalog entries, in id order.
    #[must_use]
    pub fn all(&self) -> Vec<PowerUp> {
        let mut list: Vec<PowerUp> = self.entries.values().copied().collect();
        list.sort_by_key(|p| p.id.raw());
        list
    }
}

impl Default for PowerUpCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
