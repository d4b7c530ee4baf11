//! Word tables, categories, and letter weights.
//!
//! Words are grouped by category and difficulty tier: Easy words are four
//! letters or fewer, Medium five to seven, Hard eight or more. Selection
//! is uniform via `GameRng`.
//!
//! Letter rewards are weighted by English letter frequency: common
//! letters are worth less, rare letters more, so efficient guessing beats
//! a brute alphabetic sweep.

use serde::{Deserialize, Serialize};

use crate::core::{Difficulty, GameRng};

/// Word category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Animals,
    Food,
    Science,
    Places,
}

impl Category {
    /// All categories.
    #[must_use]
    pub const fn all() -> [Category; 4] {
        [Category::Animals, Category::Food, Category::Science, Category::Places]
    }

    /// The category-level hint surfaced by the hint power-up.
    #[must_use]
    pub const fn hint(self) -> &'static str {
        match self {
            Category::Animals => "A creature from the animal kingdom",
            Category::Food => "Something you could find on a menu",
            Category::Science => "A term from the science classroom",
            Category::Places => "Somewhere you could visit",
        }
    }

    /// The word list for a difficulty tier.
    #[must_use]
    pub const fn words(self, difficulty: Difficulty) -> &'static [&'static str] {
        match (self, difficulty) {
            (Category::Animals, Difficulty::Easy) => &["CAT", "DOG", "FOX", "OWL", "BEE"],
            (Category::Animals, Difficulty::Medium) => {
                &["RABBIT", "DONKEY", "FALCON", "MONKEY", "BEAVER"]
            }
            (Category::Animals, Difficulty::Hard) => {
                &["CROCODILE", "PORCUPINE", "RHINOCEROS", "FLAMINGO"]
            }
            (Category::Food, Difficulty::Easy) => &["PIE", "RICE", "TACO", "EGG", "CORN"],
            (Category::Food, Difficulty::Medium) => {
                &["WAFFLE", "NOODLE", "BURGER", "TOMATO", "PICKLE"]
            }
            (Category::Food, Difficulty::Hard) => {
                &["SPAGHETTI", "CROISSANT", "MOZZARELLA", "DUMPLINGS"]
            }
            (Category::Science, Difficulty::Easy) => &["ATOM", "CELL", "GENE", "ION", "ORE"],
            (Category::Science, Difficulty::Medium) => {
                &["PLASMA", "GRAVITY", "QUANTUM", "ENZYME", "NEBULA"]
            }
            (Category::Science, Difficulty::Hard) => {
                &["MOLECULES", "TELESCOPE", "CHEMISTRY", "EVOLUTION"]
            }
            (Category::Places, Difficulty::Easy) => &["CITY", "LAKE", "PARK", "CAVE", "BAY"],
            (Category::Places, Difficulty::Medium) => {
                &["ISLAND", "DESERT", "HARBOR", "CANYON", "VALLEY"]
            }
            (Category::Places, Difficulty::Hard) => {
                &["MOUNTAINS", "PENINSULA", "WATERFALL", "CATHEDRAL"]
            }
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Animals => write!(f, "Animals"),
            Category::Food => write!(f, "Food"),
            Category::Science => write!(f, "Science"),
            Category::Places => write!(f, "Places"),
        }
    }
}

/// Pick a random category.
#[must_use]
pub fn random_category(rng: &mut GameRng) -> Category {
    let all = Category::all();
    all[rng.gen_range_usize(0..all.len())]
}

/// Pick a random word from a category at a difficulty tier.
#[must_use]
pub fn pick_word(category: Category, difficulty: Difficulty, rng: &mut GameRng) -> &'static str {
    let words = category.words(difficulty);
    words[rng.gen_range_usize(0..words.len())]
}

/// Frequency weight of an uppercase letter, 1 (most common) to 10
/// (rarest).
#[must_use]
pub fn letter_weight(letter: char) -> u32 {
    match letter {
        'E' | 'A' | 'I' | 'O' | 'N' | 'R' | 'T' | 'L' | 'S' | 'U' => 1,
        'D' | 'G' => 2,
        'B' | 'C' | 'M' | 'P' => 3,
        'F' | 'H' | 'V' | 'W' | 'Y' => 4,
        'K' => 5,
        'J' | 'X' => 8,
        'Q' | 'Z' => 10,
        _ => 0,
    }
}

/// Whether a letter is a vowel.
#[must_use]
pub fn is_vowel(letter: char) -> bool {
    matches!(letter, 'A' | 'E' | 'I' | 'O' | 'U')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_lengths_match_tier() {
        for category in Category::all() {
            for word in category.words(Difficulty::Easy) {
                assert!(word.len() <= 4, "{word} too long for Easy");
            }
            for word in category.words(Difficulty::Medium) {
                assert!((5..=7).contains(&word.len()), "{word} wrong length for Medium");
            }
            for word in category.words(Difficulty::Hard) {
                assert!(word.len() >= 8, "{word} too short for Hard");
            }
        }
    }

    #[test]
    fn test_words_are_uppercase_ascii() {
        for category in Category::all() {
            for difficulty in Difficulty::all() {
                for word in category.words(difficulty) {
                    assert!(word.chars().all(|c| c.is_ascii_uppercase()));
                }
            }
        }
    }

    #[test]
    fn test_letter_weight_ordering() {
        assert_eq!(letter_weight('E'), 1);
        assert_eq!(letter_weight('D'), 2);
        assert_eq!(letter_weight('K'), 5);
        assert_eq!(letter_weight('Q'), 10);
        assert!(letter_weight('Z') > letter_weight('E'));
        assert_eq!(letter_weight('3'), 0);
    }

    #[test]
    fn test_every_letter_has_a_weight() {
        for letter in 'A'..='Z' {
            assert!(letter_weight(letter) >= 1, "{letter} missing a weight");
        }
    }

    #[test]
    fn test_pick_word_is_deterministic() {
        let mut rng1 = GameRng::new(9);
        let mut rng2 = GameRng::new(9);
        assert_eq!(
            pick_word(Category::Animals, Difficulty::Easy, &mut rng1),
            pick_word(Category::Animals, Difficulty::Easy, &mut rng2)
        );
    }

    #[test]
    fn test_vowels() {
        assert!(is_vowel('A'));
        assert!(is_vowel('U'));
        assert!(!is_vowel('T'));
    }
}
