//! Word-guess integration tests.
//!
//! These tests exercise the guess loop and the power-up economy:
//! - A scripted perfect game on a fixed word
//! - Random-word games driven to a terminal phase
//! - Power-up purchases, timed effects, and the score floor
//! - Monotonic growth of the guessed-letter set

use arcade_core::games::wordguess::{
    Category, GuessOutcome, PowerUpId, WordGuessConfig, WordGuessEngine, WordGuessPhase,
};
use arcade_core::score::TerminalReason;
use arcade_core::{Difficulty, Engine, GameRng, Rejection};

use proptest::prelude::*;

fn cat_engine() -> WordGuessEngine {
    WordGuessEngine::with_word(
        WordGuessConfig::for_difficulty(Difficulty::Easy),
        Difficulty::Easy,
        Category::Animals,
        "CAT",
        GameRng::new(42),
    )
}

/// Guessing C, A, T in order wins with zero wrong guesses; the mask fills
/// in as letters land and the word is revealed at the end.
#[test]
fn test_perfect_cat_game() {
    let mut engine = cat_engine();

    engine.guess_letter('C').unwrap();
    assert_eq!(engine.snapshot().masked, "C__");
    engine.guess_letter('A').unwrap();
    assert_eq!(engine.snapshot().masked, "CA_");
    let outcome = engine.guess_letter('T').unwrap();

    assert!(matches!(outcome, GuessOutcome::Correct { won: true, .. }));
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.phase, WordGuessPhase::Won);
    assert!(snapshot.wrong_guesses.is_empty());
    assert_eq!(snapshot.word.as_deref(), Some("CAT"));
    assert_eq!(
        engine.score_record().expect("win produces a record").terminal_reason,
        TerminalReason::Won
    );
}

/// Sweeping the alphabet always drives a random-word game to a terminal
/// phase, and the secret word stays hidden until it gets there.
#[test]
fn test_alphabet_sweep_terminates() {
    for seed in 0..10 {
        let mut engine = WordGuessEngine::new(Difficulty::Easy, GameRng::new(seed));
        assert!(engine.snapshot().word.is_none());

        for letter in 'A'..='Z' {
            if engine.is_terminal() {
                break;
            }
            let _ = engine.guess_letter(letter);
        }

        assert!(engine.is_terminal());
        let snapshot = engine.snapshot();
        let word = snapshot.word.expect("terminal snapshot reveals the word");
        if snapshot.phase == WordGuessPhase::Won {
            assert_eq!(snapshot.masked, word);
        }
    }
}

/// On the hard tier four wrong guesses lose the game.
#[test]
fn test_hard_tier_wrong_guess_budget() {
    let mut engine = WordGuessEngine::with_word(
        WordGuessConfig::for_difficulty(Difficulty::Hard),
        Difficulty::Hard,
        Category::Food,
        "SPAGHETTI",
        GameRng::new(1),
    );

    for letter in ['X', 'Z', 'Q', 'J'] {
        engine.guess_letter(letter).unwrap();
    }
    assert_eq!(engine.phase(), WordGuessPhase::Lost);
    assert_eq!(engine.remaining_guesses(), 0);
    assert_eq!(engine.guess_letter('S'), Err(Rejection::GameOver));
}

/// A failed purchase changes nothing; a successful one debits exactly the
/// cost and the score never goes negative at exact cost.
#[test]
fn test_power_up_economy() {
    let mut engine = cat_engine();
    assert!(matches!(
        engine.use_power_up(PowerUpId::new(4)),
        Err(Rejection::InsufficientScore { cost: 100, available: 0 })
    ));

    // C (weight 3) and A (weight 1) at scale 5 earn 20 points.
    engine.guess_letter('C').unwrap();
    engine.guess_letter('A').unwrap();
    assert_eq!(engine.score(), 20);

    assert!(matches!(
        engine.use_power_up(PowerUpId::new(99)),
        Err(Rejection::UnknownId)
    ));
    assert!(matches!(
        engine.use_power_up(PowerUpId::new(0)),
        Err(Rejection::InsufficientScore { cost: 50, available: 20 })
    ));
    assert_eq!(engine.score(), 20);
}

/// The category hint costs 30 and surfaces the hint in later snapshots.
#[test]
fn test_category_hint() {
    let mut engine = WordGuessEngine::with_word(
        WordGuessConfig::for_difficulty(Difficulty::Medium),
        Difficulty::Medium,
        Category::Science,
        "QUANTUM",
        GameRng::new(2),
    );
    // Q is worth 10 * 5 = 50 points.
    engine.guess_letter('Q').unwrap();
    assert_eq!(engine.score(), 50);

    let outcome = engine.use_power_up(PowerUpId::new(5)).unwrap();
    assert_eq!(outcome.hint, Some(Category::Science.hint()));
    assert_eq!(engine.score(), 20);
    assert_eq!(
        engine.snapshot().hint.as_deref(),
        Some(Category::Science.hint())
    );
}

/// Double points boosts rewards for its window and reverts when the
/// countdown expires, while the game clock keeps running underneath.
#[test]
fn test_double_points_window() {
    let mut engine = WordGuessEngine::with_word(
        WordGuessConfig::for_difficulty(Difficulty::Medium),
        Difficulty::Medium,
        Category::Science,
        "QUANTUM",
        GameRng::new(3),
    );
    // Q 50, U 10 (two occurrences), N 5, M 15.
    for letter in ['Q', 'U', 'N', 'M'] {
        engine.guess_letter(letter).unwrap();
    }
    assert_eq!(engine.score(), 80);

    engine.use_power_up(PowerUpId::new(3)).unwrap();
    assert_eq!(engine.snapshot().multiplier, 2);

    let GuessOutcome::Correct { points, .. } = engine.guess_letter('A').unwrap() else {
        panic!("A is in QUANTUM");
    };
    assert_eq!(points, 10); // weight 1 * scale 5 * doubled

    engine.tick(20);
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.multiplier, 1);
    assert_eq!(snapshot.double_secs_remaining, 0);
    assert_eq!(snapshot.elapsed_secs, 20);

    let GuessOutcome::Correct { points, won, .. } = engine.guess_letter('T').unwrap() else {
        panic!("T is in QUANTUM");
    };
    assert_eq!(points, 5); // back to single rate
    assert!(won);
}

proptest! {
    /// The guessed-letter set only grows, remaining guesses only shrink,
    /// and the mask never loses a revealed letter.
    #[test]
    fn prop_guessed_letters_grow_monotonically(
        seed in any::<u64>(),
        letters in proptest::collection::vec(proptest::char::range('A', 'Z'), 1..40),
    ) {
        let mut engine = WordGuessEngine::new(Difficulty::Easy, GameRng::new(seed));
        let mut last_guessed = 0;
        let mut last_remaining = engine.remaining_guesses();
        let mut last_mask: Vec<char> = engine.snapshot().masked.chars().collect();

        for letter in letters {
            let _ = engine.guess_letter(letter);
            let snapshot = engine.snapshot();

            prop_assert!(snapshot.guessed.len() >= last_guessed);
            prop_assert!(snapshot.remaining_guesses <= last_remaining);

            let mask: Vec<char> = snapshot.masked.chars().collect();
            for (old, new) in last_mask.iter().zip(&mask) {
                if *old != '_' {
                    prop_assert_eq!(old, new);
                }
            }

            last_guessed = snapshot.guessed.len();
            last_remaining = snapshot.remaining_guesses;
            last_mask = mask;
            if engine.is_terminal() {
                break;
            }
        }
    }
}
