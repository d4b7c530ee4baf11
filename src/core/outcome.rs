//! Expected action rejections.
//!
//! There is no exception-style control flow in the engines. Every action
//! returns `Result<T, Rejection>`; a `Rejection` is an expected branch
//! (repeat guess, flip of a matched card, move into a wall, any action
//! after a terminal phase), never a fault. Rejections carry no state
//! change: an action either fully applies or leaves the engine untouched.

use serde::{Deserialize, Serialize};

/// Why an action was rejected without effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rejection {
    /// The game has reached an absorbing terminal phase.
    GameOver,
    /// The letter was already tried this game.
    AlreadyGuessed(char),
    /// The card is already face-up or matched.
    CardUnavailable,
    /// No card/power-up with that id exists.
    UnknownId,
    /// Destination cell is a wall or outside the maze.
    Blocked,
    /// Power-up cost exceeds the current score. No debit occurred.
    InsufficientScore { cost: u32, available: u32 },
    /// The guessed character is not a letter.
    NotALetter(char),
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::GameOver => write!(f, "The game is over"),
            Rejection::AlreadyGuessed(letter) => {
                write!(f, "Letter '{letter}' was already guessed")
            }
            Rejection::CardUnavailable => write!(f, "That card cannot be flipped"),
            Rejection::UnknownId => write!(f, "No such id"),
            Rejection::Blocked => write!(f, "Blocked by a wall"),
            Rejection::InsufficientScore { cost, available } => {
                write!(f, "Costs {cost} points but only {available} available")
            }
            Rejection::NotALetter(c) => write!(f, "'{c}' is not a letter"),
        }
    }
}
