//! The four game engines.
//!
//! Each game lives in its own module with its own config, phase enum,
//! action verbs, and snapshot type, and implements the shared [`Engine`]
//! trait from `core`.
//!
//! - `sliding`: sliding-merge number puzzle on a square board
//! - `maze`: procedural maze generation and navigation
//! - `matchpair`: pair-matching memory game with elimination limits
//! - `wordguess`: hangman-style word game with a power-up economy
//!
//! [`Engine`]: crate::core::Engine

pub mod matchpair;
pub mod maze;
pub mod sliding;
pub mod wordguess;
