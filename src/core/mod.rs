//! Shared primitives: grid coordinates, RNG, clock, difficulty, and the
//! uniform engine contract.
//!
//! These are the leaves of the crate; every game engine depends only on
//! this module and `score`.

pub mod clock;
pub mod difficulty;
pub mod engine;
pub mod grid;
pub mod outcome;
pub mod rng;

pub use clock::{Countdown, GameClock};
pub use difficulty::Difficulty;
pub use engine::Engine;
pub use grid::{Direction, Grid, Position};
pub use outcome::Rejection;
pub use rng::GameRng;
