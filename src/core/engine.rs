//! The uniform engine contract.
//!
//! Every game engine exposes the same shape: construct with a config and
//! a `GameRng`, act through game-specific verbs (`shift`, `flip`,
//! `guess_letter`, ...), observe through an owned snapshot, and conclude
//! through a `ScoreRecord`. This trait captures the shared surface so
//! callers can drive the clock and read results generically.

use serde::Serialize;

use crate::score::ScoreRecord;

/// Shared engine surface.
///
/// Game-specific action verbs live on the concrete types; this trait
/// covers the clock, observation, and conclusion phases of the contract.
pub trait Engine {
    /// Owned, serializable state snapshot. Snapshots share nothing
    /// mutable with engine internals.
    type Snapshot: Serialize + Clone;

    /// Advance the engine's clock by `delta_secs`.
    ///
    /// Drives elapsed time, timed-effect countdowns, and clock-based
    /// eliminations. A no-op once the game is terminal.
    fn tick(&mut self, delta_secs: u32);

    /// Snapshot the current state for rendering.
    fn snapshot(&self) -> Self::Snapshot;

    /// The terminal score record, once the game has concluded.
    ///
    /// Returns `None` while the game is still in play. The record is
    /// computed once at the terminal transition and never changes.
    fn score_record(&self) -> Option<ScoreRecord>;

    /// Whether the game has reached an absorbing terminal phase.
    fn is_terminal(&self) -> bool;
}
