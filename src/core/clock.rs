//! Game clock and countdown timers.
//!
//! Engines never own a timer. The caller drives time from whatever
//! scheduler it likes (a real one-second interval, a test harness, a
//! simulation loop) by calling the engine's `tick(delta_secs)`, which
//! forwards to these types. Stopping the clock is structural: stop
//! calling `tick` and time stands still.

use serde::{Deserialize, Serialize};

/// Elapsed-time accumulator driven by caller ticks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameClock {
    elapsed_secs: u32,
}

impl GameClock {
    /// Create a clock at zero elapsed time.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by `delta_secs`.
    pub fn advance(&mut self, delta_secs: u32) {
        self.elapsed_secs = self.elapsed_secs.saturating_add(delta_secs);
    }

    /// Total elapsed seconds.
    #[must_use]
    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    /// Elapsed time in milliseconds, for score records.
    #[must_use]
    pub fn elapsed_ms(&self) -> u64 {
        u64::from(self.elapsed_secs) * 1000
    }
}

/// Countdown window for timed effects (freeze, double points) and time
/// limits. Ticks toward zero and reports the moment it expires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    remaining_secs: u32,
}

impl Countdown {
    /// Start a countdown of `secs` seconds.
    #[must_use]
    pub fn new(secs: u32) -> Self {
        Self { remaining_secs: secs }
    }

    /// Seconds left on the countdown.
    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// Whether the countdown has run out.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.remaining_secs == 0
    }

    /// Advance by `delta_secs`. Returns `true` exactly when this tick
    /// brought the countdown to zero.
    pub fn tick(&mut self, delta_secs: u32) -> bool {
        if self.remaining_secs == 0 {
            return false;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(delta_secs);
        self.remaining_secs == 0
    }

    /// Add extra seconds to the window.
    pub fn extend(&mut self, secs: u32) {
        self.remaining_secs = self.remaining_secs.saturating_add(secs);
    }
}
