//! Monotonic request-counter tick.
//!
//! The core has no clock. Every "when" is expressed as a tick of a counter
//! the surrounding orchestration layer advances on each state-changing call.
//! Liveness monitoring (requests open "too long") is the orchestrator's job;
//! the core only records the tick a request was opened at.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point on the core's monotonic request counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Tick(u64);

impl Tick {
    /// The counter origin.
    pub const ZERO: Self = Self(0);

    pub fn new(count: u64) -> Self {
        Self(count)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Ticks elapsed since this tick (relative to `now`).
    pub fn elapsed_since(&self, now: Tick) -> u64 {
        now.0.saturating_sub(self.0)
    }

    /// The next tick.
    pub fn next(&self) -> Tick {
        Tick(self.0.saturating_add(1))
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
