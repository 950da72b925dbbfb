//! Moving average crossover - golden cross and death cross detection.
//!
//! Golden cross: the fast MA moves from strictly below to strictly above the
//! slow MA. Death cross: the inverse. A tie at either endpoint is not a cross,
//! so flat indicator stretches never chatter.

use serde::{Deserialize, Serialize};

/// Outcome of comparing two consecutive (fast, slow) pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Crossover {
    GoldenCross,
    DeathCross,
    None,
}

impl Crossover {
    pub fn is_signal(&self) -> bool {
        !matches!(self, Crossover::None)
    }
}

/// Classify the step from `(prev_fast, prev_slow)` to `(curr_fast, curr_slow)`.
///
/// Pure and stateless. Any NaN input compares false everywhere and therefore
/// yields `Crossover::None`.
pub fn classify(prev_fast: f64, prev_slow: f64, curr_fast: f64, curr_slow: f64) -> Crossover {
    if prev_fast < prev_slow && curr_fast > curr_slow {
        Crossover::GoldenCross
    } else if prev_fast > prev_slow && curr_fast < curr_slow {
        Crossover::DeathCross
    } else {
        Crossover::None
    }
}
