//! Signal detection - classifies market events, never decides trades.
//!
//! Signals are ledger-agnostic: they receive indicator values only, never cash
//! or position state. What to do with a signal is the simulator's business.

pub mod crossover;

pub use crossover::{classify, Crossover};
