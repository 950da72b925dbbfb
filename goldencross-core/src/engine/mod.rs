//! Strategy simulation engine - the single forward pass over an indicator frame.
//!
//! The engine consumes a cleaned price series, precomputes both moving
//! averages, then walks adjacent pairs of fully-defined rows:
//!
//! 1. Classify the (prev, curr) pair as golden cross, death cross, or nothing
//! 2. Golden cross while flat: full-budget buy (skipped if unaffordable)
//! 3. Death cross while long: full-position sell
//! 4. After the pass: force-sell any open position at the last close

pub mod config;
pub mod observer;
pub mod simulator;

pub use config::{validate_series, InputError, SimulationConfig};
pub use observer::{NoopObserver, SimulationObserver, TracingObserver};
pub use simulator::{SimulationError, SimulationResult, Simulator};
