//! GoldenCross Core - price series, moving averages, crossover detection, ledger, simulator.
//!
//! This crate contains the backtesting engine:
//! - Domain types (price observations, trade records)
//! - Trailing simple moving averages, computed once before the walk
//! - Pure golden/death cross classification
//! - Single-position ledger that owns cash and share count for one run
//! - Forward-pass simulator with mandatory end-of-horizon liquidation
//! - Data providers (Yahoo, CSV, synthetic) and upstream cleaning

pub mod data;
pub mod domain;
pub mod engine;
pub mod indicators;
pub mod ledger;
pub mod signal;

pub use domain::{PriceObservation, TradeAction, TradeRecord};
pub use engine::{
    InputError, NoopObserver, SimulationConfig, SimulationError, SimulationObserver,
    SimulationResult, Simulator, TracingObserver,
};
pub use indicators::{compute_trailing_average, IndicatorError, IndicatorFrame};
pub use ledger::{Ledger, LedgerError, SimulationState};
pub use signal::{classify, Crossover};
