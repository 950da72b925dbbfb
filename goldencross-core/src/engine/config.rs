//! Simulation parameters and input validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::PriceObservation;

/// Default fast moving-average window (days).
pub const DEFAULT_FAST_WINDOW: usize = 50;
/// Default slow moving-average window (days).
pub const DEFAULT_SLOW_WINDOW: usize = 200;
/// Default starting budget.
pub const DEFAULT_INITIAL_BUDGET: f64 = 5000.0;

/// Problems with the caller's input, detected before any simulation step.
///
/// These are reported, never repaired: a refused run must not look like a run
/// that simply found no trades.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("price series is empty")]
    EmptySeries,

    #[error("price series has {len} observations, at least {required} are needed for the slow window")]
    InsufficientData { len: usize, required: usize },

    #[error("moving-average window must be positive (got {window})")]
    InvalidWindow { window: usize },

    #[error("fast window ({fast}) must be shorter than slow window ({slow})")]
    WindowOrder { fast: usize, slow: usize },

    #[error("initial budget must be a positive amount (got {budget})")]
    InvalidBudget { budget: f64 },

    #[error("invalid closing price {price} at index {index}")]
    InvalidPrice { index: usize, price: f64 },

    #[error("timestamps are not strictly increasing at index {index}")]
    UnorderedTimestamps { index: usize },
}

/// Parameters of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub initial_budget: f64,
    pub fast_window: usize,
    pub slow_window: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_budget: DEFAULT_INITIAL_BUDGET,
            fast_window: DEFAULT_FAST_WINDOW,
            slow_window: DEFAULT_SLOW_WINDOW,
        }
    }
}

impl SimulationConfig {
    pub fn new(initial_budget: f64, fast_window: usize, slow_window: usize) -> Self {
        Self {
            initial_budget,
            fast_window,
            slow_window,
        }
    }

    /// Check the parameters on their own, independent of any series.
    pub fn validate(&self) -> Result<(), InputError> {
        if !self.initial_budget.is_finite() || self.initial_budget <= 0.0 {
            return Err(InputError::InvalidBudget {
                budget: self.initial_budget,
            });
        }
        for window in [self.fast_window, self.slow_window] {
            if window == 0 {
                return Err(InputError::InvalidWindow { window });
            }
        }
        if self.fast_window >= self.slow_window {
            return Err(InputError::WindowOrder {
                fast: self.fast_window,
                slow: self.slow_window,
            });
        }
        Ok(())
    }
}

/// Check the simulator's input preconditions.
///
/// The series must be non-empty, at least as long as the slow window, carry
/// only finite positive closes, and have strictly increasing dates.
pub fn validate_series(
    observations: &[PriceObservation],
    config: &SimulationConfig,
) -> Result<(), InputError> {
    config.validate()?;

    if observations.is_empty() {
        return Err(InputError::EmptySeries);
    }
    if observations.len() < config.slow_window {
        return Err(InputError::InsufficientData {
            len: observations.len(),
            required: config.slow_window,
        });
    }

    for (index, obs) in observations.iter().enumerate() {
        if !obs.is_valid() {
            return Err(InputError::InvalidPrice {
                index,
                price: obs.close,
            });
        }
    }

    if let Some(index) = observations
        .windows(2)
        .position(|pair| pair[1].date <= pair[0].date)
    {
        return Err(InputError::UnorderedTimestamps { index: index + 1 });
    }

    Ok(())
}
