//! Moving-average indicators.
//!
//! Both windows are precomputed once before the simulator walks the series and
//! are carried alongside each observation in an `IndicatorFrame`. The frame is
//! also what the chart overlays, so chart and simulation never disagree.

pub mod sma;

pub use sma::compute_trailing_average;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::observation::{closes, PriceObservation};

/// Errors from indicator computation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndicatorError {
    #[error("invalid moving-average window {window} for a series of {len} observations")]
    InvalidWindow { window: usize, len: usize },
}

/// One observation with both moving averages (absent during warmup).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameRow {
    pub date: NaiveDate,
    pub close: f64,
    pub fast: Option<f64>,
    pub slow: Option<f64>,
}

/// A row where both averages are defined - the only rows the simulator evaluates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefinedRow {
    pub date: NaiveDate,
    pub close: f64,
    pub fast: f64,
    pub slow: f64,
}

/// Price series aligned with its fast and slow trailing averages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorFrame {
    pub fast_window: usize,
    pub slow_window: usize,
    pub rows: Vec<FrameRow>,
}

impl IndicatorFrame {
    /// Compute both averages over the same series.
    ///
    /// The two windows are independent, so they run in parallel; both must
    /// finish before the frame exists.
    pub fn compute(
        observations: &[PriceObservation],
        fast_window: usize,
        slow_window: usize,
    ) -> Result<Self, IndicatorError> {
        let prices = closes(observations);
        let (fast, slow) = rayon::join(
            || compute_trailing_average(&prices, fast_window),
            || compute_trailing_average(&prices, slow_window),
        );
        let (fast, slow) = (fast?, slow?);

        let rows = observations
            .iter()
            .zip(fast)
            .zip(slow)
            .map(|((obs, fast), slow)| FrameRow {
                date: obs.date,
                close: obs.close,
                fast,
                slow,
            })
            .collect();

        Ok(Self {
            fast_window,
            slow_window,
            rows,
        })
    }

    /// Build a frame from precomputed rows (replayed artifacts, tests).
    pub fn from_rows(fast_window: usize, slow_window: usize, rows: Vec<FrameRow>) -> Self {
        Self {
            fast_window,
            slow_window,
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows where both averages are defined, in series order.
    pub fn defined_rows(&self) -> Vec<DefinedRow> {
        self.rows
            .iter()
            .filter_map(|r| match (r.fast, r.slow) {
                (Some(fast), Some(slow)) => Some(DefinedRow {
                    date: r.date,
                    close: r.close,
                    fast,
                    slow,
                }),
                _ => None,
            })
            .collect()
    }

    /// Last observation of the series, defined or not.
    pub fn last(&self) -> Option<&FrameRow> {
        self.rows.last()
    }
}

/// Build a daily observation series from close prices for testing.
#[cfg(test)]
pub fn make_observations(closes: &[f64]) -> Vec<PriceObservation> {
    let base_date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PriceObservation {
            date: base_date + chrono::Duration::days(i as i64),
            close,
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
