//! PriceObservation - the fundamental market data unit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Closing price for a single instrument on a single day.
///
/// A series of these is the simulator's only market input. It must be ordered
/// by strictly increasing date with no gaps already filled upstream; the
/// simulator validates this and refuses to run otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceObservation {
    pub date: NaiveDate,
    pub close: f64,
}

impl PriceObservation {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }

    /// A tradable close is finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.close.is_finite() && self.close > 0.0
    }
}

/// Extract the close column from a series.
pub fn closes(observations: &[PriceObservation]) -> Vec<f64> {
    observations.iter().map(|o| o.close).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn positive_close_is_valid() {
        assert!(PriceObservation::new(day(2), 103.0).is_valid());
    }

    #[test]
    fn zero_negative_and_nan_are_invalid() {
        assert!(!PriceObservation::new(day(2), 0.0).is_valid());
        assert!(!PriceObservation::new(day(2), -1.0).is_valid());
        assert!(!PriceObservation::new(day(2), f64::NAN).is_valid());
        assert!(!PriceObservation::new(day(2), f64::INFINITY).is_valid());
    }

    #[test]
    fn closes_preserves_order() {
        let obs = vec![
            PriceObservation::new(day(2), 1.0),
            PriceObservation::new(day(3), 2.0),
            PriceObservation::new(day(4), 3.0),
        ];
        assert_eq!(closes(&obs), vec![1.0, 2.0, 3.0]);
    }
}
