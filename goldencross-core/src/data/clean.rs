//! Cleaning - raw provider bars to the simulator's observation series.
//!
//! Steps, in order:
//! 1. Sort by date
//! 2. Drop duplicate dates (first occurrence wins)
//! 3. Forward-fill missing/invalid closes from the last valid one
//! 4. Drop leading bars that have nothing to fill from
//!
//! The output has strictly increasing dates and only finite, positive closes.

use serde::{Deserialize, Serialize};

use super::provider::RawBar;
use crate::domain::PriceObservation;

/// Which raw column becomes the observation's close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceField {
    Close,
    /// Split/dividend-adjusted close; falls back to the raw close when absent.
    #[default]
    AdjClose,
}

impl PriceField {
    fn pick(&self, bar: &RawBar) -> f64 {
        match self {
            PriceField::Close => bar.close,
            PriceField::AdjClose if valid(bar.adj_close) => bar.adj_close,
            PriceField::AdjClose => bar.close,
        }
    }
}

/// What cleaning changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningReport {
    pub input_bars: usize,
    pub duplicates_removed: usize,
    pub forward_filled: usize,
    pub leading_dropped: usize,
}

impl CleaningReport {
    /// True if the provider's data was used as-is.
    pub fn is_untouched(&self) -> bool {
        self.duplicates_removed == 0 && self.forward_filled == 0 && self.leading_dropped == 0
    }
}

/// Cleaned observations plus the report of what was repaired.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedSeries {
    pub observations: Vec<PriceObservation>,
    pub report: CleaningReport,
}

fn valid(price: f64) -> bool {
    price.is_finite() && price > 0.0
}

/// Clean raw bars into an observation series.
pub fn clean_bars(mut bars: Vec<RawBar>, field: PriceField) -> CleanedSeries {
    let mut report = CleaningReport {
        input_bars: bars.len(),
        ..CleaningReport::default()
    };

    // Stable sort keeps the provider's first occurrence ahead of later duplicates.
    bars.sort_by_key(|b| b.date);
    let before = bars.len();
    bars.dedup_by_key(|b| b.date);
    report.duplicates_removed = before - bars.len();

    let mut observations = Vec::with_capacity(bars.len());
    let mut last_valid: Option<f64> = None;

    for bar in &bars {
        let price = field.pick(bar);
        let close = if valid(price) {
            price
        } else if let Some(prev) = last_valid {
            report.forward_filled += 1;
            prev
        } else {
            report.leading_dropped += 1;
            continue;
        };
        last_valid = Some(close);
        observations.push(PriceObservation::new(bar.date, close));
    }

    if !report.is_untouched() {
        tracing::warn!(
            duplicates = report.duplicates_removed,
            filled = report.forward_filled,
            dropped = report.leading_dropped,
            "price series repaired during cleaning"
        );
    }

    CleanedSeries {
        observations,
        report,
    }
}
