//! Chart model - price line, both moving averages, and trade markers.
//!
//! X coordinates are row indices into the cleaned series, so every line and
//! marker shares one axis regardless of weekends and holidays. Renderers map
//! indices back to dates with `date_at`.

use chrono::NaiveDate;

use goldencross_core::{TradeAction, TradeRecord};

use crate::runner::BacktestResult;

/// A buy or sell marker on the price line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub x: f64,
    pub price: f64,
    pub date: NaiveDate,
    pub action: TradeAction,
}

/// Everything needed to draw one run.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartModel {
    pub title: String,
    pub fast_label: String,
    pub slow_label: String,
    pub dates: Vec<NaiveDate>,
    pub price: Vec<(f64, f64)>,
    /// Only where the average is defined.
    pub fast: Vec<(f64, f64)>,
    pub slow: Vec<(f64, f64)>,
    pub buys: Vec<Marker>,
    /// Sells and force-sells.
    pub sells: Vec<Marker>,
}

impl ChartModel {
    pub fn from_result(result: &BacktestResult) -> Self {
        let dates: Vec<NaiveDate> = result.series.iter().map(|r| r.date).collect();

        let mut price = Vec::with_capacity(result.series.len());
        let mut fast = Vec::with_capacity(result.series.len());
        let mut slow = Vec::with_capacity(result.series.len());
        for (i, row) in result.series.iter().enumerate() {
            let x = i as f64;
            price.push((x, row.close));
            if let Some(v) = row.fast {
                fast.push((x, v));
            }
            if let Some(v) = row.slow {
                slow.push((x, v));
            }
        }

        let (sells, buys): (Vec<Marker>, Vec<Marker>) = result
            .simulation
            .trades
            .iter()
            .filter_map(|t| marker(&dates, t))
            .partition(|m| m.action.is_exit());

        Self {
            title: format!("Golden Cross Trading Strategy for {}", result.symbol),
            fast_label: format!("{}-Day MA", result.fast_window),
            slow_label: format!("{}-Day MA", result.slow_window),
            dates,
            price,
            fast,
            slow,
            buys,
            sells,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.price.is_empty()
    }

    /// `[0, last index]`, never a zero-width range.
    pub fn x_bounds(&self) -> [f64; 2] {
        [0.0, (self.price.len().saturating_sub(1)).max(1) as f64]
    }

    /// Min/max over every line and marker, padded by 5% on both sides.
    pub fn y_bounds(&self) -> [f64; 2] {
        let values = self
            .price
            .iter()
            .chain(&self.fast)
            .chain(&self.slow)
            .map(|&(_, y)| y)
            .chain(self.buys.iter().chain(&self.sells).map(|m| m.price));

        let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
            (lo.min(y), hi.max(y))
        });
        if !lo.is_finite() || !hi.is_finite() {
            return [0.0, 1.0];
        }
        let pad = ((hi - lo) * 0.05).max(hi.abs() * 0.01).max(f64::EPSILON);
        [lo - pad, hi + pad]
    }

    /// Date at a (possibly fractional) x coordinate, clamped to the series.
    pub fn date_at(&self, x: f64) -> Option<NaiveDate> {
        if self.dates.is_empty() {
            return None;
        }
        let idx = (x.max(0.0).round() as usize).min(self.dates.len() - 1);
        self.dates.get(idx).copied()
    }
}

fn marker(dates: &[NaiveDate], trade: &TradeRecord) -> Option<Marker> {
    let idx = dates.binary_search(&trade.date).ok()?;
    Some(Marker {
        x: idx as f64,
        price: trade.price,
        date: trade.date,
        action: trade.action,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use goldencross_core::data::{CleaningReport, DataSource};
    use goldencross_core::indicators::FrameRow;
    use goldencross_core::SimulationResult;

    fn day(i: usize) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 2).unwrap() + chrono::Duration::days(i as i64)
    }

    fn sample() -> BacktestResult {
        let series = (0..5)
            .map(|i| FrameRow {
                date: day(i),
                close: 10.0 + i as f64,
                fast: (i >= 1).then_some(10.0 + i as f64 - 0.5),
                slow: (i >= 2).then_some(10.0 + i as f64 - 1.0),
            })
            .collect();
        let trades = vec![
            TradeRecord {
                date: day(2),
                action: TradeAction::Buy,
                shares: 10,
                price: 12.0,
            },
            TradeRecord {
                date: day(4),
                action: TradeAction::ForceSell,
                shares: 10,
                price: 14.0,
            },
        ];
        BacktestResult {
            schema_version: crate::runner::SCHEMA_VERSION,
            symbol: "AMZN".into(),
            start_date: day(0),
            end_date: day(4),
            source: DataSource::Synthetic,
            dataset_hash: String::new(),
            cleaning: CleaningReport::default(),
            fast_window: 2,
            slow_window: 3,
            simulation: SimulationResult {
                initial_budget: 125.0,
                final_cash: 145.0,
                trades,
                signal_count: 1,
                evaluated_steps: 2,
            },
            series,
        }
    }

    #[test]
    fn lines_skip_undefined_averages() {
        let chart = ChartModel::from_result(&sample());
        assert_eq!(chart.price.len(), 5);
        assert_eq!(chart.fast.len(), 4);
        assert_eq!(chart.slow.len(), 3);
        assert_eq!(chart.slow[0], (2.0, 11.0));
        assert_eq!(chart.fast_label, "2-Day MA");
        assert_eq!(chart.title, "Golden Cross Trading Strategy for AMZN");
    }

    #[test]
    fn markers_split_buys_from_exits() {
        let chart = ChartModel::from_result(&sample());
        assert_eq!(chart.buys.len(), 1);
        assert_eq!(chart.buys[0].x, 2.0);
        assert_eq!(chart.sells.len(), 1);
        assert_eq!(chart.sells[0].action, TradeAction::ForceSell);
        assert_eq!(chart.sells[0].x, 4.0);
    }

    #[test]
    fn bounds_cover_everything_with_padding() {
        let chart = ChartModel::from_result(&sample());
        assert_eq!(chart.x_bounds(), [0.0, 4.0]);
        let [lo, hi] = chart.y_bounds();
        assert!(lo < 10.0 && hi > 14.0);
    }

    #[test]
    fn empty_model_has_safe_bounds() {
        let mut result = sample();
        result.series.clear();
        result.simulation.trades.clear();
        let chart = ChartModel::from_result(&result);
        assert!(chart.is_empty());
        assert_eq!(chart.y_bounds(), [0.0, 1.0]);
        assert_eq!(chart.x_bounds(), [0.0, 1.0]);
        assert_eq!(chart.date_at(3.0), None);
    }

    #[test]
    fn date_at_clamps() {
        let chart = ChartModel::from_result(&sample());
        assert_eq!(chart.date_at(-3.0), Some(day(0)));
        assert_eq!(chart.date_at(1.4), Some(day(1)));
        assert_eq!(chart.date_at(99.0), Some(day(4)));
    }
}
