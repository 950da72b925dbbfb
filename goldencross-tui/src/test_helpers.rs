//! Hand-built results for widget and navigation tests.

use chrono::NaiveDate;

use goldencross_core::data::{CleaningReport, DataSource};
use goldencross_core::indicators::FrameRow;
use goldencross_core::{SimulationResult, TradeAction, TradeRecord};
use goldencross_runner::BacktestResult;

pub fn day(i: usize) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 2).unwrap() + chrono::Duration::days(i as i64)
}

fn series(closes: &[f64]) -> Vec<FrameRow> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| FrameRow {
            date: day(i),
            close,
            fast: (i >= 1).then(|| (closes[i - 1] + close) / 2.0),
            slow: (i >= 2).then(|| (closes[i - 2] + closes[i - 1] + close) / 3.0),
        })
        .collect()
}

fn result(closes: &[f64], trades: Vec<TradeRecord>, final_cash: f64) -> BacktestResult {
    let series = series(closes);
    BacktestResult {
        schema_version: goldencross_runner::runner::SCHEMA_VERSION,
        symbol: "TEST".into(),
        start_date: day(0),
        end_date: day(closes.len() - 1),
        source: DataSource::CsvImport,
        dataset_hash: "abc123".into(),
        cleaning: CleaningReport::default(),
        fast_window: 2,
        slow_window: 3,
        simulation: SimulationResult {
            initial_budget: 25.0,
            final_cash,
            signal_count: trades.len().saturating_sub(1).max(1),
            evaluated_steps: closes.len().saturating_sub(3),
            trades,
        },
        series,
    }
}

/// BUY 2 @ 10.00, FORCE SELL 2 @ 12.50: +$5.00 on $25.00.
pub fn round_trip_result() -> BacktestResult {
    let trades = vec![
        TradeRecord {
            date: day(3),
            action: TradeAction::Buy,
            shares: 2,
            price: 10.0,
        },
        TradeRecord {
            date: day(5),
            action: TradeAction::ForceSell,
            shares: 2,
            price: 12.5,
        },
    ];
    result(&[9.0, 8.0, 7.0, 10.0, 11.0, 12.5], trades, 30.0)
}

/// BUY 2 @ 10.00, SELL 2 @ 7.50: -$5.00 on $25.00.
pub fn losing_result() -> BacktestResult {
    let trades = vec![
        TradeRecord {
            date: day(3),
            action: TradeAction::Buy,
            shares: 2,
            price: 10.0,
        },
        TradeRecord {
            date: day(5),
            action: TradeAction::Sell,
            shares: 2,
            price: 7.5,
        },
    ];
    result(&[9.0, 8.0, 7.0, 10.0, 9.0, 7.5], trades, 20.0)
}

/// Constant prices, no crossings, no trades.
pub fn flat_result() -> BacktestResult {
    result(&[10.0; 6], Vec::new(), 25.0)
}
