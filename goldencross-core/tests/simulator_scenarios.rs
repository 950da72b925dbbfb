//! Scenario tests for the crossover simulator with the default 50/200 windows.
//!
//! The series are engineered so the moving averages cross at known indices:
//! a long flat stretch at 30, a dip at 9 that pulls MA50 well below MA200, then
//! a recovery at 20 that lifts MA50 back above MA200 at index 338.

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use goldencross_core::{
    InputError, PriceObservation, SimulationConfig, SimulationError, SimulationObserver,
    SimulationResult, Simulator, TradeAction, TradeRecord,
};

// ── Helpers ──────────────────────────────────────────────────────────

fn series(segments: &[(f64, usize)]) -> Vec<PriceObservation> {
    let base = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
    segments
        .iter()
        .flat_map(|&(price, count)| std::iter::repeat(price).take(count))
        .enumerate()
        .map(|(i, close)| PriceObservation::new(base + chrono::Duration::days(i as i64), close))
        .collect()
}

/// Dip-then-recover series with a golden cross at index 338, ending at 22.
fn recovery_series() -> Vec<PriceObservation> {
    series(&[(30.0, 200), (9.0, 100), (20.0, 150), (22.0, 10)])
}

fn run(budget: f64, obs: &[PriceObservation]) -> Result<SimulationResult, SimulationError> {
    Simulator::new(SimulationConfig::new(budget, 50, 200)).run(obs)
}

fn actions(result: &SimulationResult) -> Vec<TradeAction> {
    result.trades.iter().map(|t| t.action).collect()
}

// ── Scenarios ────────────────────────────────────────────────────────

#[test]
fn golden_cross_buys_whole_budget_then_force_sells() {
    let obs = recovery_series();
    let result = run(1000.0, &obs).unwrap();

    assert_eq!(
        actions(&result),
        vec![TradeAction::Buy, TradeAction::ForceSell]
    );

    let buy = &result.trades[0];
    assert_eq!(buy.date, obs[338].date);
    assert_eq!(buy.shares, 50);
    assert_eq!(buy.price, 20.0);
    assert_eq!(buy.value(), 1000.0);

    let exit = &result.trades[1];
    assert_eq!(exit.date, obs.last().unwrap().date);
    assert_eq!(exit.shares, 50);
    assert_eq!(exit.price, 22.0);

    assert_eq!(result.final_cash, 1100.0);
}

#[test]
fn death_cross_sells_then_later_golden_cross_rebuys() {
    let obs = series(&[
        (30.0, 200),
        (9.0, 100),
        (20.0, 150),
        (5.0, 100),
        (40.0, 100),
    ]);
    let result = run(1000.0, &obs).unwrap();

    assert_eq!(
        actions(&result),
        vec![
            TradeAction::Buy,
            TradeAction::Sell,
            TradeAction::Buy,
            TradeAction::ForceSell
        ]
    );
    assert_eq!(result.trades[1].date, obs[459].date);
    assert_eq!(result.trades[1].price, 5.0);
    // 250 cash after the sell buys six shares at 40, leaving 10 idle.
    assert_eq!(result.trades[2].shares, 6);
    assert_eq!(result.trades[2].date, obs[562].date);
    assert_eq!(result.final_cash, 250.0);
}

#[test]
fn unaffordable_golden_cross_leaves_book_flat() {
    let result = run(5.0, &recovery_series()).unwrap();
    assert!(result.trades.is_empty());
    assert_eq!(result.final_cash, 5.0);
    assert_eq!(result.signal_count, 1);
}

#[test]
fn series_shorter_than_slow_window_is_an_input_error() {
    let obs = series(&[(10.0, 199)]);
    let err = run(1000.0, &obs).unwrap_err();
    assert_eq!(
        err,
        SimulationError::Input(InputError::InsufficientData {
            len: 199,
            required: 200
        })
    );
}

#[test]
fn series_of_exactly_slow_window_has_nothing_to_evaluate() {
    let obs = series(&[(10.0, 100), (20.0, 100)]);
    let result = run(1000.0, &obs).unwrap();
    assert!(result.trades.is_empty());
    assert_eq!(result.evaluated_steps, 0);
    assert_eq!(result.final_cash, 1000.0);
}

#[test]
fn plain_step_from_ten_to_twenty_is_not_a_cross() {
    // Before the step both averages sit exactly at 10; a tie is not "below".
    let obs = series(&[(10.0, 249), (20.0, 100)]);
    let result = run(1000.0, &obs).unwrap();
    assert!(result.trades.is_empty());
    assert_eq!(result.final_cash, 1000.0);
}

#[test]
fn touching_averages_without_crossing_do_not_trade() {
    // With the dip at 10 instead of 9, MA50 meets MA200 exactly one step
    // before moving above it.
    let obs = series(&[(30.0, 200), (10.0, 100), (20.0, 150), (22.0, 10)]);
    let result = run(1000.0, &obs).unwrap();
    assert!(result.trades.is_empty());
}

#[test]
fn constant_series_produces_no_trades() {
    let obs = series(&[(7.0, 300)]);
    let result = run(1000.0, &obs).unwrap();
    assert!(result.trades.is_empty());
    assert_eq!(result.signal_count, 0);
    assert_eq!(result.final_cash, 1000.0);
}

#[test]
fn invalid_input_is_reported_not_repaired() {
    let mut obs = recovery_series();
    obs[10].close = f64::NAN;
    assert!(matches!(
        run(1000.0, &obs),
        Err(SimulationError::Input(InputError::InvalidPrice { index: 10, .. }))
    ));

    let mut obs = recovery_series();
    obs.swap(3, 4);
    assert!(matches!(
        run(1000.0, &obs),
        Err(SimulationError::Input(InputError::UnorderedTimestamps { index: 4 }))
    ));
}

#[test]
fn one_simulator_serves_independent_runs() {
    let sim = Simulator::new(SimulationConfig::new(1000.0, 50, 200));
    let a = sim.run(&recovery_series()).unwrap();
    let b = sim.run(&recovery_series()).unwrap();
    assert_eq!(a, b);
}

// ── Observer wiring ──────────────────────────────────────────────────

#[derive(Default)]
struct TradeLog(Mutex<Vec<TradeRecord>>);

impl SimulationObserver for TradeLog {
    fn on_trade(&self, trade: &TradeRecord, _state: &goldencross_core::SimulationState) {
        self.0.lock().unwrap().push(trade.clone());
    }
}

#[test]
fn observer_sees_the_same_trades_as_the_result() {
    let log = Arc::new(TradeLog::default());
    let sim = Simulator::new(SimulationConfig::new(1000.0, 50, 200)).with_observer(log.clone());
    let result = sim.run(&recovery_series()).unwrap();
    assert_eq!(*log.0.lock().unwrap(), result.trades);
}
