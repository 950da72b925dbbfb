//! Event sink for simulation progress.
//!
//! The simulator never prints. Anything that wants to watch a run (console
//! logging, a UI, a test) implements `SimulationObserver` and is injected;
//! every hook has a no-op default.

use chrono::NaiveDate;

use crate::domain::TradeRecord;
use crate::ledger::{PositionSide, SimulationState};
use crate::signal::Crossover;

use super::config::SimulationConfig;
use super::simulator::SimulationResult;

/// Callbacks fired by the simulator during a run.
pub trait SimulationObserver: Send + Sync {
    /// Called once before the pass, with the number of frame rows.
    fn on_start(&self, _config: &SimulationConfig, _rows: usize) {}

    /// Called for every golden or death cross, whether or not it trades.
    fn on_signal(&self, _date: NaiveDate, _signal: Crossover, _side: PositionSide) {}

    /// Called when a golden cross could not afford a single share.
    fn on_skipped_buy(&self, _date: NaiveDate, _price: f64, _cash: f64) {}

    /// Called after every executed trade, with the state it produced.
    fn on_trade(&self, _trade: &TradeRecord, _state: &SimulationState) {}

    /// Called once after liquidation, with the final result.
    fn on_finish(&self, _result: &SimulationResult) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SimulationObserver for NoopObserver {}

/// Observer that forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl SimulationObserver for TracingObserver {
    fn on_start(&self, config: &SimulationConfig, rows: usize) {
        tracing::info!(
            rows,
            fast = config.fast_window,
            slow = config.slow_window,
            budget = config.initial_budget,
            "running trading strategy"
        );
    }

    fn on_signal(&self, date: NaiveDate, signal: Crossover, side: PositionSide) {
        tracing::trace!(%date, ?signal, %side, "crossover");
    }

    fn on_skipped_buy(&self, date: NaiveDate, price: f64, cash: f64) {
        tracing::debug!(%date, price, cash, "golden cross skipped: budget below one share");
    }

    fn on_trade(&self, trade: &TradeRecord, state: &SimulationState) {
        tracing::debug!(
            date = %trade.date,
            action = %trade.action,
            shares = trade.shares,
            price = trade.price,
            cash = state.cash(),
            "trade"
        );
    }

    fn on_finish(&self, result: &SimulationResult) {
        tracing::info!(
            trades = result.trades.len(),
            signals = result.signal_count,
            final_cash = result.final_cash,
            "strategy simulation finished"
        );
    }
}
