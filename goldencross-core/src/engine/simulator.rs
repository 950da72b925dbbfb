//! Strategy simulator - two-state (flat/long) walk with mandatory liquidation.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{PriceObservation, TradeAction, TradeRecord};
use crate::indicators::{IndicatorError, IndicatorFrame};
use crate::ledger::{Ledger, LedgerError, PositionSide};
use crate::signal::{classify, Crossover};

use super::config::{validate_series, InputError, SimulationConfig};
use super::observer::{NoopObserver, SimulationObserver};

/// Errors from a simulation run.
///
/// `Input` is the caller's problem. `Ledger` means the state machine itself is
/// wired wrong and must never surface from a correct build.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("input error: {0}")]
    Input(#[from] InputError),
    #[error("indicator error: {0}")]
    Indicator(#[from] IndicatorError),
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

/// Terminal output of one run.
///
/// Profit, percentage return and any other derived figure are computed by the
/// presentation layer from these fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub initial_budget: f64,
    pub final_cash: f64,
    /// Executed trades in execution order.
    pub trades: Vec<TradeRecord>,
    /// Golden and death crosses seen, including ones that did not trade.
    pub signal_count: usize,
    /// Number of (prev, curr) pairs classified.
    pub evaluated_steps: usize,
}

impl SimulationResult {
    pub fn trade_count(&self) -> usize {
        self.trades.len()
    }
}

/// Runs the crossover strategy over a price series.
///
/// Holds no per-run state: every call to `run` builds its own `Ledger`, so one
/// simulator can serve many series, including concurrently.
#[derive(Clone)]
pub struct Simulator {
    config: SimulationConfig,
    observer: Arc<dyn SimulationObserver>,
}

impl fmt::Debug for Simulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Simulator {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            observer: Arc::new(NoopObserver),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn SimulationObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Validate the series, compute both averages, then simulate.
    pub fn run(
        &self,
        observations: &[PriceObservation],
    ) -> Result<SimulationResult, SimulationError> {
        validate_series(observations, &self.config)?;
        let frame = IndicatorFrame::compute(
            observations,
            self.config.fast_window,
            self.config.slow_window,
        )?;
        self.run_frame(&frame)
    }

    /// Simulate over an already computed frame.
    ///
    /// Only rows where both averages are defined are evaluated; the first of
    /// them merely seeds `prev`. With fewer than two such rows nothing is
    /// evaluated and the initial budget comes back untouched.
    ///
    /// Liquidation marks any open position to the frame's last close, however
    /// far that is from the last crossover evaluated. Over a streaming source
    /// this would be a look-ahead.
    pub fn run_frame(&self, frame: &IndicatorFrame) -> Result<SimulationResult, SimulationError> {
        self.config.validate()?;
        self.observer.on_start(&self.config, frame.len());

        let mut ledger = Ledger::new(self.config.initial_budget);
        let defined = frame.defined_rows();

        let signal_count = defined.windows(2).try_fold(0usize, |signals, pair| {
            let (prev, curr) = (&pair[0], &pair[1]);
            let signal = classify(prev.fast, prev.slow, curr.fast, curr.slow);
            let side = ledger.state().side();
            if signal.is_signal() {
                self.observer.on_signal(curr.date, signal, side);
            }

            match (signal, side) {
                (Crossover::GoldenCross, PositionSide::Flat) => {
                    match ledger.apply_buy(curr.close, curr.date)? {
                        Some(trade) => self.observer.on_trade(&trade, ledger.state()),
                        None => self.observer.on_skipped_buy(
                            curr.date,
                            curr.close,
                            ledger.state().cash(),
                        ),
                    }
                }
                (Crossover::DeathCross, PositionSide::Long) => {
                    let trade = ledger.apply_sell(curr.close, curr.date, TradeAction::Sell)?;
                    self.observer.on_trade(&trade, ledger.state());
                }
                _ => {}
            }

            Ok::<_, LedgerError>(signals + usize::from(signal.is_signal()))
        })?;

        if ledger.state().in_position() {
            if let Some(last) = frame.last() {
                let trade = ledger.apply_sell(last.close, last.date, TradeAction::ForceSell)?;
                self.observer.on_trade(&trade, ledger.state());
            }
        }

        let book = ledger.close()?;
        let result = SimulationResult {
            initial_budget: book.initial_budget,
            final_cash: book.final_cash,
            trades: book.trades,
            signal_count,
            evaluated_steps: defined.len().saturating_sub(1),
        };
        self.observer.on_finish(&result);
        Ok(result)
    }
}
