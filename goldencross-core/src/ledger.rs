//! Position & budget ledger - cash, shares held, and the trade log for one run.
//!
//! The ledger is the only thing that mutates simulation state. It supports
//! exactly two transitions: a full-budget market buy while flat and a
//! full-position market sell while long. Anything else is a control-flow
//! defect in the caller and is reported as `LedgerError::InvalidTransition`.
//!
//! Accounting identity: `cash + shares_held * price` only changes at a trade,
//! and only by that trade's own cash flow.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::domain::{TradeAction, TradeRecord};

/// Whether the book currently holds shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionSide {
    Flat,
    Long,
}

impl fmt::Display for PositionSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionSide::Flat => f.write_str("flat"),
            PositionSide::Long => f.write_str("long"),
        }
    }
}

/// Errors from ledger transitions. None of these are data problems.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    #[error("invalid transition: cannot {action} while {from}")]
    InvalidTransition {
        from: PositionSide,
        action: TradeAction,
    },

    #[error("cannot close the book while a position of {shares} shares is open")]
    OpenPosition { shares: u64 },
}

/// Mutable state of one run.
///
/// Invariant: `in_position == (shares_held > 0)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    cash: f64,
    shares_held: u64,
    in_position: bool,
}

impl SimulationState {
    pub fn new(initial_budget: f64) -> Self {
        Self {
            cash: initial_budget,
            shares_held: 0,
            in_position: false,
        }
    }

    pub fn cash(&self) -> f64 {
        self.cash
    }

    pub fn shares_held(&self) -> u64 {
        self.shares_held
    }

    pub fn in_position(&self) -> bool {
        self.in_position
    }

    pub fn side(&self) -> PositionSide {
        if self.in_position {
            PositionSide::Long
        } else {
            PositionSide::Flat
        }
    }
}

/// The book after the final liquidation.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosedBook {
    pub initial_budget: f64,
    pub final_cash: f64,
    pub trades: Vec<TradeRecord>,
}

/// Owns the state and the append-only trade log for a single run.
#[derive(Debug, Clone)]
pub struct Ledger {
    initial_budget: f64,
    state: SimulationState,
    trades: Vec<TradeRecord>,
}

impl Ledger {
    pub fn new(initial_budget: f64) -> Self {
        Self {
            initial_budget,
            state: SimulationState::new(initial_budget),
            trades: Vec::new(),
        }
    }

    pub fn initial_budget(&self) -> f64 {
        self.initial_budget
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn trades(&self) -> &[TradeRecord] {
        &self.trades
    }

    /// Book value at `price`: idle cash plus the marked position.
    pub fn mark_to_market(&self, price: f64) -> f64 {
        self.state.cash + self.state.shares_held as f64 * price
    }

    /// Spend the whole budget on as many whole shares as it affords.
    ///
    /// Returns `Ok(None)` when not even one share is affordable; the state is
    /// left untouched and no record is written.
    pub fn apply_buy(
        &mut self,
        price: f64,
        date: NaiveDate,
    ) -> Result<Option<TradeRecord>, LedgerError> {
        if self.state.in_position {
            return Err(LedgerError::InvalidTransition {
                from: PositionSide::Long,
                action: TradeAction::Buy,
            });
        }

        let shares = affordable_shares(self.state.cash, price);
        if shares == 0 {
            return Ok(None);
        }

        self.state.cash -= shares as f64 * price;
        self.state.shares_held = shares;
        self.state.in_position = true;

        Ok(Some(self.record(date, TradeAction::Buy, shares, price)))
    }

    /// Liquidate the whole position at `price`.
    pub fn apply_sell(
        &mut self,
        price: f64,
        date: NaiveDate,
        kind: TradeAction,
    ) -> Result<TradeRecord, LedgerError> {
        if !kind.is_exit() || !self.state.in_position {
            return Err(LedgerError::InvalidTransition {
                from: self.state.side(),
                action: kind,
            });
        }

        let shares = self.state.shares_held;
        self.state.cash += shares as f64 * price;
        self.state.shares_held = 0;
        self.state.in_position = false;

        Ok(self.record(date, kind, shares, price))
    }

    /// Hand over the final book. Refuses while a position is still open.
    pub fn close(self) -> Result<ClosedBook, LedgerError> {
        if self.state.in_position {
            return Err(LedgerError::OpenPosition {
                shares: self.state.shares_held,
            });
        }
        Ok(ClosedBook {
            initial_budget: self.initial_budget,
            final_cash: self.state.cash,
            trades: self.trades,
        })
    }

    fn record(
        &mut self,
        date: NaiveDate,
        action: TradeAction,
        shares: u64,
        price: f64,
    ) -> TradeRecord {
        debug_assert_eq!(self.state.in_position, self.state.shares_held > 0);
        let trade = TradeRecord {
            date,
            action,
            shares,
            price,
        };
        self.trades.push(trade.clone());
        trade
    }
}

/// Largest whole share count whose cost does not exceed `cash`.
///
/// `floor(cash / price)` can round up by one share (63.65 / 12.73 gives 5,
/// but 5 * 12.73 > 63.65 in f64), so the cost is checked directly.
fn affordable_shares(cash: f64, price: f64) -> u64 {
    let mut shares = (cash / price).floor().max(0.0) as u64;
    while shares > 0 && shares as f64 * price > cash {
        shares -= 1;
    }
    shares
}
