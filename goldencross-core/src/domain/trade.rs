//! TradeRecord - one executed action in the append-only audit log.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What the ledger did at a given step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeAction {
    Buy,
    Sell,
    /// End-of-horizon liquidation, independent of any crossover.
    ForceSell,
}

impl TradeAction {
    pub fn label(&self) -> &'static str {
        match self {
            TradeAction::Buy => "BUY",
            TradeAction::Sell => "SELL",
            TradeAction::ForceSell => "FORCE SELL",
        }
    }

    /// Sell and force-sell both close the position.
    pub fn is_exit(&self) -> bool {
        matches!(self, TradeAction::Sell | TradeAction::ForceSell)
    }
}

impl fmt::Display for TradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An executed market order at the close of `date`.
///
/// Created once by the ledger and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub date: NaiveDate,
    pub action: TradeAction,
    pub shares: u64,
    pub price: f64,
}

impl TradeRecord {
    /// Cash moved by this trade (shares × price).
    pub fn value(&self) -> f64 {
        self.shares as f64 * self.price
    }
}
