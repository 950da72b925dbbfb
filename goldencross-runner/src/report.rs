//! Text reports - the evaluation summary and the trade log.
//!
//! Pure functions over a finished `SimulationResult`; nothing here can change
//! the outcome of a run. Colouring is left to the caller via `Tone`.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use goldencross_core::{SimulationResult, TradeAction, TradeRecord};

/// Shown instead of a table when the ledger is empty.
pub const NO_TRADES_MESSAGE: &str = "No trades were executed during this period.";

/// Whether a figure is good news or bad news.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    Gain,
    Loss,
}

/// Profit/loss figures derived from a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    pub initial_budget: f64,
    pub final_budget: f64,
    pub profit_loss: f64,
    /// Percent, e.g. 12.5 for +12.5%.
    pub pct_return: f64,
    pub trade_count: usize,
}

impl PerformanceSummary {
    pub fn from_result(result: &SimulationResult) -> Self {
        let profit_loss = result.final_cash - result.initial_budget;
        Self {
            initial_budget: result.initial_budget,
            final_budget: result.final_cash,
            profit_loss,
            pct_return: profit_loss / result.initial_budget * 100.0,
            trade_count: result.trade_count(),
        }
    }

    /// Decided on the cent-rounded P/L, so the sign matches the printed amount.
    /// Break-even counts as a gain.
    pub fn tone(&self) -> Tone {
        if (self.profit_loss * 100.0).round() >= 0.0 {
            Tone::Gain
        } else {
            Tone::Loss
        }
    }

    /// `+$500.00 (+10.00%)` or `-$250.00 (-5.00%)`.
    pub fn profit_loss_text(&self) -> String {
        let sign = match self.tone() {
            Tone::Gain => "+",
            Tone::Loss => "-",
        };
        format!(
            "{sign}{} ({sign}{:.2}%)",
            format_dollars(self.profit_loss.abs()),
            self.pct_return.abs()
        )
    }
}

/// Tone of a single trade in the log: buys green, exits red.
pub fn action_tone(action: TradeAction) -> Tone {
    if action.is_exit() {
        Tone::Loss
    } else {
        Tone::Gain
    }
}

/// `$1,234.56`. Negative amounts keep the sign ahead of the dollar.
pub fn format_dollars(amount: f64) -> String {
    let s = format!("{:.2}", amount.abs());
    let (int_part, dec_part) = s.split_once('.').unwrap_or((s.as_str(), "00"));
    let chars: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(chars.len() + chars.len() / 3);
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }
    let sign = if amount < 0.0 && s != "0.00" { "-" } else { "" };
    format!("{sign}${grouped}.{dec_part}")
}

/// The evaluation panel as plain text.
pub fn render_summary(summary: &PerformanceSummary) -> String {
    let mut out = String::with_capacity(256);
    out.push_str("Trading Strategy Evaluation\n");
    let _ = writeln!(
        out,
        "Initial Budget: {}",
        format_dollars(summary.initial_budget)
    );
    let _ = writeln!(out, "Final Budget:   {}", format_dollars(summary.final_budget));
    let _ = writeln!(out, "Profit/Loss:    {}", summary.profit_loss_text());
    out
}

/// One trade-log row: date, action, shares, price, trade value.
pub fn trade_row(trade: &TradeRecord) -> [String; 5] {
    [
        trade.date.format("%Y-%m-%d").to_string(),
        trade.action.label().to_string(),
        trade.shares.to_string(),
        format_dollars(trade.price),
        format_dollars(trade.value()),
    ]
}

pub const TRADE_LOG_HEADERS: [&str; 5] = ["Date", "Action", "Shares", "Price", "Trade Value"];

/// The trade log as a fixed-width text table.
pub fn render_trade_log(trades: &[TradeRecord]) -> String {
    if trades.is_empty() {
        return format!("{NO_TRADES_MESSAGE}\n");
    }

    let rows: Vec<[String; 5]> = trades.iter().map(trade_row).collect();
    let mut widths = TRADE_LOG_HEADERS.map(str::len);
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.len());
        }
    }

    let mut out = String::from("Trade Log\n");
    let header: Vec<String> = TRADE_LOG_HEADERS
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (h, w))| pad(h, w, i >= 2))
        .collect();
    let _ = writeln!(out, "{}", header.join("  "));
    let _ = writeln!(
        out,
        "{}",
        widths.map(|w| "-".repeat(w)).join("  ")
    );
    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(i, (cell, w))| pad(cell, w, i >= 2))
            .collect();
        let _ = writeln!(out, "{}", cells.join("  "));
    }
    out
}

/// Numeric columns are right-aligned.
fn pad(text: &str, width: usize, right: bool) -> String {
    if right {
        format!("{text:>width$}")
    } else {
        format!("{text:<width$}")
    }
}
