//! Viewer state - single-owner, main-thread only.

use goldencross_core::TradeRecord;
use goldencross_runner::{BacktestResult, ChartModel, PerformanceSummary};

use crate::theme::Theme;

/// Everything the viewer draws, derived once from a `BacktestResult`.
#[derive(Debug, Clone)]
pub struct App {
    pub chart: ChartModel,
    pub summary: PerformanceSummary,
    pub trades: Vec<TradeRecord>,
    /// `symbol | fast/slow | source` line for the status bar.
    pub label: String,
    pub synthetic: bool,
    pub selected_trade: usize,
    pub show_help: bool,
    pub running: bool,
    pub theme: Theme,
}

impl App {
    pub fn new(result: &BacktestResult) -> Self {
        Self {
            chart: ChartModel::from_result(result),
            summary: PerformanceSummary::from_result(&result.simulation),
            trades: result.simulation.trades.clone(),
            label: format!(
                "{} | {}/{} | {} to {} | {}",
                result.symbol,
                result.fast_window,
                result.slow_window,
                result.start_date,
                result.end_date,
                result.source
            ),
            synthetic: result.is_synthetic(),
            selected_trade: 0,
            show_help: false,
            running: true,
            theme: Theme::default(),
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn select_next(&mut self) {
        if self.selected_trade + 1 < self.trades.len() {
            self.selected_trade += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected_trade = self.selected_trade.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected_trade = 0;
    }

    pub fn select_last(&mut self) {
        self.selected_trade = self.trades.len().saturating_sub(1);
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn selected(&self) -> Option<&TradeRecord> {
        self.trades.get(self.selected_trade)
    }
}
