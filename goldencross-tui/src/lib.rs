//! GoldenCross TUI - terminal viewer for a finished backtest
//!
//! Shows one run at a time:
//! - Price chart with both moving averages and buy/sell markers
//! - Evaluation summary (P/L coloured by sign)
//! - Scrollable trade log

pub mod app;
pub mod navigation;
pub mod panels;
pub mod theme;
pub mod ui;
pub mod viewer;

pub use app::App;
pub use navigation::handle_key_event;
pub use theme::Theme;
pub use viewer::run_viewer;

#[cfg(test)]
mod test_helpers;
