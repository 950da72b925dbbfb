//! Panel widgets for the viewer.

pub mod price_chart;
pub mod summary;
pub mod trade_log;

pub use price_chart::PriceChartPanel;
pub use summary::SummaryPanel;
pub use trade_log::TradeLogPanel;
