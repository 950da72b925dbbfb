//! Domain types for GoldenCross

pub mod observation;
pub mod trade;

pub use observation::PriceObservation;
pub use trade::{TradeAction, TradeRecord};

