//! Market data acquisition and cleaning.
//!
//! Providers fetch raw daily bars; `clean` turns them into the gap-free,
//! duplicate-free observation series the simulator requires. The simulator
//! itself never touches this module.

pub mod circuit_breaker;
pub mod clean;
pub mod csv_import;
pub mod provider;
pub mod synthetic;
pub mod yahoo;

pub use circuit_breaker::CircuitBreaker;
pub use clean::{clean_bars, CleanedSeries, CleaningReport, PriceField};
pub use csv_import::CsvProvider;
pub use provider::{DataError, DataProvider, DataSource, FetchResult, RawBar};
pub use synthetic::SyntheticProvider;
pub use yahoo::YahooProvider;
