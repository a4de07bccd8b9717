//! Historical volatility data and position resolution.
//!
//! - [`estimator`]: annualised volatility from daily close CSV files
//! - [`VolatilityDataset`]: per-ticker records persisted as JSON
//! - [`VolatilityProvider`]: lookup seam used to fill missing volatilities
//! - [`PositionResolver`]: turns boundary positions into validated ones

mod dataset;
mod error;
pub mod estimator;
mod provider;
mod resolve;

pub use dataset::{
    DatasetMetadata, DateRange, TickerVolatility, VolatilityDataset, TRADING_DAYS_PER_YEAR,
};
pub use error::DatasetError;
pub use estimator::{estimate_directory, estimate_file, estimate_volatility, PriceObservation};
pub use provider::{FlatVolatility, VolatilityProvider};
pub use resolve::PositionResolver;
