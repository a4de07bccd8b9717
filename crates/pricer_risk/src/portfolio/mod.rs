//! Analytic portfolio valuation.
//!
//! - [`PortfolioAggregator`]: closed-form value and Greeks per position,
//!   summed into portfolio totals
//! - [`AnalyticResult`], [`PositionResult`]: totals and breakdown

mod aggregator;
mod result;

pub use aggregator::{analyze_portfolio, PortfolioAggregator};
pub use result::{AnalyticResult, PositionResult};
