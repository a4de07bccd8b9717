//! Monte Carlo simulation of terminal portfolio P&L.
//!
//! - [`SimulationRequest`]: positions, market, horizon, path settings
//! - [`RiskSimulator`]: one GBM run, payoff minus premium per position
//! - [`SimulationResult`]: per-path P&L, mean, std, 5% and 1% percentiles

mod engine;
mod request;
mod result;

pub use engine::{simulate_portfolio, RiskSimulator};
pub use request::{SimulationRequest, DEFAULT_SIMULATIONS, DEFAULT_STEPS};
pub use result::{SimulationResult, DEFAULT_HISTOGRAM_BINS};
