//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod analyze;
pub mod estimate_vol;
pub mod simulate;

use std::path::Path;

use clap::ValueEnum;
use pricer_core::market_data::MarketContext;
use pricer_core::types::InputError;
use pricer_models::instruments::PositionSpec;
use pricer_risk::volatility::{PositionResolver, VolatilityDataset, VolatilityProvider};
use serde::Deserialize;
use tracing::info;

use crate::{CliError, Result};

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Human-readable table
    #[default]
    Table,
}

/// Portfolio file contents
///
/// ```json
/// {"spot": 100.0, "risk_free_rate": 0.03, "ticker": "AAPL",
///  "positions": [{"type": "call", "side": "long", "quantity": 1,
///                 "strike": 100.0, "time_to_expiry": 1.0, "volatility": 0.25}]}
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PortfolioFile {
    pub positions: Vec<PositionSpec>,
    pub spot: Option<f64>,
    pub risk_free_rate: Option<f64>,
    pub ticker: Option<String>,
    pub horizon: Option<f64>,
    pub simulation_volatility: Option<f64>,
}

/// Reads a portfolio file
pub fn load_portfolio(path: &Path) -> Result<PortfolioFile> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    let text = std::fs::read_to_string(path)?;
    let portfolio: PortfolioFile = serde_json::from_str(&text)?;
    info!(
        path = %path.display(),
        positions = portfolio.positions.len(),
        "Portfolio loaded"
    );
    Ok(portfolio)
}

/// Reads the volatility dataset, if one is configured
pub fn load_dataset(path: Option<&Path>) -> Result<Option<VolatilityDataset>> {
    path.map(|p| -> Result<VolatilityDataset> {
        let dataset = VolatilityDataset::from_path(p)?;
        info!(path = %p.display(), tickers = dataset.len(), "Volatility dataset loaded");
        Ok(dataset)
    })
    .transpose()
}

/// Market inputs after applying ticker defaults
pub(crate) fn market_for(
    spot: Option<f64>,
    risk_free_rate: f64,
    ticker: Option<&str>,
    provider: Option<&dyn VolatilityProvider>,
) -> Result<MarketContext> {
    let spot = spot
        .or_else(|| ticker.and_then(|t| provider?.reference_spot(t)))
        .ok_or(InputError::MissingField { field: "spot" })?;
    Ok(MarketContext::new(spot, risk_free_rate)?)
}

pub(crate) fn resolver_for<'a>(
    provider: Option<&'a dyn VolatilityProvider>,
    ticker: Option<&'a str>,
    fallback: Option<f64>,
) -> PositionResolver<'a> {
    let resolver = PositionResolver::new().with_fallback(fallback);
    match (provider, ticker) {
        (Some(provider), Some(ticker)) => resolver.with_provider(provider, ticker),
        _ => resolver,
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::{Path, PathBuf};

    pub(crate) fn write_portfolio(dir: &Path, json: &str) -> PathBuf {
        let path = dir.join("portfolio.json");
        std::fs::write(&path, json).unwrap();
        path
    }

    pub(crate) const ATM_CALL: &str = r#"{
        "spot": 100.0, "risk_free_rate": 0.03,
        "positions": [{"type": "call", "side": "long", "quantity": 1,
                       "strike": 100.0, "time_to_expiry": 1.0, "volatility": 0.25}]
    }"#;
}
