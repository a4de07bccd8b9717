//! CLI configuration file
//!
//! Optional TOML file supplying defaults that command-line flags override.

use std::path::{Path, PathBuf};

use pricer_risk::simulation::{DEFAULT_SIMULATIONS, DEFAULT_STEPS};
use serde::Deserialize;

use crate::{CliError, Result};

/// Defaults read from the configuration file
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Historical volatility dataset used to fill missing volatilities
    pub volatility_dataset: Option<PathBuf>,
    /// Rate used when neither the portfolio file nor a flag sets one
    pub risk_free_rate: f64,
    /// Columns per simulated path
    pub steps: usize,
    /// Number of simulated paths
    pub n_simulations: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            volatility_dataset: None,
            risk_free_rate: 0.03,
            steps: DEFAULT_STEPS,
            n_simulations: DEFAULT_SIMULATIONS,
        }
    }
}

impl CliConfig {
    /// Loads the file, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }

        let text = std::fs::read_to_string(path)?;
        let config: CliConfig =
            toml::from_str(&text).map_err(|e| CliError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !self.risk_free_rate.is_finite() {
            return Err(CliError::Config("risk_free_rate must be finite".into()));
        }
        if self.steps == 0 || self.n_simulations == 0 {
            return Err(CliError::Config(
                "steps and n_simulations must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
