//! Geometric Brownian Motion path generation.
//!
//! Paths use the log-space update
//!
//! ```text
//! S(t) = S(t-1) × exp((r - σ²/2)dt + σ√dt × Z(t))
//! ```
//!
//! with `dt = T / n_steps`. Each path draws `n_steps` normals from a single
//! stream, path by path. Column 0 holds the initial spot and the update
//! runs for columns `1..n_steps`, so the first draw of every path is
//! consumed but unused and the effective horizon is `(n_steps - 1)·dt`.
//!
//! # Memory Layout
//!
//! Paths are stored in row-major order: `values[path_idx * n_steps + step_idx]`.

use tracing::debug;

use super::config::{SimulationConfig, TerminalSampling};
use super::error::ConfigError;
use crate::rng::PricerRng;

/// Parameters for Geometric Brownian Motion path generation.
///
/// # Model
///
/// ```text
/// dS = r S dt + σ S dW
/// ```
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::GbmParams;
///
/// let params = GbmParams::new(100.0, 0.03, 0.25, 1.0);
/// assert!(params.validate().is_ok());
/// assert!(GbmParams::new(100.0, 0.03, 0.0, 1.0).validate().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GbmParams {
    /// Initial spot price (S₀).
    pub spot: f64,
    /// Risk-free rate (r) - annualised.
    pub rate: f64,
    /// Volatility (σ) - annualised.
    pub volatility: f64,
    /// Simulation horizon (T) - in years.
    pub maturity: f64,
}

impl GbmParams {
    /// Creates new GBM parameters.
    #[inline]
    pub fn new(spot: f64, rate: f64, volatility: f64, maturity: f64) -> Self {
        Self {
            spot,
            rate,
            volatility,
            maturity,
        }
    }

    /// Validates the parameters.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidParameter` named after the boundary field
    /// (`spot`, `risk_free_rate`, `simulation_volatility`, `horizon`).
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("spot", self.spot),
            ("simulation_volatility", self.volatility),
            ("horizon", self.maturity),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidParameter { name, value });
            }
        }
        if !self.rate.is_finite() {
            return Err(ConfigError::InvalidParameter {
                name: "risk_free_rate",
                value: self.rate,
            });
        }
        Ok(())
    }

    /// Per-step drift and diffusion terms for `n_steps` columns.
    #[inline]
    fn step_terms(&self, n_steps: usize) -> (f64, f64) {
        let dt = self.maturity / n_steps as f64;
        let drift_dt = (self.rate - 0.5 * self.volatility * self.volatility) * dt;
        let vol_sqrt_dt = self.volatility * dt.sqrt();
        (drift_dt, vol_sqrt_dt)
    }

    /// Time actually covered by `n_steps` columns: `(n_steps - 1)·dt`.
    #[inline]
    pub fn effective_horizon(&self, n_steps: usize) -> f64 {
        self.maturity * n_steps.saturating_sub(1) as f64 / n_steps as f64
    }
}

/// Full simulated price matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct PathMatrix {
    values: Vec<f64>,
    n_paths: usize,
    n_steps: usize,
    seed: u64,
}

impl PathMatrix {
    /// Number of paths (rows).
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Number of columns per path.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Seed of the stream that produced the matrix.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// One path, or `None` if `path_idx` is out of range.
    #[inline]
    pub fn path(&self, path_idx: usize) -> Option<&[f64]> {
        let start = path_idx.checked_mul(self.n_steps)?;
        let end = start.checked_add(self.n_steps)?;
        self.values.get(start..end)
    }

    /// Price at (`path_idx`, `step_idx`).
    #[inline]
    pub fn get(&self, path_idx: usize, step_idx: usize) -> Option<f64> {
        if step_idx >= self.n_steps {
            return None;
        }
        self.path(path_idx).map(|row| row[step_idx])
    }

    /// Iterates over paths in order.
    pub fn paths(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks_exact(self.n_steps)
    }

    /// Last column.
    pub fn terminal_prices(&self) -> Vec<f64> {
        self.paths().map(|row| row[self.n_steps - 1]).collect()
    }

    /// Row-major backing storage.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

/// Terminal prices of every path, with the seed that produced them.
#[derive(Clone, Debug, PartialEq)]
pub struct TerminalPrices {
    /// Terminal price per path, in path order.
    pub prices: Vec<f64>,
    /// Seed of the generating stream.
    pub seed: u64,
}

/// GBM path simulator.
///
/// Stateless between calls: each simulation opens a fresh stream from the
/// configured seed, or from entropy when none is set.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{GbmParams, PathSimulator, SimulationConfig};
///
/// let config = SimulationConfig::builder()
///     .n_paths(1_000)
///     .n_steps(12)
///     .seed(42)
///     .build()
///     .unwrap();
///
/// let simulator = PathSimulator::new(config);
/// let params = GbmParams::new(100.0, 0.03, 0.25, 1.0);
///
/// let matrix = simulator.simulate_paths(&params).unwrap();
/// let terminal = simulator.simulate_terminal(&params).unwrap();
///
/// assert_eq!(matrix.terminal_prices(), terminal.prices);
/// ```
#[derive(Clone, Debug)]
pub struct PathSimulator {
    config: SimulationConfig,
}

impl PathSimulator {
    /// Creates a simulator for an already validated configuration.
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    fn open_stream(&self) -> PricerRng {
        match self.config.seed() {
            Some(seed) => PricerRng::from_seed(seed),
            None => PricerRng::from_entropy(),
        }
    }

    /// Generates the full `n_paths × n_steps` price matrix.
    ///
    /// # Errors
    ///
    /// `ConfigError` if the parameters are invalid or the grid exceeds the
    /// path-cell budget.
    pub fn simulate_paths(&self, params: &GbmParams) -> Result<PathMatrix, ConfigError> {
        params.validate()?;
        self.config.validate()?;

        let n_paths = self.config.n_paths();
        let n_steps = self.config.n_steps();
        let (drift_dt, vol_sqrt_dt) = params.step_terms(n_steps);

        let mut rng = self.open_stream();
        debug!(n_paths, n_steps, seed = rng.seed(), "generating GBM path matrix");

        let mut values = vec![0.0; n_paths * n_steps];
        let mut normals = vec![0.0; n_steps];

        for row in values.chunks_exact_mut(n_steps) {
            rng.fill_normal(&mut normals);
            row[0] = params.spot;
            for t in 1..n_steps {
                row[t] = row[t - 1] * (drift_dt + vol_sqrt_dt * normals[t]).exp();
            }
        }

        Ok(PathMatrix {
            values,
            n_paths,
            n_steps,
            seed: rng.seed(),
        })
    }

    /// Generates only the terminal price of each path.
    ///
    /// With [`TerminalSampling::Stepped`] the result equals
    /// [`PathMatrix::terminal_prices`] for the same seed, without holding
    /// the matrix. [`TerminalSampling::Exact`] draws one normal per path
    /// over the effective horizon.
    ///
    /// # Errors
    ///
    /// Same as [`PathSimulator::simulate_paths`].
    pub fn simulate_terminal(&self, params: &GbmParams) -> Result<TerminalPrices, ConfigError> {
        params.validate()?;
        self.config.validate()?;

        let n_paths = self.config.n_paths();
        let n_steps = self.config.n_steps();
        let mut rng = self.open_stream();
        debug!(
            n_paths,
            n_steps,
            seed = rng.seed(),
            sampling = ?self.config.sampling(),
            "generating terminal prices"
        );

        let prices = match self.config.sampling() {
            TerminalSampling::Stepped => {
                let (drift_dt, vol_sqrt_dt) = params.step_terms(n_steps);
                let mut normals = vec![0.0; n_steps];
                (0..n_paths)
                    .map(|_| {
                        rng.fill_normal(&mut normals);
                        normals[1..].iter().fold(params.spot, |price, z| {
                            price * (drift_dt + vol_sqrt_dt * z).exp()
                        })
                    })
                    .collect()
            }
            TerminalSampling::Exact => {
                let tau = params.effective_horizon(n_steps);
                let drift = (params.rate - 0.5 * params.volatility * params.volatility) * tau;
                let diffusion = params.volatility * tau.sqrt();
                (0..n_paths)
                    .map(|_| params.spot * (drift + diffusion * rng.gen_normal()).exp())
                    .collect()
            }
        };

        Ok(TerminalPrices {
            prices,
            seed: rng.seed(),
        })
    }
}
