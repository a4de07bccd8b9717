//! Path simulation configuration.
//!
//! This module provides the configuration type and builder for GBM path
//! simulation, including the path-cell budget that bounds memory use.

use super::error::ConfigError;

/// Default ceiling on `n_paths × n_steps` (about 200 MB of `f64`).
pub const DEFAULT_MAX_PATH_CELLS: usize = 25_000_000;

/// How terminal prices are produced when only the last column is needed.
///
/// Both modes sample the same terminal distribution over the effective
/// horizon `(n_steps - 1)·dt`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TerminalSampling {
    /// Walk every step; identical to the last column of the full matrix.
    #[default]
    Stepped,

    /// One normal per path, sampling the lognormal terminal price directly.
    Exact,
}

/// Path simulation configuration.
///
/// Immutable once built. Use [`SimulationConfigBuilder`] to construct
/// instances.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::SimulationConfig;
///
/// let config = SimulationConfig::builder()
///     .n_paths(10_000)
///     .n_steps(252)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_paths(), 10_000);
/// assert_eq!(config.n_steps(), 252);
/// ```
#[derive(Clone, Debug)]
pub struct SimulationConfig {
    /// Number of simulation paths.
    n_paths: usize,
    /// Number of columns per path, including the initial spot.
    n_steps: usize,
    /// Optional seed for reproducibility.
    seed: Option<u64>,
    /// Maximum `n_paths × n_steps`.
    max_path_cells: usize,
    /// Terminal sampling mode.
    sampling: TerminalSampling,
}

impl SimulationConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Returns the number of simulation paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Returns the number of columns per path.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Returns the optional seed for reproducibility.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns the path-cell budget.
    #[inline]
    pub fn max_path_cells(&self) -> usize {
        self.max_path_cells
    }

    /// Returns the terminal sampling mode.
    #[inline]
    pub fn sampling(&self) -> TerminalSampling {
        self.sampling
    }

    /// Requested `n_paths × n_steps`, saturating at `usize::MAX`.
    #[inline]
    pub fn path_cells(&self) -> usize {
        self.n_paths.checked_mul(self.n_steps).unwrap_or(usize::MAX)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `n_paths` is 0
    /// - `n_steps` is 0
    /// - `n_paths × n_steps` exceeds `max_path_cells`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_paths == 0 {
            return Err(ConfigError::InvalidPathCount(self.n_paths));
        }
        if self.n_steps == 0 {
            return Err(ConfigError::InvalidStepCount(self.n_steps));
        }
        let cells = self.path_cells();
        if cells > self.max_path_cells {
            return Err(ConfigError::PathBudgetExceeded {
                cells,
                limit: self.max_path_cells,
            });
        }
        Ok(())
    }
}

/// Builder for [`SimulationConfig`].
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{SimulationConfig, TerminalSampling};
///
/// let config = SimulationConfig::builder()
///     .n_paths(50_000)
///     .n_steps(252)  // Daily steps for 1 year
///     .sampling(TerminalSampling::Exact)
///     .build()
///     .expect("valid config");
///
/// assert_eq!(config.seed(), None);
/// ```
#[derive(Clone, Debug)]
pub struct SimulationConfigBuilder {
    n_paths: Option<usize>,
    n_steps: Option<usize>,
    seed: Option<u64>,
    max_path_cells: usize,
    sampling: TerminalSampling,
}

impl Default for SimulationConfigBuilder {
    fn default() -> Self {
        Self {
            n_paths: None,
            n_steps: None,
            seed: None,
            max_path_cells: DEFAULT_MAX_PATH_CELLS,
            sampling: TerminalSampling::default(),
        }
    }
}

impl SimulationConfigBuilder {
    /// Sets the number of simulation paths.
    #[inline]
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = Some(n_paths);
        self
    }

    /// Sets the number of columns per path.
    #[inline]
    pub fn n_steps(mut self, n_steps: usize) -> Self {
        self.n_steps = Some(n_steps);
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets or clears the seed.
    #[inline]
    pub fn maybe_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the path-cell budget.
    #[inline]
    pub fn max_path_cells(mut self, max_path_cells: usize) -> Self {
        self.max_path_cells = max_path_cells;
        self
    }

    /// Sets the terminal sampling mode.
    #[inline]
    pub fn sampling(mut self, sampling: TerminalSampling) -> Self {
        self.sampling = sampling;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `n_paths` or `n_steps` not set or zero
    /// - the path-cell budget is exceeded
    pub fn build(self) -> Result<SimulationConfig, ConfigError> {
        let n_paths = self
            .n_paths
            .ok_or(ConfigError::MissingParameter("n_simulations"))?;
        let n_steps = self.n_steps.ok_or(ConfigError::MissingParameter("steps"))?;

        let config = SimulationConfig {
            n_paths,
            n_steps,
            seed: self.seed,
            max_path_cells: self.max_path_cells,
            sampling: self.sampling,
        };

        config.validate()?;
        Ok(config)
    }
}
