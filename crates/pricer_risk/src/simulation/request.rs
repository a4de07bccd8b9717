//! Simulation request.

use pricer_core::market_data::MarketContext;
use pricer_core::types::validate::{require_count, require_positive};
use pricer_core::types::InputError;
use pricer_models::instruments::Position;
use pricer_pricing::mc::TerminalSampling;

/// Default number of time columns per path (one trading year).
pub const DEFAULT_STEPS: usize = 252;

/// Default number of simulated paths.
pub const DEFAULT_SIMULATIONS: usize = 10_000;

/// Inputs of one Monte Carlo P&L simulation.
///
/// `simulation_volatility` drives the underlying path; each position's own
/// volatility is used only for its premium.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketContext;
/// use pricer_risk::simulation::SimulationRequest;
///
/// let request = SimulationRequest::new(Vec::new(), MarketContext::new(100.0, 0.03).unwrap(), 0.5, 0.25)
///     .with_steps(52)
///     .with_seed(Some(7));
///
/// assert_eq!(request.n_simulations, 10_000);
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationRequest {
    /// Positions in input order
    pub positions: Vec<Position>,
    /// Spot and rate at time zero
    pub market: MarketContext,
    /// Simulation horizon in years
    pub horizon: f64,
    /// Volatility of the simulated underlying
    pub simulation_volatility: f64,
    /// Columns per path, including the initial spot
    pub steps: usize,
    /// Number of paths
    pub n_simulations: usize,
    /// Stream seed; drawn from entropy when `None`
    pub seed: Option<u64>,
    /// Terminal sampling mode
    pub sampling: TerminalSampling,
}

impl SimulationRequest {
    /// Creates a request with default steps, path count and sampling.
    pub fn new(
        positions: Vec<Position>,
        market: MarketContext,
        horizon: f64,
        simulation_volatility: f64,
    ) -> Self {
        Self {
            positions,
            market,
            horizon,
            simulation_volatility,
            steps: DEFAULT_STEPS,
            n_simulations: DEFAULT_SIMULATIONS,
            seed: None,
            sampling: TerminalSampling::default(),
        }
    }

    /// Sets the number of columns per path.
    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    /// Sets the number of paths.
    pub fn with_n_simulations(mut self, n_simulations: usize) -> Self {
        self.n_simulations = n_simulations;
        self
    }

    /// Sets or clears the seed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the terminal sampling mode.
    pub fn with_sampling(mut self, sampling: TerminalSampling) -> Self {
        self.sampling = sampling;
        self
    }

    /// Validates request-level fields.
    ///
    /// # Errors
    /// `InputError` naming `horizon`, `simulation_volatility`, `steps` or
    /// `n_simulations`.
    pub fn validate(&self) -> Result<(), InputError> {
        require_positive("horizon", self.horizon)?;
        require_positive("simulation_volatility", self.simulation_volatility)?;
        require_count("steps", self.steps)?;
        require_count("n_simulations", self.n_simulations)?;
        Ok(())
    }
}
