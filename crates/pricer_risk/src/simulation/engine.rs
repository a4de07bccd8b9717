//! Monte Carlo P&L simulation.
//!
//! One GBM simulation of the underlying is shared by every position.
//! Per path, each position contributes `quantity × net` where
//!
//! ```text
//! long:  net = payoff(S_T) - premium
//! short: net = premium - payoff(S_T)
//! ```
//!
//! and the premium is the closed-form price at time zero with the
//! position's own volatility and expiry.

use pricer_core::types::{InputError, PricingError};
use pricer_models::analytical::BlackScholes;
use pricer_models::instruments::{OptionKind, Position, Side};
use pricer_pricing::mc::{GbmParams, PathSimulator, SimulationConfig, DEFAULT_MAX_PATH_CELLS};
use tracing::debug;

use super::request::SimulationRequest;
use super::result::SimulationResult;
use crate::parallel::ParallelConfig;

/// Per-position terms needed on every path.
#[derive(Debug, Clone, Copy)]
struct Leg {
    kind: OptionKind,
    side: Side,
    quantity: f64,
    strike: f64,
    premium: f64,
}

impl Leg {
    #[inline]
    fn pnl(&self, terminal: f64) -> f64 {
        let payoff = self.kind.payoff(terminal, self.strike);
        let net = match self.side {
            Side::Long => payoff - self.premium,
            Side::Short => self.premium - payoff,
        };
        self.quantity * net
    }
}

/// Monte Carlo portfolio P&L simulator.
///
/// Holds no state between calls; seeded requests are reproducible bit for
/// bit whether or not the payoff pass runs in parallel.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketContext;
/// use pricer_models::instruments::{OptionKind, Position, Side};
/// use pricer_risk::simulation::{RiskSimulator, SimulationRequest};
///
/// let market = MarketContext::new(100.0, 0.03).unwrap();
/// let call = Position::new(OptionKind::Call, Side::Long, 1, 100.0, 0.5, 0.25).unwrap();
///
/// let request = SimulationRequest::new(vec![call], market, 0.5, 0.25)
///     .with_n_simulations(2_000)
///     .with_steps(26)
///     .with_seed(Some(42));
///
/// let result = RiskSimulator::new().simulate(&request).unwrap();
/// assert_eq!(result.portfolio_values.len(), 2_000);
/// assert!(result.var_1 <= result.var_5);
/// ```
#[derive(Debug, Clone)]
pub struct RiskSimulator {
    parallel: ParallelConfig,
    max_path_cells: usize,
}

impl Default for RiskSimulator {
    fn default() -> Self {
        Self {
            parallel: ParallelConfig::default(),
            max_path_cells: DEFAULT_MAX_PATH_CELLS,
        }
    }
}

impl RiskSimulator {
    /// Creates a simulator with the default parallelism and path-cell budget.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the parallel configuration of the payoff pass.
    pub fn with_parallel(mut self, parallel: ParallelConfig) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the path-cell budget.
    pub fn with_max_path_cells(mut self, max_path_cells: usize) -> Self {
        self.max_path_cells = max_path_cells;
        self
    }

    /// Returns the path-cell budget.
    pub fn max_path_cells(&self) -> usize {
        self.max_path_cells
    }

    /// Runs the simulation.
    ///
    /// The path-cell budget applies to `n_simulations × steps` in every
    /// sampling mode. At the default 252 steps the default budget admits
    /// at most 99 206 paths; larger runs must lower `steps` or raise the
    /// budget with [`RiskSimulator::with_max_path_cells`].
    ///
    /// # Errors
    /// - `PricingError::InvalidInput` for request-level fields or an
    ///   exceeded path-cell budget
    /// - `PricingError::InvalidPosition` if a premium cannot be computed
    pub fn simulate(&self, request: &SimulationRequest) -> Result<SimulationResult, PricingError> {
        request.validate()?;

        let legs = request
            .positions
            .iter()
            .enumerate()
            .map(|(index, position)| {
                leg_for(position, request).map_err(|err| PricingError::at_position(index, err))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let config = SimulationConfig::builder()
            .n_paths(request.n_simulations)
            .n_steps(request.steps)
            .maybe_seed(request.seed)
            .max_path_cells(self.max_path_cells)
            .sampling(request.sampling)
            .build()
            .map_err(InputError::from)?;

        let params = GbmParams::new(
            request.market.spot(),
            request.market.risk_free_rate(),
            request.simulation_volatility,
            request.horizon,
        );

        let terminal = PathSimulator::new(config)
            .simulate_terminal(&params)
            .map_err(InputError::from)?;

        debug!(
            positions = legs.len(),
            n_simulations = request.n_simulations,
            steps = request.steps,
            seed = terminal.seed,
            parallel = self.parallel.should_parallelize(terminal.prices.len()),
            "folding terminal payoffs"
        );

        let values = self.parallel.map(&terminal.prices, |&s_t| {
            legs.iter().fold(0.0, |acc, leg| acc + leg.pnl(s_t))
        });

        Ok(SimulationResult::from_values(values, terminal.seed))
    }
}

fn leg_for(position: &Position, request: &SimulationRequest) -> Result<Leg, InputError> {
    let bs = BlackScholes::new(
        request.market.spot(),
        request.market.risk_free_rate(),
        position.volatility(),
    )?;
    let premium = bs.price(position.kind(), position.strike(), position.time_to_expiry())?;

    Ok(Leg {
        kind: position.kind(),
        side: position.side(),
        quantity: position.quantity() as f64,
        strike: position.strike(),
        premium,
    })
}

/// Runs a simulation with the default [`RiskSimulator`].
pub fn simulate_portfolio(request: &SimulationRequest) -> Result<SimulationResult, PricingError> {
    RiskSimulator::new().simulate(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::market_data::MarketContext;

    fn market() -> MarketContext {
        MarketContext::new(100.0, 0.03).unwrap()
    }

    fn atm_call(side: Side) -> Position {
        Position::new(OptionKind::Call, side, 1, 100.0, 1.0, 0.25).unwrap()
    }

    fn request(positions: Vec<Position>) -> SimulationRequest {
        SimulationRequest::new(positions, market(), 1.0, 0.25)
            .with_steps(12)
            .with_n_simulations(5_000)
            .with_seed(Some(42))
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let req = request(vec![atm_call(Side::Long)]);
        let a = simulate_portfolio(&req).unwrap();
        let b = simulate_portfolio(&req).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.seed, 42);
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let req = request(vec![
            atm_call(Side::Long),
            Position::new(OptionKind::Put, Side::Short, 3, 95.0, 0.5, 0.3).unwrap(),
        ]);
        let parallel = RiskSimulator::new()
            .with_parallel(ParallelConfig::new(128, 1))
            .simulate(&req)
            .unwrap();
        let sequential = RiskSimulator::new()
            .with_parallel(ParallelConfig::sequential())
            .simulate(&req)
            .unwrap();
        assert_eq!(parallel.portfolio_values, sequential.portfolio_values);
    }

    #[test]
    fn test_empty_portfolio_yields_zero_pnl() {
        let result = simulate_portfolio(&request(Vec::new())).unwrap();
        assert_eq!(result.portfolio_values.len(), 5_000);
        assert!(result.portfolio_values.iter().all(|&v| v == 0.0));
        assert_eq!(result.mean, 0.0);
        assert_eq!(result.std, 0.0);
    }

    #[test]
    fn test_short_mirrors_long() {
        let long = simulate_portfolio(&request(vec![atm_call(Side::Long)])).unwrap();
        let short = simulate_portfolio(&request(vec![atm_call(Side::Short)])).unwrap();

        for (l, s) in long.portfolio_values.iter().zip(&short.portfolio_values) {
            assert_eq!(*l, -*s);
        }
        assert_relative_eq!(long.mean, -short.mean, epsilon = 1e-12);
    }

    #[test]
    fn test_long_call_loss_bounded_by_premium() {
        let result = simulate_portfolio(&request(vec![atm_call(Side::Long)])).unwrap();
        let premium = 11.348476825143514;
        assert!(result
            .portfolio_values
            .iter()
            .all(|&v| v >= -premium - 1e-9));
        assert!(result.var_1 <= result.var_5);
    }

    #[test]
    fn test_request_errors_are_named() {
        let mut req = request(vec![atm_call(Side::Long)]);
        req.horizon = -1.0;
        let err = simulate_portfolio(&req).unwrap_err();
        assert_eq!(err.input_error().field(), Some("horizon"));
        assert_eq!(err.position(), None);

        let req = request(vec![atm_call(Side::Long)]).with_n_simulations(0);
        assert_eq!(
            simulate_portfolio(&req).unwrap_err().input_error().field(),
            Some("n_simulations")
        );
    }

    #[test]
    fn test_budget_exceeded() {
        let req = request(vec![atm_call(Side::Long)]);
        let err = RiskSimulator::new()
            .with_max_path_cells(1_000)
            .simulate(&req)
            .unwrap_err();
        assert_eq!(
            err,
            PricingError::InvalidInput(InputError::PathBudgetExceeded {
                cells: 60_000,
                limit: 1_000
            })
        );
    }

    #[test]
    fn test_default_budget_bounds_large_daily_grids() {
        let req = request(vec![atm_call(Side::Long)])
            .with_steps(252)
            .with_n_simulations(200_000);
        assert_eq!(
            RiskSimulator::new().simulate(&req).unwrap_err(),
            PricingError::InvalidInput(InputError::PathBudgetExceeded {
                cells: 50_400_000,
                limit: DEFAULT_MAX_PATH_CELLS
            })
        );

        let raised = RiskSimulator::new().with_max_path_cells(50_400_000);
        assert_eq!(raised.max_path_cells(), 50_400_000);
    }

    #[test]
    fn test_single_step_pnl_is_intrinsic_at_spot_minus_premium() {
        // steps = 1 leaves S_T at spot on every path
        let req = request(vec![atm_call(Side::Long)]).with_steps(1);
        let result = simulate_portfolio(&req).unwrap();
        let expected = 0.0 - 11.348476825143514;
        for v in result.portfolio_values {
            assert_relative_eq!(v, expected, epsilon = 1e-9);
        }
    }
}
