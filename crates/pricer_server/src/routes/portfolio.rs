//! Portfolio analytics and simulation endpoints
//!
//! Both endpoints accept boundary positions (`type`, `side`, `quantity`,
//! `strike`, `time_to_expiry`, optional `volatility`). When a `ticker` is
//! given and a dataset is loaded, the ticker's latest close stands in for a
//! missing `spot` and its volatility fills missing position volatilities.
//!
//! Engine calls run on the blocking pool.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};

use pricer_core::market_data::MarketContext;
use pricer_core::math::statistics::HistogramBin;
use pricer_core::types::validate::require_count;
use pricer_core::types::InputError;
use pricer_models::instruments::PositionSpec;
use pricer_pricing::mc::TerminalSampling;
use pricer_risk::portfolio::{AnalyticResult, PortfolioAggregator};
use pricer_risk::simulation::{SimulationRequest, SimulationResult};
use pricer_risk::volatility::PositionResolver;

use super::AppState;
use crate::error::ApiError;

/// Body of `POST /api/v1/portfolio/analyze`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzeRequest {
    /// Positions in order
    pub positions: Vec<PositionSpec>,
    /// Underlying price; defaults to the ticker's latest close
    #[serde(default)]
    pub spot: Option<f64>,
    /// Annualised rate; defaults to the server setting
    #[serde(default)]
    pub risk_free_rate: Option<f64>,
    /// Dataset ticker for spot and volatility defaults
    #[serde(default)]
    pub ticker: Option<String>,
}

/// Body of `POST /api/v1/portfolio/simulate`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SimulateRequest {
    /// Positions in order
    pub positions: Vec<PositionSpec>,
    /// Underlying price; defaults to the ticker's latest close
    pub spot: Option<f64>,
    /// Annualised rate; defaults to the server setting
    pub risk_free_rate: Option<f64>,
    /// Simulation horizon in years
    pub horizon: Option<f64>,
    /// Volatility of the simulated underlying; defaults to the ticker's
    pub simulation_volatility: Option<f64>,
    /// Number of paths
    pub n_simulations: Option<usize>,
    /// Columns per path
    pub steps: Option<usize>,
    /// Stream seed
    pub seed: Option<u64>,
    /// Dataset ticker for spot and volatility defaults
    pub ticker: Option<String>,
    /// Histogram bins to include in the response
    pub histogram_bins: Option<usize>,
    /// Terminal sampling mode
    pub sampling: Option<TerminalSampling>,
}

/// Simulation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulateResponse {
    /// Per-path P&L and summary statistics
    #[serde(flatten)]
    pub result: SimulationResult,
    /// Number of paths simulated
    pub n_simulations: usize,
    /// Columns per path
    pub steps: usize,
    /// Volatility of the simulated underlying
    pub simulation_volatility: f64,
    /// P&L histogram, when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub histogram: Option<Vec<HistogramBin>>,
}

/// Build the portfolio routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/portfolio/analyze", post(analyze_handler))
        .route("/api/v1/portfolio/simulate", post(simulate_handler))
        .route("/portfolio/analyze", post(analyze_handler))
        .route("/portfolio/simulate", post(simulate_handler))
}

async fn analyze_handler(
    State(state): State<AppState>,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyticResult>, ApiError> {
    let Json(request) = body?;
    let result = run_blocking(move || analyze(&state, &request)).await?;
    Ok(Json(result))
}

async fn simulate_handler(
    State(state): State<AppState>,
    body: Result<Json<SimulateRequest>, JsonRejection>,
) -> Result<Json<SimulateResponse>, ApiError> {
    let Json(request) = body?;
    let response = run_blocking(move || simulate(&state, &request)).await?;
    Ok(Json(response))
}

async fn run_blocking<T, F>(job: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(job)
        .await
        .map_err(|err| ApiError::Internal(err.to_string()))?
}

fn market_for(
    state: &AppState,
    spot: Option<f64>,
    risk_free_rate: Option<f64>,
    ticker: Option<&str>,
) -> Result<MarketContext, InputError> {
    let spot = spot
        .or_else(|| ticker.and_then(|t| state.provider()?.reference_spot(t)))
        .ok_or(InputError::MissingField { field: "spot" })?;
    MarketContext::new(
        spot,
        risk_free_rate.unwrap_or(state.config.default_risk_free_rate),
    )
}

fn resolver_for<'a>(
    state: &'a AppState,
    ticker: Option<&'a str>,
    fallback: Option<f64>,
) -> PositionResolver<'a> {
    let resolver = PositionResolver::new().with_fallback(fallback);
    match (state.provider(), ticker) {
        (Some(provider), Some(ticker)) => resolver.with_provider(provider, ticker),
        _ => resolver,
    }
}

/// Values a portfolio in closed form.
pub fn analyze(state: &AppState, request: &AnalyzeRequest) -> Result<AnalyticResult, ApiError> {
    let ticker = request.ticker.as_deref();
    let market = market_for(state, request.spot, request.risk_free_rate, ticker)?;
    let positions = resolver_for(state, ticker, None).resolve_all(&request.positions)?;

    let result = PortfolioAggregator::new(market).analyze(&positions)?;
    tracing::info!(
        positions = positions.len(),
        total_value = result.total_value,
        "Portfolio analyzed"
    );
    Ok(result)
}

/// Simulates terminal P&L of a portfolio.
pub fn simulate(state: &AppState, request: &SimulateRequest) -> Result<SimulateResponse, ApiError> {
    let config = &state.config;
    let ticker = request.ticker.as_deref();
    let market = market_for(state, request.spot, request.risk_free_rate, ticker)?;

    let horizon = request
        .horizon
        .ok_or(InputError::MissingField { field: "horizon" })?;
    let simulation_volatility = request
        .simulation_volatility
        .or_else(|| ticker.and_then(|t| state.provider()?.volatility(t)))
        .ok_or(InputError::MissingField {
            field: "simulation_volatility",
        })?;

    let n_simulations = request.n_simulations.unwrap_or(config.default_simulations);
    if n_simulations > config.max_simulations {
        return Err(InputError::TooLarge {
            field: "n_simulations",
            value: n_simulations,
            limit: config.max_simulations,
        }
        .into());
    }
    let steps = request.steps.unwrap_or(config.default_steps);
    let bins = request
        .histogram_bins
        .map(|bins| require_count("histogram_bins", bins))
        .transpose()?;

    let positions = resolver_for(state, ticker, Some(simulation_volatility))
        .resolve_all(&request.positions)?;

    let simulation = SimulationRequest::new(positions, market, horizon, simulation_volatility)
        .with_steps(steps)
        .with_n_simulations(n_simulations)
        .with_seed(request.seed)
        .with_sampling(request.sampling.unwrap_or_default());

    let result = state.simulator().simulate(&simulation)?;
    tracing::info!(
        positions = simulation.positions.len(),
        n_simulations,
        steps,
        seed = result.seed,
        mean = result.mean,
        "Portfolio simulated"
    );

    Ok(SimulateResponse {
        histogram: bins.map(|bins| result.histogram(bins)),
        result,
        n_simulations,
        steps,
        simulation_volatility,
    })
}
