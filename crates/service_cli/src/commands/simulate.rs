//! Simulate command implementation
//!
//! Runs the Monte Carlo P&L simulation for a portfolio and prints the
//! summary statistics, optionally with the full per-path vector (JSON) or
//! a histogram (table).

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use pricer_core::types::InputError;
use pricer_pricing::mc::TerminalSampling;
use pricer_risk::simulation::{RiskSimulator, SimulationRequest, SimulationResult};
use pricer_risk::volatility::VolatilityProvider;
use serde::Serialize;
use tracing::info;

use super::{load_dataset, load_portfolio, market_for, resolver_for, OutputFormat};
use crate::config::CliConfig;
use crate::{CliError, Result};

/// Terminal sampling flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Sampling {
    /// Terminal column of the stepped path
    #[default]
    Stepped,
    /// One closed-form draw per path
    Exact,
}

impl From<Sampling> for TerminalSampling {
    fn from(sampling: Sampling) -> Self {
        match sampling {
            Sampling::Stepped => TerminalSampling::Stepped,
            Sampling::Exact => TerminalSampling::Exact,
        }
    }
}

/// Arguments of `simulate`
#[derive(Debug, Clone, Args)]
pub struct SimulateArgs {
    /// Portfolio file (JSON)
    #[arg(short, long)]
    pub portfolio: PathBuf,

    /// Underlying price, overriding the file
    #[arg(long)]
    pub spot: Option<f64>,

    /// Annualised risk-free rate, overriding the file
    #[arg(long)]
    pub rate: Option<f64>,

    /// Simulation horizon in years, overriding the file
    #[arg(long)]
    pub horizon: Option<f64>,

    /// Volatility of the simulated underlying, overriding the file
    #[arg(long)]
    pub simulation_volatility: Option<f64>,

    /// Dataset ticker used for spot and volatility defaults
    #[arg(long)]
    pub ticker: Option<String>,

    /// Stream seed; drawn from entropy when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Columns per path
    #[arg(long)]
    pub steps: Option<usize>,

    /// Number of paths
    #[arg(short, long)]
    pub n_simulations: Option<usize>,

    /// Terminal sampling mode
    #[arg(long, value_enum, default_value_t = Sampling::Stepped)]
    pub sampling: Sampling,

    /// Histogram bins printed with the table output
    #[arg(long, default_value_t = 20)]
    pub bins: usize,

    /// Include every path's P&L in the JSON output
    #[arg(long)]
    pub include_paths: bool,
}

#[derive(Serialize)]
struct Summary<'a> {
    n_simulations: usize,
    steps: usize,
    simulation_volatility: f64,
    mean: f64,
    std: f64,
    #[serde(rename = "VaR_5")]
    var_5: f64,
    #[serde(rename = "VaR_1")]
    var_1: f64,
    seed: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    portfolio_values: Option<&'a [f64]>,
}

/// Run the simulate command
pub fn run(
    args: &SimulateArgs,
    config: &CliConfig,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let portfolio = load_portfolio(&args.portfolio)?;
    let dataset = load_dataset(config.volatility_dataset.as_deref())?;
    let provider: Option<&dyn VolatilityProvider> =
        dataset.as_ref().map(|d| d as &dyn VolatilityProvider);

    let ticker = args.ticker.as_deref().or(portfolio.ticker.as_deref());
    let rate = args
        .rate
        .or(portfolio.risk_free_rate)
        .unwrap_or(config.risk_free_rate);
    let market = market_for(args.spot.or(portfolio.spot), rate, ticker, provider)?;

    let horizon = args
        .horizon
        .or(portfolio.horizon)
        .ok_or(InputError::MissingField { field: "horizon" })?;
    let simulation_volatility = args
        .simulation_volatility
        .or(portfolio.simulation_volatility)
        .or_else(|| ticker.and_then(|t| provider?.volatility(t)))
        .ok_or(InputError::MissingField {
            field: "simulation_volatility",
        })?;

    let positions = resolver_for(provider, ticker, Some(simulation_volatility))
        .resolve_all(&portfolio.positions)?;

    let steps = args.steps.unwrap_or(config.steps);
    let n_simulations = args.n_simulations.unwrap_or(config.n_simulations);
    let request = SimulationRequest::new(positions, market, horizon, simulation_volatility)
        .with_steps(steps)
        .with_n_simulations(n_simulations)
        .with_seed(args.seed)
        .with_sampling(args.sampling.into());

    let result = RiskSimulator::new().simulate(&request)?;
    info!(
        n_simulations,
        steps,
        seed = result.seed,
        mean = result.mean,
        "Simulation complete"
    );

    let summary = Summary {
        n_simulations,
        steps,
        simulation_volatility,
        mean: result.mean,
        std: result.std,
        var_5: result.var_5,
        var_1: result.var_1,
        seed: result.seed,
        portfolio_values: args.include_paths.then_some(result.portfolio_values.as_slice()),
    };

    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?,
        OutputFormat::Table => {
            if args.bins == 0 {
                return Err(CliError::InvalidArgument("--bins must be at least 1".into()));
            }
            write_table(&summary, &result, args.bins, out)?
        }
    }
    Ok(())
}

fn write_table(
    summary: &Summary<'_>,
    result: &SimulationResult,
    bins: usize,
    out: &mut dyn Write,
) -> std::io::Result<()> {
    writeln!(out, "paths        {}", summary.n_simulations)?;
    writeln!(out, "steps        {}", summary.steps)?;
    writeln!(out, "sim vol      {:.4}", summary.simulation_volatility)?;
    writeln!(out, "seed         {}", summary.seed)?;
    writeln!(out, "mean         {:.4}", summary.mean)?;
    writeln!(out, "std          {:.4}", summary.std)?;
    writeln!(out, "VaR 5%       {:.4}", summary.var_5)?;
    writeln!(out, "VaR 1%       {:.4}", summary.var_1)?;
    writeln!(out)?;

    let histogram = result.histogram(bins);
    let peak = histogram.iter().map(|b| b.count).max().unwrap_or(0).max(1);
    for bin in &histogram {
        let bar = "#".repeat(bin.count * 40 / peak);
        writeln!(
            out,
            "[{:>10.2}, {:>10.2})  {:>7}  {}",
            bin.lower, bin.upper, bin.count, bar
        )?;
    }
    Ok(())
}
