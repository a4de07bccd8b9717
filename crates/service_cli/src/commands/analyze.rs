//! Analyze command implementation
//!
//! Values a portfolio in closed form and prints totals and the per-position
//! breakdown.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use pricer_risk::portfolio::{AnalyticResult, PortfolioAggregator};
use pricer_risk::volatility::VolatilityProvider;
use tracing::info;

use super::{load_dataset, load_portfolio, market_for, resolver_for, OutputFormat};
use crate::config::CliConfig;
use crate::Result;

/// Arguments of `analyze`
#[derive(Debug, Clone, Args)]
pub struct AnalyzeArgs {
    /// Portfolio file (JSON)
    #[arg(short, long)]
    pub portfolio: PathBuf,

    /// Underlying price, overriding the file
    #[arg(long)]
    pub spot: Option<f64>,

    /// Annualised risk-free rate, overriding the file
    #[arg(long)]
    pub rate: Option<f64>,

    /// Dataset ticker used for spot and volatility defaults
    #[arg(long)]
    pub ticker: Option<String>,
}

/// Run the analyze command
pub fn run(
    args: &AnalyzeArgs,
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

    let positions = resolver_for(provider, ticker, None).resolve_all(&portfolio.positions)?;
    let result = PortfolioAggregator::new(market).analyze(&positions)?;
    info!(
        positions = positions.len(),
        total_value = result.total_value,
        "Analysis complete"
    );

    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?,
        OutputFormat::Table => write_table(&result, out)?,
    }
    Ok(())
}

fn write_table(result: &AnalyticResult, out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(
        out,
        "{:>3}  {:<4}  {:<5}  {:>4}  {:>9}  {:>6}  {:>12}  {:>10}  {:>10}  {:>10}  {:>10}  {:>10}",
        "#", "type", "side", "qty", "strike", "T", "value", "delta", "gamma", "theta", "vega", "rho"
    )?;
    for p in &result.positions {
        writeln!(
            out,
            "{:>3}  {:<4}  {:<5}  {:>4}  {:>9.2}  {:>6.3}  {:>12.4}  {:>10.4}  {:>10.5}  {:>10.4}  {:>10.4}  {:>10.4}",
            p.index,
            p.position.kind(),
            p.position.side(),
            p.position.quantity(),
            p.position.strike(),
            p.position.time_to_expiry(),
            p.value,
            p.delta,
            p.gamma,
            p.theta,
            p.vega,
            p.rho
        )?;
    }
    writeln!(
        out,
        "{:>3}  {:<4}  {:<5}  {:>4}  {:>9}  {:>6}  {:>12.4}  {:>10.4}  {:>10.5}  {:>10.4}  {:>10.4}  {:>10.4}",
        "",
        "",
        "total",
        "",
        "",
        "",
        result.total_value,
        result.total_delta,
        result.total_gamma,
        result.total_theta,
        result.total_vega,
        result.total_rho
    )
}
