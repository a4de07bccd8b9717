//! option-risk - command line option portfolio analytics
//!
//! # Commands
//!
//! - `option-risk analyze --portfolio <file>` - closed-form value and Greeks
//! - `option-risk simulate --portfolio <file>` - Monte Carlo P&L distribution
//! - `option-risk estimate-vol --input <dir>` - build the volatility dataset
//!
//! A TOML file given with `--config` supplies the dataset path and the
//! numeric defaults; flags and portfolio-file fields take precedence.

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

use commands::analyze::AnalyzeArgs;
use commands::estimate_vol::EstimateVolArgs;
use commands::simulate::SimulateArgs;
use commands::OutputFormat;
use config::CliConfig;
pub use error::{CliError, Result};

/// Option portfolio analytics
#[derive(Parser)]
#[command(name = "option-risk")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Value a portfolio and its Greeks in closed form
    Analyze(AnalyzeArgs),

    /// Simulate the portfolio P&L distribution at a horizon
    Simulate(SimulateArgs),

    /// Estimate historical volatility from daily price files
    EstimateVol(EstimateVolArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so command output can be piped.
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let config = CliConfig::load(cli.config.as_deref())?;
    debug!(?config, "Configuration loaded");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match &cli.command {
        Commands::Analyze(args) => commands::analyze::run(args, &config, cli.format, &mut out)?,
        Commands::Simulate(args) => commands::simulate::run(args, &config, cli.format, &mut out)?,
        Commands::EstimateVol(args) => commands::estimate_vol::run(args, cli.format, &mut out)?,
    }
    out.flush()?;
    Ok(())
}
