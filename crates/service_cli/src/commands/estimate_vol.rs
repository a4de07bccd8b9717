//! Estimate-vol command implementation
//!
//! Builds the historical volatility dataset from a directory of daily price
//! CSV files and writes it as JSON.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use pricer_risk::volatility::{estimate_directory, VolatilityDataset};
use serde::Serialize;
use tracing::info;

use super::OutputFormat;
use crate::Result;

/// Arguments of `estimate-vol`
#[derive(Debug, Clone, Args)]
pub struct EstimateVolArgs {
    /// Directory of price files (`Date`, `Close`, optional `Ticker`)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Dataset file to write
    #[arg(short, long, default_value = "volatility_data.json")]
    pub output: PathBuf,
}

#[derive(Serialize)]
struct Summary<'a> {
    output: String,
    total_tickers: usize,
    generated_at: &'a str,
}

/// Run the estimate-vol command
pub fn run(args: &EstimateVolArgs, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    let dataset = estimate_directory(&args.input)?;
    dataset.write_to_path(&args.output)?;
    info!(
        output = %args.output.display(),
        tickers = dataset.len(),
        "Volatility dataset written"
    );

    match format {
        OutputFormat::Json => {
            let summary = Summary {
                output: args.output.display().to_string(),
                total_tickers: dataset.len(),
                generated_at: &dataset.metadata.generated_at,
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
        }
        OutputFormat::Table => write_table(&dataset, out)?,
    }
    Ok(())
}

fn write_table(dataset: &VolatilityDataset, out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(
        out,
        "{:<8}  {:>8}  {:>10}  {:>10}  {:>6}  {:<10}  {:<10}",
        "ticker", "vol", "latest", "return", "days", "from", "to"
    )?;
    for record in dataset.tickers.values() {
        writeln!(
            out,
            "{:<8}  {:>8.4}  {:>10.2}  {:>10.4}  {:>6}  {:<10}  {:<10}",
            record.ticker,
            record.volatility,
            record.latest_price,
            record.mean_annual_return,
            record.data_points,
            record.date_range.start.get(..10).unwrap_or(&record.date_range.start),
            record.date_range.end.get(..10).unwrap_or(&record.date_range.end)
        )?;
    }
    writeln!(out, "{} tickers", dataset.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;
    use approx::assert_relative_eq;
    use std::fmt::Write as _;

    fn write_prices(path: &std::path::Path, days: usize) {
        let start = chrono::NaiveDate::from_ymd_opt(2023, 3, 1).unwrap();
        let mut csv = String::from("Date,Close\n");
        for i in 0..days {
            let date = start + chrono::Days::new(i as u64);
            let close = 100.0 + 10.0 * (0.3 * i as f64).sin();
            writeln!(csv, "{},{}", date.format("%Y-%m-%d"), close).unwrap();
        }
        std::fs::write(path, csv).unwrap();
    }

    #[test]
    fn test_writes_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let prices = dir.path().join("prices");
        std::fs::create_dir(&prices).unwrap();
        write_prices(&prices.join("SINE.csv"), 60);
        write_prices(&prices.join("SHORT.csv"), 10);

        let args = EstimateVolArgs {
            input: prices,
            output: dir.path().join("out/volatility.json"),
        };
        let mut out = Vec::new();
        run(&args, OutputFormat::Table, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("SINE"));
        assert!(!text.contains("SHORT"));
        assert!(text.contains("2023-03-02"));
        assert!(text.ends_with("1 tickers\n"));

        let dataset = VolatilityDataset::from_path(&args.output).unwrap();
        assert_eq!(dataset.metadata.total_tickers, 1);
        assert_relative_eq!(
            dataset.tickers["SINE"].volatility,
            0.33376377531898177,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_json_summary() {
        let dir = tempfile::tempdir().unwrap();
        write_prices(&dir.path().join("SINE.csv"), 60);

        let args = EstimateVolArgs {
            input: dir.path().to_path_buf(),
            output: dir.path().join("volatility.json"),
        };
        let mut out = Vec::new();
        run(&args, OutputFormat::Json, &mut out).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["total_tickers"], 1);
    }

    #[test]
    fn test_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let args = EstimateVolArgs {
            input: dir.path().to_path_buf(),
            output: dir.path().join("volatility.json"),
        };
        let err = run(&args, OutputFormat::Table, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, CliError::Dataset(_)));
        assert!(!args.output.exists());
    }
}
