//! Historical volatility from daily close prices.
//!
//! Price files are CSV with a `Date` and a `Close` column. A `Ticker`
//! column, when present, splits one file into several series; otherwise
//! the file stem names the ticker.
//!
//! For each series sorted by date, daily log returns `ln(Cₜ / Cₜ₋₁)` are
//! annualised with 252 trading days:
//!
//! ```text
//! volatility         = sample_std(returns) · √252
//! mean_annual_return = mean(returns) · 252
//! ```
//!
//! Price extremes and the date range cover the observations that carry a
//! return, i.e. every observation but the first.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use pricer_core::math::statistics::{mean, sample_std};
use tracing::{debug, info, warn};

use super::dataset::{DateRange, TickerVolatility, VolatilityDataset, TRADING_DAYS_PER_YEAR};
use super::error::DatasetError;

/// Fewest log returns accepted for an estimate.
pub const MIN_RETURNS: usize = 30;

const DATE_FORMAT: &str = "%Y-%m-%dT00:00:00";

/// One daily close.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceObservation {
    /// Trading date
    pub date: NaiveDate,
    /// Closing price
    pub close: f64,
}

impl PriceObservation {
    /// Creates an observation.
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Estimates the annualised volatility of one price series.
///
/// Observations may arrive in any order; they are sorted by date first.
///
/// # Errors
/// `DatasetError::InsufficientData` when fewer than [`MIN_RETURNS`] log
/// returns are available.
pub fn estimate_volatility(
    ticker: &str,
    observations: &[PriceObservation],
) -> Result<TickerVolatility, DatasetError> {
    let mut sorted = observations.to_vec();
    sorted.sort_by_key(|o| o.date);

    let returns: Vec<f64> = sorted
        .windows(2)
        .map(|w| (w[1].close / w[0].close).ln())
        .collect();

    let insufficient = || DatasetError::InsufficientData {
        ticker: ticker.to_string(),
        returns: returns.len(),
        required: MIN_RETURNS,
    };
    if returns.len() < MIN_RETURNS {
        return Err(insufficient());
    }

    let days = f64::from(TRADING_DAYS_PER_YEAR);
    let std = sample_std(&returns).ok_or_else(insufficient)?;
    let drift = mean(&returns).ok_or_else(insufficient)?;

    let window = &sorted[1..];
    let (min_price, max_price) = window
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), o| {
            (lo.min(o.close), hi.max(o.close))
        });
    let (first, last) = match (window.first(), window.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(insufficient()),
    };

    Ok(TickerVolatility {
        ticker: ticker.to_string(),
        volatility: std * days.sqrt(),
        mean_annual_return: drift * days,
        latest_price: last.close,
        min_price,
        max_price,
        data_points: returns.len(),
        date_range: DateRange {
            start: first.date.format(DATE_FORMAT).to_string(),
            end: last.date.format(DATE_FORMAT).to_string(),
        },
    })
}

/// Reads price series from CSV, grouped by ticker.
///
/// Rows with an unparseable date, a non-positive close or a blank ticker
/// are skipped.
///
/// # Errors
/// `DatasetError::MissingColumn` when `Date` or `Close` is absent, or
/// `DatasetError::Csv` for malformed CSV.
pub fn read_price_csv<R: Read>(
    reader: R,
    default_ticker: &str,
) -> Result<BTreeMap<String, Vec<PriceObservation>>, DatasetError> {
    let mut csv = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = csv.headers()?.clone();
    let column = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));

    let date_col = column("Date").ok_or(DatasetError::MissingColumn { column: "Date" })?;
    let close_col = column("Close").ok_or(DatasetError::MissingColumn { column: "Close" })?;
    let ticker_col = column("Ticker");

    let mut series: BTreeMap<String, Vec<PriceObservation>> = BTreeMap::new();
    let mut skipped = 0usize;

    for row in csv.records() {
        let row = row?;
        let date = row.get(date_col).and_then(parse_date);
        let close = row
            .get(close_col)
            .and_then(|c| c.parse::<f64>().ok())
            .filter(|c| c.is_finite() && *c > 0.0);
        let ticker = match ticker_col {
            Some(col) => row.get(col).unwrap_or_default(),
            None => default_ticker,
        };

        match (date, close) {
            (Some(date), Some(close)) if !ticker.is_empty() => series
                .entry(ticker.to_string())
                .or_default()
                .push(PriceObservation::new(date, close)),
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!(skipped, "Skipped unusable price rows");
    }
    Ok(series)
}

/// Accepts `YYYY-MM-DD`, optionally followed by a time component.
fn parse_date(field: &str) -> Option<NaiveDate> {
    let day = field.get(..10).unwrap_or(field);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// Estimates every ticker in one price file.
///
/// Tickers with too little history are logged and left out.
pub fn estimate_file(path: impl AsRef<Path>) -> Result<Vec<TickerVolatility>, DatasetError> {
    let path = path.as_ref();
    let default_ticker = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let file = File::open(path).map_err(|e| DatasetError::io(path, e))?;
    let series = read_price_csv(file, &default_ticker)?;

    let mut estimates = Vec::with_capacity(series.len());
    for (ticker, observations) in &series {
        match estimate_volatility(ticker, observations) {
            Ok(estimate) => {
                debug!(
                    ticker = %estimate.ticker,
                    volatility = estimate.volatility,
                    latest_price = estimate.latest_price,
                    data_points = estimate.data_points,
                    "Estimated volatility"
                );
                estimates.push(estimate);
            }
            Err(err @ DatasetError::InsufficientData { .. }) => {
                warn!(%err, "Skipping ticker");
            }
            Err(err) => return Err(err),
        }
    }
    Ok(estimates)
}

/// Builds a dataset from every `*.csv` file in `dir`.
///
/// A file that cannot be processed is logged and skipped. When two files
/// carry the same ticker, the later file in name order wins.
///
/// # Errors
/// `DatasetError::Io` when `dir` cannot be listed, `DatasetError::NoData`
/// when no ticker yields an estimate.
pub fn estimate_directory(dir: impl AsRef<Path>) -> Result<VolatilityDataset, DatasetError> {
    let dir = dir.as_ref();
    let mut files: Vec<_> = fs::read_dir(dir)
        .map_err(|e| DatasetError::io(dir, e))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
        })
        .collect();
    files.sort();

    info!(dir = %dir.display(), files = files.len(), "Estimating historical volatility");

    let mut records = Vec::new();
    for file in &files {
        match estimate_file(file) {
            Ok(estimates) => records.extend(estimates),
            Err(err) => warn!(file = %file.display(), %err, "Skipping price file"),
        }
    }

    if records.is_empty() {
        return Err(DatasetError::NoData {
            path: dir.to_path_buf(),
        });
    }

    let dataset = VolatilityDataset::from_records(records);
    info!(tickers = dataset.len(), "Volatility dataset built");
    Ok(dataset)
}
