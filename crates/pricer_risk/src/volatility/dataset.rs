//! Historical volatility dataset.
//!
//! JSON layout:
//!
//! ```text
//! {
//!   "metadata": {"total_tickers": 2, "generated_at": "...", "trading_days_per_year": 252},
//!   "tickers": {
//!     "AAPL": {"ticker": "AAPL", "volatility": 0.27, "mean_annual_return": 0.18,
//!              "latest_price": 189.3, "min_price": 124.2, "max_price": 198.1,
//!              "data_points": 503,
//!              "date_range": {"start": "2022-01-04T00:00:00", "end": "2023-12-29T00:00:00"}},
//!     ...
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::error::DatasetError;
use super::provider::VolatilityProvider;

/// Trading days used to annualise daily statistics.
pub const TRADING_DAYS_PER_YEAR: u32 = 252;

/// First and last observation dates, ISO 8601 without offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First date
    pub start: String,
    /// Last date
    pub end: String,
}

/// Volatility and price summary for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerVolatility {
    /// Ticker symbol
    pub ticker: String,
    /// Annualised volatility of daily log returns
    pub volatility: f64,
    /// Annualised mean daily log return
    pub mean_annual_return: f64,
    /// Most recent close
    pub latest_price: f64,
    /// Lowest close in the window
    pub min_price: f64,
    /// Highest close in the window
    pub max_price: f64,
    /// Number of log returns used
    pub data_points: usize,
    /// Window covered
    pub date_range: DateRange,
}

/// Dataset header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetMetadata {
    /// Number of tickers in the dataset
    pub total_tickers: usize,
    /// Generation timestamp (RFC 3339)
    pub generated_at: String,
    /// Annualisation factor used
    pub trading_days_per_year: u32,
}

impl Default for DatasetMetadata {
    fn default() -> Self {
        Self {
            total_tickers: 0,
            generated_at: String::new(),
            trading_days_per_year: TRADING_DAYS_PER_YEAR,
        }
    }
}

/// Per-ticker historical volatilities, loaded once and read-only after.
///
/// # Examples
///
/// ```
/// use pricer_risk::volatility::{VolatilityDataset, VolatilityProvider};
///
/// let json = r#"{
///     "metadata": {"total_tickers": 1, "generated_at": "2024-01-01T00:00:00Z", "trading_days_per_year": 252},
///     "tickers": {"AAPL": {"ticker": "AAPL", "volatility": 0.27, "mean_annual_return": 0.1,
///                          "latest_price": 190.0, "min_price": 120.0, "max_price": 199.0,
///                          "data_points": 250,
///                          "date_range": {"start": "2023-01-03T00:00:00", "end": "2023-12-29T00:00:00"}}}
/// }"#;
///
/// let dataset = VolatilityDataset::from_json_str(json).unwrap();
/// assert_eq!(dataset.volatility("aapl"), Some(0.27));
/// assert_eq!(dataset.reference_spot("AAPL"), Some(190.0));
/// assert_eq!(dataset.volatility("MSFT"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VolatilityDataset {
    /// Dataset header
    #[serde(default)]
    pub metadata: DatasetMetadata,
    /// Records keyed by ticker
    pub tickers: BTreeMap<String, TickerVolatility>,
}

impl VolatilityDataset {
    /// Builds a dataset stamped with the current time.
    pub fn from_records(records: impl IntoIterator<Item = TickerVolatility>) -> Self {
        let tickers: BTreeMap<String, TickerVolatility> = records
            .into_iter()
            .map(|r| (r.ticker.clone(), r))
            .collect();
        Self {
            metadata: DatasetMetadata {
                total_tickers: tickers.len(),
                generated_at: Utc::now().to_rfc3339(),
                trading_days_per_year: TRADING_DAYS_PER_YEAR,
            },
            tickers,
        }
    }

    /// Parses a dataset from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a dataset from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| DatasetError::io(path, e))?;
        Self::from_json_str(&text)
    }

    /// Pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, DatasetError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the dataset as JSON, creating parent directories.
    pub fn write_to_path(&self, path: impl AsRef<Path>) -> Result<(), DatasetError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| DatasetError::io(parent, e))?;
        }
        fs::write(path, self.to_json_string()?).map_err(|e| DatasetError::io(path, e))
    }

    /// Looks up a ticker, exact match first, then ignoring ASCII case.
    pub fn get(&self, ticker: &str) -> Option<&TickerVolatility> {
        let ticker = ticker.trim();
        self.tickers.get(ticker).or_else(|| {
            self.tickers
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(ticker))
                .map(|(_, record)| record)
        })
    }

    /// Records whose ticker contains `query`, ignoring case, in ticker order.
    ///
    /// An empty query matches every record.
    pub fn search(&self, query: &str) -> Vec<&TickerVolatility> {
        let needle = query.trim().to_ascii_uppercase();
        self.tickers
            .values()
            .filter(|r| r.ticker.to_ascii_uppercase().contains(&needle))
            .collect()
    }

    /// Number of tickers.
    pub fn len(&self) -> usize {
        self.tickers.len()
    }

    /// Whether the dataset has no tickers.
    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }
}

impl VolatilityProvider for VolatilityDataset {
    fn volatility(&self, ticker: &str) -> Option<f64> {
        self.get(ticker).map(|r| r.volatility)
    }

    fn reference_spot(&self, ticker: &str) -> Option<f64> {
        self.get(ticker).map(|r| r.latest_price)
    }
}
