//! Simulated P&L distribution.

use pricer_core::math::statistics::{histogram, mean, percentiles, population_std, HistogramBin};
use serde::{Deserialize, Serialize};

/// Default bin count for [`SimulationResult::histogram`] callers.
pub const DEFAULT_HISTOGRAM_BINS: usize = 50;

/// Terminal portfolio P&L per path with summary statistics.
///
/// `VaR_5` and `VaR_1` are the empirical 5th and 1st percentiles of the
/// P&L, with linear interpolation between order statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// P&L of every path, in path order
    pub portfolio_values: Vec<f64>,
    /// Sample mean
    pub mean: f64,
    /// Population standard deviation
    pub std: f64,
    /// 5th percentile
    #[serde(rename = "VaR_5")]
    pub var_5: f64,
    /// 1st percentile
    #[serde(rename = "VaR_1")]
    pub var_1: f64,
    /// Seed of the simulation stream
    pub seed: u64,
}

impl SimulationResult {
    /// Computes the statistics of `portfolio_values`.
    ///
    /// An empty vector yields NaN statistics.
    pub fn from_values(portfolio_values: Vec<f64>, seed: u64) -> Self {
        let tails = percentiles(&portfolio_values, &[5.0, 1.0]).unwrap_or_default();
        Self {
            mean: mean(&portfolio_values).unwrap_or(f64::NAN),
            std: population_std(&portfolio_values).unwrap_or(f64::NAN),
            var_5: tails.first().copied().unwrap_or(f64::NAN),
            var_1: tails.get(1).copied().unwrap_or(f64::NAN),
            portfolio_values,
            seed,
        }
    }

    /// Number of simulated paths.
    pub fn n_simulations(&self) -> usize {
        self.portfolio_values.len()
    }

    /// Equal-width histogram of the P&L between its minimum and maximum.
    pub fn histogram(&self, bins: usize) -> Vec<HistogramBin> {
        histogram(&self.portfolio_values, bins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_statistics_from_values() {
        let values: Vec<f64> = (1..=100).map(f64::from).collect();
        let result = SimulationResult::from_values(values, 3);

        assert_relative_eq!(result.mean, 50.5, epsilon = 1e-12);
        assert_relative_eq!(result.std, (9999.0_f64 / 12.0).sqrt(), epsilon = 1e-12);
        assert_relative_eq!(result.var_5, 5.95, epsilon = 1e-12);
        assert_relative_eq!(result.var_1, 1.99, epsilon = 1e-12);
        assert_eq!(result.seed, 3);
        assert_eq!(result.n_simulations(), 100);
    }

    #[test]
    fn test_single_value() {
        let result = SimulationResult::from_values(vec![-4.0], 0);
        assert_eq!(result.mean, -4.0);
        assert_eq!(result.std, 0.0);
        assert_eq!(result.var_5, -4.0);
        assert_eq!(result.var_1, -4.0);
    }

    #[test]
    fn test_histogram_counts_every_path() {
        let values: Vec<f64> = (0..1000).map(|i| (i as f64 * 0.37).sin() * 10.0).collect();
        let result = SimulationResult::from_values(values, 0);

        let bins = result.histogram(DEFAULT_HISTOGRAM_BINS);
        assert_eq!(bins.len(), DEFAULT_HISTOGRAM_BINS);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 1000);
    }

    #[test]
    fn test_serialized_names() {
        let result = SimulationResult::from_values(vec![1.0, 2.0], 9);
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("VaR_5").is_some());
        assert!(json.get("VaR_1").is_some());
        assert_eq!(json["portfolio_values"].as_array().map(Vec::len), Some(2));
    }
}
