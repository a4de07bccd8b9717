//! Distributional tests for simulated terminal prices.
//!
//! The stepped and exact samplers must both reproduce the lognormal
//! terminal law over the effective horizon `(steps - 1)·dt`.
//!
//! # Test Categories
//!
//! 1. **Moments**: sample mean of S_T and of ln(S_T / S0)
//! 2. **Sampler agreement**: stepped vs exact
//! 3. **Budget**: oversized grids are rejected as input errors

use approx::assert_relative_eq;
use pricer_core::types::InputError;
use pricer_pricing::mc::{GbmParams, PathSimulator, SimulationConfig, TerminalSampling};

const N_PATHS: usize = 100_000;
const N_STEPS: usize = 12;

fn params() -> GbmParams {
    GbmParams::new(100.0, 0.03, 0.25, 1.0)
}

fn terminal(sampling: TerminalSampling, seed: u64) -> Vec<f64> {
    let config = SimulationConfig::builder()
        .n_paths(N_PATHS)
        .n_steps(N_STEPS)
        .seed(seed)
        .sampling(sampling)
        .build()
        .unwrap();
    PathSimulator::new(config)
        .simulate_terminal(&params())
        .unwrap()
        .prices
}

fn mean_and_std(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, var.sqrt())
}

// ============================================================================
// Moment Tests
// ============================================================================

#[test]
fn test_stepped_terminal_mean_is_forward() {
    let p = params();
    let tau = p.effective_horizon(N_STEPS);
    let prices = terminal(TerminalSampling::Stepped, 2024);

    let (mean, std) = mean_and_std(&prices);
    let forward = p.spot * (p.rate * tau).exp();
    let tolerance = 4.0 * std / (N_PATHS as f64).sqrt();

    assert!(
        (mean - forward).abs() < tolerance,
        "mean {} vs forward {} (tol {})",
        mean,
        forward,
        tolerance
    );
}

#[test]
fn test_exact_log_return_moments() {
    let p = params();
    let tau = p.effective_horizon(N_STEPS);
    let prices = terminal(TerminalSampling::Exact, 77);

    let log_returns: Vec<f64> = prices.iter().map(|s| (s / p.spot).ln()).collect();
    let (mean, std) = mean_and_std(&log_returns);

    let expected_mean = (p.rate - 0.5 * p.volatility * p.volatility) * tau;
    let expected_std = p.volatility * tau.sqrt();

    assert!((mean - expected_mean).abs() < 4.0 * expected_std / (N_PATHS as f64).sqrt());
    assert_relative_eq!(std, expected_std, max_relative = 0.02);
}

// ============================================================================
// Sampler Agreement
// ============================================================================

#[test]
fn test_stepped_and_exact_agree_in_distribution() {
    let (stepped_mean, stepped_std) = mean_and_std(&terminal(TerminalSampling::Stepped, 1));
    let (exact_mean, exact_std) = mean_and_std(&terminal(TerminalSampling::Exact, 2));

    let se = (stepped_std.powi(2) + exact_std.powi(2)).sqrt() / (N_PATHS as f64).sqrt();
    assert!((stepped_mean - exact_mean).abs() < 4.0 * se);
    assert_relative_eq!(stepped_std, exact_std, max_relative = 0.03);
}

// ============================================================================
// Budget Tests
// ============================================================================

#[test]
fn test_budget_rejection_maps_to_input_error() {
    let err = SimulationConfig::builder()
        .n_paths(1_000)
        .n_steps(1_000)
        .max_path_cells(999_999)
        .build()
        .unwrap_err();

    assert_eq!(
        InputError::from(err),
        InputError::PathBudgetExceeded {
            cells: 1_000_000,
            limit: 999_999
        }
    );
}
