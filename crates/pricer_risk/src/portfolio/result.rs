//! Analytic valuation results.

use pricer_models::analytical::{Greeks, Valuation};
use pricer_models::instruments::Position;
use serde::Serialize;

/// Signed, quantity-scaled valuation of one position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PositionResult {
    /// Zero-based index in the input portfolio
    pub index: usize,
    /// The position as valued
    pub position: Position,
    /// Position value
    pub value: f64,
    /// Position delta
    pub delta: f64,
    /// Position gamma
    pub gamma: f64,
    /// Position theta, per year
    pub theta: f64,
    /// Position vega, per unit volatility
    pub vega: f64,
    /// Position rho
    pub rho: f64,
}

impl PositionResult {
    pub(crate) fn new(index: usize, position: Position, valuation: Valuation<f64>) -> Self {
        let g = valuation.greeks;
        Self {
            index,
            position,
            value: valuation.price,
            delta: g.delta,
            gamma: g.gamma,
            theta: g.theta,
            vega: g.vega,
            rho: g.rho,
        }
    }

    /// Sensitivities as a [`Greeks`] value.
    pub fn greeks(&self) -> Greeks<f64> {
        Greeks {
            delta: self.delta,
            gamma: self.gamma,
            vega: self.vega,
            theta: self.theta,
            rho: self.rho,
        }
    }
}

/// Portfolio totals plus the per-position breakdown in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalyticResult {
    /// Sum of position values
    pub total_value: f64,
    /// Sum of position deltas
    pub total_delta: f64,
    /// Sum of position gammas
    pub total_gamma: f64,
    /// Sum of position thetas
    pub total_theta: f64,
    /// Sum of position vegas
    pub total_vega: f64,
    /// Sum of position rhos
    pub total_rho: f64,
    /// Per-position results
    pub positions: Vec<PositionResult>,
}

impl AnalyticResult {
    pub(crate) fn push(&mut self, result: PositionResult) {
        self.total_value += result.value;
        self.total_delta += result.delta;
        self.total_gamma += result.gamma;
        self.total_theta += result.theta;
        self.total_vega += result.vega;
        self.total_rho += result.rho;
        self.positions.push(result);
    }

    /// Portfolio sensitivities as a [`Greeks`] value.
    pub fn total_greeks(&self) -> Greeks<f64> {
        Greeks {
            delta: self.total_delta,
            gamma: self.total_gamma,
            vega: self.total_vega,
            theta: self.total_theta,
            rho: self.total_rho,
        }
    }
}
