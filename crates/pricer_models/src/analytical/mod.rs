//! Analytical pricing formulas for European options.
//!
//! This module provides closed-form solutions for option pricing:
//! - Black-Scholes model for lognormal dynamics
//! - Analytical Greeks (Delta, Gamma, Vega, Theta, Rho)
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`**: Works for `f64` and `f32`
//! - **Checked entry points**: [`BlackScholes::price`] and [`BlackScholes::greeks`]
//!   validate strike and maturity before computing
//! - **Numerical Stability**: Double-precision normal CDF with an exact
//!   complement, so put-call parity holds to rounding

pub mod black_scholes;
pub mod distributions;
pub mod error;

// Re-export main types at module level
pub use black_scholes::{BlackScholes, Greeks, Valuation};
pub use distributions::{norm_cdf, norm_pdf};
pub use error::AnalyticalError;
