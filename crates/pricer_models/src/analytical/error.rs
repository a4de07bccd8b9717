//! Error types for analytical pricing operations.
//!
//! This module provides:
//! - `AnalyticalError`: Invalid pricer parameters, convertible into `InputError`

use pricer_core::types::{InputError, PricingError};
use thiserror::Error;

/// Analytical pricing errors.
///
/// Raised before any computation is attempted.
///
/// # Variants
/// - `InvalidSpot`: Non-positive or non-finite spot price
/// - `InvalidVolatility`: Non-positive or non-finite volatility
/// - `InvalidStrike`: Non-positive or non-finite strike
/// - `InvalidMaturity`: Non-positive or non-finite time to expiry
/// - `InvalidRate`: Non-finite risk-free rate
///
/// # Examples
/// ```
/// use pricer_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
/// assert!(format!("{}", err).contains("volatility"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Invalid spot price (non-positive for Black-Scholes).
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// The invalid spot price value
        spot: f64,
    },

    /// Invalid volatility (non-positive).
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Invalid strike (non-positive).
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Invalid time to expiry (non-positive).
    #[error("Invalid maturity: T = {maturity}")]
    InvalidMaturity {
        /// The invalid maturity value
        maturity: f64,
    },

    /// Invalid risk-free rate (NaN or infinite).
    #[error("Invalid risk-free rate: r = {rate}")]
    InvalidRate {
        /// The invalid rate value
        rate: f64,
    },
}

impl From<AnalyticalError> for InputError {
    fn from(err: AnalyticalError) -> Self {
        let (field, value) = match err {
            AnalyticalError::InvalidSpot { spot } => ("spot", spot),
            AnalyticalError::InvalidVolatility { volatility } => ("volatility", volatility),
            AnalyticalError::InvalidStrike { strike } => ("strike", strike),
            AnalyticalError::InvalidMaturity { maturity } => ("time_to_expiry", maturity),
            AnalyticalError::InvalidRate { rate } => ("risk_free_rate", rate),
        };
        if value.is_finite() {
            InputError::NonPositive { field, value }
        } else {
            InputError::NonFinite { field, value }
        }
    }
}

impl From<AnalyticalError> for PricingError {
    fn from(err: AnalyticalError) -> Self {
        PricingError::InvalidInput(err.into())
    }
}
