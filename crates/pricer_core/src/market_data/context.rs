use crate::types::validate::{require_finite, require_positive};
use crate::types::InputError;

/// Spot and risk-free rate for one underlying.
///
/// # Examples
/// ```
/// use pricer_core::market_data::MarketContext;
///
/// let market = MarketContext::new(100.0, -0.005).unwrap();
/// assert_eq!(market.risk_free_rate(), -0.005);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MarketContext {
    spot: f64,
    risk_free_rate: f64,
}

impl MarketContext {
    /// Creates a market context.
    ///
    /// # Errors
    /// - `InputError::NonPositive` / `NonFinite` if spot is not a positive number
    /// - `InputError::NonFinite` if the rate is NaN or infinite
    pub fn new(spot: f64, risk_free_rate: f64) -> Result<Self, InputError> {
        Ok(Self {
            spot: require_positive("spot", spot)?,
            risk_free_rate: require_finite("risk_free_rate", risk_free_rate)?,
        })
    }

    /// Current underlying price (S).
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Annualised risk-free rate (r).
    #[inline]
    pub fn risk_free_rate(&self) -> f64 {
        self.risk_free_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_context() {
        let market = MarketContext::new(250.5, 0.03).unwrap();
        assert_eq!(market.spot(), 250.5);
        assert_eq!(market.risk_free_rate(), 0.03);
    }

    #[test]
    fn test_negative_spot_rejected() {
        assert_eq!(
            MarketContext::new(-1.0, 0.03),
            Err(InputError::NonPositive {
                field: "spot",
                value: -1.0
            })
        );
    }

    #[test]
    fn test_nan_rate_rejected() {
        let err = MarketContext::new(100.0, f64::NAN).unwrap_err();
        assert_eq!(err.field(), Some("risk_free_rate"));
    }
}
