//! Volatility lookup by ticker.

/// Source of default volatilities for positions that carry none.
///
/// A provider only fills gaps; an explicit position volatility is never
/// overridden.
pub trait VolatilityProvider: Send + Sync {
    /// Annualised volatility for `ticker`, if known.
    fn volatility(&self, ticker: &str) -> Option<f64>;

    /// Reference spot price for `ticker`, if known.
    fn reference_spot(&self, _ticker: &str) -> Option<f64> {
        None
    }
}

/// The same volatility for every ticker.
///
/// # Examples
///
/// ```
/// use pricer_risk::volatility::{FlatVolatility, VolatilityProvider};
///
/// let flat = FlatVolatility(0.25);
/// assert_eq!(flat.volatility("ANY"), Some(0.25));
/// assert_eq!(flat.reference_spot("ANY"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatVolatility(pub f64);

impl VolatilityProvider for FlatVolatility {
    fn volatility(&self, _ticker: &str) -> Option<f64> {
        Some(self.0)
    }
}
