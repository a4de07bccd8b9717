//! Position resolution against a volatility source.
//!
//! Volatility precedence for each position:
//! explicit value, then the provider's value for the request ticker, then
//! the request-level fallback. A position left without a volatility is
//! rejected with its index.

use pricer_core::types::{InputError, PricingError};
use pricer_models::instruments::{Position, PositionSpec};

use super::provider::VolatilityProvider;

/// Resolves boundary positions into validated ones.
///
/// # Examples
///
/// ```
/// use pricer_models::instruments::PositionSpec;
/// use pricer_risk::volatility::{FlatVolatility, PositionResolver};
///
/// let spec = PositionSpec {
///     option_type: Some("call".into()),
///     side: Some("long".into()),
///     quantity: Some(1),
///     strike: Some(100.0),
///     time_to_expiry: Some(1.0),
///     volatility: None,
/// };
///
/// let provider = FlatVolatility(0.3);
/// let resolved = PositionResolver::new()
///     .with_provider(&provider, "AAPL")
///     .with_fallback(Some(0.2))
///     .resolve_all(&[spec])
///     .unwrap();
///
/// assert_eq!(resolved[0].volatility(), 0.3);
/// ```
#[derive(Clone, Copy, Default)]
pub struct PositionResolver<'a> {
    provider: Option<(&'a dyn VolatilityProvider, &'a str)>,
    fallback: Option<f64>,
}

impl<'a> PositionResolver<'a> {
    /// Resolver with no volatility source; positions must carry their own.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consults `provider` for `ticker` when a volatility is missing.
    pub fn with_provider(mut self, provider: &'a dyn VolatilityProvider, ticker: &'a str) -> Self {
        self.provider = Some((provider, ticker));
        self
    }

    /// Last-resort volatility when the provider has none.
    pub fn with_fallback(mut self, fallback: Option<f64>) -> Self {
        self.fallback = fallback;
        self
    }

    /// Volatility applied to positions that carry none.
    pub fn default_volatility(&self) -> Option<f64> {
        self.provider
            .and_then(|(provider, ticker)| provider.volatility(ticker))
            .or(self.fallback)
    }

    /// Resolves a single position.
    pub fn resolve(&self, spec: &PositionSpec) -> Result<Position, InputError> {
        spec.resolve(self.default_volatility())
    }

    /// Resolves every position, preserving order.
    ///
    /// # Errors
    /// `PricingError::InvalidPosition` for the first position that fails.
    pub fn resolve_all(&self, specs: &[PositionSpec]) -> Result<Vec<Position>, PricingError> {
        let default_volatility = self.default_volatility();
        specs
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                spec.resolve(default_volatility)
                    .map_err(|err| PricingError::at_position(index, err))
            })
            .collect()
    }
}

impl std::fmt::Debug for PositionResolver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PositionResolver")
            .field("ticker", &self.provider.map(|(_, ticker)| ticker))
            .field("fallback", &self.fallback)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::volatility::dataset::tests::record;
    use crate::volatility::{FlatVolatility, VolatilityDataset};

    fn spec(volatility: Option<f64>) -> PositionSpec {
        PositionSpec {
            option_type: Some("put".into()),
            side: Some("short".into()),
            quantity: Some(2),
            strike: Some(95.0),
            time_to_expiry: Some(0.5),
            volatility,
        }
    }

    #[test]
    fn test_explicit_volatility_wins() {
        let provider = FlatVolatility(0.9);
        let resolved = PositionResolver::new()
            .with_provider(&provider, "X")
            .with_fallback(Some(0.8))
            .resolve(&spec(Some(0.2)))
            .unwrap();
        assert_eq!(resolved.volatility(), 0.2);
    }

    #[test]
    fn test_provider_before_fallback() {
        let dataset = VolatilityDataset::from_records([record("AAPL", 0.27, 190.0)]);
        let resolver = PositionResolver::new()
            .with_provider(&dataset, "aapl")
            .with_fallback(Some(0.25));
        assert_eq!(resolver.resolve(&spec(None)).unwrap().volatility(), 0.27);
    }

    #[test]
    fn test_unknown_ticker_uses_fallback() {
        let dataset = VolatilityDataset::from_records([record("AAPL", 0.27, 190.0)]);
        let resolver = PositionResolver::new()
            .with_provider(&dataset, "TSLA")
            .with_fallback(Some(0.25));
        assert_eq!(resolver.resolve(&spec(None)).unwrap().volatility(), 0.25);
    }

    #[test]
    fn test_missing_volatility_reports_index() {
        let specs = [spec(Some(0.2)), spec(None)];
        let err = PositionResolver::new().resolve_all(&specs).unwrap_err();
        assert_eq!(
            err,
            PricingError::at_position(1, InputError::MissingField { field: "volatility" })
        );
    }

    #[test]
    fn test_resolve_all_preserves_order() {
        let mut second = spec(None);
        second.option_type = Some("call".into());
        let resolved = PositionResolver::new()
            .with_fallback(Some(0.3))
            .resolve_all(&[spec(Some(0.2)), second])
            .unwrap();
        assert_eq!(resolved.len(), 2);
        assert!(!resolved[0].kind().is_call());
        assert!(resolved[1].kind().is_call());
    }
}
