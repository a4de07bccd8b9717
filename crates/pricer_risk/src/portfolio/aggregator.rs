//! Analytic portfolio aggregation.
//!
//! Each position is priced with its own strike, expiry and volatility
//! against the shared spot and rate. Price and every Greek are scaled by
//! quantity and negated for short positions before being summed.

use pricer_core::market_data::MarketContext;
use pricer_core::types::{InputError, PricingError};
use pricer_models::analytical::{BlackScholes, Valuation};
use pricer_models::instruments::{Position, Side};
use tracing::debug;

use super::result::{AnalyticResult, PositionResult};

/// Aggregates closed-form valuations over a portfolio.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketContext;
/// use pricer_models::instruments::{OptionKind, Position, Side};
/// use pricer_risk::portfolio::PortfolioAggregator;
///
/// let market = MarketContext::new(100.0, 0.03).unwrap();
/// let positions = [
///     Position::new(OptionKind::Call, Side::Long, 2, 105.0, 0.5, 0.25).unwrap(),
///     Position::new(OptionKind::Put, Side::Short, 1, 95.0, 0.25, 0.3).unwrap(),
/// ];
///
/// let result = PortfolioAggregator::new(market).analyze(&positions).unwrap();
/// assert_eq!(result.positions.len(), 2);
/// assert!(result.total_delta > 0.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PortfolioAggregator {
    market: MarketContext,
}

impl PortfolioAggregator {
    /// Creates an aggregator for the given market.
    pub fn new(market: MarketContext) -> Self {
        Self { market }
    }

    /// Returns the market context.
    pub fn market(&self) -> &MarketContext {
        &self.market
    }

    /// Signed, quantity-scaled valuation of a single position.
    ///
    /// # Errors
    /// `InputError` if the pricer rejects the position's inputs.
    pub fn value_position(&self, position: &Position) -> Result<Valuation<f64>, InputError> {
        let bs = BlackScholes::new(
            self.market.spot(),
            self.market.risk_free_rate(),
            position.volatility(),
        )?;
        let unit = bs.valuation(position.kind(), position.strike(), position.time_to_expiry())?;
        let scaled = unit.scaled(position.quantity() as f64);

        Ok(match position.side() {
            Side::Long => scaled,
            Side::Short => scaled.scaled(-1.0),
        })
    }

    /// Values every position and sums the results in input order.
    ///
    /// An empty portfolio yields zero totals and an empty breakdown.
    ///
    /// # Errors
    /// `PricingError::InvalidPosition` carrying the index of the first
    /// position that cannot be priced.
    pub fn analyze(&self, positions: &[Position]) -> Result<AnalyticResult, PricingError> {
        debug!(
            positions = positions.len(),
            spot = self.market.spot(),
            rate = self.market.risk_free_rate(),
            "aggregating portfolio"
        );

        let mut result = AnalyticResult::default();
        for (index, position) in positions.iter().enumerate() {
            let valuation = self
                .value_position(position)
                .map_err(|err| PricingError::at_position(index, err))?;
            result.push(PositionResult::new(index, *position, valuation));
        }
        Ok(result)
    }
}

/// Values a portfolio against a market.
///
/// Convenience wrapper around [`PortfolioAggregator::analyze`].
pub fn analyze_portfolio(
    positions: &[Position],
    market: &MarketContext,
) -> Result<AnalyticResult, PricingError> {
    PortfolioAggregator::new(*market).analyze(positions)
}
