//! # Pricer Risk (L4: Application)
//!
//! Portfolio analytics and Monte Carlo P&L for European option books.
//!
//! This crate provides:
//! - Closed-form aggregation of values and Greeks across positions
//! - Terminal P&L simulation over a GBM horizon with VaR percentiles
//! - Historical volatility estimation and a per-ticker volatility dataset
//! - Rayon-based order-preserving parallel map
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            pricer_risk (L4)             │
//! ├─────────────────────────────────────────┤
//! │  portfolio/   - value and Greek totals  │
//! │  simulation/  - terminal P&L, VaR       │
//! │  volatility/  - dataset, estimator      │
//! │  parallel/    - Rayon utilities         │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │  pricer_pricing (L3)  GBM paths, RNG    │
//! │  pricer_models  (L2)  Black-Scholes     │
//! │  pricer_core    (L1)  errors, stats     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use pricer_core::market_data::MarketContext;
//! use pricer_models::instruments::{OptionKind, Position, Side};
//! use pricer_risk::portfolio::analyze_portfolio;
//! use pricer_risk::simulation::{simulate_portfolio, SimulationRequest};
//!
//! let market = MarketContext::new(100.0, 0.03).unwrap();
//! let call = Position::new(OptionKind::Call, Side::Long, 1, 100.0, 1.0, 0.25).unwrap();
//!
//! let analytics = analyze_portfolio(&[call], &market).unwrap();
//! assert!((analytics.total_value - 11.3485).abs() < 1e-4);
//!
//! let request = SimulationRequest::new(vec![call], market, 1.0, 0.25)
//!     .with_steps(12)
//!     .with_n_simulations(2_000)
//!     .with_seed(Some(7));
//! let result = simulate_portfolio(&request).unwrap();
//! assert_eq!(result.portfolio_values.len(), 2_000);
//! assert!(result.var_1 <= result.var_5);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod parallel;
pub mod portfolio;
pub mod simulation;
pub mod volatility;

pub use parallel::{ParallelConfig, DEFAULT_BATCH_SIZE};
pub use portfolio::{analyze_portfolio, AnalyticResult, PortfolioAggregator, PositionResult};
pub use simulation::{simulate_portfolio, RiskSimulator, SimulationRequest, SimulationResult};
pub use volatility::{PositionResolver, VolatilityDataset, VolatilityProvider};
