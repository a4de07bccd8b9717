//! REST API server for option portfolio analytics
//!
//! Exposes closed-form valuation with Greeks, Monte Carlo P&L simulation
//! and historical volatility lookups over HTTP.
//!
//! ## Endpoints
//!
//! | Method | Path                                  | Purpose                        |
//! |--------|---------------------------------------|--------------------------------|
//! | GET    | `/health`, `/ready`                   | liveness and readiness         |
//! | GET    | `/api/v1/market/volatility`           | dataset tickers (`?search=`)   |
//! | GET    | `/api/v1/market/volatility/{ticker}`  | one ticker's record            |
//! | POST   | `/api/v1/portfolio/analyze`           | value and Greek totals         |
//! | POST   | `/api/v1/portfolio/simulate`          | terminal P&L and VaR           |

pub mod config;
pub mod error;
pub mod routes;
pub mod server;

// Re-export pricer dependencies for integration
pub use pricer_core;
pub use pricer_models;
pub use pricer_risk;

/// Server version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
