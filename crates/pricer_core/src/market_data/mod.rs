//! Market inputs shared by every position in a request.
//!
//! The engine prices a single underlying, so the market reduces to a
//! spot level and a flat continuously-compounded risk-free rate.

mod context;

pub use context::MarketContext;
