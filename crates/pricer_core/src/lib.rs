//! # pricer_core: Foundation for the Option Risk Engine
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - Error types: `InputError`, `PricingError` (`types::error`)
//! - Validation helpers shared by every layer (`types::validate`)
//! - Shared market inputs: `MarketContext` (`market_data`)
//! - Sample statistics for simulated distributions (`math::statistics`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::market_data::MarketContext;
//! use pricer_core::math::statistics::{mean, percentile};
//!
//! let market = MarketContext::new(100.0, 0.03).unwrap();
//! assert_eq!(market.spot(), 100.0);
//!
//! let values = [1.0, 2.0, 3.0, 4.0];
//! assert_eq!(mean(&values), Some(2.5));
//! assert_eq!(percentile(&values, 50.0), Some(2.5));
//!
//! // Invalid inputs are reported, never defaulted
//! assert!(MarketContext::new(-1.0, 0.03).is_err());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for `MarketContext` and statistics output

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod math;
pub mod types;
