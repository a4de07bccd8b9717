//! # Pricer Pricing (Layer 3: Simulation Engine)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing generates the stochastic inputs of the risk engine:
//! - Seeded random streams (`rng`)
//! - Geometric Brownian Motion path matrices and terminal prices (`mc`)
//! - The path-cell budget that bounds simulation memory
//!
//! ## Reproducibility
//!
//! A simulation consumes one `StdRng` stream, path by path and step by
//! step. The seed is always reported, including when it was drawn from
//! entropy, so every run can be replayed exactly.
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::mc::{GbmParams, PathSimulator, SimulationConfig};
//!
//! let config = SimulationConfig::builder()
//!     .n_paths(500)
//!     .n_steps(50)
//!     .seed(7)
//!     .build()
//!     .unwrap();
//!
//! let matrix = PathSimulator::new(config)
//!     .simulate_paths(&GbmParams::new(100.0, 0.03, 0.25, 1.0))
//!     .unwrap();
//!
//! assert_eq!(matrix.get(0, 0), Some(100.0));
//! ```

#![warn(missing_docs)]

pub mod mc;
pub mod rng;
