//! Monte Carlo path simulation.
//!
//! # Architecture
//!
//! ```text
//! PathSimulator
//! ├── SimulationConfig  (paths, steps, seed, path-cell budget, sampling)
//! ├── PricerRng         (one seeded stream per simulation)
//! └── Outputs
//!     ├── simulate_paths()    -> PathMatrix
//!     └── simulate_terminal() -> TerminalPrices
//! ```
//!
//! # Examples
//!
//! ```rust
//! use pricer_pricing::mc::{GbmParams, PathSimulator, SimulationConfig};
//!
//! let config = SimulationConfig::builder()
//!     .n_paths(10_000)
//!     .n_steps(252)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let terminal = PathSimulator::new(config)
//!     .simulate_terminal(&GbmParams::new(100.0, 0.03, 0.25, 1.0))
//!     .unwrap();
//!
//! assert_eq!(terminal.prices.len(), 10_000);
//! assert_eq!(terminal.seed, 42);
//! ```

mod config;
mod error;
mod paths;

pub use config::{
    SimulationConfig, SimulationConfigBuilder, TerminalSampling, DEFAULT_MAX_PATH_CELLS,
};
pub use error::ConfigError;
pub use paths::{GbmParams, PathMatrix, PathSimulator, TerminalPrices};
