//! # Random Number Generation
//!
//! Seeded pseudo-random streams for path simulation.
//!
//! - **Reproducibility**: every generator knows its seed, including ones
//!   drawn from entropy
//! - **Single stream**: one generator feeds a whole simulation, consumed
//!   path by path, step by step
//!
//! ```rust
//! use pricer_pricing::rng::PricerRng;
//!
//! let mut rng = PricerRng::from_seed(12345);
//! let mut buffer = vec![0.0; 1000];
//! rng.fill_normal(&mut buffer);
//! ```

mod prng;

pub use prng::PricerRng;
