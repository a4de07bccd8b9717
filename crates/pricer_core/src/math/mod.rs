//! Numerical helpers.
//!
//! - `statistics`: Moments, empirical percentiles and histograms of a sample

pub mod statistics;
