//! # Pricer Models (L2: Business Logic)
//!
//! Closed-form option pricing and option position definitions.
//!
//! This crate provides:
//! - Black-Scholes prices and Greeks for European calls and puts (`analytical`)
//! - Standard normal distribution functions (`analytical::distributions`)
//! - Option kinds, sides and validated positions (`instruments`)
//! - The boundary representation of a position before resolution
//!   (`instruments::PositionSpec`)
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`** for the pricer
//! - **Validated constructors**: an invalid position cannot be built
//! - **Immutable positions**: resolution produces a new value

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
