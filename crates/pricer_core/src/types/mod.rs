//! Error and validation types shared by every layer.
//!
//! This module provides:
//! - `error`: Structured error types for invalid inputs and pricing failures
//! - `validate`: Field-level checks that produce those errors
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`InputError`], [`PricingError`] from `error`

pub mod error;
pub mod validate;

// Re-export commonly used types at module level
pub use error::{InputError, PricingError};
