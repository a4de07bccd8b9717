//! Error types for structured error handling.
//!
//! This module provides:
//! - `InputError`: A single invalid or missing input field
//! - `PricingError`: Errors from portfolio-level pricing and simulation

use thiserror::Error;

/// Invalid or missing input.
///
/// Every variant names the offending field so callers at the request
/// boundary can report it back verbatim.
///
/// # Variants
/// - `NonPositive`: Value must be strictly positive
/// - `NonFinite`: Value is NaN or infinite
/// - `InvalidCount`: Count must be at least one
/// - `TooLarge`: Count exceeds a configured limit
/// - `MissingField`: Required field absent after resolution
/// - `UnknownVariant`: Unrecognised enumeration value (e.g. option kind)
/// - `PathBudgetExceeded`: Simulation grid larger than the path-cell budget
///
/// # Examples
/// ```
/// use pricer_core::types::InputError;
///
/// let err = InputError::NonPositive { field: "spot", value: -1.0 };
/// assert_eq!(format!("{}", err), "spot must be positive, got -1");
/// assert_eq!(err.field(), Some("spot"));
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    /// Value must be strictly positive.
    #[error("{field} must be positive, got {value}")]
    NonPositive {
        /// Name of the offending field
        field: &'static str,
        /// The rejected value
        value: f64,
    },

    /// Value must be finite.
    #[error("{field} must be finite, got {value}")]
    NonFinite {
        /// Name of the offending field
        field: &'static str,
        /// The rejected value
        value: f64,
    },

    /// Count must be at least one.
    #[error("{field} must be at least 1, got {value}")]
    InvalidCount {
        /// Name of the offending field
        field: &'static str,
        /// The rejected count
        value: i64,
    },

    /// Count exceeds a configured limit.
    #[error("{field} of {value} exceeds the limit of {limit}")]
    TooLarge {
        /// Name of the offending field
        field: &'static str,
        /// The rejected count
        value: usize,
        /// The configured limit
        limit: usize,
    },

    /// Required field is missing.
    #[error("missing required field '{field}'")]
    MissingField {
        /// Name of the missing field
        field: &'static str,
    },

    /// Unrecognised enumeration value.
    #[error("unrecognised {field} '{value}'")]
    UnknownVariant {
        /// Name of the offending field
        field: &'static str,
        /// The rejected value
        value: String,
    },

    /// Path matrix would exceed the configured cell budget.
    #[error("simulation grid of {cells} cells exceeds the budget of {limit} cells")]
    PathBudgetExceeded {
        /// Requested `n_simulations × steps`
        cells: usize,
        /// Configured maximum
        limit: usize,
    },
}

impl InputError {
    /// Returns the name of the offending field, if the error concerns one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            InputError::NonPositive { field, .. }
            | InputError::NonFinite { field, .. }
            | InputError::InvalidCount { field, .. }
            | InputError::TooLarge { field, .. }
            | InputError::MissingField { field }
            | InputError::UnknownVariant { field, .. } => Some(field),
            InputError::PathBudgetExceeded { .. } => None,
        }
    }
}

/// Portfolio-level pricing errors.
///
/// Wraps an [`InputError`], optionally tagged with the index of the
/// position that caused it.
///
/// # Examples
/// ```
/// use pricer_core::types::{InputError, PricingError};
///
/// let err = PricingError::at_position(2, InputError::MissingField { field: "volatility" });
/// assert_eq!(err.position(), Some(2));
/// assert_eq!(
///     format!("{}", err),
///     "Invalid position 2: missing required field 'volatility'"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    /// Invalid request-level input (market, horizon, simulation sizes).
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InputError),

    /// Invalid input on a single position.
    #[error("Invalid position {index}: {source}")]
    InvalidPosition {
        /// Zero-based index of the position in the request
        index: usize,
        /// Underlying input error
        #[source]
        source: InputError,
    },
}

impl PricingError {
    /// Tags an input error with the index of the position it came from.
    pub fn at_position(index: usize, source: InputError) -> Self {
        PricingError::InvalidPosition { index, source }
    }

    /// Returns the underlying input error.
    pub fn input_error(&self) -> &InputError {
        match self {
            PricingError::InvalidInput(err) => err,
            PricingError::InvalidPosition { source, .. } => source,
        }
    }

    /// Returns the offending position index, if any.
    pub fn position(&self) -> Option<usize> {
        match self {
            PricingError::InvalidInput(_) => None,
            PricingError::InvalidPosition { index, .. } => Some(*index),
        }
    }
}
