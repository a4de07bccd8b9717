//! Field-level validation helpers.
//!
//! Each helper returns the value unchanged on success so checks can be
//! chained inline with `?`.

use super::error::InputError;

/// Requires `value` to be finite and strictly positive.
///
/// # Examples
/// ```
/// use pricer_core::types::validate::require_positive;
///
/// assert_eq!(require_positive("spot", 100.0), Ok(100.0));
/// assert!(require_positive("spot", 0.0).is_err());
/// assert!(require_positive("spot", f64::NAN).is_err());
/// ```
#[inline]
pub fn require_positive(field: &'static str, value: f64) -> Result<f64, InputError> {
    let value = require_finite(field, value)?;
    if value <= 0.0 {
        return Err(InputError::NonPositive { field, value });
    }
    Ok(value)
}

/// Requires `value` to be finite (rates may be zero or negative).
#[inline]
pub fn require_finite(field: &'static str, value: f64) -> Result<f64, InputError> {
    if !value.is_finite() {
        return Err(InputError::NonFinite { field, value });
    }
    Ok(value)
}

/// Requires a count to be at least one.
#[inline]
pub fn require_count(field: &'static str, value: usize) -> Result<usize, InputError> {
    if value == 0 {
        return Err(InputError::InvalidCount { field, value: 0 });
    }
    Ok(value)
}
