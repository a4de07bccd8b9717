//! Error types for path simulation.
//!
//! Configuration and model-parameter errors are raised before any random
//! numbers are drawn. Each converts into the shared [`InputError`] with
//! the boundary field name attached.

use std::fmt;

use pricer_core::types::InputError;

/// Configuration error for the path simulator.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Path count must be at least one.
    InvalidPathCount(usize),
    /// Step count must be at least one.
    InvalidStepCount(usize),
    /// `n_paths × n_steps` exceeds the path-cell budget.
    PathBudgetExceeded {
        /// Requested cell count (saturating on overflow).
        cells: usize,
        /// Configured maximum.
        limit: usize,
    },
    /// Required builder parameter was not set.
    MissingParameter(&'static str),
    /// Model parameter is non-positive or non-finite.
    InvalidParameter {
        /// Boundary name of the parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPathCount(count) => {
                write!(f, "Invalid path count {}: must be at least 1", count)
            }
            Self::InvalidStepCount(count) => {
                write!(f, "Invalid step count {}: must be at least 1", count)
            }
            Self::PathBudgetExceeded { cells, limit } => {
                write!(
                    f,
                    "Path grid of {} cells exceeds the budget of {} cells",
                    cells, limit
                )
            }
            Self::MissingParameter(name) => write!(f, "Parameter '{}' must be specified", name),
            Self::InvalidParameter { name, value } => {
                write!(f, "Invalid parameter '{}': {}", name, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for InputError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::InvalidPathCount(count) => InputError::InvalidCount {
                field: "n_simulations",
                value: count as i64,
            },
            ConfigError::InvalidStepCount(count) => InputError::InvalidCount {
                field: "steps",
                value: count as i64,
            },
            ConfigError::PathBudgetExceeded { cells, limit } => {
                InputError::PathBudgetExceeded { cells, limit }
            }
            ConfigError::MissingParameter(field) => InputError::MissingField { field },
            ConfigError::InvalidParameter { name, value } if value.is_finite() => {
                InputError::NonPositive { field: name, value }
            }
            ConfigError::InvalidParameter { name, value } => {
                InputError::NonFinite { field: name, value }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidPathCount(0);
        assert!(err.to_string().contains("Invalid path count 0"));

        let err = ConfigError::PathBudgetExceeded {
            cells: 30_000_000,
            limit: 25_000_000,
        };
        assert!(err.to_string().contains("30000000"));

        let err = ConfigError::InvalidParameter {
            name: "horizon",
            value: -1.0,
        };
        assert!(err.to_string().contains("horizon"));
    }

    #[test]
    fn test_counts_map_to_boundary_fields() {
        assert_eq!(
            InputError::from(ConfigError::InvalidPathCount(0)),
            InputError::InvalidCount {
                field: "n_simulations",
                value: 0
            }
        );
        assert_eq!(
            InputError::from(ConfigError::InvalidStepCount(0)).field(),
            Some("steps")
        );
    }

    #[test]
    fn test_parameter_maps_by_finiteness() {
        let err: InputError = ConfigError::InvalidParameter {
            name: "simulation_volatility",
            value: 0.0,
        }
        .into();
        assert!(matches!(
            err,
            InputError::NonPositive {
                field: "simulation_volatility",
                ..
            }
        ));

        let err: InputError = ConfigError::InvalidParameter {
            name: "spot",
            value: f64::INFINITY,
        }
        .into();
        assert!(matches!(err, InputError::NonFinite { field: "spot", .. }));
    }
}
