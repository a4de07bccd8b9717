//! CLI error type

use pricer_core::types::{InputError, PricingError};
use pricer_risk::volatility::DatasetError;
use thiserror::Error;

/// Errors surfaced by CLI commands
#[derive(Debug, Error)]
pub enum CliError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<InputError> for CliError {
    fn from(err: InputError) -> Self {
        CliError::Pricing(PricingError::InvalidInput(err))
    }
}

/// Result alias for CLI commands
pub type Result<T> = std::result::Result<T, CliError>;
