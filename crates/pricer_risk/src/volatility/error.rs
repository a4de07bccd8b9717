//! Volatility dataset errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading price history or volatility datasets.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// File system access failed.
    #[error("failed to access {}: {source}", path.display())]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Dataset JSON is malformed.
    #[error("invalid volatility dataset: {0}")]
    Json(#[from] serde_json::Error),

    /// Price CSV is malformed.
    #[error("invalid price file: {0}")]
    Csv(#[from] csv::Error),

    /// Price CSV lacks a required column.
    #[error("price file has no '{column}' column")]
    MissingColumn {
        /// Column name
        column: &'static str,
    },

    /// Too few log returns to estimate a volatility.
    #[error("{ticker} has only {returns} returns, at least {required} required")]
    InsufficientData {
        /// Ticker symbol
        ticker: String,
        /// Usable log returns
        returns: usize,
        /// Minimum accepted
        required: usize,
    },

    /// No ticker produced a volatility.
    #[error("no volatility data could be computed from {}", path.display())]
    NoData {
        /// Input directory
        path: PathBuf,
    },
}

impl DatasetError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        DatasetError::Io {
            path: path.into(),
            source,
        }
    }
}
