//! CLI error types.

use std::path::PathBuf;

use gostcalc_core::CalculationError;

/// Errors raised while preparing a calculation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A configuration or input file could not be read.
    #[error("failed to read {path:?}: {source}")]
    Read {
        /// The file path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A configuration or input file is not valid JSON for its purpose.
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        /// The file path.
        path: PathBuf,
        /// The underlying parse error.
        source: serde_json::Error,
    },

    /// Transactions times population does not fit a daily count.
    #[error("daily count overflows: {count} transactions x {population} users")]
    CountOverflow {
        /// Daily transactions per user.
        count: u64,
        /// Number of users.
        population: u64,
    },

    /// Pricing or document input was rejected by the cost model.
    #[error(transparent)]
    Calculation(#[from] CalculationError),
}
