//! Error types for gostcalc.

/// Result type for cost calculations.
pub type Result<T> = std::result::Result<T, CalculationError>;

/// Errors that can occur while estimating sizes or costs.
///
/// Unknown field value types are not errors; they contribute zero bytes.
#[derive(Debug, thiserror::Error)]
pub enum CalculationError {
    /// The document collection path is empty or contains an empty segment.
    #[error("invalid collection path: {path:?}")]
    InvalidCollectionPath {
        /// The rejected path.
        path: String,
    },

    /// A decimal operation overflowed or divided by zero.
    #[error("arithmetic overflow while computing {stage}")]
    Overflow {
        /// The pipeline stage that overflowed.
        stage: &'static str,
    },

    /// A network payload could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Pricing configuration is unusable.
    #[error("invalid pricing: {0}")]
    InvalidPricing(String),
}

impl CalculationError {
    pub(crate) const fn overflow(stage: &'static str) -> Self {
        Self::Overflow { stage }
    }
}
