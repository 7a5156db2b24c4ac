//! Error types for the anofox-cluster library.

use thiserror::Error;

/// Result type alias for clustering operations.
pub type Result<T> = std::result::Result<T, ClusterError>;

/// Errors that can occur while building sequences, configuring a model,
/// or clustering.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClusterError {
    /// Input data is empty.
    #[error("empty input data")]
    EmptyData,

    /// Fewer sequences than the operation requires.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Sequences of different lengths where equal lengths are required.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Model has not been fitted yet.
    #[error("model must be fitted before prediction")]
    FitRequired,

    /// NaN or infinite values in a sequence.
    #[error("non-finite values detected in data")]
    NonFiniteValues,

    /// Computation error (e.g., numerical issues).
    #[error("computation error: {0}")]
    ComputationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_descriptive() {
        let err = ClusterError::EmptyData;
        assert_eq!(err.to_string(), "empty input data");

        let err = ClusterError::InsufficientData { needed: 3, got: 2 };
        assert_eq!(err.to_string(), "insufficient data: need at least 3, got 2");

        let err = ClusterError::InvalidParameter("window must be at least 1".to_string());
        assert_eq!(err.to_string(), "invalid parameter: window must be at least 1");

        let err = ClusterError::DimensionMismatch {
            expected: 5,
            got: 4,
        };
        assert_eq!(err.to_string(), "dimension mismatch: expected 5, got 4");

        let err = ClusterError::FitRequired;
        assert_eq!(err.to_string(), "model must be fitted before prediction");

        let err = ClusterError::NonFiniteValues;
        assert_eq!(err.to_string(), "non-finite values detected in data");
    }

    #[test]
    fn errors_are_clonable_and_comparable() {
        let err1 = ClusterError::FitRequired;
        let err2 = err1.clone();
        assert_eq!(err1, err2);
        assert_ne!(err1, ClusterError::EmptyData);
    }
}
