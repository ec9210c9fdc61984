//! Error types for validation.
//!
//! Validators themselves never fail: missing data produces negative flags.
//! These errors cover parameter checking, report serialization, and the
//! per-pair comparison failures that the comparator turns into a zero score.

use thiserror::Error;

/// Result type alias for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Errors that can occur while configuring validation or exporting reports.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Invalid validation parameters.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// Report could not be serialized.
    #[cfg(feature = "serde")]
    #[error("report serialization failed")]
    Serialization(#[from] serde_json::Error),
}

impl ValidationError {
    /// Create an invalid params error.
    #[must_use]
    pub fn invalid_params(details: impl Into<String>) -> Self {
        Self::InvalidParams(details.into())
    }
}

/// Why a single pairwise comparison could not produce a score.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ComparisonError {
    /// One of the series has no samples after truncation.
    #[error("series is empty")]
    EmptySeries,

    /// Rows at the same sample have different joint counts.
    #[error("sample {sample}: row widths differ ({left} vs {right})")]
    ShapeMismatch {
        /// Sample index where the widths diverge.
        sample: usize,
        /// Width of the first series' row.
        left: usize,
        /// Width of the second series' row.
        right: usize,
    },

    /// The error metric evaluated to `NaN` or infinity.
    #[error("comparison produced a non-finite error metric")]
    NonFinite,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ValidationError::invalid_params("relative_tolerance must be positive");
        assert!(format!("{err}").contains("relative_tolerance"));

        let err = ComparisonError::ShapeMismatch {
            sample: 3,
            left: 2,
            right: 4,
        };
        assert!(format!("{err}").contains("sample 3"));
        assert!(format!("{}", ComparisonError::EmptySeries).contains("empty"));
    }
}
