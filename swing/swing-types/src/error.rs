//! Error types for trace and engine catalogue operations.

use thiserror::Error;

/// Errors raised while building or checking simulation traces.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TraceError {
    /// Joint limit interval is inverted or contains `NaN`.
    #[error("invalid joint limits: [{lower}, {upper}]")]
    InvalidLimits {
        /// Lower bound supplied.
        lower: f64,
        /// Upper bound supplied.
        upper: f64,
    },

    /// A per-sample series does not match the length of the time axis.
    #[error("series `{series}` has {actual} samples, expected {expected}")]
    LengthMismatch {
        /// Name of the offending series.
        series: &'static str,
        /// Number of samples on the time axis.
        expected: usize,
        /// Number of samples in the series.
        actual: usize,
    },

    /// Time samples are not monotonically non-decreasing.
    #[error("time axis decreases at sample {index}")]
    NonMonotonicTime {
        /// First sample whose time is earlier than its predecessor.
        index: usize,
    },

    /// Engine identifier not present in the engine catalogue.
    #[error("unknown engine: {0}")]
    UnknownEngine(String),
}

impl TraceError {
    /// Create an unknown engine error.
    #[must_use]
    pub fn unknown_engine(id: impl Into<String>) -> Self {
        Self::UnknownEngine(id.into())
    }

    /// Check if this is a series length mismatch.
    #[must_use]
    pub fn is_length_mismatch(&self) -> bool {
        matches!(self, Self::LengthMismatch { .. })
    }
}
