//! Tolerances and thresholds for physics validation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationResult};

/// Tolerances used by every validator.
///
/// Results are a pure function of the input trace and these values.
///
/// # Example
///
/// ```
/// use swing_validate::ValidationParams;
///
/// let params = ValidationParams::default();
/// assert!((params.relative_tolerance - 1e-3).abs() < 1e-15);
/// assert!((params.agreement_threshold - 0.9).abs() < 1e-15);
///
/// let strict = ValidationParams::strict();
/// assert!(strict.relative_tolerance < params.relative_tolerance);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ValidationParams {
    /// Relative drift below which energy and momentum count as conserved.
    pub relative_tolerance: f64,

    /// Joint limit overshoot below which constraints count as satisfied.
    pub absolute_tolerance: f64,

    /// Joint speed at or above which a trace is considered unstable.
    pub max_velocity: f64,

    /// Joint acceleration at or above which a trace is considered unstable.
    pub max_acceleration: f64,

    /// Every pairwise agreement score must exceed this for overall agreement.
    pub agreement_threshold: f64,

    /// Guard added to denominators.
    pub epsilon: f64,
}

impl Default for ValidationParams {
    fn default() -> Self {
        Self {
            relative_tolerance: 1e-3,
            absolute_tolerance: 1e-6,
            max_velocity: 1000.0,
            max_acceleration: 10_000.0,
            agreement_threshold: 0.9,
            epsilon: 1e-12,
        }
    }
}

impl ValidationParams {
    /// Tight tolerances for analytical reference models.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            relative_tolerance: 1e-5,
            absolute_tolerance: 1e-9,
            agreement_threshold: 0.99,
            ..Default::default()
        }
    }

    /// Loose tolerances for noisy measured data.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            relative_tolerance: 1e-2,
            absolute_tolerance: 1e-3,
            agreement_threshold: 0.8,
            ..Default::default()
        }
    }

    /// Set the relative conservation tolerance.
    #[must_use]
    pub fn relative_tolerance(mut self, tolerance: f64) -> Self {
        self.relative_tolerance = tolerance;
        self
    }

    /// Set the absolute constraint tolerance.
    #[must_use]
    pub fn absolute_tolerance(mut self, tolerance: f64) -> Self {
        self.absolute_tolerance = tolerance;
        self
    }

    /// Set the stability caps.
    #[must_use]
    pub fn stability_limits(mut self, max_velocity: f64, max_acceleration: f64) -> Self {
        self.max_velocity = max_velocity;
        self.max_acceleration = max_acceleration;
        self
    }

    /// Set the agreement threshold.
    #[must_use]
    pub fn agreement_threshold(mut self, threshold: f64) -> Self {
        self.agreement_threshold = threshold;
        self
    }

    /// Check that all values are finite and in range.
    pub fn validate(&self) -> ValidationResult<()> {
        let positive = [
            ("relative_tolerance", self.relative_tolerance),
            ("absolute_tolerance", self.absolute_tolerance),
            ("max_velocity", self.max_velocity),
            ("max_acceleration", self.max_acceleration),
            ("epsilon", self.epsilon),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ValidationError::invalid_params(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }

        if !(0.0..=1.0).contains(&self.agreement_threshold) {
            return Err(ValidationError::invalid_params(format!(
                "agreement_threshold must lie in [0, 1], got {}",
                self.agreement_threshold
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = ValidationParams::default();
        assert!((params.absolute_tolerance - 1e-6).abs() < f64::EPSILON);
        assert!((params.max_velocity - 1000.0).abs() < f64::EPSILON);
        assert!((params.max_acceleration - 10_000.0).abs() < f64::EPSILON);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_presets_validate() {
        assert!(ValidationParams::strict().validate().is_ok());
        assert!(ValidationParams::lenient().validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let params = ValidationParams::default()
            .relative_tolerance(5e-3)
            .absolute_tolerance(1e-4)
            .stability_limits(50.0, 500.0)
            .agreement_threshold(0.95);

        assert!((params.relative_tolerance - 5e-3).abs() < f64::EPSILON);
        assert!((params.absolute_tolerance - 1e-4).abs() < f64::EPSILON);
        assert!((params.max_velocity - 50.0).abs() < f64::EPSILON);
        assert!((params.max_acceleration - 500.0).abs() < f64::EPSILON);
        assert!((params.agreement_threshold - 0.95).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(ValidationParams::default()
            .relative_tolerance(0.0)
            .validate()
            .is_err());
        assert!(ValidationParams::default()
            .stability_limits(f64::NAN, 1.0)
            .validate()
            .is_err());
        assert!(ValidationParams::default()
            .agreement_threshold(1.5)
            .validate()
            .is_err());
    }
}
