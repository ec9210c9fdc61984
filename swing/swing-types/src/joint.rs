//! Joint position limits.
//!
//! Limits are stored once per trace, keyed by joint index. They serialize as a
//! two-element `[lower, upper]` array so trace files can write
//! `"joint_limits": {"0": [-3.14159, 3.14159]}`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::TraceError;

/// Closed position interval `[lower, upper]` for a single joint.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "[f64; 2]", into = "[f64; 2]"))]
pub struct JointLimits {
    /// Minimum position (angle for revolute, distance for prismatic).
    pub lower: f64,
    /// Maximum position.
    pub upper: f64,
}

impl Default for JointLimits {
    fn default() -> Self {
        Self::unlimited()
    }
}

impl JointLimits {
    /// Create limits, rejecting inverted or `NaN` bounds.
    pub fn new(lower: f64, upper: f64) -> crate::Result<Self> {
        if lower.is_nan() || upper.is_nan() || lower > upper {
            return Err(TraceError::InvalidLimits { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    /// Create unlimited joint limits.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            lower: f64::NEG_INFINITY,
            upper: f64::INFINITY,
        }
    }

    /// Create symmetric limits `[-range, range]`.
    #[must_use]
    pub fn symmetric(range: f64) -> Self {
        let range = range.abs();
        Self {
            lower: -range,
            upper: range,
        }
    }

    /// Full revolution, `[-π, π]`.
    #[must_use]
    pub fn full_revolution() -> Self {
        Self::symmetric(std::f64::consts::PI)
    }

    /// Check if a position is within limits.
    #[must_use]
    pub fn contains(&self, position: f64) -> bool {
        position >= self.lower && position <= self.upper
    }

    /// Distance by which `position` lies outside the interval.
    ///
    /// Returns `None` when the position is inside (or on) the bounds.
    #[must_use]
    pub fn overshoot(&self, position: f64) -> Option<f64> {
        if position < self.lower || position > self.upper {
            Some((self.lower - position).max(position - self.upper))
        } else {
            None
        }
    }

    /// Clamp a position to the interval.
    #[must_use]
    pub fn clamp(&self, position: f64) -> f64 {
        position.clamp(self.lower, self.upper)
    }

    /// Width of the interval.
    #[must_use]
    pub fn range(&self) -> f64 {
        self.upper - self.lower
    }
}

impl From<[f64; 2]> for JointLimits {
    fn from([lower, upper]: [f64; 2]) -> Self {
        Self { lower, upper }
    }
}

impl From<JointLimits> for [f64; 2] {
    fn from(limits: JointLimits) -> Self {
        [limits.lower, limits.upper]
    }
}
