//! Time-series record of one engine's simulation run.

use std::collections::BTreeMap;

use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::TraceError;
use crate::joint::JointLimits;

/// Complete output of one engine run, the unit of input to every validator.
///
/// Series are stored sample-major: `joint_positions[t][j]` is joint `j` at
/// sample `t`. An empty series means the engine did not report it.
///
/// # Example
///
/// ```
/// use swing_types::{JointLimits, SimulationTrace};
///
/// let trace = SimulationTrace::new("mujoco")
///     .with_time(vec![0.0, 0.01, 0.02])
///     .with_joint_positions(vec![vec![0.0], vec![0.1], vec![0.2]])
///     .with_joint_limit(0, JointLimits::full_revolution());
///
/// assert_eq!(trace.len(), 3);
/// assert_eq!(trace.joint_count(), 1);
/// assert!(!trace.has_energy());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulationTrace {
    /// Name of the engine that produced the trace.
    pub engine: String,
    /// Sample times in seconds.
    pub time: Vec<f64>,
    /// Joint positions per sample.
    pub joint_positions: Vec<Vec<f64>>,
    /// Joint velocities per sample.
    pub joint_velocities: Vec<Vec<f64>>,
    /// Joint accelerations per sample.
    pub joint_accelerations: Vec<Vec<f64>>,
    /// Kinetic energy per sample.
    pub kinetic_energy: Vec<f64>,
    /// Potential energy per sample.
    pub potential_energy: Vec<f64>,
    /// Total mechanical energy per sample.
    pub total_energy: Vec<f64>,
    /// System linear momentum per sample.
    pub linear_momentum: Vec<Vector3<f64>>,
    /// Position limits keyed by joint index.
    pub joint_limits: BTreeMap<usize, JointLimits>,
}

impl SimulationTrace {
    /// Create an empty trace for the named engine.
    #[must_use]
    pub fn new(engine: impl Into<String>) -> Self {
        Self {
            engine: engine.into(),
            ..Default::default()
        }
    }

    /// Set the time axis.
    #[must_use]
    pub fn with_time(mut self, time: Vec<f64>) -> Self {
        self.time = time;
        self
    }

    /// Set the joint positions.
    #[must_use]
    pub fn with_joint_positions(mut self, positions: Vec<Vec<f64>>) -> Self {
        self.joint_positions = positions;
        self
    }

    /// Set the joint velocities.
    #[must_use]
    pub fn with_joint_velocities(mut self, velocities: Vec<Vec<f64>>) -> Self {
        self.joint_velocities = velocities;
        self
    }

    /// Set the joint accelerations.
    #[must_use]
    pub fn with_joint_accelerations(mut self, accelerations: Vec<Vec<f64>>) -> Self {
        self.joint_accelerations = accelerations;
        self
    }

    /// Set kinetic, potential and total energy together.
    #[must_use]
    pub fn with_energy(mut self, kinetic: Vec<f64>, potential: Vec<f64>, total: Vec<f64>) -> Self {
        self.kinetic_energy = kinetic;
        self.potential_energy = potential;
        self.total_energy = total;
        self
    }

    /// Set kinetic and potential energy; total energy is their per-sample sum.
    #[must_use]
    pub fn with_energy_split(self, kinetic: Vec<f64>, potential: Vec<f64>) -> Self {
        let total = kinetic
            .iter()
            .zip(&potential)
            .map(|(ke, pe)| ke + pe)
            .collect();
        self.with_energy(kinetic, potential, total)
    }

    /// Set the linear momentum.
    #[must_use]
    pub fn with_linear_momentum(mut self, momentum: Vec<Vector3<f64>>) -> Self {
        self.linear_momentum = momentum;
        self
    }

    /// Add or replace the limits of one joint.
    #[must_use]
    pub fn with_joint_limit(mut self, joint: usize, limits: JointLimits) -> Self {
        self.joint_limits.insert(joint, limits);
        self
    }

    /// Number of samples on the time axis.
    #[must_use]
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// True when the trace has no time samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Widest joint row seen in positions, velocities or accelerations.
    #[must_use]
    pub fn joint_count(&self) -> usize {
        self.joint_positions
            .iter()
            .chain(&self.joint_velocities)
            .chain(&self.joint_accelerations)
            .map(Vec::len)
            .max()
            .unwrap_or(0)
    }

    /// True when time, kinetic, potential and total energy are all present.
    #[must_use]
    pub fn has_energy(&self) -> bool {
        !self.time.is_empty()
            && !self.kinetic_energy.is_empty()
            && !self.potential_energy.is_empty()
            && !self.total_energy.is_empty()
    }

    /// Duration covered by the time axis.
    #[must_use]
    pub fn duration(&self) -> f64 {
        match (self.time.first(), self.time.last()) {
            (Some(first), Some(last)) => last - first,
            _ => 0.0,
        }
    }

    /// Check that every present series matches the time axis and that time
    /// never runs backwards.
    ///
    /// Validators do not require this; it is a diagnostic for trace loaders.
    pub fn check_shape(&self) -> crate::Result<()> {
        let expected = self.time.len();
        let lengths = [
            ("joint_positions", self.joint_positions.len()),
            ("joint_velocities", self.joint_velocities.len()),
            ("joint_accelerations", self.joint_accelerations.len()),
            ("kinetic_energy", self.kinetic_energy.len()),
            ("potential_energy", self.potential_energy.len()),
            ("total_energy", self.total_energy.len()),
            ("linear_momentum", self.linear_momentum.len()),
        ];

        for (series, actual) in lengths {
            if actual != 0 && actual != expected {
                return Err(TraceError::LengthMismatch {
                    series,
                    expected,
                    actual,
                });
            }
        }

        if let Some(index) = self
            .time
            .windows(2)
            .position(|pair| pair[1] < pair[0])
        {
            return Err(TraceError::NonMonotonicTime { index: index + 1 });
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn sample_trace() -> SimulationTrace {
        SimulationTrace::new("drake")
            .with_time(vec![0.0, 0.5, 1.0])
            .with_joint_positions(vec![vec![0.0, 1.0], vec![0.1, 1.1], vec![0.2, 1.2]])
            .with_energy_split(vec![1.0, 2.0, 3.0], vec![3.0, 2.0, 1.0])
    }

    #[test]
    fn test_energy_split_sums() {
        let trace = sample_trace();
        assert_eq!(trace.total_energy, vec![4.0, 4.0, 4.0]);
        assert!(trace.has_energy());
    }

    #[test]
    fn test_dimensions() {
        let trace = sample_trace();
        assert_eq!(trace.len(), 3);
        assert_eq!(trace.joint_count(), 2);
        assert_eq!(trace.duration(), 1.0);
        assert!(!trace.is_empty());
        assert_eq!(SimulationTrace::new("x").duration(), 0.0);
    }

    #[test]
    fn test_check_shape() {
        assert!(sample_trace().check_shape().is_ok());

        let bad = sample_trace().with_joint_velocities(vec![vec![0.0]]);
        let err = bad.check_shape().unwrap_err();
        assert!(err.is_length_mismatch());

        let backwards = sample_trace().with_time(vec![0.0, 1.0, 0.5]);
        assert_eq!(
            backwards.check_shape().unwrap_err(),
            TraceError::NonMonotonicTime { index: 2 }
        );
    }

    #[test]
    fn test_missing_energy() {
        let trace = sample_trace().with_energy(vec![], vec![1.0], vec![1.0]);
        assert!(!trace.has_energy());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_partial_trace() {
        let json = r#"{
            "engine": "pinocchio",
            "time": [0.0, 0.1],
            "total_energy": [1.0, 1.0],
            "linear_momentum": [[0.0, 0.0, 1.0], [0.0, 0.0, 1.0]],
            "joint_limits": {"0": [-3.0, 3.0]}
        }"#;
        let trace: SimulationTrace = serde_json::from_str(json).unwrap();
        assert_eq!(trace.engine, "pinocchio");
        assert!(trace.joint_positions.is_empty());
        assert_eq!(trace.linear_momentum[1].z, 1.0);
        assert_eq!(trace.joint_limits[&0], JointLimits::symmetric(3.0));
    }
}
