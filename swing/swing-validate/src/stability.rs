//! Numerical stability: velocity and acceleration blow-up.

use swing_types::SimulationTrace;
use tracing::{info, warn};

use crate::params::ValidationParams;
use crate::result::StabilityResult;

/// Largest finite absolute value in a sample-major series, and the number of
/// non-finite values skipped.
fn finite_peak(series: &[Vec<f64>]) -> (f64, usize) {
    series
        .iter()
        .flatten()
        .fold((0.0, 0), |(peak, bad), &value| {
            if value.is_finite() {
                (f64::max(peak, value.abs()), bad)
            } else {
                (peak, bad + 1)
            }
        })
}

/// Flag velocity or acceleration blow-up.
///
/// Stable when the largest |velocity| is below `params.max_velocity`, the
/// largest |acceleration| is below `params.max_acceleration`, and no value is
/// `NaN` or infinite. Missing accelerations count as zero; a trace without a
/// single velocity value yields [`StabilityResult::unchecked`] and a warning.
#[must_use]
pub fn validate_numerical_stability(trace: &SimulationTrace, params: &ValidationParams) -> StabilityResult {
    if trace.joint_velocities.iter().all(Vec::is_empty) {
        warn!(engine = %trace.engine, "no velocity data, skipping stability check");
        return StabilityResult::unchecked();
    }

    let (max_velocity, bad_velocities) = finite_peak(&trace.joint_velocities);
    let (max_acceleration, bad_accelerations) = finite_peak(&trace.joint_accelerations);
    let non_finite_samples = bad_velocities + bad_accelerations;

    let stable = max_velocity < params.max_velocity
        && max_acceleration < params.max_acceleration
        && non_finite_samples == 0;

    if non_finite_samples > 0 {
        warn!(engine = %trace.engine, non_finite_samples, "trace contains NaN or infinite values");
    }
    info!(
        engine = %trace.engine,
        max_velocity,
        max_acceleration,
        stable,
        "stability check complete"
    );

    StabilityResult {
        stable,
        max_velocity,
        max_acceleration,
        non_finite_samples,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_stable_trace() {
        let trace = SimulationTrace::new("mujoco")
            .with_joint_velocities(vec![vec![1.0, -2.0], vec![3.0, 0.5]])
            .with_joint_accelerations(vec![vec![-10.0, 5.0], vec![1.0, 0.0]]);
        let result = validate_numerical_stability(&trace, &ValidationParams::default());

        assert!(result.stable);
        assert_eq!(result.max_velocity, 3.0);
        assert_eq!(result.max_acceleration, 10.0);
        assert_eq!(result.non_finite_samples, 0);
    }

    #[test]
    fn test_velocity_blow_up() {
        let trace = SimulationTrace::new("drake").with_joint_velocities(vec![vec![1000.0]]);
        let result = validate_numerical_stability(&trace, &ValidationParams::default());
        assert!(!result.stable);
        assert_eq!(result.max_acceleration, 0.0);
    }

    #[test]
    fn test_acceleration_blow_up() {
        let trace = SimulationTrace::new("drake")
            .with_joint_velocities(vec![vec![1.0]])
            .with_joint_accelerations(vec![vec![-20_000.0]]);
        let result = validate_numerical_stability(&trace, &ValidationParams::default());
        assert!(!result.stable);
        assert_eq!(result.max_acceleration, 20_000.0);
    }

    #[test]
    fn test_custom_caps() {
        let trace = SimulationTrace::new("pendulum").with_joint_velocities(vec![vec![50.0]]);
        let params = ValidationParams::default().stability_limits(10.0, 100.0);
        assert!(!validate_numerical_stability(&trace, &params).stable);
    }

    #[test]
    fn test_nan_is_unstable() {
        let trace = SimulationTrace::new("pinocchio")
            .with_joint_velocities(vec![vec![1.0, f64::NAN]])
            .with_joint_accelerations(vec![vec![f64::INFINITY]]);
        let result = validate_numerical_stability(&trace, &ValidationParams::default());
        assert!(!result.stable);
        assert_eq!(result.max_velocity, 1.0);
        assert_eq!(result.non_finite_samples, 2);
    }

    #[test]
    fn test_no_velocity_data() {
        let trace = SimulationTrace::new("matlab_3d");
        let result = validate_numerical_stability(&trace, &ValidationParams::default());
        assert_eq!(result, StabilityResult::unchecked());
    }

    #[test]
    fn test_empty_velocity_rows_are_unchecked() {
        let trace = SimulationTrace::new("matlab_2d")
            .with_joint_velocities(vec![vec![], vec![]])
            .with_joint_accelerations(vec![vec![1.0], vec![2.0]]);
        let result = validate_numerical_stability(&trace, &ValidationParams::default());
        assert!(!result.stable);
        assert_eq!(result, StabilityResult::unchecked());
    }
}
