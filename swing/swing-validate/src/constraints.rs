//! Joint limit satisfaction.

use swing_types::SimulationTrace;
use tracing::{info, warn};

use crate::params::ValidationParams;
use crate::result::{ConstraintResult, ConstraintViolation};

/// Record every (timestep, joint) position outside its limits.
///
/// A violation's magnitude is `max(lower - pos, pos - upper)`. Joints without
/// limits are not checked. Constraints are satisfied when the largest
/// violation is below `params.absolute_tolerance`.
///
/// A trace without limits or positions yields [`ConstraintResult::unchecked`]
/// and a warning.
#[must_use]
pub fn validate_joint_constraints(trace: &SimulationTrace, params: &ValidationParams) -> ConstraintResult {
    if trace.joint_positions.is_empty() || trace.joint_limits.is_empty() {
        warn!(engine = %trace.engine, "incomplete joint data, skipping constraint check");
        return ConstraintResult::unchecked();
    }

    let violations: Vec<ConstraintViolation> = trace
        .joint_positions
        .iter()
        .enumerate()
        .flat_map(|(timestep, row)| {
            row.iter().enumerate().filter_map(move |(joint, &position)| {
                let limits = trace.joint_limits.get(&joint)?;
                let violation = limits.overshoot(position)?;
                Some(ConstraintViolation {
                    timestep,
                    joint,
                    position,
                    violation,
                })
            })
        })
        .collect();

    let max_violation = violations.iter().map(|v| v.violation).fold(0.0, f64::max);

    info!(
        engine = %trace.engine,
        violations = violations.len(),
        max_violation,
        "joint constraint check complete"
    );

    ConstraintResult {
        constraint_satisfaction: max_violation < params.absolute_tolerance,
        max_violation,
        violations,
        samples_checked: trace.joint_positions.len(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;
    use swing_types::JointLimits;

    #[test]
    fn test_single_violation() {
        let trace = SimulationTrace::new("mujoco")
            .with_joint_positions(vec![vec![0.0], vec![1.0], vec![4.0], vec![-1.0]])
            .with_joint_limit(0, JointLimits::full_revolution());
        let result = validate_joint_constraints(&trace, &ValidationParams::default());

        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].timestep, 2);
        assert_eq!(result.violations[0].joint, 0);
        assert_relative_eq!(result.max_violation, 4.0 - PI);
        assert!(!result.constraint_satisfaction);
        assert_eq!(result.samples_checked, 4);
    }

    #[test]
    fn test_max_violation_is_largest_overshoot() {
        let trace = SimulationTrace::new("drake")
            .with_joint_positions(vec![vec![1.5, 0.0], vec![0.0, -3.0]])
            .with_joint_limit(0, JointLimits::symmetric(1.0))
            .with_joint_limit(1, JointLimits::symmetric(1.0));
        let result = validate_joint_constraints(&trace, &ValidationParams::default());

        assert_eq!(result.violation_count(), 2);
        assert_relative_eq!(result.max_violation, 2.0);
    }

    #[test]
    fn test_unlimited_joints_ignored() {
        let trace = SimulationTrace::new("drake")
            .with_joint_positions(vec![vec![0.0, 100.0]])
            .with_joint_limit(0, JointLimits::symmetric(1.0));
        let result = validate_joint_constraints(&trace, &ValidationParams::default());

        assert!(result.violations.is_empty());
        assert_eq!(result.max_violation, 0.0);
        assert!(result.constraint_satisfaction);
    }

    #[test]
    fn test_overshoot_within_tolerance_still_satisfied() {
        let trace = SimulationTrace::new("pinocchio")
            .with_joint_positions(vec![vec![1.0 + 1e-9]])
            .with_joint_limit(0, JointLimits::symmetric(1.0));
        let result = validate_joint_constraints(&trace, &ValidationParams::default());

        assert_eq!(result.violations.len(), 1);
        assert!(result.constraint_satisfaction);
    }

    #[test]
    fn test_missing_data_unchecked() {
        let no_limits = SimulationTrace::new("a").with_joint_positions(vec![vec![10.0]]);
        assert_eq!(
            validate_joint_constraints(&no_limits, &ValidationParams::default()),
            ConstraintResult::unchecked()
        );

        let no_positions = SimulationTrace::new("b").with_joint_limit(0, JointLimits::symmetric(1.0));
        assert_eq!(
            validate_joint_constraints(&no_positions, &ValidationParams::default()),
            ConstraintResult::unchecked()
        );
    }
}
