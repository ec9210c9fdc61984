//! Property tests for the validators.

#![allow(clippy::unwrap_used, clippy::float_cmp)]

use proptest::prelude::*;
use swing_types::{JointLimits, SimulationTrace};
use swing_validate::{
    compare_engines, compare_scalars, compare_trajectories, validate_conservation,
    validate_joint_constraints, ValidationParams,
};

fn trajectory(max_len: usize) -> impl Strategy<Value = Vec<Vec<f64>>> {
    (1..=4usize).prop_flat_map(move |width| {
        prop::collection::vec(prop::collection::vec(-10.0..10.0f64, width), 1..max_len)
    })
}

proptest! {
    #[test]
    fn constant_energy_is_conserved(energy in -1e3..1e3f64, samples in 2..50usize) {
        let trace = SimulationTrace::new("mujoco")
            .with_time((0..samples).map(|i| i as f64 * 0.01).collect())
            .with_energy(vec![0.0; samples], vec![energy; samples], vec![energy; samples]);

        let result = validate_conservation(&trace, &ValidationParams::default());
        prop_assert!(result.energy_conservation);
        prop_assert_eq!(result.energy_drift, 0.0);
        prop_assert_eq!(result.max_energy_deviation, 0.0);
    }

    #[test]
    fn overshoot_always_detected(
        positions in prop::collection::vec(-3.0..3.0f64, 1..30),
        index in any::<prop::sample::Index>(),
        overshoot in 0.01..5.0f64,
    ) {
        let mut rows: Vec<Vec<f64>> = positions.iter().map(|&q| vec![q]).collect();
        let bad = index.index(rows.len());
        rows[bad][0] = 3.0 + overshoot;

        let trace = SimulationTrace::new("drake")
            .with_time(vec![0.0; rows.len()])
            .with_joint_positions(rows)
            .with_joint_limit(0, JointLimits::symmetric(3.0));

        let result = validate_joint_constraints(&trace, &ValidationParams::default());
        prop_assert!(!result.constraint_satisfaction);
        prop_assert!((result.max_violation - overshoot).abs() < 1e-9);
        prop_assert_eq!(result.violations.len(), 1);
        prop_assert_eq!(result.violations[0].timestep, bad);
    }

    #[test]
    fn self_agreement_is_perfect(x in trajectory(40)) {
        let nonzero = x.iter().flatten().any(|v| *v != 0.0);
        prop_assume!(nonzero);
        prop_assert!((compare_trajectories(&x, &x) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn agreement_bounded(a in trajectory(20), b in trajectory(20)) {
        let score = compare_trajectories(&a, &b);
        prop_assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn scalar_agreement_bounded(
        a in prop::collection::vec(-100.0..100.0f64, 0..20),
        b in prop::collection::vec(-100.0..100.0f64, 0..20),
    ) {
        let score = compare_scalars(&a, &b);
        prop_assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn pair_count_matches_engines(count in 2..6usize) {
        let traces: Vec<SimulationTrace> = (0..count)
            .map(|i| {
                SimulationTrace::new(format!("engine{i}"))
                    .with_time(vec![0.0, 1.0])
                    .with_joint_positions(vec![vec![1.0], vec![2.0]])
            })
            .collect();

        let result = compare_engines(&traces, &ValidationParams::default());
        prop_assert_eq!(result.position_agreement.len(), count * (count - 1) / 2);
        prop_assert!(result.velocity_agreement.is_empty());
        prop_assert!(result.overall_agreement);
    }
}
